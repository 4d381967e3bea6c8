//! Term model (§3, §4.1): Variable, Constant and Compound terms, plus the
//! homomorphic substitution and left-to-right variable collection used
//! throughout the subsumption and refinement engines.

use crate::mode::ArgMode;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A logic variable. Equality is structural, per §3: two variables with the
/// same name but a different mode marker or sort tag are distinct terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub io_mode: Option<ArgMode>,
    pub sort: Option<String>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            io_mode: None,
            sort: None,
        }
    }

    pub fn with_sort(name: impl Into<String>, sort: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            io_mode: None,
            sort: Some(sort.into()),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A term: Variable, Constant, or Compound (§3). Numeric and symbolic
/// constants are not distinguished at this layer — they are both rendered
/// and stored as their source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(String),
    Compound(String, Vec<Term>),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    pub fn constant(value: impl Into<String>) -> Self {
        Term::Constant(value.into())
    }

    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound(functor.into(), args)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) => true,
            Term::Compound(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Collects the distinct variables of this term, in left-to-right
    /// traversal order, appending into `order` and deduplicating via `seen`.
    fn collect_variables<'a>(&'a self, seen: &mut HashSet<&'a str>, order: &mut Vec<&'a Variable>) {
        match self {
            Term::Variable(v) => {
                if seen.insert(v.name.as_str()) {
                    order.push(v);
                }
            }
            Term::Constant(_) => {}
            Term::Compound(_, args) => {
                for a in args {
                    a.collect_variables(seen, order);
                }
            }
        }
    }

    /// Homomorphic substitution: applies `mapping` (keyed by variable name)
    /// to every Variable sub-term, passing Constants through unchanged.
    pub fn substitute(&self, mapping: &HashMap<String, Term>) -> Term {
        match self {
            Term::Variable(v) => mapping.get(&v.name).cloned().unwrap_or_else(|| self.clone()),
            Term::Constant(_) => self.clone(),
            Term::Compound(f, args) => {
                Term::Compound(f.clone(), args.iter().map(|a| a.substitute(mapping)).collect())
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{v}"),
            Term::Constant(c) => write!(f, "{c}"),
            Term::Compound(functor, args) => {
                let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
                write!(f, "{}({})", functor, rendered.join(","))
            }
        }
    }
}

/// Distinct variables of `terms`, in left-to-right traversal order.
pub fn variables_in<'a>(terms: impl IntoIterator<Item = &'a Term>) -> Vec<&'a Variable> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    for t in terms {
        t.collect_variables(&mut seen, &mut order);
    }
    order
}

/// Skolem constant name for the `i`-th distinct variable encountered, per §4.1.
pub fn skolem_name(index: usize) -> String {
    format!("skolem{index}")
}
