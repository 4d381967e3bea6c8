//! Literal model (§3): predicate symbol, ordered arguments, negation flag,
//! mode declaration and optional type guards.

use crate::mode::ModeDeclaration;
use crate::term::{variables_in, Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: String,
    pub args: Vec<Term>,
    /// Negation-as-failure flag.
    pub naf: bool,
    pub mode: ModeDeclaration,
    pub type_guards: Vec<Literal>,
}

impl Literal {
    pub fn new(predicate: impl Into<String>, args: Vec<Term>, mode: ModeDeclaration) -> Self {
        Literal {
            predicate: predicate.into(),
            args,
            naf: false,
            mode,
            type_guards: Vec::new(),
        }
    }

    /// Convenience constructor for tests and embedding callers that don't
    /// need a specific mode declaration: builds a permissive "any" mode.
    pub fn positive(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        let predicate = predicate.into();
        let arity = args.len();
        Literal::new(predicate.clone(), args, ModeDeclaration::any(predicate, arity))
    }

    pub fn negated(mut self) -> Self {
        self.naf = true;
        self
    }

    pub fn with_type_guards(mut self, guards: Vec<Literal>) -> Self {
        self.type_guards = guards;
        self
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_ground)
    }

    pub fn variables(&self) -> Vec<&Variable> {
        variables_in(self.args.iter())
    }

    pub fn substitute(&self, mapping: &HashMap<String, Term>) -> Literal {
        Literal {
            predicate: self.predicate.clone(),
            args: self.args.iter().map(|a| a.substitute(mapping)).collect(),
            naf: self.naf,
            mode: self.mode.clone(),
            type_guards: self.type_guards.iter().map(|g| g.substitute(mapping)).collect(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args.iter().map(ToString::to_string).collect();
        let rendered = format!("{}({})", self.predicate, args.join(","));
        if self.naf {
            write!(f, "!{rendered}")
        } else {
            write!(f, "{rendered}")
        }
    }
}
