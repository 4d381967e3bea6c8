//! Clause-level substitution and skolemization (§4.1).

use crate::clause::Clause;
use crate::literal::Literal;
use crate::term::{skolem_name, Term};
use std::collections::HashMap;

/// A variable→term substitution, keyed by variable name.
pub type Substitution = HashMap<String, Term>;

/// Applies `mapping` homomorphically to `clause`'s head and body, preserving
/// mode/type metadata on every literal (§4.1). Produces a fresh logical
/// clause; streaming bookkeeping is not carried over since substitution
/// yields a derived value rather than a registered arena clause.
pub fn substitute_clause(clause: &Clause, mapping: &Substitution) -> Clause {
    let head = clause.head.as_ref().map(|h| h.substitute(mapping));
    let body: Vec<Literal> = clause.body.iter().map(|l| l.substitute(mapping)).collect();
    Clause::new(head, body)
}

/// Assigns a fresh constant (`skolem0`, `skolem1`, …) to each distinct
/// variable of `clause`, in left-to-right traversal order, and returns the
/// grounded clause alongside the variable→constant mapping (§4.1). Constants
/// already present in `clause` pass through unchanged.
pub fn skolemize(clause: &Clause) -> (Clause, Substitution) {
    let mut mapping = Substitution::new();
    for (index, var) in clause.variables().into_iter().enumerate() {
        mapping
            .entry(var.name.clone())
            .or_insert_with(|| Term::constant(skolem_name(index)));
    }
    let ground = substitute_clause(clause, &mapping);
    (ground, mapping)
}
