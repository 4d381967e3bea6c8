//! Fluent builder APIs for programmatic clause construction (§4.1), standing
//! in for a full grammar-driven parser. Mirrors the reference architecture's
//! AST builder module.
//!
//! ## Example
//!
//! ```rust
//! use ilp_event_learner::builders::{LiteralBuilder, ClauseBuilder};
//!
//! // Build an atom: happensAt(E, T)
//! let atom = LiteralBuilder::new("happensAt").var("E").var("T").build();
//!
//! // Build a rule: initiatedAt(E, T) :- happensAt(E, T).
//! let rule = ClauseBuilder::new("initiatedAt")
//!     .head_vars(["E", "T"])
//!     .body_atom("happensAt", ["E", "T"])
//!     .build();
//! ```

use crate::clause::Clause;
use crate::literal::Literal;
use crate::mode::ModeDeclaration;
use crate::term::Term;

/// Builder for a single [`Literal`].
#[derive(Debug, Clone)]
pub struct LiteralBuilder {
    predicate: String,
    args: Vec<Term>,
    naf: bool,
    mode: Option<ModeDeclaration>,
}

impl LiteralBuilder {
    pub fn new(predicate: impl Into<String>) -> Self {
        LiteralBuilder {
            predicate: predicate.into(),
            args: Vec::new(),
            naf: false,
            mode: None,
        }
    }

    pub fn var(mut self, name: impl Into<String>) -> Self {
        self.args.push(Term::var(name));
        self
    }

    pub fn constant(mut self, value: impl Into<String>) -> Self {
        self.args.push(Term::constant(value));
        self
    }

    pub fn term(mut self, term: Term) -> Self {
        self.args.push(term);
        self
    }

    pub fn negated(mut self) -> Self {
        self.naf = true;
        self
    }

    pub fn mode(mut self, mode: ModeDeclaration) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn build(self) -> Literal {
        let arity = self.args.len();
        let mode = self
            .mode
            .unwrap_or_else(|| ModeDeclaration::any(self.predicate.clone(), arity));
        let mut lit = Literal::new(self.predicate, self.args, mode);
        lit.naf = self.naf;
        lit
    }
}

/// Builder for a [`Clause`]: a head literal plus an ordered body.
#[derive(Debug, Clone, Default)]
pub struct ClauseBuilder {
    head_predicate: Option<String>,
    head_args: Vec<Term>,
    body: Vec<Literal>,
}

impl ClauseBuilder {
    pub fn new(head_predicate: impl Into<String>) -> Self {
        ClauseBuilder {
            head_predicate: Some(head_predicate.into()),
            head_args: Vec::new(),
            body: Vec::new(),
        }
    }

    /// An empty-headed clause builder, for the sentinel empty clause.
    pub fn empty() -> Self {
        ClauseBuilder::default()
    }

    pub fn head_vars<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.head_args = vars.into_iter().map(Term::var).collect();
        self
    }

    pub fn head_arg(mut self, term: Term) -> Self {
        self.head_args.push(term);
        self
    }

    pub fn body_literal(mut self, literal: Literal) -> Self {
        self.body.push(literal);
        self
    }

    pub fn body_atom<I, S>(mut self, predicate: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let predicate = predicate.into();
        let args: Vec<Term> = vars.into_iter().map(Term::var).collect();
        self.body.push(Literal::positive(predicate, args));
        self
    }

    pub fn build(self) -> Clause {
        let head = self
            .head_predicate
            .map(|p| Literal::positive(p, self.head_args));
        Clause::new(head, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_builder_produces_expected_rendering() {
        let lit = LiteralBuilder::new("happensAt").var("E").var("T").build();
        assert_eq!(lit.to_string(), "happensAt(E,T)");
    }

    #[test]
    fn clause_builder_produces_a_horn_rule() {
        let clause = ClauseBuilder::new("initiatedAt")
            .head_vars(["E", "T"])
            .body_atom("happensAt", ["E", "T"])
            .build();
        assert_eq!(clause.to_string(), "initiatedAt(E,T) :- happensAt(E,T).");
    }

    #[test]
    fn empty_clause_builder_yields_the_sentinel() {
        let clause = ClauseBuilder::empty().build();
        assert!(clause.head.is_none());
    }
}
