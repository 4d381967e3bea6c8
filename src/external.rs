//! External collaborator seams (§6): the ASP solver, the structure-learning
//! (abduction) subsystem, the per-rule scorer, and the textual parser. Each
//! is a trait so the learner is generic over its collaborators and testable
//! with in-memory fakes; none of their internal logic ships in this crate.

use crate::clause::Clause;
use crate::config::LearnerConfig;
use crate::error::{ParseError, SolverError};
use crate::literal::Literal;
use std::collections::HashMap;

/// A single labeled training/test instance: ground facts for one world
/// state plus the query atoms the theory must entail.
#[derive(Debug, Clone)]
pub struct Example {
    pub facts: Vec<Literal>,
    pub query_atoms: Vec<Literal>,
    /// Identifies which event-calculus axiom module the solver should load
    /// for this example (domain-specific, opaque to the learner).
    pub axiom_module: String,
}

impl Example {
    pub fn new(facts: Vec<Literal>, query_atoms: Vec<Literal>, axiom_module: impl Into<String>) -> Self {
        Example {
            facts,
            query_atoms,
            axiom_module: axiom_module.into(),
        }
    }
}

/// Ground-atom → truth-value mapping produced by the ASP solver for one
/// example, keyed by the atom's rendered text.
pub type InferredState = HashMap<String, bool>;

/// Result of scoring the full theory (including refinements) against one
/// example (§4.5 step 3).
#[derive(Debug, Clone, Default)]
pub struct ScoreUpdate {
    pub tps: u64,
    pub fps: u64,
    pub fns: u64,
    pub total_groundings: u64,
    pub new_inertia_atoms: Vec<Literal>,
}

/// Crisp-logic inference oracle: grounds `rules` against `example.facts` and
/// returns the resulting truth assignment.
pub trait AspSolver {
    fn infer(
        &self,
        rules: &[Clause],
        example: &Example,
        globals: &LearnerConfig,
    ) -> Result<InferredState, SolverError>;
}

/// Bottom-up abduction: proposes new top clauses, each already equipped
/// with a support set, from the current theory's mistakes on `example`.
pub trait StructureLearner {
    fn generate_new_rules(
        &self,
        current_theory: &[Clause],
        example: &Example,
        options: &LearnerConfig,
    ) -> Vec<Clause>;
}

/// Updates every rule's confusion-matrix counters and weight in place from
/// one example's inferred state.
pub trait RuleScorer {
    fn score_and_update_weights(
        &self,
        example: &Example,
        inferred_state: &InferredState,
        rules_including_refinements: &mut [Clause],
        options: &LearnerConfig,
    ) -> ScoreUpdate;
}

/// Textual clause syntax: `head :- lit1, lit2, …, litN.`, Prolog-like terms,
/// with an optional leading numeric weight token. No concrete grammar ships
/// here; embedding callers either implement this trait or use the
/// programmatic [`crate::builders`] API directly.
pub trait ClauseParser {
    fn parse(&self, text: &str) -> Result<Clause, ParseError>;
}
