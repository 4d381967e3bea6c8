//! Error taxonomy for the learner.
//!
//! The core's pure functions (subsumption, refinement, scoring) are total on
//! well-typed inputs and never return `Result` — see `SPEC_FULL.md` §7. The
//! only surfaced errors are structural lookup errors and collaborator
//! failures, both threaded through [`LearnerError`] at the `Learner` API
//! boundary.

use thiserror::Error;

/// Failure from the external clause parser collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error: {0}")]
pub struct ParseError(pub String);

/// Failure from the external ASP solver collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("solver timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("solver failed: {0}")]
    Failed(String),
}

/// Errors surfaced by the learner's public API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LearnerError {
    /// Propagated from the external parser (§6 `ClauseParser`).
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Propagated from the external ASP solver (§6 `AspSolver`). The
    /// example that triggered it is skipped for structural updates; counters
    /// are left untouched (§7).
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// `get_support_literal(i, j)` (or similar positional lookups) addressed
    /// outside `[1, len]`.
    #[error("support literal ({row}, {col}) out of range (support set has {support_len} rules)")]
    NotFound {
        row: usize,
        col: usize,
        support_len: usize,
    },

    /// A documented invariant (§3) was violated. Fatal for the run: the
    /// caller must stop feeding examples to this learner instance.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

pub type LearnerResult<T> = Result<T, LearnerError>;
