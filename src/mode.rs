//! Mode declarations: the template literals that constrain refinement
//! generation (§4.3) and flag comparison predicates for redundancy
//! detection (§4.3 step 3).

use serde::{Deserialize, Serialize};

/// Argument-position tag in a mode declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgMode {
    /// `+`: must be bound when the literal is called.
    Input,
    /// `-`: produced by the literal.
    Output,
    /// `#`: a constant placeholder, filled from the mode declaration's own
    /// literal rather than unified with a variable.
    Constant,
    /// `_`: don't care.
    DontCare,
}

/// A template literal describing how a predicate may appear in a clause
/// body: one [`ArgMode`] per argument position, plus a flag marking
/// comparison predicates (numeric inequalities and the like) for the
/// redundancy check in refinement generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModeDeclaration {
    pub predicate: String,
    pub arg_modes: Vec<ArgMode>,
    pub is_comparison: bool,
}

impl ModeDeclaration {
    pub fn new(predicate: impl Into<String>, arg_modes: Vec<ArgMode>) -> Self {
        ModeDeclaration {
            predicate: predicate.into(),
            arg_modes,
            is_comparison: false,
        }
    }

    pub fn comparison(predicate: impl Into<String>, arg_modes: Vec<ArgMode>) -> Self {
        ModeDeclaration {
            predicate: predicate.into(),
            arg_modes,
            is_comparison: true,
        }
    }

    /// A permissive mode declaration ("don't care" in every position) for
    /// tests and callers that don't need mode-guided refinement.
    pub fn any(predicate: impl Into<String>, arity: usize) -> Self {
        ModeDeclaration {
            predicate: predicate.into(),
            arg_modes: vec![ArgMode::DontCare; arity],
            is_comparison: false,
        }
    }

    pub fn arity(&self) -> usize {
        self.arg_modes.len()
    }
}
