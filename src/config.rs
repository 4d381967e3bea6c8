//! Configuration System
//!
//! Provides hierarchical configuration loading from:
//! - learner.toml (default configuration)
//! - learner.local.toml (git-ignored local overrides)
//! - Environment variables (ILP_* prefix)
//!
//! ## Example
//!
//! ```toml
//! # learner.toml
//! [learning]
//! specialization_depth = 2
//! prune_threshold = 0.6
//! scoring_fun = "foilgain"
//! ```
//!
//! Environment variable overrides:
//! ```bash
//! ILP_LEARNING__SCORING_FUN=fscore
//! ILP_LEARNING__WITH_INERTIA=false
//! ```

use crate::mode::ModeDeclaration;
use crate::scoring::ScoringMode;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Closed set of structure-learning strategies. `Hoeffding` is the only one
/// implemented in-crate (§4.4); `Other` is a seam for a caller-supplied
/// strategy swapped in around `Learner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLearningStrategy {
    Hoeffding,
    Other,
}

impl Default for RuleLearningStrategy {
    fn default() -> Self {
        RuleLearningStrategy::Hoeffding
    }
}

/// Top-level learner configuration (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerConfig {
    pub learning: LearningConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Structure-learning knobs read throughout §4.3–§4.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Maximum `k` in refinement-candidate subsets (§4.3).
    #[serde(default = "default_specialization_depth")]
    pub specialization_depth: usize,

    /// Minimum precision for a rule to be used during inference and kept at
    /// rescore time.
    #[serde(default = "default_prune_threshold")]
    pub prune_threshold: f64,

    /// Selected per-rule scoring function (§4.4).
    #[serde(default)]
    pub scoring_fun: ScoringMode,

    /// Mode atoms flagged as comparison predicates, for the refinement
    /// redundancy check (§4.3 step 3).
    #[serde(default)]
    pub comparison_predicates: Vec<ModeDeclaration>,

    /// Lower bound enforced on every clause's weight (§3 invariant 5).
    #[serde(default = "default_weight_floor")]
    pub weight_floor: f64,

    /// Confidence parameter `δ` for the Hoeffding test (§4.4).
    #[serde(default = "default_hoeffding_delta")]
    pub hoeffding_delta: f64,

    #[serde(default)]
    pub rule_learning_strategy: RuleLearningStrategy,

    /// Whether inertia atoms are carried over between examples at all.
    #[serde(default = "default_true")]
    pub with_inertia: bool,

    /// When true, `inertia_atoms` is cleared immediately after being
    /// reported for the next example ("use this to diffuse inertia"); when
    /// false, inertia atoms persist until explicitly overwritten (§9).
    #[serde(default = "default_true")]
    pub diffuse_inertia: bool,
}

/// Logging configuration, mirrored from the reference architecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_specialization_depth() -> usize {
    1
}
fn default_prune_threshold() -> f64 {
    0.6
}
fn default_weight_floor() -> f64 {
    1e-5
}
fn default_hoeffding_delta() -> f64 {
    0.05
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

impl LearnerConfig {
    /// Load configuration from default locations.
    ///
    /// Merges in order:
    /// 1. learner.toml (base configuration)
    /// 2. learner.local.toml (local overrides, git-ignored)
    /// 3. Environment variables (ILP_* prefix)
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("learner.toml"))
            .merge(Toml::file("learner.local.toml"))
            .merge(Env::prefixed("ILP_").split("__"))
            .extract()
    }

    /// Load configuration from a specific file path.
    pub fn from_file(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("ILP_").split("__"))
            .extract()
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        LearnerConfig {
            learning: LearningConfig {
                specialization_depth: default_specialization_depth(),
                prune_threshold: default_prune_threshold(),
                scoring_fun: ScoringMode::default(),
                comparison_predicates: Vec::new(),
                weight_floor: default_weight_floor(),
                hoeffding_delta: default_hoeffding_delta(),
                rule_learning_strategy: RuleLearningStrategy::default(),
                with_inertia: true,
                diffuse_inertia: true,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
