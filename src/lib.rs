//! # ILP Event Learner
//!
//! An online inductive logic programming learner that incrementally induces
//! an event-calculus theory (`initiatedAt` / `terminatedAt` rules) from a
//! stream of labeled examples.
//!
//! ## Pipeline Architecture
//!
//! ```text
//! Example stream
//!     ↓
//! [Term/Literal/Clause model]   → the data model (§3/§4.1)
//!     ↓
//! [θ-subsumption engine]        → subsumes(c1, c2) (§4.2)
//!     ↓
//! [Refinement generator]        → candidate specializations (§4.3)
//!     ↓
//! [Scoring & Hoeffding test]    → per-rule score, specialization decision (§4.4)
//!     ↓
//! [Online learning loop]        → per-example protocol, rule expansion (§4.5)
//!     ↓                              ↑
//! [Support-set manager]  ───────────┘  compression, merge-on-subsume (§4.6)
//!     ↓
//! Learned theory (Display / serde)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ilp_event_learner::{Learner, LearnerConfig};
//!
//! let config = LearnerConfig::load()?;
//! let mut learner = Learner::new(config, my_solver, my_structure_learner, my_scorer);
//!
//! for example in examples {
//!     learner.process_example(&example)?;
//! }
//!
//! let surviving = learner.rescore(training_examples)?;
//! ```
//!
//! ## Module Organization
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `term` | Term model: Variable, Constant, Compound |
//! | `mode` | Mode declarations for refinement guidance |
//! | `literal` | Literal model: predicate, args, negation, mode |
//! | `clause` | Clause, `ClauseStore` arena, `Theory` |
//! | `subst` | Substitution and skolemization |
//! | `subsumption` | θ-subsumption engine |
//! | `refinement` | Candidate-refinement generator |
//! | `scoring` | Per-rule scoring functions and specialization decision |
//! | `hoeffding` | Hoeffding-bound test |
//! | `support` | Support-set compression, theory compression, merge-on-subsume |
//! | `external` | Collaborator traits: `AspSolver`, `StructureLearner`, `RuleScorer`, `ClauseParser` |
//! | `learner` | The online learning loop and state machine |
//! | `builders` | Fluent construction API for clauses and literals |
//! | `config` | Layered configuration (`LearnerConfig`) |
//! | `logging` | `tracing` subscriber setup |

pub mod builders;
pub mod clause;
pub mod config;
pub mod error;
pub mod external;
pub mod hoeffding;
pub mod learner;
pub mod literal;
pub mod logging;
pub mod mode;
pub mod refinement;
pub mod scoring;
pub mod subst;
pub mod subsumption;
pub mod support;
pub mod term;

pub use clause::{Clause, ClauseId, ClauseStore, Theory, INITIATED_AT, TERMINATED_AT};
pub use config::{LearnerConfig, LearningConfig, LoggingConfig, RuleLearningStrategy};
pub use error::{LearnerError, LearnerResult, ParseError, SolverError};
pub use external::{AspSolver, ClauseParser, Example, InferredState, RuleScorer, ScoreUpdate, StructureLearner};
pub use hoeffding::{epsilon, should_swap};
pub use learner::{GlobalStats, Learner};
pub use literal::Literal;
pub use mode::{ArgMode, ModeDeclaration};
pub use scoring::{decide_specialization, foil_gain, fscore, precision, recall, score, ScoringMode, SpecializationDecision};
pub use subst::{skolemize, substitute_clause, Substitution};
pub use subsumption::{mutually_subsumes, subsumes, MAX_SUBSUMPTION_VARIABLES};
pub use support::{add, add_all, compress, compress_theory, get_support_literal, merge_on_subsume, remove};
pub use term::{Term, Variable};
