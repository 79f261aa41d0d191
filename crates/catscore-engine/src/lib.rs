//! Deterministic pet-food label scoring.
//!
//! [`normalize`] puts declared nutrients on a dry-matter basis, [`score`]
//! turns the normalized profile and ingredient signals into category points,
//! annotations, and a tier, and [`Evaluator`] wraps both into an immutable
//! [`catscore_core::EvaluationResult`].

pub mod error;
pub mod evaluator;
pub mod ids;
pub mod normalize;
pub mod scorer;

mod curves;

pub use error::EvaluationError;
pub use evaluator::{evaluate, Evaluator};
pub use ids::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidIds};
pub use normalize::{normalize, DryMatterProfile, Normalized};
pub use scorer::{score, CategoryScores, Scorecard};
