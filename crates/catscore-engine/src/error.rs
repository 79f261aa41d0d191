use catscore_core::Nutrient;
use thiserror::Error;

/// Input rejected before normalization. Nothing is scored when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("moisture {value}% leaves no dry matter; it must be below 100%")]
    InvalidMoisture { value: f64 },

    #[error("{nutrient} cannot be negative (got {value})")]
    NegativeNutrient { nutrient: Nutrient, value: f64 },

    #[error("{nutrient} is not a finite number")]
    NonFiniteNutrient { nutrient: Nutrient },
}
