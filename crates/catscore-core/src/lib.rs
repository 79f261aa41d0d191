//! Domain types, reference targets, and configuration for CatScore.
//!
//! Everything in this crate is plain data: the scoring algorithm lives in
//! `catscore-engine` and the label-parsing client in `catscore-extract`.

pub mod app_config;
pub mod config;
pub mod ingredients;
pub mod nutrients;
pub mod result;
pub mod targets;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use ingredients::IngredientSignals;
pub use nutrients::{Nutrient, NutrientProfile};
pub use result::{Assumption, EvaluationParts, EvaluationResult, GranularScores, Tier};
pub use targets::{
    load_targets, parse_targets, CaPRatioTarget, MineralBand, NutrientTarget, ReferenceTargets,
    TaurineTarget, TierThresholds, UnitCorrection,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read targets file {path}: {source}")]
    TargetsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse targets file: {0}")]
    TargetsFileParse(#[from] serde_yaml::Error),

    #[error("targets validation failed: {0}")]
    Validation(String),
}
