//! Client for the label-extraction service.
//!
//! The service turns free-text label panels into a structured
//! [`ExtractedLabel`]; scoring happens afterwards in `catscore-engine`.

pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::{ExtractionClient, LabelExtractor};
pub use error::ExtractError;
pub use types::{ExtractedLabel, ExtractionRequest};
