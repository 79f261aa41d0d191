use catscore_core::{IngredientSignals, NutrientProfile};
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// The three free-text fields read off a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    pub product_name: String,
    pub guaranteed_analysis: String,
    pub ingredients: String,
}

impl ExtractionRequest {
    #[must_use]
    pub fn new(
        product_name: impl Into<String>,
        guaranteed_analysis: impl Into<String>,
        ingredients: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            guaranteed_analysis: guaranteed_analysis.into(),
            ingredients: ingredients.into(),
        }
    }

    /// Rejects blank fields before any network traffic.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidRequest`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ExtractError> {
        let fields = [
            ("product name", &self.product_name),
            ("guaranteed analysis", &self.guaranteed_analysis),
            ("ingredients", &self.ingredients),
        ];
        for (label, value) in fields {
            if value.trim().is_empty() {
                return Err(ExtractError::InvalidRequest(format!("{label} is empty")));
            }
        }
        Ok(())
    }
}

/// Structured label as returned by the extraction service.
///
/// The same shape is accepted from disk for offline evaluation; such files
/// may additionally carry a product `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedLabel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nutrients: NutrientProfile,
    pub ingredients: IngredientSignals,
    pub summary: String,
}

impl ExtractedLabel {
    /// Parse a label document.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Deserialize`] if `json` does not match the
    /// label contract.
    pub fn from_json_str(json: &str) -> Result<Self, ExtractError> {
        serde_json::from_str(json).map_err(|e| ExtractError::Deserialize {
            context: "label document".to_owned(),
            source: e,
        })
    }
}
