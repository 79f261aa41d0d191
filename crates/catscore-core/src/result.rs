use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{IngredientSignals, Nutrient, NutrientProfile};

/// Ordinal quality grade. Variants are declared worst-first so the derived
/// ordering reads naturally: `Tier::S > Tier::D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    D,
    C,
    B,
    A,
    S,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        };
        f.write_str(s)
    }
}

/// Four display buckets, each out of [`GranularScores::SUB_MAX`].
///
/// A presentation view re-projected from the category totals; the buckets
/// do not have to add up to the overall score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranularScores {
    pub animal_protein: f64,
    pub fillers_and_cereals: f64,
    pub transparency: f64,
    pub vital_balance: f64,
}

impl GranularScores {
    pub const SUB_MAX: f64 = 25.0;
}

/// A value the normalizer inferred because the label left it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    pub nutrient: Nutrient,
    /// Assumed dry-matter percentage.
    pub value: f64,
    pub message: String,
}

/// Everything needed to build an [`EvaluationResult`].
///
/// Deserialized results pass through here too, so a stored record cannot
/// bring back dry-matter moisture or an out-of-range score.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationParts {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub raw_nutrients: NutrientProfile,
    pub dry_matter_nutrients: NutrientProfile,
    pub ingredients: IngredientSignals,
    pub score: f64,
    pub granular_scores: GranularScores,
    pub tier: Tier,
    pub summary: String,
    pub warnings: Vec<String>,
    pub observations: Vec<String>,
    pub assumptions: Vec<String>,
}

/// The outcome of scoring one label.
///
/// Fields are read through accessors only; a new evaluation always produces
/// a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "EvaluationParts")]
pub struct EvaluationResult {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
    raw_nutrients: NutrientProfile,
    dry_matter_nutrients: NutrientProfile,
    ingredients: IngredientSignals,
    score: f64,
    granular_scores: GranularScores,
    tier: Tier,
    summary: String,
    warnings: Vec<String>,
    observations: Vec<String>,
    assumptions: Vec<String>,
}

impl From<EvaluationParts> for EvaluationResult {
    fn from(parts: EvaluationParts) -> Self {
        let mut dry_matter_nutrients = parts.dry_matter_nutrients;
        dry_matter_nutrients.moisture = None;
        Self {
            id: parts.id,
            name: parts.name,
            created_at: parts.created_at,
            raw_nutrients: parts.raw_nutrients,
            dry_matter_nutrients,
            ingredients: parts.ingredients,
            score: parts.score.clamp(0.0, 100.0),
            granular_scores: parts.granular_scores,
            tier: parts.tier,
            summary: parts.summary,
            warnings: parts.warnings,
            observations: parts.observations,
            assumptions: parts.assumptions,
        }
    }
}

impl EvaluationResult {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn raw_nutrients(&self) -> &NutrientProfile {
        &self.raw_nutrients
    }

    /// Dry-matter profile. `moisture` is always `None`.
    #[must_use]
    pub fn dry_matter_nutrients(&self) -> &NutrientProfile {
        &self.dry_matter_nutrients
    }

    #[must_use]
    pub fn ingredients(&self) -> &IngredientSignals {
        &self.ingredients
    }

    /// Total score in `[0, 100]`.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn granular_scores(&self) -> &GranularScores {
        &self.granular_scores
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Free-text summary from the label parser, passed through verbatim.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    #[must_use]
    pub fn observations(&self) -> &[String] {
        &self.observations
    }

    #[must_use]
    pub fn assumptions(&self) -> &[String] {
        &self.assumptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> EvaluationParts {
        EvaluationParts {
            id: "eval-1".to_owned(),
            name: "Chicken Feast".to_owned(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            raw_nutrients: NutrientProfile::default(),
            dry_matter_nutrients: NutrientProfile {
                moisture: Some(10.0),
                protein: Some(40.0),
                ..NutrientProfile::default()
            },
            ingredients: IngredientSignals::default(),
            score: 120.0,
            granular_scores: GranularScores::default(),
            tier: Tier::S,
            summary: "ok".to_owned(),
            warnings: vec![],
            observations: vec![],
            assumptions: vec![],
        }
    }

    #[test]
    fn tiers_order_best_above_worst() {
        assert!(Tier::S > Tier::A);
        assert!(Tier::A > Tier::B);
        assert!(Tier::C > Tier::D);
    }

    #[test]
    fn tier_displays_letter() {
        assert_eq!(Tier::B.to_string(), "B");
    }

    #[test]
    fn result_drops_dry_matter_moisture() {
        let result = EvaluationResult::from(parts());
        assert!(result.dry_matter_nutrients().moisture.is_none());
        assert_eq!(result.dry_matter_nutrients().protein, Some(40.0));
    }

    #[test]
    fn result_clamps_score() {
        let result = EvaluationResult::from(parts());
        assert!((result.score() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn result_serializes_camel_case() {
        let json = serde_json::to_value(EvaluationResult::from(parts())).unwrap();
        assert!(json.get("dryMatterNutrients").is_some());
        assert!(json.get("granularScores").is_some());
        assert_eq!(json["tier"], "S");
    }

    #[test]
    fn deserialized_result_keeps_its_invariants() {
        let mut json = serde_json::to_value(EvaluationResult::from(parts())).unwrap();
        json["dryMatterNutrients"]["moisture"] = serde_json::json!(12.0);
        json["score"] = serde_json::json!(150.0);

        let result: EvaluationResult = serde_json::from_value(json).unwrap();
        assert!(result.dry_matter_nutrients().moisture.is_none());
        assert!((result.score() - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.name(), "Chicken Feast");
    }
}
