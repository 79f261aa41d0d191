//! Evaluation entry point: normalize, score, and assemble the result record.

use catscore_core::{
    ConfigError, EvaluationParts, EvaluationResult, IngredientSignals, NutrientProfile,
    ReferenceTargets,
};

use crate::error::EvaluationError;
use crate::ids::{Clock, IdGenerator, SystemClock, UuidIds};
use crate::normalize::normalize;
use crate::scorer::score;

/// Scores labels against one reference table.
///
/// Holds no mutable state, so a single instance can be shared across
/// threads.
pub struct Evaluator {
    targets: ReferenceTargets,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl Evaluator {
    /// Evaluator with random UUID ids and the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when `targets` is inconsistent,
    /// for example a tier ladder that does not strictly decrease.
    pub fn new(targets: ReferenceTargets) -> Result<Self, ConfigError> {
        targets.validate()?;
        Ok(Self::with_targets(targets))
    }

    fn with_targets(targets: ReferenceTargets) -> Self {
        Self {
            targets,
            ids: Box::new(UuidIds),
            clock: Box::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub fn targets(&self) -> &ReferenceTargets {
        &self.targets
    }

    /// Evaluate one label.
    ///
    /// `summary` is carried into the result verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] when the declared nutrients fail
    /// validation; nothing is scored in that case.
    pub fn evaluate(
        &self,
        name: &str,
        raw: &NutrientProfile,
        signals: &IngredientSignals,
        summary: &str,
    ) -> Result<EvaluationResult, EvaluationError> {
        let normalized = normalize(raw, signals, &self.targets)?;
        let card = score(&normalized, signals, &self.targets);

        tracing::info!(
            name,
            score = card.total,
            tier = %card.tier,
            warnings = card.warnings.len(),
            assumptions = card.assumptions.len(),
            "evaluation complete"
        );

        Ok(EvaluationResult::from(EvaluationParts {
            id: self.ids.next_id(),
            name: name.to_owned(),
            created_at: self.clock.now(),
            raw_nutrients: raw.clone(),
            dry_matter_nutrients: normalized.dm.into_profile(),
            ingredients: *signals,
            score: card.total,
            granular_scores: card.granular,
            tier: card.tier,
            summary: summary.to_owned(),
            warnings: card.warnings,
            observations: card.observations,
            assumptions: card.assumptions,
        }))
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::with_targets(ReferenceTargets::default())
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}

/// Evaluate against the default reference table.
///
/// # Errors
///
/// See [`Evaluator::evaluate`].
pub fn evaluate(
    name: &str,
    raw: &NutrientProfile,
    signals: &IngredientSignals,
    summary: &str,
) -> Result<EvaluationResult, EvaluationError> {
    Evaluator::default().evaluate(name, raw, signals, summary)
}
