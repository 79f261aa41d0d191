//! Dry-matter normalization.
//!
//! Labels declare nutrients "as fed", so a wet food with 78% moisture looks
//! protein-poor next to kibble until both are expressed per unit of dry
//! matter. This module validates the raw panel, repairs obvious unit slips,
//! scales by `100 / (100 - moisture)`, and back-fills a few essentials when
//! the ingredient list justifies it.

use catscore_core::{
    Assumption, IngredientSignals, Nutrient, NutrientProfile, ReferenceTargets, UnitCorrection,
};

use crate::error::EvaluationError;

/// A nutrient profile on a dry-matter basis.
///
/// Only [`normalize`] can build one, so scoring an as-fed profile by mistake
/// does not compile. `moisture` is always absent.
#[derive(Debug, Clone, PartialEq)]
pub struct DryMatterProfile(NutrientProfile);

impl DryMatterProfile {
    #[must_use]
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        self.0.get(nutrient)
    }

    #[must_use]
    pub fn into_profile(self) -> NutrientProfile {
        self.0
    }
}

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub dm: DryMatterProfile,
    /// One entry per back-filled nutrient, in the order they were inferred.
    pub assumptions: Vec<Assumption>,
    /// As-fed moisture used for the conversion (declared or default).
    pub moisture: f64,
    pub dm_factor: f64,
}

impl Normalized {
    /// Returns `true` when `nutrient` was inferred rather than declared.
    #[must_use]
    pub fn is_assumed(&self, nutrient: Nutrient) -> bool {
        self.assumptions.iter().any(|a| a.nutrient == nutrient)
    }
}

/// Normalize a raw label panel onto a dry-matter basis.
///
/// # Errors
///
/// Returns [`EvaluationError`] if any declared value is negative or not
/// finite, or if moisture is 100% or more.
pub fn normalize(
    raw: &NutrientProfile,
    signals: &IngredientSignals,
    targets: &ReferenceTargets,
) -> Result<Normalized, EvaluationError> {
    validate(raw)?;

    let moisture = raw.moisture.unwrap_or(targets.default_moisture);
    let dm_factor = dm_factor(moisture)?;
    tracing::debug!(
        moisture,
        dm_factor,
        declared_moisture = raw.moisture.is_some(),
        "resolved dry-matter factor"
    );

    let mut dm = NutrientProfile::default();
    for (nutrient, value) in raw.declared() {
        if nutrient == Nutrient::Moisture {
            continue;
        }
        let corrected = correct_units(nutrient, value, targets.unit_correction);
        if (corrected - value).abs() > f64::EPSILON {
            tracing::debug!(%nutrient, declared = value, corrected, "applied unit correction");
        }
        let scaled = corrected * dm_factor;
        // A huge declared value times a near-saturation factor overflows.
        if !scaled.is_finite() {
            return Err(EvaluationError::NonFiniteNutrient { nutrient });
        }
        dm.set(nutrient, Some(scaled));
    }

    let assumptions = back_fill(&mut dm, moisture, signals, targets);

    Ok(Normalized {
        dm: DryMatterProfile(dm),
        assumptions,
        moisture,
        dm_factor,
    })
}

/// Reject values no label can legitimately declare.
fn validate(raw: &NutrientProfile) -> Result<(), EvaluationError> {
    for (nutrient, value) in raw.declared() {
        if !value.is_finite() {
            return Err(EvaluationError::NonFiniteNutrient { nutrient });
        }
        if value < 0.0 {
            return Err(EvaluationError::NegativeNutrient { nutrient, value });
        }
    }
    Ok(())
}

/// `100 / (100 - moisture)`.
///
/// Moisture just below 100 yields a very large but finite factor; 100 or
/// more has no dry matter left and is rejected.
///
/// # Errors
///
/// Returns [`EvaluationError::InvalidMoisture`] when `moisture >= 100`.
pub fn dm_factor(moisture: f64) -> Result<f64, EvaluationError> {
    if !moisture.is_finite() {
        return Err(EvaluationError::NonFiniteNutrient {
            nutrient: Nutrient::Moisture,
        });
    }
    if moisture < 0.0 {
        return Err(EvaluationError::NegativeNutrient {
            nutrient: Nutrient::Moisture,
            value: moisture,
        });
    }
    if moisture >= 100.0 {
        return Err(EvaluationError::InvalidMoisture { value: moisture });
    }
    Ok(100.0 / (100.0 - moisture))
}

/// Coerce a declared value printed in the wrong unit back to percent.
#[must_use]
pub fn correct_units(nutrient: Nutrient, value: f64, policy: UnitCorrection) -> f64 {
    match policy {
        UnitCorrection::MagnitudeBucket if nutrient.is_unit_corrected() => {
            if value >= 1000.0 {
                value / 10_000.0
            } else if value >= 50.0 {
                value / 10.0
            } else {
                value
            }
        }
        UnitCorrection::TaurineOnly { threshold }
            if nutrient == Nutrient::Taurine && value > threshold =>
        {
            value / 10_000.0
        }
        _ => value,
    }
}

/// Infer missing essentials from ingredient evidence.
///
/// Only phosphorus may be derived from another inferred value (calcium).
fn back_fill(
    dm: &mut NutrientProfile,
    moisture: f64,
    signals: &IngredientSignals,
    targets: &ReferenceTargets,
) -> Vec<Assumption> {
    let mut assumptions = Vec::new();

    if dm.taurine.is_none() && signals.has_taurine_added {
        let value = targets.taurine.min_for_moisture(moisture);
        let class = if moisture > targets.taurine.wet_moisture_threshold {
            "wet"
        } else {
            "dry"
        };
        dm.taurine = Some(value);
        assumptions.push(Assumption {
            nutrient: Nutrient::Taurine,
            value,
            message: format!(
                "Taurine: not declared but listed among the ingredients, so the regulatory \
                 minimum for {class} food ({value:.2}% DM) is assumed. Ask the manufacturer \
                 for the actual value."
            ),
        });
    }

    if dm.calcium.is_none() && signals.has_chelated_minerals {
        let value = targets.calcium.min;
        dm.calcium = Some(value);
        assumptions.push(Assumption {
            nutrient: Nutrient::Calcium,
            value,
            message: format!(
                "Calcium: not declared but chelated minerals are listed, so the regulatory \
                 minimum ({value:.2}% DM) is assumed."
            ),
        });
    }

    if dm.phosphorus.is_none() {
        if let Some(calcium) = dm.calcium {
            let ratio = targets.ca_p_ratio.ideal;
            let value = calcium / ratio;
            dm.phosphorus = Some(value);
            assumptions.push(Assumption {
                nutrient: Nutrient::Phosphorus,
                value,
                message: format!(
                    "Phosphorus: not declared; derived from calcium ({calcium:.2}% DM) at the \
                     ideal {ratio:.2}:1 Ca:P ratio, giving {value:.2}% DM."
                ),
            });
        }
    }

    for assumption in &assumptions {
        tracing::debug!(
            nutrient = %assumption.nutrient,
            value = assumption.value,
            "back-filled missing nutrient"
        );
    }

    assumptions
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
