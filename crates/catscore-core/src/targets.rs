//! The reference-target table: every tunable constant of the scoring policy.
//!
//! Values are dry-matter percentages unless noted. [`ReferenceTargets::default`]
//! is the shipped policy (FEDIAF adult-cat minimums with the CatScore ideals);
//! a YAML file can override any top-level section via [`load_targets`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Tier};

/// Minimum / ideal / optional maximum for a macronutrient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NutrientTarget {
    pub min: f64,
    pub ideal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaurineTarget {
    /// Regulatory minimum for dry food.
    pub min_dry: f64,
    /// Regulatory minimum for wet food.
    pub min_wet: f64,
    pub ideal: f64,
    /// As-fed moisture above which a product counts as wet.
    pub wet_moisture_threshold: f64,
}

impl TaurineTarget {
    /// Regulatory minimum for a product with the given as-fed moisture.
    #[must_use]
    pub fn min_for_moisture(&self, moisture: f64) -> f64 {
        if moisture > self.wet_moisture_threshold {
            self.min_wet
        } else {
            self.min_dry
        }
    }
}

/// Closed acceptable band `[min, max]` for a mineral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MineralBand {
    pub min: f64,
    pub max: f64,
}

impl MineralBand {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Calcium to phosphorus ratio target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaPRatioTarget {
    pub min: f64,
    pub ideal: f64,
    pub max: f64,
}

/// How declared values in the wrong unit are coerced back to percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitCorrection {
    /// Values `>= 1000` are read as per-ten-thousand and divided by 10 000;
    /// values in `[50, 1000)` are read as off by one decimal and divided by 10.
    /// Applies to every [`crate::Nutrient::is_unit_corrected`] nutrient.
    ///
    /// Blunt: a correct percentage of 50 or more is also divided.
    MagnitudeBucket,
    /// Only taurine above `threshold` is read as per-ten-thousand.
    TaurineOnly { threshold: f64 },
    /// Declared values are trusted as printed.
    None,
}

/// Lower bounds of each tier, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierThresholds {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl TierThresholds {
    /// Maps a total score onto its tier. Total over every real score: anything
    /// below `c` (including NaN) is [`Tier::D`].
    #[must_use]
    pub fn tier_for(&self, score: f64) -> Tier {
        if score >= self.s {
            Tier::S
        } else if score >= self.a {
            Tier::A
        } else if score >= self.b {
            Tier::B
        } else if score >= self.c {
            Tier::C
        } else {
            Tier::D
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            s: 88.0,
            a: 72.0,
            b: 58.0,
            c: 42.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceTargets {
    pub protein: NutrientTarget,
    pub fat: NutrientTarget,
    pub taurine: TaurineTarget,
    pub calcium: MineralBand,
    pub phosphorus: MineralBand,
    pub sodium: MineralBand,
    pub magnesium: MineralBand,
    pub ca_p_ratio: CaPRatioTarget,
    /// As-fed moisture assumed when the label omits it (typical kibble).
    pub default_moisture: f64,
    pub unit_correction: UnitCorrection,
    pub tiers: TierThresholds,
}

impl Default for ReferenceTargets {
    fn default() -> Self {
        Self {
            protein: NutrientTarget {
                min: 25.0,
                ideal: 38.0,
                max: None,
            },
            fat: NutrientTarget {
                min: 9.0,
                ideal: 14.5,
                max: Some(20.0),
            },
            taurine: TaurineTarget {
                min_dry: 0.10,
                min_wet: 0.20,
                ideal: 0.20,
                wet_moisture_threshold: 50.0,
            },
            calcium: MineralBand {
                min: 0.40,
                max: 1.00,
            },
            phosphorus: MineralBand {
                min: 0.26,
                max: 0.84,
            },
            sodium: MineralBand { min: 0.0, max: 0.16 },
            magnesium: MineralBand { min: 0.0, max: 0.05 },
            ca_p_ratio: CaPRatioTarget {
                min: 1.0,
                ideal: 1.0,
                max: 1.8,
            },
            default_moisture: 10.0,
            unit_correction: UnitCorrection::MagnitudeBucket,
            tiers: TierThresholds::default(),
        }
    }
}

impl ReferenceTargets {
    /// Checks internal consistency of the table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first inconsistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_nutrient("protein", &self.protein)?;
        validate_nutrient("fat", &self.fat)?;

        let t = &self.taurine;
        check_non_negative("taurine.min_dry", t.min_dry)?;
        check_non_negative("taurine.min_wet", t.min_wet)?;
        check_non_negative("taurine.ideal", t.ideal)?;
        if t.min_dry > t.ideal || t.min_wet > t.ideal {
            return Err(ConfigError::Validation(format!(
                "taurine minimums ({}, {}) must not exceed ideal {}",
                t.min_dry, t.min_wet, t.ideal
            )));
        }
        if !(0.0..100.0).contains(&t.wet_moisture_threshold) {
            return Err(ConfigError::Validation(format!(
                "taurine.wet_moisture_threshold {} must be in [0, 100)",
                t.wet_moisture_threshold
            )));
        }

        validate_band("calcium", &self.calcium)?;
        validate_band("phosphorus", &self.phosphorus)?;
        validate_band("sodium", &self.sodium)?;
        validate_band("magnesium", &self.magnesium)?;

        let r = &self.ca_p_ratio;
        if !(r.min > 0.0 && r.min <= r.ideal && r.ideal <= r.max) {
            return Err(ConfigError::Validation(format!(
                "ca_p_ratio must satisfy 0 < min <= ideal <= max (got {}, {}, {})",
                r.min, r.ideal, r.max
            )));
        }

        if !(0.0..100.0).contains(&self.default_moisture) {
            return Err(ConfigError::Validation(format!(
                "default_moisture {} must be in [0, 100)",
                self.default_moisture
            )));
        }

        if let UnitCorrection::TaurineOnly { threshold } = self.unit_correction {
            check_non_negative("unit_correction.threshold", threshold)?;
        }

        let tiers = &self.tiers;
        let ladder = [tiers.s, tiers.a, tiers.b, tiers.c];
        if ladder.iter().any(|v| !(0.0..=100.0).contains(v)) {
            return Err(ConfigError::Validation(format!(
                "tier thresholds must lie in [0, 100] (got {ladder:?})"
            )));
        }
        if ladder.windows(2).any(|w| w[0] <= w[1]) {
            return Err(ConfigError::Validation(format!(
                "tier thresholds must be strictly decreasing (got {ladder:?})"
            )));
        }

        Ok(())
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} must be a non-negative number (got {value})"
        )))
    }
}

fn validate_nutrient(name: &str, target: &NutrientTarget) -> Result<(), ConfigError> {
    check_non_negative(&format!("{name}.min"), target.min)?;
    check_non_negative(&format!("{name}.ideal"), target.ideal)?;
    if target.min > target.ideal {
        return Err(ConfigError::Validation(format!(
            "{name}.min {} exceeds ideal {}",
            target.min, target.ideal
        )));
    }
    if let Some(max) = target.max {
        if max < target.ideal {
            return Err(ConfigError::Validation(format!(
                "{name}.max {max} is below ideal {}",
                target.ideal
            )));
        }
    }
    Ok(())
}

fn validate_band(name: &str, band: &MineralBand) -> Result<(), ConfigError> {
    check_non_negative(&format!("{name}.min"), band.min)?;
    check_non_negative(&format!("{name}.max"), band.max)?;
    if band.min > band.max {
        return Err(ConfigError::Validation(format!(
            "{name} band is inverted: min {} > max {}",
            band.min, band.max
        )));
    }
    Ok(())
}

/// Parse and validate a reference table from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_targets(content: &str) -> Result<ReferenceTargets, ConfigError> {
    let targets: ReferenceTargets = serde_yaml::from_str(content)?;
    targets.validate()?;
    Ok(targets)
}

/// Load and validate the reference table from a YAML file.
///
/// Sections missing from the file keep their default values.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_targets(path: &Path) -> Result<ReferenceTargets, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TargetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_targets(&content)
}

#[cfg(test)]
#[path = "targets_test.rs"]
mod tests;
