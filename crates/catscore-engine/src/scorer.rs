//! Multi-criteria additive scoring over a dry-matter profile.
//!
//! Each category is scored independently against [`ReferenceTargets`] and
//! may append at most one warning (target missed) and at most one
//! observation (target clearly met). Category points are summed into the
//! total and re-projected onto four display buckets.

use catscore_core::{GranularScores, IngredientSignals, Nutrient, ReferenceTargets, Tier};

use crate::curves::{closeness, ramp, ratio_credit, round2};
use crate::normalize::Normalized;

// ---------------------------------------------------------------------------
// Point allotments (category maxima must sum to exactly 100)
// ---------------------------------------------------------------------------

/// Protein level credit on reaching the regulatory minimum.
pub const PROTEIN_FLOOR: u32 = 5;
/// Protein level credit at or above the ideal.
pub const PROTEIN_LEVEL_MAX: u32 = 15;
pub const PROTEIN_FIRST_ANIMAL: u32 = 5;
pub const PROTEIN_MEAT_TOP_THREE: u32 = 5;
pub const PROTEIN_MAX: u32 = PROTEIN_LEVEL_MAX + PROTEIN_FIRST_ANIMAL + PROTEIN_MEAT_TOP_THREE;

pub const FAT_MAX: u32 = 10;

/// Taurine credit at the regulatory minimum.
pub const TAURINE_FLOOR: u32 = 4;
pub const TAURINE_MAX: u32 = 10;

/// Per mineral inside its band: calcium, phosphorus, sodium, magnesium.
pub const MINERAL_EACH: u32 = 2;
pub const MINERALS_MAX: u32 = 4 * MINERAL_EACH;

pub const RATIO_MAX: u32 = 7;
/// Subtracted when the Ca:P ratio leaves its band.
pub const RATIO_PENALTY: u32 = 2;

pub const PURITY_FIRST_ANIMAL: u32 = 5;
pub const PURITY_NO_SALT: u32 = 3;
/// Starting cereal allotment, reduced per filler marker.
pub const PURITY_CEREAL_ALLOTMENT: u32 = 12;
pub const PURITY_MARKER_PENALTY: u32 = 4;
pub const PURITY_MAX: u32 = PURITY_FIRST_ANIMAL + PURITY_NO_SALT + PURITY_CEREAL_ALLOTMENT;

pub const TRANSPARENCY_ALLOTMENT: u32 = 10;
pub const TRANSPARENCY_BYPRODUCT_PENALTY: u32 = 5;
pub const TRANSPARENCY_VARIABLE_PENALTY: u32 = 5;
pub const TRANSPARENCY_VITAMIN_BONUS: u32 = 5;
pub const TRANSPARENCY_MAX: u32 = TRANSPARENCY_ALLOTMENT + TRANSPARENCY_VITAMIN_BONUS;

pub const OMEGA_MAX: u32 = 5;

/// Categories folded into the "vital balance" display bucket.
const VITAL_MAX: u32 = FAT_MAX + TAURINE_MAX + MINERALS_MAX + RATIO_MAX + OMEGA_MAX;

const _: () = assert!(
    PROTEIN_MAX
        + FAT_MAX
        + TAURINE_MAX
        + MINERALS_MAX
        + RATIO_MAX
        + PURITY_MAX
        + TRANSPARENCY_MAX
        + OMEGA_MAX
        == 100,
    "category maxima must sum to exactly 100"
);

fn pts(points: u32) -> f64 {
    f64::from(points)
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Points earned per category, before rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryScores {
    pub protein: f64,
    pub fat: f64,
    pub taurine: f64,
    pub minerals: f64,
    /// May be negative when the ratio leaves its band.
    pub ca_p_ratio: f64,
    pub purity: f64,
    pub transparency: f64,
    pub omega: f64,
}

impl CategoryScores {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.protein
            + self.fat
            + self.taurine
            + self.minerals
            + self.ca_p_ratio
            + self.purity
            + self.transparency
            + self.omega
    }

    /// Re-project the categories onto the four display buckets.
    #[must_use]
    pub fn granular(&self) -> GranularScores {
        GranularScores {
            animal_protein: project(self.protein, PROTEIN_MAX),
            fillers_and_cereals: project(self.purity, PURITY_MAX),
            transparency: project(self.transparency, TRANSPARENCY_MAX),
            vital_balance: project(
                self.fat + self.taurine + self.minerals + self.ca_p_ratio + self.omega,
                VITAL_MAX,
            ),
        }
    }
}

fn project(points: f64, max: u32) -> f64 {
    round2(points / pts(max) * GranularScores::SUB_MAX).clamp(0.0, GranularScores::SUB_MAX)
}

/// Everything the scorer derives from one normalized label.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub categories: CategoryScores,
    /// Rounded to two decimals and clamped to `[0, 100]`.
    pub total: f64,
    pub granular: GranularScores,
    pub tier: Tier,
    pub warnings: Vec<String>,
    pub observations: Vec<String>,
    /// Normalizer assumptions, passed through unchanged.
    pub assumptions: Vec<String>,
}

#[derive(Debug, Default)]
struct Notes {
    warnings: Vec<String>,
    observations: Vec<String>,
}

impl Notes {
    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    fn observe(&mut self, message: String) {
        self.observations.push(message);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Score a normalized label.
///
/// Never fails: missing nutrients simply earn no credit in their category.
#[must_use]
pub fn score(
    normalized: &Normalized,
    signals: &IngredientSignals,
    targets: &ReferenceTargets,
) -> Scorecard {
    let mut notes = Notes::default();

    let categories = CategoryScores {
        protein: score_protein(normalized, signals, targets, &mut notes),
        fat: score_fat(normalized, targets, &mut notes),
        taurine: score_taurine(normalized, targets, &mut notes),
        minerals: score_minerals(normalized, targets, &mut notes),
        ca_p_ratio: score_ca_p_ratio(normalized, targets, &mut notes),
        purity: score_purity(signals, &mut notes),
        transparency: score_transparency(signals, &mut notes),
        omega: score_omega(normalized, signals, &mut notes),
    };

    let total = round2(categories.total()).clamp(0.0, 100.0);
    let tier = targets.tiers.tier_for(total);
    tracing::debug!(?categories, total, %tier, "scored label");

    Scorecard {
        categories,
        total,
        granular: categories.granular(),
        tier,
        warnings: notes.warnings,
        observations: notes.observations,
        assumptions: normalized
            .assumptions
            .iter()
            .map(|a| a.message.clone())
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

fn score_protein(
    normalized: &Normalized,
    signals: &IngredientSignals,
    targets: &ReferenceTargets,
    notes: &mut Notes,
) -> f64 {
    let t = &targets.protein;
    let mut points = 0.0;

    match normalized.dm.get(Nutrient::Protein) {
        None => notes.warn("Protein not declared; no protein level credit awarded.".to_owned()),
        Some(value) => match t.max {
            Some(max) if value > max => notes.warn(format!(
                "Protein implausibly high: {value:.2}% DM exceeds {max:.2}%; check the label."
            )),
            _ => {
                points += ramp(
                    value,
                    t.min,
                    t.ideal,
                    pts(PROTEIN_FLOOR),
                    pts(PROTEIN_LEVEL_MAX),
                );
                if value < t.min {
                    notes.warn(format!(
                        "Protein below the regulatory minimum: {value:.2}% DM vs {:.2}%.",
                        t.min
                    ));
                } else if value >= t.ideal {
                    notes.observe(format!(
                        "Protein meets the ideal: {value:.2}% DM (ideal {:.2}%).",
                        t.ideal
                    ));
                }
            }
        },
    }

    if signals.first_ingredient_animal {
        points += pts(PROTEIN_FIRST_ANIMAL);
    }
    if signals.meat_in_top_three {
        points += pts(PROTEIN_MEAT_TOP_THREE);
    }
    points
}

fn score_fat(normalized: &Normalized, targets: &ReferenceTargets, notes: &mut Notes) -> f64 {
    let t = &targets.fat;
    let Some(value) = normalized.dm.get(Nutrient::Fat) else {
        notes.warn("Fat not declared; no fat credit awarded.".to_owned());
        return 0.0;
    };

    let below = t.ideal - t.min;
    let half_width = t.max.map_or(below, |max| (max - t.ideal).max(below));
    let points = closeness(value, t.ideal, 2.0 * half_width, pts(FAT_MAX));

    let above_max = t.max.is_some_and(|max| value > max);
    if value < t.min || above_max {
        let range = match t.max {
            Some(max) => format!("{:.2}-{max:.2}%", t.min),
            None => format!("at least {:.2}%", t.min),
        };
        notes.warn(format!(
            "Fat outside the recommended range: {value:.2}% DM (recommended {range})."
        ));
    } else if points >= 0.9 * pts(FAT_MAX) {
        notes.observe(format!(
            "Fat close to the {:.2}% DM ideal: {value:.2}%.",
            t.ideal
        ));
    }
    points
}

fn score_taurine(normalized: &Normalized, targets: &ReferenceTargets, notes: &mut Notes) -> f64 {
    let t = &targets.taurine;
    let Some(value) = normalized.dm.get(Nutrient::Taurine) else {
        notes.warn("Taurine neither declared nor listed among the ingredients.".to_owned());
        return 0.0;
    };

    let min = t.min_for_moisture(normalized.moisture);
    let points = ramp(value, min, t.ideal, pts(TAURINE_FLOOR), pts(TAURINE_MAX));

    // An assumed value sits at the minimum by construction; its assumption
    // message already explains the shortfall.
    let assumed = normalized.is_assumed(Nutrient::Taurine);
    if value < min {
        notes.warn(format!(
            "Taurine below the regulatory minimum: {value:.2}% DM vs {min:.2}%."
        ));
    } else if !assumed && value < t.ideal {
        notes.warn(format!(
            "Taurine below the ideal: {value:.2}% DM vs {:.2}%.",
            t.ideal
        ));
    } else if !assumed {
        notes.observe(format!("Taurine meets the ideal: {value:.2}% DM."));
    }
    points
}

fn score_minerals(normalized: &Normalized, targets: &ReferenceTargets, notes: &mut Notes) -> f64 {
    let bands = [
        (Nutrient::Calcium, targets.calcium),
        (Nutrient::Phosphorus, targets.phosphorus),
        (Nutrient::Sodium, targets.sodium),
        (Nutrient::Magnesium, targets.magnesium),
    ];

    let mut points = 0.0;
    let mut in_band = 0usize;
    let mut out_of_band = Vec::new();
    for (nutrient, band) in bands {
        // Inferred minerals are neither credited nor blamed.
        if normalized.is_assumed(nutrient) {
            continue;
        }
        let Some(value) = normalized.dm.get(nutrient) else {
            continue;
        };
        if band.contains(value) {
            points += pts(MINERAL_EACH);
            in_band += 1;
        } else {
            out_of_band.push(format!(
                "{nutrient} {value:.2}% (acceptable {:.2}-{:.2}%)",
                band.min, band.max
            ));
        }
    }

    if !out_of_band.is_empty() {
        notes.warn(format!(
            "Minerals outside the acceptable range: {}.",
            out_of_band.join(", ")
        ));
    } else if in_band == bands.len() {
        notes.observe(
            "Calcium, phosphorus, sodium and magnesium all within acceptable ranges.".to_owned(),
        );
    }
    points
}

fn score_ca_p_ratio(normalized: &Normalized, targets: &ReferenceTargets, notes: &mut Notes) -> f64 {
    let (Some(calcium), Some(phosphorus)) = (
        normalized.dm.get(Nutrient::Calcium),
        normalized.dm.get(Nutrient::Phosphorus),
    ) else {
        return 0.0;
    };
    // Phosphorus derived from calcium sits on the ideal ratio by construction.
    if phosphorus <= 0.0 || normalized.is_assumed(Nutrient::Phosphorus) {
        return 0.0;
    }

    let target = &targets.ca_p_ratio;
    let ratio = calcium / phosphorus;
    let points = ratio_credit(ratio, target, pts(RATIO_MAX), pts(RATIO_PENALTY));

    if ratio < target.min || ratio > target.max {
        notes.warn(format!(
            "Ca:P ratio out of range: {ratio:.2}:1 (acceptable {:.2}:1 to {:.2}:1).",
            target.min, target.max
        ));
    } else if points >= 0.75 * pts(RATIO_MAX) {
        notes.observe(format!("Ca:P ratio close to the ideal: {ratio:.2}:1."));
    }
    points
}

fn score_purity(signals: &IngredientSignals, notes: &mut Notes) -> f64 {
    let mut points = 0.0;
    let mut concerns = Vec::new();

    if signals.first_ingredient_animal {
        points += pts(PURITY_FIRST_ANIMAL);
    } else {
        concerns.push("first ingredient is not animal-derived");
    }

    if !signals.has_added_salt() {
        points += pts(PURITY_NO_SALT);
    } else if signals.has_excessive_salt {
        concerns.push("excessive salt");
    } else {
        concerns.push("added salt");
    }

    let markers = [
        (signals.has_vegetable_protein, "vegetable protein"),
        (signals.has_gluten, "gluten"),
        (signals.fractionated_cereals, "fractionated cereals"),
    ];
    let mut cereal = pts(PURITY_CEREAL_ALLOTMENT);
    for (present, label) in markers {
        if present {
            cereal -= pts(PURITY_MARKER_PENALTY);
            concerns.push(label);
        }
    }
    points += cereal.max(0.0);

    if concerns.is_empty() {
        notes.observe(
            "Animal protein leads a recipe free of added salt and cereal fillers.".to_owned(),
        );
    } else {
        notes.warn(format!("Recipe purity concerns: {}.", concerns.join(", ")));
    }
    points
}

fn score_transparency(signals: &IngredientSignals, notes: &mut Notes) -> f64 {
    let mut points = pts(TRANSPARENCY_ALLOTMENT);
    let mut issues = Vec::new();

    if signals.has_generic_byproducts {
        points -= pts(TRANSPARENCY_BYPRODUCT_PENALTY);
        issues.push("generic by-products instead of named sources");
    }
    if signals.has_variable_formulation {
        points -= pts(TRANSPARENCY_VARIABLE_PENALTY);
        issues.push("'and/or' wording allows the recipe to change between batches");
    }
    if signals.has_essential_vitamins {
        points += pts(TRANSPARENCY_VITAMIN_BONUS);
    } else {
        issues.push("essential vitamins (A, D, E, B complex) not fully declared");
    }

    if issues.is_empty() {
        notes.observe(
            "Named ingredients with complete vitamins (A, D, E, B complex).".to_owned(),
        );
    } else {
        notes.warn(format!("Label transparency reduced: {}.", issues.join("; ")));
    }
    points.max(0.0)
}

/// Optional credit; a poor omega balance earns less but is not a warning.
/// Declaring no omega-3 at all earns nothing.
fn score_omega(normalized: &Normalized, signals: &IngredientSignals, notes: &mut Notes) -> f64 {
    let omega3 = normalized.dm.get(Nutrient::Omega3);
    let omega6 = normalized.dm.get(Nutrient::Omega6);
    match (omega3, omega6) {
        (Some(o3), Some(_)) if o3 <= 0.0 => 0.0,
        (Some(o3), Some(o6)) if o3 >= o6 => {
            notes.observe(format!(
                "Omega-3 ({o3:.2}% DM) at or above omega-6 ({o6:.2}% DM)."
            ));
            pts(OMEGA_MAX)
        }
        (Some(o3), Some(o6)) => pts(OMEGA_MAX) * o3 / o6,
        _ if signals.has_omega_sources => pts(OMEGA_MAX) / 2.0,
        _ => 0.0,
    }
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
