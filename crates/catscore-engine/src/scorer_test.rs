use super::*;
use crate::normalize::normalize;
use catscore_core::NutrientProfile;

const EPS: f64 = 1e-9;

fn targets() -> ReferenceTargets {
    ReferenceTargets::default()
}

fn scored(raw: &NutrientProfile, signals: &IngredientSignals) -> Scorecard {
    let normalized = normalize(raw, signals, &targets()).unwrap();
    score(&normalized, signals, &targets())
}

/// Already on a dry-matter basis so the declared values are the DM values.
fn complete_profile() -> NutrientProfile {
    NutrientProfile {
        moisture: Some(0.0),
        protein: Some(40.0),
        fat: Some(14.5),
        taurine: Some(0.25),
        calcium: Some(0.8),
        phosphorus: Some(0.8),
        sodium: Some(0.1),
        magnesium: Some(0.04),
        omega3: Some(1.0),
        omega6: Some(1.0),
        ..NutrientProfile::default()
    }
}

fn clean_signals() -> IngredientSignals {
    IngredientSignals {
        first_ingredient_animal: true,
        meat_in_top_three: true,
        has_essential_vitamins: true,
        ..IngredientSignals::default()
    }
}

fn warnings_mentioning<'a>(card: &'a Scorecard, needle: &str) -> Vec<&'a String> {
    card.warnings.iter().filter(|w| w.contains(needle)).collect()
}

// -----------------------------------------------------------------------
// Whole-label behavior
// -----------------------------------------------------------------------

#[test]
fn category_maxima_sum_to_one_hundred() {
    let sum = PROTEIN_MAX
        + FAT_MAX
        + TAURINE_MAX
        + MINERALS_MAX
        + RATIO_MAX
        + PURITY_MAX
        + TRANSPARENCY_MAX
        + OMEGA_MAX;
    assert_eq!(sum, 100);
}

#[test]
fn complete_label_earns_full_marks() {
    let card = scored(&complete_profile(), &clean_signals());
    assert!((card.total - 100.0).abs() < EPS, "total {}", card.total);
    assert_eq!(card.tier, Tier::S);
    assert!(card.warnings.is_empty(), "warnings: {:?}", card.warnings);
    assert!(card.assumptions.is_empty());

    let g = card.granular;
    for bucket in [
        g.animal_protein,
        g.fillers_and_cereals,
        g.transparency,
        g.vital_balance,
    ] {
        assert!((bucket - GranularScores::SUB_MAX).abs() < EPS);
    }
}

#[test]
fn empty_label_scores_low_with_warnings() {
    let card = scored(&NutrientProfile::default(), &IngredientSignals::default());
    assert_eq!(card.tier, Tier::D);
    // Only the cereal allotment and the no-salt credit plus base transparency.
    assert!((card.total - 25.0).abs() < EPS, "total {}", card.total);
    assert_eq!(warnings_mentioning(&card, "Protein not declared").len(), 1);
    assert_eq!(warnings_mentioning(&card, "Fat not declared").len(), 1);
    assert_eq!(warnings_mentioning(&card, "Taurine").len(), 1);
    assert!(card.observations.is_empty());
}

#[test]
fn each_category_warns_at_most_once() {
    let raw = NutrientProfile {
        moisture: Some(0.0),
        protein: Some(10.0),
        fat: Some(40.0),
        taurine: Some(0.01),
        calcium: Some(3.0),
        phosphorus: Some(0.1),
        sodium: Some(2.0),
        magnesium: Some(1.0),
        ..NutrientProfile::default()
    };
    let signals = IngredientSignals {
        has_vegetable_protein: true,
        has_gluten: true,
        fractionated_cereals: true,
        has_generic_byproducts: true,
        has_variable_formulation: true,
        has_excessive_salt: true,
        ..IngredientSignals::default()
    };
    let card = scored(&raw, &signals);
    assert!(card.warnings.len() <= 8, "warnings: {:?}", card.warnings);
    assert_eq!(warnings_mentioning(&card, "Minerals").len(), 1);
    assert_eq!(warnings_mentioning(&card, "purity").len(), 1);
    assert_eq!(warnings_mentioning(&card, "transparency").len(), 1);
}

#[test]
fn total_never_goes_negative() {
    let raw = NutrientProfile {
        moisture: Some(0.0),
        calcium: Some(3.0),
        phosphorus: Some(1.0),
        ..NutrientProfile::default()
    };
    let signals = IngredientSignals {
        has_vegetable_protein: true,
        has_gluten: true,
        fractionated_cereals: true,
        has_generic_byproducts: true,
        has_variable_formulation: true,
        has_excessive_salt: true,
        ..IngredientSignals::default()
    };
    let card = scored(&raw, &signals);
    assert!(card.categories.ca_p_ratio < 0.0);
    assert!(card.total >= 0.0);
    assert!(card.granular.vital_balance >= 0.0);
}

// -----------------------------------------------------------------------
// Protein
// -----------------------------------------------------------------------

#[test]
fn protein_between_min_and_ideal_earns_partial_credit_silently() {
    let raw = NutrientProfile {
        protein: Some(32.0),
        ..NutrientProfile::default()
    };
    let card = scored(&raw, &IngredientSignals::default());
    // 32 / 0.9 = 35.56 DM, between 25 and 38.
    let expected = 5.0 + 10.0 * (32.0 / 0.9 - 25.0) / 13.0;
    assert!((card.categories.protein - expected).abs() < 1e-6);
    assert!(warnings_mentioning(&card, "Protein").is_empty());
    assert!(!card.observations.iter().any(|o| o.contains("Protein")));
}

#[test]
fn protein_below_minimum_warns() {
    let raw = NutrientProfile {
        moisture: Some(0.0),
        protein: Some(20.0),
        ..NutrientProfile::default()
    };
    let card = scored(&raw, &IngredientSignals::default());
    assert!(card.categories.protein.abs() < EPS);
    assert_eq!(warnings_mentioning(&card, "Protein below").len(), 1);
}

#[test]
fn protein_structure_credit_is_independent_of_declaration() {
    let card = scored(&NutrientProfile::default(), &clean_signals());
    assert!((card.categories.protein - 10.0).abs() < EPS);
}

#[test]
fn protein_above_sanity_cap_earns_no_level_credit() {
    let mut targets = targets();
    targets.protein.max = Some(70.0);
    let raw = NutrientProfile {
        moisture: Some(0.0),
        protein: Some(90.0),
        ..NutrientProfile::default()
    };
    let signals = IngredientSignals::default();
    let normalized = normalize(&raw, &signals, &targets).unwrap();
    let card = score(&normalized, &signals, &targets);
    assert!(card.categories.protein.abs() < EPS);
    assert_eq!(warnings_mentioning(&card, "implausibly high").len(), 1);
}

// -----------------------------------------------------------------------
// Fat
// -----------------------------------------------------------------------

#[test]
fn fat_is_penalized_symmetrically_around_ideal() {
    let low = NutrientProfile {
        moisture: Some(0.0),
        fat: Some(12.5),
        ..NutrientProfile::default()
    };
    let high = NutrientProfile {
        moisture: Some(0.0),
        fat: Some(16.5),
        ..NutrientProfile::default()
    };
    let signals = IngredientSignals::default();
    let low = scored(&low, &signals).categories.fat;
    let high = scored(&high, &signals).categories.fat;
    assert!((low - high).abs() < 1e-9);
    assert!(low > 0.0 && low < 10.0);
}

#[test]
fn fat_outside_range_warns() {
    let raw = NutrientProfile {
        moisture: Some(0.0),
        fat: Some(25.0),
        ..NutrientProfile::default()
    };
    let card = scored(&raw, &IngredientSignals::default());
    assert_eq!(warnings_mentioning(&card, "Fat outside").len(), 1);
}

// -----------------------------------------------------------------------
// Taurine
// -----------------------------------------------------------------------

#[test]
fn assumed_taurine_earns_floor_credit_without_warning() {
    let signals = IngredientSignals {
        has_taurine_added: true,
        ..IngredientSignals::default()
    };
    let card = scored(&NutrientProfile::default(), &signals);
    assert!((card.categories.taurine - f64::from(TAURINE_FLOOR)).abs() < EPS);
    assert!(warnings_mentioning(&card, "Taurine").is_empty());
    assert_eq!(card.assumptions.len(), 1);
    assert!(card.assumptions[0].contains("Taurine"));
}

#[test]
fn missing_taurine_without_signal_warns() {
    let card = scored(&NutrientProfile::default(), &IngredientSignals::default());
    assert!(card.categories.taurine.abs() < EPS);
    assert_eq!(warnings_mentioning(&card, "Taurine").len(), 1);
}

#[test]
fn declared_taurine_below_ideal_warns() {
    let raw = NutrientProfile {
        moisture: Some(0.0),
        taurine: Some(0.15),
        ..NutrientProfile::default()
    };
    let card = scored(&raw, &IngredientSignals::default());
    assert!((card.categories.taurine - 7.0).abs() < 1e-9);
    assert_eq!(warnings_mentioning(&card, "Taurine below the ideal").len(), 1);
}

// -----------------------------------------------------------------------
// Minerals and Ca:P
// -----------------------------------------------------------------------

#[test]
fn sodium_in_band_is_credited_without_warning() {
    let raw = NutrientProfile {
        moisture: Some(0.0),
        sodium: Some(0.10),
        ..NutrientProfile::default()
    };
    let card = scored(&raw, &IngredientSignals::default());
    assert!((card.categories.minerals - f64::from(MINERAL_EACH)).abs() < EPS);
    assert!(warnings_mentioning(&card, "Sodium").is_empty());
    assert!(warnings_mentioning(&card, "Minerals").is_empty());
}

#[test]
fn high_ratio_is_penalized_and_cited() {
    let raw = NutrientProfile {
        moisture: Some(0.0),
        calcium: Some(1.2),
        phosphorus: Some(0.6),
        ..NutrientProfile::default()
    };
    let card = scored(&raw, &IngredientSignals::default());
    assert!((card.categories.ca_p_ratio + f64::from(RATIO_PENALTY)).abs() < EPS);
    let cited = warnings_mentioning(&card, "Ca:P");
    assert_eq!(cited.len(), 1);
    assert!(cited[0].contains("2.00:1"), "{}", cited[0]);
}

#[test]
fn derived_phosphorus_skips_the_ratio() {
    let signals = IngredientSignals {
        has_chelated_minerals: true,
        ..IngredientSignals::default()
    };
    let card = scored(&NutrientProfile::default(), &signals);
    assert!(card.categories.ca_p_ratio.abs() < EPS);
    assert!(warnings_mentioning(&card, "Ca:P").is_empty());
}

#[test]
fn inferred_minerals_earn_no_band_credit() {
    let signals = IngredientSignals {
        has_chelated_minerals: true,
        ..IngredientSignals::default()
    };
    let inferred = scored(&NutrientProfile::default(), &signals);
    let empty = scored(&NutrientProfile::default(), &IngredientSignals::default());
    assert!(inferred.categories.minerals.abs() < EPS);
    assert!((inferred.total - empty.total).abs() < EPS);
}

#[test]
fn phosphorus_derived_from_declared_calcium_is_not_flagged() {
    let raw = NutrientProfile {
        moisture: Some(0.0),
        calcium: Some(1.33),
        ..NutrientProfile::default()
    };
    let card = scored(&raw, &IngredientSignals::default());
    let minerals = warnings_mentioning(&card, "Minerals");
    assert_eq!(minerals.len(), 1);
    assert!(minerals[0].contains("Calcium"));
    assert!(!minerals[0].contains("Phosphorus"), "{}", minerals[0]);
    assert!(card.categories.minerals.abs() < EPS);
}

// -----------------------------------------------------------------------
// Purity, transparency, omega
// -----------------------------------------------------------------------

#[test]
fn each_filler_marker_costs_four_points() {
    let one = IngredientSignals {
        has_gluten: true,
        ..clean_signals()
    };
    let all = IngredientSignals {
        has_vegetable_protein: true,
        has_gluten: true,
        fractionated_cereals: true,
        ..clean_signals()
    };
    let none = scored(&complete_profile(), &clean_signals()).categories.purity;
    let one = scored(&complete_profile(), &one).categories.purity;
    let all = scored(&complete_profile(), &all).categories.purity;
    assert!((none - 20.0).abs() < EPS);
    assert!((one - 16.0).abs() < EPS);
    assert!((all - 8.0).abs() < EPS);
}

#[test]
fn salt_in_ingredients_loses_salt_credit() {
    let signals = IngredientSignals {
        has_salt_in_ingredients: true,
        ..clean_signals()
    };
    let card = scored(&complete_profile(), &signals);
    assert!((card.categories.purity - 17.0).abs() < EPS);
    assert_eq!(warnings_mentioning(&card, "added salt").len(), 1);
}

#[test]
fn transparency_floors_at_zero() {
    let signals = IngredientSignals {
        has_generic_byproducts: true,
        has_variable_formulation: true,
        ..IngredientSignals::default()
    };
    let card = scored(&NutrientProfile::default(), &signals);
    assert!(card.categories.transparency.abs() < EPS);
    assert_eq!(warnings_mentioning(&card, "transparency").len(), 1);
}

#[test]
fn omega_credit_scales_with_balance() {
    let raw = NutrientProfile {
        moisture: Some(0.0),
        omega3: Some(0.5),
        omega6: Some(2.0),
        ..NutrientProfile::default()
    };
    let card = scored(&raw, &IngredientSignals::default());
    assert!((card.categories.omega - 1.25).abs() < EPS);
    assert!(warnings_mentioning(&card, "Omega").is_empty());
}

#[test]
fn zero_omegas_earn_nothing() {
    let raw = NutrientProfile {
        moisture: Some(0.0),
        omega3: Some(0.0),
        omega6: Some(0.0),
        ..NutrientProfile::default()
    };
    let card = scored(&raw, &IngredientSignals::default());
    assert!(card.categories.omega.abs() < EPS);
    assert!(!card.observations.iter().any(|o| o.contains("Omega")));
}

#[test]
fn excessive_salt_is_named_once() {
    let signals = IngredientSignals {
        has_salt_in_ingredients: true,
        has_excessive_salt: true,
        ..clean_signals()
    };
    let card = scored(&complete_profile(), &signals);
    assert!((card.categories.purity - 17.0).abs() < EPS);
    let purity = warnings_mentioning(&card, "purity");
    assert_eq!(purity.len(), 1);
    assert!(purity[0].contains("excessive salt"));
    assert!(!purity[0].contains("added salt"));
}

#[test]
fn omega_sources_without_values_earn_half_credit() {
    let signals = IngredientSignals {
        has_omega_sources: true,
        ..IngredientSignals::default()
    };
    let card = scored(&NutrientProfile::default(), &signals);
    assert!((card.categories.omega - 2.5).abs() < EPS);
}
