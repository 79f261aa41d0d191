use serde::{Deserialize, Serialize};

/// Boolean findings about an ingredient list, produced by the label parser.
///
/// The engine treats these as opaque, already-validated facts; it never
/// inspects ingredient text itself. Each flag is independent and missing
/// flags deserialize to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct IngredientSignals {
    /// The first listed ingredient is animal-derived.
    pub first_ingredient_animal: bool,
    /// A named meat appears among the first three ingredients.
    pub meat_in_top_three: bool,
    pub has_vegetable_protein: bool,
    pub has_gluten: bool,
    /// Fractionated cereals such as corn gluten meal or wheat middlings.
    pub fractionated_cereals: bool,
    /// Unnamed "by-products" or "animal derivatives".
    pub has_generic_byproducts: bool,
    /// "and/or" wording that lets the recipe swap ingredients between batches.
    pub has_variable_formulation: bool,
    pub has_taurine_added: bool,
    pub has_chelated_minerals: bool,
    pub has_omega_sources: bool,
    pub has_excessive_salt: bool,
    /// Vitamins A, D, E and the B complex are all listed.
    pub has_essential_vitamins: bool,
    pub has_salt_in_ingredients: bool,
}

impl IngredientSignals {
    /// Salt is listed as an ingredient, or flagged as excessive.
    #[must_use]
    pub fn has_added_salt(&self) -> bool {
        self.has_salt_in_ingredients || self.has_excessive_salt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flags_default_to_false() {
        let signals: IngredientSignals =
            serde_json::from_str(r#"{"firstIngredientAnimal": true}"#).unwrap();
        assert!(signals.first_ingredient_animal);
        assert!(!signals.meat_in_top_three);
        assert!(!signals.has_taurine_added);
    }

    #[test]
    fn fractionated_cereals_uses_contract_name() {
        let signals: IngredientSignals =
            serde_json::from_str(r#"{"fractionatedCereals": true}"#).unwrap();
        assert!(signals.fractionated_cereals);
    }

    #[test]
    fn excessive_salt_counts_as_added_salt() {
        let signals = IngredientSignals {
            has_excessive_salt: true,
            ..IngredientSignals::default()
        };
        assert!(signals.has_added_salt());
        assert!(!IngredientSignals::default().has_added_salt());
    }
}
