use serde::{Deserialize, Serialize};

/// A nutrient that can appear on a guaranteed-analysis panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Nutrient {
    Protein,
    Fat,
    Moisture,
    Fiber,
    Ash,
    Calcium,
    Phosphorus,
    Magnesium,
    Sodium,
    Potassium,
    Omega3,
    Omega6,
    Taurine,
}

impl Nutrient {
    /// Every nutrient, in label order.
    pub const ALL: [Nutrient; 13] = [
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Moisture,
        Nutrient::Fiber,
        Nutrient::Ash,
        Nutrient::Calcium,
        Nutrient::Phosphorus,
        Nutrient::Magnesium,
        Nutrient::Sodium,
        Nutrient::Potassium,
        Nutrient::Omega3,
        Nutrient::Omega6,
        Nutrient::Taurine,
    ];

    /// Nutrients whose declared values are frequently printed in mg/kg or
    /// g/kg instead of percent, and so are subject to unit correction.
    #[must_use]
    pub fn is_unit_corrected(self) -> bool {
        matches!(
            self,
            Nutrient::Protein
                | Nutrient::Fat
                | Nutrient::Taurine
                | Nutrient::Calcium
                | Nutrient::Phosphorus
                | Nutrient::Sodium
                | Nutrient::Magnesium
        )
    }

    /// Human-readable label used in warnings and reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Protein => "Protein",
            Nutrient::Fat => "Fat",
            Nutrient::Moisture => "Moisture",
            Nutrient::Fiber => "Fiber",
            Nutrient::Ash => "Ash",
            Nutrient::Calcium => "Calcium",
            Nutrient::Phosphorus => "Phosphorus",
            Nutrient::Magnesium => "Magnesium",
            Nutrient::Sodium => "Sodium",
            Nutrient::Potassium => "Potassium",
            Nutrient::Omega3 => "Omega-3",
            Nutrient::Omega6 => "Omega-6",
            Nutrient::Taurine => "Taurine",
        }
    }
}

impl std::fmt::Display for Nutrient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Declared nutrient percentages for one product.
///
/// Every field is optional: labels routinely omit minerals, omegas, and
/// taurine. `moisture` is the only as-fed value; the rest are whatever the
/// label printed and may still need unit correction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ash: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnesium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omega3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omega6: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taurine: Option<f64>,
}

impl NutrientProfile {
    #[must_use]
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Moisture => self.moisture,
            Nutrient::Fiber => self.fiber,
            Nutrient::Ash => self.ash,
            Nutrient::Calcium => self.calcium,
            Nutrient::Phosphorus => self.phosphorus,
            Nutrient::Magnesium => self.magnesium,
            Nutrient::Sodium => self.sodium,
            Nutrient::Potassium => self.potassium,
            Nutrient::Omega3 => self.omega3,
            Nutrient::Omega6 => self.omega6,
            Nutrient::Taurine => self.taurine,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: Option<f64>) {
        let slot = match nutrient {
            Nutrient::Protein => &mut self.protein,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Moisture => &mut self.moisture,
            Nutrient::Fiber => &mut self.fiber,
            Nutrient::Ash => &mut self.ash,
            Nutrient::Calcium => &mut self.calcium,
            Nutrient::Phosphorus => &mut self.phosphorus,
            Nutrient::Magnesium => &mut self.magnesium,
            Nutrient::Sodium => &mut self.sodium,
            Nutrient::Potassium => &mut self.potassium,
            Nutrient::Omega3 => &mut self.omega3,
            Nutrient::Omega6 => &mut self.omega6,
            Nutrient::Taurine => &mut self.taurine,
        };
        *slot = value;
    }

    /// Iterates over the declared `(nutrient, value)` pairs in label order.
    pub fn declared(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL
            .into_iter()
            .filter_map(|n| self.get(n).map(|v| (n, v)))
    }
}
