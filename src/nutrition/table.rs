use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::units::UnitChoice;

/// Nutrients used to decide whether a unit carries real data for a product.
pub const ANCHOR_NUTRIENTS: [&str; 4] = ["energy-kcal", "proteins", "carbohydrates", "fat"];

/// Per-100 nutrient values keyed by `(nutrient, unit)`.
///
/// A missing key means the source had no data; it is never read as zero.
/// Values measured per different units are kept apart and never combined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, f64>")]
pub struct NutrientTable {
    values: BTreeMap<(String, UnitChoice), f64>,
}

impl NutrientTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, nutrient: impl Into<String>, unit: UnitChoice, value: f64) {
        self.values.insert((nutrient.into(), unit), value);
    }

    pub fn with(mut self, nutrient: &str, unit: UnitChoice, value: f64) -> Self {
        self.insert(nutrient, unit, value);
        self
    }

    pub fn get(&self, nutrient: &str, unit: UnitChoice) -> Option<f64> {
        self.values.get(&(nutrient.to_string(), unit)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether any anchor nutrient is populated for `unit`.
    pub fn has_anchor_data(&self, unit: UnitChoice) -> bool {
        ANCHOR_NUTRIENTS
            .iter()
            .any(|name| self.get(name, unit).is_some())
    }

    /// Nutrients with a value measured per 100 of `unit`, in name order.
    pub fn entries_for(&self, unit: UnitChoice) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values
            .iter()
            .filter(move |((_, u), _)| *u == unit)
            .map(|((name, _), v)| (name.as_str(), *v))
    }

    /// Parses a nutriments key such as `proteins_100g` into its parts.
    pub fn split_key(key: &str) -> Option<(&str, UnitChoice)> {
        UnitChoice::PREFERENCE.iter().find_map(|unit| {
            key.strip_suffix(unit.per100_suffix())
                .filter(|name| !name.is_empty())
                .map(|name| (name, *unit))
        })
    }
}

/// Accepts JSON numbers and numeric strings (comma allowed as decimal mark).
fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

impl From<BTreeMap<String, Value>> for NutrientTable {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut table = NutrientTable::new();
        for (key, value) in &raw {
            let Some((name, unit)) = NutrientTable::split_key(key) else {
                continue;
            };
            if let Some(v) = numeric(value) {
                table.insert(name, unit, v);
            }
        }
        table
    }
}

impl From<NutrientTable> for BTreeMap<String, f64> {
    fn from(table: NutrientTable) -> Self {
        table
            .values
            .into_iter()
            .map(|((name, unit), v)| (format!("{name}{}", unit.per100_suffix()), v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_off_nutriments_shape() {
        let table: NutrientTable = serde_json::from_value(json!({
            "energy-kcal_100g": 250,
            "proteins_100g": "12,5",
            "fat_100ml": 3.1,
            "sugars_100g": null,
            "salt_unit": "g",
            "energy-kcal_serving": 75,
            "fiber_100g": "n/a"
        }))
        .unwrap();

        assert_eq!(table.get("energy-kcal", UnitChoice::G), Some(250.0));
        assert_eq!(table.get("proteins", UnitChoice::G), Some(12.5));
        assert_eq!(table.get("fat", UnitChoice::Ml), Some(3.1));
        assert_eq!(table.get("fat", UnitChoice::G), None);
        assert_eq!(table.get("sugars", UnitChoice::G), None);
        assert_eq!(table.get("fiber", UnitChoice::G), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn serializes_back_to_flat_keys() {
        let table = NutrientTable::new()
            .with("proteins", UnitChoice::Oz, 3.0)
            .with("fat", UnitChoice::G, 1.5);
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value, json!({ "fat_100g": 1.5, "proteins_100oz": 3.0 }));
    }

    #[test]
    fn split_key_rejects_foreign_suffixes() {
        assert_eq!(
            NutrientTable::split_key("saturated-fat_100ml"),
            Some(("saturated-fat", UnitChoice::Ml))
        );
        assert_eq!(NutrientTable::split_key("_100g"), None);
        assert_eq!(NutrientTable::split_key("energy_serving"), None);
    }
}
