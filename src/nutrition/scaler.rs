//! Scaling per-100 nutrient data to a chosen serving.
//!
//! Everything here is pure: identical inputs always give identical outputs.
//! Rounding is left to whoever renders the values.

use std::collections::BTreeMap;

use serde::Serialize;

use super::table::NutrientTable;
use super::units::UnitChoice;

/// Units a product can be entered in, in preference order. Never empty.
pub fn available_units(table: &NutrientTable) -> Vec<UnitChoice> {
    let units: Vec<UnitChoice> = UnitChoice::PREFERENCE
        .into_iter()
        .filter(|unit| table.has_anchor_data(*unit))
        .collect();

    if units.is_empty() {
        vec![UnitChoice::PREFERENCE[0]]
    } else {
        units
    }
}

/// `value * quantity / 100`, or `None` when the table has no value for
/// `nutrient` at `unit`. A `None` row is hidden, not shown as zero.
pub fn scale(table: &NutrientTable, nutrient: &str, quantity: f64, unit: UnitChoice) -> Option<f64> {
    table
        .get(nutrient, unit)
        .map(|value| value * quantity / 100.0)
}

/// Keeps `current` when it is offered, otherwise picks the first offered unit.
pub fn resolve_unit(available: &[UnitChoice], current: Option<UnitChoice>) -> UnitChoice {
    match current {
        Some(unit) if available.contains(&unit) => unit,
        _ => available.first().copied().unwrap_or(UnitChoice::G),
    }
}

/// Scaled values for one serving, keyed by nutrient name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScaledNutrients(pub BTreeMap<String, f64>);

impl ScaledNutrients {
    pub fn get(&self, nutrient: &str) -> Option<f64> {
        self.0.get(nutrient).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Scales every nutrient the table holds for `unit`. Nutrients without data
/// at that unit are left out.
pub fn scale_all(table: &NutrientTable, quantity: f64, unit: UnitChoice) -> ScaledNutrients {
    ScaledNutrients(
        table
            .entries_for(unit)
            .map(|(name, value)| (name.to_string(), value * quantity / 100.0))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn empty_table_falls_back_to_grams() {
        assert_eq!(available_units(&NutrientTable::new()), vec![UnitChoice::G]);
    }

    #[test]
    fn non_anchor_data_does_not_qualify_a_unit() {
        let table = NutrientTable::new().with("salt", UnitChoice::Ml, 0.4);
        assert_eq!(available_units(&table), vec![UnitChoice::G]);
    }

    #[test]
    fn ml_only_product_offers_ml() {
        let table = NutrientTable::new().with("energy-kcal", UnitChoice::Ml, 50.0);
        assert_eq!(available_units(&table), vec![UnitChoice::Ml]);
    }

    #[test]
    fn grams_not_forced_in_when_another_unit_qualifies() {
        let table = NutrientTable::new().with("proteins", UnitChoice::Oz, 3.0);
        assert_eq!(available_units(&table), vec![UnitChoice::Oz]);
    }

    #[test]
    fn units_keep_preference_order() {
        let table = NutrientTable::new()
            .with("fat", UnitChoice::Oz, 1.0)
            .with("carbohydrates", UnitChoice::G, 2.0)
            .with("proteins", UnitChoice::Ml, 3.0);
        assert_eq!(
            available_units(&table),
            vec![UnitChoice::G, UnitChoice::Ml, UnitChoice::Oz]
        );
    }

    #[test]
    fn missing_entries_scale_to_none_for_any_quantity() {
        let table = NutrientTable::new().with("proteins", UnitChoice::G, 10.0);
        for q in [0.0, 1.0, -5.0, 150.0, 1e9] {
            assert_eq!(scale(&table, "fat", q, UnitChoice::G), None);
            assert_eq!(scale(&table, "proteins", q, UnitChoice::Ml), None);
        }
    }

    #[test]
    fn scaling_by_hundred_returns_stored_value() {
        let table = NutrientTable::new()
            .with("proteins", UnitChoice::G, 7.3)
            .with("energy-kcal", UnitChoice::Oz, 412.9);
        let p = scale(&table, "proteins", 100.0, UnitChoice::G).unwrap();
        let e = scale(&table, "energy-kcal", 100.0, UnitChoice::Oz).unwrap();
        assert!(close(p, 7.3));
        assert!(close(e, 412.9));
    }

    #[test]
    fn scaling_is_linear_in_quantity() {
        let table = NutrientTable::new().with("carbohydrates", UnitChoice::Ml, 11.7);
        for q in [0.5, 3.0, 42.0, 250.0, -8.0] {
            let single = scale(&table, "carbohydrates", q, UnitChoice::Ml).unwrap();
            let double = scale(&table, "carbohydrates", 2.0 * q, UnitChoice::Ml).unwrap();
            assert!(close(double, 2.0 * single));
        }
    }

    #[test]
    fn zero_and_negative_quantities_pass_through() {
        let table = NutrientTable::new().with("fat", UnitChoice::G, 20.0);
        assert_eq!(scale(&table, "fat", 0.0, UnitChoice::G), Some(0.0));
        assert_eq!(scale(&table, "fat", -50.0, UnitChoice::G), Some(-10.0));
    }

    #[test]
    fn hundred_fifty_grams_of_two_nutrient_product() {
        let table = NutrientTable::new()
            .with("energy-kcal", UnitChoice::G, 200.0)
            .with("proteins", UnitChoice::G, 10.0);

        let scaled = scale_all(&table, 150.0, UnitChoice::G);
        assert!(close(scaled.get("energy-kcal").unwrap(), 300.0));
        assert!(close(scaled.get("proteins").unwrap(), 15.0));
        assert_eq!(scaled.get("fat"), None);
        assert_eq!(scaled.get("carbohydrates"), None);
        assert_eq!(scaled.0.len(), 2);
    }

    #[test]
    fn ml_only_product_resets_default_unit_before_scaling() {
        let table = NutrientTable::new()
            .with("energy-kcal", UnitChoice::Ml, 42.0)
            .with("sugars", UnitChoice::Ml, 10.6);
        let available = available_units(&table);
        let unit = resolve_unit(&available, Some(UnitChoice::G));
        assert_eq!(unit, UnitChoice::Ml);

        let scaled = scale_all(&table, 330.0, unit);
        assert!(close(scaled.get("energy-kcal").unwrap(), 138.6));
    }

    #[test]
    fn resolve_unit_keeps_offered_selection() {
        let available = [UnitChoice::G, UnitChoice::Ml];
        assert_eq!(resolve_unit(&available, Some(UnitChoice::Ml)), UnitChoice::Ml);
        assert_eq!(resolve_unit(&available, None), UnitChoice::G);
    }

    #[test]
    fn scale_all_never_mixes_units() {
        let table = NutrientTable::new()
            .with("fat", UnitChoice::G, 5.0)
            .with("fat", UnitChoice::Ml, 9.0);
        let scaled = scale_all(&table, 200.0, UnitChoice::Ml);
        assert_eq!(scaled.get("fat"), Some(18.0));
    }
}
