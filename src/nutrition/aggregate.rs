use serde::{Deserialize, Serialize};

use crate::items::model::Item;

/// Summed intake over a set of consumed items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrate: f64,
    pub fiber: f64,
    pub sodium: f64,
    pub cholesterol: f64,
}

/// Sums one nutrient, counting unknown values as zero.
///
/// Values are ordered before summing so the total is bit-identical for
/// every permutation of `items`.
fn sum_field(items: &[Item], field: impl Fn(&Item) -> Option<f64>) -> f64 {
    let mut values: Vec<f64> = items.iter().filter_map(&field).collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

pub fn aggregate(items: &[Item]) -> NutrientTotals {
    NutrientTotals {
        calories: sum_field(items, |i| i.calories),
        protein: sum_field(items, |i| i.protein),
        fat: sum_field(items, |i| i.fat),
        carbohydrate: sum_field(items, |i| i.carbohydrate),
        fiber: sum_field(items, |i| i.fiber),
        sodium: sum_field(items, |i| i.sodium),
        cholesterol: sum_field(items, |i| i.cholesterol),
    }
}
