//! Hard exclusion pass run before scoring.
//!
//! Restriction checks are plain substring containment over ingredient text,
//! so "fishcake" and "meatless" both count as containing a marker.

use crate::items::model::Item;
use crate::profiles::model::Profile;

use super::model::{Preferences, RecommendationQuery};

pub const VEGETARIAN: &str = "vegetarian";
pub const MEAT_MARKERS: &[&str] = &["meat", "fish"];

/// Keeps the items that pass every exclusion rule, in input order.
pub fn filter_items<'a>(
    items: &'a [Item],
    profile: &Profile,
    query: &RecommendationQuery,
    prefs: &Preferences,
) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| !has_allergen_conflict(item, prefs))
        .filter(|item| !has_restriction_conflict(item, prefs))
        .filter(|item| !has_health_conflict(item, profile))
        .filter(|item| within_nutrient_bounds(item, query))
        .collect()
}

fn has_allergen_conflict(item: &Item, prefs: &Preferences) -> bool {
    item.allergens.iter().any(|a| prefs.allergies.contains(a))
}

fn has_restriction_conflict(item: &Item, prefs: &Preferences) -> bool {
    if !prefs.restrictions.contains(VEGETARIAN) {
        return false;
    }
    item.ingredients
        .iter()
        .any(|ingredient| MEAT_MARKERS.iter().any(|m| ingredient.contains(m)))
}

fn has_health_conflict(item: &Item, profile: &Profile) -> bool {
    profile
        .diseases
        .iter()
        .any(|disease| item.health_warnings.contains(disease))
}

/// Unknown nutrient values never exclude an item.
fn within_nutrient_bounds(item: &Item, query: &RecommendationQuery) -> bool {
    if let (Some(max), Some(calories)) = (query.max_calories, item.calories) {
        if calories > max {
            return false;
        }
    }
    if let (Some(min), Some(protein)) = (query.min_protein, item.protein) {
        if protein < min {
            return false;
        }
    }
    if let (Some(max), Some(fat)) = (query.max_fat, item.fat) {
        if fat > max {
            return false;
        }
    }
    true
}
