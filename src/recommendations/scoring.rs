//! Match scoring. Weights and thresholds below are fixed behaviour, not tuning knobs.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::items::model::Item;
use crate::nutrition::targets::ACTIVITY_FACTOR;
use crate::profiles::model::Profile;

use super::model::{Preferences, Recommendation, SubScores};

pub const CUISINE_WEIGHT: f64 = 0.25;
pub const FLAVOR_WEIGHT: f64 = 0.20;
pub const INGREDIENT_WEIGHT: f64 = 0.15;
pub const HEALTH_WEIGHT: f64 = 0.25;
pub const NUTRITION_WEIGHT: f64 = 0.15;

pub const NEUTRAL: f64 = 0.5;
pub const PREFERRED: f64 = 1.0;
pub const NOT_PREFERRED: f64 = 0.3;

pub const DISEASE_BENEFIT_BONUS: f64 = 0.3;
pub const BMI_FIT_BONUS: f64 = 0.2;
pub const OVERWEIGHT_BMI: f64 = 25.0;
pub const UNDERWEIGHT_BMI: f64 = 18.5;
pub const LOW_CALORIE_ITEM: f64 = 150.0;
pub const HIGH_CALORIE_ITEM: f64 = 200.0;

pub const MEALS_PER_DAY: f64 = 3.0;

/// Meal calories over the per-meal target, inclusive band edges.
pub const CLOSE_FIT_RANGE: RangeInclusive<f64> = 0.8..=1.2;
pub const LOOSE_FIT_RANGE: RangeInclusive<f64> = 0.6..=1.5;
pub const CLOSE_FIT: f64 = 1.0;
pub const LOOSE_FIT: f64 = 0.7;
pub const POOR_FIT: f64 = 0.3;

pub const REASON_CUISINE_THRESHOLD: f64 = 0.7;
pub const REASON_FLAVOR_THRESHOLD: f64 = 0.7;
pub const REASON_HEALTH_THRESHOLD: f64 = 0.8;
pub const GENERIC_REASON: &str = "overall match";

fn set_match(preferred: &BTreeSet<String>, value: Option<&str>) -> f64 {
    if preferred.is_empty() {
        return NEUTRAL;
    }
    match value {
        Some(v) if preferred.contains(v) => PREFERRED,
        _ => NOT_PREFERRED,
    }
}

pub fn cuisine_match(item: &Item, prefs: &Preferences) -> f64 {
    set_match(&prefs.cuisines, item.cuisine.as_deref())
}

pub fn flavor_match(item: &Item, prefs: &Preferences) -> f64 {
    set_match(&prefs.flavors, item.flavor.as_deref())
}

/// Counts every (ingredient, preferred) pair where the ingredient text contains
/// the preferred one, so one preference can be counted several times.
pub fn ingredient_match(item: &Item, prefs: &Preferences) -> f64 {
    if prefs.ingredients.is_empty() || item.ingredients.is_empty() {
        return NEUTRAL;
    }
    let matched = item
        .ingredients
        .iter()
        .map(|ingredient| {
            prefs
                .ingredients
                .iter()
                .filter(|preferred| ingredient.contains(preferred.as_str()))
                .count()
        })
        .sum::<usize>();
    (matched as f64 / prefs.ingredients.len() as f64).min(1.0)
}

pub fn health_match(item: &Item, profile: &Profile) -> f64 {
    let mut score = NEUTRAL;

    if profile
        .diseases
        .iter()
        .any(|d| item.health_benefits.contains(d))
    {
        score += DISEASE_BENEFIT_BONUS;
    }

    if let (Some(bmi), Some(calories)) = (profile.bmi(), item.calories) {
        let overweight_fit = bmi > OVERWEIGHT_BMI && calories < LOW_CALORIE_ITEM;
        let underweight_fit = bmi < UNDERWEIGHT_BMI && calories > HIGH_CALORIE_ITEM;
        if overweight_fit || underweight_fit {
            score += BMI_FIT_BONUS;
        }
    }

    score.min(1.0)
}

/// How close the item's calories are to one meal's share of the daily need.
pub fn nutrition_match(item: &Item, profile: &Profile) -> f64 {
    let (Some(calories), Some(bmr)) = (item.calories, profile.bmr()) else {
        return NEUTRAL;
    };
    let meal_target = bmr * ACTIVITY_FACTOR / MEALS_PER_DAY;
    calorie_fit(calories / meal_target)
}

pub fn calorie_fit(ratio: f64) -> f64 {
    if CLOSE_FIT_RANGE.contains(&ratio) {
        CLOSE_FIT
    } else if LOOSE_FIT_RANGE.contains(&ratio) {
        LOOSE_FIT
    } else {
        POOR_FIT
    }
}

pub fn sub_scores(item: &Item, profile: &Profile, prefs: &Preferences) -> SubScores {
    SubScores {
        cuisine_match: cuisine_match(item, prefs),
        flavor_match: flavor_match(item, prefs),
        ingredient_match: ingredient_match(item, prefs),
        health_match: health_match(item, profile),
        nutrition_match: nutrition_match(item, profile),
    }
}

/// Weighted sum scaled to [0, 100].
pub fn combined_score(s: &SubScores) -> f64 {
    (s.cuisine_match * CUISINE_WEIGHT
        + s.flavor_match * FLAVOR_WEIGHT
        + s.ingredient_match * INGREDIENT_WEIGHT
        + s.health_match * HEALTH_WEIGHT
        + s.nutrition_match * NUTRITION_WEIGHT)
        * 100.0
}

pub fn rationale(item: &Item, s: &SubScores) -> String {
    let mut parts = Vec::new();
    if s.cuisine_match > REASON_CUISINE_THRESHOLD {
        parts.push(format!(
            "matches your favourite {} cuisine",
            item.cuisine.as_deref().unwrap_or_default()
        ));
    }
    if s.flavor_match > REASON_FLAVOR_THRESHOLD {
        parts.push(format!(
            "{} flavor fits your taste",
            item.flavor.as_deref().unwrap_or_default()
        ));
    }
    if s.health_match > REASON_HEALTH_THRESHOLD {
        parts.push("good for your health".to_string());
    }

    if parts.is_empty() {
        GENERIC_REASON.to_string()
    } else {
        parts.join("; ")
    }
}

/// Builds a fresh recommendation record for one eligible item.
pub fn score_item(
    item: &Item,
    profile: &Profile,
    prefs: &Preferences,
    recommended_at: OffsetDateTime,
) -> Recommendation {
    let scores = sub_scores(item, profile, prefs);
    Recommendation {
        id: Uuid::new_v4(),
        profile_id: profile.id,
        item_id: item.id,
        item_name: item.name.clone(),
        score: combined_score(&scores),
        reason: rationale(item, &scores),
        sub_scores: scores,
        recommended_at,
        clicked: false,
        ordered: false,
        user_rating: None,
        user_feedback: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::model::adult_male;
    use crate::recommendations::model::RecommendationQuery;

    fn prefs_for(profile: &Profile) -> Preferences {
        Preferences::merge(profile, &RecommendationQuery::for_profile(profile.id))
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn neutral_item_without_preferences() {
        let mut item = Item::new("grilled fish");
        item.calories = Some(180.0);
        item.protein = Some(20.0);
        item.fat = Some(5.0);
        let profile = Profile::new("anon");
        let prefs = prefs_for(&profile);

        let s = sub_scores(&item, &profile, &prefs);
        assert_eq!(s.cuisine_match, 0.5);
        assert_eq!(s.flavor_match, 0.5);
        assert_eq!(s.ingredient_match, 0.5);
        assert_eq!(s.health_match, 0.5);
        assert_eq!(s.nutrition_match, 0.5);

        let expected =
            100.0 * (0.25 * 0.5 + 0.20 * 0.5 + 0.15 * 0.5 + 0.25 * 0.5 + 0.15 * s.nutrition_match);
        assert!((combined_score(&s) - expected).abs() < 1e-9);
        assert!((combined_score(&s) - 50.0).abs() < 1e-9);
        assert_eq!(rationale(&item, &s), GENERIC_REASON);
    }

    #[test]
    fn cuisine_and_flavor_match_rules() {
        let mut item = Item::new("mapo tofu");
        item.cuisine = Some("sichuan".into());
        item.flavor = Some("spicy".into());

        let mut prefs = Preferences::default();
        prefs.cuisines = set(&["sichuan"]);
        prefs.flavors = set(&["sweet"]);
        assert_eq!(cuisine_match(&item, &prefs), 1.0);
        assert_eq!(flavor_match(&item, &prefs), 0.3);

        item.cuisine = None;
        assert_eq!(cuisine_match(&item, &prefs), 0.3);
    }

    #[test]
    fn ingredient_match_double_counts_and_caps() {
        let mut item = Item::new("bowl");
        item.ingredients = vec!["chicken thigh".into(), "chicken stock".into(), "rice".into()];

        let mut prefs = Preferences::default();
        prefs.ingredients = set(&["chicken", "basil"]);
        // two ingredients contain "chicken": 2 / 2
        assert_eq!(ingredient_match(&item, &prefs), 1.0);

        prefs.ingredients = set(&["rice", "basil", "tofu", "egg"]);
        assert_eq!(ingredient_match(&item, &prefs), 0.25);

        item.ingredients.clear();
        assert_eq!(ingredient_match(&item, &prefs), 0.5);
    }

    #[test]
    fn health_match_bonuses_cap_at_one() {
        let mut profile = adult_male();
        profile.weight_kg = Some(95.0); // BMI ~31
        profile.diseases = vec!["diabetes".into()];

        let mut item = Item::new("steamed greens");
        item.calories = Some(60.0);
        item.health_benefits = vec!["diabetes".into()];
        assert_eq!(health_match(&item, &profile), 1.0);

        item.calories = Some(400.0);
        assert!((health_match(&item, &profile) - 0.8).abs() < 1e-12);

        profile.weight_kg = Some(50.0); // BMI ~16.3
        profile.diseases.clear();
        assert!((health_match(&item, &profile) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn nutrition_match_bands() {
        let profile = adult_male();
        let target = profile.bmr().unwrap() * 1.5 / 3.0;
        let mut item = Item::new("plate");

        item.calories = Some(target);
        assert_eq!(nutrition_match(&item, &profile), 1.0);
        item.calories = Some(target * 0.7);
        assert_eq!(nutrition_match(&item, &profile), 0.7);
        item.calories = Some(target * 1.4);
        assert_eq!(nutrition_match(&item, &profile), 0.7);
        item.calories = Some(target * 2.0);
        assert_eq!(nutrition_match(&item, &profile), 0.3);
        item.calories = Some(target * 0.5);
        assert_eq!(nutrition_match(&item, &profile), 0.3);

        item.calories = None;
        assert_eq!(nutrition_match(&item, &profile), 0.5);
    }

    #[test]
    fn calorie_fit_band_edges_are_inclusive() {
        assert_eq!(calorie_fit(0.8), 1.0);
        assert_eq!(calorie_fit(1.2), 1.0);
        assert_eq!(calorie_fit(0.79), 0.7);
        assert_eq!(calorie_fit(1.21), 0.7);
        assert_eq!(calorie_fit(0.6), 0.7);
        assert_eq!(calorie_fit(1.5), 0.7);
        assert_eq!(calorie_fit(0.59), 0.3);
        assert_eq!(calorie_fit(1.51), 0.3);
    }

    #[test]
    fn nutrition_match_either_side_of_band_edges() {
        let profile = adult_male();
        let meal_target = profile.bmr().unwrap() * 1.5 / 3.0;
        let mut item = Item::new("plate");
        for (factor, expected) in [
            (0.81, 1.0),
            (1.19, 1.0),
            (0.79, 0.7),
            (1.21, 0.7),
            (0.61, 0.7),
            (1.49, 0.7),
            (0.59, 0.3),
            (1.51, 0.3),
        ] {
            item.calories = Some(meal_target * factor);
            assert_eq!(nutrition_match(&item, &profile), expected, "factor = {factor}");
        }
    }

    #[test]
    fn weights_are_applied_per_factor() {
        let s = SubScores {
            cuisine_match: 1.0,
            flavor_match: 0.3,
            ingredient_match: 0.25,
            health_match: 0.8,
            nutrition_match: 0.7,
        };
        let expected = (1.0 * 0.25 + 0.3 * 0.20 + 0.25 * 0.15 + 0.8 * 0.25 + 0.7 * 0.15) * 100.0;
        assert_eq!(combined_score(&s), expected);
        assert!((combined_score(&s) - 65.25).abs() < 1e-9);

        // swapping the cuisine and flavor values must move the score
        let swapped = SubScores {
            cuisine_match: 0.3,
            flavor_match: 1.0,
            ..s
        };
        assert!((combined_score(&swapped) - 61.75).abs() < 1e-9);
    }

    #[test]
    fn rationale_lists_triggered_factors() {
        let mut item = Item::new("kung pao");
        item.cuisine = Some("sichuan".into());
        item.flavor = Some("spicy".into());
        let s = SubScores {
            cuisine_match: 1.0,
            flavor_match: 1.0,
            ingredient_match: 0.5,
            health_match: 1.0,
            nutrition_match: 0.3,
        };
        assert_eq!(
            rationale(&item, &s),
            "matches your favourite sichuan cuisine; spicy flavor fits your taste; good for your health"
        );
    }

    #[test]
    fn scores_stay_in_range() {
        let mut profile = adult_male();
        profile.preferred_cuisines = vec!["thai".into()];
        profile.preferred_ingredients = vec!["lime".into()];
        profile.diseases = vec!["hypertension".into()];
        let prefs = prefs_for(&profile);

        for calories in [None, Some(0.0), Some(120.0), Some(850.0), Some(5000.0)] {
            let mut item = Item::new("x");
            item.calories = calories;
            item.cuisine = Some("thai".into());
            item.ingredients = vec!["lime".into(), "lime leaf".into(), "key lime".into()];
            item.health_benefits = vec!["hypertension".into()];

            let rec = score_item(&item, &profile, &prefs, OffsetDateTime::now_utc());
            let s = rec.sub_scores;
            for v in [
                s.cuisine_match,
                s.flavor_match,
                s.ingredient_match,
                s.health_match,
                s.nutrition_match,
            ] {
                assert!((0.0..=1.0).contains(&v));
            }
            assert!((0.0..=100.0).contains(&rec.score));
        }
    }
}
