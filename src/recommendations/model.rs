use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::profiles::model::Profile;

pub const DEFAULT_COUNT: usize = 10;

/// Request for personalised recommendations. List fields extend the profile's own lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationQuery {
    pub profile_id: Uuid,
    #[serde(default)]
    pub preferred_cuisines: Option<Vec<String>>,
    #[serde(default)]
    pub preferred_flavors: Option<Vec<String>>,
    #[serde(default)]
    pub preferred_ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
    #[serde(default)]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(default)]
    pub max_calories: Option<f64>,
    #[serde(default)]
    pub min_protein: Option<f64>,
    #[serde(default)]
    pub max_fat: Option<f64>,
    /// Breakfast, lunch, ... Recorded with the request only.
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

impl RecommendationQuery {
    pub fn for_profile(profile_id: Uuid) -> Self {
        Self {
            profile_id,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.count.unwrap_or(DEFAULT_COUNT)
    }
}

/// Profile lists merged with the query overrides.
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    pub cuisines: BTreeSet<String>,
    pub flavors: BTreeSet<String>,
    pub ingredients: BTreeSet<String>,
    pub allergies: BTreeSet<String>,
    pub restrictions: BTreeSet<String>,
}

fn union(base: &[String], extra: Option<&Vec<String>>) -> BTreeSet<String> {
    base.iter()
        .chain(extra.into_iter().flatten())
        .cloned()
        .collect()
}

impl Preferences {
    pub fn merge(profile: &Profile, query: &RecommendationQuery) -> Self {
        Self {
            cuisines: union(&profile.preferred_cuisines, query.preferred_cuisines.as_ref()),
            flavors: union(&profile.preferred_flavors, query.preferred_flavors.as_ref()),
            ingredients: union(
                &profile.preferred_ingredients,
                query.preferred_ingredients.as_ref(),
            ),
            allergies: union(&profile.allergies, query.allergies.as_ref()),
            restrictions: union(
                &profile.dietary_restrictions,
                query.dietary_restrictions.as_ref(),
            ),
        }
    }
}

/// The five match factors, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SubScores {
    pub cuisine_match: f64,
    pub flavor_match: f64,
    pub ingredient_match: f64,
    pub health_match: f64,
    pub nutrition_match: f64,
}

/// A scored candidate, persisted as a historical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Recommendation {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub sub_scores: SubScores,
    /// Weighted score in [0, 100].
    pub score: f64,
    pub reason: String,
    #[serde(with = "time::serde::rfc3339")]
    pub recommended_at: OffsetDateTime,
    pub clicked: bool,
    pub ordered: bool,
    pub user_rating: Option<i32>,
    pub user_feedback: Option<String>,
}

impl Recommendation {
    pub fn average_match(&self) -> f64 {
        let s = &self.sub_scores;
        (s.cuisine_match + s.flavor_match + s.ingredient_match + s.health_match + s.nutrition_match)
            / 5.0
    }
}

/// User reaction to a recommendation. Only these fields are ever updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    #[serde(default)]
    pub clicked: bool,
    #[serde(default)]
    pub ordered: bool,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FeedbackCounts {
    pub total: i64,
    pub clicked: i64,
    pub ordered: i64,
}

impl FeedbackCounts {
    pub fn click_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.clicked as f64 / self.total as f64
        }
    }

    pub fn conversion_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.ordered as f64 / self.total as f64
        }
    }
}
