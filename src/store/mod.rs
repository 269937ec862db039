//! Persistence seams used by the services. The engines never touch these.

pub mod memory;

use async_trait::async_trait;
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use crate::items::model::Item;
use crate::nutrition::model::NutritionReport;
use crate::profiles::model::Profile;
use crate::recommendations::model::{Feedback, FeedbackCounts, Recommendation};

pub use memory::MemoryStore;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create(&self, profile: Profile) -> anyhow::Result<Profile>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Profile>>;
    async fn list(&self) -> anyhow::Result<Vec<Profile>>;
    /// Returns `None` when no profile has `profile.id`.
    async fn update(&self, profile: Profile) -> anyhow::Result<Option<Profile>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Attribute lookups over the catalog. Every set field narrows the result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemFilter {
    pub cuisine: Option<String>,
    pub flavor: Option<String>,
    pub dietary_tag: Option<String>,
    pub without_allergen: Option<String>,
    pub for_disease: Option<String>,
    pub min_calories: Option<f64>,
    pub max_calories: Option<f64>,
    pub min_protein: Option<f64>,
    pub max_fat: Option<f64>,
    pub min_rating: Option<f64>,
}

impl ItemFilter {
    /// In-process version of the lookup; range bounds require the value to be known.
    pub fn matches(&self, item: &Item) -> bool {
        fn eq(want: &Option<String>, have: &Option<String>) -> bool {
            want.as_ref().map_or(true, |w| have.as_ref() == Some(w))
        }
        fn has(want: &Option<String>, list: &[String]) -> bool {
            want.as_ref().map_or(true, |w| list.contains(w))
        }
        fn at_least(bound: Option<f64>, value: Option<f64>) -> bool {
            bound.map_or(true, |b| value.is_some_and(|v| v >= b))
        }
        fn at_most(bound: Option<f64>, value: Option<f64>) -> bool {
            bound.map_or(true, |b| value.is_some_and(|v| v <= b))
        }

        eq(&self.cuisine, &item.cuisine)
            && eq(&self.flavor, &item.flavor)
            && has(&self.dietary_tag, &item.dietary_tags)
            && has(&self.for_disease, &item.health_benefits)
            && self
                .without_allergen
                .as_ref()
                .map_or(true, |a| !item.allergens.contains(a))
            && at_least(self.min_calories, item.calories)
            && at_most(self.max_calories, item.calories)
            && at_least(self.min_protein, item.protein)
            && at_most(self.max_fat, item.fat)
            && at_least(self.min_rating, item.rating)
    }
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn create(&self, item: Item) -> anyhow::Result<Item>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Item>>;
    /// Found items in the order of `ids`; unknown ids are skipped.
    async fn get_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Item>>;
    async fn list(&self) -> anyhow::Result<Vec<Item>>;
    async fn search(&self, filter: &ItemFilter) -> anyhow::Result<Vec<Item>>;
    async fn update(&self, item: Item) -> anyhow::Result<Option<Item>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn save_batch(&self, recs: &[Recommendation]) -> anyhow::Result<()>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Recommendation>>;
    /// Newest first.
    async fn history(&self, profile_id: Uuid) -> anyhow::Result<Vec<Recommendation>>;
    /// Touches only the feedback fields. Returns `None` for an unknown id.
    async fn record_feedback(
        &self,
        id: Uuid,
        feedback: &Feedback,
    ) -> anyhow::Result<Option<Recommendation>>;
    async fn feedback_counts(&self, profile_id: Uuid) -> anyhow::Result<FeedbackCounts>;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn find_for_date(
        &self,
        profile_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Option<NutritionReport>>;
    /// Insert, or replace the report already stored for the same profile and
    /// date. Must be atomic: two concurrent calls never leave two reports.
    async fn upsert(&self, report: NutritionReport) -> anyhow::Result<NutritionReport>;
    /// Newest report date first.
    async fn history(&self, profile_id: Uuid) -> anyhow::Result<Vec<NutritionReport>>;
    /// Inclusive on both ends; a missing bound leaves that side open.
    async fn in_range(
        &self,
        profile_id: Uuid,
        from: Option<Date>,
        to: Option<Date>,
    ) -> anyhow::Result<Vec<NutritionReport>>;
    async fn average_health_score(&self, profile_id: Uuid) -> anyhow::Result<Option<f64>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_narrows_by_every_field() {
        let mut item = Item::new("tofu");
        item.cuisine = Some("sichuan".into());
        item.calories = Some(120.0);
        item.allergens = vec!["soy".into()];
        item.dietary_tags = vec!["vegetarian".into()];

        assert!(ItemFilter::default().matches(&item));
        assert!(ItemFilter {
            cuisine: Some("sichuan".into()),
            dietary_tag: Some("vegetarian".into()),
            max_calories: Some(150.0),
            ..ItemFilter::default()
        }
        .matches(&item));
        assert!(!ItemFilter {
            without_allergen: Some("soy".into()),
            ..ItemFilter::default()
        }
        .matches(&item));
        // rating unknown: a rating floor excludes it
        assert!(!ItemFilter {
            min_rating: Some(4.0),
            ..ItemFilter::default()
        }
        .matches(&item));
    }
}
