use async_trait::async_trait;
use time::Date;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::items::model::Item;
use crate::nutrition::model::NutritionReport;
use crate::profiles::model::Profile;
use crate::recommendations::model::{Feedback, FeedbackCounts, Recommendation};

use super::{ItemFilter, ItemStore, ProfileStore, RecommendationStore, ReportStore};

#[derive(Default)]
struct Tables {
    profiles: Vec<Profile>,
    items: Vec<Item>,
    recommendations: Vec<Recommendation>,
    reports: Vec<NutritionReport>,
}

/// Process-local store used when no database is configured, and in tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn replace<T>(rows: &mut [T], row: T, same: impl Fn(&T) -> bool) -> Option<&T> {
    let slot = rows.iter_mut().find(|r| same(r))?;
    *slot = row;
    Some(slot)
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn create(&self, profile: Profile) -> anyhow::Result<Profile> {
        let mut t = self.tables.write().await;
        if t.profiles.iter().any(|p| p.id == profile.id) {
            anyhow::bail!("profile {} already exists", profile.id);
        }
        t.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        let t = self.tables.read().await;
        Ok(t.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Profile>> {
        Ok(self.tables.read().await.profiles.clone())
    }

    async fn update(&self, profile: Profile) -> anyhow::Result<Option<Profile>> {
        let mut t = self.tables.write().await;
        let id = profile.id;
        Ok(replace(&mut t.profiles, profile, |p| p.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.tables.write().await;
        let before = t.profiles.len();
        t.profiles.retain(|p| p.id != id);
        let removed = t.profiles.len() != before;
        if removed {
            t.recommendations.retain(|r| r.profile_id != id);
            t.reports.retain(|r| r.profile_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn create(&self, item: Item) -> anyhow::Result<Item> {
        let mut t = self.tables.write().await;
        if t.items.iter().any(|i| i.id == item.id) {
            anyhow::bail!("item {} already exists", item.id);
        }
        t.items.push(item.clone());
        Ok(item)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Item>> {
        let t = self.tables.read().await;
        Ok(t.items.iter().find(|i| i.id == id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Item>> {
        let t = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| t.items.iter().find(|i| i.id == *id).cloned())
            .collect())
    }

    async fn list(&self) -> anyhow::Result<Vec<Item>> {
        Ok(self.tables.read().await.items.clone())
    }

    async fn search(&self, filter: &ItemFilter) -> anyhow::Result<Vec<Item>> {
        let t = self.tables.read().await;
        Ok(t.items.iter().filter(|i| filter.matches(i)).cloned().collect())
    }

    async fn update(&self, item: Item) -> anyhow::Result<Option<Item>> {
        let mut t = self.tables.write().await;
        let id = item.id;
        Ok(replace(&mut t.items, item, |i| i.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.tables.write().await;
        let before = t.items.len();
        t.items.retain(|i| i.id != id);
        Ok(t.items.len() != before)
    }
}

#[async_trait]
impl RecommendationStore for MemoryStore {
    async fn save_batch(&self, recs: &[Recommendation]) -> anyhow::Result<()> {
        self.tables
            .write()
            .await
            .recommendations
            .extend_from_slice(recs);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Recommendation>> {
        let t = self.tables.read().await;
        Ok(t.recommendations.iter().find(|r| r.id == id).cloned())
    }

    async fn history(&self, profile_id: Uuid) -> anyhow::Result<Vec<Recommendation>> {
        let t = self.tables.read().await;
        let mut rows: Vec<_> = t
            .recommendations
            .iter()
            .filter(|r| r.profile_id == profile_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.recommended_at.cmp(&a.recommended_at));
        Ok(rows)
    }

    async fn record_feedback(
        &self,
        id: Uuid,
        feedback: &Feedback,
    ) -> anyhow::Result<Option<Recommendation>> {
        let mut t = self.tables.write().await;
        let Some(rec) = t.recommendations.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        rec.clicked = feedback.clicked;
        rec.ordered = feedback.ordered;
        rec.user_rating = feedback.rating;
        rec.user_feedback = feedback.comment.clone();
        Ok(Some(rec.clone()))
    }

    async fn feedback_counts(&self, profile_id: Uuid) -> anyhow::Result<FeedbackCounts> {
        let t = self.tables.read().await;
        let mut counts = FeedbackCounts::default();
        for r in t.recommendations.iter().filter(|r| r.profile_id == profile_id) {
            counts.total += 1;
            counts.clicked += i64::from(r.clicked);
            counts.ordered += i64::from(r.ordered);
        }
        Ok(counts)
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn find_for_date(
        &self,
        profile_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Option<NutritionReport>> {
        let t = self.tables.read().await;
        Ok(t.reports
            .iter()
            .find(|r| r.profile_id == profile_id && r.report_date == date)
            .cloned())
    }

    async fn upsert(&self, mut report: NutritionReport) -> anyhow::Result<NutritionReport> {
        // find-or-insert under one write lock
        let mut t = self.tables.write().await;
        let existing = t
            .reports
            .iter()
            .position(|r| r.profile_id == report.profile_id && r.report_date == report.report_date);
        match existing {
            Some(idx) => {
                report.id = t.reports[idx].id;
                t.reports[idx] = report.clone();
            }
            None => t.reports.push(report.clone()),
        }
        Ok(report)
    }

    async fn history(&self, profile_id: Uuid) -> anyhow::Result<Vec<NutritionReport>> {
        let t = self.tables.read().await;
        let mut rows: Vec<_> = t
            .reports
            .iter()
            .filter(|r| r.profile_id == profile_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.report_date.cmp(&a.report_date));
        Ok(rows)
    }

    async fn in_range(
        &self,
        profile_id: Uuid,
        from: Option<Date>,
        to: Option<Date>,
    ) -> anyhow::Result<Vec<NutritionReport>> {
        let rows = ReportStore::history(self, profile_id).await?;
        Ok(rows
            .into_iter()
            .filter(|r| from.map_or(true, |f| r.report_date >= f))
            .filter(|r| to.map_or(true, |t| r.report_date <= t))
            .collect())
    }

    async fn average_health_score(&self, profile_id: Uuid) -> anyhow::Result<Option<f64>> {
        let t = self.tables.read().await;
        let scores: Vec<f64> = t
            .reports
            .iter()
            .filter(|r| r.profile_id == profile_id)
            .map(|r| f64::from(r.health_score))
            .collect();
        if scores.is_empty() {
            return Ok(None);
        }
        Ok(Some(scores.iter().sum::<f64>() / scores.len() as f64))
    }
}
