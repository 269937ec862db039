use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::RecommendationStore;

use super::model::{Feedback, FeedbackCounts, Recommendation};

const COLUMNS: &str = "id, profile_id, item_id, item_name, cuisine_match, flavor_match, \
     ingredient_match, health_match, nutrition_match, score, reason, recommended_at, \
     clicked, ordered, user_rating, user_feedback";

#[derive(Clone)]
pub struct PgRecommendationStore {
    db: PgPool,
}

impl PgRecommendationStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecommendationStore for PgRecommendationStore {
    async fn save_batch(&self, recs: &[Recommendation]) -> anyhow::Result<()> {
        let mut tx = self.db.begin().await?;
        for r in recs {
            sqlx::query(&format!(
                r#"
                INSERT INTO recommendations ({COLUMNS})
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
                "#
            ))
            .bind(r.id)
            .bind(r.profile_id)
            .bind(r.item_id)
            .bind(&r.item_name)
            .bind(r.sub_scores.cuisine_match)
            .bind(r.sub_scores.flavor_match)
            .bind(r.sub_scores.ingredient_match)
            .bind(r.sub_scores.health_match)
            .bind(r.sub_scores.nutrition_match)
            .bind(r.score)
            .bind(&r.reason)
            .bind(r.recommended_at)
            .bind(r.clicked)
            .bind(r.ordered)
            .bind(r.user_rating)
            .bind(&r.user_feedback)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Recommendation>> {
        let row = sqlx::query_as::<_, Recommendation>(&format!(
            "SELECT {COLUMNS} FROM recommendations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn history(&self, profile_id: Uuid) -> anyhow::Result<Vec<Recommendation>> {
        // score breaks ties inside one batch, which shares a timestamp
        let rows = sqlx::query_as::<_, Recommendation>(&format!(
            r#"
            SELECT {COLUMNS} FROM recommendations
            WHERE profile_id = $1
            ORDER BY recommended_at DESC, score DESC
            "#
        ))
        .bind(profile_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn record_feedback(
        &self,
        id: Uuid,
        feedback: &Feedback,
    ) -> anyhow::Result<Option<Recommendation>> {
        let row = sqlx::query_as::<_, Recommendation>(&format!(
            r#"
            UPDATE recommendations
            SET clicked = $2, ordered = $3, user_rating = $4, user_feedback = $5
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(feedback.clicked)
        .bind(feedback.ordered)
        .bind(feedback.rating)
        .bind(&feedback.comment)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn feedback_counts(&self, profile_id: Uuid) -> anyhow::Result<FeedbackCounts> {
        let (total, clicked, ordered): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE clicked),
                   COUNT(*) FILTER (WHERE ordered)
            FROM recommendations
            WHERE profile_id = $1
            "#,
        )
        .bind(profile_id)
        .fetch_one(&self.db)
        .await?;
        Ok(FeedbackCounts {
            total,
            clicked,
            ordered,
        })
    }
}
