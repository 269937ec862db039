use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::profiles::services::get_profile;
use crate::state::AppState;

use super::dto::RecommendationStats;
use super::engine::recommend;
use super::model::{Feedback, Recommendation, RecommendationQuery};

const MIN_RATING: i32 = 1;
const MAX_RATING: i32 = 5;

/// Scores the whole catalog for the profile and stores the resulting batch.
pub async fn generate(state: &AppState, query: RecommendationQuery) -> AppResult<Vec<Recommendation>> {
    let profile = get_profile(state, query.profile_id).await?;
    let catalog = state.items.list().await?;
    debug!(profile_id = %profile.id, catalog = catalog.len(), "catalog loaded");

    let recs = recommend(&profile, &catalog, &query, OffsetDateTime::now_utc());
    state.recommendations.save_batch(&recs).await?;
    info!(
        profile_id = %profile.id,
        count = recs.len(),
        meal_type = query.meal_type.as_deref().unwrap_or("-"),
        "recommendations generated"
    );
    Ok(recs)
}

/// Profile preferences only, no request overrides.
pub async fn simple(
    state: &AppState,
    profile_id: Uuid,
    count: Option<usize>,
) -> AppResult<Vec<Recommendation>> {
    let query = RecommendationQuery {
        count,
        ..RecommendationQuery::for_profile(profile_id)
    };
    generate(state, query).await
}

pub async fn history(state: &AppState, profile_id: Uuid) -> AppResult<Vec<Recommendation>> {
    get_profile(state, profile_id).await?;
    Ok(state.recommendations.history(profile_id).await?)
}

pub async fn record_feedback(
    state: &AppState,
    id: Uuid,
    feedback: Feedback,
) -> AppResult<Recommendation> {
    if let Some(rating) = feedback.rating {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::Validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
    }
    let rec = state
        .recommendations
        .record_feedback(id, &feedback)
        .await?
        .ok_or(AppError::RecommendationNotFound(id))?;
    info!(recommendation_id = %id, clicked = rec.clicked, ordered = rec.ordered, "feedback recorded");
    Ok(rec)
}

pub async fn stats(state: &AppState, profile_id: Uuid) -> AppResult<RecommendationStats> {
    get_profile(state, profile_id).await?;
    let counts = state.recommendations.feedback_counts(profile_id).await?;
    let history = state.recommendations.history(profile_id).await?;
    let average_match = if history.is_empty() {
        0.0
    } else {
        history.iter().map(Recommendation::average_match).sum::<f64>() / history.len() as f64
    };
    Ok(RecommendationStats::new(counts, average_match))
}
