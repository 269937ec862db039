use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::nutrition::targets::ACTIVITY_FACTOR;
use crate::state::AppState;

use super::dto::{ProfileMetrics, ProfileRequest};
use super::model::Profile;

fn validate(req: &ProfileRequest) -> AppResult<()> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    Ok(())
}

pub async fn create_profile(state: &AppState, req: ProfileRequest) -> AppResult<Profile> {
    validate(&req)?;
    let mut profile = Profile::new(String::new());
    req.apply(&mut profile);
    let profile = state.profiles.create(profile).await?;
    info!(profile_id = %profile.id, "profile created");
    Ok(profile)
}

pub async fn get_profile(state: &AppState, id: Uuid) -> AppResult<Profile> {
    state
        .profiles
        .get(id)
        .await?
        .ok_or(AppError::ProfileNotFound(id))
}

pub async fn list_profiles(state: &AppState) -> AppResult<Vec<Profile>> {
    Ok(state.profiles.list().await?)
}

pub async fn update_profile(state: &AppState, id: Uuid, req: ProfileRequest) -> AppResult<Profile> {
    validate(&req)?;
    let mut profile = get_profile(state, id).await?;
    req.apply(&mut profile);
    state
        .profiles
        .update(profile)
        .await?
        .ok_or(AppError::ProfileNotFound(id))
}

pub async fn delete_profile(state: &AppState, id: Uuid) -> AppResult<()> {
    if !state.profiles.delete(id).await? {
        return Err(AppError::ProfileNotFound(id));
    }
    info!(profile_id = %id, "profile deleted");
    Ok(())
}

pub async fn profile_metrics(state: &AppState, id: Uuid) -> AppResult<ProfileMetrics> {
    let profile = get_profile(state, id).await?;
    let bmi = profile.bmi().ok_or_else(|| {
        AppError::InvalidMetrics("weight and a positive height are required".into())
    })?;
    let bmr = profile.bmr();
    Ok(ProfileMetrics {
        bmi,
        bmr,
        recommended_calories: bmr.map(|b| b * ACTIVITY_FACTOR),
    })
}
