use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::profiles::services::get_profile;
use crate::state::AppState;

use super::dto::{HealthScoreSummary, HistoryRange};
use super::engine::analyze;
use super::model::NutritionReport;

pub const QUICK_REPORT_ITEMS: usize = 3;

/// Accepts a plain calendar date or a full RFC 3339 timestamp.
pub fn parse_report_date(raw: &str) -> AppResult<Date> {
    let raw = raw.trim();
    if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Ok(date);
    }
    OffsetDateTime::parse(raw, &Rfc3339)
        .map(|ts| ts.date())
        .map_err(|_| AppError::Validation(format!("invalid report date {raw:?}")))
}

/// Builds the report for `report_date` and stores it, replacing any report
/// already stored for that day (its id is kept).
pub async fn generate_report(
    state: &AppState,
    profile_id: Uuid,
    item_ids: &[Uuid],
    report_date: Option<&str>,
) -> AppResult<NutritionReport> {
    let profile = get_profile(state, profile_id).await?;
    let report_date = match report_date {
        Some(raw) => parse_report_date(raw)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let consumed = state.items.get_many(item_ids).await?;
    if consumed.len() != item_ids.len() {
        debug!(
            requested = item_ids.len(),
            found = consumed.len(),
            "unknown item ids skipped"
        );
    }

    let report_id = state
        .reports
        .find_for_date(profile_id, report_date)
        .await?
        .map_or_else(Uuid::new_v4, |r| r.id);

    let report = analyze(
        &profile,
        &consumed,
        report_id,
        report_date,
        OffsetDateTime::now_utc(),
    );
    let report = state.reports.upsert(report).await?;
    info!(
        profile_id = %profile_id,
        report_id = %report.id,
        date = %report.report_date,
        score = report.health_score,
        status = %report.health_status,
        calories_exceeded = report.calories_exceeded(),
        protein_adequate = report.protein_adequate(),
        "nutrition report generated"
    );
    Ok(report)
}

/// Today's report over the first few catalog items.
pub async fn quick_report(state: &AppState, profile_id: Uuid) -> AppResult<NutritionReport> {
    let ids: Vec<Uuid> = state
        .items
        .list()
        .await?
        .into_iter()
        .take(QUICK_REPORT_ITEMS)
        .map(|i| i.id)
        .collect();
    generate_report(state, profile_id, &ids, None).await
}

pub async fn history(
    state: &AppState,
    profile_id: Uuid,
    range: &HistoryRange,
) -> AppResult<Vec<NutritionReport>> {
    get_profile(state, profile_id).await?;
    if range.from.is_none() && range.to.is_none() {
        return Ok(state.reports.history(profile_id).await?);
    }
    let from = range.from.as_deref().map(parse_report_date).transpose()?;
    let to = range.to.as_deref().map(parse_report_date).transpose()?;
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::Validation("`from` must not be after `to`".into()));
        }
    }
    Ok(state.reports.in_range(profile_id, from, to).await?)
}

pub async fn health_score(state: &AppState, profile_id: Uuid) -> AppResult<HealthScoreSummary> {
    get_profile(state, profile_id).await?;
    Ok(HealthScoreSummary {
        profile_id,
        average_health_score: state.reports.average_health_score(profile_id).await?,
    })
}
