use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub item_ids: Vec<Uuid>,
    /// `YYYY-MM-DD` or RFC 3339; today (UTC) when absent.
    #[serde(default)]
    pub report_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryRange {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthScoreSummary {
    pub profile_id: Uuid,
    /// `None` until the first report exists.
    pub average_health_score: Option<f64>,
}
