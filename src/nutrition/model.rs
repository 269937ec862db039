use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::aggregate::NutrientTotals;
use super::assessment::HealthStatus;
use super::targets::{MacroSplit, Targets};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Daily nutrition report. One per (profile, report_date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionReport {
    pub id: Uuid,
    pub profile_id: Uuid,
    #[serde(with = "iso_date")]
    pub report_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub totals: NutrientTotals,
    pub targets: Targets,
    pub macros: MacroSplit,
    pub health_status: HealthStatus,
    pub health_score: i32,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    pub included_items: Vec<String>,
}

impl NutritionReport {
    pub fn calories_exceeded(&self) -> bool {
        self.totals.calories > self.targets.calories * super::assessment::CALORIE_EXCESS_FACTOR
    }

    pub fn protein_adequate(&self) -> bool {
        self.totals.protein >= self.targets.protein * super::assessment::PROTEIN_ADEQUACY_FACTOR
    }
}
