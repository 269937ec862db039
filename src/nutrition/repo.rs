use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::store::ReportStore;

use super::aggregate::NutrientTotals;
use super::assessment::HealthStatus;
use super::model::NutritionReport;
use super::targets::{MacroSplit, Targets};

const COLUMNS: &str = "id, profile_id, report_date, generated_at, total_calories, total_protein, \
     total_fat, total_carbohydrate, total_fiber, total_sodium, total_cholesterol, \
     recommended_calories, recommended_protein, recommended_fat, recommended_carbohydrate, \
     protein_pct, fat_pct, carbohydrate_pct, health_status, health_score, recommendations, \
     warnings, included_items";

#[derive(Debug, FromRow)]
struct NutritionReportRow {
    id: Uuid,
    profile_id: Uuid,
    report_date: Date,
    generated_at: OffsetDateTime,
    total_calories: f64,
    total_protein: f64,
    total_fat: f64,
    total_carbohydrate: f64,
    total_fiber: f64,
    total_sodium: f64,
    total_cholesterol: f64,
    recommended_calories: f64,
    recommended_protein: f64,
    recommended_fat: f64,
    recommended_carbohydrate: f64,
    protein_pct: f64,
    fat_pct: f64,
    carbohydrate_pct: f64,
    health_status: String,
    health_score: i32,
    recommendations: Vec<String>,
    warnings: Vec<String>,
    included_items: Vec<String>,
}

impl TryFrom<NutritionReportRow> for NutritionReport {
    type Error = anyhow::Error;

    fn try_from(r: NutritionReportRow) -> Result<Self, Self::Error> {
        let health_status = HealthStatus::parse(&r.health_status)
            .ok_or_else(|| anyhow!("unknown health status {:?} on report {}", r.health_status, r.id))?;
        Ok(Self {
            id: r.id,
            profile_id: r.profile_id,
            report_date: r.report_date,
            generated_at: r.generated_at,
            totals: NutrientTotals {
                calories: r.total_calories,
                protein: r.total_protein,
                fat: r.total_fat,
                carbohydrate: r.total_carbohydrate,
                fiber: r.total_fiber,
                sodium: r.total_sodium,
                cholesterol: r.total_cholesterol,
            },
            targets: Targets {
                calories: r.recommended_calories,
                protein: r.recommended_protein,
                fat: r.recommended_fat,
                carbohydrate: r.recommended_carbohydrate,
            },
            macros: MacroSplit {
                protein_pct: r.protein_pct,
                fat_pct: r.fat_pct,
                carbohydrate_pct: r.carbohydrate_pct,
            },
            health_status,
            health_score: r.health_score,
            recommendations: r.recommendations,
            warnings: r.warnings,
            included_items: r.included_items,
        })
    }
}

fn convert(rows: Vec<NutritionReportRow>) -> anyhow::Result<Vec<NutritionReport>> {
    rows.into_iter().map(NutritionReport::try_from).collect()
}

#[derive(Clone)]
pub struct PgReportStore {
    db: PgPool,
}

impl PgReportStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn find_for_date(
        &self,
        profile_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Option<NutritionReport>> {
        let row = sqlx::query_as::<_, NutritionReportRow>(&format!(
            "SELECT {COLUMNS} FROM nutrition_reports WHERE profile_id = $1 AND report_date = $2"
        ))
        .bind(profile_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;
        row.map(NutritionReport::try_from).transpose()
    }

    async fn upsert(&self, r: NutritionReport) -> anyhow::Result<NutritionReport> {
        // the unique (profile_id, report_date) key makes concurrent writers converge
        let row = sqlx::query_as::<_, NutritionReportRow>(&format!(
            r#"
            INSERT INTO nutrition_reports ({COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22, $23)
            ON CONFLICT (profile_id, report_date) DO UPDATE SET
                generated_at = EXCLUDED.generated_at,
                total_calories = EXCLUDED.total_calories,
                total_protein = EXCLUDED.total_protein,
                total_fat = EXCLUDED.total_fat,
                total_carbohydrate = EXCLUDED.total_carbohydrate,
                total_fiber = EXCLUDED.total_fiber,
                total_sodium = EXCLUDED.total_sodium,
                total_cholesterol = EXCLUDED.total_cholesterol,
                recommended_calories = EXCLUDED.recommended_calories,
                recommended_protein = EXCLUDED.recommended_protein,
                recommended_fat = EXCLUDED.recommended_fat,
                recommended_carbohydrate = EXCLUDED.recommended_carbohydrate,
                protein_pct = EXCLUDED.protein_pct,
                fat_pct = EXCLUDED.fat_pct,
                carbohydrate_pct = EXCLUDED.carbohydrate_pct,
                health_status = EXCLUDED.health_status,
                health_score = EXCLUDED.health_score,
                recommendations = EXCLUDED.recommendations,
                warnings = EXCLUDED.warnings,
                included_items = EXCLUDED.included_items
            RETURNING {COLUMNS}
            "#
        ))
        .bind(r.id)
        .bind(r.profile_id)
        .bind(r.report_date)
        .bind(r.generated_at)
        .bind(r.totals.calories)
        .bind(r.totals.protein)
        .bind(r.totals.fat)
        .bind(r.totals.carbohydrate)
        .bind(r.totals.fiber)
        .bind(r.totals.sodium)
        .bind(r.totals.cholesterol)
        .bind(r.targets.calories)
        .bind(r.targets.protein)
        .bind(r.targets.fat)
        .bind(r.targets.carbohydrate)
        .bind(r.macros.protein_pct)
        .bind(r.macros.fat_pct)
        .bind(r.macros.carbohydrate_pct)
        .bind(r.health_status.as_str())
        .bind(r.health_score)
        .bind(&r.recommendations)
        .bind(&r.warnings)
        .bind(&r.included_items)
        .fetch_one(&self.db)
        .await?;
        row.try_into()
    }

    async fn history(&self, profile_id: Uuid) -> anyhow::Result<Vec<NutritionReport>> {
        let rows = sqlx::query_as::<_, NutritionReportRow>(&format!(
            "SELECT {COLUMNS} FROM nutrition_reports WHERE profile_id = $1 ORDER BY report_date DESC"
        ))
        .bind(profile_id)
        .fetch_all(&self.db)
        .await?;
        convert(rows)
    }

    async fn in_range(
        &self,
        profile_id: Uuid,
        from: Option<Date>,
        to: Option<Date>,
    ) -> anyhow::Result<Vec<NutritionReport>> {
        let rows = sqlx::query_as::<_, NutritionReportRow>(&format!(
            r#"
            SELECT {COLUMNS} FROM nutrition_reports
            WHERE profile_id = $1
              AND ($2::date IS NULL OR report_date >= $2)
              AND ($3::date IS NULL OR report_date <= $3)
            ORDER BY report_date DESC
            "#
        ))
        .bind(profile_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;
        convert(rows)
    }

    async fn average_health_score(&self, profile_id: Uuid) -> anyhow::Result<Option<f64>> {
        let (avg,): (Option<f64>,) = sqlx::query_as(
            "SELECT AVG(health_score)::float8 FROM nutrition_reports WHERE profile_id = $1",
        )
        .bind(profile_id)
        .fetch_one(&self.db)
        .await?;
        Ok(avg)
    }
}
