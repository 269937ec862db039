//! Scores a day's intake against targets and the profile's conditions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profiles::model::Profile;

use super::aggregate::NutrientTotals;
use super::targets::{MacroSplit, Targets};

pub const MAX_SCORE: i32 = 100;

pub const CALORIE_EXCESS_FACTOR: f64 = 1.1;
pub const CALORIE_DEFICIT_FACTOR: f64 = 0.8;
pub const PROTEIN_ADEQUACY_FACTOR: f64 = 0.9;
pub const SODIUM_LIMIT_MG: f64 = 2300.0;
pub const HYPERTENSION_SODIUM_LIMIT_MG: f64 = 1500.0;
pub const DIABETES_CARB_FACTOR: f64 = 1.2;
pub const BALANCE_THRESHOLD: f64 = 70.0;

pub const CALORIE_PENALTY: i32 = 20;
pub const PROTEIN_PENALTY: i32 = 15;
pub const SODIUM_PENALTY: i32 = 15;
pub const BALANCE_PENALTY: i32 = 10;
pub const DISEASE_PENALTY: i32 = 25;

pub const HEALTHY_MIN: i32 = 80;
pub const NEEDS_IMPROVEMENT_MIN: i32 = 60;

pub const DIABETES: &str = "diabetes";
pub const HYPERTENSION: &str = "hypertension";
pub const HYPERLIPIDEMIA: &str = "hyperlipidemia";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "needs improvement")]
    NeedsImprovement,
    #[serde(rename = "unhealthy")]
    Unhealthy,
}

impl HealthStatus {
    pub fn from_score(score: i32) -> Self {
        if score >= HEALTHY_MIN {
            HealthStatus::Healthy
        } else if score >= NEEDS_IMPROVEMENT_MIN {
            HealthStatus::NeedsImprovement
        } else {
            HealthStatus::Unhealthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::NeedsImprovement => "needs improvement",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "healthy" => Some(HealthStatus::Healthy),
            "needs improvement" => Some(HealthStatus::NeedsImprovement),
            "unhealthy" => Some(HealthStatus::Unhealthy),
            _ => None,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intake conditions shared by the assessor and the advisory generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntakeFlags {
    pub calories_exceeded: bool,
    pub calories_under_target: bool,
    pub protein_adequate: bool,
    pub sodium_high: bool,
    pub balance: f64,
}

impl IntakeFlags {
    pub fn evaluate(totals: &NutrientTotals, targets: &Targets, split: &MacroSplit) -> Self {
        Self {
            calories_exceeded: totals.calories > targets.calories * CALORIE_EXCESS_FACTOR,
            calories_under_target: totals.calories < targets.calories * CALORIE_DEFICIT_FACTOR,
            protein_adequate: totals.protein >= targets.protein * PROTEIN_ADEQUACY_FACTOR,
            sodium_high: totals.sodium > SODIUM_LIMIT_MG,
            balance: split.balance_score(),
        }
    }

    pub fn poorly_balanced(&self) -> bool {
        self.balance < BALANCE_THRESHOLD
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub score: i32,
    pub status: HealthStatus,
    pub warnings: Vec<String>,
}

/// Applies every penalty that holds, in a fixed order; penalties stack.
pub fn assess(
    profile: &Profile,
    totals: &NutrientTotals,
    targets: &Targets,
    flags: &IntakeFlags,
) -> Assessment {
    let mut score = MAX_SCORE;
    let mut warnings = Vec::new();

    if flags.calories_exceeded {
        score -= CALORIE_PENALTY;
        warnings.push("Calorie intake is above target; cut back on high-calorie foods.".to_string());
    }
    if !flags.protein_adequate {
        score -= PROTEIN_PENALTY;
        warnings.push("Protein intake is too low; add protein-rich foods.".to_string());
    }
    if flags.sodium_high {
        score -= SODIUM_PENALTY;
        warnings.push("Sodium intake is too high; reduce salt.".to_string());
    }
    if flags.poorly_balanced() {
        score -= BALANCE_PENALTY;
        warnings.push("Macronutrient split is unbalanced; adjust the diet structure.".to_string());
    }

    for disease in &profile.diseases {
        match disease.as_str() {
            DIABETES if totals.carbohydrate > targets.carbohydrate * DIABETES_CARB_FACTOR => {
                score -= DISEASE_PENALTY;
                warnings.push(
                    "Carbohydrate intake is too high for blood sugar control.".to_string(),
                );
            }
            // Overlaps with the general sodium check above; both penalties apply.
            HYPERTENSION if totals.sodium > HYPERTENSION_SODIUM_LIMIT_MG => {
                score -= DISEASE_PENALTY;
                warnings.push("Sodium intake is too high for blood pressure control.".to_string());
            }
            _ => {}
        }
    }

    let score = score.clamp(0, MAX_SCORE);
    Assessment {
        score,
        status: HealthStatus::from_score(score),
        warnings,
    }
}
