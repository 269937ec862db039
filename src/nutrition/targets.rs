//! Daily intake targets and macro split analysis.

use serde::{Deserialize, Serialize};

use crate::profiles::model::Profile;

use super::aggregate::NutrientTotals;

/// Light activity multiplier applied to BMR.
pub const ACTIVITY_FACTOR: f64 = 1.5;

pub const PROTEIN_SHARE: f64 = 0.15;
pub const FAT_SHARE: f64 = 0.30;
pub const CARBOHYDRATE_SHARE: f64 = 0.55;

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
pub const KCAL_PER_GRAM_CARBOHYDRATE: f64 = 4.0;

pub const DEFAULT_CALORIES: f64 = 2000.0;
pub const DEFAULT_PROTEIN: f64 = 60.0;
pub const DEFAULT_FAT: f64 = 65.0;
pub const DEFAULT_CARBOHYDRATE: f64 = 300.0;

pub const IDEAL_PROTEIN_PCT: f64 = 22.5;
pub const IDEAL_FAT_PCT: f64 = 27.5;
pub const IDEAL_CARBOHYDRATE_PCT: f64 = 55.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrate: f64,
}

impl Targets {
    pub const DEFAULT: Targets = Targets {
        calories: DEFAULT_CALORIES,
        protein: DEFAULT_PROTEIN,
        fat: DEFAULT_FAT,
        carbohydrate: DEFAULT_CARBOHYDRATE,
    };

    pub fn from_daily_calories(daily: f64) -> Self {
        Self {
            calories: daily,
            protein: daily * PROTEIN_SHARE / KCAL_PER_GRAM_PROTEIN,
            fat: daily * FAT_SHARE / KCAL_PER_GRAM_FAT,
            carbohydrate: daily * CARBOHYDRATE_SHARE / KCAL_PER_GRAM_CARBOHYDRATE,
        }
    }
}

/// Targets from BMR, or the fixed defaults when BMR cannot be computed.
pub fn daily_targets(profile: &Profile) -> Targets {
    match profile.bmr() {
        Some(bmr) => Targets::from_daily_calories(bmr * ACTIVITY_FACTOR),
        None => Targets::DEFAULT,
    }
}

/// Share of total calories coming from each macro, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_pct: f64,
    pub fat_pct: f64,
    pub carbohydrate_pct: f64,
}

impl MacroSplit {
    pub fn from_totals(totals: &NutrientTotals) -> Self {
        let calories = totals.calories;
        if calories == 0.0 {
            return Self::default();
        }
        Self {
            protein_pct: totals.protein * KCAL_PER_GRAM_PROTEIN / calories * 100.0,
            fat_pct: totals.fat * KCAL_PER_GRAM_FAT / calories * 100.0,
            carbohydrate_pct: totals.carbohydrate * KCAL_PER_GRAM_CARBOHYDRATE / calories * 100.0,
        }
    }

    /// 100 minus the summed distance from the ideal split, floored at 0.
    pub fn balance_score(&self) -> f64 {
        let deviation = (self.protein_pct - IDEAL_PROTEIN_PCT).abs()
            + (self.fat_pct - IDEAL_FAT_PCT).abs()
            + (self.carbohydrate_pct - IDEAL_CARBOHYDRATE_PCT).abs();
        (100.0 - deviation).max(0.0)
    }
}
