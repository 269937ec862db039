use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A dish or food item from the catalog. Nutrients are per 100 g; `None` means unknown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub cuisine: Option<String>,
    pub flavor: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub cholesterol: Option<f64>,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub dietary_tags: Vec<String>,
    /// Diseases this item is considered good for.
    pub health_benefits: Vec<String>,
    /// Diseases this item must not be recommended for.
    pub health_warnings: Vec<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            price: None,
            cuisine: None,
            flavor: None,
            calories: None,
            protein: None,
            fat: None,
            carbohydrate: None,
            fiber: None,
            sodium: None,
            cholesterol: None,
            ingredients: Vec::new(),
            allergens: Vec::new(),
            dietary_tags: Vec::new(),
            health_benefits: Vec::new(),
            health_warnings: Vec::new(),
            rating: None,
            review_count: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Grams of protein per 100 kcal.
    pub fn nutrient_density(&self) -> Option<f64> {
        match (self.protein, self.calories) {
            (Some(protein), Some(calories)) if calories > 0.0 => Some(protein / calories * 100.0),
            _ => None,
        }
    }

    /// Low calorie, high protein, low fat. Unknown calories give no verdict.
    pub fn is_healthy(&self) -> Option<bool> {
        let calories = self.calories?;
        let high_protein = self.protein.is_some_and(|p| p > 15.0);
        let low_fat = self.fat.is_some_and(|f| f < 10.0);
        Some(calories < 200.0 && high_protein && low_fat)
    }
}
