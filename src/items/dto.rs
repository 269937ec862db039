use serde::{Deserialize, Serialize};

use super::model::Item;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub carbohydrate: Option<f64>,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
    #[serde(default)]
    pub cholesterol: Option<f64>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub health_benefits: Vec<String>,
    #[serde(default)]
    pub health_warnings: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<i32>,
}

impl ItemRequest {
    pub fn apply(self, item: &mut Item) {
        item.name = self.name.trim().to_string();
        item.description = self.description;
        item.price = self.price;
        item.cuisine = self.cuisine;
        item.flavor = self.flavor;
        item.calories = self.calories;
        item.protein = self.protein;
        item.fat = self.fat;
        item.carbohydrate = self.carbohydrate;
        item.fiber = self.fiber;
        item.sodium = self.sodium;
        item.cholesterol = self.cholesterol;
        item.ingredients = self.ingredients;
        item.allergens = self.allergens;
        item.dietary_tags = self.dietary_tags;
        item.health_benefits = self.health_benefits;
        item.health_warnings = self.health_warnings;
        item.rating = self.rating;
        item.review_count = self.review_count;
    }
}

#[derive(Debug, Serialize)]
pub struct ItemDetails {
    #[serde(flatten)]
    pub item: Item,
    pub nutrient_density: Option<f64>,
    pub is_healthy: Option<bool>,
}

impl From<Item> for ItemDetails {
    fn from(item: Item) -> Self {
        Self {
            nutrient_density: item.nutrient_density(),
            is_healthy: item.is_healthy(),
            item,
        }
    }
}
