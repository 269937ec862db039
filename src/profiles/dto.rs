use serde::{Deserialize, Serialize};

use super::model::Profile;

/// Body for both create and full update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub diseases: Vec<String>,
    #[serde(default)]
    pub preferred_cuisines: Vec<String>,
    #[serde(default)]
    pub preferred_flavors: Vec<String>,
    #[serde(default)]
    pub preferred_ingredients: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

impl ProfileRequest {
    /// Copies every field onto `profile`, leaving id and creation time alone.
    pub fn apply(self, profile: &mut Profile) {
        profile.name = self.name.trim().to_string();
        profile.email = self.email;
        profile.weight_kg = self.weight_kg;
        profile.height_cm = self.height_cm;
        profile.age = self.age;
        profile.sex = self.sex;
        profile.diseases = self.diseases;
        profile.preferred_cuisines = self.preferred_cuisines;
        profile.preferred_flavors = self.preferred_flavors;
        profile.preferred_ingredients = self.preferred_ingredients;
        profile.allergies = self.allergies;
        profile.dietary_restrictions = self.dietary_restrictions;
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileMetrics {
    pub bmi: f64,
    /// `None` without age and a recognised sex.
    pub bmr: Option<f64>,
    pub recommended_calories: Option<f64>,
}
