use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Biological sex as understood by the BMR formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Recognizes `"M"` / `"F"` in any case; anything else is unknown.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("m") {
            Some(Sex::Male)
        } else if token.eq_ignore_ascii_case("f") {
            Some(Sex::Female)
        } else {
            None
        }
    }
}

/// Health profile of a person receiving recommendations and reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i32>,
    pub sex: Option<String>,
    pub diseases: Vec<String>,
    pub preferred_cuisines: Vec<String>,
    pub preferred_flavors: Vec<String>,
    pub preferred_ingredients: Vec<String>,
    pub allergies: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            weight_kg: None,
            height_cm: None,
            age: None,
            sex: None,
            diseases: Vec::new(),
            preferred_cuisines: Vec::new(),
            preferred_flavors: Vec::new(),
            preferred_ingredients: Vec::new(),
            allergies: Vec::new(),
            dietary_restrictions: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Height in cm, only when it is usable as a divisor.
    fn valid_height(&self) -> Option<f64> {
        self.height_cm.filter(|h| *h > 0.0)
    }

    pub fn bmi(&self) -> Option<f64> {
        let weight = self.weight_kg?;
        let height_m = self.valid_height()? / 100.0;
        Some(weight / height_m.powi(2))
    }

    /// Simplified Harris-Benedict basal metabolic rate, kcal/day.
    pub fn bmr(&self) -> Option<f64> {
        let weight = self.weight_kg?;
        let height = self.valid_height()?;
        let age = f64::from(self.age?);
        match Sex::from_token(self.sex.as_deref()?)? {
            Sex::Male => Some(88.362 + (13.397 * weight) + (4.799 * height) - (5.677 * age)),
            Sex::Female => Some(447.593 + (9.247 * weight) + (3.098 * height) - (4.330 * age)),
        }
    }
}

#[cfg(test)]
pub(crate) fn adult_male() -> Profile {
    Profile {
        weight_kg: Some(70.0),
        height_cm: Some(175.0),
        age: Some(30),
        sex: Some("M".into()),
        ..Profile::new("test")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmr_for_reference_male() {
        let bmr = adult_male().bmr().expect("bmr defined");
        assert!((bmr - 1695.667).abs() < 0.01, "bmr = {bmr}");
    }

    #[test]
    fn bmr_for_female_and_lowercase_token() {
        let p = Profile {
            weight_kg: Some(60.0),
            height_cm: Some(165.0),
            age: Some(40),
            sex: Some("f".into()),
            ..Profile::new("f")
        };
        let expected = 447.593 + 9.247 * 60.0 + 3.098 * 165.0 - 4.330 * 40.0;
        assert_eq!(p.bmr(), Some(expected));
    }

    #[test]
    fn bmr_undefined_for_unknown_sex_or_missing_age() {
        let mut p = adult_male();
        p.sex = Some("other".into());
        assert_eq!(p.bmr(), None);

        let mut p = adult_male();
        p.age = None;
        assert_eq!(p.bmr(), None);
    }

    #[test]
    fn non_positive_height_makes_metrics_undefined() {
        let mut p = adult_male();
        p.height_cm = Some(0.0);
        assert_eq!(p.bmi(), None);
        assert_eq!(p.bmr(), None);
    }

    #[test]
    fn bmi_uses_meters() {
        let bmi = adult_male().bmi().unwrap();
        assert!((bmi - 22.857).abs() < 0.001);
    }
}
