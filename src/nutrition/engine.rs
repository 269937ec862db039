use time::{Date, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::items::model::Item;
use crate::profiles::model::Profile;

use super::advisory::advise;
use super::aggregate::aggregate;
use super::assessment::{assess, IntakeFlags};
use super::model::NutritionReport;
use super::targets::{daily_targets, MacroSplit};

/// Runs the whole nutrition pass for one day. `report_id` lets a regenerated
/// report keep the identity of the one it replaces.
pub fn analyze(
    profile: &Profile,
    consumed: &[Item],
    report_id: Uuid,
    report_date: Date,
    generated_at: OffsetDateTime,
) -> NutritionReport {
    let totals = aggregate(consumed);
    let targets = daily_targets(profile);
    let macros = MacroSplit::from_totals(&totals);
    let flags = IntakeFlags::evaluate(&totals, &targets, &macros);
    debug!(profile_id = %profile.id, ?totals, ?targets, ?flags, "intake evaluated");

    let assessment = assess(profile, &totals, &targets, &flags);
    let recommendations = advise(profile, &flags);

    NutritionReport {
        id: report_id,
        profile_id: profile.id,
        report_date,
        generated_at,
        totals,
        targets,
        macros,
        health_status: assessment.status,
        health_score: assessment.score,
        recommendations,
        warnings: assessment.warnings,
        included_items: consumed.iter().map(|i| i.name.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::assessment::HealthStatus;
    use crate::profiles::model::adult_male;
    use time::macros::date;

    fn meal(name: &str, calories: f64, protein: f64, fat: f64, carbohydrate: f64) -> Item {
        let mut item = Item::new(name);
        item.calories = Some(calories);
        item.protein = Some(protein);
        item.fat = Some(fat);
        item.carbohydrate = Some(carbohydrate);
        item.sodium = Some(400.0);
        item
    }

    fn day() -> Vec<Item> {
        vec![
            meal("oatmeal", 600.0, 30.0, 18.0, 80.0),
            meal("chicken rice", 900.0, 55.0, 28.0, 110.0),
            meal("salmon bowl", 800.0, 50.0, 26.0, 95.0),
        ]
    }

    #[test]
    fn report_carries_targets_and_items() {
        let profile = adult_male();
        let id = Uuid::new_v4();
        let report = analyze(&profile, &day(), id, date!(2024 - 03 - 01), OffsetDateTime::UNIX_EPOCH);

        assert_eq!(report.id, id);
        assert_eq!(report.totals.calories, 2300.0);
        assert!((report.targets.calories - 2543.5005).abs() < 0.01);
        assert_eq!(
            report.included_items,
            vec!["oatmeal", "chicken rice", "salmon bowl"]
        );
        assert!((0..=100).contains(&report.health_score));
    }

    #[test]
    fn identical_inputs_give_identical_reports() {
        let profile = adult_male();
        let id = Uuid::new_v4();
        let d = date!(2024 - 03 - 01);
        let a = analyze(&profile, &day(), id, d, OffsetDateTime::UNIX_EPOCH);
        let b = analyze(&profile, &day(), id, d, OffsetDateTime::UNIX_EPOCH);
        assert_eq!(a, b);
    }

    #[test]
    fn reordered_items_give_identical_totals() {
        let profile = adult_male();
        let mut reversed = day();
        reversed.reverse();
        let d = date!(2024 - 03 - 01);
        let a = analyze(&profile, &day(), Uuid::nil(), d, OffsetDateTime::UNIX_EPOCH);
        let b = analyze(&profile, &reversed, Uuid::nil(), d, OffsetDateTime::UNIX_EPOCH);
        assert_eq!(a.totals, b.totals);
        assert_eq!(a.health_score, b.health_score);
    }

    #[test]
    fn overeating_against_default_targets() {
        let profile = crate::profiles::model::Profile::new("no metrics");
        let items = vec![
            meal("a", 1250.0, 70.0, 38.0, 172.0),
            meal("b", 1250.0, 70.0, 38.0, 172.0),
        ];
        let report = analyze(&profile, &items, Uuid::nil(), date!(2024 - 03 - 01), OffsetDateTime::UNIX_EPOCH);
        assert!(report.calories_exceeded());
        assert!(report.protein_adequate());
        assert_eq!(report.health_score, 80);
        assert_eq!(report.health_status, HealthStatus::Healthy);
    }
}
