use crate::profiles::model::Profile;

use super::assessment::{IntakeFlags, DIABETES, HYPERLIPIDEMIA, HYPERTENSION};

pub const CALORIE_EXCESS_ADVICE: &str =
    "Choose lower-calorie, high-fiber foods; control portion sizes; increase physical activity.";
pub const CALORIE_DEFICIT_ADVICE: &str =
    "Eat a little more; choose nutrient-dense foods; have smaller, more frequent meals.";
pub const PROTEIN_ADVICE: &str =
    "Protein: add lean meat, fish and legumes; include a protein source in every meal; consider a protein supplement.";
pub const BALANCE_ADVICE: &str =
    "Balance: combine the three macronutrients sensibly; diversify your diet; eat fewer processed foods.";
pub const DIABETES_ADVICE: &str =
    "Diabetes: control carbohydrate intake; prefer low-GI foods; eat at regular times.";
pub const HYPERTENSION_ADVICE: &str =
    "Hypertension: follow a low-sodium diet; increase potassium intake; manage your weight.";
pub const HYPERLIPIDEMIA_ADVICE: &str =
    "Hyperlipidemia: reduce saturated fat; add omega-3 fatty acids; eat more oats and other lipid-lowering foods.";
pub const WELL_BALANCED_ADVICE: &str =
    "Your nutrition intake is well balanced. Keep up the good eating habits.";

/// Guidance text in rule order. Has no influence on the health score.
pub fn advise(profile: &Profile, flags: &IntakeFlags) -> Vec<String> {
    let mut advice: Vec<&str> = Vec::new();

    if flags.calories_exceeded {
        advice.push(CALORIE_EXCESS_ADVICE);
    } else if flags.calories_under_target {
        advice.push(CALORIE_DEFICIT_ADVICE);
    }
    if !flags.protein_adequate {
        advice.push(PROTEIN_ADVICE);
    }
    if flags.poorly_balanced() {
        advice.push(BALANCE_ADVICE);
    }
    for disease in &profile.diseases {
        match disease.as_str() {
            DIABETES => advice.push(DIABETES_ADVICE),
            HYPERTENSION => advice.push(HYPERTENSION_ADVICE),
            HYPERLIPIDEMIA => advice.push(HYPERLIPIDEMIA_ADVICE),
            _ => {}
        }
    }

    if advice.is_empty() {
        advice.push(WELL_BALANCED_ADVICE);
    }
    advice.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> IntakeFlags {
        IntakeFlags {
            calories_exceeded: false,
            calories_under_target: false,
            protein_adequate: true,
            sodium_high: false,
            balance: 95.0,
        }
    }

    #[test]
    fn nothing_fired_gives_generic_message() {
        assert_eq!(advise(&Profile::new("p"), &flags()), vec![WELL_BALANCED_ADVICE]);
    }

    #[test]
    fn sodium_alone_does_not_produce_advice() {
        let f = IntakeFlags {
            sodium_high: true,
            ..flags()
        };
        assert_eq!(advise(&Profile::new("p"), &f), vec![WELL_BALANCED_ADVICE]);
    }

    #[test]
    fn excess_wins_over_deficit_branch() {
        let f = IntakeFlags {
            calories_exceeded: true,
            calories_under_target: true,
            ..flags()
        };
        assert_eq!(advise(&Profile::new("p"), &f), vec![CALORIE_EXCESS_ADVICE]);

        let f = IntakeFlags {
            calories_under_target: true,
            ..flags()
        };
        assert_eq!(advise(&Profile::new("p"), &f), vec![CALORIE_DEFICIT_ADVICE]);
    }

    #[test]
    fn rules_fire_in_order() {
        let mut profile = Profile::new("p");
        profile.diseases = vec![
            HYPERLIPIDEMIA.into(),
            "gout".into(),
            DIABETES.into(),
        ];
        let f = IntakeFlags {
            protein_adequate: false,
            balance: 40.0,
            ..flags()
        };
        assert_eq!(
            advise(&profile, &f),
            vec![
                PROTEIN_ADVICE,
                BALANCE_ADVICE,
                HYPERLIPIDEMIA_ADVICE,
                DIABETES_ADVICE
            ]
        );
    }
}
