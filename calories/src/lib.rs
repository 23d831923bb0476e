//! # Calories
//!
//! Daily energy needs and their split into macronutrients.
//!
//! Basal metabolic rate uses the Mifflin-St Jeor equation:
//!
//! ```notrust
//! BMR = 10 x weight(kg) + 6.25 x height(cm) - 5 x age(years) + s
//! ```
//!
//! where `s` is `+5` for men and `-5` for women. Total daily energy
//! expenditure (TDEE) scales BMR by a fixed activity factor:
//!
//! | level       | factor |
//! |-------------|--------|
//! | sedentary   | 1.2    |
//! | light       | 1.375  |
//! | moderate    | 1.55   |
//! | active      | 1.725  |
//! | very active | 1.9    |
//!
//! A light deficit or surplus is +/- 10% of TDEE.

mod macros;

pub use self::macros::*;

pub use profile::{ActivityLevel, MissingProfileData, ProfileField, Sex, UserProfile};

use tracing::debug;

const WEIGHT_COEF: f64 = 10.0;
const HEIGHT_COEF: f64 = 6.25;
const AGE_COEF: f64 = 5.0;
const MALE_OFFSET: f64 = 5.0;
const FEMALE_OFFSET: f64 = -5.0;

const DEFICIT_FACTOR: f64 = 0.9;
const SURPLUS_FACTOR: f64 = 1.1;

/// Below this TDEE the result is suspicious enough to point to a professional
pub const TDEE_LOW_KCAL: f64 = 1200.0;
/// Above this TDEE the input data is most likely wrong
pub const TDEE_HIGH_KCAL: f64 = 5000.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalorieError {
    #[error("{name} must be a positive number, got {value}")]
    InvalidInput { name: &'static str, value: f64 },
    #[error(transparent)]
    MissingProfileData(#[from] MissingProfileData),
}

/// Calculate BMR in kcal/day.
///
/// # Params
/// - `weight_kg` - body weight in kilograms
/// - `height_cm` - height in centimeters
/// - `age` - age in years
/// - `sex` - selects the sex specific offset
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: u8,
    sex: Sex,
) -> Result<f64, CalorieError> {
    positive("weight", weight_kg)?;
    positive("height", height_cm)?;
    positive("age", f64::from(age))?;

    let base = WEIGHT_COEF * weight_kg + HEIGHT_COEF * height_cm - AGE_COEF * f64::from(age);

    let bmr = match sex {
        Sex::Male => base + MALE_OFFSET,
        Sex::Female => base + FEMALE_OFFSET,
    };

    Ok(bmr)
}

#[inline]
pub const fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}

#[inline]
pub const fn calculate_tdee(bmr: f64, level: ActivityLevel) -> f64 {
    bmr * activity_factor(level)
}

#[inline]
pub const fn deficit_calories(tdee: f64) -> f64 {
    tdee * DEFICIT_FACTOR
}

#[inline]
pub const fn surplus_calories(tdee: f64) -> f64 {
    tdee * SURPLUS_FACTOR
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EnergyWarning {
    /// TDEE below [`TDEE_LOW_KCAL`]
    VeryLow,
    /// TDEE above [`TDEE_HIGH_KCAL`]
    VeryHigh,
}

impl EnergyWarning {
    pub fn for_tdee(tdee: f64) -> Option<Self> {
        if tdee < TDEE_LOW_KCAL {
            return Some(Self::VeryLow);
        }

        if tdee > TDEE_HIGH_KCAL {
            return Some(Self::VeryHigh);
        }

        None
    }
}

impl std::fmt::Display for EnergyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryLow => write!(
                f,
                "this result is very low (< {TDEE_LOW_KCAL} kcal), consult a professional"
            ),
            Self::VeryHigh => write!(
                f,
                "this result is very high (> {TDEE_HIGH_KCAL} kcal), check your data"
            ),
        }
    }
}

/// Maintenance energy and the light cut / bulk targets around it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyNeeds {
    pub bmr: f64,
    pub tdee: f64,
    pub deficit: f64,
    pub surplus: f64,
    pub activity_level: ActivityLevel,
    pub activity_factor: f64,
    pub warning: Option<EnergyWarning>,
}

impl EnergyNeeds {
    pub const REQUIRED_FIELDS: [ProfileField; 5] = [
        ProfileField::Height,
        ProfileField::Weight,
        ProfileField::Age,
        ProfileField::Gender,
        ProfileField::ActivityLevel,
    ];

    pub fn from_profile(profile: &UserProfile) -> Result<Self, CalorieError> {
        profile.require(&Self::REQUIRED_FIELDS)?;

        energy_needs(
            profile.weight_kg()?,
            profile.height_cm()?,
            profile.age_years()?,
            profile.sex()?,
            profile.activity_level()?,
        )
    }
}

pub fn energy_needs(
    weight_kg: f64,
    height_cm: f64,
    age: u8,
    sex: Sex,
    activity_level: ActivityLevel,
) -> Result<EnergyNeeds, CalorieError> {
    let bmr = calculate_bmr(weight_kg, height_cm, age, sex)?;
    let tdee = calculate_tdee(bmr, activity_level);
    let warning = EnergyWarning::for_tdee(tdee);

    debug!(bmr, tdee, %activity_level, ?warning, "energy needs calculated");

    Ok(EnergyNeeds {
        bmr,
        tdee,
        deficit: deficit_calories(tdee),
        surplus: surplus_calories(tdee),
        activity_level,
        activity_factor: activity_factor(activity_level),
        warning,
    })
}

fn positive(name: &'static str, value: f64) -> Result<f64, CalorieError> {
    match value.is_finite() && value > 0.0 {
        true => Ok(value),
        false => {
            debug!(name, value, "rejected energy input");
            Err(CalorieError::InvalidInput { name, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use profile::Gender;

    fn assert_close(expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn bmr_male() {
        let expected = 1648.75;

        let actual = calculate_bmr(70.0, 175.0, 30, Sex::Male).unwrap();

        assert_eq!(expected, actual);
    }

    #[test]
    fn bmr_female() {
        let expected = 1638.75;

        let actual = calculate_bmr(70.0, 175.0, 30, Sex::Female).unwrap();

        assert_eq!(expected, actual);
    }

    #[test]
    fn bmr_rejects_invalid_input() {
        assert_eq!(
            calculate_bmr(0.0, 175.0, 30, Sex::Male),
            Err(CalorieError::InvalidInput {
                name: "weight",
                value: 0.0
            })
        );
        assert!(calculate_bmr(70.0, -1.0, 30, Sex::Male).is_err());
        assert!(calculate_bmr(70.0, 175.0, 0, Sex::Male).is_err());
        assert!(calculate_bmr(f64::INFINITY, 175.0, 30, Sex::Male).is_err());
    }

    #[test]
    fn activity_factors_are_fixed() {
        let expected = [1.2, 1.375, 1.55, 1.725, 1.9];

        let actual = ActivityLevel::ALL.map(activity_factor);

        assert_eq!(expected, actual);
    }

    #[test]
    fn tdee_and_goals() {
        let tdee = calculate_tdee(1648.75, ActivityLevel::Moderate);

        assert_close(2555.5625, tdee);
        assert_close(2300.00625, deficit_calories(tdee));
        assert_close(2811.11875, surplus_calories(tdee));
    }

    #[test]
    fn tdee_warnings() {
        assert_eq!(EnergyWarning::for_tdee(1199.9), Some(EnergyWarning::VeryLow));
        assert_eq!(EnergyWarning::for_tdee(1200.0), None);
        assert_eq!(EnergyWarning::for_tdee(5000.0), None);
        assert_eq!(EnergyWarning::for_tdee(5000.1), Some(EnergyWarning::VeryHigh));
    }

    #[test]
    fn needs_from_profile() {
        let profile = UserProfile {
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            age_years: Some(30),
            gender: Gender::Male,
            activity_level: Some(ActivityLevel::Sedentary),
            custom_stride_length_m: None,
        };

        let needs = EnergyNeeds::from_profile(&profile).unwrap();

        assert_eq!(needs.bmr, 1648.75);
        assert_close(1978.5, needs.tdee);
        assert_eq!(needs.activity_factor, 1.2);
        assert_eq!(needs.warning, None);
    }

    #[test]
    fn needs_report_missing_fields() {
        let profile = UserProfile {
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            ..Default::default()
        };

        let Err(CalorieError::MissingProfileData(missing)) = EnergyNeeds::from_profile(&profile)
        else {
            panic!("expected missing profile data");
        };

        assert_eq!(
            missing.fields(),
            &[
                ProfileField::Age,
                ProfileField::Gender,
                ProfileField::ActivityLevel
            ]
        );
    }

    #[test]
    fn small_person_gets_low_warning() {
        let needs = energy_needs(40.0, 150.0, 80, Sex::Female, ActivityLevel::Sedentary).unwrap();

        // 400 + 937.5 - 400 - 5 = 932.5
        assert_eq!(needs.bmr, 932.5);
        assert_eq!(needs.warning, Some(EnergyWarning::VeryLow));
    }
}
