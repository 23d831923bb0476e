//! # Daily water intake
//!
//! ```notrust
//! water_ml = 35 x W + activity + weather
//! ```
//!
//! where:
//!
//! - W - weight in kilograms;
//! - activity - extra water for the activity level, see [`activity_adjustment_ml`];
//! - weather - 500 ml on hot days.

use profile::{ActivityLevel, MissingProfileData, UserProfile};
use tracing::debug;

pub const ML_PER_KG: f64 = 35.0;
pub const HOT_WEATHER_ML: f64 = 500.0;
/// Above this total the plan carries an overhydration warning.
pub const OVERHYDRATION_ML: f64 = 6000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum HydrationWarning {
    /// More than 6 L a day, risk of hyponatremia
    Overhydration,
}

impl std::fmt::Display for HydrationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overhydration => f.write_str(
                "more than 6 L a day, overhydration can be dangerous (hyponatremia)",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HydrationError {
    #[error("weight must be greater than zero, got {0} kg")]
    InvalidWeight(f64),
    #[error(transparent)]
    MissingProfileData(#[from] MissingProfileData),
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HydrationPlan {
    pub base_ml: f64,
    pub activity_ml: f64,
    pub weather_ml: f64,
    pub total_ml: f64,
    pub warning: Option<HydrationWarning>,
}

impl HydrationPlan {
    pub fn total_liters(&self) -> f64 {
        self.total_ml / 1000.0
    }

    /// Only weight is required, an unknown activity level adds nothing.
    pub fn from_profile(profile: &UserProfile, hot_weather: bool) -> Result<Self, HydrationError> {
        daily_water_intake(
            profile.weight_kg()?,
            profile.activity_level().ok(),
            hot_weather,
        )
    }
}

pub const fn activity_adjustment_ml(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 0.0,
        ActivityLevel::Light => 250.0,
        ActivityLevel::Moderate => 500.0,
        ActivityLevel::Active => 750.0,
        ActivityLevel::VeryActive => 1000.0,
    }
}

/// Calculate recommended water intake for a day.
///
/// # Params
/// - `weight_kg` - weight of person in kilograms
/// - `activity` - activity level, `None` when unknown
/// - `hot_weather` - whether the day is hot
pub fn daily_water_intake(
    weight_kg: f64,
    activity: Option<ActivityLevel>,
    hot_weather: bool,
) -> Result<HydrationPlan, HydrationError> {
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        debug!(weight_kg, "rejected weight");
        return Err(HydrationError::InvalidWeight(weight_kg));
    }

    let base_ml = weight_kg * ML_PER_KG;
    let activity_ml = activity.map_or(0.0, activity_adjustment_ml);
    let weather_ml = match hot_weather {
        true => HOT_WEATHER_ML,
        false => 0.0,
    };
    let total_ml = base_ml + activity_ml + weather_ml;

    let warning = (total_ml > OVERHYDRATION_ML).then_some(HydrationWarning::Overhydration);

    let plan = HydrationPlan {
        base_ml,
        activity_ml,
        weather_ml,
        total_ml,
        warning,
    };

    debug!(?plan, "water intake calculated");

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_intake() {
        let expected = HydrationPlan {
            base_ml: 2450.0,
            activity_ml: 0.0,
            weather_ml: 0.0,
            total_ml: 2450.0,
            warning: None,
        };

        let actual = daily_water_intake(70.0, None, false).unwrap();

        assert_eq!(expected, actual);
        assert_eq!(actual.total_liters(), 2.45);
    }

    #[test]
    fn activity_and_weather() {
        let actual = daily_water_intake(70.0, Some(ActivityLevel::Moderate), true).unwrap();

        assert_eq!(actual.activity_ml, 500.0);
        assert_eq!(actual.weather_ml, 500.0);
        assert_eq!(actual.total_ml, 3450.0);
    }

    #[test]
    fn adjustments_grow_with_activity() {
        let expected = [0.0, 250.0, 500.0, 750.0, 1000.0];

        let actual = ActivityLevel::ALL.map(activity_adjustment_ml);

        assert_eq!(expected, actual);
    }

    #[test]
    fn overhydration_warning() {
        // 150 x 35 + 1000 = 6250
        let high = daily_water_intake(150.0, Some(ActivityLevel::VeryActive), false).unwrap();
        // 160 x 35 = 5600 + 500 = 6100
        let hot = daily_water_intake(160.0, None, true).unwrap();
        let exact = daily_water_intake(160.0, Some(ActivityLevel::Light), false).unwrap();

        assert_eq!(high.warning, Some(HydrationWarning::Overhydration));
        assert_eq!(hot.warning, Some(HydrationWarning::Overhydration));
        assert_eq!(exact.total_ml, 5850.0);
        assert_eq!(exact.warning, None);
    }

    #[test]
    fn weight_is_required() {
        assert_eq!(
            daily_water_intake(0.0, None, false),
            Err(HydrationError::InvalidWeight(0.0))
        );
        assert!(matches!(
            HydrationPlan::from_profile(&UserProfile::default(), false),
            Err(HydrationError::MissingProfileData(_))
        ));
    }

    #[test]
    fn activity_from_profile_is_optional() {
        let profile = UserProfile {
            weight_kg: Some(60.0),
            ..Default::default()
        };

        let actual = HydrationPlan::from_profile(&profile, false).unwrap();

        assert_eq!(actual.total_ml, 2100.0);
    }
}
