//! # Body mass index
//!
//! ```notrust
//! BMI = W / H^2
//! ```
//!
//! where:
//!
//! - W - weight in kilograms;
//! - H - height in meters.
//!
//! The value is rounded to one decimal and the category is read from the
//! rounded value, so 18.46 is shown as 18.5 and classified as normal.

use std::ops::Range;

use profile::{MissingProfileData, ProfileField, UserProfile};
use tracing::debug;

/// Values outside this range are shown with an advisory warning.
pub const TYPICAL_BMI: Range<f64> = 15.0..50.0;
/// Range mapped onto the 0-100 display gauge.
pub const GAUGE_RANGE: Range<f64> = 15.0..40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn for_value(bmi: f64) -> Self {
        match bmi {
            bmi if bmi < 18.5 => Self::Underweight,
            bmi if bmi < 25.0 => Self::Normal,
            bmi if bmi < 30.0 => Self::Overweight,
            _ => Self::Obese,
        }
    }

    /// Band label as shown next to the value.
    pub const fn range(self) -> &'static str {
        match self {
            Self::Underweight => "< 18.5",
            Self::Normal => "18.5 - 24.9",
            Self::Overweight => "25.0 - 29.9",
            Self::Obese => ">= 30.0",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Underweight => "underweight",
            Self::Normal => "normal",
            Self::Overweight => "overweight",
            Self::Obese => "obese",
        };

        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BmiWarning {
    /// Below 15 or above 50, most likely a typo in weight or height
    Atypical,
}

impl std::fmt::Display for BmiWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Atypical => f.write_str(
                "atypical value detected, please check that your weight and height are correct",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BmiError {
    #[error("weight must be greater than zero, got {0} kg")]
    InvalidWeight(f64),
    #[error("height must be greater than zero, got {0} cm")]
    InvalidHeight(f64),
    #[error(transparent)]
    MissingProfileData(#[from] MissingProfileData),
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
    pub warning: Option<BmiWarning>,
}

impl Bmi {
    pub const REQUIRED_FIELDS: [ProfileField; 2] = [ProfileField::Height, ProfileField::Weight];

    pub fn from_profile(profile: &UserProfile) -> Result<Self, BmiError> {
        profile.require(&Self::REQUIRED_FIELDS)?;

        calculate_bmi(profile.weight_kg()?, profile.height_cm()?)
    }

    /// Position of the value on a 15-40 scale, in percent clamped to 0-100.
    pub fn gauge_percent(&self) -> f64 {
        let percent =
            (self.value - GAUGE_RANGE.start) / (GAUGE_RANGE.end - GAUGE_RANGE.start) * 100.0;

        percent.clamp(0.0, 100.0)
    }
}

/// Calculate BMI.
///
/// # Params
/// - `weight_kg` - weight of person in kilograms
/// - `height_cm` - height of person in centimeters
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<Bmi, BmiError> {
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        debug!(weight_kg, "rejected weight");
        return Err(BmiError::InvalidWeight(weight_kg));
    }

    if !(height_cm.is_finite() && height_cm > 0.0) {
        debug!(height_cm, "rejected height");
        return Err(BmiError::InvalidHeight(height_cm));
    }

    let height_m = height_cm / 100.0;
    let value = round_to_tenth(weight_kg / (height_m * height_m));

    let warning = match value < TYPICAL_BMI.start || value > TYPICAL_BMI.end {
        true => Some(BmiWarning::Atypical),
        false => None,
    };

    let bmi = Bmi {
        value,
        category: BmiCategory::for_value(value),
        warning,
    };

    debug!(?bmi, "bmi calculated");

    Ok(bmi)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
