//! Calories burnt walking, after the ACSM walking equation:
//!
//! ```notrust
//! VO2 = 0.1 x S + 1.8 x S x G + 3.5
//! ```
//!
//! where:
//!
//! - VO2 - oxygen consumption in ml/kg/min;
//! - S - speed in m/min;
//! - G - grade as a fraction (5% incline is 0.05).
//!
//! One liter of oxygen burns about 5 kcal, so `kcal/min = VO2 x weight / 200`.

use std::ops::RangeInclusive;

use profile::UserProfile;
use tracing::debug;

use crate::{Distance, StepsError};

/// Resting oxygen consumption, ml/kg/min
const RESTING_VO2: f64 = 3.5;
const HORIZONTAL_COEF: f64 = 0.1;
const VERTICAL_COEF: f64 = 1.8;
/// ml O2/kg/min x kg to kcal/min
const VO2_TO_KCAL_DIVISOR: f64 = 200.0;

/// Accepted treadmill incline, percent. Downhill walking is out of the
/// equation's range.
pub const INCLINE_PCT: RangeInclusive<f64> = 0.0..=30.0;

/// How fast the walk went. Exactly one of duration or speed is known.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "mode", rename_all = "snake_case")
)]
pub enum Intensity {
    Duration { minutes: f64 },
    Speed { kmh: f64 },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkingInput {
    pub distance: Distance,
    pub weight_kg: f64,
    /// Incline in percent, 0 when flat
    pub incline_pct: f64,
    pub intensity: Intensity,
}

impl WalkingInput {
    pub const fn new(distance: Distance, weight_kg: f64, intensity: Intensity) -> Self {
        Self {
            distance,
            weight_kg,
            incline_pct: 0.0,
            intensity,
        }
    }

    pub fn from_profile(
        profile: &UserProfile,
        distance: Distance,
        intensity: Intensity,
    ) -> Result<Self, StepsError> {
        Ok(Self::new(distance, profile.weight_kg()?, intensity))
    }

    pub const fn set_incline_pct(mut self, incline_pct: f64) -> Self {
        self.incline_pct = incline_pct;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkingCalories {
    pub kcal_total: f64,
    pub kcal_per_min: f64,
    pub speed_kmh: f64,
    pub duration_min: f64,
}

/// Oxygen consumption in ml/kg/min.
///
/// # Params
/// - `speed_m_per_min` - walking speed in meters per minute
/// - `grade` - incline as a fraction
#[inline]
pub const fn acsm_walking_vo2(speed_m_per_min: f64, grade: f64) -> f64 {
    HORIZONTAL_COEF * speed_m_per_min + VERTICAL_COEF * speed_m_per_min * grade + RESTING_VO2
}

#[inline]
pub const fn kcal_per_minute(vo2: f64, weight_kg: f64) -> f64 {
    vo2 * weight_kg / VO2_TO_KCAL_DIVISOR
}

pub fn walking_calories(input: &WalkingInput) -> Result<WalkingCalories, StepsError> {
    let WalkingInput {
        distance,
        weight_kg,
        incline_pct,
        intensity,
    } = *input;

    if !distance.is_positive() {
        return Err(StepsError::InvalidDistance(distance.as_meters()));
    }

    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return Err(StepsError::InvalidWeight(weight_kg));
    }

    if !INCLINE_PCT.contains(&incline_pct) {
        return Err(StepsError::InvalidIncline(incline_pct));
    }

    let (speed_kmh, duration_min) = match intensity {
        Intensity::Duration { minutes } => {
            if !(minutes.is_finite() && minutes > 0.0) {
                return Err(StepsError::InvalidDuration(minutes));
            }

            (distance.as_kilometers() / (minutes / 60.0), minutes)
        }
        Intensity::Speed { kmh } => {
            if !(kmh.is_finite() && kmh > 0.0) {
                return Err(StepsError::InvalidSpeed(kmh));
            }

            (kmh, distance.as_kilometers() / kmh * 60.0)
        }
    };

    let speed_m_per_min = speed_kmh * 1000.0 / 60.0;
    let vo2 = acsm_walking_vo2(speed_m_per_min, incline_pct / 100.0);
    let kcal_per_min = kcal_per_minute(vo2, weight_kg);

    let result = WalkingCalories {
        kcal_total: kcal_per_min * duration_min,
        kcal_per_min,
        speed_kmh,
        duration_min,
    };

    debug!(vo2, ?result, "walking calories calculated");

    Ok(result)
}
