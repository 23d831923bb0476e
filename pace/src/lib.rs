//! # Pace
//!
//! Conversions between distance, elapsed time, pace and speed:
//!
//! ```notrust
//! pace  = time / distance          (s/km)
//! speed = 3600 * distance / time   (km/h)
//! time  = distance * pace
//! distance = time / pace
//! ```
//!
//! [`calculate_pace`], [`calculate_time`] and [`calculate_distance`] do no
//! validation. Use [`PaceProblem::solve`] for user input: it rejects zero and
//! negative values before any division happens.

mod time;

pub use self::time::*;

use tracing::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaceError {
    #[error("distance must be a positive number of kilometers, got {0}")]
    InvalidDistance(f64),
    #[error("time must be greater than zero")]
    InvalidTime,
    #[error("pace must be greater than zero")]
    InvalidPace,
    #[error("{}:{:02}:{:02} is too long", .0.hours, .0.minutes, .0.seconds)]
    Overflow(TimeDuration),
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaceResult {
    pub pace_seconds_per_km: f64,
    pub speed_kmh: f64,
}

impl PaceResult {
    /// Pace per kilometer rounded to whole seconds, e.g. `5:00`
    pub fn pace(&self) -> TimeDuration {
        TimeDuration::from_secs_f64(self.pace_seconds_per_km)
    }
}

#[inline]
pub fn calculate_pace(distance_km: f64, time_seconds: f64) -> PaceResult {
    PaceResult {
        pace_seconds_per_km: time_seconds / distance_km,
        speed_kmh: 3600.0 * distance_km / time_seconds,
    }
}

/// Total time in seconds to cover `distance_km` at the given pace.
#[inline]
pub fn calculate_time(distance_km: f64, pace_seconds_per_km: f64) -> f64 {
    distance_km * pace_seconds_per_km
}

/// Distance in kilometers covered in `time_seconds` at the given pace.
#[inline]
pub fn calculate_distance(time_seconds: f64, pace_seconds_per_km: f64) -> f64 {
    time_seconds / pace_seconds_per_km
}

/// One of the three questions a runner asks, two knowns and one unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "mode", rename_all = "snake_case")
)]
pub enum PaceProblem {
    Pace { distance_km: f64, time: TimeDuration },
    Time { distance_km: f64, pace: TimeDuration },
    Distance { time: TimeDuration, pace: TimeDuration },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "mode", rename_all = "snake_case")
)]
pub enum PaceSolution {
    Pace(PaceResult),
    Time {
        total_seconds: f64,
        time: TimeDuration,
    },
    Distance {
        distance_km: f64,
    },
}

impl PaceProblem {
    pub fn solve(&self) -> Result<PaceSolution, PaceError> {
        let solution = match *self {
            Self::Pace { distance_km, time } => {
                let distance_km = check_distance(distance_km)?;
                let time = check_time(time)?;

                PaceSolution::Pace(calculate_pace(distance_km, time))
            }
            Self::Time { distance_km, pace } => {
                let distance_km = check_distance(distance_km)?;
                let pace = check_pace(pace)?;
                let total_seconds = calculate_time(distance_km, pace);

                PaceSolution::Time {
                    total_seconds,
                    time: TimeDuration::from_secs_f64(total_seconds),
                }
            }
            Self::Distance { time, pace } => {
                let time = check_time(time)?;
                let pace = check_pace(pace)?;

                PaceSolution::Distance {
                    distance_km: calculate_distance(time, pace),
                }
            }
        };

        debug!(problem = ?self, ?solution, "pace problem solved");

        Ok(solution)
    }
}

fn check_distance(distance_km: f64) -> Result<f64, PaceError> {
    match distance_km.is_finite() && distance_km > 0.0 {
        true => Ok(distance_km),
        false => {
            debug!(distance_km, "rejected distance");
            Err(PaceError::InvalidDistance(distance_km))
        }
    }
}

fn check_time(time: TimeDuration) -> Result<f64, PaceError> {
    match time.checked_total_seconds() {
        Some(0) => Err(PaceError::InvalidTime),
        Some(total) => Ok(total as f64),
        None => {
            debug!(?time, "rejected time");
            Err(PaceError::Overflow(time))
        }
    }
}

fn check_pace(pace: TimeDuration) -> Result<f64, PaceError> {
    match pace.checked_total_seconds() {
        Some(0) => Err(PaceError::InvalidPace),
        Some(total) => Ok(total as f64),
        None => {
            debug!(?pace, "rejected pace");
            Err(PaceError::Overflow(pace))
        }
    }
}
