//! # Steps and stride
//!
//! Stride length is either calibrated by the user over a known distance or
//! estimated from height as `height x 0.413`. Steps and distance convert
//! through the stride in use:
//!
//! ```notrust
//! steps = round(distance_m / stride_m)
//! distance_m = steps x stride_m
//! ```

mod distance;
mod stride;
mod walking;

pub use distance::*;
pub use profile::{MissingProfileData, ProfileStore, UserProfile};
pub use stride::*;
pub use walking::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StepsError {
    #[error("distance must be greater than zero, got {0} m")]
    InvalidDistance(f64),
    #[error("stride length must be greater than zero, got {0} m")]
    InvalidStride(f64),
    #[error("step count must be greater than zero")]
    InvalidSteps,
    #[error("weight must be greater than zero, got {0} kg")]
    InvalidWeight(f64),
    #[error("duration must be greater than zero, got {0} min")]
    InvalidDuration(f64),
    #[error("speed must be greater than zero, got {0} km/h")]
    InvalidSpeed(f64),
    #[error(
        "incline must be between {min} and {max} %, got {0}",
        min = INCLINE_PCT.start(),
        max = INCLINE_PCT.end()
    )]
    InvalidIncline(f64),
    #[error(transparent)]
    MissingProfileData(#[from] MissingProfileData),
}

/// Number of steps needed to cover `distance`.
///
/// # Params
/// - `distance` - distance to walk
/// - `stride_m` - stride length in meters
#[inline]
pub fn distance_to_steps(distance: Distance, stride_m: f64) -> u64 {
    (distance.as_meters() / stride_m).round() as u64
}

/// Distance covered by `steps`.
///
/// # Params
/// - `steps` - number of steps
/// - `stride_m` - stride length in meters
#[inline]
pub fn steps_to_distance(steps: u64, stride_m: f64) -> Distance {
    Distance::from_meters(steps as f64 * stride_m)
}
