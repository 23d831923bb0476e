use profile::{ProfileStore, ProfileUpdate, UserProfile};
use tracing::debug;

use crate::{Distance, StepsError};

/// Stride length as a share of height
pub const STRIDE_HEIGHT_RATIO: f64 = 0.413;

/// Stride length in meters estimated from height.
///
/// # Params
/// - `height_cm` - height of person in centimeters
#[inline]
pub const fn estimate_stride(height_cm: f64) -> f64 {
    height_cm * STRIDE_HEIGHT_RATIO / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StrideSource {
    Calibrated,
    Estimated,
}

/// Stride length in use, always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stride {
    length_m: f64,
    source: StrideSource,
}

impl Stride {
    pub fn new(length_m: f64, source: StrideSource) -> Result<Self, StepsError> {
        match length_m.is_finite() && length_m > 0.0 {
            true => Ok(Self { length_m, source }),
            false => Err(StepsError::InvalidStride(length_m)),
        }
    }

    /// A calibrated stride always wins over the height estimate.
    pub fn from_profile(profile: &UserProfile) -> Result<Self, StepsError> {
        if let Some(length_m) = profile.custom_stride_length_m() {
            return Self::new(length_m, StrideSource::Calibrated);
        }

        Self::new(estimate_stride(profile.height_cm()?), StrideSource::Estimated)
    }

    pub const fn length_m(self) -> f64 {
        self.length_m
    }

    pub const fn source(self) -> StrideSource {
        self.source
    }

    pub const fn is_calibrated(self) -> bool {
        matches!(self.source, StrideSource::Calibrated)
    }

    pub fn steps_for(self, distance: Distance) -> Result<u64, StepsError> {
        match distance.is_positive() {
            true => Ok(crate::distance_to_steps(distance, self.length_m)),
            false => Err(StepsError::InvalidDistance(distance.as_meters())),
        }
    }

    pub fn distance_for(self, steps: u64) -> Result<Distance, StepsError> {
        match steps {
            0 => Err(StepsError::InvalidSteps),
            steps => Ok(crate::steps_to_distance(steps, self.length_m)),
        }
    }
}

/// Stride measured over a known distance.
///
/// # Params
/// - `distance_m` - real walked distance in meters
/// - `steps` - steps counted over that distance
pub fn calibrate_stride(distance_m: f64, steps: u64) -> Result<f64, StepsError> {
    if !(distance_m.is_finite() && distance_m > 0.0) {
        return Err(StepsError::InvalidDistance(distance_m));
    }

    if steps == 0 {
        return Err(StepsError::InvalidSteps);
    }

    Ok(distance_m / steps as f64)
}

#[derive(Debug, thiserror::Error)]
pub enum CalibrationError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Invalid(#[from] StepsError),
    #[error("failed to store stride calibration: {0}")]
    Store(#[source] E),
}

/// Calibrate and persist the stride, replacing any previous calibration.
/// Returns the new stride in meters.
pub fn save_calibration<S: ProfileStore>(
    store: &mut S,
    distance_m: f64,
    steps: u64,
) -> Result<f64, CalibrationError<S::Error>> {
    let stride_m = calibrate_stride(distance_m, steps)?;

    store
        .update_user(ProfileUpdate::stride(Some(stride_m)))
        .map_err(CalibrationError::Store)?;

    debug!(distance_m, steps, stride_m, "stride calibrated");

    Ok(stride_m)
}

/// Drop the calibration, going back to the height estimate.
pub fn reset_calibration<S: ProfileStore>(store: &mut S) -> Result<(), S::Error> {
    store.update_user(ProfileUpdate::stride(None))?;

    debug!("stride calibration reset");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use profile::{MemoryProfileStore, ProfileField};

    fn profile(height_cm: Option<f64>, stride: Option<f64>) -> UserProfile {
        UserProfile {
            height_cm,
            custom_stride_length_m: stride,
            ..Default::default()
        }
    }

    #[test]
    fn stride_from_height() {
        let expected = 0.72275;

        let actual = estimate_stride(175.0);

        assert!((expected - actual).abs() < 1e-12);
    }

    #[test]
    fn calibrated_stride_wins() {
        let stride = Stride::from_profile(&profile(Some(175.0), Some(0.8))).unwrap();

        assert_eq!(stride.length_m(), 0.8);
        assert!(stride.is_calibrated());
    }

    #[test]
    fn estimated_stride_without_calibration() {
        let stride = Stride::from_profile(&profile(Some(175.0), None)).unwrap();

        assert_eq!(stride.source(), StrideSource::Estimated);
        assert_eq!(stride.length_m(), estimate_stride(175.0));
    }

    #[test]
    fn calibration_without_height_is_enough() {
        assert!(Stride::from_profile(&profile(None, Some(0.7))).is_ok());
    }

    #[test]
    fn no_height_no_stride() {
        let Err(StepsError::MissingProfileData(missing)) =
            Stride::from_profile(&profile(None, None))
        else {
            panic!("expected missing height");
        };

        assert_eq!(missing.fields(), &[ProfileField::Height]);
    }

    #[test]
    fn stride_steps_and_distance() {
        let stride = Stride::new(0.75, StrideSource::Calibrated).unwrap();

        assert_eq!(stride.steps_for(Distance::from_kilometers(1.5)), Ok(2000));
        assert_eq!(
            stride.steps_for(Distance::from_kilometers(0.0)),
            Err(StepsError::InvalidDistance(0.0))
        );
        assert_eq!(stride.distance_for(2000), Ok(Distance::from_meters(1500.0)));
        assert_eq!(stride.distance_for(0), Err(StepsError::InvalidSteps));
    }

    #[test]
    fn calibrate() {
        assert_eq!(calibrate_stride(100.0, 125), Ok(0.8));
        assert_eq!(calibrate_stride(100.0, 0), Err(StepsError::InvalidSteps));
        assert_eq!(
            calibrate_stride(-5.0, 10),
            Err(StepsError::InvalidDistance(-5.0))
        );
    }

    #[test]
    fn save_and_reset_calibration() {
        let mut store = MemoryProfileStore::new(profile(Some(175.0), Some(0.9)));

        let stride_m = save_calibration(&mut store, 100.0, 125).unwrap();

        assert_eq!(stride_m, 0.8);
        assert_eq!(store.profile().custom_stride_length_m, Some(0.8));

        reset_calibration(&mut store).unwrap();

        assert_eq!(store.profile().custom_stride_length_m, None);
        assert_eq!(
            Stride::from_profile(store.profile()).unwrap().source(),
            StrideSource::Estimated
        );
    }

    #[test]
    fn invalid_calibration_keeps_previous_value() {
        let mut store = MemoryProfileStore::new(profile(Some(175.0), Some(0.9)));

        let result = save_calibration(&mut store, 100.0, 0);

        assert!(matches!(
            result,
            Err(CalibrationError::Invalid(StepsError::InvalidSteps))
        ));
        assert_eq!(store.profile().custom_stride_length_m, Some(0.9));
    }
}
