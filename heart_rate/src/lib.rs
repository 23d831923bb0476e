//! # Cardio zones
//!
//! - MHR - maximum heart rate
//!
//! MHR is either measured or estimated from age as `220 - age`.
//!
//! Target zones, as a share of MHR:
//!
//! - Z1 Warm up(Very light) - `0.5-0.6`
//! - Z2 Fat burn(Light) - `0.6-0.7`
//! - Z3 Aerobic(Moderate) - `0.7-0.8`
//! - Z4 Anaerobic(Hard) - `0.8-0.9`
//! - Z5 VO2 Max(Max) - `0.9-1.0`
//!
//! Bounds are rounded to the nearest beat, so neighbouring zones share their
//! boundary value.

use std::ops::RangeInclusive;

use profile::{MissingProfileData, ProfileField, UserProfile};
use tracing::debug;

/// Measured MHR outside this range is flagged but still used.
pub const TYPICAL_MEASURED_BPM: RangeInclusive<u16> = 120..=230;
/// Measured MHR outside this range is rejected.
pub const PLAUSIBLE_MEASURED_BPM: RangeInclusive<u16> = 30..=250;

const BASE_MHR: u16 = 220;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneName {
    Z1,
    Z2,
    Z3,
    Z4,
    Z5,
}

impl ZoneName {
    pub const ALL: [ZoneName; 5] = [Self::Z1, Self::Z2, Self::Z3, Self::Z4, Self::Z5];

    /// Lower and upper share of MHR.
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::Z1 => (0.5, 0.6),
            Self::Z2 => (0.6, 0.7),
            Self::Z3 => (0.7, 0.8),
            Self::Z4 => (0.8, 0.9),
            Self::Z5 => (0.9, 1.0),
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Z1 => "Warm up, recovery and very light effort",
            Self::Z2 => "Fat burn, basic endurance you can hold for hours",
            Self::Z3 => "Aerobic, steady tempo improving cardiovascular fitness",
            Self::Z4 => "Anaerobic, hard threshold work",
            Self::Z5 => "VO2 max, maximal effort for short intervals",
        }
    }

    /// Highest zone whose lower bound `bpm` reaches. `None` below Z1.
    pub fn for_heart_rate(bpm: u16, zones: &[CardioZone; 5]) -> Option<Self> {
        zones
            .iter()
            .rev()
            .find(|zone| bpm >= zone.min_bpm)
            .map(|zone| zone.name)
    }
}

impl std::fmt::Display for ZoneName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CardioZone {
    pub name: ZoneName,
    pub min_bpm: u16,
    pub max_bpm: u16,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MaxHrSource {
    Measured,
    Estimated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum HeartRateWarning {
    /// Measured MHR outside [`TYPICAL_MEASURED_BPM`]
    MeasuredOutsideTypicalRange { bpm: u16 },
}

impl std::fmt::Display for HeartRateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MeasuredOutsideTypicalRange { bpm } => write!(
                f,
                "maximum heart rate should be between {} and {} bpm, got {bpm}",
                TYPICAL_MEASURED_BPM.start(),
                TYPICAL_MEASURED_BPM.end()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeartRateError {
    #[error(
        "maximum heart rate must be between {} and {} bpm, got {bpm}",
        PLAUSIBLE_MEASURED_BPM.start(),
        PLAUSIBLE_MEASURED_BPM.end()
    )]
    MeasuredOutOfRange { bpm: u16 },
    #[error("age {age} is too high to estimate maximum heart rate from")]
    AgeOutOfRange { age: u8 },
    #[error(transparent)]
    MissingProfileData(#[from] MissingProfileData),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ZoneReport {
    pub max_hr: u16,
    pub source: MaxHrSource,
    pub zones: [CardioZone; 5],
    pub warning: Option<HeartRateWarning>,
}

/// Calculate MHR for age.
///
/// # Params
/// - `age` - person age in years
#[inline]
pub const fn estimate_max_hr(age: u8) -> u16 {
    BASE_MHR.saturating_sub(age as u16)
}

pub fn calculate_zones(max_hr: u16) -> [CardioZone; 5] {
    let max_hr = f64::from(max_hr);

    ZoneName::ALL.map(|name| {
        let (lower, upper) = name.bounds();

        CardioZone {
            name,
            min_bpm: (max_hr * lower).round() as u16,
            max_bpm: (max_hr * upper).round() as u16,
            description: name.description(),
        }
    })
}

/// Pick the MHR to build zones from.
///
/// A measured value takes priority over the age estimate. Zero counts as not
/// measured. A measured value outside [`TYPICAL_MEASURED_BPM`] but inside
/// [`PLAUSIBLE_MEASURED_BPM`] is used with a warning; outside the plausible
/// range it is an error and the age estimate is not used instead. An age
/// whose estimate falls below the plausible range is an error too.
pub fn resolve_zones(measured: Option<u16>, age: Option<u8>) -> Result<ZoneReport, HeartRateError> {
    let measured = measured.filter(|bpm| *bpm > 0);
    let age = age.filter(|age| *age > 0);

    let (max_hr, source, warning) = match (measured, age) {
        (Some(bpm), _) => {
            if !PLAUSIBLE_MEASURED_BPM.contains(&bpm) {
                debug!(bpm, "rejected measured max heart rate");
                return Err(HeartRateError::MeasuredOutOfRange { bpm });
            }

            let warning = match TYPICAL_MEASURED_BPM.contains(&bpm) {
                true => None,
                false => Some(HeartRateWarning::MeasuredOutsideTypicalRange { bpm }),
            };

            (bpm, MaxHrSource::Measured, warning)
        }
        (None, Some(age)) => {
            let max_hr = estimate_max_hr(age);

            if !PLAUSIBLE_MEASURED_BPM.contains(&max_hr) {
                debug!(age, max_hr, "rejected age");
                return Err(HeartRateError::AgeOutOfRange { age });
            }

            (max_hr, MaxHrSource::Estimated, None)
        }
        (None, None) => return Err(MissingProfileData::new([ProfileField::Age]).into()),
    };

    debug!(max_hr, ?source, ?warning, "cardio zones calculated");

    Ok(ZoneReport {
        max_hr,
        source,
        zones: calculate_zones(max_hr),
        warning,
    })
}

impl ZoneReport {
    pub fn for_profile(
        measured: Option<u16>,
        profile: &UserProfile,
    ) -> Result<Self, HeartRateError> {
        resolve_zones(measured, profile.age_years().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(zones: &[CardioZone; 5]) -> [(u16, u16); 5] {
        zones.map(|zone| (zone.min_bpm, zone.max_bpm))
    }

    #[test]
    fn max_hr_from_age() {
        assert_eq!(estimate_max_hr(30), 190);
        assert_eq!(estimate_max_hr(0), 220);
        assert_eq!(estimate_max_hr(255), 0);
    }

    #[test]
    fn zones_for_190() {
        let expected = [(95, 114), (114, 133), (133, 152), (152, 171), (171, 190)];

        let actual = calculate_zones(190);

        assert_eq!(expected, bounds(&actual));
        assert_eq!(
            actual.map(|zone| zone.name),
            [ZoneName::Z1, ZoneName::Z2, ZoneName::Z3, ZoneName::Z4, ZoneName::Z5]
        );
    }

    #[test]
    fn zones_round_to_nearest() {
        // 185 x 0.5 = 92.5, 185 x 0.7 = 129.5
        let expected = [(93, 111), (111, 130), (130, 148), (148, 167), (167, 185)];

        let actual = calculate_zones(185);

        assert_eq!(expected, bounds(&actual));
    }

    #[test]
    fn zones_are_ordered() {
        for max_hr in 30..=250 {
            let zones = calculate_zones(max_hr);

            for zone in &zones {
                assert!(zone.min_bpm <= zone.max_bpm);
            }
            for pair in zones.windows(2) {
                assert_eq!(pair[0].max_bpm, pair[1].min_bpm);
            }
            assert_eq!(zones[4].max_bpm, max_hr);
        }
    }

    #[test]
    fn measured_takes_priority() {
        let report = resolve_zones(Some(200), Some(30)).unwrap();

        assert_eq!(report.max_hr, 200);
        assert_eq!(report.source, MaxHrSource::Measured);
        assert_eq!(report.warning, None);
    }

    #[test]
    fn age_estimate_when_not_measured() {
        let report = resolve_zones(None, Some(30)).unwrap();
        let zero = resolve_zones(Some(0), Some(30)).unwrap();

        assert_eq!(report.max_hr, 190);
        assert_eq!(report.source, MaxHrSource::Estimated);
        assert_eq!(report, zero);
    }

    #[test]
    fn unusual_measured_value_is_used_with_warning() {
        let low = resolve_zones(Some(100), Some(30)).unwrap();
        let high = resolve_zones(Some(240), None).unwrap();

        assert_eq!(low.max_hr, 100);
        assert_eq!(
            low.warning,
            Some(HeartRateWarning::MeasuredOutsideTypicalRange { bpm: 100 })
        );
        assert_eq!(high.source, MaxHrSource::Measured);
        assert!(high.warning.is_some());
        assert!(resolve_zones(Some(120), None).unwrap().warning.is_none());
        assert!(resolve_zones(Some(230), None).unwrap().warning.is_none());
    }

    #[test]
    fn implausible_measured_value_is_rejected() {
        assert_eq!(
            resolve_zones(Some(29), Some(30)),
            Err(HeartRateError::MeasuredOutOfRange { bpm: 29 })
        );
        assert_eq!(
            resolve_zones(Some(251), Some(30)),
            Err(HeartRateError::MeasuredOutOfRange { bpm: 251 })
        );
        assert!(resolve_zones(Some(30), None).is_ok());
        assert!(resolve_zones(Some(250), None).is_ok());
    }

    #[test]
    fn nothing_to_work_with() {
        let Err(HeartRateError::MissingProfileData(missing)) = resolve_zones(None, None) else {
            panic!("expected missing age");
        };

        assert_eq!(missing.fields(), &[ProfileField::Age]);
    }

    #[test]
    fn age_too_high_for_estimate() {
        assert_eq!(
            resolve_zones(None, Some(221)),
            Err(HeartRateError::AgeOutOfRange { age: 221 })
        );
        assert_eq!(
            resolve_zones(Some(0), Some(191)),
            Err(HeartRateError::AgeOutOfRange { age: 191 })
        );
        assert_eq!(resolve_zones(None, Some(190)).unwrap().max_hr, 30);
        assert_eq!(resolve_zones(Some(180), Some(250)).unwrap().max_hr, 180);
    }

    #[test]
    fn classify_reading() {
        let zones = calculate_zones(190);

        assert_eq!(ZoneName::for_heart_rate(80, &zones), None);
        assert_eq!(ZoneName::for_heart_rate(95, &zones), Some(ZoneName::Z1));
        assert_eq!(ZoneName::for_heart_rate(140, &zones), Some(ZoneName::Z3));
        assert_eq!(ZoneName::for_heart_rate(200, &zones), Some(ZoneName::Z5));
    }

    #[test]
    fn zones_from_profile_age() {
        let profile = UserProfile {
            age_years: Some(40),
            ..Default::default()
        };

        let report = ZoneReport::for_profile(None, &profile).unwrap();

        assert_eq!(report.max_hr, 180);
    }
}
