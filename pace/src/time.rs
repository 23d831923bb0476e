const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Clock-style duration. Minutes and seconds are conventionally below 60 but
/// nothing enforces it: `TimeDuration::new(0, 90, 0)` is 5400 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeDuration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeDuration {
    pub const fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub const fn from_seconds(total: u64) -> Self {
        let hours = total / SECONDS_PER_HOUR;
        let remainder = total % SECONDS_PER_HOUR;

        Self {
            hours,
            minutes: remainder / SECONDS_PER_MINUTE,
            seconds: remainder % SECONDS_PER_MINUTE,
        }
    }

    /// Rounds to the nearest whole second. Negative and NaN inputs give zero.
    pub fn from_secs_f64(total: f64) -> Self {
        Self::from_seconds(total.round() as u64)
    }

    /// `None` when the total does not fit in `u64`.
    pub const fn checked_total_seconds(self) -> Option<u64> {
        let Some(hours) = self.hours.checked_mul(SECONDS_PER_HOUR) else {
            return None;
        };
        let Some(minutes) = self.minutes.checked_mul(SECONDS_PER_MINUTE) else {
            return None;
        };
        let Some(total) = hours.checked_add(minutes) else {
            return None;
        };

        total.checked_add(self.seconds)
    }

    /// Saturates at `u64::MAX`.
    pub const fn total_seconds(self) -> u64 {
        match self.checked_total_seconds() {
            Some(total) => total,
            None => u64::MAX,
        }
    }

    pub const fn is_zero(self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl From<TimeDuration> for std::time::Duration {
    fn from(value: TimeDuration) -> Self {
        std::time::Duration::from_secs(value.total_seconds())
    }
}

impl From<std::time::Duration> for TimeDuration {
    fn from(value: std::time::Duration) -> Self {
        Self::from_seconds(value.as_secs())
    }
}

impl std::fmt::Display for TimeDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            hours,
            minutes,
            seconds,
        } = Self::from_seconds(self.total_seconds());

        match hours {
            0 => write!(f, "{minutes}:{seconds:02}"),
            _ => write!(f, "{hours}:{minutes:02}:{seconds:02}"),
        }
    }
}

/// Parse `h:mm:ss`, `m:ss` or plain seconds.
impl std::str::FromStr for TimeDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .trim()
            .split(':')
            .map(|part| part.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid time `{s}`: {e}"))?;

        let time = match parts.as_slice() {
            [seconds] => Self::from_seconds(*seconds),
            [minutes, seconds] => Self::new(0, *minutes, *seconds),
            [hours, minutes, seconds] => Self::new(*hours, *minutes, *seconds),
            _ => return Err(format!("invalid time `{s}`: expected h:mm:ss, m:ss or seconds")),
        };

        match time.checked_total_seconds() {
            Some(_) => Ok(time),
            None => Err(format!("invalid time `{s}`: too large")),
        }
    }
}

/// Sum of the parts in seconds. No range check: negative parts simply
/// subtract, callers validate the total.
#[inline]
pub const fn time_to_seconds(hours: i64, minutes: i64, seconds: i64) -> i64 {
    hours * SECONDS_PER_HOUR as i64 + minutes * SECONDS_PER_MINUTE as i64 + seconds
}

#[inline]
pub const fn seconds_to_time(seconds: u64) -> TimeDuration {
    TimeDuration::from_seconds(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_seconds() {
        let expected = TimeDuration::new(1, 2, 3);

        let actual = seconds_to_time(3723);

        assert_eq!(expected, actual);
    }

    #[test]
    fn sums_parts() {
        assert_eq!(time_to_seconds(1, 2, 3), 3723);
        assert_eq!(time_to_seconds(0, 0, 0), 0);
        assert_eq!(time_to_seconds(0, -1, 30), -30);
    }

    #[test]
    fn round_trip_is_exact() {
        for s in (0..200_000).step_by(7).chain([u32::MAX as u64]) {
            let t = seconds_to_time(s);

            assert_eq!(
                time_to_seconds(t.hours as i64, t.minutes as i64, t.seconds as i64),
                s as i64
            );
            assert_eq!(t.total_seconds(), s);
        }
    }

    #[test]
    fn unnormalized_parts_still_sum() {
        let time = TimeDuration::new(0, 90, 75);

        assert_eq!(time.total_seconds(), 5475);
        assert_eq!(time.to_string(), "1:31:15");
    }

    #[test]
    fn fractional_seconds_round() {
        assert_eq!(TimeDuration::from_secs_f64(299.6), TimeDuration::new(0, 5, 0));
        assert_eq!(TimeDuration::from_secs_f64(299.4), TimeDuration::new(0, 4, 59));
        assert_eq!(TimeDuration::from_secs_f64(-3.0), TimeDuration::default());
    }

    #[test]
    fn display() {
        assert_eq!(TimeDuration::new(0, 5, 7).to_string(), "5:07");
        assert_eq!(TimeDuration::new(2, 0, 9).to_string(), "2:00:09");
    }

    #[test]
    fn parse() {
        assert_eq!("1:02:03".parse::<TimeDuration>(), Ok(TimeDuration::new(1, 2, 3)));
        assert_eq!("4:30".parse::<TimeDuration>(), Ok(TimeDuration::new(0, 4, 30)));
        assert_eq!("3000".parse::<TimeDuration>(), Ok(TimeDuration::new(0, 50, 0)));
        assert!("1:2:3:4".parse::<TimeDuration>().is_err());
        assert!("4:xx".parse::<TimeDuration>().is_err());
        assert!("-5".parse::<TimeDuration>().is_err());
    }

    #[test]
    fn oversized_time() {
        let huge = TimeDuration::new(6_000_000_000_000_000, 0, 0);

        assert_eq!(huge.checked_total_seconds(), None);
        assert_eq!(huge.total_seconds(), u64::MAX);
        assert!(!huge.is_zero());
        assert!("6000000000000000:00:00".parse::<TimeDuration>().is_err());
        assert!(format!("{huge}").starts_with(&(u64::MAX / 3600).to_string()));
        assert_eq!(
            TimeDuration::new(0, 0, u64::MAX).checked_total_seconds(),
            Some(u64::MAX)
        );
    }

    #[test]
    fn std_duration() {
        let duration = std::time::Duration::from(TimeDuration::new(0, 1, 1));

        assert_eq!(duration, std::time::Duration::from_secs(61));
        assert_eq!(
            TimeDuration::from(std::time::Duration::from_millis(61_900)),
            TimeDuration::new(0, 1, 1)
        );
    }
}
