#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Distance(f64);

impl Distance {
    pub const fn from_kilometers(km: f64) -> Self {
        Self(km)
    }

    pub const fn from_meters(m: f64) -> Self {
        Self(m / 1000.0)
    }

    pub const fn as_kilometers(self) -> f64 {
        self.0
    }

    pub const fn as_meters(self) -> f64 {
        self.0 * 1000.0
    }

    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

/// Unit a distance was typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Meters,
}

impl DistanceUnit {
    pub const fn distance(self, value: f64) -> Distance {
        match self {
            Self::Kilometers => Distance::from_kilometers(value),
            Self::Meters => Distance::from_meters(value),
        }
    }
}

impl std::fmt::Display for Distance {
    /// Meters below one kilometer, kilometers with two decimals above.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_meters() {
            m if m >= 1000.0 => write!(f, "{:.2} km", self.as_kilometers()),
            m => write!(f, "{} m", m.round()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        assert_eq!(Distance::from_meters(5000.0).as_kilometers(), 5.0);
        assert_eq!(Distance::from_kilometers(1.5).as_meters(), 1500.0);
        assert_eq!(DistanceUnit::Meters.distance(250.0), Distance::from_kilometers(0.25));
    }

    #[test]
    fn display() {
        assert_eq!(Distance::from_meters(999.6).to_string(), "1000 m");
        assert_eq!(Distance::from_meters(420.2).to_string(), "420 m");
        assert_eq!(Distance::from_kilometers(5.0).to_string(), "5.00 km");
    }
}
