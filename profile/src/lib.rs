//! # User profile
//!
//! Body measurements and preferences every calculator reads from. The profile
//! is owned by an external store; calculators only borrow it and never invent
//! defaults for absent fields.
//!
//! A numeric field counts as absent when it is `None`, not finite or not
//! strictly positive, so a zeroed form field is reported the same way as an
//! empty one.

mod store;

pub use store::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

/// Gender usable by sex-specific formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Sex {
    Male,
    Female,
}

impl From<Sex> for Gender {
    fn from(value: Sex) -> Self {
        match value {
            Sex::Male => Self::Male,
            Sex::Female => Self::Female,
        }
    }
}

impl TryFrom<Gender> for Sex {
    type Error = MissingProfileData;

    fn try_from(value: Gender) -> Result<Self, Self::Error> {
        match value {
            Gender::Male => Ok(Self::Male),
            Gender::Female => Ok(Self::Female),
            Gender::Unspecified => Err(MissingProfileData::new([ProfileField::Gender])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 days a week
    Light,
    /// Exercise 3-5 days a week
    Moderate,
    /// Exercise 6-7 days a week
    Active,
    /// Hard training or a physical job
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Active,
        Self::VeryActive,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown activity level `{s}`"))
    }
}

/// Profile entry a calculator may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ProfileField {
    Height,
    Weight,
    Age,
    Gender,
    ActivityLevel,
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::ActivityLevel => "activity level",
        };

        f.write_str(label)
    }
}

/// Required profile fields are absent. Callers show a "complete your profile"
/// state listing [`MissingProfileData::fields`] instead of a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing profile data: {}", join_fields(.fields))]
pub struct MissingProfileData {
    fields: Vec<ProfileField>,
}

impl MissingProfileData {
    pub fn new(fields: impl IntoIterator<Item = ProfileField>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn fields(&self) -> &[ProfileField] {
        &self.fields
    }
}

fn join_fields(fields: &[ProfileField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct UserProfile {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub age_years: Option<u8>,
    pub gender: Gender,
    pub activity_level: Option<ActivityLevel>,
    /// Calibrated stride in meters, overrides the height based estimate
    pub custom_stride_length_m: Option<f64>,
}

impl UserProfile {
    pub fn height_cm(&self) -> Result<f64, MissingProfileData> {
        positive(self.height_cm).ok_or_else(|| MissingProfileData::new([ProfileField::Height]))
    }

    pub fn weight_kg(&self) -> Result<f64, MissingProfileData> {
        positive(self.weight_kg).ok_or_else(|| MissingProfileData::new([ProfileField::Weight]))
    }

    pub fn age_years(&self) -> Result<u8, MissingProfileData> {
        self.age_years
            .filter(|age| *age > 0)
            .ok_or_else(|| MissingProfileData::new([ProfileField::Age]))
    }

    pub fn sex(&self) -> Result<Sex, MissingProfileData> {
        Sex::try_from(self.gender)
    }

    pub fn activity_level(&self) -> Result<ActivityLevel, MissingProfileData> {
        self.activity_level
            .ok_or_else(|| MissingProfileData::new([ProfileField::ActivityLevel]))
    }

    pub fn custom_stride_length_m(&self) -> Option<f64> {
        positive(self.custom_stride_length_m)
    }

    pub fn has(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::Height => self.height_cm().is_ok(),
            ProfileField::Weight => self.weight_kg().is_ok(),
            ProfileField::Age => self.age_years().is_ok(),
            ProfileField::Gender => self.sex().is_ok(),
            ProfileField::ActivityLevel => self.activity_level().is_ok(),
        }
    }

    /// Check several fields at once, reporting every absent one.
    pub fn require(&self, fields: &[ProfileField]) -> Result<(), MissingProfileData> {
        let missing = fields
            .iter()
            .copied()
            .filter(|field| !self.has(*field))
            .collect::<Vec<_>>();

        match missing.is_empty() {
            true => Ok(()),
            false => Err(MissingProfileData::new(missing)),
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            height_cm,
            weight_kg,
            age_years,
            gender,
            activity_level,
            custom_stride_length_m,
        } = update;

        if let Some(height_cm) = height_cm {
            self.height_cm = Some(height_cm);
        }
        if let Some(weight_kg) = weight_kg {
            self.weight_kg = Some(weight_kg);
        }
        if let Some(age_years) = age_years {
            self.age_years = Some(age_years);
        }
        if let Some(gender) = gender {
            self.gender = gender;
        }
        if let Some(activity_level) = activity_level {
            self.activity_level = Some(activity_level);
        }
        if let Some(stride) = custom_stride_length_m {
            self.custom_stride_length_m = stride;
        }
    }
}

/// Partial profile update. `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileUpdate {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub age_years: Option<u8>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    /// `Some(None)` clears the calibration
    pub custom_stride_length_m: Option<Option<f64>>,
}

impl ProfileUpdate {
    pub const fn stride(stride_m: Option<f64>) -> Self {
        Self {
            height_cm: None,
            weight_kg: None,
            age_years: None,
            gender: None,
            activity_level: None,
            custom_stride_length_m: Some(stride_m),
        }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
