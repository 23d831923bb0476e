//! Macronutrient split of a calorie target.
//!
//! Two modes:
//!
//! - by ratio: protein, fat and carbohydrate shares of the target, which must
//!   add up to exactly 100%;
//! - by protein per kilogram: protein grams from body weight, fat as a share
//!   of the target, carbohydrates fill what is left.
//!
//! Grams are rounded independently per macro. The rounding residual is not
//! redistributed, so `total_kcal()` may differ from the target by a few kcal.

use profile::UserProfile;
use tracing::debug;

use crate::{EnergyNeeds, MissingProfileData};

pub const PROTEIN_KCAL_PER_G: f64 = 4.0;
pub const CARB_KCAL_PER_G: f64 = 4.0;
pub const FAT_KCAL_PER_G: f64 = 9.0;

/// Target used when the profile can not produce a TDEE
pub const FALLBACK_TARGET_KCAL: f64 = 2000.0;

const LOW_FAT_PCT: u32 = 15;
const HIGH_PROTEIN_PCT: u32 = 40;
const MIN_PROTEIN_G_PER_KG: f64 = 0.8;
const MAX_PROTEIN_G_PER_KG: f64 = 2.5;
const LOW_TARGET_KCAL: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MacroError {
    #[error("percentages must add up to 100%, got {total}%")]
    PercentTotal { total: u32 },
    #[error("fat share must be between 0 and 100%, got {0}%")]
    InvalidFatPercent(u32),
    #[error("calorie target must be a non-negative number, got {0}")]
    InvalidTarget(f64),
    #[error("weight must be a positive number, got {0}")]
    InvalidWeight(f64),
    #[error("protein must be a positive number of grams per kilogram, got {0}")]
    InvalidProteinPerKg(f64),
    #[error(
        "protein ({protein_kcal} kcal) and fat ({fat_kcal} kcal) exceed the {target_kcal} kcal target"
    )]
    ExceedsTarget {
        protein_kcal: f64,
        fat_kcal: f64,
        target_kcal: f64,
    },
    #[error(transparent)]
    MissingProfileData(#[from] MissingProfileData),
}

/// Protein, fat and carbohydrate shares in percent, always adding up to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawMacroRatio", into = "RawMacroRatio")
)]
pub struct MacroRatio {
    protein: u32,
    fat: u32,
    carb: u32,
}

impl MacroRatio {
    pub fn new(protein: u32, fat: u32, carb: u32) -> Result<Self, MacroError> {
        let total = protein.saturating_add(fat).saturating_add(carb);

        if total != 100 {
            debug!(protein, fat, carb, total, "rejected macro ratio");
            return Err(MacroError::PercentTotal { total });
        }

        Ok(Self { protein, fat, carb })
    }

    pub const fn protein_pct(self) -> u32 {
        self.protein
    }

    pub const fn fat_pct(self) -> u32 {
        self.fat
    }

    pub const fn carb_pct(self) -> u32 {
        self.carb
    }
}

impl Default for MacroRatio {
    fn default() -> Self {
        Self {
            protein: 30,
            fat: 35,
            carb: 35,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawMacroRatio {
    protein: u32,
    fat: u32,
    carb: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMacroRatio> for MacroRatio {
    type Error = MacroError;

    fn try_from(RawMacroRatio { protein, fat, carb }: RawMacroRatio) -> Result<Self, Self::Error> {
        Self::new(protein, fat, carb)
    }
}

#[cfg(feature = "serde")]
impl From<MacroRatio> for RawMacroRatio {
    fn from(MacroRatio { protein, fat, carb }: MacroRatio) -> Self {
        Self { protein, fat, carb }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacroBreakdown {
    pub protein_g: u32,
    pub fat_g: u32,
    pub carb_g: u32,
    pub protein_kcal: f64,
    pub fat_kcal: f64,
    pub carb_kcal: f64,
}

/// Share of each macro in the allocated calories, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacroPercentages {
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
}

impl MacroBreakdown {
    /// Energy of the rounded grams.
    pub fn total_kcal(&self) -> f64 {
        f64::from(self.protein_g) * PROTEIN_KCAL_PER_G
            + f64::from(self.fat_g) * FAT_KCAL_PER_G
            + f64::from(self.carb_g) * CARB_KCAL_PER_G
    }

    pub fn percentages(&self) -> MacroPercentages {
        let total = self.protein_kcal + self.fat_kcal + self.carb_kcal;

        if total <= 0.0 {
            return MacroPercentages {
                protein: 0.0,
                fat: 0.0,
                carb: 0.0,
            };
        }

        MacroPercentages {
            protein: self.protein_kcal / total * 100.0,
            fat: self.fat_kcal / total * 100.0,
            carb: self.carb_kcal / total * 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MacroWarning {
    /// Fat below 15% of the target
    LowFat,
    /// Protein above 40% of the target
    HighProtein,
    /// Less than 0.8 g of protein per kg
    ProteinDeficiencyRisk,
    /// More than 2.5 g of protein per kg
    ProteinExcess,
    /// Target below 1000 kcal
    LowTarget,
}

impl std::fmt::Display for MacroWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::LowFat => "fat below 15% may be too low for hormonal health",
            Self::HighProtein => "protein above 40% is very high, make sure your kidneys are healthy",
            Self::ProteinDeficiencyRisk => {
                "protein below 0.8 g/kg risks deficiency (WHO recommendation)"
            }
            Self::ProteinExcess => {
                "protein above 2.5 g/kg is generally unnecessary, even for athletes"
            }
            Self::LowTarget => "calorie target below 1000 kcal is very low, be careful",
        };

        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacroPlan {
    pub target_kcal: f64,
    pub breakdown: MacroBreakdown,
    pub warnings: Vec<MacroWarning>,
}

/// Calorie target a macro split starts from: the profile TDEE truncated to
/// whole kcal, or [`FALLBACK_TARGET_KCAL`] when the profile is incomplete.
pub fn default_target_kcal(profile: &UserProfile) -> f64 {
    EnergyNeeds::from_profile(profile)
        .map(|needs| needs.tdee.trunc())
        .unwrap_or(FALLBACK_TARGET_KCAL)
}

pub fn by_ratio(target_kcal: f64, ratio: MacroRatio) -> Result<MacroPlan, MacroError> {
    let target_kcal = check_target(target_kcal)?;

    let protein_kcal = share(target_kcal, ratio.protein);
    let fat_kcal = share(target_kcal, ratio.fat);
    let carb_kcal = share(target_kcal, ratio.carb);

    let breakdown = MacroBreakdown {
        protein_g: grams(protein_kcal, PROTEIN_KCAL_PER_G),
        fat_g: grams(fat_kcal, FAT_KCAL_PER_G),
        carb_g: grams(carb_kcal, CARB_KCAL_PER_G),
        protein_kcal,
        fat_kcal,
        carb_kcal,
    };

    let mut warnings = Vec::new();
    if ratio.fat < LOW_FAT_PCT {
        warnings.push(MacroWarning::LowFat);
    }
    if ratio.protein > HIGH_PROTEIN_PCT {
        warnings.push(MacroWarning::HighProtein);
    }

    Ok(finish(target_kcal, breakdown, warnings))
}

/// Split where protein is prescribed per kilogram of body weight.
///
/// # Params
/// - `target_kcal` - daily calorie target
/// - `weight_kg` - body weight in kilograms
/// - `protein_g_per_kg` - grams of protein per kilogram
/// - `fat_pct` - fat share of the target in percent
pub fn by_protein_per_kg(
    target_kcal: f64,
    weight_kg: f64,
    protein_g_per_kg: f64,
    fat_pct: u32,
) -> Result<MacroPlan, MacroError> {
    let target_kcal = check_target(target_kcal)?;

    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return Err(MacroError::InvalidWeight(weight_kg));
    }

    if !(protein_g_per_kg.is_finite() && protein_g_per_kg > 0.0) {
        return Err(MacroError::InvalidProteinPerKg(protein_g_per_kg));
    }

    if fat_pct > 100 {
        return Err(MacroError::InvalidFatPercent(fat_pct));
    }

    // kcal come from the rounded grams
    let protein_g = (weight_kg * protein_g_per_kg).round() as u32;
    let protein_kcal = f64::from(protein_g) * PROTEIN_KCAL_PER_G;

    let fat_kcal = share(target_kcal, fat_pct);
    let carb_kcal = target_kcal - protein_kcal - fat_kcal;

    if carb_kcal < 0.0 {
        debug!(protein_kcal, fat_kcal, target_kcal, "macro split exceeds target");
        return Err(MacroError::ExceedsTarget {
            protein_kcal,
            fat_kcal,
            target_kcal,
        });
    }

    let breakdown = MacroBreakdown {
        protein_g,
        fat_g: grams(fat_kcal, FAT_KCAL_PER_G),
        carb_g: grams(carb_kcal, CARB_KCAL_PER_G),
        protein_kcal,
        fat_kcal,
        carb_kcal,
    };

    let mut warnings = Vec::new();
    if protein_g_per_kg < MIN_PROTEIN_G_PER_KG {
        warnings.push(MacroWarning::ProteinDeficiencyRisk);
    }
    if protein_g_per_kg > MAX_PROTEIN_G_PER_KG {
        warnings.push(MacroWarning::ProteinExcess);
    }

    Ok(finish(target_kcal, breakdown, warnings))
}

/// [`by_protein_per_kg`] with the weight taken from the profile.
pub fn by_protein_per_kg_for(
    profile: &UserProfile,
    target_kcal: f64,
    protein_g_per_kg: f64,
    fat_pct: u32,
) -> Result<MacroPlan, MacroError> {
    by_protein_per_kg(target_kcal, profile.weight_kg()?, protein_g_per_kg, fat_pct)
}

fn finish(
    target_kcal: f64,
    breakdown: MacroBreakdown,
    mut warnings: Vec<MacroWarning>,
) -> MacroPlan {
    if target_kcal < LOW_TARGET_KCAL {
        warnings.push(MacroWarning::LowTarget);
    }

    debug!(target_kcal, ?breakdown, ?warnings, "macro split calculated");

    MacroPlan {
        target_kcal,
        breakdown,
        warnings,
    }
}

fn check_target(target_kcal: f64) -> Result<f64, MacroError> {
    match target_kcal.is_finite() && target_kcal >= 0.0 {
        true => Ok(target_kcal),
        false => Err(MacroError::InvalidTarget(target_kcal)),
    }
}

#[inline]
fn share(target_kcal: f64, pct: u32) -> f64 {
    target_kcal * f64::from(pct) / 100.0
}

#[inline]
fn grams(kcal: f64, kcal_per_g: f64) -> u32 {
    (kcal / kcal_per_g).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    use profile::{ActivityLevel, Gender};

    #[test]
    fn ratio_must_total_100() {
        assert_eq!(
            MacroRatio::new(30, 35, 40),
            Err(MacroError::PercentTotal { total: 105 })
        );
        assert_eq!(
            MacroRatio::new(30, 35, 40).unwrap_err().to_string(),
            "percentages must add up to 100%, got 105%"
        );
        assert!(MacroRatio::new(0, 0, 100).is_ok());
    }

    #[test]
    fn split_by_ratio() {
        let expected = MacroBreakdown {
            protein_g: 150,
            fat_g: 78,
            carb_g: 175,
            protein_kcal: 600.0,
            fat_kcal: 700.0,
            carb_kcal: 700.0,
        };

        let actual = by_ratio(2000.0, MacroRatio::default()).unwrap();

        assert_eq!(expected, actual.breakdown);
        assert!(actual.warnings.is_empty());
        // 78 g of fat is 702 kcal, the residual is kept
        assert_eq!(actual.breakdown.total_kcal(), 2002.0);
    }

    #[test]
    fn ratio_warnings() {
        let low_fat = by_ratio(2000.0, MacroRatio::new(20, 10, 70).unwrap()).unwrap();
        let high_protein = by_ratio(2000.0, MacroRatio::new(45, 25, 30).unwrap()).unwrap();
        let low_target = by_ratio(900.0, MacroRatio::default()).unwrap();

        assert_eq!(low_fat.warnings, vec![MacroWarning::LowFat]);
        assert_eq!(high_protein.warnings, vec![MacroWarning::HighProtein]);
        assert_eq!(low_target.warnings, vec![MacroWarning::LowTarget]);
    }

    #[test]
    fn split_by_protein_per_kg() {
        let expected = MacroBreakdown {
            protein_g: 126,
            fat_g: 67,
            carb_g: 224,
            protein_kcal: 504.0,
            fat_kcal: 600.0,
            carb_kcal: 896.0,
        };

        let actual = by_protein_per_kg(2000.0, 70.0, 1.8, 30).unwrap();

        assert_eq!(expected, actual.breakdown);
        assert!(actual.warnings.is_empty());
    }

    #[test]
    fn protein_kcal_use_rounded_grams() {
        // 70.3 x 1.7 = 119.51 g, rounded to 120 g = 480 kcal
        let plan = by_protein_per_kg(2000.0, 70.3, 1.7, 30).unwrap();

        assert_eq!(plan.breakdown.protein_g, 120);
        assert_eq!(plan.breakdown.protein_kcal, 480.0);
        assert_eq!(plan.breakdown.carb_kcal, 920.0);
        assert_eq!(plan.breakdown.carb_g, 230);
    }

    #[test]
    fn protein_and_fat_over_target() {
        let actual = by_protein_per_kg(1500.0, 100.0, 3.0, 40);

        assert_eq!(
            actual,
            Err(MacroError::ExceedsTarget {
                protein_kcal: 1200.0,
                fat_kcal: 600.0,
                target_kcal: 1500.0,
            })
        );
    }

    #[test]
    fn protein_per_kg_warnings() {
        let low = by_protein_per_kg(2500.0, 70.0, 0.5, 30).unwrap();
        let high = by_protein_per_kg(3500.0, 70.0, 2.8, 30).unwrap();

        assert_eq!(low.warnings, vec![MacroWarning::ProteinDeficiencyRisk]);
        assert_eq!(high.warnings, vec![MacroWarning::ProteinExcess]);
    }

    #[test]
    fn protein_per_kg_rejects_invalid_input() {
        assert_eq!(
            by_protein_per_kg(2000.0, 0.0, 1.8, 30),
            Err(MacroError::InvalidWeight(0.0))
        );
        assert_eq!(
            by_protein_per_kg(2000.0, 70.0, 0.0, 30),
            Err(MacroError::InvalidProteinPerKg(0.0))
        );
        assert_eq!(
            by_protein_per_kg(2000.0, 70.0, 1.8, 101),
            Err(MacroError::InvalidFatPercent(101))
        );
        assert_eq!(
            by_ratio(-1.0, MacroRatio::default()),
            Err(MacroError::InvalidTarget(-1.0))
        );
    }

    #[test]
    fn protein_per_kg_needs_weight() {
        let Err(MacroError::MissingProfileData(missing)) =
            by_protein_per_kg_for(&UserProfile::default(), 2000.0, 1.8, 30)
        else {
            panic!("expected missing weight");
        };

        assert_eq!(missing.fields(), &[profile::ProfileField::Weight]);
    }

    #[test]
    fn target_defaults_to_truncated_tdee() {
        let complete = UserProfile {
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            age_years: Some(30),
            gender: Gender::Male,
            activity_level: Some(ActivityLevel::Moderate),
            custom_stride_length_m: None,
        };

        assert_eq!(default_target_kcal(&complete), 2555.0);
        assert_eq!(
            default_target_kcal(&UserProfile::default()),
            FALLBACK_TARGET_KCAL
        );
    }

    #[test]
    fn percentages_of_allocation() {
        let plan = by_ratio(2000.0, MacroRatio::new(25, 25, 50).unwrap()).unwrap();

        let expected = MacroPercentages {
            protein: 25.0,
            fat: 25.0,
            carb: 50.0,
        };

        assert_eq!(expected, plan.breakdown.percentages());
    }
}
