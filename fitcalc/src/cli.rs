use std::path::PathBuf;

use pace::TimeDuration;
use profile::{ActivityLevel, Gender};
use steps::DistanceUnit;

#[derive(Debug, clap::Parser)]
#[command(name = "fitcalc", version, about = "Personal fitness calculators")]
pub struct Cli {
    /// Profile file. Overrides `FITCALC_PROFILE`
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Pace and speed from distance and time
    Pace {
        #[arg(long)]
        distance_km: f64,
        /// h:mm:ss, m:ss or seconds
        #[arg(long)]
        time: TimeDuration,
    },
    /// Finish time from distance and pace
    Time {
        #[arg(long)]
        distance_km: f64,
        /// Pace per kilometer, m:ss
        #[arg(long)]
        pace: TimeDuration,
    },
    /// Distance from time and pace
    Distance {
        #[arg(long)]
        time: TimeDuration,
        #[arg(long)]
        pace: TimeDuration,
    },
    /// Body mass index from profile height and weight
    Bmi,
    /// BMR, TDEE and calorie targets from the profile
    Calories,
    /// Macronutrient split of a calorie target
    Macros {
        #[command(subcommand)]
        mode: MacroMode,
    },
    /// Cardio zones from a measured maximum heart rate or profile age
    Zones {
        /// Measured maximum heart rate, bpm
        #[arg(long)]
        max_hr: Option<u16>,
    },
    /// Daily water intake
    Hydration {
        /// Add the hot weather allowance
        #[arg(long, default_value_t = false)]
        hot: bool,
    },
    /// Steps needed to cover a distance
    Steps {
        distance: f64,
        #[arg(long, value_enum, default_value_t = Unit::Km)]
        unit: Unit,
    },
    /// Distance covered by a number of steps
    DistanceFromSteps { steps: u64 },
    /// Calories burnt walking (ACSM walking equation)
    Walk {
        distance: f64,
        #[arg(long, value_enum, default_value_t = Unit::Km)]
        unit: Unit,
        /// Incline in percent
        #[arg(long, default_value_t = 0.0)]
        incline: f64,
        /// Walk duration in minutes
        #[arg(long, conflicts_with = "speed", required_unless_present = "speed")]
        minutes: Option<f64>,
        /// Walking speed in km/h
        #[arg(long)]
        speed: Option<f64>,
    },
    /// Measure stride over a known distance and save it to the profile
    Calibrate {
        /// Walked distance in meters
        #[arg(long)]
        distance_m: f64,
        /// Steps counted over that distance
        #[arg(long)]
        steps: u64,
    },
    /// Forget the calibrated stride and go back to the height estimate
    ResetCalibration,
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Walking calories for every session of a csv file
    Walks {
        /// Input csv file: distance_m, weight_kg, incline_pct, minutes, speed_kmh
        #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("walks.csv"), required = false)]
        input: PathBuf,
        /// Output csv file. _Note_: will truncate old file if exists
        #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("walks_report.csv"), required = false)]
        output: PathBuf,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum MacroMode {
    /// Split by percentages adding up to 100
    Ratio {
        #[arg(long, default_value_t = 30)]
        protein: u32,
        #[arg(long, default_value_t = 35)]
        fat: u32,
        #[arg(long, default_value_t = 35)]
        carb: u32,
        /// kcal/day, defaults to the profile TDEE or 2000
        #[arg(long)]
        target: Option<f64>,
    },
    /// Protein per kilogram of body weight, fat as a share, carbs fill the rest
    PerKg {
        #[arg(long, default_value_t = 1.8)]
        protein_per_kg: f64,
        /// Fat share in percent
        #[arg(long, default_value_t = 30)]
        fat: u32,
        /// kcal/day, defaults to the profile TDEE or 2000
        #[arg(long)]
        target: Option<f64>,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum ProfileAction {
    Show,
    Set {
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        age: Option<u8>,
        #[arg(long, value_enum)]
        gender: Option<GenderArg>,
        /// sedentary, light, moderate, active or very_active
        #[arg(long)]
        activity: Option<ActivityLevel>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Unit {
    Km,
    M,
}

impl From<Unit> for DistanceUnit {
    fn from(value: Unit) -> Self {
        match value {
            Unit::Km => Self::Kilometers,
            Unit::M => Self::Meters,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Unspecified,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
            GenderArg::Unspecified => Self::Unspecified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;

    #[test]
    fn verify_cli() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn parses_times() {
        let cli = Cli::parse_from(["fitcalc", "time", "--distance-km", "42.195", "--pace", "4:00"]);

        let Command::Time { distance_km, pace } = cli.command else {
            panic!("expected time command");
        };

        assert_eq!(distance_km, 42.195);
        assert_eq!(pace, TimeDuration::new(0, 4, 0));
    }

    #[test]
    fn walk_needs_duration_or_speed() {
        assert!(Cli::try_parse_from(["fitcalc", "walk", "5"]).is_err());
        assert!(
            Cli::try_parse_from(["fitcalc", "walk", "5", "--minutes", "50", "--speed", "6"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["fitcalc", "walk", "5", "--speed", "6"]).is_ok());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["fitcalc", "bmi", "--json", "--profile", "me.toml"]);

        assert!(cli.json);
        assert_eq!(cli.profile, Some(PathBuf::from("me.toml")));
    }
}
