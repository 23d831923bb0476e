//! Batch walking calories over a csv file, one session per row.

use std::{fs::File, io, path::Path};

use anyhow::Context;
use profile::{MissingProfileData, ProfileField, UserProfile};
use steps::{Distance, Intensity, StepsError, WalkingInput};
use tracing::{debug, info};

#[derive(Debug, serde::Deserialize)]
struct WalkCsv {
    distance_m: f64,
    #[serde(default)]
    weight_kg: Option<f64>,
    #[serde(default)]
    incline_pct: Option<f64>,
    #[serde(default)]
    minutes: Option<f64>,
    #[serde(default)]
    speed_kmh: Option<f64>,
}

#[derive(Debug, Default, serde::Serialize)]
struct WalkReport {
    distance_m: Option<f64>,
    weight_kg: Option<f64>,
    incline_pct: Option<f64>,
    speed_kmh: Option<f64>,
    duration_min: Option<f64>,
    kcal_per_min: Option<f64>,
    kcal_total: Option<f64>,
    error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct WalksSummary {
    pub total: usize,
    pub computed: usize,
    pub failed: usize,
    pub kcal_total: f64,
}

impl std::fmt::Display for WalksSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total: {} records, computed: {}, failed: {}\nCalories: {:.0} kcal",
            self.total, self.computed, self.failed, self.kcal_total
        )
    }
}

pub fn report_files(
    input: &Path,
    output: &Path,
    profile: &UserProfile,
) -> anyhow::Result<WalksSummary> {
    let input = File::open(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;
    let output = File::create(output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;

    report(input, output, profile)
}

/// Rows without a weight use the profile weight. A row that can not be
/// computed is kept in the report with its error.
pub fn report<R: io::Read, W: io::Write>(
    input: R,
    output: W,
    profile: &UserProfile,
) -> anyhow::Result<WalksSummary> {
    let mut rdr = csv::Reader::from_reader(input);
    let mut wrt = csv::Writer::from_writer(output);

    let mut summary = WalksSummary::default();

    for row in rdr.deserialize::<WalkCsv>() {
        summary.total += 1;

        let report = match row {
            Ok(row) => walk(&row, profile),
            Err(e) => WalkReport {
                error: Some(format!("invalid row: {e}")),
                ..Default::default()
            },
        };

        match report.kcal_total {
            Some(kcal) => {
                summary.computed += 1;
                summary.kcal_total += kcal;
            }
            None => {
                debug!(error = ?report.error, row = summary.total, "walk skipped");
                summary.failed += 1;
            }
        }

        wrt.serialize(&report)?;
    }

    wrt.flush()?;

    info!(?summary, "walks report written");

    Ok(summary)
}

fn walk(row: &WalkCsv, profile: &UserProfile) -> WalkReport {
    let weight_kg = row.weight_kg.or_else(|| profile.weight_kg().ok());

    let mut report = WalkReport {
        distance_m: Some(row.distance_m),
        weight_kg,
        incline_pct: row.incline_pct,
        ..Default::default()
    };

    match calculate(row, weight_kg) {
        Ok(calories) => {
            report.speed_kmh = Some(calories.speed_kmh);
            report.duration_min = Some(calories.duration_min);
            report.kcal_per_min = Some(calories.kcal_per_min);
            report.kcal_total = Some(calories.kcal_total);
        }
        Err(e) => report.error = Some(e.to_string()),
    }

    report
}

fn calculate(row: &WalkCsv, weight_kg: Option<f64>) -> anyhow::Result<steps::WalkingCalories> {
    let weight_kg = weight_kg.ok_or_else(|| {
        StepsError::MissingProfileData(MissingProfileData::new([ProfileField::Weight]))
    })?;

    let intensity = match (row.minutes, row.speed_kmh) {
        (Some(minutes), None) => Intensity::Duration { minutes },
        (None, Some(kmh)) => Intensity::Speed { kmh },
        (None, None) => anyhow::bail!("either minutes or speed_kmh is required"),
        (Some(_), Some(_)) => anyhow::bail!("minutes and speed_kmh can not be used together"),
    };

    let input = WalkingInput::new(Distance::from_meters(row.distance_m), weight_kg, intensity)
        .set_incline_pct(row.incline_pct.unwrap_or_default());

    Ok(steps::walking_calories(&input)?)
}
