use bmi::Bmi;
use calories::{EnergyNeeds, MacroPlan, MacroRatio};
use heart_rate::{MaxHrSource, ZoneReport};
use hydration::HydrationPlan;
use pace::{PaceProblem, PaceSolution, TimeDuration};
use profile::{ProfileField, ProfileStore, ProfileUpdate, UserProfile};
use steps::{Distance, DistanceUnit, Intensity, Stride, StrideSource, WalkingInput};
use tracing::info;

use crate::{
    cli::{Command, MacroMode, ProfileAction},
    output::Output,
    walks,
};

#[derive(Debug, serde::Serialize)]
struct StepsReport {
    distance_m: f64,
    steps: u64,
    stride: Stride,
}

pub fn run<S: ProfileStore>(command: Command, store: &mut S) -> anyhow::Result<Output> {
    match command {
        Command::Pace { distance_km, time } => solve_pace(PaceProblem::Pace { distance_km, time }),
        Command::Time { distance_km, pace } => solve_pace(PaceProblem::Time { distance_km, pace }),
        Command::Distance { time, pace } => solve_pace(PaceProblem::Distance { time, pace }),
        Command::Bmi => bmi(&store.load()?),
        Command::Calories => energy(&store.load()?),
        Command::Macros { mode } => macros(mode, &store.load()?),
        Command::Zones { max_hr } => zones(max_hr, &store.load()?),
        Command::Hydration { hot } => hydration(hot, &store.load()?),
        Command::Steps { distance, unit } => {
            steps_for(DistanceUnit::from(unit).distance(distance), &store.load()?)
        }
        Command::DistanceFromSteps { steps } => distance_for(steps, &store.load()?),
        Command::Walk {
            distance,
            unit,
            incline,
            minutes,
            speed,
        } => {
            let intensity = match (minutes, speed) {
                (Some(minutes), _) => Intensity::Duration { minutes },
                (None, Some(kmh)) => Intensity::Speed { kmh },
                (None, None) => anyhow::bail!("either --minutes or --speed is required"),
            };

            walk(
                DistanceUnit::from(unit).distance(distance),
                incline,
                intensity,
                &store.load()?,
            )
        }
        Command::Calibrate { distance_m, steps } => {
            let stride_m = steps::save_calibration(store, distance_m, steps)?;

            info!(stride_m, "stride calibration saved");

            Output::new(&stride_m, format!("Stride calibrated: {stride_m:.3} m"))
        }
        Command::ResetCalibration => {
            steps::reset_calibration(store)?;

            info!("stride calibration cleared");

            Output::new(
                &serde_json::Value::Null,
                "Stride calibration cleared, using the height estimate",
            )
        }
        Command::Profile { action } => profile_command(action, store),
        Command::Walks { input, output } => {
            let summary = walks::report_files(&input, &output, &store.load()?)?;

            Output::new(&summary, summary.to_string())
        }
    }
}

fn solve_pace(problem: PaceProblem) -> anyhow::Result<Output> {
    let solution = problem.solve()?;

    let text = match solution {
        PaceSolution::Pace(result) => format!(
            "Pace: {} /km\nSpeed: {:.2} km/h",
            result.pace(),
            result.speed_kmh
        ),
        PaceSolution::Time { time, .. } => format!("Time: {time}"),
        PaceSolution::Distance { distance_km } => format!("Distance: {distance_km:.2} km"),
    };

    Output::new(&solution, text)
}

fn bmi(profile: &UserProfile) -> anyhow::Result<Output> {
    profile.require(&Bmi::REQUIRED_FIELDS)?;

    let bmi = Bmi::from_profile(profile)?;

    let text = format!(
        "BMI: {:.1}\nCategory: {} ({})\nGauge: {:.0}%",
        bmi.value,
        bmi.category,
        bmi.category.range(),
        bmi.gauge_percent()
    );

    Ok(Output::new(&bmi, text)?.with_warnings(bmi.warning))
}

fn energy(profile: &UserProfile) -> anyhow::Result<Output> {
    profile.require(&EnergyNeeds::REQUIRED_FIELDS)?;

    let needs = EnergyNeeds::from_profile(profile)?;

    let text = format!(
        "BMR: {:.0} kcal/day\n\
         TDEE: {:.0} kcal/day ({} x{})\n\
         Deficit (-10%): {:.0} kcal/day\n\
         Surplus (+10%): {:.0} kcal/day",
        needs.bmr,
        needs.tdee,
        needs.activity_level,
        needs.activity_factor,
        needs.deficit,
        needs.surplus
    );

    Ok(Output::new(&needs, text)?.with_warnings(needs.warning))
}

fn macros(mode: MacroMode, profile: &UserProfile) -> anyhow::Result<Output> {
    let plan = match mode {
        MacroMode::Ratio {
            protein,
            fat,
            carb,
            target,
        } => {
            let ratio = MacroRatio::new(protein, fat, carb)?;

            calories::by_ratio(target_kcal(target, profile), ratio)?
        }
        MacroMode::PerKg {
            protein_per_kg,
            fat,
            target,
        } => {
            profile.require(&[ProfileField::Weight])?;

            calories::by_protein_per_kg_for(
                profile,
                target_kcal(target, profile),
                protein_per_kg,
                fat,
            )?
        }
    };

    let text = render_macros(&plan);

    Ok(Output::new(&plan, text)?.with_warnings(&plan.warnings))
}

fn target_kcal(target: Option<f64>, profile: &UserProfile) -> f64 {
    target.unwrap_or_else(|| calories::default_target_kcal(profile))
}

fn render_macros(plan: &MacroPlan) -> String {
    let breakdown = &plan.breakdown;
    let percentages = breakdown.percentages();

    format!(
        "Target: {:.0} kcal\n\
         Protein: {} g ({:.0} kcal, {:.0}%)\n\
         Fat: {} g ({:.0} kcal, {:.0}%)\n\
         Carbs: {} g ({:.0} kcal, {:.0}%)\n\
         Total: {:.0} kcal",
        plan.target_kcal,
        breakdown.protein_g,
        breakdown.protein_kcal,
        percentages.protein,
        breakdown.fat_g,
        breakdown.fat_kcal,
        percentages.fat,
        breakdown.carb_g,
        breakdown.carb_kcal,
        percentages.carb,
        breakdown.total_kcal()
    )
}

fn zones(max_hr: Option<u16>, profile: &UserProfile) -> anyhow::Result<Output> {
    let measured = max_hr.filter(|bpm| *bpm > 0);

    if measured.is_none() {
        profile.require(&[ProfileField::Age])?;
    }

    let report = ZoneReport::for_profile(measured, profile)?;

    let source = match report.source {
        MaxHrSource::Measured => "measured",
        MaxHrSource::Estimated => "estimated from age",
    };

    let mut text = format!("Max heart rate: {} bpm ({source})", report.max_hr);
    for zone in &report.zones {
        text.push_str(&format!(
            "\n{}  {:>3}-{:<3} bpm  {}",
            zone.name, zone.min_bpm, zone.max_bpm, zone.description
        ));
    }

    Ok(Output::new(&report, text)?.with_warnings(report.warning))
}

fn hydration(hot_weather: bool, profile: &UserProfile) -> anyhow::Result<Output> {
    profile.require(&[ProfileField::Weight])?;

    let plan = HydrationPlan::from_profile(profile, hot_weather)?;

    let text = format!(
        "Water: {:.2} L/day\n  base: {:.0} ml\n  activity: +{:.0} ml\n  hot weather: +{:.0} ml",
        plan.total_liters(),
        plan.base_ml,
        plan.activity_ml,
        plan.weather_ml
    );

    Ok(Output::new(&plan, text)?.with_warnings(plan.warning))
}

fn stride(profile: &UserProfile) -> anyhow::Result<Stride> {
    if profile.custom_stride_length_m().is_none() {
        profile.require(&[ProfileField::Height])?;
    }

    Ok(Stride::from_profile(profile)?)
}

fn stride_label(stride: Stride) -> String {
    let source = match stride.source() {
        StrideSource::Calibrated => "calibrated",
        StrideSource::Estimated => "estimated from height",
    };

    format!("{:.3} m ({source})", stride.length_m())
}

fn steps_for(distance: Distance, profile: &UserProfile) -> anyhow::Result<Output> {
    let stride = stride(profile)?;
    let steps = stride.steps_for(distance)?;

    let report = StepsReport {
        distance_m: distance.as_meters(),
        steps,
        stride,
    };

    let text = format!(
        "Steps: {steps}\nDistance: {distance}\nStride: {}",
        stride_label(stride)
    );

    Output::new(&report, text)
}

fn distance_for(steps: u64, profile: &UserProfile) -> anyhow::Result<Output> {
    let stride = stride(profile)?;
    let distance = stride.distance_for(steps)?;

    let report = StepsReport {
        distance_m: distance.as_meters(),
        steps,
        stride,
    };

    let text = format!(
        "Distance: {distance}\nSteps: {steps}\nStride: {}",
        stride_label(stride)
    );

    Output::new(&report, text)
}

fn walk(
    distance: Distance,
    incline_pct: f64,
    intensity: Intensity,
    profile: &UserProfile,
) -> anyhow::Result<Output> {
    profile.require(&[ProfileField::Weight])?;

    let input =
        WalkingInput::from_profile(profile, distance, intensity)?.set_incline_pct(incline_pct);
    let calories = steps::walking_calories(&input)?;

    let text = format!(
        "Calories: {:.0} kcal\nRate: {:.1} kcal/min\nSpeed: {:.1} km/h\nDuration: {}",
        calories.kcal_total,
        calories.kcal_per_min,
        calories.speed_kmh,
        TimeDuration::from_secs_f64(calories.duration_min * 60.0)
    );

    Output::new(&calories, text)
}

fn profile_command<S: ProfileStore>(
    action: ProfileAction,
    store: &mut S,
) -> anyhow::Result<Output> {
    if let ProfileAction::Set {
        height,
        weight,
        age,
        gender,
        activity,
    } = action
    {
        store.update_user(ProfileUpdate {
            height_cm: height,
            weight_kg: weight,
            age_years: age,
            gender: gender.map(Into::into),
            activity_level: activity,
            custom_stride_length_m: None,
        })?;

        info!("profile updated");
    }

    let profile = store.load()?;

    Output::new(&profile, render_profile(&profile))
}

fn render_profile(profile: &UserProfile) -> String {
    fn or_unset<T: ToString>(value: Option<T>) -> String {
        value.map_or_else(|| "not set".to_owned(), |value| value.to_string())
    }

    format!(
        "Height: {}\nWeight: {}\nAge: {}\nGender: {:?}\nActivity level: {}\nStride: {}",
        or_unset(profile.height_cm().ok().map(|cm| format!("{cm} cm"))),
        or_unset(profile.weight_kg().ok().map(|kg| format!("{kg} kg"))),
        or_unset(profile.age_years().ok()),
        profile.gender,
        or_unset(profile.activity_level().ok()),
        or_unset(
            profile
                .custom_stride_length_m()
                .map(|m| format!("{m:.3} m (calibrated)"))
        ),
    )
}
