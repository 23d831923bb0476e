use std::process::ExitCode;

use fitcalc::{Cli, Config, TomlProfileStore};

fn main() -> ExitCode {
    let cli = <Cli as clap::Parser>::parse();
    let config = Config::from_env().with_profile_path(cli.profile.clone());

    let env_filter = tracing_subscriber::EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!(?config, "fitcalc: configuration loaded");

    let mut store = TomlProfileStore::new(&config.profile_path);

    let result = fitcalc::run(cli.command, &mut store)
        .and_then(|output| Ok(output.write_to(&mut std::io::stdout().lock(), cli.json)?));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match fitcalc::missing_profile(&err) {
                Some(missing) => {
                    eprintln!("Complete your profile first. Missing: {}", fields(missing));
                    eprintln!(
                        "Use `fitcalc profile set` to fill them in ({}).",
                        store.path().display()
                    );
                }
                None => eprintln!("error: {err:#}"),
            }

            ExitCode::FAILURE
        }
    }
}

fn fields(missing: &profile::MissingProfileData) -> String {
    missing
        .fields()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
