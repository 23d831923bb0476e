//! # fitcalc
//!
//! Command line front end over the calculator crates. The user profile lives
//! in a TOML file, see [`TomlProfileStore`].

mod cli;
mod commands;
mod config;
mod output;
mod store;
mod walks;

pub use cli::*;
pub use commands::run;
pub use config::*;
pub use output::Output;
pub use store::*;
pub use walks::{report as walks_report, WalksSummary};

use profile::MissingProfileData;

/// Missing profile data anywhere in the error chain, so the caller can ask
/// the user to complete the profile instead of printing a failure.
pub fn missing_profile(err: &anyhow::Error) -> Option<&MissingProfileData> {
    err.chain().find_map(|e| e.downcast_ref::<MissingProfileData>())
}
