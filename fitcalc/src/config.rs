use std::path::{Path, PathBuf};

pub const PROFILE_ENV: &str = "FITCALC_PROFILE";
pub const LOG_LEVEL_ENV: &str = "FITCALC_LOG_LEVEL";

const DEFAULT_PROFILE_FILE: &str = "profile.toml";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TOML file holding the user profile
    pub profile_path: PathBuf,
    /// `EnvFilter` directive
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_default();

        Self::from_env_with(&base_dir, |k| std::env::var(k).ok())
    }

    /// Read settings through `get` instead of the process environment.
    /// Without a profile path the profile lives in `base_dir`. The log level
    /// falls back to `RUST_LOG`, then to `info`.
    pub fn from_env_with<F>(base_dir: &Path, mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let profile_path = get(PROFILE_ENV)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| base_dir.join(DEFAULT_PROFILE_FILE));

        let log_level = get(LOG_LEVEL_ENV)
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.into());

        Self {
            profile_path,
            log_level,
        }
    }

    /// A path given on the command line wins over the environment.
    pub fn with_profile_path(self, path: Option<PathBuf>) -> Self {
        match path {
            Some(profile_path) => Self {
                profile_path,
                ..self
            },
            None => self,
        }
    }
}
