use std::path::{Path, PathBuf};

use profile::{ProfileStore, ProfileUpdate, UserProfile};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Profile persisted as a TOML file. A missing file is an empty profile.
#[derive(Debug, Clone)]
pub struct TomlProfileStore {
    path: PathBuf,
}

impl TomlProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, profile: &UserProfile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.io(source))?;
        }

        let content = toml::to_string_pretty(profile)?;

        std::fs::write(&self.path, content).map_err(|source| self.io(source))?;

        debug!(path = %self.path.display(), "profile saved");

        Ok(())
    }

    fn io(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProfileStore for TomlProfileStore {
    type Error = StoreError;

    fn load(&self) -> Result<UserProfile, Self::Error> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no profile file, starting empty");
            return Ok(UserProfile::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| self.io(source))?;

        Ok(toml::from_str(&content)?)
    }

    fn update_user(&mut self, update: ProfileUpdate) -> Result<(), Self::Error> {
        let mut profile = self.load()?;

        profile.apply(update);

        self.save(&profile)
    }
}
