use crate::{ProfileUpdate, UserProfile};

/// Key-value storage owning the user profile.
///
/// Calculators never reach for it themselves: the caller loads a profile and
/// passes the fields down. Only stride calibration writes back through
/// [`ProfileStore::update_user`].
pub trait ProfileStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self) -> Result<UserProfile, Self::Error>;

    /// Merge a partial update into the stored profile.
    fn update_user(&mut self, update: ProfileUpdate) -> Result<(), Self::Error>;
}

/// Profile kept in memory for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profile: UserProfile,
}

impl MemoryProfileStore {
    pub const fn new(profile: UserProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
}

impl ProfileStore for MemoryProfileStore {
    type Error = std::convert::Infallible;

    fn load(&self) -> Result<UserProfile, Self::Error> {
        Ok(self.profile.clone())
    }

    fn update_user(&mut self, update: ProfileUpdate) -> Result<(), Self::Error> {
        self.profile.apply(update);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_merges_updates() {
        let mut store = MemoryProfileStore::default();

        store
            .update_user(ProfileUpdate {
                height_cm: Some(180.0),
                ..Default::default()
            })
            .unwrap();
        store.update_user(ProfileUpdate::stride(Some(0.8))).unwrap();

        let profile = store.load().unwrap();
        assert_eq!(profile.height_cm, Some(180.0));
        assert_eq!(profile.custom_stride_length_m, Some(0.8));
    }
}
