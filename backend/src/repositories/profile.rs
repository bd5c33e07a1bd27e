//! Onboarding profile repository

use aiqo_shared::Profile;
use anyhow::Result;

use crate::storage::keys::PROFILE_KEY;
use crate::storage::KeyValueStore;

/// The onboarding profile
pub struct ProfileRepository;

impl ProfileRepository {
    /// Stored profile, or the default profile when absent or unreadable
    pub async fn load(store: &dyn KeyValueStore) -> Result<Profile> {
        let Some(raw) = store.get(PROFILE_KEY).await? else {
            tracing::debug!("No stored profile, using defaults");
            return Ok(Profile::default());
        };

        match serde_json::from_str::<Profile>(&raw) {
            Ok(profile) => Ok(profile),
            Err(e) => {
                tracing::warn!(error = %e, "Stored profile is malformed, using defaults");
                Ok(Profile::default())
            }
        }
    }

    /// Whether onboarding has been saved at least once
    pub async fn exists(store: &dyn KeyValueStore) -> Result<bool> {
        Ok(store.get(PROFILE_KEY).await?.is_some())
    }

    pub async fn save(store: &dyn KeyValueStore, profile: &Profile) -> Result<()> {
        let raw = serde_json::to_string(profile)?;
        store.set(PROFILE_KEY, &raw).await
    }
}
