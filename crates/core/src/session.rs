//! Session state: the currently-active profile.
//!
//! The active profile is persisted as its own snapshot blob, a copy
//! of the record rather than a reference into the profile
//! collection. Editing the profile through the manager does not
//! update the snapshot; callers re-snapshot explicitly after an edit
//! to the active profile.

use tracing::info;

use crate::{
    models::Profile,
    profiles::ProfileManager,
    store::{RecordStore, StoreError},
};

const SNAPSHOT: &str = "current_profile";

/// Session-scoped pointer to the active profile.
///
/// Constructed once at session start from the persisted snapshot and
/// passed to whichever component needs it; there is no module-level
/// session state.
pub struct Session {
    store: RecordStore,
    current: Option<Profile>,
}

impl Session {
    /// Restore the session, loading the persisted snapshot when one
    /// exists.
    pub fn load(store: RecordStore) -> Result<Self, StoreError> {
        let current = store.load(SNAPSHOT)?;
        Ok(Self { store, current })
    }

    /// Make the given profile the active one, persisting a snapshot
    /// copy. Returns `false` when the id does not resolve.
    pub fn select(&mut self, profiles: &ProfileManager, profile_id: u64) -> Result<bool, StoreError> {
        let Some(profile) = profiles.get(profile_id) else {
            return Ok(false);
        };
        let snapshot = profile.clone();
        self.store.save(SNAPSHOT, &snapshot)?;
        self.current = Some(snapshot);
        Ok(true)
    }

    /// The active profile, if any.
    pub fn current(&self) -> Option<&Profile> {
        self.current.as_ref()
    }

    /// Re-copy the active profile from the collection after an edit.
    /// Returns `false` when there is no active profile or it no
    /// longer exists (the stale snapshot is kept in that case).
    pub fn resnapshot(&mut self, profiles: &ProfileManager) -> Result<bool, StoreError> {
        let Some(profile_id) = self.current.as_ref().map(|profile| profile.id) else {
            return Ok(false);
        };
        self.select(profiles, profile_id)
    }

    /// End the session: forget the active profile and remove the
    /// snapshot blob.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        if self.current.take().is_some() {
            info!("clearing active profile");
        }
        self.store.remove(SNAPSHOT)?;
        Ok(())
    }
}
