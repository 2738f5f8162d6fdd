//! Profile lifecycle and persistence.

use chrono::Utc;

use crate::{
    models::{NewProfile, Profile, ProfilePatch},
    store::{RecordStore, StoreError, StoredCollection},
};

const COLLECTION: &str = "profiles";

/// Manager responsible for the profile collection.
///
/// Holds the in-memory copy of the collection and is its sole
/// writer; every mutation persists the full collection immediately.
pub struct ProfileManager {
    store: RecordStore,
    profiles: StoredCollection<Profile>,
}

impl ProfileManager {
    /// Load the persisted collection, starting empty when absent.
    pub fn load(store: RecordStore) -> Result<Self, StoreError> {
        let profiles = store.load(COLLECTION)?.unwrap_or_default();
        Ok(Self { store, profiles })
    }

    /// Create a profile, stamp its creation time, persist, and
    /// return the stored record.
    pub fn create(&mut self, draft: NewProfile) -> Result<Profile, StoreError> {
        let profile = Profile {
            id: self.profiles.allocate_id(),
            name: draft.name,
            age: draft.age,
            email: draft.email,
            phone: draft.phone,
            photo: draft.photo,
            created_at: Utc::now(),
        };
        self.profiles.records.push(profile.clone());
        self.persist()?;
        Ok(profile)
    }

    /// Look up a profile by id. A miss is an expected outcome.
    pub fn get(&self, id: u64) -> Option<&Profile> {
        self.profiles.records.iter().find(|profile| profile.id == id)
    }

    /// Merge a partial update into the stored record and persist.
    /// Returns `None` when the id does not exist.
    pub fn update(&mut self, id: u64, patch: ProfilePatch) -> Result<Option<Profile>, StoreError> {
        let Some(profile) = self
            .profiles
            .records
            .iter_mut()
            .find(|profile| profile.id == id)
        else {
            return Ok(None);
        };
        patch.apply(profile);
        let updated = profile.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    /// Delete a profile if present. Returns whether a deletion
    /// occurred. Games owned by the profile are left in place; their
    /// `profile_id` simply stops resolving.
    pub fn delete(&mut self, id: u64) -> Result<bool, StoreError> {
        let before = self.profiles.records.len();
        self.profiles.records.retain(|profile| profile.id != id);
        if self.profiles.records.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// All profiles in insertion order.
    pub fn all(&self) -> &[Profile] {
        &self.profiles.records
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(COLLECTION, &self.profiles)
    }
}
