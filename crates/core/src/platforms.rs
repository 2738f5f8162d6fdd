//! Platform lifecycle, default seeding, and the global game counts.

use tracing::info;

use crate::{
    models::{Game, NewPlatform, Platform, PlatformPatch},
    store::{RecordStore, StoreError, StoredCollection},
};

const COLLECTION: &str = "platforms";

/// Name reported for a platform reference that no longer resolves.
pub const UNKNOWN_PLATFORM: &str = "Unknown platform";

/// Manager responsible for the platform collection.
///
/// Sole writer of its collection, including the denormalised
/// `game_count` field; nothing else may persist platforms.
pub struct PlatformManager {
    store: RecordStore,
    platforms: StoredCollection<Platform>,
}

impl PlatformManager {
    /// Load the persisted collection. A genuinely absent blob seeds
    /// the stock platform list and persists it; a malformed blob is
    /// a fatal error.
    pub fn load(store: RecordStore) -> Result<Self, StoreError> {
        let platforms = match store.load(COLLECTION)? {
            Some(stored) => stored,
            None => {
                let seeded = stock_platforms();
                info!(count = seeded.records.len(), "seeding stock platforms");
                store.save(COLLECTION, &seeded)?;
                seeded
            }
        };
        Ok(Self { store, platforms })
    }

    /// Register a platform. Its `game_count` starts at zero.
    pub fn create(&mut self, draft: NewPlatform) -> Result<Platform, StoreError> {
        let platform = Platform {
            id: self.platforms.allocate_id(),
            name: draft.name,
            manufacturer: draft.manufacturer,
            release_year: draft.release_year,
            icon: draft.icon,
            color: draft.color,
            game_count: 0,
        };
        self.platforms.records.push(platform.clone());
        self.persist()?;
        Ok(platform)
    }

    /// Look up a platform by id. A miss is an expected outcome.
    pub fn get(&self, id: u64) -> Option<&Platform> {
        self.platforms
            .records
            .iter()
            .find(|platform| platform.id == id)
    }

    /// Name of the platform, degrading to [`UNKNOWN_PLATFORM`] for a
    /// dangling reference instead of failing.
    pub fn name(&self, id: u64) -> &str {
        self.get(id)
            .map(|platform| platform.name.as_str())
            .unwrap_or(UNKNOWN_PLATFORM)
    }

    /// Merge a partial update into the stored record and persist.
    /// Returns `None` when the id does not exist.
    pub fn update(
        &mut self,
        id: u64,
        patch: PlatformPatch,
    ) -> Result<Option<Platform>, StoreError> {
        let Some(platform) = self
            .platforms
            .records
            .iter_mut()
            .find(|platform| platform.id == id)
        else {
            return Ok(None);
        };
        patch.apply(platform);
        let updated = platform.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    /// Delete a platform if present. Returns whether a deletion
    /// occurred. Games referencing it are left in place and resolve
    /// to [`UNKNOWN_PLATFORM`] from then on.
    pub fn delete(&mut self, id: u64) -> Result<bool, StoreError> {
        let before = self.platforms.records.len();
        self.platforms.records.retain(|platform| platform.id != id);
        if self.platforms.records.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// All platforms in insertion order.
    pub fn all(&self) -> &[Platform] {
        &self.platforms.records
    }

    /// Recompute every platform's `game_count` from the full game
    /// collection and persist. Counts are global across profiles.
    /// Call after any game create/delete that could change counts.
    pub fn refresh_game_counts(&mut self, games: &[Game]) -> Result<(), StoreError> {
        for platform in &mut self.platforms.records {
            platform.game_count = games
                .iter()
                .filter(|game| game.platform_id == platform.id)
                .count() as u64;
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(COLLECTION, &self.platforms)
    }
}

/// The platform list seeded on first run, mirroring the stock set a
/// fresh install starts with.
fn stock_platforms() -> StoredCollection<Platform> {
    let entries = [
        ("PC", Some("Various"), Some(1970), "fas fa-desktop", "#6c5ce7"),
        ("PlayStation 5", Some("Sony"), Some(2020), "fas fa-gamepad", "#0070d1"),
        ("Xbox Series X", Some("Microsoft"), Some(2020), "fas fa-gamepad", "#107c10"),
        ("Nintendo Switch", Some("Nintendo"), Some(2017), "fas fa-gamepad", "#e60012"),
        ("PlayStation 4", Some("Sony"), Some(2013), "fas fa-gamepad", "#0070d1"),
        ("Xbox One", Some("Microsoft"), Some(2013), "fas fa-gamepad", "#107c10"),
        ("Mobile", Some("Various"), Some(2007), "fas fa-mobile-alt", "#9b59b6"),
    ];

    let mut collection = StoredCollection::default();
    for (name, manufacturer, release_year, icon, color) in entries {
        let id = collection.allocate_id();
        collection.records.push(Platform {
            id,
            name: name.to_string(),
            manufacturer: manufacturer.map(str::to_string),
            release_year,
            icon: icon.to_string(),
            color: color.to_string(),
            game_count: 0,
        });
    }
    collection
}
