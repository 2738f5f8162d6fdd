//! Game lifecycle, filtered listings, and search.

use chrono::Utc;

use crate::{
    models::{Game, GamePatch, NewGame},
    store::{RecordStore, StoreError, StoredCollection},
};

const COLLECTION: &str = "games";

/// Manager responsible for the game collection.
///
/// Holds the in-memory copy of the collection and is its sole
/// writer; every mutation persists the full collection immediately.
pub struct GameManager {
    store: RecordStore,
    games: StoredCollection<Game>,
}

impl GameManager {
    /// Load the persisted collection, starting empty when absent.
    pub fn load(store: RecordStore) -> Result<Self, StoreError> {
        let games = store.load(COLLECTION)?.unwrap_or_default();
        Ok(Self { store, games })
    }

    /// Add a game, stamp its added time, persist, and return the
    /// stored record. Playtime defaults to zero when omitted.
    pub fn create(&mut self, draft: NewGame) -> Result<Game, StoreError> {
        let game = Game {
            id: self.games.allocate_id(),
            title: draft.title,
            platform_id: draft.platform_id,
            genre: draft.genre,
            rating: draft.rating,
            description: draft.description,
            image_url: draft.image_url,
            release_year: draft.release_year,
            tags: draft.tags,
            profile_id: draft.profile_id,
            added_at: Utc::now(),
            hours_played: draft.hours_played.unwrap_or(0.0),
        };
        self.games.records.push(game.clone());
        self.persist()?;
        Ok(game)
    }

    /// Look up a game by id. A miss is an expected outcome.
    pub fn get(&self, id: u64) -> Option<&Game> {
        self.games.records.iter().find(|game| game.id == id)
    }

    /// Merge a partial update into the stored record and persist.
    /// Returns `None` when the id does not exist.
    pub fn update(&mut self, id: u64, patch: GamePatch) -> Result<Option<Game>, StoreError> {
        let Some(game) = self.games.records.iter_mut().find(|game| game.id == id) else {
            return Ok(None);
        };
        patch.apply(game);
        let updated = game.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    /// Delete a game if present. Returns whether a deletion occurred.
    pub fn delete(&mut self, id: u64) -> Result<bool, StoreError> {
        let before = self.games.records.len();
        self.games.records.retain(|game| game.id != id);
        if self.games.records.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Delete every game whose id appears in `ids`, persisting once.
    /// Returns the number of games removed. The confirmation prompt
    /// belongs to the caller.
    pub fn delete_many(&mut self, ids: &[u64]) -> Result<usize, StoreError> {
        let before = self.games.records.len();
        self.games.records.retain(|game| !ids.contains(&game.id));
        let removed = before - self.games.records.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Delete every game a profile holds on the given platform,
    /// persisting once. Returns the number of games removed.
    pub fn delete_by_platform(
        &mut self,
        profile_id: u64,
        platform_id: u64,
    ) -> Result<usize, StoreError> {
        let before = self.games.records.len();
        self.games
            .records
            .retain(|game| !(game.profile_id == profile_id && game.platform_id == platform_id));
        let removed = before - self.games.records.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// All games in insertion order.
    pub fn all(&self) -> &[Game] {
        &self.games.records
    }

    /// Games owned by the given profile, in insertion order.
    pub fn by_profile(&self, profile_id: u64) -> Vec<&Game> {
        self.games
            .records
            .iter()
            .filter(|game| game.profile_id == profile_id)
            .collect()
    }

    /// Games referencing the given platform, across all profiles.
    pub fn by_platform(&self, platform_id: u64) -> Vec<&Game> {
        self.games
            .records
            .iter()
            .filter(|game| game.platform_id == platform_id)
            .collect()
    }

    /// Games with an exact genre label match.
    pub fn by_genre(&self, genre: &str) -> Vec<&Game> {
        self.games
            .records
            .iter()
            .filter(|game| game.genre == genre)
            .collect()
    }

    /// Filter games using a case-insensitive substring search over
    /// title, genre, description, and tags. An empty or whitespace
    /// query returns the full list; the caller decides when a filter
    /// applies at all.
    pub fn search(&self, query: &str) -> Vec<&Game> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.games.records.iter().collect();
        }

        self.games
            .records
            .iter()
            .filter(|game| {
                game.title.to_lowercase().contains(&needle)
                    || game.genre.to_lowercase().contains(&needle)
                    || game
                        .description
                        .as_ref()
                        .map(|value| value.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                    || game
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            })
            .collect()
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(COLLECTION, &self.games)
    }
}
