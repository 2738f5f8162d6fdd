//! Shared domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user identity scoping a subset of the game collection.
///
/// Profiles are not authentication principals; they carry no
/// credentials and no permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Counter-assigned identifier, unique within the collection.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Contact email.
    pub email: String,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Optional avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Timestamp stamped at creation.
    pub created_at: DateTime<Utc>,
}

/// A game attached to a profile's shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Counter-assigned identifier, unique within the collection.
    pub id: u64,
    /// Game title.
    pub title: String,
    /// Id of the platform this copy belongs to. May reference a
    /// platform that no longer exists; lookups tolerate the miss.
    pub platform_id: u64,
    /// Genre label.
    pub genre: String,
    /// Rating in the 0–10 range. Accepted as-is; range checks are
    /// the caller's responsibility.
    pub rating: u8,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cover image URL.
    pub image_url: String,
    /// Optional release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    /// Free-form tags, in the order the owner entered them.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Id of the owning profile. Not enforced at write time; deleting
    /// a profile leaves its games in place.
    pub profile_id: u64,
    /// Timestamp stamped when the game was added.
    pub added_at: DateTime<Utc>,
    /// Hours of recorded playtime.
    #[serde(default)]
    pub hours_played: f64,
}

/// A gaming system/device tag attached to games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Counter-assigned identifier, unique within the collection.
    pub id: u64,
    /// Platform name.
    pub name: String,
    /// Optional manufacturer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Optional release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    /// Display icon tag for the frontend.
    pub icon: String,
    /// Display colour tag for the frontend.
    pub color: String,
    /// Denormalised count of games referencing this platform across
    /// all profiles. Refreshed by the platform manager after game
    /// collection changes; intentionally global, not per-profile.
    #[serde(default)]
    pub game_count: u64,
}

/// Fields the caller supplies when creating a profile.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Contact email.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional avatar URL.
    pub photo: Option<String>,
}

/// Fields the caller supplies when adding a game.
#[derive(Debug, Clone, Default)]
pub struct NewGame {
    /// Game title.
    pub title: String,
    /// Platform reference.
    pub platform_id: u64,
    /// Genre label.
    pub genre: String,
    /// Rating in the 0–10 range.
    pub rating: u8,
    /// Optional longer description.
    pub description: Option<String>,
    /// Cover image URL.
    pub image_url: String,
    /// Optional release year.
    pub release_year: Option<i32>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Owning profile reference.
    pub profile_id: u64,
    /// Hours of playtime; defaults to zero when omitted.
    pub hours_played: Option<f64>,
}

/// Fields the caller supplies when registering a platform.
#[derive(Debug, Clone, Default)]
pub struct NewPlatform {
    /// Platform name.
    pub name: String,
    /// Optional manufacturer.
    pub manufacturer: Option<String>,
    /// Optional release year.
    pub release_year: Option<i32>,
    /// Display icon tag.
    pub icon: String,
    /// Display colour tag.
    pub color: String,
}

/// Partial update for a [`Profile`]. Set fields overwrite, unset
/// fields keep their stored value. A patch never clears an optional
/// field back to `None`.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    /// New display name.
    pub name: Option<String>,
    /// New age.
    pub age: Option<u32>,
    /// New contact email.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New avatar URL.
    pub photo: Option<String>,
}

impl ProfilePatch {
    /// Merge the set fields into `profile`.
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            profile.phone = Some(phone.clone());
        }
        if let Some(photo) = &self.photo {
            profile.photo = Some(photo.clone());
        }
    }
}

/// Partial update for a [`Game`].
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    /// New title.
    pub title: Option<String>,
    /// New platform reference.
    pub platform_id: Option<u64>,
    /// New genre label.
    pub genre: Option<String>,
    /// New rating.
    pub rating: Option<u8>,
    /// New description.
    pub description: Option<String>,
    /// New cover image URL.
    pub image_url: Option<String>,
    /// New release year.
    pub release_year: Option<i32>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
    /// New playtime total.
    pub hours_played: Option<f64>,
}

impl GamePatch {
    /// Merge the set fields into `game`.
    pub fn apply(&self, game: &mut Game) {
        if let Some(title) = &self.title {
            game.title = title.clone();
        }
        if let Some(platform_id) = self.platform_id {
            game.platform_id = platform_id;
        }
        if let Some(genre) = &self.genre {
            game.genre = genre.clone();
        }
        if let Some(rating) = self.rating {
            game.rating = rating;
        }
        if let Some(description) = &self.description {
            game.description = Some(description.clone());
        }
        if let Some(image_url) = &self.image_url {
            game.image_url = image_url.clone();
        }
        if let Some(release_year) = self.release_year {
            game.release_year = Some(release_year);
        }
        if let Some(tags) = &self.tags {
            game.tags = tags.clone();
        }
        if let Some(hours_played) = self.hours_played {
            game.hours_played = hours_played;
        }
    }
}

/// Partial update for a [`Platform`]. The derived `game_count` cannot
/// be patched; it is recomputed from the game collection.
#[derive(Debug, Clone, Default)]
pub struct PlatformPatch {
    /// New platform name.
    pub name: Option<String>,
    /// New manufacturer.
    pub manufacturer: Option<String>,
    /// New release year.
    pub release_year: Option<i32>,
    /// New display icon tag.
    pub icon: Option<String>,
    /// New display colour tag.
    pub color: Option<String>,
}

impl PlatformPatch {
    /// Merge the set fields into `platform`.
    pub fn apply(&self, platform: &mut Platform) {
        if let Some(name) = &self.name {
            platform.name = name.clone();
        }
        if let Some(manufacturer) = &self.manufacturer {
            platform.manufacturer = Some(manufacturer.clone());
        }
        if let Some(release_year) = self.release_year {
            platform.release_year = Some(release_year);
        }
        if let Some(icon) = &self.icon {
            platform.icon = icon.clone();
        }
        if let Some(color) = &self.color {
            platform.color = color.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_game() -> Game {
        Game {
            id: 1,
            title: "Hollow Knight".to_string(),
            platform_id: 4,
            genre: "Metroidvania".to_string(),
            rating: 9,
            description: None,
            image_url: "https://example.com/hk.jpg".to_string(),
            release_year: Some(2017),
            tags: vec!["indie".to_string()],
            profile_id: 1,
            added_at: Utc::now(),
            hours_played: 40.0,
        }
    }

    #[test]
    fn patch_overwrites_only_set_fields() {
        let mut game = sample_game();
        let patch = GamePatch {
            rating: Some(10),
            hours_played: Some(55.5),
            ..GamePatch::default()
        };
        patch.apply(&mut game);

        assert_eq!(game.rating, 10);
        assert_eq!(game.hours_played, 55.5);
        assert_eq!(game.title, "Hollow Knight");
        assert_eq!(game.tags, vec!["indie".to_string()]);
    }

    #[test]
    fn patch_never_clears_optionals() {
        let mut game = sample_game();
        game.description = Some("A bug crawls downward.".to_string());
        GamePatch::default().apply(&mut game);
        assert!(game.description.is_some());
    }
}
