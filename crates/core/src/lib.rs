#![warn(clippy::all, missing_docs)]

//! Core domain logic for the gamedex collection tracker.
//!
//! This crate hosts the record store, the profile/game/platform
//! managers, session state, and the aggregation queries any frontend
//! builds on. Rendering, form handling, and confirmation prompts for
//! destructive operations live entirely outside this crate.

pub mod config;
pub mod games;
pub mod models;
pub mod platforms;
pub mod profiles;
pub mod session;
pub mod stats;
pub mod store;

pub use config::AppConfig;
pub use games::GameManager;
pub use models::{
    Game, GamePatch, NewGame, NewPlatform, NewProfile, Platform, PlatformPatch, Profile,
    ProfilePatch,
};
pub use platforms::{PlatformManager, UNKNOWN_PLATFORM};
pub use profiles::ProfileManager;
pub use session::Session;
pub use stats::{
    genres_for_profile, most_popular, platform_breakdown, profile_stats, recent_games,
    top_rated_game, PlatformBreakdown, ProfileStats,
};
pub use store::{RecordStore, StoreError, StoredCollection};
