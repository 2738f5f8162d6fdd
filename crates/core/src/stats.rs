//! Read-only aggregation over the record collections.
//!
//! Everything here is a derived view; nothing in this module mutates
//! or persists a collection. Grouped counts are kept in
//! first-encounter order, which doubles as the documented tie-break
//! order for "most popular" questions.

use crate::models::{Game, Platform};

/// Derived statistics for one profile's shelf.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats {
    /// Number of games the profile owns.
    pub total_games: usize,
    /// Sum of recorded playtime.
    pub total_hours: f64,
    /// Mean rating rounded to one decimal, or `0.0` with no games.
    pub average_rating: f64,
    /// Game counts per platform id, in first-encounter order.
    pub by_platform: Vec<(u64, usize)>,
    /// Game counts per genre, in first-encounter order.
    pub by_genre: Vec<(String, usize)>,
}

/// Per-platform slice of one profile's shelf.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformBreakdown {
    /// Platform the numbers belong to.
    pub platform_id: u64,
    /// Games the profile owns on this platform.
    pub total_games: usize,
    /// Mean rating rounded to one decimal, or `0.0` with no games.
    pub average_rating: f64,
    /// Sum of recorded playtime on this platform.
    pub total_hours: f64,
}

/// Compute the full statistics block for one profile.
pub fn profile_stats(profile_id: u64, games: &[Game]) -> ProfileStats {
    let shelf: Vec<&Game> = games
        .iter()
        .filter(|game| game.profile_id == profile_id)
        .collect();

    ProfileStats {
        total_games: shelf.len(),
        total_hours: shelf.iter().map(|game| game.hours_played).sum(),
        average_rating: average_rating(&shelf),
        by_platform: count_by(shelf.iter().map(|game| game.platform_id)),
        by_genre: count_by(shelf.iter().map(|game| game.genre.clone())),
    }
}

/// The key with the strictly-greatest count. Ties go to the earliest
/// key in the slice, i.e. the first one encountered in the source
/// collection's order. `None` for an empty mapping.
pub fn most_popular<K>(counts: &[(K, usize)]) -> Option<&K> {
    let mut best: Option<(&K, usize)> = None;
    for (key, count) in counts {
        if best.map(|(_, top)| *count > top).unwrap_or(true) {
            best = Some((key, *count));
        }
    }
    best.map(|(key, _)| key)
}

/// The profile's strictly-highest-rated game. Ties go to the first
/// game in collection order; `None` for an empty shelf. The caller
/// renders its own placeholder for `None`.
pub fn top_rated_game(profile_id: u64, games: &[Game]) -> Option<&Game> {
    let mut best: Option<&Game> = None;
    for game in games.iter().filter(|game| game.profile_id == profile_id) {
        if best.map(|top| game.rating > top.rating).unwrap_or(true) {
            best = Some(game);
        }
    }
    best
}

/// The profile's most recently added games, newest first.
pub fn recent_games(profile_id: u64, games: &[Game], limit: usize) -> Vec<&Game> {
    let mut shelf: Vec<&Game> = games
        .iter()
        .filter(|game| game.profile_id == profile_id)
        .collect();
    shelf.sort_by(|a, b| b.added_at.cmp(&a.added_at));
    shelf.truncate(limit);
    shelf
}

/// Distinct genres on the profile's shelf, in first-encounter order.
/// Feeds the frontend's genre filter.
pub fn genres_for_profile(profile_id: u64, games: &[Game]) -> Vec<&str> {
    let mut genres: Vec<&str> = Vec::new();
    for game in games.iter().filter(|game| game.profile_id == profile_id) {
        if !genres.contains(&game.genre.as_str()) {
            genres.push(game.genre.as_str());
        }
    }
    genres
}

/// Per-platform statistics for one profile, one entry per known
/// platform (zero-game platforms included, platform order kept).
pub fn platform_breakdown(
    profile_id: u64,
    games: &[Game],
    platforms: &[Platform],
) -> Vec<PlatformBreakdown> {
    platforms
        .iter()
        .map(|platform| {
            let shelf: Vec<&Game> = games
                .iter()
                .filter(|game| {
                    game.profile_id == profile_id && game.platform_id == platform.id
                })
                .collect();
            PlatformBreakdown {
                platform_id: platform.id,
                total_games: shelf.len(),
                average_rating: average_rating(&shelf),
                total_hours: shelf.iter().map(|game| game.hours_played).sum(),
            }
        })
        .collect()
}

fn average_rating(shelf: &[&Game]) -> f64 {
    if shelf.is_empty() {
        // An empty shelf averages to 0, not NaN.
        return 0.0;
    }
    let sum: u32 = shelf.iter().map(|game| u32::from(game.rating)).sum();
    round_one_decimal(f64::from(sum) / shelf.len() as f64)
}

fn count_by<K: PartialEq>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn game(id: u64, profile_id: u64, platform_id: u64, genre: &str, rating: u8, hours: f64) -> Game {
        Game {
            id,
            title: format!("Game {id}"),
            platform_id,
            genre: genre.to_string(),
            rating,
            description: None,
            image_url: String::new(),
            release_year: None,
            tags: Vec::new(),
            profile_id,
            added_at: Utc::now() + Duration::seconds(id as i64),
            hours_played: hours,
        }
    }

    fn sample_shelf() -> Vec<Game> {
        vec![
            game(1, 1, 1, "RPG", 8, 10.0),
            game(2, 1, 1, "Shooter", 6, 5.0),
            game(3, 1, 2, "RPG", 10, 0.0),
            game(4, 2, 3, "Puzzle", 2, 100.0), // other profile, must not leak in
        ]
    }

    #[test]
    fn stats_for_the_worked_example() {
        let games = sample_shelf();
        let stats = profile_stats(1, &games);

        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.total_hours, 15.0);
        assert_eq!(stats.average_rating, 8.0);
        assert_eq!(stats.by_platform, vec![(1, 2), (2, 1)]);
        assert_eq!(
            stats.by_genre,
            vec![("RPG".to_string(), 2), ("Shooter".to_string(), 1)]
        );
    }

    #[test]
    fn stats_for_an_empty_shelf_are_all_zero() {
        let games = sample_shelf();
        let stats = profile_stats(42, &games);

        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.average_rating, 0.0);
        assert!(stats.by_platform.is_empty());
        assert!(stats.by_genre.is_empty());
    }

    #[test]
    fn average_rating_rounds_to_one_decimal() {
        let games = vec![
            game(1, 1, 1, "RPG", 8, 0.0),
            game(2, 1, 1, "RPG", 7, 0.0),
            game(3, 1, 1, "RPG", 7, 0.0),
        ];
        // 22 / 3 = 7.333... → 7.3
        assert_eq!(profile_stats(1, &games).average_rating, 7.3);
    }

    #[test]
    fn most_popular_breaks_ties_toward_the_earliest_key() {
        let counts = vec![(10u64, 2), (20u64, 2), (30u64, 1)];
        assert_eq!(most_popular(&counts), Some(&10));

        let empty: Vec<(u64, usize)> = Vec::new();
        assert_eq!(most_popular(&empty), None);
    }

    #[test]
    fn top_rated_picks_the_strict_maximum() {
        let games = sample_shelf();
        let top = top_rated_game(1, &games).expect("shelf not empty");
        assert_eq!(top.id, 3);
        assert_eq!(top.rating, 10);

        assert!(top_rated_game(42, &games).is_none());
    }

    #[test]
    fn top_rated_ties_go_to_collection_order() {
        let games = vec![
            game(1, 1, 1, "RPG", 9, 0.0),
            game(2, 1, 1, "RPG", 9, 0.0),
        ];
        assert_eq!(top_rated_game(1, &games).unwrap().id, 1);
    }

    #[test]
    fn recent_games_are_newest_first_and_limited() {
        let games = sample_shelf();
        let recent = recent_games(1, &games, 2);
        let ids: Vec<u64> = recent.iter().map(|game| game.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn genres_are_distinct_in_first_encounter_order() {
        let games = sample_shelf();
        assert_eq!(genres_for_profile(1, &games), vec!["RPG", "Shooter"]);
    }

    #[test]
    fn breakdown_covers_every_platform_including_empty_ones() {
        let games = sample_shelf();
        let platforms = vec![
            platform(1, "PC"),
            platform(2, "Switch"),
            platform(9, "Dreamcast"),
        ];

        let breakdown = platform_breakdown(1, &games, &platforms);
        assert_eq!(breakdown.len(), 3);

        assert_eq!(breakdown[0].total_games, 2);
        assert_eq!(breakdown[0].average_rating, 7.0);
        assert_eq!(breakdown[0].total_hours, 15.0);

        assert_eq!(breakdown[1].total_games, 1);
        assert_eq!(breakdown[1].average_rating, 10.0);

        assert_eq!(breakdown[2].total_games, 0);
        assert_eq!(breakdown[2].average_rating, 0.0);
        assert_eq!(breakdown[2].total_hours, 0.0);
    }

    fn platform(id: u64, name: &str) -> Platform {
        Platform {
            id,
            name: name.to_string(),
            manufacturer: None,
            release_year: None,
            icon: String::new(),
            color: String::new(),
            game_count: 0,
        }
    }
}
