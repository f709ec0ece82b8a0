//! Plain-text views.

use std::fmt::Write;

use castlist_api::catalog::{Show, ShowPreview};
use castlist_core::genre;
use castlist_core::models::FavoriteEntry;
use castlist_core::pipeline::format_updated;

pub fn show_list(shows: &[ShowPreview]) -> String {
    if shows.is_empty() {
        return "No shows match.\n".to_string();
    }
    let mut out = String::new();
    for show in shows {
        let _ = writeln!(out, "[{}] {}", show.id, show.title);
        let _ = writeln!(
            out,
            "    Seasons: {}  Updated: {}",
            show.seasons,
            format_updated(&show.updated)
        );
        let genres = genre::genre_names(&show.genres);
        if !genres.is_empty() {
            let _ = writeln!(out, "    Genres: {}", genres.join(", "));
        }
    }
    out
}

/// Detail view for one season. `is_favorite` marks favorited episodes.
pub fn show_detail(show: &Show, season: u32, is_favorite: impl Fn(u32) -> bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", show.title);
    if !show.description.is_empty() {
        let _ = writeln!(out, "{}", show.description);
    }
    let genres = genre::genre_names(&show.genres);
    if !genres.is_empty() {
        let _ = writeln!(out, "Genres: {}", genres.join(", "));
    }
    let _ = writeln!(out, "Updated: {}", format_updated(&show.updated));

    let seasons = show.season_numbers();
    if seasons.is_empty() {
        let _ = writeln!(out, "\nNo seasons available.");
        return out;
    }
    let list: Vec<String> = seasons.iter().map(u32::to_string).collect();
    let _ = writeln!(out, "Seasons: {}", list.join(" "));

    let _ = writeln!(out, "\nSeason {season}");
    let episodes = show.episodes_for_season(season);
    if episodes.is_empty() {
        let _ = writeln!(out, "  No episodes.");
    }
    for episode in episodes {
        let marker = if is_favorite(episode.episode) { "*" } else { " " };
        let _ = writeln!(out, "{marker} Episode {}: {}", episode.episode, episode.title);
        if !episode.file.is_empty() {
            let _ = writeln!(out, "    {}", episode.file);
        }
    }
    out
}

pub fn favorites(groups: &[(String, Vec<FavoriteEntry>)]) -> String {
    if groups.is_empty() {
        return "No favorites yet.\n".to_string();
    }
    let mut out = String::new();
    for (show_name, entries) in groups {
        let name = if show_name.is_empty() {
            "(unknown show)"
        } else {
            show_name
        };
        let _ = writeln!(out, "{name}");
        for entry in entries {
            let _ = writeln!(
                out,
                "  S{}E{} {}  [{}]",
                entry.season, entry.episode_number, entry.title, entry.key
            );
            if !entry.time_added.is_empty() {
                let _ = writeln!(out, "      added {}", entry.time_added);
            }
        }
    }
    out
}

pub fn genres() -> String {
    genre::GENRES.iter().fold(String::new(), |mut out, g| {
        let _ = writeln!(out, "{g}");
        out
    })
}
