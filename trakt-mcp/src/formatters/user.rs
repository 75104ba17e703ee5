use super::{display_time, push_list_entry};
use chrono::{DateTime, Utc};
use trakt_api::endpoints::sync::{WatchedMovie, WatchedShow};

fn watched_detail(last_watched_at: Option<&DateTime<Utc>>, plays: u64) -> String {
    let last = last_watched_at
        .map(display_time)
        .unwrap_or_else(|| "Unknown".to_string());
    format!("Watched: {}, Plays: {}", last, plays)
}

pub fn format_user_watched_shows(shows: &[WatchedShow]) -> String {
    let mut out = "# Your Watched Shows on Trakt\n\n".to_string();
    if shows.is_empty() {
        out.push_str("You haven't watched any shows yet, or you need to authenticate first.");
        return out;
    }

    for item in shows {
        push_list_entry(
            &mut out,
            &item.show.title,
            item.show.year,
            Some(watched_detail(item.last_watched_at.as_ref(), item.plays)),
            item.show.overview.as_deref(),
        );
    }
    out
}

pub fn format_user_watched_movies(movies: &[WatchedMovie]) -> String {
    let mut out = "# Your Watched Movies on Trakt\n\n".to_string();
    if movies.is_empty() {
        out.push_str("You haven't watched any movies yet, or you need to authenticate first.");
        return out;
    }

    for item in movies {
        push_list_entry(
            &mut out,
            &item.movie.title,
            item.movie.year,
            Some(watched_detail(item.last_watched_at.as_ref(), item.plays)),
            item.movie.overview.as_deref(),
        );
    }
    out
}
