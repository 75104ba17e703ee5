use super::{display_time, title_with_year};
use std::fmt::Write;
use trakt_api::endpoints::progress::{PlaybackItem, SeasonProgress, WatchedProgress};
use trakt_api::endpoints::Episode;

fn percent(done: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    }
}

fn episode_label(episode: &Episode) -> String {
    let mut label = format!("S{:02}E{:02}", episode.season, episode.number);
    if let Some(title) = episode.title.as_deref().filter(|t| !t.is_empty()) {
        let _ = write!(label, ": {}", title);
    }
    label
}

fn season_status(season: &SeasonProgress) -> String {
    if season.is_complete() {
        "Complete (100%)".to_string()
    } else {
        format!(
            "{}/{} ({:.0}%)",
            season.completed,
            season.aired,
            percent(season.completed, season.aired)
        )
    }
}

fn season_label(number: u32) -> String {
    if number == 0 {
        "Specials".to_string()
    } else {
        format!("Season {}", number)
    }
}

fn push_season_detail(out: &mut String, season: &SeasonProgress) {
    let _ = write!(out, "### {}\n\n**Progress:** {}\n\n", season_label(season.number), season_status(season));
    for episode in &season.episodes {
        let mark = if episode.completed { "x" } else { " " };
        let _ = match (episode.completed, &episode.last_watched_at) {
            (true, Some(at)) => writeln!(
                out,
                "- [{}] **E{:02}** - Watched: {}",
                mark,
                episode.number,
                display_time(at)
            ),
            (true, None) => writeln!(out, "- [{}] **E{:02}** - Watched", mark, episode.number),
            (false, _) => writeln!(out, "- [{}] **E{:02}** - Not watched", mark, episode.number),
        };
    }
    out.push('\n');
}

/// Overall and per-season progress; `verbose` lists every episode.
pub fn format_show_progress(progress: &WatchedProgress, show_id: &str, verbose: bool) -> String {
    let mut out = format!("# Show Progress: {}\n\n## Overall Progress\n\n", show_id);
    let _ = writeln!(
        out,
        "- **Watched:** {}/{} episodes ({:.1}%)",
        progress.completed,
        progress.aired,
        percent(progress.completed, progress.aired)
    );
    if let Some(at) = &progress.last_watched_at {
        let _ = writeln!(out, "- **Last Watched:** {}", display_time(at));
    }
    if let Some(at) = &progress.reset_at {
        let _ = writeln!(out, "- **Progress Reset At:** {}", display_time(at));
    }
    out.push('\n');

    if let Some(next) = &progress.next_episode {
        let _ = write!(out, "## Up Next\n\n- **{}**\n\n", episode_label(next));
    }
    if let Some(last) = &progress.last_episode {
        let _ = write!(out, "## Last Watched\n\n- **{}**\n\n", episode_label(last));
    }

    if !progress.seasons.is_empty() {
        out.push_str("## Season Progress\n\n");
        for season in &progress.seasons {
            if verbose {
                push_season_detail(&mut out, season);
            } else {
                let _ = writeln!(out, "- **{}:** {}", season_label(season.number), season_status(season));
            }
        }
    }

    if !progress.hidden_seasons.is_empty() {
        out.push_str("\n## Hidden Seasons\n\n");
        for hidden in &progress.hidden_seasons {
            let _ = writeln!(out, "- Season {}", hidden.number);
        }
    }
    out
}

fn push_playback(out: &mut String, heading: &str, item: &PlaybackItem) {
    let _ = write!(
        out,
        "- **{}**\n  - Progress: {:.1}%\n  - Paused: {}\n  - ID: {} (use with `remove_playback_item`)\n\n",
        heading,
        item.progress,
        display_time(&item.paused_at),
        item.id
    );
}

/// Paused movies and episodes, movies first.
pub fn format_playback_progress(items: &[PlaybackItem]) -> String {
    if items.is_empty() {
        return "# Playback Progress\n\nNo paused playback items found.\n\nItems appear here when you pause a movie or episode during playback.".to_string();
    }

    let plural = if items.len() == 1 { "" } else { "s" };
    let mut out = format!("# Playback Progress ({} item{})\n\n", items.len(), plural);

    let movies: Vec<_> = items.iter().filter(|i| i.movie.is_some()).collect();
    if !movies.is_empty() {
        out.push_str("## Movies\n\n");
        for item in movies {
            let heading = item
                .movie
                .as_ref()
                .map(|m| title_with_year(&m.title, m.year))
                .unwrap_or_default();
            push_playback(&mut out, &heading, item);
        }
    }

    let episodes: Vec<_> = items.iter().filter(|i| i.episode.is_some()).collect();
    if !episodes.is_empty() {
        out.push_str("## Episodes\n\n");
        for item in episodes {
            let show = item.show.as_ref().map(|s| s.title.as_str()).unwrap_or("Unknown Show");
            let heading = match &item.episode {
                Some(episode) => format!("{} - {}", show, episode_label(episode)),
                None => show.to_string(),
            };
            push_playback(&mut out, &heading, item);
        }
    }
    out
}

/// Confirmation after a paused item is dropped.
pub fn format_playback_removed(id: u64) -> String {
    format!("Successfully removed playback item with ID {}.", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn progress() -> WatchedProgress {
        serde_json::from_value(json!({
            "aired": 15,
            "completed": 9,
            "last_watched_at": "2024-05-01T21:00:00.000Z",
            "seasons": [
                {"number": 1, "aired": 7, "completed": 7, "episodes": [
                    {"number": 1, "completed": true, "last_watched_at": "2024-04-01T20:00:00.000Z"}
                ]},
                {"number": 2, "aired": 8, "completed": 2, "episodes": [
                    {"number": 3, "completed": false, "last_watched_at": null}
                ]}
            ],
            "hidden_seasons": [{"number": 4, "ids": {"trakt": 9}}],
            "next_episode": {"season": 2, "number": 3, "title": "Bit by a Dead Bee"}
        }))
        .unwrap()
    }

    #[test]
    fn compact_progress() {
        let out = format_show_progress(&progress(), "breaking-bad", false);
        assert!(out.starts_with("# Show Progress: breaking-bad\n\n## Overall Progress\n\n- **Watched:** 9/15 episodes (60.0%)"));
        assert!(out.contains("## Up Next\n\n- **S02E03: Bit by a Dead Bee**"));
        assert!(out.contains("- **Season 1:** Complete (100%)\n- **Season 2:** 2/8 (25%)\n"));
        assert!(out.contains("## Hidden Seasons\n\n- Season 4\n"));
        assert!(!out.contains("## Last Watched"));
    }

    #[test]
    fn verbose_progress_lists_episodes() {
        let out = format_show_progress(&progress(), "breaking-bad", true);
        assert!(out.contains("### Season 1\n\n**Progress:** Complete (100%)"));
        assert!(out.contains("- [x] **E01** - Watched: 2024-04-01 20:00:00"));
        assert!(out.contains("- [ ] **E03** - Not watched"));
    }

    #[test]
    fn playback_grouped_by_kind() {
        let items: Vec<PlaybackItem> = serde_json::from_value(json!([
            {
                "id": 13, "progress": 44.5, "paused_at": "2024-03-03T10:00:00.000Z", "type": "episode",
                "episode": {"season": 1, "number": 2, "title": "Cat's in the Bag..."},
                "show": {"title": "Breaking Bad", "year": 2008}
            },
            {
                "id": 14, "progress": 10.0, "paused_at": "2024-03-04T10:00:00.000Z", "type": "movie",
                "movie": {"title": "Heat", "year": 1995}
            }
        ]))
        .unwrap();

        let out = format_playback_progress(&items);
        assert!(out.starts_with("# Playback Progress (2 items)"));
        assert!(out.find("## Movies").unwrap() < out.find("## Episodes").unwrap());
        assert!(out.contains("- **Heat (1995)**\n  - Progress: 10.0%"));
        assert!(out.contains("- **Breaking Bad - S01E02: Cat's in the Bag...**"));
        assert!(out.contains("ID: 13 (use with `remove_playback_item`)"));
    }

    #[test]
    fn no_playback() {
        assert!(format_playback_progress(&[]).contains("No paused playback items found."));
    }
}
