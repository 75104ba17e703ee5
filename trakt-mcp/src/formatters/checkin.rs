use super::display_time;
use std::fmt::Write;
use trakt_api::endpoints::checkin::Checkin;

pub fn format_checkin(checkin: &Checkin) -> String {
    let show_title = checkin
        .show
        .as_ref()
        .map(|show| show.title.as_str())
        .unwrap_or("Unknown show");
    let (season, number, episode_title) = match &checkin.episode {
        Some(episode) => (
            episode.season,
            episode.number,
            episode.title.as_deref().unwrap_or("Unknown episode"),
        ),
        None => (0, 0, "Unknown episode"),
    };

    let mut out = "# Successfully Checked In\n\n".to_string();
    let _ = write!(
        out,
        "You are now checked in to **{}** - S{:02}E{:02}: {}\n\n",
        show_title, season, number, episode_title
    );
    let _ = write!(out, "Watched at: {} UTC\n\n", display_time(&checkin.watched_at));

    let platforms = checkin.sharing.platforms();
    if !platforms.is_empty() {
        let _ = write!(out, "Shared on: {}\n\n", platforms.join(", "));
    }

    let _ = writeln!(out, "Checkin ID: {}", checkin.id);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn confirmation_lists_episode_and_sharing() {
        let checkin: Checkin = serde_json::from_value(json!({
            "id": 3373536619u64,
            "watched_at": "2024-05-10T21:30:00.000Z",
            "sharing": {"twitter": true, "mastodon": false, "tumblr": true},
            "show": {"title": "Breaking Bad", "year": 2008, "ids": {"trakt": 1388}},
            "episode": {"season": 1, "number": 1, "title": "Pilot", "ids": {"trakt": 73482}}
        }))
        .unwrap();

        let out = format_checkin(&checkin);
        assert!(out.contains("You are now checked in to **Breaking Bad** - S01E01: Pilot"));
        assert!(out.contains("Watched at: 2024-05-10 21:30:00 UTC"));
        assert!(out.contains("Shared on: Twitter, Tumblr"));
        assert!(out.contains("Checkin ID: 3373536619"));
    }

    #[test]
    fn sharing_line_is_skipped_when_nothing_shared() {
        let checkin: Checkin = serde_json::from_value(json!({
            "id": 1,
            "watched_at": "2024-05-10T21:30:00Z",
            "show": {"title": "Dark"},
            "episode": {"season": 2, "number": 3}
        }))
        .unwrap();

        let out = format_checkin(&checkin);
        assert!(out.contains("**Dark** - S02E03: Unknown episode"));
        assert!(!out.contains("Shared on"));
    }
}
