use super::title_with_year;
use itertools::Itertools;
use std::cmp::Reverse;
use std::fmt::Write;
use trakt_api::endpoints::sync::{RatingItem, RatingsSummary, UserRating};
use trakt_api::endpoints::MediaType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingChange {
    Added,
    Removed,
}

impl RatingChange {
    fn as_str(&self) -> &'static str {
        match self {
            RatingChange::Added => "added",
            RatingChange::Removed => "removed",
        }
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn rated_title(rating: &UserRating) -> String {
    let show = rating.show.as_ref();
    let show_year = show.and_then(|s| s.year);

    if let (Some(episode), Some(show)) = (&rating.episode, show) {
        let mut title = format!("{} - S{:02}E{:02}", show.title, episode.season, episode.number);
        if let Some(name) = episode.title.as_deref().filter(|t| !t.is_empty()) {
            let _ = write!(title, ": {}", name);
        }
        return title_with_year(&title, show_year);
    }
    if let (Some(season), Some(show)) = (&rating.season, show) {
        return title_with_year(&format!("{} - Season {}", show.title, season.number), show_year);
    }
    if let Some(movie) = &rating.movie {
        return title_with_year(&movie.title, movie.year);
    }
    match show {
        Some(show) => title_with_year(&show.title, show_year),
        None => "Unknown".to_string(),
    }
}

/// The user's ratings grouped by score, highest first.
pub fn format_user_ratings(ratings: &[UserRating], kind: MediaType, filter: Option<u8>) -> String {
    let name = capitalized(kind.as_str());

    if ratings.is_empty() {
        let filter_text = filter.map(|r| format!(" with rating {}", r)).unwrap_or_default();
        return format!(
            "# Your {} Ratings{}\n\nYou haven't rated any {} yet{}. Use the `add_user_ratings` tool to add ratings for your {}.",
            name, filter_text, kind, filter_text, kind
        );
    }

    let filter_text = filter
        .map(|r| format!(" (filtered to rating {})", r))
        .unwrap_or_default();
    let mut out = format!("# Your {} Ratings{}\n\n", name, filter_text);
    let _ = write!(out, "Found {} rated {}:\n\n", ratings.len(), kind);

    let by_score = ratings.iter().sorted_by_key(|r| Reverse(r.rating)).chunk_by(|r| r.rating);
    for (score, group) in &by_score {
        let group: Vec<_> = group.collect();
        let _ = write!(out, "## Rating {}/10 ({} {})\n\n", score, group.len(), kind);
        for rating in group {
            let _ = writeln!(
                out,
                "- **{}** (rated {})",
                rated_title(rating),
                rating.rated_at.format("%Y-%m-%d")
            );
        }
        out.push('\n');
    }
    out
}

fn describe_missing(item: &RatingItem) -> String {
    if let Some(title) = &item.title {
        return title_with_year(title, item.year);
    }

    let ids = &item.ids;
    let parts = [
        ids.trakt.map(|id| format!("trakt: {}", id)),
        ids.slug.as_ref().map(|id| format!("slug: {}", id)),
        ids.imdb.as_ref().map(|id| format!("imdb: {}", id)),
        ids.tmdb.map(|id| format!("tmdb: {}", id)),
        ids.tvdb.map(|id| format!("tvdb: {}", id)),
    ]
    .into_iter()
    .flatten()
    .join(", ");

    if parts.is_empty() {
        "Unknown item".to_string()
    } else {
        parts
    }
}

/// Outcome of adding or removing ratings, including anything Trakt could not match.
pub fn format_ratings_summary(summary: &RatingsSummary, change: RatingChange, kind: MediaType) -> String {
    let verb = change.as_str();
    let mut out = format!("# Ratings {} - {}\n\n", capitalized(verb), capitalized(kind.as_str()));

    let counts = match change {
        RatingChange::Added => summary.added,
        RatingChange::Removed => summary.deleted,
    };
    match counts.filter(|c| c.get(kind) > 0) {
        Some(counts) => {
            let _ = write!(
                out,
                "✅ Successfully {} **{}** {} rating(s).\n\n",
                verb,
                counts.get(kind),
                kind
            );

            let breakdown: Vec<String> = MediaType::ALL
                .into_iter()
                .filter(|t| counts.get(*t) > 0)
                .map(|t| format!("{}: {}", capitalized(t.as_str()), counts.get(t)))
                .collect();
            if breakdown.len() > 1 {
                out.push_str("### Breakdown by Type\n");
                for line in breakdown {
                    let _ = writeln!(out, "- {}", line);
                }
                out.push('\n');
            }
        }
        None => {
            let _ = write!(out, "No {} ratings were {}.\n\n", kind, verb);
        }
    }

    let missing = summary.not_found.get(kind);
    if !missing.is_empty() {
        let _ = write!(out, "## Items Not Found ({})\n\n", missing.len());
        out.push_str("The following items could not be found on Trakt:\n\n");
        for item in missing {
            let _ = writeln!(out, "- {}", describe_missing(item));
        }
        out.push_str("\nPlease check the titles, years, and IDs for accuracy.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ratings() -> Vec<UserRating> {
        serde_json::from_value(json!([
            {
                "rated_at": "2024-02-01T10:00:00.000Z",
                "rating": 8,
                "type": "episode",
                "show": {"title": "Breaking Bad", "year": 2008},
                "episode": {"season": 5, "number": 14, "title": "Ozymandias"}
            },
            {
                "rated_at": "2024-01-01T10:00:00.000Z",
                "rating": 10,
                "type": "season",
                "show": {"title": "Breaking Bad", "year": 2008},
                "season": {"number": 5}
            }
        ]))
        .unwrap()
    }

    #[test]
    fn grouped_by_score_highest_first() {
        let out = format_user_ratings(&ratings(), MediaType::Episodes, None);
        assert!(out.starts_with("# Your Episodes Ratings\n\nFound 2 rated episodes:"));
        assert!(out.contains("- **Breaking Bad - S05E14: Ozymandias (2008)** (rated 2024-02-01)"));
        assert!(out.contains("- **Breaking Bad - Season 5 (2008)** (rated 2024-01-01)"));
        assert!(out.find("## Rating 10/10").unwrap() < out.find("## Rating 8/10").unwrap());
    }

    #[test]
    fn empty_ratings_mention_filter() {
        let out = format_user_ratings(&[], MediaType::Movies, Some(7));
        assert!(out.starts_with("# Your Movies Ratings with rating 7\n\nYou haven't rated any movies yet with rating 7."));
    }

    #[test]
    fn summary_lists_missing_items_by_id() {
        let summary: RatingsSummary = serde_json::from_value(json!({
            "added": {"movies": 2, "episodes": 1},
            "not_found": {"movies": [{"ids": {"imdb": "tt0000001"}}, {"title": "Nope", "year": 1999, "ids": {}}]}
        }))
        .unwrap();

        let out = format_ratings_summary(&summary, RatingChange::Added, MediaType::Movies);
        assert!(out.starts_with("# Ratings Added - Movies\n\n✅ Successfully added **2** movies rating(s)."));
        assert!(out.contains("### Breakdown by Type\n- Movies: 2\n- Episodes: 1\n"));
        assert!(out.contains("## Items Not Found (2)"));
        assert!(out.contains("- imdb: tt0000001\n"));
        assert!(out.contains("- Nope (1999)\n"));
    }

    #[test]
    fn nothing_removed() {
        let summary: RatingsSummary = serde_json::from_value(json!({"deleted": {}})).unwrap();
        let out = format_ratings_summary(&summary, RatingChange::Removed, MediaType::Shows);
        assert!(out.contains("No shows ratings were removed."));
        assert!(!out.contains("Not Found"));
    }
}
