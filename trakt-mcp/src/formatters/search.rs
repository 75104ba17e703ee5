use super::{title_with_year, truncate};
use std::fmt::Write;
use trakt_api::endpoints::search::SearchResult;
use trakt_api::endpoints::Ids;

const OVERVIEW_LIMIT: usize = 200;

struct Hit<'a> {
    title: &'a str,
    year: Option<i32>,
    ids: &'a Ids,
    overview: Option<&'a str>,
}

fn render(kind: &str, hits: Vec<Hit<'_>>, id_hint: &str, footer: &str) -> String {
    let mut out = format!("# {} Search Results\n\n", kind);
    if hits.is_empty() {
        let _ = write!(out, "No {}s found matching your query.", kind.to_lowercase());
        return out;
    }

    let _ = write!(
        out,
        "Here are the {}s matching your search query:\n\n",
        kind.to_lowercase()
    );
    for (index, hit) in hits.iter().enumerate() {
        let id = hit
            .ids
            .trakt
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let _ = writeln!(
            out,
            "**{}. {}** (ID: {})",
            index + 1,
            title_with_year(hit.title, hit.year),
            id
        );
        if let Some(overview) = hit.overview.filter(|o| !o.is_empty()) {
            let _ = writeln!(out, "  {}", truncate(overview, OVERVIEW_LIMIT));
        }
        let _ = write!(out, "  *Use this ID for {}: `{}`*\n\n", id_hint, id);
    }
    let _ = write!(out, "\n{}", footer);
    out
}

pub fn format_show_search_results(results: &[SearchResult]) -> String {
    let hits = results
        .iter()
        .filter_map(|result| result.show.as_ref())
        .map(|show| Hit {
            title: &show.title,
            year: show.year,
            ids: &show.ids,
            overview: show.overview.as_deref(),
        })
        .collect();

    render(
        "Show",
        hits,
        "check-ins",
        "To check in to a show, use the `checkin_to_show` tool with the show ID, season number, and episode number.",
    )
}

pub fn format_movie_search_results(results: &[SearchResult]) -> String {
    let hits = results
        .iter()
        .filter_map(|result| result.movie.as_ref())
        .map(|movie| Hit {
            title: &movie.title,
            year: movie.year,
            ids: &movie.ids,
            overview: movie.overview.as_deref(),
        })
        .collect();

    render(
        "Movie",
        hits,
        "comments",
        "To view comments for a movie, use the `fetch_movie_comments` tool with the movie ID.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn results(value: serde_json::Value) -> Vec<SearchResult> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numbered_results_with_ids() {
        let results = results(json!([
            {"type": "show", "score": 100.0, "show": {"title": "Breaking Bad", "year": 2008, "ids": {"trakt": 1388}}},
            {"type": "show", "score": 50.0, "show": {"title": "Better Call Saul", "year": 2015, "ids": {"trakt": 59660}}}
        ]));

        let out = format_show_search_results(&results);
        assert!(out.contains("**1. Breaking Bad (2008)** (ID: 1388)"));
        assert!(out.contains("**2. Better Call Saul (2015)** (ID: 59660)"));
        assert!(out.contains("*Use this ID for check-ins: `1388`*"));
        assert!(out.ends_with("season number, and episode number."));
    }

    #[test]
    fn long_overviews_are_cut() {
        let overview = "x".repeat(300);
        let results = results(json!([
            {"type": "movie", "movie": {"title": "Long", "ids": {"trakt": 1}, "overview": overview}}
        ]));

        let out = format_movie_search_results(&results);
        let line = out.lines().find(|l| l.starts_with("  x")).unwrap();
        assert_eq!(line.trim().chars().count(), 200);
        assert!(line.ends_with("..."));
    }

    #[test]
    fn no_results() {
        assert_eq!(
            format_movie_search_results(&[]),
            "# Movie Search Results\n\nNo movies found matching your query."
        );
    }
}
