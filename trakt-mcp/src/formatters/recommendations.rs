use super::{pagination_header, title_with_year};
use std::fmt::Write;
use trakt_api::endpoints::recommendations::{FavoritedBy, RecommendationKind, RecommendedMovie, RecommendedShow};
use trakt_api::endpoints::Ids;
use trakt_api::Page;

const SUBTITLE: &str = "_Personalized recommendations based on your viewing history_\n\n";
const NONE_YET: &str = "No recommendations available. Watch more content to improve recommendations!\n";

fn push_entry(out: &mut String, title: &str, year: Option<i32>, ids: &Ids, favorited_by: &[FavoritedBy]) {
    let _ = writeln!(out, "### {}", title_with_year(title, year));
    if let Some(trakt) = ids.trakt {
        let _ = writeln!(out, "- **Trakt ID:** {}", trakt);
    }
    if let Some(imdb) = &ids.imdb {
        let _ = writeln!(out, "- **IMDB:** {}", imdb);
    }
    if !favorited_by.is_empty() {
        let _ = writeln!(out, "- **Favorited by:** {} user(s)", favorited_by.len());
    }
    out.push('\n');
}

fn recommendation_list<T>(heading: &str, page: &Page<T>, mut entry: impl FnMut(&mut String, &T)) -> String {
    let mut out = format!("# {}\n\n{}", heading, SUBTITLE);
    out.push_str(&pagination_header(&page.pagination, page.items.len()));
    if page.is_empty() {
        out.push_str(NONE_YET);
        return out;
    }
    for item in &page.items {
        entry(&mut out, item);
    }
    out
}

pub fn format_movie_recommendations(page: &Page<RecommendedMovie>) -> String {
    recommendation_list("Recommended Movies", page, |out, item| {
        push_entry(out, &item.movie.title, item.movie.year, &item.movie.ids, &item.favorited_by)
    })
}

pub fn format_show_recommendations(page: &Page<RecommendedShow>) -> String {
    recommendation_list("Recommended TV Shows", page, |out, item| {
        push_entry(out, &item.show.title, item.show.year, &item.show.ids, &item.favorited_by)
    })
}

fn noun(kind: RecommendationKind) -> &'static str {
    match kind {
        RecommendationKind::Movies => "movie",
        RecommendationKind::Shows => "show",
    }
}

pub fn format_hide_result(kind: RecommendationKind, id: &str) -> String {
    format!("Successfully hidden {} `{}` from future recommendations.", noun(kind), id)
}

/// `removed` is how many hidden entries Trakt actually dropped.
pub fn format_unhide_result(kind: RecommendationKind, id: &str, removed: u64) -> String {
    if removed == 0 {
        return format!("The {} `{}` was not hidden from recommendations.", noun(kind), id);
    }
    format!("Successfully unhidden {} `{}` for future recommendations.", noun(kind), id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn movie_entries_show_ids_and_favorites() {
        let items: Vec<RecommendedMovie> = serde_json::from_value(json!([{
            "title": "The Matrix",
            "year": 1999,
            "ids": {"trakt": 481, "imdb": "tt0133093"},
            "favorited_by": [{"user": {"username": "neo"}}, {"user": {"username": "trinity"}}]
        }]))
        .unwrap();

        let out = format_movie_recommendations(&Page::new(items, None));
        assert!(out.starts_with("# Recommended Movies\n\n_Personalized recommendations"));
        assert!(out.contains("### The Matrix (1999)\n- **Trakt ID:** 481\n- **IMDB:** tt0133093\n- **Favorited by:** 2 user(s)\n"));
    }

    #[test]
    fn no_show_recommendations() {
        let out = format_show_recommendations(&Page::new(Vec::new(), None));
        assert!(out.starts_with("# Recommended TV Shows"));
        assert!(out.ends_with(NONE_YET));
    }

    #[test]
    fn unhide_reports_items_that_were_not_hidden() {
        assert_eq!(
            format_unhide_result(RecommendationKind::Shows, "dark", 1),
            "Successfully unhidden show `dark` for future recommendations."
        );
        assert!(format_unhide_result(RecommendationKind::Movies, "heat", 0).contains("was not hidden"));
    }
}
