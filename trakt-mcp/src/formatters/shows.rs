use super::{format_list, push_list_entry, title_with_year};
use std::fmt::Write;
use trakt_api::endpoints::shows::{FavoritedShow, ShowStats, TrendingShow};
use trakt_api::endpoints::Show;
use trakt_api::Page;

const NO_SHOWS: &str = "No shows found.";

pub fn format_trending_shows(page: &Page<TrendingShow>) -> String {
    format_list("Trending Shows on Trakt", NO_SHOWS, page, |out, item| {
        let show = &item.show;
        push_list_entry(
            out,
            &show.title,
            show.year,
            Some(format!("{} watchers", item.watchers)),
            show.overview.as_deref(),
        );
    })
}

pub fn format_popular_shows(page: &Page<Show>) -> String {
    format_list("Popular Shows on Trakt", NO_SHOWS, page, |out, show| {
        push_list_entry(out, &show.title, show.year, None, show.overview.as_deref());
    })
}

pub fn format_favorited_shows(page: &Page<FavoritedShow>) -> String {
    format_list("Most Favorited Shows on Trakt", NO_SHOWS, page, |out, item| {
        let show = &item.show;
        push_list_entry(
            out,
            &show.title,
            show.year,
            Some(format!("Favorited by {} users", item.user_count)),
            show.overview.as_deref(),
        );
    })
}

pub fn format_played_shows(page: &Page<ShowStats>) -> String {
    format_list("Most Played Shows on Trakt", NO_SHOWS, page, |out, item| {
        let show = &item.show;
        push_list_entry(
            out,
            &show.title,
            show.year,
            Some(format!("{} watchers, {} plays", item.watcher_count, item.play_count)),
            show.overview.as_deref(),
        );
    })
}

pub fn format_watched_shows(page: &Page<ShowStats>) -> String {
    format_list("Most Watched Shows on Trakt", NO_SHOWS, page, |out, item| {
        let show = &item.show;
        push_list_entry(
            out,
            &show.title,
            show.year,
            Some(format!("Watched by {} users", item.watcher_count)),
            show.overview.as_deref(),
        );
    })
}

pub fn format_show_summary(show: &Show) -> String {
    let mut out = format!("# {}\n\n", title_with_year(&show.title, show.year));

    if let Some(status) = &show.status {
        let _ = writeln!(out, "**Status:** {}", status);
    }
    if let Some(first_aired) = &show.first_aired {
        let _ = writeln!(out, "**First Aired:** {}", first_aired.format("%Y-%m-%d"));
    }
    if let Some(network) = &show.network {
        let _ = writeln!(out, "**Network:** {}", network);
    }
    if let Some(runtime) = show.runtime {
        let _ = writeln!(out, "**Runtime:** {} minutes", runtime);
    }
    if let Some(episodes) = show.aired_episodes {
        let _ = writeln!(out, "**Aired Episodes:** {}", episodes);
    }
    if let Some(certification) = &show.certification {
        let _ = writeln!(out, "**Certification:** {}", certification);
    }
    if let Some(country) = &show.country {
        let _ = writeln!(out, "**Country:** {}", country.to_uppercase());
    }
    if !show.genres.is_empty() {
        let _ = writeln!(out, "**Genres:** {}", show.genres.join(", "));
    }
    if let (Some(rating), Some(votes)) = (show.rating, show.votes) {
        let _ = writeln!(out, "**Rating:** {:.1}/10 ({} votes)", rating, votes);
    }
    if let Some(id) = show.ids.trakt {
        let _ = writeln!(out, "**Trakt ID:** {}", id);
    }

    if let Some(overview) = show.overview.as_deref().filter(|o| !o.is_empty()) {
        let _ = write!(out, "\n## Overview\n\n{}\n", overview);
    }
    out
}
