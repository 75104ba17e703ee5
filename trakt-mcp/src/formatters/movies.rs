use super::{format_list, push_list_entry, title_with_year};
use std::fmt::Write;
use trakt_api::endpoints::movies::{FavoritedMovie, MovieStats, TrendingMovie};
use trakt_api::endpoints::Movie;
use trakt_api::Page;

const NO_MOVIES: &str = "No movies found.";

pub fn format_trending_movies(page: &Page<TrendingMovie>) -> String {
    format_list("Trending Movies on Trakt", NO_MOVIES, page, |out, item| {
        let movie = &item.movie;
        push_list_entry(
            out,
            &movie.title,
            movie.year,
            Some(format!("{} watchers", item.watchers)),
            movie.overview.as_deref(),
        );
    })
}

pub fn format_popular_movies(page: &Page<Movie>) -> String {
    format_list("Popular Movies on Trakt", NO_MOVIES, page, |out, movie| {
        push_list_entry(out, &movie.title, movie.year, None, movie.overview.as_deref());
    })
}

pub fn format_favorited_movies(page: &Page<FavoritedMovie>) -> String {
    format_list("Most Favorited Movies on Trakt", NO_MOVIES, page, |out, item| {
        let movie = &item.movie;
        push_list_entry(
            out,
            &movie.title,
            movie.year,
            Some(format!("Favorited by {} users", item.user_count)),
            movie.overview.as_deref(),
        );
    })
}

pub fn format_played_movies(page: &Page<MovieStats>) -> String {
    format_list("Most Played Movies on Trakt", NO_MOVIES, page, |out, item| {
        let movie = &item.movie;
        push_list_entry(
            out,
            &movie.title,
            movie.year,
            Some(format!("{} watchers, {} plays", item.watcher_count, item.play_count)),
            movie.overview.as_deref(),
        );
    })
}

pub fn format_watched_movies(page: &Page<MovieStats>) -> String {
    format_list("Most Watched Movies on Trakt", NO_MOVIES, page, |out, item| {
        let movie = &item.movie;
        push_list_entry(
            out,
            &movie.title,
            movie.year,
            Some(format!("Watched by {} users", item.watcher_count)),
            movie.overview.as_deref(),
        );
    })
}

pub fn format_movie_summary(movie: &Movie) -> String {
    let mut out = format!("# {}\n\n", title_with_year(&movie.title, movie.year));

    if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
        let _ = write!(out, "*{}*\n\n", tagline);
    }
    if let Some(status) = &movie.status {
        let _ = writeln!(out, "**Status:** {}", status);
    }
    if let Some(released) = &movie.released {
        let _ = writeln!(out, "**Released:** {}", released);
    }
    if let Some(runtime) = movie.runtime {
        let _ = writeln!(out, "**Runtime:** {} minutes", runtime);
    }
    if let Some(certification) = &movie.certification {
        let _ = writeln!(out, "**Certification:** {}", certification);
    }
    if let Some(country) = &movie.country {
        let _ = writeln!(out, "**Country:** {}", country.to_uppercase());
    }
    if !movie.genres.is_empty() {
        let _ = writeln!(out, "**Genres:** {}", movie.genres.join(", "));
    }
    if let (Some(rating), Some(votes)) = (movie.rating, movie.votes) {
        let _ = writeln!(out, "**Rating:** {:.1}/10 ({} votes)", rating, votes);
    }
    if let Some(id) = movie.ids.trakt {
        let _ = writeln!(out, "**Trakt ID:** {}", id);
    }

    if let Some(overview) = movie.overview.as_deref().filter(|o| !o.is_empty()) {
        let _ = write!(out, "\n## Overview\n\n{}\n", overview);
    }
    out
}
