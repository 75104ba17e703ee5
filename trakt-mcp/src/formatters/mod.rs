//! Markdown renderers for tool and resource output.

pub mod auth;
pub mod checkin;
pub mod comments;
pub mod movies;
pub mod progress;
pub mod ratings;
pub mod recommendations;
pub mod search;
pub mod shows;
pub mod user;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::fmt::Write;
use trakt_api::endpoints::Ratings;
use trakt_api::{Page, Pagination};

/// `"Title (2008)"`, or just the title when the year is unknown.
pub(crate) fn title_with_year(title: &str, year: Option<i32>) -> String {
    match year {
        Some(year) => format!("{} ({})", title, year),
        None => title.to_string(),
    }
}

pub(crate) fn display_time(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Cuts `text` to at most `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// Appends one `- **Title (year)** - detail` entry with the overview below it.
pub(crate) fn push_list_entry(
    out: &mut String,
    title: &str,
    year: Option<i32>,
    detail: Option<String>,
    overview: Option<&str>,
) {
    let heading = title_with_year(title, year);
    let _ = match detail {
        Some(detail) => writeln!(out, "- **{}** - {}", heading, detail),
        None => writeln!(out, "- **{}**", heading),
    };
    if let Some(overview) = overview.filter(|o| !o.is_empty()) {
        let _ = writeln!(out, "  {}", overview);
    }
    out.push('\n');
}

/// Heading, pagination header, then one entry per item.
pub(crate) fn format_list<T>(
    heading: &str,
    empty: &str,
    page: &Page<T>,
    mut entry: impl FnMut(&mut String, &T),
) -> String {
    let mut out = format!("# {}\n\n", heading);
    out.push_str(&pagination_header(&page.pagination, page.items.len()));
    if page.is_empty() {
        out.push_str(empty);
        out.push('\n');
    }
    for item in &page.items {
        entry(&mut out, item);
    }
    out
}

/// Page position and navigation hints for multi-page results.
pub fn pagination_header(pagination: &Pagination, shown: usize) -> String {
    if pagination.page_count <= 1 {
        return String::new();
    }

    let first = (pagination.page.saturating_sub(1) as u64) * pagination.limit as u64 + 1;
    let last = (first + shown as u64).saturating_sub(1).min(pagination.item_count);
    let mut out = format!(
        "📄 **Page {} of {} (items {}-{} of {})**\n\n",
        pagination.page, pagination.page_count, first, last, pagination.item_count
    );

    let nav = [
        pagination.previous_page().map(|p| format!("Previous: page {}", p)),
        pagination.next_page().map(|p| format!("Next: page {}", p)),
    ]
    .into_iter()
    .flatten()
    .join(" | ");
    if !nav.is_empty() {
        let _ = write!(out, "📍 **Navigation:** {}\n\n", nav);
    }
    out
}

/// Average plus a 10-to-1 vote distribution table.
pub fn format_ratings(title: &str, ratings: &Ratings) -> String {
    let mut out = format!("# Ratings for {}\n\n", title);

    let _ = write!(
        out,
        "**Average Rating:** {:.2}/10 from {} votes\n\n",
        ratings.rating, ratings.votes
    );

    if ratings.distribution.is_empty() {
        return out;
    }

    out.push_str("## Rating Distribution\n\n");
    out.push_str("| Rating | Votes | Percentage |\n");
    out.push_str("|--------|-------|------------|\n");
    for score in (1..=10u8).rev() {
        let count = ratings.votes_for(score);
        let percentage = if ratings.votes > 0 {
            count as f64 / ratings.votes as f64 * 100.0
        } else {
            0.0
        };
        let _ = writeln!(out, "| {}/10 | {} | {:.1}% |", score, count, percentage);
    }
    out
}
