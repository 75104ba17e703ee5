pub mod checkin;
pub mod comments;
pub mod movies;
pub mod oauth;
pub mod progress;
pub mod recommendations;
pub mod search;
pub mod shows;
pub mod sync;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Identifiers Trakt attaches to every show, movie, episode and user.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ids {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trakt: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvdb: Option<u64>,
}

impl Ids {
    /// Builds ids from one user-supplied identifier: a numeric Trakt id, an
    /// IMDB id (`tt...`) or a slug.
    pub fn lookup(id: &str) -> Self {
        let id = id.trim();
        if let Ok(trakt) = id.parse::<u64>() {
            return Ids {
                trakt: Some(trakt),
                ..Ids::default()
            };
        }
        if id.starts_with("tt") {
            return Ids {
                imdb: Some(id.to_string()),
                ..Ids::default()
            };
        }
        Ids {
            slug: Some(id.to_string()),
            ..Ids::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub title: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub ids: Ids,
    pub overview: Option<String>,
    pub first_aired: Option<DateTime<Utc>>,
    pub runtime: Option<u32>,
    pub certification: Option<String>,
    pub network: Option<String>,
    pub country: Option<String>,
    pub status: Option<String>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub aired_episodes: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub ids: Ids,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub released: Option<NaiveDate>,
    pub runtime: Option<u32>,
    pub certification: Option<String>,
    pub country: Option<String>,
    pub status: Option<String>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub number: u32,
    pub title: Option<String>,
    #[serde(default)]
    pub ids: Ids,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub private: bool,
    pub name: Option<String>,
    #[serde(default)]
    pub vip: bool,
}

/// Aggregate rating plus the vote count for each score, keyed `"1"`..`"10"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub rating: f64,
    pub votes: u64,
    #[serde(default)]
    pub distribution: BTreeMap<String, u64>,
}

impl Ratings {
    pub fn votes_for(&self, score: u8) -> u64 {
        self.distribution
            .get(&score.to_string())
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    All,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Yearly,
        Period::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
            Period::All => "all",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|period| period.as_str() == s)
            .ok_or_else(|| format!("unknown period '{}'", s))
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentSort {
    #[default]
    Newest,
    Oldest,
    Likes,
    Replies,
    Highest,
    Lowest,
    Plays,
}

impl CommentSort {
    pub const ALL: [CommentSort; 7] = [
        CommentSort::Newest,
        CommentSort::Oldest,
        CommentSort::Likes,
        CommentSort::Replies,
        CommentSort::Highest,
        CommentSort::Lowest,
        CommentSort::Plays,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentSort::Newest => "newest",
            CommentSort::Oldest => "oldest",
            CommentSort::Likes => "likes",
            CommentSort::Replies => "replies",
            CommentSort::Highest => "highest",
            CommentSort::Lowest => "lowest",
            CommentSort::Plays => "plays",
        }
    }
}

impl Display for CommentSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommentSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommentSort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| format!("unknown comment sort '{}'", s))
    }
}

/// Which kind of item a sync row or request body refers to.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movies,
    Shows,
    Seasons,
    Episodes,
}

impl MediaType {
    pub const ALL: [MediaType; 4] = [
        MediaType::Movies,
        MediaType::Shows,
        MediaType::Seasons,
        MediaType::Episodes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movies => "movies",
            MediaType::Shows => "shows",
            MediaType::Seasons => "seasons",
            MediaType::Episodes => "episodes",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-type counts in the summary Trakt returns from sync writes.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCounts {
    #[serde(default)]
    pub movies: u64,
    #[serde(default)]
    pub shows: u64,
    #[serde(default)]
    pub seasons: u64,
    #[serde(default)]
    pub episodes: u64,
}

impl MediaCounts {
    pub fn get(&self, kind: MediaType) -> u64 {
        match kind {
            MediaType::Movies => self.movies,
            MediaType::Shows => self.shows,
            MediaType::Seasons => self.seasons,
            MediaType::Episodes => self.episodes,
        }
    }
}

/// `?page=&limit=` shared by every list endpoint.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// `?extended=full` for summary endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedQuery {
    extended: &'static str,
}

impl ExtendedQuery {
    pub(crate) const FULL: ExtendedQuery = ExtendedQuery { extended: "full" };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_round_trips_through_strings() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        assert!("fortnightly".parse::<Period>().is_err());
    }

    #[test]
    fn ratings_lookup_defaults_missing_scores_to_zero() {
        let ratings: Ratings = serde_json::from_str(
            r#"{"rating": 8.2, "votes": 12, "distribution": {"10": 7, "9": 5}}"#,
        )
        .unwrap();
        assert_eq!(ratings.votes_for(10), 7);
        assert_eq!(ratings.votes_for(1), 0);
    }

    #[test]
    fn lookup_ids_by_shape() {
        assert_eq!(Ids::lookup(" 1388 ").trakt, Some(1388));
        assert_eq!(Ids::lookup("tt0903747").imdb.as_deref(), Some("tt0903747"));
        assert_eq!(Ids::lookup("breaking-bad").slug.as_deref(), Some("breaking-bad"));
    }

    #[test]
    fn show_tolerates_minimal_payload() {
        let show: Show = serde_json::from_str(r#"{"title": "Severance"}"#).unwrap();
        assert_eq!(show.title, "Severance");
        assert_eq!(show.year, None);
        assert!(show.genres.is_empty());
    }
}
