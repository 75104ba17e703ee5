use super::{Episode, Ids, MediaCounts, MediaType, Movie, Show};
use crate::request::{Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedShow {
    #[serde(default)]
    pub plays: u64,
    pub last_watched_at: Option<DateTime<Utc>>,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedMovie {
    #[serde(default)]
    pub plays: u64,
    pub last_watched_at: Option<DateTime<Utc>>,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedSeason {
    pub number: u32,
    #[serde(default)]
    pub ids: Ids,
}

/// One of the user's own ratings. Season and episode rows carry their show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRating {
    pub rated_at: DateTime<Utc>,
    pub rating: u8,
    pub movie: Option<Movie>,
    pub show: Option<Show>,
    pub season: Option<RatedSeason>,
    pub episode: Option<Episode>,
}

/// An item to rate or unrate, identified by ids and optionally title/year.
/// Also the shape of `not_found` entries in the write summary.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub ids: Ids,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingItems {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub movies: Vec<RatingItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shows: Vec<RatingItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seasons: Vec<RatingItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<RatingItem>,
}

impl RatingItems {
    /// A body holding `items` under the `kind` key only.
    pub fn of(kind: MediaType, items: Vec<RatingItem>) -> Self {
        let mut body = Self::default();
        *body.get_mut(kind) = items;
        body
    }

    pub fn get(&self, kind: MediaType) -> &[RatingItem] {
        match kind {
            MediaType::Movies => &self.movies,
            MediaType::Shows => &self.shows,
            MediaType::Seasons => &self.seasons,
            MediaType::Episodes => &self.episodes,
        }
    }

    fn get_mut(&mut self, kind: MediaType) -> &mut Vec<RatingItem> {
        match kind {
            MediaType::Movies => &mut self.movies,
            MediaType::Shows => &mut self.shows,
            MediaType::Seasons => &mut self.seasons,
            MediaType::Episodes => &mut self.episodes,
        }
    }
}

/// What Trakt reports back from adding or removing ratings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingsSummary {
    pub added: Option<MediaCounts>,
    #[serde(alias = "removed")]
    pub deleted: Option<MediaCounts>,
    #[serde(default)]
    pub not_found: RatingItems,
}

// Requests

/// Shows the authenticated user has watched.
#[derive(Default, Debug, Clone)]
pub struct ListWatchedShows;

impl Request for ListWatchedShows {
    type Data = ();
    type Response = Vec<WatchedShow>;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        "/sync/watched/shows".into()
    }
}

#[derive(Default, Debug, Clone)]
pub struct ListWatchedMovies;

impl Request for ListWatchedMovies {
    type Data = ();
    type Response = Vec<WatchedMovie>;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        "/sync/watched/movies".into()
    }
}

#[derive(Debug, Clone)]
pub struct ListRatings {
    kind: MediaType,
    rating: Option<u8>,
}

impl ListRatings {
    pub fn new(kind: MediaType) -> Self {
        Self { kind, rating: None }
    }

    /// Only ratings with exactly this score.
    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }
}

impl Request for ListRatings {
    type Data = ();
    type Response = Vec<UserRating>;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        match self.rating {
            Some(rating) => format!("/sync/ratings/{}/{}", self.kind, rating).into(),
            None => format!("/sync/ratings/{}", self.kind).into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddRatings {
    items: RatingItems,
}

impl AddRatings {
    pub fn new(items: RatingItems) -> Self {
        Self { items }
    }
}

impl Request for AddRatings {
    type Data = RatingItems;
    type Response = RatingsSummary;
    const METHOD: Method = Method::POST;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        "/sync/ratings".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.items)
    }
}

#[derive(Debug, Clone)]
pub struct RemoveRatings {
    items: RatingItems,
}

impl RemoveRatings {
    pub fn new(items: RatingItems) -> Self {
        Self { items }
    }
}

impl Request for RemoveRatings {
    type Data = RatingItems;
    type Response = RatingsSummary;
    const METHOD: Method = Method::POST;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        "/sync/ratings/remove".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.items)
    }
}
