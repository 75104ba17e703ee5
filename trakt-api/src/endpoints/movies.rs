use super::{ExtendedQuery, ListQuery, Movie, Period, Ratings};
use crate::macros::setter;
use crate::request::{Request, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingMovie {
    pub watchers: u64,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritedMovie {
    #[serde(default)]
    pub user_count: u64,
    pub movie: Movie,
}

/// Row returned by both the most-played and most-watched lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieStats {
    #[serde(default)]
    pub watcher_count: u64,
    #[serde(default)]
    pub play_count: u64,
    #[serde(default)]
    pub collected_count: u64,
    pub movie: Movie,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct TrendingMovies {
    query: ListQuery,
}

impl TrendingMovies {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for TrendingMovies {
    type Data = ListQuery;
    type Response = Vec<TrendingMovie>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/movies/trending".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Default, Debug, Clone)]
pub struct PopularMovies {
    query: ListQuery,
}

impl PopularMovies {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for PopularMovies {
    type Data = ListQuery;
    type Response = Vec<Movie>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/movies/popular".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Default, Debug, Clone)]
pub struct FavoritedMovies {
    period: Period,
    query: ListQuery,
}

impl FavoritedMovies {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(period: Period);
    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for FavoritedMovies {
    type Data = ListQuery;
    type Response = Vec<FavoritedMovie>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/movies/favorited/{}", self.period).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Default, Debug, Clone)]
pub struct PlayedMovies {
    period: Period,
    query: ListQuery,
}

impl PlayedMovies {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(period: Period);
    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for PlayedMovies {
    type Data = ListQuery;
    type Response = Vec<MovieStats>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/movies/played/{}", self.period).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Default, Debug, Clone)]
pub struct WatchedMovies {
    period: Period,
    query: ListQuery,
}

impl WatchedMovies {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(period: Period);
    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for WatchedMovies {
    type Data = ListQuery;
    type Response = Vec<MovieStats>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/movies/watched/{}", self.period).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

/// Full movie details. `id` is a Trakt id, slug or IMDB id.
#[derive(Debug, Clone)]
pub struct GetMovie {
    id: String,
}

impl GetMovie {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Request for GetMovie {
    type Data = ExtendedQuery;
    type Response = Movie;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/movies/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&ExtendedQuery::FULL)
    }
}

#[derive(Debug, Clone)]
pub struct GetMovieRatings {
    id: String,
}

impl GetMovieRatings {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Request for GetMovieRatings {
    type Data = ();
    type Response = Ratings;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/movies/{}/ratings", self.id).into()
    }
}
