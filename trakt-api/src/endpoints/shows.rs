use super::{ExtendedQuery, ListQuery, Period, Ratings, Show};
use crate::macros::setter;
use crate::request::{Request, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingShow {
    pub watchers: u64,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritedShow {
    #[serde(default)]
    pub user_count: u64,
    pub show: Show,
}

/// Row returned by both the most-played and most-watched lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowStats {
    #[serde(default)]
    pub watcher_count: u64,
    #[serde(default)]
    pub play_count: u64,
    #[serde(default)]
    pub collected_count: u64,
    pub show: Show,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct TrendingShows {
    query: ListQuery,
}

impl TrendingShows {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for TrendingShows {
    type Data = ListQuery;
    type Response = Vec<TrendingShow>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/shows/trending".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Default, Debug, Clone)]
pub struct PopularShows {
    query: ListQuery,
}

impl PopularShows {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for PopularShows {
    type Data = ListQuery;
    type Response = Vec<Show>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/shows/popular".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Default, Debug, Clone)]
pub struct FavoritedShows {
    period: Period,
    query: ListQuery,
}

impl FavoritedShows {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(period: Period);
    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for FavoritedShows {
    type Data = ListQuery;
    type Response = Vec<FavoritedShow>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/shows/favorited/{}", self.period).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Default, Debug, Clone)]
pub struct PlayedShows {
    period: Period,
    query: ListQuery,
}

impl PlayedShows {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(period: Period);
    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for PlayedShows {
    type Data = ListQuery;
    type Response = Vec<ShowStats>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/shows/played/{}", self.period).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Default, Debug, Clone)]
pub struct WatchedShows {
    period: Period,
    query: ListQuery,
}

impl WatchedShows {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(period: Period);
    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for WatchedShows {
    type Data = ListQuery;
    type Response = Vec<ShowStats>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/shows/watched/{}", self.period).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

/// Full show details. `id` is a Trakt id, slug or IMDB id.
#[derive(Debug, Clone)]
pub struct GetShow {
    id: String,
}

impl GetShow {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Request for GetShow {
    type Data = ExtendedQuery;
    type Response = Show;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/shows/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&ExtendedQuery::FULL)
    }
}

#[derive(Debug, Clone)]
pub struct GetShowRatings {
    id: String,
}

impl GetShowRatings {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Request for GetShowRatings {
    type Data = ();
    type Response = Ratings;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/shows/{}/ratings", self.id).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_lands_in_the_path() {
        let request = PlayedShows::new().period(Period::Monthly).limit(5u32);
        assert_eq!(request.endpoint(), "/shows/played/monthly");
        assert_eq!(request.query.limit, Some(5));
        assert_eq!(request.query.page, None);
    }

    #[test]
    fn trending_row_parses() {
        let rows: Vec<TrendingShow> = serde_json::from_str(
            r#"[{"watchers": 42, "show": {"title": "The Bear", "year": 2022, "ids": {"trakt": 1, "slug": "the-bear"}}}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].watchers, 42);
        assert_eq!(rows[0].show.ids.slug.as_deref(), Some("the-bear"));
    }
}
