use super::{Movie, Show};
use crate::macros::setter;
use crate::request::{Request, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub score: Option<f64>,
    pub show: Option<Show>,
    pub movie: Option<Movie>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl SearchQuery {
    fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchShows {
    query: SearchQuery,
}

impl SearchShows {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: SearchQuery::new(query),
        }
    }

    setter!(opt query.limit: u32);
}

impl Request for SearchShows {
    type Data = SearchQuery;
    type Response = Vec<SearchResult>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/search/show".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct SearchMovies {
    query: SearchQuery,
}

impl SearchMovies {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: SearchQuery::new(query),
        }
    }

    setter!(opt query.limit: u32);
}

impl Request for SearchMovies {
    type Data = SearchQuery;
    type Response = Vec<SearchResult>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/search/movie".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}
