use super::{Ids, MediaCounts, Movie, Show, User};
use crate::macros::setter;
use crate::request::{EmptyResponse, Method, Request, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritedBy {
    pub user: User,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedMovie {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub favorited_by: Vec<FavoritedBy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedShow {
    #[serde(flatten)]
    pub show: Show,
    #[serde(default)]
    pub favorited_by: Vec<FavoritedBy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationKind {
    Movies,
    Shows,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Movies => "movies",
            RecommendationKind::Shows => "shows",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub ids: Ids,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenItems {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    movies: Vec<ItemRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    shows: Vec<ItemRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnhideSummary {
    #[serde(default)]
    pub deleted: MediaCounts,
}

// Requests

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ignore_collected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ignore_watchlisted: Option<bool>,
}

/// Personalized picks for the authenticated user.
#[derive(Default, Debug, Clone)]
pub struct MovieRecommendations {
    query: RecommendationQuery,
}

impl MovieRecommendations {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
    setter!(opt query.ignore_collected: bool);
    setter!(opt query.ignore_watchlisted: bool);
}

impl Request for MovieRecommendations {
    type Data = RecommendationQuery;
    type Response = Vec<RecommendedMovie>;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        "/recommendations/movies".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Default, Debug, Clone)]
pub struct ShowRecommendations {
    query: RecommendationQuery,
}

impl ShowRecommendations {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
    setter!(opt query.ignore_collected: bool);
    setter!(opt query.ignore_watchlisted: bool);
}

impl Request for ShowRecommendations {
    type Data = RecommendationQuery;
    type Response = Vec<RecommendedShow>;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        "/recommendations/shows".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct HideRecommendation {
    kind: RecommendationKind,
    id: String,
}

impl HideRecommendation {
    pub fn new(kind: RecommendationKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }
}

impl Request for HideRecommendation {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::DELETE;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/recommendations/{}/{}", self.kind.as_str(), self.id).into()
    }
}

/// Trakt has no per-item unhide; hidden recommendations are removed through
/// the user's hidden list.
#[derive(Debug, Clone)]
pub struct UnhideRecommendation {
    items: HiddenItems,
}

impl UnhideRecommendation {
    pub fn new(kind: RecommendationKind, id: &str) -> Self {
        let item = ItemRef { ids: Ids::lookup(id) };
        let items = match kind {
            RecommendationKind::Movies => HiddenItems {
                movies: vec![item],
                ..HiddenItems::default()
            },
            RecommendationKind::Shows => HiddenItems {
                shows: vec![item],
                ..HiddenItems::default()
            },
        };
        Self { items }
    }
}

impl Request for UnhideRecommendation {
    type Data = HiddenItems;
    type Response = UnhideSummary;
    const METHOD: Method = Method::POST;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users/hidden/recommendations/remove".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.items)
    }
}
