use super::{CommentSort, ListQuery, User};
use crate::macros::setter;
use crate::request::{Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub parent_id: Option<u64>,
    pub comment: String,
    #[serde(default)]
    pub spoiler: bool,
    #[serde(default)]
    pub review: bool,
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub likes: u64,
    pub created_at: DateTime<Utc>,
    pub user: Option<User>,
}

impl Comment {
    /// Flagged as a spoiler, or contains inline `[spoiler]` markup.
    pub fn has_spoilers(&self) -> bool {
        self.spoiler || self.comment.contains("[spoiler]")
    }

    pub fn username(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.username.as_str())
            .unwrap_or("Anonymous")
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct MovieComments {
    id: String,
    sort: CommentSort,
    query: ListQuery,
}

impl MovieComments {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sort: CommentSort::default(),
            query: ListQuery::default(),
        }
    }

    setter!(sort: CommentSort);
    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for MovieComments {
    type Data = ListQuery;
    type Response = Vec<Comment>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/movies/{}/comments/{}", self.id, self.sort).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct ShowComments {
    id: String,
    sort: CommentSort,
    query: ListQuery,
}

impl ShowComments {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sort: CommentSort::default(),
            query: ListQuery::default(),
        }
    }

    setter!(sort: CommentSort);
    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for ShowComments {
    type Data = ListQuery;
    type Response = Vec<Comment>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/shows/{}/comments/{}", self.id, self.sort).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct SeasonComments {
    id: String,
    season: u32,
    sort: CommentSort,
    query: ListQuery,
}

impl SeasonComments {
    pub fn new(id: impl Into<String>, season: u32) -> Self {
        Self {
            id: id.into(),
            season,
            sort: CommentSort::default(),
            query: ListQuery::default(),
        }
    }

    setter!(sort: CommentSort);
    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for SeasonComments {
    type Data = ListQuery;
    type Response = Vec<Comment>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/shows/{}/seasons/{}/comments/{}", self.id, self.season, self.sort).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct EpisodeComments {
    id: String,
    season: u32,
    episode: u32,
    sort: CommentSort,
    query: ListQuery,
}

impl EpisodeComments {
    pub fn new(id: impl Into<String>, season: u32, episode: u32) -> Self {
        Self {
            id: id.into(),
            season,
            episode,
            sort: CommentSort::default(),
            query: ListQuery::default(),
        }
    }

    setter!(sort: CommentSort);
    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for EpisodeComments {
    type Data = ListQuery;
    type Response = Vec<Comment>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!(
            "/shows/{}/seasons/{}/episodes/{}/comments/{}",
            self.id, self.season, self.episode, self.sort
        )
        .into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct GetComment {
    id: u64,
}

impl GetComment {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

impl Request for GetComment {
    type Data = ();
    type Response = Comment;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/comments/{}", self.id).into()
    }
}

#[derive(Debug, Clone)]
pub struct CommentReplies {
    id: u64,
    query: ListQuery,
}

impl CommentReplies {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            query: ListQuery::default(),
        }
    }

    setter!(opt query.page: u32);
    setter!(opt query.limit: u32);
}

impl Request for CommentReplies {
    type Data = ListQuery;
    type Response = Vec<Comment>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/comments/{}/replies", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}
