use super::{Episode, Ids, Movie, Show};
use crate::macros::setter;
use crate::request::{EmptyResponse, Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedProgress {
    pub aired: u32,
    pub completed: u32,
    pub last_watched_at: Option<DateTime<Utc>>,
    pub reset_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub seasons: Vec<SeasonProgress>,
    #[serde(default)]
    pub hidden_seasons: Vec<HiddenSeason>,
    pub next_episode: Option<Episode>,
    pub last_episode: Option<Episode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonProgress {
    pub number: u32,
    pub title: Option<String>,
    pub aired: u32,
    pub completed: u32,
    #[serde(default)]
    pub episodes: Vec<EpisodeProgress>,
}

impl SeasonProgress {
    pub fn is_complete(&self) -> bool {
        self.aired > 0 && self.completed >= self.aired
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeProgress {
    pub number: u32,
    pub completed: bool,
    pub last_watched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenSeason {
    pub number: u32,
    #[serde(default)]
    pub ids: Ids,
}

/// Which activity picks the last and next episode.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastActivity {
    #[default]
    Aired,
    Watched,
}

/// A movie or episode paused mid-playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackItem {
    pub id: u64,
    /// Percentage watched, 0 to 100.
    pub progress: f64,
    pub paused_at: DateTime<Utc>,
    pub movie: Option<Movie>,
    pub episode: Option<Episode>,
    pub show: Option<Show>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackType {
    Movies,
    Episodes,
}

impl PlaybackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackType::Movies => "movies",
            PlaybackType::Episodes => "episodes",
        }
    }
}

// Requests

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressQuery {
    hidden: bool,
    specials: bool,
    count_specials: bool,
    last_activity: LastActivity,
}

/// How far the authenticated user is through a show.
#[derive(Debug, Clone)]
pub struct ShowProgress {
    id: String,
    query: ProgressQuery,
}

impl ShowProgress {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            query: ProgressQuery {
                count_specials: true,
                ..ProgressQuery::default()
            },
        }
    }

    setter!(query.hidden: bool);
    setter!(query.specials: bool);
    setter!(query.count_specials: bool);
    setter!(query.last_activity: LastActivity);
}

impl Request for ShowProgress {
    type Data = ProgressQuery;
    type Response = WatchedProgress;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/shows/{}/progress/watched", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Default, Debug, Clone)]
pub struct ListPlayback {
    kind: Option<PlaybackType>,
}

impl ListPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt kind: PlaybackType);
}

impl Request for ListPlayback {
    type Data = ();
    type Response = Vec<PlaybackItem>;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        match self.kind {
            Some(kind) => format!("/sync/playback/{}", kind.as_str()).into(),
            None => "/sync/playback".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemovePlayback {
    id: u64,
}

impl RemovePlayback {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

impl Request for RemovePlayback {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::DELETE;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/sync/playback/{}", self.id).into()
    }
}
