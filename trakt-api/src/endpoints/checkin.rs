use super::{Episode, Ids, Movie, Show};
use crate::macros::setter;
use crate::request::{Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkin {
    pub id: u64,
    pub watched_at: DateTime<Utc>,
    #[serde(default)]
    pub sharing: Sharing,
    pub show: Option<Show>,
    pub episode: Option<Episode>,
    pub movie: Option<Movie>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sharing {
    #[serde(default)]
    pub twitter: bool,
    #[serde(default)]
    pub mastodon: bool,
    #[serde(default)]
    pub tumblr: bool,
}

impl Sharing {
    pub fn any(&self) -> bool {
        self.twitter || self.mastodon || self.tumblr
    }

    /// Names of the platforms this checkin was shared to.
    pub fn platforms(&self) -> Vec<&'static str> {
        [
            (self.twitter, "Twitter"),
            (self.mastodon, "Mastodon"),
            (self.tumblr, "Tumblr"),
        ]
        .into_iter()
        .filter_map(|(enabled, name)| enabled.then_some(name))
        .collect()
    }
}

/// How the show is identified: by Trakt id, or by title with an optional year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ShowRef {
    Id { ids: Ids },
    Title {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        year: Option<i32>,
    },
}

impl ShowRef {
    pub fn trakt_id(id: u64) -> Self {
        ShowRef::Id {
            ids: Ids {
                trakt: Some(id),
                ..Ids::default()
            },
        }
    }

    pub fn title(title: impl Into<String>, year: Option<i32>) -> Self {
        ShowRef::Title {
            title: title.into(),
            year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeRef {
    pub season: u32,
    pub number: u32,
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct CheckinEpisode {
    show: ShowRef,
    episode: EpisodeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sharing: Option<Sharing>,
}

impl CheckinEpisode {
    pub fn new(show: ShowRef, season: u32, number: u32) -> Self {
        Self {
            show,
            episode: EpisodeRef { season, number },
            message: None,
            sharing: None,
        }
    }

    setter!(opt message: String);

    pub fn sharing(mut self, sharing: Sharing) -> Self {
        self.sharing = sharing.any().then_some(sharing);
        self
    }
}

impl Request for CheckinEpisode {
    type Data = Self;
    type Response = Checkin;
    const METHOD: Method = Method::POST;
    const AUTHENTICATED: bool = true;

    fn endpoint(&self) -> Cow<'_, str> {
        "/checkin".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn checkin_by_id_body() {
        let request = CheckinEpisode::new(ShowRef::trakt_id(1390), 1, 2).message("Winter is coming");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "show": {"ids": {"trakt": 1390}},
                "episode": {"season": 1, "number": 2},
                "message": "Winter is coming"
            })
        );
    }

    #[test]
    fn checkin_by_title_omits_disabled_sharing() {
        let request = CheckinEpisode::new(ShowRef::title("Breaking Bad", Some(2008)), 5, 14)
            .sharing(Sharing::default());
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["show"], json!({"title": "Breaking Bad", "year": 2008}));
        assert!(body.get("sharing").is_none());
        assert!(body.get("message").is_none());
    }

    #[test]
    fn sharing_platform_names() {
        let sharing = Sharing {
            twitter: true,
            mastodon: false,
            tumblr: true,
        };
        assert_eq!(sharing.platforms(), vec!["Twitter", "Tumblr"]);
    }
}
