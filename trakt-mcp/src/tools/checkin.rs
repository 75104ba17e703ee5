use super::tool;
use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::checkin::format_checkin;
use crate::protocol::Tool;
use serde::Deserialize;
use serde_json::json;
use trakt_api::endpoints::checkin::{Sharing, ShowRef};
use trakt_api::Request;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CheckinArgs {
    pub season: u32,
    pub episode: u32,
    #[serde(default)]
    pub show_id: Option<String>,
    #[serde(default)]
    pub show_title: Option<String>,
    #[serde(default)]
    pub show_year: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub share_twitter: bool,
    #[serde(default)]
    pub share_mastodon: bool,
    #[serde(default)]
    pub share_tumblr: bool,
}

impl CheckinArgs {
    fn validate(&self) -> Result<(), ToolError> {
        if self.episode == 0 {
            return Err(ToolError::invalid("episode must be at least 1"));
        }
        Ok(())
    }

    /// An id wins over a title when both are given.
    fn show_ref(&self) -> Result<ShowRef, ToolError> {
        let id = self.show_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let title = self.show_title.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (id, title) {
            (Some(id), _) => id.parse::<u64>().map(ShowRef::trakt_id).map_err(|_| {
                ToolError::invalid(format!(
                    "show_id must be a numeric Trakt ID, got '{}'. Use search_shows to find it, or pass show_title instead",
                    id
                ))
            }),
            (None, Some(title)) => Ok(ShowRef::title(title, self.show_year)),
            (None, None) => Err(ToolError::invalid(
                "Either show_id or show_title must be provided",
            )),
        }
    }

    fn sharing(&self) -> Sharing {
        Sharing {
            twitter: self.share_twitter,
            mastodon: self.share_mastodon,
            tumblr: self.share_tumblr,
        }
    }
}

pub(super) fn definitions() -> Vec<Tool> {
    vec![tool(
        "checkin_to_show",
        "Check in to a TV show episode you're currently watching on Trakt",
        json!({
            "season": {"type": "integer", "minimum": 0, "description": "Season number"},
            "episode": {"type": "integer", "minimum": 1, "description": "Episode number"},
            "show_id": {
                "type": "string",
                "description": "Trakt ID for the show (use search_shows to find this, optional if show_title is provided)"
            },
            "show_title": {
                "type": "string",
                "description": "Title of the show (optional if show_id is provided)"
            },
            "show_year": {
                "type": "integer",
                "description": "Year the show was released (helps with ambiguous titles)"
            },
            "message": {"type": "string", "description": "Optional message to include with the checkin"},
            "share_twitter": {"type": "boolean", "default": false},
            "share_mastodon": {"type": "boolean", "default": false},
            "share_tumblr": {"type": "boolean", "default": false}
        }),
        &["season", "episode"],
    )]
}

pub(super) async fn checkin_to_show(ctx: &AppContext, args: CheckinArgs) -> Result<String, ToolError> {
    args.validate()?;
    let show = args.show_ref()?;
    let api = ctx.authenticated_api().await?;

    let mut request = Request::checkin()
        .episode(show, args.season, args.episode)
        .sharing(args.sharing());
    if let Some(message) = args.message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        request = request.message(message);
    }

    let checkin = api.send(request).await?;
    tracing::info!(checkin_id = checkin.id, "Checked in");
    Ok(format_checkin(&checkin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_is_preferred() {
        let args = CheckinArgs {
            show_id: Some(" 1388 ".to_string()),
            show_title: Some("Breaking Bad".to_string()),
            ..Default::default()
        };
        assert_eq!(args.show_ref().unwrap(), ShowRef::trakt_id(1388));
    }

    #[test]
    fn title_with_year() {
        let args = CheckinArgs {
            show_title: Some("Dark".to_string()),
            show_year: Some(2017),
            ..Default::default()
        };
        assert_eq!(args.show_ref().unwrap(), ShowRef::title("Dark", Some(2017)));
    }

    #[test]
    fn episode_zero_is_invalid() {
        let args = CheckinArgs {
            season: 1,
            episode: 0,
            show_id: Some("1388".to_string()),
            ..Default::default()
        };
        assert!(args.validate().unwrap_err().is_invalid_params());

        let specials = CheckinArgs { season: 0, episode: 1, ..Default::default() };
        assert!(specials.validate().is_ok());
    }

    #[test]
    fn missing_show_is_invalid() {
        let err = CheckinArgs::default().show_ref().unwrap_err();
        assert!(err.is_invalid_params());

        let args = CheckinArgs {
            show_id: Some("breaking-bad".to_string()),
            ..Default::default()
        };
        assert!(args.show_ref().unwrap_err().is_invalid_params());
    }
}
