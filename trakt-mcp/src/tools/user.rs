use super::tool;
use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::user::{format_user_watched_movies, format_user_watched_shows};
use crate::protocol::Tool;
use serde::Deserialize;
use serde_json::json;
use trakt_api::Request;

pub const MAX_HISTORY_LIMIT: u32 = 1000;

/// Trakt returns the whole watched collection in one response, so the limit is
/// applied after the fact. Zero keeps everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct HistoryArgs {
    #[serde(default)]
    pub limit: u32,
}

impl HistoryArgs {
    fn validate(&self) -> Result<(), ToolError> {
        if self.limit > MAX_HISTORY_LIMIT {
            return Err(ToolError::invalid(format!(
                "limit must be between 0 and {}",
                MAX_HISTORY_LIMIT
            )));
        }
        Ok(())
    }

    fn truncate<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.limit as usize {
            0 => items,
            limit => &items[..limit.min(items.len())],
        }
    }
}

fn history_properties() -> serde_json::Value {
    json!({
        "limit": {
            "type": "integer",
            "minimum": 0,
            "maximum": MAX_HISTORY_LIMIT,
            "default": 0,
            "description": "Maximum number of items to return (0 for all)"
        }
    })
}

pub(super) fn definitions() -> Vec<Tool> {
    vec![
        tool(
            "fetch_user_watched_shows",
            "Fetch TV shows watched by the authenticated user (requires authentication)",
            history_properties(),
            &[],
        ),
        tool(
            "fetch_user_watched_movies",
            "Fetch movies watched by the authenticated user (requires authentication)",
            history_properties(),
            &[],
        ),
    ]
}

pub(super) async fn watched_shows(ctx: &AppContext, args: HistoryArgs) -> Result<String, ToolError> {
    args.validate()?;
    let api = ctx.authenticated_api().await?;
    let shows = api.send(Request::sync().watched_shows()).await?;
    Ok(format_user_watched_shows(args.truncate(&shows)))
}

pub(super) async fn watched_movies(ctx: &AppContext, args: HistoryArgs) -> Result<String, ToolError> {
    args.validate()?;
    let api = ctx.authenticated_api().await?;
    let movies = api.send(Request::sync().watched_movies()).await?;
    Ok(format_user_watched_movies(args.truncate(&movies)))
}
