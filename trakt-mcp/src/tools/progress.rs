use super::tool;
use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::progress::{format_playback_progress, format_playback_removed, format_show_progress};
use crate::protocol::Tool;
use serde::Deserialize;
use serde_json::json;
use trakt_api::endpoints::progress::{LastActivity, PlaybackType};
use trakt_api::Request;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShowProgressArgs {
    pub show_id: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub specials: bool,
    #[serde(default = "default_true")]
    pub count_specials: bool,
    #[serde(default)]
    pub last_activity: LastActivity,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlaybackArgs {
    #[serde(default)]
    pub playback_type: Option<PlaybackType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemovePlaybackArgs {
    pub playback_id: u64,
}

pub(super) fn definitions() -> Vec<Tool> {
    vec![
        tool(
            "fetch_show_progress",
            "Check if a user has watched a specific TV show and their progress through it. \
             Returns episodes watched, completion percentage, next episode to watch, and per-season breakdown. \
             For listing all watched shows, use fetch_user_watched_shows instead. Requires OAuth authentication.",
            json!({
                "show_id": {"type": "string", "description": "Trakt ID, slug, or IMDB ID of the show"},
                "hidden": {"type": "boolean", "default": false, "description": "Include hidden seasons in the progress"},
                "specials": {"type": "boolean", "default": false, "description": "Include specials as season 0"},
                "count_specials": {
                    "type": "boolean",
                    "default": true,
                    "description": "Count specials in the overall stats when specials are included"
                },
                "last_activity": {
                    "type": "string",
                    "enum": ["aired", "watched"],
                    "default": "aired",
                    "description": "Pick the last and next episode by air order or by watch order"
                },
                "verbose": {"type": "boolean", "default": false, "description": "List every episode with its watch date"}
            }),
            &["show_id"],
        ),
        tool(
            "fetch_playback_progress",
            "Fetch paused playback progress items. Shows movies and episodes that were paused during playback \
             with their progress percentage. Requires OAuth authentication.",
            json!({
                "playback_type": {
                    "type": "string",
                    "enum": ["movies", "episodes"],
                    "description": "Only movies or only episodes (omit for both)"
                }
            }),
            &[],
        ),
        tool(
            "remove_playback_item",
            "Remove a paused playback progress item. Use the ID from fetch_playback_progress results. \
             Requires OAuth authentication.",
            json!({
                "playback_id": {"type": "integer", "minimum": 1, "description": "ID of the playback item to remove"}
            }),
            &["playback_id"],
        ),
    ]
}

pub(super) async fn show_progress(ctx: &AppContext, args: ShowProgressArgs) -> Result<String, ToolError> {
    let id = super::required_id("show_id", &args.show_id)?;
    let api = ctx.authenticated_api().await?;

    let request = Request::shows()
        .progress(id.as_str())
        .hidden(args.hidden)
        .specials(args.specials)
        .count_specials(args.count_specials)
        .last_activity(args.last_activity);
    let progress = api.send(request).await?;
    Ok(format_show_progress(&progress, &id, args.verbose))
}

pub(super) async fn playback(ctx: &AppContext, args: PlaybackArgs) -> Result<String, ToolError> {
    let api = ctx.authenticated_api().await?;

    let mut request = Request::sync().playback();
    if let Some(kind) = args.playback_type {
        request = request.kind(kind);
    }
    let items = api.send(request).await?;
    Ok(format_playback_progress(&items))
}

pub(super) async fn remove_playback(ctx: &AppContext, args: RemovePlaybackArgs) -> Result<String, ToolError> {
    if args.playback_id == 0 {
        return Err(ToolError::invalid("playback_id must be a positive ID"));
    }
    let api = ctx.authenticated_api().await?;

    api.send(Request::sync().remove_playback(args.playback_id)).await?;
    tracing::info!(playback_id = args.playback_id, "Removed playback item");
    Ok(format_playback_removed(args.playback_id))
}
