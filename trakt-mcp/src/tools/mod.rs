//! MCP tools: argument schemas, validation and dispatch.

mod auth;
mod checkin;
mod comments;
mod movies;
mod progress;
mod ratings;
mod recommendations;
mod search;
mod shows;
mod user;

use crate::context::AppContext;
use crate::error::ToolError;
use crate::protocol::Tool;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use trakt_api::endpoints::recommendations::RecommendationKind;
use trakt_api::endpoints::Period;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIST_LIMIT: u32 = 100;

/// Every tool the server offers, in listing order.
pub fn definitions() -> Vec<Tool> {
    [
        auth::definitions(),
        shows::definitions(),
        movies::definitions(),
        search::definitions(),
        user::definitions(),
        ratings::definitions(),
        progress::definitions(),
        recommendations::definitions(),
        checkin::definitions(),
        comments::definitions(),
    ]
    .concat()
}

/// Runs the named tool and returns its markdown output.
pub async fn call(ctx: &AppContext, name: &str, args: Map<String, Value>) -> Result<String, ToolError> {
    match name {
        "start_device_auth" => auth::start_device_auth(ctx).await,
        "check_auth_status" => auth::check_auth_status(ctx).await,
        "clear_auth" => auth::clear_auth(ctx).await,

        "fetch_trending_shows" => shows::trending(ctx, parse(args)?).await,
        "fetch_popular_shows" => shows::popular(ctx, parse(args)?).await,
        "fetch_favorited_shows" => shows::favorited(ctx, parse(args)?).await,
        "fetch_played_shows" => shows::played(ctx, parse(args)?).await,
        "fetch_watched_shows" => shows::watched(ctx, parse(args)?).await,
        "fetch_show_ratings" => shows::ratings(ctx, parse(args)?).await,
        "fetch_show_summary" => shows::summary(ctx, parse(args)?).await,

        "fetch_trending_movies" => movies::trending(ctx, parse(args)?).await,
        "fetch_popular_movies" => movies::popular(ctx, parse(args)?).await,
        "fetch_favorited_movies" => movies::favorited(ctx, parse(args)?).await,
        "fetch_played_movies" => movies::played(ctx, parse(args)?).await,
        "fetch_watched_movies" => movies::watched(ctx, parse(args)?).await,
        "fetch_movie_ratings" => movies::ratings(ctx, parse(args)?).await,
        "fetch_movie_summary" => movies::summary(ctx, parse(args)?).await,

        "search_shows" => search::shows(ctx, parse(args)?).await,
        "search_movies" => search::movies(ctx, parse(args)?).await,

        "fetch_user_watched_shows" => user::watched_shows(ctx, parse(args)?).await,
        "fetch_user_watched_movies" => user::watched_movies(ctx, parse(args)?).await,

        "fetch_user_ratings" => ratings::user_ratings(ctx, parse(args)?).await,
        "add_user_ratings" => ratings::add_ratings(ctx, parse(args)?).await,
        "remove_user_ratings" => ratings::remove_ratings(ctx, parse(args)?).await,

        "fetch_show_progress" => progress::show_progress(ctx, parse(args)?).await,
        "fetch_playback_progress" => progress::playback(ctx, parse(args)?).await,
        "remove_playback_item" => progress::remove_playback(ctx, parse(args)?).await,

        "fetch_movie_recommendations" => recommendations::movies(ctx, parse(args)?).await,
        "fetch_show_recommendations" => recommendations::shows(ctx, parse(args)?).await,
        "hide_movie_recommendation" => {
            let args: recommendations::MovieIdArgs = parse(args)?;
            recommendations::hide(ctx, RecommendationKind::Movies, &args.movie_id).await
        }
        "hide_show_recommendation" => {
            let args: recommendations::ShowIdArgs = parse(args)?;
            recommendations::hide(ctx, RecommendationKind::Shows, &args.show_id).await
        }
        "unhide_movie_recommendation" => {
            let args: recommendations::MovieIdArgs = parse(args)?;
            recommendations::unhide(ctx, RecommendationKind::Movies, &args.movie_id).await
        }
        "unhide_show_recommendation" => {
            let args: recommendations::ShowIdArgs = parse(args)?;
            recommendations::unhide(ctx, RecommendationKind::Shows, &args.show_id).await
        }

        "checkin_to_show" => checkin::checkin_to_show(ctx, parse(args)?).await,

        "fetch_movie_comments" => comments::movie_comments(ctx, parse(args)?).await,
        "fetch_show_comments" => comments::show_comments(ctx, parse(args)?).await,
        "fetch_season_comments" => comments::season_comments(ctx, parse(args)?).await,
        "fetch_episode_comments" => comments::episode_comments(ctx, parse(args)?).await,
        "fetch_comment" => comments::comment(ctx, parse(args)?).await,
        "fetch_comment_replies" => comments::replies(ctx, parse(args)?).await,

        _ => Err(ToolError::UnknownTool(name.to_string())),
    }
}

fn parse<T: DeserializeOwned>(args: Map<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| ToolError::invalid(format!("Invalid arguments: {}", e)))
}

fn tool(name: &str, description: &str, properties: Value, required: &[&str]) -> Tool {
    Tool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: json!({
            "type": "object",
            "properties": properties,
            "required": required,
        }),
    }
}

fn no_args(name: &str, description: &str) -> Tool {
    tool(name, description, json!({}), &[])
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Paging arguments shared by the list tools.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListArgs {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub page: Option<u32>,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: None,
        }
    }
}

impl ListArgs {
    pub fn validate(&self) -> Result<(), ToolError> {
        if !(1..=MAX_LIST_LIMIT).contains(&self.limit) {
            return Err(ToolError::invalid(format!(
                "limit must be between 1 and {}",
                MAX_LIST_LIMIT
            )));
        }
        if self.page == Some(0) {
            return Err(ToolError::invalid("page must be 1 or greater"));
        }
        Ok(())
    }
}

/// List arguments plus the ranking window for the favorited/played/watched tools.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PeriodArgs {
    #[serde(flatten)]
    pub list: ListArgs,
    #[serde(default)]
    pub period: Period,
}

fn list_properties() -> Value {
    json!({
        "limit": {
            "type": "integer",
            "minimum": 1,
            "maximum": MAX_LIST_LIMIT,
            "default": DEFAULT_LIMIT,
            "description": "Number of results to return (default 10)"
        },
        "page": {
            "type": "integer",
            "minimum": 1,
            "description": "Page number (omit for the first page)"
        }
    })
}

fn period_properties() -> Value {
    let mut properties = list_properties();
    properties["period"] = json!({
        "type": "string",
        "enum": ["daily", "weekly", "monthly", "yearly", "all"],
        "default": "weekly",
        "description": "Time period for the ranking"
    });
    properties
}

/// Trims an identifier argument and rejects it when blank.
fn required_id(name: &str, value: &str) -> Result<String, ToolError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ToolError::invalid(format!("{} cannot be empty", name)));
    }
    Ok(value.to_string())
}
