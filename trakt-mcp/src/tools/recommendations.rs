use super::{list_properties, tool, ListArgs};
use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::recommendations::{
    format_hide_result, format_movie_recommendations, format_show_recommendations, format_unhide_result,
};
use crate::protocol::Tool;
use serde::Deserialize;
use serde_json::{json, Value};
use trakt_api::endpoints::recommendations::RecommendationKind;
use trakt_api::endpoints::MediaType;
use trakt_api::Request;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationArgs {
    #[serde(flatten)]
    pub list: ListArgs,
    #[serde(default = "default_true")]
    pub ignore_collected: bool,
    #[serde(default = "default_true")]
    pub ignore_watchlisted: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MovieIdArgs {
    pub movie_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShowIdArgs {
    pub show_id: String,
}

fn recommendation_properties() -> Value {
    let mut properties = list_properties();
    properties["ignore_collected"] = json!({
        "type": "boolean",
        "default": true,
        "description": "Filter out items you have already collected"
    });
    properties["ignore_watchlisted"] = json!({
        "type": "boolean",
        "default": true,
        "description": "Filter out items already on your watchlist"
    });
    properties
}

fn id_tool(name: &str, description: &str, id_name: &str) -> Tool {
    let mut properties = json!({});
    properties[id_name] = json!({"type": "string", "description": "Trakt ID, slug, or IMDB ID"});
    tool(name, description, properties, &[id_name])
}

pub(super) fn definitions() -> Vec<Tool> {
    vec![
        tool(
            "fetch_movie_recommendations",
            "Fetch personalized movie recommendations from Trakt based on your viewing history. \
             Requires OAuth authentication.",
            recommendation_properties(),
            &[],
        ),
        tool(
            "fetch_show_recommendations",
            "Fetch personalized TV show recommendations from Trakt based on your viewing history. \
             Requires OAuth authentication.",
            recommendation_properties(),
            &[],
        ),
        id_tool(
            "hide_movie_recommendation",
            "Hide a movie from future recommendations. Requires OAuth authentication.",
            "movie_id",
        ),
        id_tool(
            "hide_show_recommendation",
            "Hide a TV show from future recommendations. Requires OAuth authentication.",
            "show_id",
        ),
        id_tool(
            "unhide_movie_recommendation",
            "Unhide a movie to restore it in future recommendations. Requires OAuth authentication.",
            "movie_id",
        ),
        id_tool(
            "unhide_show_recommendation",
            "Unhide a TV show to restore it in future recommendations. Requires OAuth authentication.",
            "show_id",
        ),
    ]
}

pub(super) async fn movies(ctx: &AppContext, args: RecommendationArgs) -> Result<String, ToolError> {
    args.list.validate()?;
    let api = ctx.authenticated_api().await?;

    let mut request = Request::recommendations()
        .movies()
        .limit(args.list.limit)
        .ignore_collected(args.ignore_collected)
        .ignore_watchlisted(args.ignore_watchlisted);
    if let Some(page) = args.list.page {
        request = request.page(page);
    }
    let page = api.send_paginated(request).await?;
    Ok(format_movie_recommendations(&page))
}

pub(super) async fn shows(ctx: &AppContext, args: RecommendationArgs) -> Result<String, ToolError> {
    args.list.validate()?;
    let api = ctx.authenticated_api().await?;

    let mut request = Request::recommendations()
        .shows()
        .limit(args.list.limit)
        .ignore_collected(args.ignore_collected)
        .ignore_watchlisted(args.ignore_watchlisted);
    if let Some(page) = args.list.page {
        request = request.page(page);
    }
    let page = api.send_paginated(request).await?;
    Ok(format_show_recommendations(&page))
}

pub(super) async fn hide(ctx: &AppContext, kind: RecommendationKind, id: &str) -> Result<String, ToolError> {
    let id = super::required_id(id_name(kind), id)?;
    let api = ctx.authenticated_api().await?;

    api.send(Request::recommendations().hide(kind, id.as_str())).await?;
    tracing::info!(kind = kind.as_str(), id = %id, "Hid recommendation");
    Ok(format_hide_result(kind, &id))
}

pub(super) async fn unhide(ctx: &AppContext, kind: RecommendationKind, id: &str) -> Result<String, ToolError> {
    let id = super::required_id(id_name(kind), id)?;
    let api = ctx.authenticated_api().await?;

    let summary = api.send(Request::recommendations().unhide(kind, &id)).await?;
    let removed = summary.deleted.get(media_type(kind));
    tracing::info!(kind = kind.as_str(), id = %id, removed, "Unhid recommendation");
    Ok(format_unhide_result(kind, &id, removed))
}

fn id_name(kind: RecommendationKind) -> &'static str {
    match kind {
        RecommendationKind::Movies => "movie_id",
        RecommendationKind::Shows => "show_id",
    }
}

fn media_type(kind: RecommendationKind) -> MediaType {
    match kind {
        RecommendationKind::Movies => MediaType::Movies,
        RecommendationKind::Shows => MediaType::Shows,
    }
}
