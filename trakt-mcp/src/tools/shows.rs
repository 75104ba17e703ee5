use super::{list_properties, period_properties, required_id, tool, ListArgs, PeriodArgs};
use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::{format_ratings, shows::*};
use crate::protocol::Tool;
use serde::Deserialize;
use serde_json::json;
use trakt_api::Request;

const SHOW_ID_DESCRIPTION: &str =
    "Trakt ID, Trakt slug, or IMDB ID (e.g., '1388', 'breaking-bad', 'tt0903747')";

#[derive(Debug, Deserialize)]
pub(crate) struct ShowIdArgs {
    pub show_id: String,
}

pub(super) fn definitions() -> Vec<Tool> {
    let id = json!({"show_id": {"type": "string", "description": SHOW_ID_DESCRIPTION}});
    vec![
        tool(
            "fetch_trending_shows",
            "Fetch trending shows from Trakt",
            list_properties(),
            &[],
        ),
        tool(
            "fetch_popular_shows",
            "Fetch popular shows from Trakt",
            list_properties(),
            &[],
        ),
        tool(
            "fetch_favorited_shows",
            "Fetch the most favorited shows from Trakt for a time period",
            period_properties(),
            &[],
        ),
        tool(
            "fetch_played_shows",
            "Fetch the most played shows from Trakt for a time period",
            period_properties(),
            &[],
        ),
        tool(
            "fetch_watched_shows",
            "Fetch the most watched shows from Trakt for a time period",
            period_properties(),
            &[],
        ),
        tool(
            "fetch_show_ratings",
            "Fetch ratings and voting statistics for a specific TV show",
            id.clone(),
            &["show_id"],
        ),
        tool(
            "fetch_show_summary",
            "Get a TV show summary from Trakt: air dates, status, network, runtime, genres and rating",
            id,
            &["show_id"],
        ),
    ]
}

pub(super) async fn trending(ctx: &AppContext, args: ListArgs) -> Result<String, ToolError> {
    args.validate()?;
    let mut request = Request::shows().trending().limit(args.limit);
    if let Some(page) = args.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_trending_shows(&page))
}

pub(super) async fn popular(ctx: &AppContext, args: ListArgs) -> Result<String, ToolError> {
    args.validate()?;
    let mut request = Request::shows().popular().limit(args.limit);
    if let Some(page) = args.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_popular_shows(&page))
}

pub(super) async fn favorited(ctx: &AppContext, args: PeriodArgs) -> Result<String, ToolError> {
    args.list.validate()?;
    let mut request = Request::shows()
        .favorited()
        .period(args.period)
        .limit(args.list.limit);
    if let Some(page) = args.list.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_favorited_shows(&page))
}

pub(super) async fn played(ctx: &AppContext, args: PeriodArgs) -> Result<String, ToolError> {
    args.list.validate()?;
    let mut request = Request::shows()
        .played()
        .period(args.period)
        .limit(args.list.limit);
    if let Some(page) = args.list.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_played_shows(&page))
}

pub(super) async fn watched(ctx: &AppContext, args: PeriodArgs) -> Result<String, ToolError> {
    args.list.validate()?;
    let mut request = Request::shows()
        .watched()
        .period(args.period)
        .limit(args.list.limit);
    if let Some(page) = args.list.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_watched_shows(&page))
}

pub(super) async fn ratings(ctx: &AppContext, args: ShowIdArgs) -> Result<String, ToolError> {
    let id = required_id("show_id", &args.show_id)?;
    let (show, ratings) = tokio::try_join!(
        ctx.api().send(Request::shows().get(id.as_str())),
        ctx.api().send(Request::shows().ratings(id.as_str())),
    )?;
    Ok(format_ratings(&show.title, &ratings))
}

pub(super) async fn summary(ctx: &AppContext, args: ShowIdArgs) -> Result<String, ToolError> {
    let id = required_id("show_id", &args.show_id)?;
    let show = ctx.api().send(Request::shows().get(id)).await?;
    Ok(format_show_summary(&show))
}
