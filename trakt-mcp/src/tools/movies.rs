use super::{list_properties, period_properties, required_id, tool, ListArgs, PeriodArgs};
use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::{format_ratings, movies::*};
use crate::protocol::Tool;
use serde::Deserialize;
use serde_json::json;
use trakt_api::Request;

const MOVIE_ID_DESCRIPTION: &str =
    "Trakt ID, Trakt slug, or IMDB ID (e.g., '120', 'the-dark-knight-2008', 'tt0468569')";

#[derive(Debug, Deserialize)]
pub(crate) struct MovieIdArgs {
    pub movie_id: String,
}

pub(super) fn definitions() -> Vec<Tool> {
    let id = json!({"movie_id": {"type": "string", "description": MOVIE_ID_DESCRIPTION}});
    vec![
        tool(
            "fetch_trending_movies",
            "Fetch trending movies from Trakt",
            list_properties(),
            &[],
        ),
        tool(
            "fetch_popular_movies",
            "Fetch popular movies from Trakt",
            list_properties(),
            &[],
        ),
        tool(
            "fetch_favorited_movies",
            "Fetch the most favorited movies from Trakt for a time period",
            period_properties(),
            &[],
        ),
        tool(
            "fetch_played_movies",
            "Fetch the most played movies from Trakt for a time period",
            period_properties(),
            &[],
        ),
        tool(
            "fetch_watched_movies",
            "Fetch the most watched movies from Trakt for a time period",
            period_properties(),
            &[],
        ),
        tool(
            "fetch_movie_ratings",
            "Fetch ratings and voting statistics for a specific movie",
            id.clone(),
            &["movie_id"],
        ),
        tool(
            "fetch_movie_summary",
            "Get a movie summary from Trakt: release date, status, runtime, certification, genres and rating",
            id,
            &["movie_id"],
        ),
    ]
}

pub(super) async fn trending(ctx: &AppContext, args: ListArgs) -> Result<String, ToolError> {
    args.validate()?;
    let mut request = Request::movies().trending().limit(args.limit);
    if let Some(page) = args.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_trending_movies(&page))
}

pub(super) async fn popular(ctx: &AppContext, args: ListArgs) -> Result<String, ToolError> {
    args.validate()?;
    let mut request = Request::movies().popular().limit(args.limit);
    if let Some(page) = args.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_popular_movies(&page))
}

pub(super) async fn favorited(ctx: &AppContext, args: PeriodArgs) -> Result<String, ToolError> {
    args.list.validate()?;
    let mut request = Request::movies()
        .favorited()
        .period(args.period)
        .limit(args.list.limit);
    if let Some(page) = args.list.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_favorited_movies(&page))
}

pub(super) async fn played(ctx: &AppContext, args: PeriodArgs) -> Result<String, ToolError> {
    args.list.validate()?;
    let mut request = Request::movies()
        .played()
        .period(args.period)
        .limit(args.list.limit);
    if let Some(page) = args.list.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_played_movies(&page))
}

pub(super) async fn watched(ctx: &AppContext, args: PeriodArgs) -> Result<String, ToolError> {
    args.list.validate()?;
    let mut request = Request::movies()
        .watched()
        .period(args.period)
        .limit(args.list.limit);
    if let Some(page) = args.list.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_watched_movies(&page))
}

pub(super) async fn ratings(ctx: &AppContext, args: MovieIdArgs) -> Result<String, ToolError> {
    let id = required_id("movie_id", &args.movie_id)?;
    let (movie, ratings) = tokio::try_join!(
        ctx.api().send(Request::movies().get(id.as_str())),
        ctx.api().send(Request::movies().ratings(id.as_str())),
    )?;
    Ok(format_ratings(&movie.title, &ratings))
}

pub(super) async fn summary(ctx: &AppContext, args: MovieIdArgs) -> Result<String, ToolError> {
    let id = required_id("movie_id", &args.movie_id)?;
    let movie = ctx.api().send(Request::movies().get(id)).await?;
    Ok(format_movie_summary(&movie))
}
