use super::{default_limit, tool, ListArgs, DEFAULT_LIMIT, MAX_LIST_LIMIT};
use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::comments::{format_comment, format_comment_replies, format_comments};
use crate::protocol::Tool;
use serde::Deserialize;
use serde_json::{json, Value};
use trakt_api::endpoints::CommentSort;
use trakt_api::Request;

/// Replies shown under a single comment when `include_replies` is set.
const INLINE_REPLIES: u32 = 10;

#[derive(Debug, Deserialize)]
pub(crate) struct MovieCommentsArgs {
    pub movie_id: String,
    #[serde(flatten)]
    pub options: CommentListOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShowCommentsArgs {
    pub show_id: String,
    #[serde(flatten)]
    pub options: CommentListOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeasonCommentsArgs {
    pub show_id: String,
    pub season: u32,
    #[serde(flatten)]
    pub options: CommentListOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EpisodeCommentsArgs {
    pub show_id: String,
    pub season: u32,
    pub episode: u32,
    #[serde(flatten)]
    pub options: CommentListOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentListOptions {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub sort: CommentSort,
    #[serde(default)]
    pub show_spoilers: bool,
}

impl CommentListOptions {
    fn validate(&self) -> Result<(), ToolError> {
        ListArgs {
            limit: self.limit,
            page: self.page,
        }
        .validate()
    }
}

/// Comment ids arrive as either JSON numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CommentId {
    Number(u64),
    Text(String),
}

impl CommentId {
    fn resolve(&self) -> Result<u64, ToolError> {
        match self {
            CommentId::Number(id) => Ok(*id),
            CommentId::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(ToolError::invalid("comment_id cannot be empty"));
                }
                text.parse().map_err(|_| {
                    ToolError::invalid(format!("comment_id must be numeric, got '{}'", text))
                })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentArgs {
    pub comment_id: CommentId,
    #[serde(default)]
    pub show_spoilers: bool,
    #[serde(default)]
    pub include_replies: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepliesArgs {
    pub comment_id: CommentId,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub show_spoilers: bool,
}

fn comment_list_properties(id_name: &str, id_description: &str) -> Value {
    let mut properties = json!({
        "limit": {
            "type": "integer",
            "minimum": 1,
            "maximum": MAX_LIST_LIMIT,
            "default": DEFAULT_LIMIT,
            "description": "Maximum number of comments to return"
        },
        "page": {"type": "integer", "minimum": 1, "description": "Page number (omit for the first page)"},
        "sort": {
            "type": "string",
            "enum": ["newest", "oldest", "likes", "replies", "highest", "lowest", "plays"],
            "default": "newest",
            "description": "How to sort comments"
        },
        "show_spoilers": {"type": "boolean", "default": false, "description": "Reveal spoiler text"}
    });
    properties[id_name] = json!({"type": "string", "description": id_description});
    properties
}

fn season_properties(with_episode: bool) -> Value {
    let mut properties = comment_list_properties("show_id", "Trakt ID or slug of the show");
    properties["season"] = json!({"type": "integer", "minimum": 0, "description": "Season number (0 for specials)"});
    if with_episode {
        properties["episode"] = json!({"type": "integer", "minimum": 1, "description": "Episode number"});
    }
    properties
}

fn comment_id_property() -> Value {
    json!({"type": ["string", "integer"], "description": "Trakt ID of the comment"})
}

pub(super) fn definitions() -> Vec<Tool> {
    vec![
        tool(
            "fetch_movie_comments",
            "Fetch comments for a movie from Trakt",
            comment_list_properties("movie_id", "Trakt ID or slug of the movie"),
            &["movie_id"],
        ),
        tool(
            "fetch_show_comments",
            "Fetch comments for a show from Trakt",
            comment_list_properties("show_id", "Trakt ID or slug of the show"),
            &["show_id"],
        ),
        tool(
            "fetch_season_comments",
            "Fetch comments for a specific TV show season from Trakt",
            season_properties(false),
            &["show_id", "season"],
        ),
        tool(
            "fetch_episode_comments",
            "Fetch comments for a specific TV show episode from Trakt",
            season_properties(true),
            &["show_id", "season", "episode"],
        ),
        tool(
            "fetch_comment",
            "Fetch a specific comment from Trakt",
            json!({
                "comment_id": comment_id_property(),
                "show_spoilers": {"type": "boolean", "default": false, "description": "Reveal spoiler text"},
                "include_replies": {"type": "boolean", "default": false, "description": "Also show the first replies"}
            }),
            &["comment_id"],
        ),
        tool(
            "fetch_comment_replies",
            "Fetch replies for a comment from Trakt",
            json!({
                "comment_id": comment_id_property(),
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": MAX_LIST_LIMIT,
                    "default": DEFAULT_LIMIT,
                    "description": "Maximum number of replies to return"
                },
                "page": {"type": "integer", "minimum": 1, "description": "Page number (omit for the first page)"},
                "show_spoilers": {"type": "boolean", "default": false, "description": "Reveal spoiler text"}
            }),
            &["comment_id"],
        ),
    ]
}

pub(super) async fn movie_comments(ctx: &AppContext, args: MovieCommentsArgs) -> Result<String, ToolError> {
    let id = super::required_id("movie_id", &args.movie_id)?;
    let options = args.options;
    options.validate()?;

    let mut request = Request::movies()
        .comments(id.as_str())
        .sort(options.sort)
        .limit(options.limit);
    if let Some(page) = options.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_comments(&format!("Movie ID: {}", id), &page, options.show_spoilers))
}

pub(super) async fn show_comments(ctx: &AppContext, args: ShowCommentsArgs) -> Result<String, ToolError> {
    let id = super::required_id("show_id", &args.show_id)?;
    let options = args.options;
    options.validate()?;

    let mut request = Request::shows()
        .comments(id.as_str())
        .sort(options.sort)
        .limit(options.limit);
    if let Some(page) = options.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_comments(&format!("Show ID: {}", id), &page, options.show_spoilers))
}

pub(super) async fn season_comments(ctx: &AppContext, args: SeasonCommentsArgs) -> Result<String, ToolError> {
    let id = super::required_id("show_id", &args.show_id)?;
    let options = args.options;
    options.validate()?;

    let mut request = Request::shows()
        .season_comments(id.as_str(), args.season)
        .sort(options.sort)
        .limit(options.limit);
    if let Some(page) = options.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    let title = format!("Show ID: {} - Season {}", id, args.season);
    Ok(format_comments(&title, &page, options.show_spoilers))
}

pub(super) async fn episode_comments(ctx: &AppContext, args: EpisodeCommentsArgs) -> Result<String, ToolError> {
    let id = super::required_id("show_id", &args.show_id)?;
    if args.episode == 0 {
        return Err(ToolError::invalid("episode must be at least 1"));
    }
    let options = args.options;
    options.validate()?;

    let mut request = Request::shows()
        .episode_comments(id.as_str(), args.season, args.episode)
        .sort(options.sort)
        .limit(options.limit);
    if let Some(page) = options.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    let title = format!("Show ID: {} - S{:02}E{:02}", id, args.season, args.episode);
    Ok(format_comments(&title, &page, options.show_spoilers))
}

pub(super) async fn comment(ctx: &AppContext, args: CommentArgs) -> Result<String, ToolError> {
    let id = args.comment_id.resolve()?;

    if !args.include_replies {
        let comment = ctx.api().send(Request::comments().get(id)).await?;
        return Ok(format_comment(&comment, &[], args.show_spoilers));
    }

    let (comment, replies) = tokio::try_join!(
        ctx.api().send(Request::comments().get(id)),
        ctx.api()
            .send_paginated(Request::comments().replies(id).limit(INLINE_REPLIES)),
    )?;
    Ok(format_comment(&comment, &replies.items, args.show_spoilers))
}

pub(super) async fn replies(ctx: &AppContext, args: RepliesArgs) -> Result<String, ToolError> {
    let id = args.comment_id.resolve()?;
    ListArgs {
        limit: args.limit,
        page: args.page,
    }
    .validate()?;

    let mut request = Request::comments().replies(id).limit(args.limit);
    if let Some(page) = args.page {
        request = request.page(page);
    }
    let page = ctx.api().send_paginated(request).await?;
    Ok(format_comment_replies(id, &page, args.show_spoilers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_id_accepts_numbers_and_strings() {
        let args: CommentArgs = serde_json::from_value(json!({"comment_id": 42})).unwrap();
        assert_eq!(args.comment_id.resolve().unwrap(), 42);
        assert!(!args.include_replies);

        let args: CommentArgs = serde_json::from_value(json!({"comment_id": " 417 "})).unwrap();
        assert_eq!(args.comment_id.resolve().unwrap(), 417);
    }

    #[test]
    fn bad_comment_ids_are_invalid_params() {
        for raw in [json!(""), json!("abc")] {
            let args: CommentArgs = serde_json::from_value(json!({"comment_id": raw})).unwrap();
            assert!(args.comment_id.resolve().unwrap_err().is_invalid_params());
        }
    }

    #[test]
    fn list_options_defaults() {
        let args: ShowCommentsArgs = serde_json::from_value(json!({"show_id": "1388"})).unwrap();
        assert_eq!(args.options.limit, DEFAULT_LIMIT);
        assert_eq!(args.options.sort, CommentSort::Newest);
        assert!(!args.options.show_spoilers);
        assert!(args.options.validate().is_ok());

        let args: MovieCommentsArgs =
            serde_json::from_value(json!({"movie_id": "120", "sort": "likes", "limit": 500})).unwrap();
        assert_eq!(args.options.sort, CommentSort::Likes);
        assert!(args.options.validate().is_err());
    }

    #[test]
    fn episode_comments_need_season_and_episode() {
        let args: EpisodeCommentsArgs =
            serde_json::from_value(json!({"show_id": "1388", "season": 5, "episode": 14})).unwrap();
        assert_eq!((args.season, args.episode), (5, 14));
        assert_eq!(args.options.limit, DEFAULT_LIMIT);

        assert!(serde_json::from_value::<EpisodeCommentsArgs>(json!({"show_id": "1388", "season": 5})).is_err());
        assert!(serde_json::from_value::<SeasonCommentsArgs>(json!({"show_id": "1388", "season": -1})).is_err());
    }
}
