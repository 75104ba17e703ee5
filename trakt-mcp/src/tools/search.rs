use super::{default_limit, tool};
use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::search::{format_movie_search_results, format_show_search_results};
use crate::protocol::Tool;
use serde::Deserialize;
use serde_json::json;
use trakt_api::Request;

const MAX_QUERY_CHARS: usize = 200;
const MAX_SEARCH_LIMIT: u32 = 1000;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchArgs {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl SearchArgs {
    /// Returns the trimmed query once both arguments are in range.
    fn validated_query(&self) -> Result<&str, ToolError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(ToolError::invalid("query cannot be empty"));
        }
        if query.chars().count() > MAX_QUERY_CHARS {
            return Err(ToolError::invalid(format!(
                "query must be at most {} characters",
                MAX_QUERY_CHARS
            )));
        }
        if !(1..=MAX_SEARCH_LIMIT).contains(&self.limit) {
            return Err(ToolError::invalid(format!(
                "limit must be between 1 and {}",
                MAX_SEARCH_LIMIT
            )));
        }
        Ok(query)
    }
}

fn search_properties() -> serde_json::Value {
    json!({
        "query": {
            "type": "string",
            "minLength": 1,
            "maxLength": MAX_QUERY_CHARS,
            "description": "Non-empty search query"
        },
        "limit": {
            "type": "integer",
            "minimum": 1,
            "maximum": MAX_SEARCH_LIMIT,
            "default": super::DEFAULT_LIMIT,
            "description": "Maximum number of search results to return (1-1000)"
        }
    })
}

pub(super) fn definitions() -> Vec<Tool> {
    vec![
        tool(
            "search_shows",
            "Search for TV shows on Trakt by title",
            search_properties(),
            &["query"],
        ),
        tool(
            "search_movies",
            "Search for movies on Trakt by title",
            search_properties(),
            &["query"],
        ),
    ]
}

pub(super) async fn shows(ctx: &AppContext, args: SearchArgs) -> Result<String, ToolError> {
    let query = args.validated_query()?;
    let results = ctx
        .api()
        .send(Request::search().shows(query).limit(args.limit))
        .await?;
    Ok(format_show_search_results(&results))
}

pub(super) async fn movies(ctx: &AppContext, args: SearchArgs) -> Result<String, ToolError> {
    let query = args.validated_query()?;
    let results = ctx
        .api()
        .send(Request::search().movies(query).limit(args.limit))
        .await?;
    Ok(format_movie_search_results(&results))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(query: &str, limit: u32) -> SearchArgs {
        SearchArgs {
            query: query.to_string(),
            limit,
        }
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(args("  breaking bad ", 10).validated_query().unwrap(), "breaking bad");
    }

    #[test]
    fn blank_or_oversized_queries_are_rejected() {
        assert!(args("   ", 10).validated_query().is_err());
        assert!(args(&"x".repeat(201), 10).validated_query().is_err());
        assert!(args(&"x".repeat(200), 10).validated_query().is_ok());
    }

    #[test]
    fn limit_bounds() {
        assert!(args("dark", 0).validated_query().is_err());
        assert!(args("dark", 1000).validated_query().is_ok());
        assert!(args("dark", 1001).validated_query().is_err());
    }
}
