//! Read-only `trakt://` resources. Most are a tool call with default arguments.

use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::auth::format_auth_status;
use crate::protocol::{Resource, ResourceContent};
use crate::tools;
use chrono::Utc;
use serde_json::Map;

const MIME_TYPE: &str = "text/markdown";

const AUTH_REQUIRED: &str = "# Authentication Required

You need to authenticate with Trakt to access your personal data.
Use the `start_device_auth` tool to authenticate.";

enum Source {
    /// Renders the named tool with its default arguments.
    Tool(&'static str),
    /// Same, but the tool needs a signed-in user.
    UserTool(&'static str),
    AuthStatus,
}

struct Entry {
    uri: &'static str,
    name: &'static str,
    description: &'static str,
    source: Source,
}

const ENTRIES: &[Entry] = &[
    Entry {
        uri: "trakt://shows/trending",
        name: "shows_trending",
        description: "Most watched TV shows over the last 24 hours from Trakt",
        source: Source::Tool("fetch_trending_shows"),
    },
    Entry {
        uri: "trakt://shows/popular",
        name: "shows_popular",
        description: "Most popular TV shows from Trakt based on ratings and votes",
        source: Source::Tool("fetch_popular_shows"),
    },
    Entry {
        uri: "trakt://shows/favorited",
        name: "shows_favorited",
        description: "Most favorited TV shows from Trakt in the current weekly period",
        source: Source::Tool("fetch_favorited_shows"),
    },
    Entry {
        uri: "trakt://shows/played",
        name: "shows_played",
        description: "Most played TV shows from Trakt in the current weekly period",
        source: Source::Tool("fetch_played_shows"),
    },
    Entry {
        uri: "trakt://shows/watched",
        name: "shows_watched",
        description: "Most watched TV shows by unique users from Trakt in the current weekly period",
        source: Source::Tool("fetch_watched_shows"),
    },
    Entry {
        uri: "trakt://movies/trending",
        name: "movies_trending",
        description: "Most watched movies over the last 24 hours from Trakt",
        source: Source::Tool("fetch_trending_movies"),
    },
    Entry {
        uri: "trakt://movies/popular",
        name: "movies_popular",
        description: "Most popular movies from Trakt based on ratings and votes",
        source: Source::Tool("fetch_popular_movies"),
    },
    Entry {
        uri: "trakt://movies/favorited",
        name: "movies_favorited",
        description: "Most favorited movies from Trakt in the current weekly period",
        source: Source::Tool("fetch_favorited_movies"),
    },
    Entry {
        uri: "trakt://movies/played",
        name: "movies_played",
        description: "Most played movies from Trakt in the current weekly period",
        source: Source::Tool("fetch_played_movies"),
    },
    Entry {
        uri: "trakt://movies/watched",
        name: "movies_watched",
        description: "Most watched movies by unique users from Trakt in the current weekly period",
        source: Source::Tool("fetch_watched_movies"),
    },
    Entry {
        uri: "trakt://user/auth/status",
        name: "user_auth_status",
        description: "Authentication status for Trakt",
        source: Source::AuthStatus,
    },
    Entry {
        uri: "trakt://user/watched/shows",
        name: "user_watched_shows",
        description: "TV shows watched by the authenticated user from Trakt (requires authentication)",
        source: Source::UserTool("fetch_user_watched_shows"),
    },
    Entry {
        uri: "trakt://user/watched/movies",
        name: "user_watched_movies",
        description: "Movies watched by the authenticated user from Trakt (requires authentication)",
        source: Source::UserTool("fetch_user_watched_movies"),
    },
];

pub fn list() -> Vec<Resource> {
    ENTRIES
        .iter()
        .map(|entry| Resource {
            uri: entry.uri.to_string(),
            name: entry.name.to_string(),
            description: Some(entry.description.to_string()),
            mime_type: Some(MIME_TYPE.to_string()),
        })
        .collect()
}

pub async fn read(ctx: &AppContext, uri: &str) -> Result<ResourceContent, ToolError> {
    let entry = ENTRIES
        .iter()
        .find(|entry| entry.uri == uri)
        .ok_or_else(|| ToolError::UnknownResource(uri.to_string()))?;

    let text = match entry.source {
        Source::Tool(name) => tools::call(ctx, name, Map::new()).await?,
        Source::UserTool(name) => match tools::call(ctx, name, Map::new()).await {
            Err(ToolError::NotAuthenticated) => AUTH_REQUIRED.to_string(),
            result => result?,
        },
        Source::AuthStatus => format_auth_status(&ctx.session().status(Utc::now()).await),
    };

    Ok(ResourceContent {
        uri: entry.uri.to_string(),
        mime_type: Some(MIME_TYPE.to_string()),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_is_markdown_under_trakt_scheme() {
        let resources = list();
        assert_eq!(resources.len(), 13);
        for resource in &resources {
            assert!(resource.uri.starts_with("trakt://"));
            assert_eq!(resource.mime_type.as_deref(), Some(MIME_TYPE));
        }
    }

    #[test]
    fn resource_tools_exist() {
        let tool_names: Vec<_> = tools::definitions().into_iter().map(|t| t.name).collect();
        for entry in ENTRIES {
            if let Source::Tool(name) | Source::UserTool(name) = entry.source {
                assert!(tool_names.iter().any(|t| t == name), "missing tool {}", name);
            }
        }
    }
}
