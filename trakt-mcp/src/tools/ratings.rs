use super::tool;
use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::ratings::{format_ratings_summary, format_user_ratings, RatingChange};
use crate::protocol::Tool;
use serde::Deserialize;
use serde_json::{json, Value};
use trakt_api::endpoints::sync::{RatingItem, RatingItems};
use trakt_api::endpoints::{Ids, MediaType};
use trakt_api::Request;

const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserRatingsArgs {
    #[serde(default)]
    pub rating_type: MediaType,
    #[serde(default)]
    pub rating: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RatingChangeArgs {
    pub rating_type: MediaType,
    pub items: Vec<RatingInput>,
}

/// Numeric ids may arrive as JSON numbers or strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumericId {
    Number(u64),
    Text(String),
}

impl NumericId {
    fn resolve(&self, name: &str) -> Result<Option<u64>, ToolError> {
        match self {
            NumericId::Number(id) => Ok(Some(*id)),
            NumericId::Text(text) => match text.trim() {
                "" => Ok(None),
                text => text
                    .parse()
                    .map(Some)
                    .map_err(|_| ToolError::invalid(format!("{} must be numeric, got '{}'", name, text))),
            },
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct RatingInput {
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub trakt_id: Option<NumericId>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub tmdb_id: Option<NumericId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn check_rating(rating: u8) -> Result<u8, ToolError> {
    if !RATING_RANGE.contains(&rating) {
        return Err(ToolError::invalid(format!("rating must be between 1 and 10, got {}", rating)));
    }
    Ok(rating)
}

impl RatingInput {
    /// Converts to the request item. The score is required when adding and
    /// dropped when removing.
    fn into_item(self, change: RatingChange) -> Result<RatingItem, ToolError> {
        let ids = Ids {
            trakt: self.trakt_id.as_ref().map(|id| id.resolve("trakt_id")).transpose()?.flatten(),
            imdb: trimmed(&self.imdb_id),
            tmdb: self.tmdb_id.as_ref().map(|id| id.resolve("tmdb_id")).transpose()?.flatten(),
            ..Ids::default()
        };
        let title = trimmed(&self.title);
        if ids == Ids::default() && title.is_none() {
            return Err(ToolError::invalid(
                "Each item needs a trakt_id, imdb_id, tmdb_id or title",
            ));
        }
        if let Some(year) = self.year.filter(|year| *year <= 1800) {
            return Err(ToolError::invalid(format!("year must be after 1800, got {}", year)));
        }

        let rating = match (change, self.rating) {
            (RatingChange::Added, Some(rating)) => Some(check_rating(rating)?),
            (RatingChange::Added, None) => {
                return Err(ToolError::invalid("Each item needs a rating from 1 to 10"));
            }
            (RatingChange::Removed, _) => None,
        };

        Ok(RatingItem {
            rating,
            title,
            year: self.year,
            ids,
        })
    }
}

impl RatingChangeArgs {
    fn into_items(self, change: RatingChange) -> Result<RatingItems, ToolError> {
        if self.items.is_empty() {
            return Err(ToolError::invalid("items must contain at least one entry"));
        }
        let items = self
            .items
            .into_iter()
            .map(|item| item.into_item(change))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RatingItems::of(self.rating_type, items))
    }
}

fn rating_type_property() -> Value {
    json!({
        "type": "string",
        "enum": ["movies", "shows", "seasons", "episodes"],
        "description": "Type of content"
    })
}

fn items_property(rating_required: bool) -> Value {
    let mut item = json!({
        "type": "object",
        "properties": {
            "rating": {"type": "integer", "minimum": 1, "maximum": 10, "description": "Rating from 1 to 10"},
            "trakt_id": {"type": ["string", "integer"], "description": "Trakt ID"},
            "imdb_id": {"type": "string", "description": "IMDB ID"},
            "tmdb_id": {"type": ["string", "integer"], "description": "TMDB ID"},
            "title": {"type": "string", "description": "Title"},
            "year": {"type": "integer", "description": "Release year"}
        }
    });
    if rating_required {
        item["required"] = json!(["rating"]);
    }
    json!({"type": "array", "minItems": 1, "items": item})
}

pub(super) fn definitions() -> Vec<Tool> {
    vec![
        tool(
            "fetch_user_ratings",
            "Fetch the authenticated user's personal ratings from Trakt. Requires OAuth authentication.",
            json!({
                "rating_type": {
                    "type": "string",
                    "enum": ["movies", "shows", "seasons", "episodes"],
                    "default": "movies",
                    "description": "Type of ratings to fetch"
                },
                "rating": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 10,
                    "description": "Only return ratings with this score"
                }
            }),
            &[],
        ),
        tool(
            "add_user_ratings",
            "Add new ratings for the authenticated user. Requires OAuth authentication.",
            json!({"rating_type": rating_type_property(), "items": items_property(true)}),
            &["rating_type", "items"],
        ),
        tool(
            "remove_user_ratings",
            "Remove ratings for the authenticated user. Requires OAuth authentication.",
            json!({"rating_type": rating_type_property(), "items": items_property(false)}),
            &["rating_type", "items"],
        ),
    ]
}

pub(super) async fn user_ratings(ctx: &AppContext, args: UserRatingsArgs) -> Result<String, ToolError> {
    let filter = args.rating.map(check_rating).transpose()?;
    let api = ctx.authenticated_api().await?;

    let mut request = Request::sync().ratings(args.rating_type);
    if let Some(rating) = filter {
        request = request.rating(rating);
    }
    let ratings = api.send(request).await?;
    Ok(format_user_ratings(&ratings, args.rating_type, filter))
}

pub(super) async fn add_ratings(ctx: &AppContext, args: RatingChangeArgs) -> Result<String, ToolError> {
    let kind = args.rating_type;
    let items = args.into_items(RatingChange::Added)?;
    let api = ctx.authenticated_api().await?;

    let summary = api.send(Request::sync().add_ratings(items)).await?;
    tracing::info!(kind = %kind, added = summary.added.map(|c| c.get(kind)).unwrap_or(0), "Added ratings");
    Ok(format_ratings_summary(&summary, RatingChange::Added, kind))
}

pub(super) async fn remove_ratings(ctx: &AppContext, args: RatingChangeArgs) -> Result<String, ToolError> {
    let kind = args.rating_type;
    let items = args.into_items(RatingChange::Removed)?;
    let api = ctx.authenticated_api().await?;

    let summary = api.send(Request::sync().remove_ratings(items)).await?;
    tracing::info!(kind = %kind, removed = summary.deleted.map(|c| c.get(kind)).unwrap_or(0), "Removed ratings");
    Ok(format_ratings_summary(&summary, RatingChange::Removed, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change_args(value: Value) -> RatingChangeArgs {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn fetch_defaults_to_movies() {
        let args: UserRatingsArgs = serde_json::from_value(json!({})).unwrap();
        assert_eq!(args.rating_type, MediaType::Movies);
        assert_eq!(args.rating, None);
        assert!(check_rating(11).unwrap_err().is_invalid_params());
    }

    #[test]
    fn add_builds_ids_from_strings_and_numbers() {
        let args = change_args(json!({
            "rating_type": "movies",
            "items": [
                {"rating": 9, "trakt_id": " 481 "},
                {"rating": 7, "tmdb_id": 603, "imdb_id": "tt0133093"}
            ]
        }));
        let body = args.into_items(RatingChange::Added).unwrap();
        assert_eq!(body.movies[0].ids.trakt, Some(481));
        assert_eq!(body.movies[1].ids.tmdb, Some(603));
        assert_eq!(body.movies[1].ids.imdb.as_deref(), Some("tt0133093"));
        assert!(body.shows.is_empty());
    }

    #[test]
    fn add_requires_a_valid_rating() {
        for item in [json!({"trakt_id": "1"}), json!({"trakt_id": "1", "rating": 0})] {
            let args = change_args(json!({"rating_type": "shows", "items": [item]}));
            assert!(args.into_items(RatingChange::Added).unwrap_err().is_invalid_params());
        }
    }

    #[test]
    fn remove_ignores_the_rating() {
        let args = change_args(json!({
            "rating_type": "episodes",
            "items": [{"title": "Pilot", "year": 2008, "rating": 3}]
        }));
        let body = args.into_items(RatingChange::Removed).unwrap();
        assert_eq!(body.episodes[0].rating, None);
        assert_eq!(body.episodes[0].title.as_deref(), Some("Pilot"));
    }

    #[test]
    fn unidentified_or_empty_items_are_invalid() {
        let args = change_args(json!({"rating_type": "movies", "items": [{"rating": 5, "title": "  "}]}));
        assert!(args.into_items(RatingChange::Added).is_err());

        let args = change_args(json!({"rating_type": "movies", "items": []}));
        assert!(args.into_items(RatingChange::Removed).is_err());

        let args = change_args(json!({"rating_type": "movies", "items": [{"rating": 5, "trakt_id": "abc"}]}));
        assert!(args.into_items(RatingChange::Added).unwrap_err().is_invalid_params());
    }
}
