//! Canned conversation starters.

use crate::error::ToolError;
use crate::protocol::{Content, GetPromptResult, Prompt, PromptMessage, Role};

struct Entry {
    name: &'static str,
    description: &'static str,
    text: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        name: "discover_trending",
        description: "Discover trending movies and TV shows on Trakt",
        text: "Show me what movies and TV shows are trending on Trakt right now. Please include both movies and shows, and provide details about ratings, genres, and why they're popular.",
    },
    Entry {
        name: "search_entertainment",
        description: "Search for movies or TV shows by title with personalized recommendations",
        text: "Help me search for a movie or TV show. I'd like to find something specific by title, and also get recommendations based on what I'm looking for. What would you like to find?",
    },
];

pub fn list() -> Vec<Prompt> {
    ENTRIES
        .iter()
        .map(|entry| Prompt {
            name: entry.name.to_string(),
            description: Some(entry.description.to_string()),
            arguments: Vec::new(),
        })
        .collect()
}

pub fn get(name: &str) -> Result<GetPromptResult, ToolError> {
    let entry = ENTRIES
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| ToolError::invalid(format!("Unknown prompt: {}", name)))?;

    Ok(GetPromptResult {
        description: Some(entry.description.to_string()),
        messages: vec![PromptMessage {
            role: Role::User,
            content: Content::Text {
                text: entry.text.to_string(),
            },
        }],
    })
}
