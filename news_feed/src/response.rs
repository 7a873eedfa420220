//! Parsing of backend answers.
//!
//! The backend body is a messages-API response: `{ "content": [{ "type":
//! "text", "text": .. }, ..] }`. Bulk answers are a JSON array of news items
//! inside that text, sometimes wrapped in markdown code fences. Insight
//! answers are free text.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::news_item::NewsItem;

/// Shown when an insight response carries no text at all.
pub const INSIGHT_FALLBACK: &str = "Unable to generate insight.";

/// Errors from turning backend text into news items.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The cleaned text is not valid JSON.
    #[error("backend returned malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The cleaned text is valid JSON but not an array.
    #[error("expected a JSON array of news items, got {0}")]
    NotAnArray(&'static str),
}

/// Concatenates every text segment of a messages-API body.
///
/// Returns `None` when there is no text, including when `content` is absent.
pub fn response_text(body: &Value) -> Option<String> {
    let text: String = body
        .get("content")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() { None } else { Some(text) }
}

/// Removes every ```` ```json ```` and ```` ``` ```` marker and trims the rest.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Extracts the news items of a bulk answer, dropping ids in `known`.
///
/// A body without text counts as an empty array.
pub fn parse_news_items(body: &Value, known: &HashSet<String>) -> Result<Vec<NewsItem>, ParseError> {
    match response_text(body) {
        Some(text) => parse_news_text(&text, known),
        None => Ok(Vec::new()),
    }
}

/// Parses raw bulk text (fenced or not) into news items.
///
/// Array elements that are not item-shaped are skipped one by one; a repeated
/// id within the same answer keeps its first occurrence.
pub fn parse_news_text(text: &str, known: &HashSet<String>) -> Result<Vec<NewsItem>, ParseError> {
    let cleaned = strip_code_fences(text);
    let value: Value = serde_json::from_str(&cleaned)?;
    let elements = match value {
        Value::Array(elements) => elements,
        other => return Err(ParseError::NotAnArray(json_kind(&other))),
    };

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(elements.len());
    for element in elements {
        match serde_json::from_value::<NewsItem>(element) {
            Ok(item) if known.contains(&item.id) => {}
            Ok(item) => {
                if seen.insert(item.id.clone()) {
                    items.push(item);
                }
            }
            Err(e) => debug!(error = %e, "skipping malformed news item"),
        }
    }
    Ok(items)
}

/// Insight text of a messages-API body, or [`INSIGHT_FALLBACK`].
pub fn parse_insight(body: &Value) -> String {
    response_text(body).unwrap_or_else(|| INSIGHT_FALLBACK.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
