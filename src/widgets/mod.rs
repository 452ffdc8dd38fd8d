//! Data layer of the portfolio's floating widgets.
//!
//! Each widget is a plain request → model flow over [`crate::http::HttpClient`]:
//! - `weather` - current conditions at a configured location
//! - `news` - top headlines and the marquee ticker
//! - `quote` - a random quote, paginated for a one-line strip
//! - `apod` - astronomy picture of the day, cached per day
//! - `pokemon` - creature lookup card
//! - `chat` - conversations with a generative-AI model
//!
//! Failures are reported as [`WidgetError`], already mapped to the message the
//! widget shows.

pub mod apod;
pub mod chat;
pub mod news;
pub mod pokemon;
pub mod quote;
pub mod weather;

use thiserror::Error;

/// A widget failure as shown to the user, with optional technical detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct WidgetError {
    pub message: String,
    pub detail: Option<String>,
}

impl WidgetError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if !detail.trim().is_empty() {
            self.detail = Some(detail);
        }
        self
    }
}

/// Shortens `text` to `max_chars` characters, appending an ellipsis when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}
