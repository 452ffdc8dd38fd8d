//! Quote of the day, paginated to fit a single-line strip.

use serde::Deserialize;

use super::WidgetError;
use crate::carousel::Pager;
use crate::http::{FetchError, HttpClient};

pub const QUOTE_URL: &str = "https://quoteslate.vercel.app/api/quotes/random";

/// Target page length in characters. Words are never split.
pub const PAGE_SIZE: usize = 90;

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    quote: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    /// `“text” — author` with every whitespace run collapsed to one space.
    pub fn display_text(&self) -> String {
        let collapse = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
        format!("“{}” — {}", collapse(&self.text), collapse(&self.author))
    }
}

/// Splits `text` on spaces into pages of at most `page_size` characters.
///
/// A single word longer than a page gets a page of its own.
pub fn paginate(text: &str, page_size: usize) -> Vec<String> {
    let mut pages = Vec::new();
    let mut current = String::new();

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let next_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if next_len > page_size && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// A fetched quote split into pages, with a wrapping page cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteStrip {
    pages: Vec<String>,
    pager: Pager,
}

impl QuoteStrip {
    pub fn new(quote: &Quote) -> Self {
        let pages = paginate(&quote.display_text(), PAGE_SIZE);
        let pager = Pager::new(pages.len());
        Self { pages, pager }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether the "next page" arrow should be shown.
    pub fn is_paged(&self) -> bool {
        self.pages.len() > 1
    }

    /// Advances one page, wrapping from the last back to the first.
    pub fn next_page(&mut self) {
        self.pager.next();
    }

    /// Current page with an ellipsis before continuations and after pages that continue.
    pub fn current_text(&self) -> String {
        let Some(page) = self.pages.get(self.pager.index()) else {
            return String::new();
        };
        let lead = if self.pager.is_first() { "" } else { "…" };
        let tail = if self.pager.is_last() { "" } else { "…" };
        format!("{lead}{page}{tail}")
    }
}

fn to_widget_error(err: FetchError) -> WidgetError {
    let message = match &err {
        FetchError::Status { status, .. } => format!("Failed to fetch quote (HTTP {status})"),
        FetchError::Malformed(_) => "Unexpected response format".to_string(),
        _ => "Something went wrong fetching a quote".to_string(),
    };
    WidgetError::new(message).with_detail(err.to_string())
}

/// Fetches a random quote.
pub fn fetch_quote(client: &dyn HttpClient) -> Result<Quote, WidgetError> {
    let response = client
        .get(QUOTE_URL)
        .and_then(|r| r.error_for_status())
        .map_err(|e| {
            if let FetchError::Status { status, body } = &e {
                log::warn!("quote API error {}: {}", status, body);
            }
            to_widget_error(e)
        })?;

    let parsed: QuoteResponse = response.json().map_err(to_widget_error)?;
    let text = parsed
        .quote
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| to_widget_error(FetchError::Malformed("missing quote".to_string())))?;

    Ok(Quote {
        text,
        author: parsed
            .author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| "Unknown author".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockClient;

    #[test]
    fn test_display_text_collapses_whitespace() {
        let quote = Quote {
            text: "Be\n  yourself;\teveryone else is taken. ".to_string(),
            author: "Oscar Wilde".to_string(),
        };
        assert_eq!(quote.display_text(), "“Be yourself; everyone else is taken.” — Oscar Wilde");

        let padded = Quote {
            text: "  Less is more.".to_string(),
            author: " Mies\n".to_string(),
        };
        assert_eq!(padded.display_text(), "“Less is more.” — Mies");
    }

    #[test]
    fn test_paginate_respects_word_boundaries() {
        let text = "alpha beta gamma delta epsilon";
        let pages = paginate(text, 11);
        assert_eq!(pages, vec!["alpha beta", "gamma delta", "epsilon"]);
        for page in &pages {
            assert!(page.chars().count() <= 11);
        }
        assert_eq!(pages.join(" "), text);
    }

    #[test]
    fn test_paginate_long_word_gets_own_page() {
        let pages = paginate("a supercalifragilistic b", 5);
        assert_eq!(pages, vec!["a", "supercalifragilistic", "b"]);
        assert!(paginate("", 5).is_empty());
    }

    #[test]
    fn test_strip_ellipses_and_wrap() {
        let words: Vec<String> = (0..40).map(|i| format!("word{i}")).collect();
        let quote = Quote {
            text: words.join(" "),
            author: "Someone".to_string(),
        };
        let mut strip = QuoteStrip::new(&quote);
        assert!(strip.is_paged());
        let pages = strip.page_count();

        let first = strip.current_text();
        assert!(first.starts_with('“') && first.ends_with('…'));

        for _ in 1..pages {
            strip.next_page();
        }
        let last = strip.current_text();
        assert!(last.starts_with('…') && last.ends_with("Someone"));

        strip.next_page();
        assert_eq!(strip.current_text(), first);
    }

    #[test]
    fn test_fetch_quote_defaults_author() {
        let client = MockClient::ok(200, r#"{"id": 1, "quote": "Stay hungry.", "author": ""}"#);
        let quote = fetch_quote(&client).unwrap();
        assert_eq!(quote.author, "Unknown author");
        assert!(!QuoteStrip::new(&quote).is_paged());
    }

    #[test]
    fn test_fetch_quote_errors() {
        let client = MockClient::ok(500, "oops");
        assert_eq!(fetch_quote(&client).unwrap_err().message, "Failed to fetch quote (HTTP 500)");

        let client = MockClient::ok(200, r#"{"author": "Nobody"}"#);
        assert_eq!(fetch_quote(&client).unwrap_err().message, "Unexpected response format");
    }
}
