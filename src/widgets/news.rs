//! Top headlines (GNews) and the scrolling ticker that displays them.

use serde::Deserialize;

use super::WidgetError;
use crate::config::NewsConfig;
use crate::http::{build_url, FetchError, HttpClient};

pub const NEWS_URL: &str = "https://gnews.io/api/v4/top-headlines";

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: String,
    url: String,
    #[serde(default)]
    source: Option<Source>,
}

#[derive(Debug, Deserialize)]
struct Source {
    #[serde(default)]
    name: Option<String>,
}

/// One ticker entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub url: String,
    pub source: Option<String>,
}

impl Headline {
    /// `"[source] title"`, or just the title when the source is unknown.
    pub fn label(&self) -> String {
        match &self.source {
            Some(source) => format!("[{}] {}", source, self.title),
            None => self.title.clone(),
        }
    }
}

fn to_widget_error(err: FetchError) -> WidgetError {
    let message = match &err {
        FetchError::MissingKey(_) => "GNews API key not found, check your configuration".to_string(),
        FetchError::Status { status, .. } => format!("Failed to load news: HTTP status {status}"),
        _ => "Failed to load news".to_string(),
    };
    WidgetError::new(message).with_detail(err.to_string())
}

/// Fetches the configured number of top headlines.
pub fn fetch_headlines(client: &dyn HttpClient, config: &NewsConfig) -> Result<Vec<Headline>, WidgetError> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(FetchError::MissingKey("GNews API key"))
        .map_err(to_widget_error)?;

    let max = config.max.to_string();
    let url = build_url(
        NEWS_URL,
        &[
            ("country", config.country.as_str()),
            ("lang", config.lang.as_str()),
            ("max", max.as_str()),
            ("apikey", api_key),
        ],
    )
    .map_err(to_widget_error)?;

    let response = client
        .get(&url)
        .and_then(|r| r.error_for_status())
        .map_err(to_widget_error)?;
    let parsed: NewsResponse = response.json().map_err(to_widget_error)?;

    Ok(parsed
        .articles
        .into_iter()
        .map(|a| Headline {
            title: a.title,
            url: a.url,
            source: a.source.and_then(|s| s.name).filter(|n| !n.is_empty()),
        })
        .collect())
}

/// Marquee position for a strip of headlines drawn twice back to back.
///
/// The offset wraps after one strip width, so the second copy takes over
/// exactly where the first began and the loop looks seamless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker {
    offset: f32,
    /// Scroll speed in points per second
    speed: f32,
    paused: bool,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl Ticker {
    pub fn new(speed: f32) -> Self {
        Self {
            offset: 0.0,
            speed,
            paused: false,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advances by `dt` seconds for a strip `strip_width` wide.
    pub fn advance(&mut self, dt: f32, strip_width: f32) {
        if self.paused || strip_width <= 0.0 {
            return;
        }
        self.offset = (self.offset + self.speed * dt.max(0.0)).rem_euclid(strip_width);
    }

    /// X positions (relative to the window's left edge) of the two strip copies.
    pub fn copy_positions(&self, strip_width: f32) -> [f32; 2] {
        [-self.offset, strip_width - self.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockClient;

    fn configured() -> NewsConfig {
        NewsConfig {
            api_key: Some("k".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parses_headlines() {
        let client = MockClient::ok(
            200,
            r#"{"totalArticles": 2, "articles": [
                {"title": "Typhoon nears", "url": "https://n.tw/1", "source": {"name": "CNA", "url": "https://cna"}},
                {"title": "Markets up", "url": "https://n.tw/2", "source": {"name": ""}}
            ]}"#,
        );
        let headlines = fetch_headlines(&client, &configured()).unwrap();
        assert_eq!(headlines.len(), 2);
        assert_eq!(headlines[0].label(), "[CNA] Typhoon nears");
        assert_eq!(headlines[1].label(), "Markets up");
        assert!(client.last_url().contains("max=10"));
    }

    #[test]
    fn test_missing_articles_is_empty() {
        let client = MockClient::ok(200, "{}");
        assert!(fetch_headlines(&client, &configured()).unwrap().is_empty());
    }

    #[test]
    fn test_status_message() {
        let client = MockClient::ok(403, "forbidden");
        let err = fetch_headlines(&client, &configured()).unwrap_err();
        assert_eq!(err.message, "Failed to load news: HTTP status 403");
    }

    #[test]
    fn test_ticker_wraps_at_strip_width() {
        let mut ticker = Ticker::new(100.0);
        ticker.advance(1.5, 400.0);
        assert_eq!(ticker.offset(), 150.0);
        ticker.advance(3.0, 400.0);
        assert_eq!(ticker.offset(), 50.0);
        assert_eq!(ticker.copy_positions(400.0), [-50.0, 350.0]);
    }

    #[test]
    fn test_paused_ticker_holds() {
        let mut ticker = Ticker::new(100.0);
        ticker.set_paused(true);
        ticker.advance(1.0, 400.0);
        assert_eq!(ticker.offset(), 0.0);
        ticker.set_paused(false);
        ticker.advance(1.0, 0.0);
        assert_eq!(ticker.offset(), 0.0);
    }
}
