//! NASA Astronomy Picture of the Day.
//!
//! The free API key has a small daily quota, so a successful response is cached
//! for the rest of the (UTC) day. Once the quota is hit, a rate-limit marker is
//! stored and the card shows demo data without calling the API again that day.

use serde::{Deserialize, Serialize};

use super::{truncate_chars, WidgetError};
use crate::http::{build_url, FetchError, HttpClient};
use crate::storage::{DailyCache, KeyValueStore};

pub const APOD_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Key used when none is configured. Heavily rate limited.
pub const DEMO_KEY: &str = "DEMO_KEY";

/// Cache prefix in the key-value store.
pub const CACHE_PREFIX: &str = "apod";

/// Explanations longer than this are cut in the collapsed card.
pub const EXPLANATION_PREVIEW_CHARS: usize = 150;

const RATE_LIMIT_MESSAGE: &str = "Today's free NASA APOD quota is used up, showing a demo picture.";
const RATE_LIMIT_DETAIL: &str =
    "You have exceeded your rate limit for today. Try again tomorrow or make fewer API calls.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apod {
    pub title: String,
    pub date: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

fn default_media_type() -> String {
    "image".to_string()
}

impl Apod {
    pub fn is_image(&self) -> bool {
        self.media_type == "image"
    }

    /// Link for "open full size": the HD image when there is one.
    pub fn full_size_url(&self) -> &str {
        self.hdurl.as_deref().unwrap_or(&self.url)
    }

    pub fn explanation_preview(&self) -> String {
        truncate_chars(&self.explanation, EXPLANATION_PREVIEW_CHARS)
    }

    /// Demo picture shown once the daily quota is exhausted.
    pub fn fallback(date: &str) -> Self {
        Self {
            title: "Demo: starry sky (today's NASA quota is used up)".to_string(),
            date: date.to_string(),
            media_type: "image".to_string(),
            url: "https://picsum.photos/800/600?random=1".to_string(),
            hdurl: Some("https://picsum.photos/1600/1200?random=1".to_string()),
            explanation: "This is a demo starry-sky picture. Today's free NASA APOD API quota has \
                          been used up, so the real picture of the day can't be fetched right now."
                .to_string(),
            copyright: None,
        }
    }
}

/// Result of loading the card: data to show plus an optional warning banner.
#[derive(Debug, Clone, PartialEq)]
pub struct ApodCard {
    pub apod: Apod,
    pub notice: Option<WidgetError>,
    /// Whether the data came from today's cache
    pub from_cache: bool,
}

/// Picks the API key: explicit, then configured, then [`DEMO_KEY`].
pub fn resolve_api_key<'a>(explicit: Option<&'a str>, configured: Option<&'a str>) -> &'a str {
    explicit
        .filter(|k| !k.trim().is_empty())
        .or(configured.filter(|k| !k.trim().is_empty()))
        .unwrap_or(DEMO_KEY)
}

/// Pulls `error.message` out of a NASA error body, else the raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn rate_limited_card(date: &str, detail: Option<String>) -> ApodCard {
    ApodCard {
        apod: Apod::fallback(date),
        notice: Some(WidgetError::new(RATE_LIMIT_MESSAGE).with_detail(detail.unwrap_or_else(|| RATE_LIMIT_DETAIL.to_string()))),
        from_cache: false,
    }
}

/// What a request to the APOD API produced, before anything is stored.
#[derive(Debug)]
pub enum ApodResponse {
    Fetched(Apod),
    /// HTTP 429, with the detail NASA sent
    RateLimited(String),
    Failed(WidgetError),
}

/// Answers from the daily cache alone: today's cached picture, or the
/// fallback card when the quota was already hit today.
pub fn cached_apod(store: &dyn KeyValueStore, cache: &DailyCache) -> Option<ApodCard> {
    if let Some(apod) = cache.get_json::<Apod>(store) {
        log::debug!("apod: using cached {}", cache.entry_key());
        return Some(ApodCard {
            apod,
            notice: None,
            from_cache: true,
        });
    }

    if cache.is_rate_limited(store) {
        log::debug!("apod: quota already hit today, skipping request");
        return Some(rate_limited_card(&cache_date(cache), None));
    }

    None
}

/// Calls the API. Touches no store.
pub fn request_apod(client: &dyn HttpClient, api_key: &str) -> ApodResponse {
    let url = match build_url(APOD_URL, &[("api_key", api_key)]) {
        Ok(url) => url,
        Err(e) => {
            return ApodResponse::Failed(
                WidgetError::new("Something went wrong fetching data").with_detail(e.to_string()),
            )
        }
    };
    log::info!("apod: fetching (custom key: {})", api_key != DEMO_KEY);

    let response = match client.get(&url).and_then(|r| r.error_for_status()) {
        Ok(response) => response,
        Err(FetchError::Status { status: 429, body }) => {
            log::warn!("apod: rate limited");
            return ApodResponse::RateLimited(error_detail(&body));
        }
        Err(FetchError::Status { status, body }) => {
            log::error!("apod: HTTP {}: {}", status, body);
            return ApodResponse::Failed(
                WidgetError::new(format!("Could not fetch today's astronomy picture (HTTP {status})"))
                    .with_detail(error_detail(&body)),
            );
        }
        Err(e) => {
            return ApodResponse::Failed(
                WidgetError::new("Something went wrong fetching data").with_detail(e.to_string()),
            )
        }
    };

    match response.json::<Apod>() {
        Ok(apod) => ApodResponse::Fetched(apod),
        Err(e) => ApodResponse::Failed(WidgetError::new("Something went wrong fetching data").with_detail(e.to_string())),
    }
}

/// Stores the picture or the rate-limit marker, then builds the card.
pub fn record_apod(
    store: &mut dyn KeyValueStore,
    cache: &DailyCache,
    response: ApodResponse,
) -> Result<ApodCard, WidgetError> {
    match response {
        ApodResponse::Fetched(apod) => {
            if let Err(e) = cache.put_json(store, &apod) {
                log::warn!("apod: could not cache response: {}", e);
            }
            Ok(ApodCard {
                apod,
                notice: None,
                from_cache: false,
            })
        }
        ApodResponse::RateLimited(detail) => {
            if let Err(e) = cache.mark_rate_limited(store) {
                log::warn!("apod: could not store rate-limit marker: {}", e);
            }
            Ok(rate_limited_card(&cache_date(cache), Some(detail)))
        }
        ApodResponse::Failed(err) => Err(err),
    }
}

/// Loads today's picture, consulting and updating the daily cache in `store`.
pub fn load_apod(
    client: &dyn HttpClient,
    store: &mut dyn KeyValueStore,
    cache: &DailyCache,
    api_key: &str,
) -> Result<ApodCard, WidgetError> {
    if let Some(card) = cached_apod(store, cache) {
        return Ok(card);
    }
    let response = request_apod(client, api_key);
    record_apod(store, cache, response)
}

fn cache_date(cache: &DailyCache) -> String {
    cache.date().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockClient;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    const SAMPLE: &str = r#"{
        "title": "The Horsehead Nebula",
        "date": "2025-03-07",
        "media_type": "image",
        "url": "https://apod.nasa.gov/horse.jpg",
        "hdurl": "https://apod.nasa.gov/horse_hd.jpg",
        "explanation": "A dark cloud of dust and gas.",
        "service_version": "v1"
    }"#;

    fn cache() -> DailyCache {
        DailyCache::new(CACHE_PREFIX, NaiveDate::from_ymd_opt(2025, 3, 7).unwrap())
    }

    #[test]
    fn test_success_is_cached() {
        let mut store = MemoryStore::new();
        let client = MockClient::ok(200, SAMPLE);

        let card = load_apod(&client, &mut store, &cache(), DEMO_KEY).unwrap();
        assert_eq!(card.apod.title, "The Horsehead Nebula");
        assert!(!card.from_cache);
        assert_eq!(card.apod.full_size_url(), "https://apod.nasa.gov/horse_hd.jpg");

        // Second load comes from the store; the mock has no more responses
        let again = load_apod(&client, &mut store, &cache(), DEMO_KEY).unwrap();
        assert!(again.from_cache);
        assert_eq!(again.apod, card.apod);
        assert_eq!(client.request_count(), 1);
    }

    #[test]
    fn test_rate_limit_sets_marker_and_falls_back() {
        let mut store = MemoryStore::new();
        let client = MockClient::ok(
            429,
            r#"{"error": {"code": "OVER_RATE_LIMIT", "message": "You have exceeded your rate limit."}}"#,
        );

        let card = load_apod(&client, &mut store, &cache(), DEMO_KEY).unwrap();
        assert_eq!(card.apod.date, "2025-03-07");
        let notice = card.notice.unwrap();
        assert_eq!(notice.message, RATE_LIMIT_MESSAGE);
        assert_eq!(notice.detail.as_deref(), Some("You have exceeded your rate limit."));
        assert!(cache().is_rate_limited(&store));

        // No further requests today
        let again = load_apod(&client, &mut store, &cache(), DEMO_KEY).unwrap();
        assert!(again.notice.is_some());
        assert_eq!(client.request_count(), 1);
    }

    #[test]
    fn test_other_status_is_an_error() {
        let mut store = MemoryStore::new();
        let client = MockClient::ok(403, "plain text denial");
        let err = load_apod(&client, &mut store, &cache(), "bad").unwrap_err();
        assert_eq!(err.message, "Could not fetch today's astronomy picture (HTTP 403)");
        assert_eq!(err.detail.as_deref(), Some("plain text denial"));
        assert!(!cache().is_rate_limited(&store));
    }

    #[test]
    fn test_request_leaves_store_untouched_until_recorded() {
        let mut store = MemoryStore::new();
        assert!(cached_apod(&store, &cache()).is_none());

        let client = MockClient::ok(429, r#"{"error": {"message": "slow down"}}"#);
        let response = request_apod(&client, DEMO_KEY);
        assert!(matches!(response, ApodResponse::RateLimited(ref detail) if detail == "slow down"));
        assert!(!cache().is_rate_limited(&store));

        let card = record_apod(&mut store, &cache(), response).unwrap();
        assert!(card.notice.is_some());
        assert!(cache().is_rate_limited(&store));
        assert!(cached_apod(&store, &cache()).is_some_and(|c| c.notice.is_some()));
    }

    #[test]
    fn test_resolve_api_key_order() {
        assert_eq!(resolve_api_key(Some("mine"), Some("cfg")), "mine");
        assert_eq!(resolve_api_key(Some(" "), Some("cfg")), "cfg");
        assert_eq!(resolve_api_key(None, None), DEMO_KEY);
    }

    #[test]
    fn test_video_entry_and_preview() {
        let apod: Apod = serde_json::from_str(
            r#"{"title":"Launch","date":"2025-01-01","media_type":"video","url":"https://youtu.be/x","explanation":"x"}"#,
        )
        .unwrap();
        assert!(!apod.is_image());
        assert_eq!(apod.full_size_url(), "https://youtu.be/x");

        let long = Apod {
            explanation: "y".repeat(200),
            ..apod
        };
        assert_eq!(long.explanation_preview().chars().count(), EXPLANATION_PREVIEW_CHARS + 1);
    }
}
