//! Asynchronous widget fetching.
//!
//! Each request runs on its own background thread so the GUI stays responsive.
//! Results come back over a channel and the worker requests a repaint so the
//! update loop picks them up on the next frame.

use eframe::egui;
use folio::config::{NewsConfig, WeatherConfig};
use folio::storage::DailyCache;
use folio::widgets::apod::{self, ApodCard};
use folio::widgets::chat::{self, PendingRequest};
use folio::widgets::news::{self, Headline};
use folio::widgets::pokemon::{self, Pokemon};
use folio::widgets::quote::{self, Quote};
use folio::widgets::weather::{self, WeatherReport};
use folio::{HttpClient, KeyValueStore, WidgetError};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use crate::io::{LoadingState, WidgetKind};

/// Key-value store shared between the UI thread and workers.
pub type SharedStore = Arc<Mutex<Box<dyn KeyValueStore>>>;

/// Result of a completed background request.
pub enum FetchResult {
    Weather(Result<WeatherReport, WidgetError>),
    News(Result<Vec<Headline>, WidgetError>),
    Quote(Result<Quote, WidgetError>),
    Apod(Result<ApodCard, WidgetError>),
    Pokemon(Result<Pokemon, WidgetError>),
    Chat {
        /// Conversation that asked
        conversation_id: String,
        result: Result<String, WidgetError>,
    },
}

impl FetchResult {
    pub fn kind(&self) -> WidgetKind {
        match self {
            FetchResult::Weather(_) => WidgetKind::Weather,
            FetchResult::News(_) => WidgetKind::News,
            FetchResult::Quote(_) => WidgetKind::Quote,
            FetchResult::Apod(_) => WidgetKind::Apod,
            FetchResult::Pokemon(_) => WidgetKind::Pokemon,
            FetchResult::Chat { .. } => WidgetKind::Chat,
        }
    }
}

/// Locks a mutex, recovering the data if a worker panicked while holding it.
pub fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs widget requests in the background, at most one per widget kind.
pub struct WidgetFetcher {
    client: Arc<dyn HttpClient>,
    store: SharedStore,
    loading_state: Arc<Mutex<LoadingState>>,
    sender: Sender<FetchResult>,
    receiver: Receiver<FetchResult>,
}

impl WidgetFetcher {
    /// Creates a fetcher with no request in flight.
    ///
    /// # Arguments
    /// * `client` - HTTP implementation the workers use
    /// * `store` - Store consulted by cached widgets
    pub fn new(client: Arc<dyn HttpClient>, store: SharedStore) -> Self {
        let (sender, receiver) = channel();
        Self {
            client,
            store,
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            sender,
            receiver,
        }
    }

    pub fn is_loading(&self, kind: WidgetKind) -> bool {
        lock(&self.loading_state).is_loading(kind)
    }

    pub fn any_loading(&self) -> bool {
        lock(&self.loading_state).any_loading()
    }

    /// Spawns `job` for `kind` unless one is already running. Returns whether it was spawned.
    fn spawn<F>(&self, kind: WidgetKind, ctx: &egui::Context, job: F) -> bool
    where
        F: FnOnce(&dyn HttpClient, &SharedStore) -> FetchResult + Send + 'static,
    {
        if !lock(&self.loading_state).begin(kind) {
            log::debug!("{:?} request already in flight", kind);
            return false;
        }

        let client = Arc::clone(&self.client);
        let store = Arc::clone(&self.store);
        let loading_state = Arc::clone(&self.loading_state);
        let sender = self.sender.clone();
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = job(client.as_ref(), &store);

            lock(&loading_state).finish(kind);

            // The receiver only goes away when the app is closing
            let _ = sender.send(result);
            ctx_handle.request_repaint();
        });
        true
    }

    pub fn fetch_weather(&self, config: WeatherConfig, ctx: &egui::Context) -> bool {
        self.spawn(WidgetKind::Weather, ctx, move |client, _| {
            FetchResult::Weather(weather::fetch_weather(client, &config))
        })
    }

    pub fn fetch_news(&self, config: NewsConfig, ctx: &egui::Context) -> bool {
        self.spawn(WidgetKind::News, ctx, move |client, _| {
            FetchResult::News(news::fetch_headlines(client, &config))
        })
    }

    pub fn fetch_quote(&self, ctx: &egui::Context) -> bool {
        self.spawn(WidgetKind::Quote, ctx, |client, _| FetchResult::Quote(quote::fetch_quote(client)))
    }

    /// Loads today's APOD through the daily cache in the shared store.
    pub fn fetch_apod(&self, api_key: String, ctx: &egui::Context) -> bool {
        self.spawn(WidgetKind::Apod, ctx, move |client, store| {
            let cache = DailyCache::today(apod::CACHE_PREFIX);
            if let Some(card) = apod::cached_apod(&**lock(store), &cache) {
                return FetchResult::Apod(Ok(card));
            }
            // The store stays unlocked while the request is in flight
            let response = apod::request_apod(client, &api_key);
            FetchResult::Apod(apod::record_apod(&mut **lock(store), &cache, response))
        })
    }

    pub fn fetch_pokemon(&self, query: String, ctx: &egui::Context) -> bool {
        self.spawn(WidgetKind::Pokemon, ctx, move |client, _| {
            FetchResult::Pokemon(pokemon::fetch_pokemon(client, &query))
        })
    }

    pub fn send_chat(&self, request: PendingRequest, ctx: &egui::Context) -> bool {
        self.spawn(WidgetKind::Chat, ctx, move |client, _| FetchResult::Chat {
            result: chat::generate(client, &request),
            conversation_id: request.conversation_id,
        })
    }

    /// Drains every result that arrived since the last call.
    ///
    /// Called once per frame in the update loop.
    pub fn check_completion(&mut self) -> Vec<FetchResult> {
        self.receiver.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::{FetchError, HttpResponse, MemoryStore};
    use std::time::{Duration, Instant};

    /// Answers every request with the same canned response.
    struct CannedClient {
        status: u16,
        body: &'static str,
    }

    impl HttpClient for CannedClient {
        fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
            Ok(HttpResponse::new(self.status, self.body))
        }

        fn post_json(&self, _url: &str, _body: &serde_json::Value) -> Result<HttpResponse, FetchError> {
            Ok(HttpResponse::new(self.status, self.body))
        }
    }

    fn fetcher(status: u16, body: &'static str) -> WidgetFetcher {
        let boxed: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let store: SharedStore = Arc::new(Mutex::new(boxed));
        WidgetFetcher::new(Arc::new(CannedClient { status, body }), store)
    }

    fn wait_for(fetcher: &mut WidgetFetcher) -> FetchResult {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = fetcher.check_completion().pop() {
                return result;
            }
            assert!(Instant::now() < deadline, "worker did not report back");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_quote_result_arrives() {
        let mut fetcher = fetcher(200, r#"{"quote": "Less is more.", "author": "Mies"}"#);
        let ctx = egui::Context::default();
        assert!(fetcher.fetch_quote(&ctx));

        match wait_for(&mut fetcher) {
            FetchResult::Quote(Ok(quote)) => assert_eq!(quote.author, "Mies"),
            _ => panic!("expected a quote"),
        }
        assert!(!fetcher.is_loading(WidgetKind::Quote));
    }

    #[test]
    fn test_chat_result_names_conversation() {
        let mut fetcher = fetcher(429, "{}");
        let ctx = egui::Context::default();
        let request = PendingRequest {
            conversation_id: "abc12345".to_string(),
            model: chat::DEFAULT_MODEL.to_string(),
            api_key: "k".to_string(),
            contents: vec![chat::ChatMessage::user("hi")],
        };
        assert!(fetcher.send_chat(request, &ctx));

        match wait_for(&mut fetcher) {
            FetchResult::Chat { conversation_id, result } => {
                assert_eq!(conversation_id, "abc12345");
                assert!(result.unwrap_err().message.contains("(429)"));
            }
            _ => panic!("expected a chat reply"),
        }
    }

    /// Holds every request for a while before answering.
    struct SlowClient {
        delay: Duration,
    }

    impl HttpClient for SlowClient {
        fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
            thread::sleep(self.delay);
            Ok(HttpResponse::new(
                200,
                r#"{"title": "Orion", "date": "2025-01-01", "media_type": "image", "url": "https://apod.nasa.gov/o.jpg", "explanation": "x"}"#,
            ))
        }

        fn post_json(&self, url: &str, _body: &serde_json::Value) -> Result<HttpResponse, FetchError> {
            self.get(url)
        }
    }

    #[test]
    fn test_store_is_free_while_apod_request_runs() {
        let boxed: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let store: SharedStore = Arc::new(Mutex::new(boxed));
        let client = SlowClient {
            delay: Duration::from_millis(800),
        };
        let mut fetcher = WidgetFetcher::new(Arc::new(client), Arc::clone(&store));
        let ctx = egui::Context::default();
        assert!(fetcher.fetch_apod("k".to_string(), &ctx));

        // Let the worker get past the cache check and into the request
        thread::sleep(Duration::from_millis(100));
        let started = Instant::now();
        lock(&store).set("chat-key", "typed".to_string()).unwrap();
        assert!(started.elapsed() < Duration::from_millis(300));
        assert!(fetcher.is_loading(WidgetKind::Apod));

        match wait_for(&mut fetcher) {
            FetchResult::Apod(Ok(card)) => assert_eq!(card.apod.title, "Orion"),
            _ => panic!("expected a picture"),
        }
        let cache = DailyCache::today(apod::CACHE_PREFIX);
        assert!(lock(&store).get(&cache.entry_key()).is_some());
        assert_eq!(lock(&store).get("chat-key").as_deref(), Some("typed"));
    }

    #[test]
    fn test_check_completion_when_idle() {
        let mut fetcher = fetcher(200, "{}");
        assert!(fetcher.check_completion().is_empty());
        assert!(!fetcher.any_loading());
    }
}
