use anyhow::Result;
use chrono::NaiveDate;
use folio::widgets::chat::{generate, ChatSession, Role, API_KEY_STORE_KEY};
use folio::widgets::{apod, pokemon, quote};
use folio::{
    plan_spin, Carousel, ContactForm, DailyCache, Direction, FetchError, FolioConfig, HttpClient, HttpResponse,
    JsonFileStore, KeyValueStore, MemoryStore, SectorLayout, WheelSpinResolver,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::fs;
use std::sync::Mutex;

/// Answers every request with the same response and counts the calls.
struct FixedClient {
    status: u16,
    body: String,
    calls: Mutex<Vec<String>>,
}

impl FixedClient {
    fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl HttpClient for FixedClient {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        Ok(HttpResponse::new(self.status, self.body.clone()))
    }

    fn post_json(&self, url: &str, _body: &serde_json::Value) -> Result<HttpResponse, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        Ok(HttpResponse::new(self.status, self.body.clone()))
    }
}

#[test]
fn test_carousel_walks_and_clamps() -> Result<()> {
    let mut carousel = Carousel::new(vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()]);

    let view = carousel.refresh();
    assert_eq!(view.index, 0);
    assert!(view.prev_disabled);
    assert!(!view.next_disabled);

    carousel.advance(Direction::Next);
    let view = carousel.advance(Direction::Next);
    assert_eq!(view.index, 2);
    assert_eq!(view.offset_percent, Some(-200.0));
    assert!(view.next_disabled);

    // Past the end stays put
    let view = carousel.advance(Direction::Next);
    assert_eq!(view.index, 2);

    // Shrinking the collection clamps the index
    let view = carousel.remount(vec!["a.jpg".into()]);
    assert_eq!(view.index, 0);
    assert!(view.prev_disabled && view.next_disabled);

    let view = carousel.remount(Vec::new());
    assert_eq!(view.offset_percent, None);
    assert!(view.prev_disabled && view.next_disabled);
    Ok(())
}

#[test]
fn test_wheel_stop_lands_on_planned_sector() -> Result<()> {
    let layout = SectorLayout::new(["Ramen", "Sushi", "Curry", "Tacos", "Salad"]);

    let plan = plan_spin(&layout, 2, 0.0);
    assert!((plan.final_angle - 2430.0).abs() < 1e-9);
    assert_eq!(layout.sector_under_pointer(plan.final_angle), Some(2));

    let mut resolver = WheelSpinResolver::new(layout);
    let mut rng = StdRng::seed_from_u64(11);
    assert!(resolver.start(0.0));
    let pending = resolver.stop(1.25, &mut rng).expect("spinning wheel stops");
    assert!(pending.plan.final_angle > pending.plan.start_angle);

    // Nothing is reported before the settle ends
    assert_eq!(resolver.poll(1.5), None);
    let label = resolver.poll(60.0).expect("settle finished");
    assert_eq!(Some(label.as_str()), resolver.layout().label(pending.plan.index));
    assert_eq!(resolver.layout().sector_under_pointer(resolver.resting_angle()), Some(pending.plan.index));

    // Completion fires once
    assert_eq!(resolver.poll(61.0), None);
    Ok(())
}

#[test]
fn test_apod_daily_cache_survives_reopen() -> Result<()> {
    let path = env::temp_dir().join("folio_integration_apod.json");
    let _ = fs::remove_file(&path);

    let body = r#"{
        "title": "Pillars of Creation",
        "date": "2025-06-01",
        "media_type": "image",
        "url": "https://apod.nasa.gov/pillars.jpg",
        "explanation": "Columns of cold gas."
    }"#;
    let cache = DailyCache::new("apod", NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"));

    {
        let client = FixedClient::new(200, body);
        let mut store = JsonFileStore::open(&path)?;
        let card = apod::load_apod(&client, &mut store, &cache, apod::DEMO_KEY).map_err(|e| anyhow::anyhow!(e.message))?;
        assert!(!card.from_cache);
        assert_eq!(client.call_count(), 1);
    }

    // A second process on the same day reads the file instead of the network
    let client = FixedClient::new(500, "should not be called");
    let mut store = JsonFileStore::open(&path)?;
    let card = apod::load_apod(&client, &mut store, &cache, apod::DEMO_KEY).map_err(|e| anyhow::anyhow!(e.message))?;
    assert!(card.from_cache);
    assert_eq!(card.apod.title, "Pillars of Creation");
    assert_eq!(client.call_count(), 0);

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_apod_rate_limit_is_remembered_for_the_day() -> Result<()> {
    let mut store = MemoryStore::new();
    let cache = DailyCache::new("apod", NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date"));
    let client = FixedClient::new(429, r#"{"error": {"message": "OVER_RATE_LIMIT"}}"#);

    let first = apod::load_apod(&client, &mut store, &cache, apod::DEMO_KEY).map_err(|e| anyhow::anyhow!(e.message))?;
    assert!(first.notice.is_some());
    let second = apod::load_apod(&client, &mut store, &cache, apod::DEMO_KEY).map_err(|e| anyhow::anyhow!(e.message))?;
    assert!(second.notice.is_some());
    assert_eq!(client.call_count(), 1);
    Ok(())
}

#[test]
fn test_config_file_with_overrides() -> Result<()> {
    let path = env::temp_dir().join("folio_integration_config.json");
    fs::write(
        &path,
        r#"{
            "wheel_items": ["Pho", "Bibimbap"],
            "contact": { "email": "me@example.com" }
        }"#,
    )?;

    let mut config = FolioConfig::load_from(&path)?;
    config.apply_overrides(|name| match name {
        "FOLIO_GEMINI_KEY" => Some("env-key".to_string()),
        "FOLIO_NASA_KEY" => Some("   ".to_string()),
        _ => None,
    });

    assert_eq!(config.wheel_items, vec!["Pho".to_string(), "Bibimbap".to_string()]);
    assert_eq!(config.contact.email, "me@example.com");
    assert_eq!(config.chat.api_key.as_deref(), Some("env-key"));
    assert_eq!(config.apod.api_key, None);
    assert!(!config.galleries.is_empty());

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_quote_and_pokemon_widgets() -> Result<()> {
    let client = FixedClient::new(200, r#"{"quote": "Stay hungry.", "author": "Someone"}"#);
    let fetched = quote::fetch_quote(&client).map_err(|e| anyhow::anyhow!(e.message))?;
    assert_eq!(fetched.author, "Someone");

    let client = FixedClient::new(404, "Not Found");
    let err = pokemon::fetch_pokemon(&client, "missingno").expect_err("unknown pokemon");
    assert!(err.message.starts_with("No such Pok"));

    let err = pokemon::fetch_pokemon(&client, "   ").expect_err("blank query");
    assert!(!err.message.is_empty());
    assert_eq!(client.call_count(), 1);
    Ok(())
}

#[test]
fn test_chat_exchange_with_remembered_key() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(3);
    let mut store = MemoryStore::new();
    let mut session = ChatSession::new(&mut rng, "gemini-2.5-flash", "");

    session.set_api_key("secret", &mut store);
    assert_eq!(store.get(API_KEY_STORE_KEY).as_deref(), Some("secret"));

    let request = session.begin_send(Some("Any good ramen nearby?")).expect("request");
    assert!(session.is_loading());
    assert!(session.begin_send(Some("again")).is_none());

    let client = FixedClient::new(200, r#"{"candidates": [{"content": {"parts": [{"text": "Try the shop on 5th."}]}}]}"#);
    let reply = generate(&client, &request);
    session.finish(&request.conversation_id, reply);

    assert!(!session.is_loading());
    let last = session.history().last().expect("reply appended");
    assert_eq!(last.role, Role::Model);
    assert_eq!(last.text(), "Try the shop on 5th.");
    assert!(session.active().is_some_and(|c| c.title.starts_with("Any good ramen")));

    // A restart restores the remembered key
    let mut restored = ChatSession::new(&mut rng, "gemini-2.5-flash", "");
    restored.restore_api_key(&store);
    assert_eq!(restored.api_key(), "secret");
    Ok(())
}

#[test]
fn test_contact_compose_url() -> Result<()> {
    let form = ContactForm {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        message: "Love the wheel & the photos".to_string(),
    };
    let url = form.compose_url("owner@example.com")?;
    assert!(url.starts_with("https://mail.google.com/mail/?"));
    assert!(url.contains("view=cm"));
    assert!(url.contains("to=owner%40example.com"));
    assert!(url.contains("su=Website+contact+from+Ada"));
    assert!(!url.contains("wheel & the"));
    Ok(())
}
