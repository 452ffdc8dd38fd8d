//! Food-recommendation chat over the Gemini `generateContent` API.
//!
//! A [`ChatSession`] holds every conversation of the chat panel. Sending is split
//! in two so the network call can run off the UI thread:
//! [`ChatSession::begin_send`] records the user's message and returns a
//! [`PendingRequest`]; [`generate`] performs the call; [`ChatSession::finish`]
//! applies the reply (or error) to the conversation that asked.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::WidgetError;
use crate::http::{build_url, FetchError, HttpClient};
use crate::storage::KeyValueStore;

pub const GENERATE_URL_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Selectable models with their menu labels.
pub const MODELS: [(&str, &str); 2] = [
    ("gemini-2.5-flash", "gemini-2.5-flash (fast)"),
    ("gemini-2.5-pro", "gemini-2.5-pro (advanced)"),
];

/// Store key of the remembered API key.
pub const API_KEY_STORE_KEY: &str = "gemini_api_key";

pub const DEFAULT_TITLE: &str = "New food chat";

const FIRST_GREETING: &str = "Hi~👋, can't decide what to eat again today?";
const NEW_CHAT_GREETING: &str = "👋 Let's start a new food journey!";
const NO_CONTENT: &str = "[No content]";
const TITLE_MAX_CHARS: usize = 25;

/// One-click prompts under the composer.
pub const SUGGESTIONS: [&str; 5] = [
    "Any good dessert places in Taipei?",
    "What should I have for lunch today?",
    "Recommend a tasty brunch spot",
    "Affordable restaurants that are actually good",
    "What food trends are popular lately?",
];

/// Healthy dishes bar: (icon, dish). Clicking asks for the dish's recipe.
pub const HEALTHY_DISHES: [(&str, &str); 6] = [
    ("🍅🍳", "Tomato egg noodles"),
    ("🥬🥚", "Vegetable omelette"),
    ("🍲", "Pork, cabbage and tofu soup"),
    ("🍤🍗", "Shrimp and chicken cutlet"),
    ("🥗", "Chicken breast salad"),
    ("🥘🍱", "Low-fat dishes"),
];

/// Prompt sent by a healthy-dish button.
pub fn recipe_prompt(dish: &str) -> String {
    format!("{dish} recipe")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// One turn, in the API's `contents` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// All parts joined by newlines.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub history: Vec<ChatMessage>,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

impl Conversation {
    fn new(id: String, greeting: &str) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            history: vec![ChatMessage::model(greeting)],
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Random 8-character base-36 id.
pub fn new_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..8)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Derives a sidebar title from the first user message.
///
/// Greetings and markdown punctuation are dropped, whitespace is collapsed and
/// the result is cut to 25 characters.
pub fn auto_title(history: &[ChatMessage]) -> String {
    let Some(first) = history.iter().find(|m| m.role == Role::User) else {
        return DEFAULT_TITLE.to_string();
    };

    let joined = first.parts.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join(" ");
    let without_wave = joined.replace('👋', "");

    let mut cleaned = String::with_capacity(without_wave.len());
    let mut chars = without_wave.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '嗨' => {
                while chars.peek() == Some(&'嗨') {
                    chars.next();
                }
                if matches!(chars.peek(), Some('～' | '!' | '！')) {
                    chars.next();
                }
            }
            '#' | '*' | '_' | '-' | '~' | '\'' | '>' => cleaned.push(' '),
            other => cleaned.push(other),
        }
    }

    let text = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return DEFAULT_TITLE.to_string();
    }

    let short: String = text.chars().take(TITLE_MAX_CHARS).collect();
    if text.chars().count() > TITLE_MAX_CHARS {
        format!("{short}…")
    } else {
        short
    }
}

/// Everything the worker needs to make one `generateContent` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub conversation_id: String,
    pub model: String,
    pub api_key: String,
    pub contents: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Maps a failed call to the message shown under the chat.
pub fn error_message(err: &FetchError) -> String {
    match err.status() {
        Some(401) => "Authentication failed (401): check that the API key is correct and not expired.".to_string(),
        Some(403) => "Access denied (403): this key may not have permission.".to_string(),
        Some(404) => "Model not found (404): check that the model ID is valid.".to_string(),
        Some(429) => "Rate limit reached (429): try again later or send fewer requests.".to_string(),
        Some(500..=599) => "Temporary server problem (5xx): please retry shortly.".to_string(),
        _ => match err {
            FetchError::Status { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| err.to_string()),
            other => other.to_string(),
        },
    }
}

/// Calls `generateContent` and returns the reply text.
pub fn generate(client: &dyn HttpClient, request: &PendingRequest) -> Result<String, WidgetError> {
    let endpoint = format!("{}/{}:generateContent", GENERATE_URL_BASE, request.model);
    let url = build_url(&endpoint, &[("key", request.api_key.as_str())])
        .map_err(|e| WidgetError::new(error_message(&e)))?;
    let body = serde_json::json!({ "contents": request.contents });

    let response = client
        .post_json(&url, &body)
        .and_then(|r| r.error_for_status())
        .map_err(|e| WidgetError::new(error_message(&e)))?;
    let parsed: GenerateResponse = response.json().map_err(|e| WidgetError::new(error_message(&e)))?;

    let reply = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_CONTENT.to_string());
    Ok(reply)
}

/// All conversations of the chat panel plus composer state.
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Newest first
    conversations: Vec<Conversation>,
    active_id: String,
    pub input: String,
    model: String,
    api_key: String,
    remember_key: bool,
    loading: bool,
    error: Option<String>,
}

impl ChatSession {
    /// Creates a session with one greeting conversation and `starter` in the composer.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, model: &str, starter: &str) -> Self {
        let first = Conversation::new(new_id(rng), FIRST_GREETING);
        Self {
            active_id: first.id.clone(),
            conversations: vec![first],
            input: starter.to_string(),
            model: model.to_string(),
            api_key: String::new(),
            remember_key: true,
            loading: false,
            error: None,
        }
    }

    // ===== Queries =====

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == self.active_id)
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn history(&self) -> &[ChatMessage] {
        self.active().map(|c| c.history.as_slice()).unwrap_or(&[])
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn remember_key(&self) -> bool {
        self.remember_key
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the send button is enabled.
    pub fn can_send(&self) -> bool {
        !self.loading && !self.input.trim().is_empty() && !self.api_key.is_empty()
    }

    // ===== Settings =====

    pub fn set_model(&mut self, model: &str) {
        self.model = model.to_string();
    }

    /// Loads a remembered key, if any.
    pub fn restore_api_key(&mut self, store: &dyn KeyValueStore) {
        if let Some(saved) = store.get(API_KEY_STORE_KEY).filter(|k| !k.is_empty()) {
            self.api_key = saved;
        }
    }

    /// Uses `key` for this session only, leaving the store untouched.
    pub fn use_session_key(&mut self, key: &str) {
        self.api_key = key.to_string();
    }

    /// Sets the key, persisting it when "remember" is on.
    pub fn set_api_key(&mut self, key: &str, store: &mut dyn KeyValueStore) {
        self.api_key = key.to_string();
        if self.remember_key {
            if let Err(e) = store.set(API_KEY_STORE_KEY, self.api_key.clone()) {
                log::warn!("chat: could not remember API key: {}", e);
            }
        }
    }

    /// Turning "remember" off forgets the stored key; turning it on stores the current one.
    pub fn set_remember_key(&mut self, remember: bool, store: &mut dyn KeyValueStore) {
        self.remember_key = remember;
        let result = if !remember {
            store.remove(API_KEY_STORE_KEY)
        } else if !self.api_key.is_empty() {
            store.set(API_KEY_STORE_KEY, self.api_key.clone())
        } else {
            Ok(())
        };
        if let Err(e) = result {
            log::warn!("chat: could not update remembered key: {}", e);
        }
    }

    // ===== Conversations =====

    /// Starts a fresh conversation at the top of the list and switches to it.
    pub fn start_new_conversation<R: Rng + ?Sized>(&mut self, rng: &mut R, prefill: Option<&str>) {
        let conversation = Conversation::new(new_id(rng), NEW_CHAT_GREETING);
        self.active_id = conversation.id.clone();
        self.conversations.insert(0, conversation);
        self.input = prefill.unwrap_or_default().to_string();
        self.error = None;
    }

    /// Switches to an existing conversation. Unknown ids are ignored.
    pub fn switch_conversation(&mut self, id: &str) -> bool {
        if !self.conversations.iter().any(|c| c.id == id) {
            return false;
        }
        self.active_id = id.to_string();
        self.input.clear();
        self.error = None;
        true
    }

    // ===== Sending =====

    /// Records a user message and returns the request to run.
    ///
    /// `message` overrides the composer text (suggestion buttons). Returns `None`
    /// for blank input, while a request is in flight, or without an API key (the
    /// last one also sets an error).
    pub fn begin_send(&mut self, message: Option<&str>) -> Option<PendingRequest> {
        let content = message.unwrap_or(&self.input).trim().to_string();
        if content.is_empty() || self.loading {
            return None;
        }
        if self.api_key.is_empty() {
            self.error = Some("Please enter a valid Gemini API key first".to_string());
            return None;
        }

        let active_id = self.active_id.clone();
        let conversation = self.conversations.iter_mut().find(|c| c.id == active_id)?;
        conversation.history.push(ChatMessage::user(content));

        self.error = None;
        self.loading = true;
        self.input.clear();

        Some(PendingRequest {
            conversation_id: active_id,
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            contents: conversation.history.clone(),
        })
    }

    /// Applies the outcome of a request started by [`ChatSession::begin_send`].
    pub fn finish(&mut self, conversation_id: &str, result: Result<String, WidgetError>) {
        self.loading = false;
        match result {
            Ok(reply) => {
                if let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == conversation_id) {
                    conversation.history.push(ChatMessage::model(reply));
                    conversation.title = auto_title(&conversation.history);
                } else {
                    log::warn!("chat: reply for unknown conversation {}", conversation_id);
                }
            }
            Err(e) => self.error = Some(e.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockClient;
    use crate::http::HttpResponse;
    use crate::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> ChatSession {
        let mut rng = StdRng::seed_from_u64(1);
        ChatSession::new(&mut rng, DEFAULT_MODEL, "Lunch ideas?")
    }

    #[test]
    fn test_new_id_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let id = new_id(&mut rng);
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_auto_title() {
        assert_eq!(auto_title(&[]), DEFAULT_TITLE);
        assert_eq!(auto_title(&[ChatMessage::model("hello")]), DEFAULT_TITLE);
        assert_eq!(
            auto_title(&[ChatMessage::user("嗨嗨！👋 ## *best* ramen   near_campus")]),
            "best ramen near campus"
        );
        assert_eq!(auto_title(&[ChatMessage::user("👋 --- ")]), DEFAULT_TITLE);
        assert_eq!(
            auto_title(&[ChatMessage::user("Where can I find really good beef noodle soup tonight?")]),
            "Where can I find really g…"
        );
    }

    #[test]
    fn test_error_messages() {
        let status = |s| FetchError::Status { status: s, body: String::new() };
        assert!(error_message(&status(401)).contains("(401)"));
        assert!(error_message(&status(429)).contains("(429)"));
        assert!(error_message(&status(503)).contains("5xx"));
        let bad = FetchError::Status {
            status: 400,
            body: r#"{"error": {"message": "API key not valid."}}"#.to_string(),
        };
        assert_eq!(error_message(&bad), "API key not valid.");
        assert_eq!(error_message(&FetchError::Transport("dns".to_string())), "request failed: dns");
    }

    #[test]
    fn test_send_requires_key_and_content() {
        let mut chat = session();
        assert!(!chat.can_send());
        assert!(chat.begin_send(None).is_none());
        assert_eq!(chat.error(), Some("Please enter a valid Gemini API key first"));

        let mut store = MemoryStore::new();
        chat.set_api_key("k", &mut store);
        chat.input = "   ".to_string();
        assert!(chat.begin_send(None).is_none());
    }

    #[test]
    fn test_full_exchange_updates_title() {
        let mut chat = session();
        let mut store = MemoryStore::new();
        chat.set_api_key("secret", &mut store);

        let request = chat.begin_send(None).expect("request");
        assert!(chat.is_loading());
        assert!(chat.input.is_empty());
        assert_eq!(request.contents.len(), 2);
        assert!(chat.begin_send(Some("again")).is_none(), "no second send while loading");

        let client = MockClient::ok(
            200,
            r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "Try "}, {"text": "ramen."}]}}]}"#,
        );
        let reply = generate(&client, &request);
        assert!(client.last_url().contains("gemini-2.5-flash:generateContent?key=secret"));
        assert_eq!(client.bodies.lock().unwrap()[0]["contents"][1]["role"], "user");

        chat.finish(&request.conversation_id, reply);
        assert!(!chat.is_loading());
        assert_eq!(chat.history().last().unwrap().text(), "Try ramen.");
        assert_eq!(chat.active().unwrap().title, "Lunch ideas?");
    }

    #[test]
    fn test_empty_candidates_is_no_content() {
        let client = MockClient::with(vec![Ok(HttpResponse::new(200, r#"{"candidates": []}"#))]);
        let request = PendingRequest {
            conversation_id: "x".to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: "k".to_string(),
            contents: vec![ChatMessage::user("hi")],
        };
        assert_eq!(generate(&client, &request).unwrap(), NO_CONTENT);
    }

    #[test]
    fn test_failed_send_sets_error() {
        let mut chat = session();
        let mut store = MemoryStore::new();
        chat.set_api_key("k", &mut store);
        let request = chat.begin_send(Some("suggested question")).unwrap();
        chat.finish(&request.conversation_id, Err(WidgetError::new("Access denied")));
        assert_eq!(chat.error(), Some("Access denied"));
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_conversations_switching() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut chat = session();
        let first = chat.active_id().to_string();

        chat.start_new_conversation(&mut rng, Some("prefill"));
        assert_eq!(chat.conversations().len(), 2);
        assert_ne!(chat.active_id(), first);
        assert_eq!(chat.conversations()[0].id, chat.active_id());
        assert_eq!(chat.input, "prefill");

        assert!(chat.switch_conversation(&first));
        assert!(chat.input.is_empty());
        assert!(!chat.switch_conversation("missing"));
        assert_eq!(chat.active_id(), first);
    }

    #[test]
    fn test_remembered_key_lifecycle() {
        let mut store = MemoryStore::new();
        let mut chat = session();
        chat.set_api_key("abc", &mut store);
        assert_eq!(store.get(API_KEY_STORE_KEY).as_deref(), Some("abc"));

        chat.set_remember_key(false, &mut store);
        assert_eq!(store.get(API_KEY_STORE_KEY), None);
        chat.set_api_key("xyz", &mut store);
        assert_eq!(store.get(API_KEY_STORE_KEY), None);

        chat.set_remember_key(true, &mut store);
        let mut restored = session();
        restored.restore_api_key(&store);
        assert_eq!(restored.api_key(), "xyz");
    }
}
