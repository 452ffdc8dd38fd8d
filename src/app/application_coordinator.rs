//! Application-level coordination and workflow management.
//!
//! Connects panel interactions to the background fetcher and the key-value
//! store, and applies finished fetches to the application state.

use eframe::egui;
use folio::widgets::{apod, pokemon};
use folio::{FolioConfig, WidgetError};

use crate::app::AppState;
use crate::io::fetcher::lock;
use crate::io::{FetchResult, WidgetFetcher, WidgetKind};

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Issuing widget fetches and applying their results
/// - Chat sends and API key persistence
/// - The contact form hand-off to the browser
/// - Reloading gallery content from the config file
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Restores the chat API key: the remembered one, else the configured one.
    ///
    /// # Arguments
    /// * `state` - Application state
    /// * `remember` - Saved "remember my key" preference
    pub fn restore_chat_key(state: &mut AppState, remember: bool) {
        let store = state.store.clone();
        let mut store = lock(&store);
        let session = state.chat.session_mut();

        session.set_remember_key(remember, &mut **store);
        if remember {
            session.restore_api_key(&**store);
        }
        if session.api_key().is_empty() {
            if let Some(key) = state.config.chat.api_key.as_deref() {
                session.use_session_key(key);
            }
        }
        state.chat.sync_key_draft();
    }

    /// Issues the first fetch of every widget. Runs once.
    pub fn request_initial_widgets(state: &mut AppState, fetcher: &WidgetFetcher, ctx: &egui::Context) {
        if state.widgets_requested {
            return;
        }
        state.widgets_requested = true;

        for kind in [
            WidgetKind::Weather,
            WidgetKind::News,
            WidgetKind::Quote,
            WidgetKind::Apod,
            WidgetKind::Pokemon,
        ] {
            Self::refresh_widget(state, fetcher, kind, ctx);
        }
    }

    /// Refetches one widget. Ignored while that widget is already loading.
    pub fn refresh_widget(state: &AppState, fetcher: &WidgetFetcher, kind: WidgetKind, ctx: &egui::Context) {
        let config = &state.config;
        match kind {
            WidgetKind::Weather => fetcher.fetch_weather(config.weather.clone(), ctx),
            WidgetKind::News => fetcher.fetch_news(config.news.clone(), ctx),
            WidgetKind::Quote => fetcher.fetch_quote(ctx),
            WidgetKind::Apod => {
                let key = apod::resolve_api_key(None, config.apod.api_key.as_deref());
                fetcher.fetch_apod(key.to_string(), ctx)
            }
            WidgetKind::Pokemon => fetcher.fetch_pokemon(state.widgets.pokemon_query.clone(), ctx),
            WidgetKind::Chat => false,
        };
    }

    /// Looks up the Pokémon typed in the search box.
    pub fn search_pokemon(state: &AppState, fetcher: &WidgetFetcher, ctx: &egui::Context) {
        Self::refresh_widget(state, fetcher, WidgetKind::Pokemon, ctx);
    }

    /// Looks up a uniformly random Pokémon.
    pub fn random_pokemon(state: &mut AppState, fetcher: &WidgetFetcher, ctx: &egui::Context) {
        if fetcher.is_loading(WidgetKind::Pokemon) {
            return;
        }
        let id = pokemon::random_id(&mut rand::thread_rng());
        state.widgets.pokemon_query = id.to_string();
        Self::search_pokemon(state, fetcher, ctx);
    }

    /// Applies every finished fetch to the state.
    ///
    /// Called once per frame in the update loop. Returns true if anything arrived.
    pub fn check_fetch_completion(state: &mut AppState, fetcher: &mut WidgetFetcher) -> bool {
        let results = fetcher.check_completion();
        let arrived = !results.is_empty();

        for result in results {
            log::debug!("{:?} fetch finished", result.kind());
            match result {
                FetchResult::Weather(r) => state.widgets.weather.apply(r),
                FetchResult::News(r) => state.widgets.news.apply(r),
                FetchResult::Quote(r) => state.widgets.apply_quote(r),
                FetchResult::Apod(r) => state.widgets.apply_apod(r),
                FetchResult::Pokemon(r) => state.widgets.apply_pokemon(r),
                FetchResult::Chat { conversation_id, result } => {
                    state.chat.session_mut().finish(&conversation_id, result);
                }
            }
        }
        arrived
    }

    /// Sends the composer text, or `message` when a suggestion was clicked.
    pub fn send_chat(state: &mut AppState, fetcher: &WidgetFetcher, message: Option<String>, ctx: &egui::Context) {
        let session = state.chat.session_mut();
        let Some(request) = session.begin_send(message.as_deref()) else {
            return;
        };

        let conversation_id = request.conversation_id.clone();
        if !fetcher.send_chat(request, ctx) {
            session.finish(&conversation_id, Err(WidgetError::new("A reply is still on its way, please wait")));
        }
    }

    /// Applies the key typed in the key field.
    pub fn apply_api_key(state: &mut AppState) {
        let key = state.chat.key_draft.trim().to_string();
        let store = state.store.clone();
        let mut store = lock(&store);
        state.chat.session_mut().set_api_key(&key, &mut **store);
        state.chat.sync_key_draft();
    }

    /// Toggles whether the chat key is remembered across sessions.
    pub fn set_remember_key(state: &mut AppState, remember: bool) {
        let store = state.store.clone();
        let mut store = lock(&store);
        state.chat.session_mut().set_remember_key(remember, &mut **store);
    }

    /// Applies the gallery content of a freshly loaded config without losing
    /// slider positions that still fit.
    pub fn reload_gallery(state: &mut AppState, config: FolioConfig) {
        state
            .gallery
            .reload(&config.galleries, &config.card_grids, &config.toy_paragraphs);
        state.status_message = Some(format!("Reloaded {} galleries", config.galleries.len()));
        state.config.galleries = config.galleries;
        state.config.card_grids = config.card_grids;
        state.config.toy_paragraphs = config.toy_paragraphs;
    }

    /// Opens a prefilled mail draft in the browser and clears the form.
    pub fn submit_contact(state: &mut AppState, ctx: &egui::Context) {
        match state.contact.compose_url(&state.config.contact.email) {
            Ok(url) => {
                ctx.open_url(egui::OpenUrl::new_tab(url));
                state.contact.clear();
                state.status_message = Some("Opened a mail draft in your browser".to_string());
            }
            Err(e) => {
                log::error!("contact: {}", e);
                state.status_message = Some(format!("Could not open a mail draft: {e}"));
            }
        }
    }
}
