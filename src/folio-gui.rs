//! Folio desktop application
//!
//! A personal portfolio showcase built with egui:
//! - Photo sliders and card grids
//! - A "what to eat" spin wheel
//! - Weather, news, quote, astronomy picture and Pokémon widgets
//! - A food-recommendation chat
//! - A contact form that opens a mail draft
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `io/` - Background widget fetches
//! - `ui/` - UI panel rendering and interaction
//! - `rendering/` - Low-level painting of the wheel and slide tracks
//! - `state/` - Per-section state

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::{Arc, Mutex};

use anyhow::Context as _;
use eframe::egui;
use folio::{FolioConfig, HttpClient, JsonFileStore, KeyValueStore, MemoryStore, ReqwestClient};

mod app;
mod io;
mod rendering;
mod state;
mod ui;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator, ThemeCoordinator, REMEMBER_KEY_KEY, SECTION_KEY};
use io::{SharedStore, WidgetFetcher, WidgetKind};
use state::Section;
use ui::chat_panel::ChatInteraction;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Opens the on-disk store, or an in-memory one when no data directory is usable.
fn open_store() -> (SharedStore, String) {
    let opened = JsonFileStore::default_path().and_then(JsonFileStore::open);
    let (store, label): (Box<dyn KeyValueStore>, String) = match opened {
        Ok(store) => {
            let label = store.path().display().to_string();
            log::info!("using store at {}", label);
            (Box::new(store), label)
        }
        Err(e) => {
            log::warn!("{}; nothing will persist this session", e);
            (Box::new(MemoryStore::new()), "in memory".to_string())
        }
    };
    (Arc::new(Mutex::new(store)), label)
}

/// Main application entry point that initializes and launches the portfolio GUI.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = FolioConfig::load_or_default();
    let (store, store_label) = open_store();
    let client: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new().context("creating HTTP client")?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Folio"),
        ..Default::default()
    };

    eframe::run_native(
        "Folio",
        options,
        Box::new(move |cc| Ok(Box::new(FolioApp::new(cc, config, store, store_label, client)))),
    )
    .map_err(|e| anyhow::anyhow!("running the window: {e}"))
}

/// The main portfolio application.
///
/// Delegates most functionality to coordinators:
/// - `ApplicationCoordinator` handles fetches, chat and the contact hand-off
/// - `ThemeCoordinator` handles theme persistence and application
/// - `PanelManager` handles UI panel layout and rendering
struct FolioApp {
    /// Centralized application state
    state: AppState,
    /// Background widget fetcher
    fetcher: WidgetFetcher,
    /// Where persistent data lives, for the status bar
    store_label: String,
}

impl FolioApp {
    /// Creates the app with theme, section and key preference loaded from persistent storage.
    fn new(
        cc: &eframe::CreationContext,
        config: FolioConfig,
        store: SharedStore,
        store_label: String,
        client: Arc<dyn HttpClient>,
    ) -> Self {
        let theme_name = ThemeCoordinator::load_theme_from_storage(cc.storage);
        let section: Section = SettingsCoordinator::load_setting_or(cc.storage, SECTION_KEY, Section::Home);
        let remember: bool = SettingsCoordinator::load_setting_or(cc.storage, REMEMBER_KEY_KEY, true);

        let fetcher = WidgetFetcher::new(client, store.clone());
        let mut state = AppState::new(config, store, theme_name, section);
        ApplicationCoordinator::restore_chat_key(&mut state, remember);

        Self {
            state,
            fetcher,
            store_label,
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        let state = &mut self.state;
        let fetcher = &self.fetcher;
        match interaction {
            PanelInteraction::RefreshAllWidgets => {
                for kind in [
                    WidgetKind::Weather,
                    WidgetKind::News,
                    WidgetKind::Quote,
                    WidgetKind::Apod,
                    WidgetKind::Pokemon,
                ] {
                    ApplicationCoordinator::refresh_widget(state, fetcher, kind, ctx);
                }
            }
            PanelInteraction::RefreshWidget(kind) => {
                ApplicationCoordinator::refresh_widget(state, fetcher, kind, ctx);
            }
            PanelInteraction::SearchPokemon => ApplicationCoordinator::search_pokemon(state, fetcher, ctx),
            PanelInteraction::RandomPokemon => ApplicationCoordinator::random_pokemon(state, fetcher, ctx),
            PanelInteraction::SubmitContact => ApplicationCoordinator::submit_contact(state, ctx),
            PanelInteraction::ReloadGalleries => {
                ApplicationCoordinator::reload_gallery(state, FolioConfig::load_or_default());
            }
            PanelInteraction::Chat(chat) => match chat {
                ChatInteraction::Send(message) => ApplicationCoordinator::send_chat(state, fetcher, message, ctx),
                ChatInteraction::NewConversation(prefill) => state.chat.new_conversation(prefill.as_deref()),
                ChatInteraction::SwitchConversation(id) => {
                    state.chat.session_mut().switch_conversation(&id);
                }
                ChatInteraction::ModelSelected(model) => state.chat.session_mut().set_model(&model),
                ChatInteraction::ApplyKey => ApplicationCoordinator::apply_api_key(state),
                ChatInteraction::RememberToggled(remember) => ApplicationCoordinator::set_remember_key(state, remember),
            },
        }
    }
}

impl eframe::App for FolioApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, self.state.theme.current_theme_name());
        SettingsCoordinator::save_setting(storage, SECTION_KEY, &self.state.layout.section());
        SettingsCoordinator::save_setting(storage, REMEMBER_KEY_KEY, &self.state.chat.session().remember_key());
    }

    /// Main update loop:
    /// 1. Apply finished fetches
    /// 2. Apply theme
    /// 3. Issue the first widget fetches
    /// 4. Advance the wheel
    /// 5. Render all panels via PanelManager
    /// 6. Handle panel interactions
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_fetch_completion(&mut self.state, &mut self.fetcher);

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        ApplicationCoordinator::request_initial_widgets(&mut self.state, &self.fetcher, ctx);

        let now = ctx.input(|i| i.time);
        if let Some(label) = self.state.wheel.tick(now) {
            self.state.status_message = Some(format!("The wheel picked {label}"));
        }
        if self.state.wheel.resolver().is_animating() {
            ctx.request_repaint();
        }

        if let Some(interaction) =
            PanelManager::render_all_panels(ctx, &mut self.state, &self.fetcher, &self.store_label)
        {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
