//! Centralized application state for the portfolio showcase.
//!
//! Composes focused state components, one per section, each keeping its own
//! invariants behind intent-revealing methods.

use folio::{ContactForm, FolioConfig};

use crate::io::SharedStore;
use crate::state::{ChatPanelState, GalleryState, LayoutState, Section, ThemeState, WheelPanelState, WidgetsState};

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Focused State Components =====
    /// Theme and styling state
    pub theme: ThemeState,

    /// Active section
    pub layout: LayoutState,

    /// Image sliders, card grids, toy text carousel
    pub gallery: GalleryState,

    /// "What to eat" wheel
    pub wheel: WheelPanelState,

    /// Weather, news, quote, APOD, Pokémon
    pub widgets: WidgetsState,

    /// Food chat
    pub chat: ChatPanelState,

    /// Contact form fields
    pub contact: ContactForm,

    // ===== Top-Level State =====
    /// Loaded configuration
    pub config: FolioConfig,

    /// Persistent key-value store shared with the workers
    pub store: SharedStore,

    /// Transient message for the status bar
    pub status_message: Option<String>,

    /// Whether the initial widget fetches were issued
    pub widgets_requested: bool,
}

impl AppState {
    /// Creates the state for `config`, restoring UI preferences from storage.
    ///
    /// # Arguments
    /// * `config` - Portfolio configuration
    /// * `store` - Key-value store for caches and the remembered API key
    /// * `theme_name` - Theme restored from eframe storage
    /// * `section` - Section restored from eframe storage
    pub fn new(config: FolioConfig, store: SharedStore, theme_name: String, section: Section) -> Self {
        Self {
            theme: ThemeState::with_theme(theme_name),
            layout: LayoutState::new(section),
            gallery: GalleryState::new(&config.galleries, &config.card_grids, &config.toy_paragraphs),
            wheel: WheelPanelState::new(&config.wheel_items),
            widgets: WidgetsState::new(),
            chat: ChatPanelState::new(&config),
            contact: ContactForm::default(),
            config,
            store,
            status_message: None,
            widgets_requested: false,
        }
    }
}
