//! Status bar UI rendering
//!
//! Shows background activity, the storage location, and the last status message.

use eframe::egui;
use egui::RichText;

use crate::app::AppState;
use crate::io::{WidgetFetcher, WidgetKind};

const KINDS: [(WidgetKind, &str); 6] = [
    (WidgetKind::Weather, "weather"),
    (WidgetKind::News, "news"),
    (WidgetKind::Quote, "quote"),
    (WidgetKind::Apod, "APOD"),
    (WidgetKind::Pokemon, "Pokémon"),
    (WidgetKind::Chat, "chat"),
];

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
/// * `fetcher` - Background fetcher, for loading indicators
/// * `store_label` - Where persistent data lives
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState, fetcher: &WidgetFetcher, store_label: &str) {
    ui.horizontal(|ui| {
        if !fetcher.any_loading() {
            ui.label(RichText::new("Idle").strong());
        } else {
            let loading: Vec<&str> = KINDS
                .iter()
                .filter(|(kind, _)| fetcher.is_loading(*kind))
                .map(|(_, name)| *name)
                .collect();
            ui.spinner();
            ui.label(RichText::new(format!("Loading {}", loading.join(", "))).strong());
        }

        ui.label(RichText::new("|").strong());
        ui.label(RichText::new(format!("Storage: {store_label}")).color(state.theme.colors().text_dim));

        if let Some(message) = &state.status_message {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(message).strong());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(chrono::Local::now().format("%Y-%m-%d").to_string());
        });
    });
}
