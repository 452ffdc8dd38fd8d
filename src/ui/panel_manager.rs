//! Panel orchestration and layout management.
//!
//! Places the header, status bar and the active section, and lifts each
//! panel's interaction into one [`PanelInteraction`] for the coordinator.

use eframe::egui;

use crate::app::AppState;
use crate::io::{WidgetFetcher, WidgetKind};
use crate::state::Section;
use crate::ui::chat_panel::{self, ChatInteraction};
use crate::ui::contact_panel::{self, ContactInteraction};
use crate::ui::widgets_panel::{self, WidgetsInteraction};
use crate::ui::{gallery_panel, header, status_bar, wheel_panel};

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    /// Refetch every widget
    RefreshAllWidgets,
    /// Refetch one widget
    RefreshWidget(WidgetKind),
    /// Look up the Pokémon in the search box
    SearchPokemon,
    /// Look up a random Pokémon
    RandomPokemon,
    /// Forwarded chat interaction
    Chat(ChatInteraction),
    /// Open the contact mail draft
    SubmitContact,
    /// Re-read gallery content from the config file
    ReloadGalleries,
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        fetcher: &WidgetFetcher,
        store_label: &str,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            interaction = header::render_header(ui, state).map(|header_interaction| match header_interaction {
                header::HeaderInteraction::RefreshWidgetsRequested => PanelInteraction::RefreshAllWidgets,
                header::HeaderInteraction::ReloadGalleriesRequested => PanelInteraction::ReloadGalleries,
            });
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state, fetcher, store_label);
        });

        let frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(12))
            .fill(state.theme.colors().background);

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let section = state.layout.section();

            // The chat section manages its own scrolling
            if section == Section::Chat {
                if let Some(chat_interaction) = chat_panel::render_chat_panel(ui, state) {
                    interaction = Some(PanelInteraction::Chat(chat_interaction));
                }
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt(("section", section))
                .auto_shrink([false, false])
                .show(ui, |ui| match section {
                    Section::Home => gallery_panel::render_home(ui, state),
                    Section::Gallery => gallery_panel::render_gallery(ui, state),
                    Section::Wheel => wheel_panel::render_wheel_panel(ui, state),
                    Section::Widgets => {
                        if let Some(widgets_interaction) = widgets_panel::render_widgets_panel(ui, state, fetcher) {
                            interaction = Some(match widgets_interaction {
                                WidgetsInteraction::RefreshRequested(kind) => PanelInteraction::RefreshWidget(kind),
                                WidgetsInteraction::PokemonSearchRequested => PanelInteraction::SearchPokemon,
                                WidgetsInteraction::RandomPokemonRequested => PanelInteraction::RandomPokemon,
                            });
                        }
                    }
                    Section::Contact => {
                        if let Some(ContactInteraction::SubmitRequested) = contact_panel::render_contact_panel(ui, state) {
                            interaction = Some(PanelInteraction::SubmitContact);
                        }
                    }
                    Section::Chat => {}
                });
        });

        interaction
    }
}
