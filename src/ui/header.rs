//! Header panel UI rendering
//!
//! Section navigation on the left, theme selector on the right.

use eframe::egui;
use egui::RichText;

use crate::app::AppState;
use crate::state::Section;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User clicked "Refresh widgets"
    RefreshWidgetsRequested,
    /// User clicked "Reload galleries"
    ReloadGalleriesRequested,
}

/// Renders the navigation bar
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;
    let accent = state.theme.colors().heading;

    ui.horizontal(|ui| {
        ui.label(RichText::new("folio").strong().size(18.0).color(accent));
        ui.separator();

        for section in Section::ALL {
            let selected = state.layout.section() == section;
            if ui.selectable_label(selected, section.title()).clicked() {
                state.layout.show(section);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut picked: Option<String> = None;
            let active = state.theme.current_theme_name().to_string();
            egui::ComboBox::from_id_salt("theme_picker")
                .selected_text(active.as_str())
                .show_ui(ui, |ui| {
                    for name in state.theme.theme_manager().list_themes() {
                        if ui.selectable_label(name == active, name).clicked() && name != active {
                            picked = Some(name.to_string());
                        }
                    }
                });
            if let Some(name) = picked {
                log::debug!("theme switched to {}", name);
                state.theme.set_theme(name);
            }

            ui.label("🎨");
            ui.separator();

            if ui.button("⟳ Refresh widgets").clicked() {
                interaction = Some(HeaderInteraction::RefreshWidgetsRequested);
            }
            if ui
                .button("🖼 Reload galleries")
                .on_hover_text("Re-read galleries from the config file")
                .clicked()
            {
                interaction = Some(HeaderInteraction::ReloadGalleriesRequested);
            }
        });
    });

    interaction
}
