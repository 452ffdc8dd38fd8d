//! Contact section: a short form handed off to the browser as a mail draft.

use eframe::egui;
use egui::RichText;

use crate::app::AppState;

/// Result of user interaction with the contact form
pub enum ContactInteraction {
    /// "Send" was clicked
    SubmitRequested,
}

/// Renders the contact form
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<ContactInteraction>` - User interaction result
pub fn render_contact_panel(ui: &mut egui::Ui, state: &mut AppState) -> Option<ContactInteraction> {
    let mut interaction = None;
    let colors = state.theme.colors().clone();
    let form = &mut state.contact;

    ui.heading(RichText::new("Get in touch").color(colors.heading));
    ui.label(RichText::new("Sending opens a prefilled Gmail draft in your browser.").color(colors.text_dim));
    ui.add_space(8.0);

    egui::Grid::new("contact_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Name");
            ui.add(egui::TextEdit::singleline(&mut form.name).desired_width(320.0));
            ui.end_row();

            ui.label("Email");
            ui.add(egui::TextEdit::singleline(&mut form.email).desired_width(320.0));
            ui.end_row();

            ui.label("Message");
            ui.add(
                egui::TextEdit::multiline(&mut form.message)
                    .desired_rows(6)
                    .desired_width(320.0),
            );
            ui.end_row();
        });

    ui.add_space(8.0);
    let ready = !form.message.trim().is_empty();
    if ui
        .add_enabled(ready, egui::Button::new("✉ Send"))
        .on_disabled_hover_text("Write a message first")
        .clicked()
    {
        interaction = Some(ContactInteraction::SubmitRequested);
    }

    interaction
}
