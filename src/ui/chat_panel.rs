//! Food chat section
//!
//! Left: conversation list. Right: model and key settings, the message
//! history, suggestion buttons and the composer.

use eframe::egui;
use egui::{Align, Layout, RichText};
use folio::widgets::chat::{recipe_prompt, Role, HEALTHY_DISHES, MODELS, SUGGESTIONS};
use folio::ThemeColors;

use crate::app::AppState;

/// Result of user interaction with the chat section
pub enum ChatInteraction {
    /// Send the composer text, or the given prompt
    Send(Option<String>),
    /// Start a new conversation, optionally prefilled
    NewConversation(Option<String>),
    /// Conversation picked in the sidebar
    SwitchConversation(String),
    /// Model picked in the menu
    ModelSelected(String),
    /// Key field committed
    ApplyKey,
    /// "Remember my key" toggled
    RememberToggled(bool),
}

/// Renders the chat section
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<ChatInteraction>` - User interaction result
pub fn render_chat_panel(ui: &mut egui::Ui, state: &mut AppState) -> Option<ChatInteraction> {
    let mut interaction = None;
    let colors = state.theme.colors().clone();
    let sidebar_width = state.layout.chat_sidebar_width();

    ui.horizontal_top(|ui| {
        ui.allocate_ui_with_layout(
            egui::vec2(sidebar_width, ui.available_height()),
            Layout::top_down(Align::Min),
            |ui| {
                if let Some(action) = render_conversation_list(ui, state, &colors) {
                    interaction = Some(action);
                }
            },
        );
        ui.separator();
        ui.vertical(|ui| {
            if let Some(action) = render_settings(ui, state) {
                interaction = Some(action);
            }
            ui.separator();
            render_history(ui, state, &colors);
            if let Some(action) = render_composer(ui, state, &colors) {
                interaction = Some(action);
            }
        });
    });

    interaction
}

fn render_conversation_list(ui: &mut egui::Ui, state: &AppState, colors: &ThemeColors) -> Option<ChatInteraction> {
    let mut interaction = None;
    let session = state.chat.session();

    if ui.button("＋ New chat").clicked() {
        interaction = Some(ChatInteraction::NewConversation(None));
    }
    ui.add_space(4.0);

    for conversation in session.conversations() {
        let active = conversation.id == session.active_id();
        let text = RichText::new(&conversation.title).color(if active { colors.accent } else { colors.text });
        if ui.selectable_label(active, text).clicked() && !active {
            interaction = Some(ChatInteraction::SwitchConversation(conversation.id.clone()));
        }
    }

    interaction
}

fn render_settings(ui: &mut egui::Ui, state: &mut AppState) -> Option<ChatInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        let current = state.chat.session().model().to_string();
        let selected_text = MODELS
            .iter()
            .find(|(id, _)| *id == current)
            .map_or(current.as_str(), |(_, label)| *label);

        ui.label("Model:");
        egui::ComboBox::from_id_salt("chat_model")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for (id, label) in MODELS {
                    if ui.selectable_label(current == id, label).clicked() && current != id {
                        interaction = Some(ChatInteraction::ModelSelected(id.to_string()));
                    }
                }
            });
    });

    ui.horizontal(|ui| {
        ui.label("Gemini API key:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.chat.key_draft)
                .password(!state.chat.show_key)
                .hint_text("Paste your key")
                .desired_width(240.0),
        );
        if response.lost_focus() && state.chat.key_draft_changed() {
            interaction = Some(ChatInteraction::ApplyKey);
        }
        let eye = if state.chat.show_key { "🙈" } else { "👁" };
        if ui.small_button(eye).on_hover_text("Show or hide the key").clicked() {
            state.chat.show_key = !state.chat.show_key;
        }

        let mut remember = state.chat.session().remember_key();
        if ui.checkbox(&mut remember, "Remember my key").changed() {
            interaction = Some(ChatInteraction::RememberToggled(remember));
        }
    });

    interaction
}

fn render_history(ui: &mut egui::Ui, state: &AppState, colors: &ThemeColors) {
    let session = state.chat.session();
    let height = (ui.available_height() - 160.0).max(200.0);

    egui::ScrollArea::vertical()
        .id_salt("chat_history")
        .max_height(height)
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for message in session.history() {
                let (fill, align) = match message.role {
                    Role::User => (colors.user_bubble, Align::Max),
                    Role::Model => (colors.model_bubble, Align::Min),
                };
                ui.with_layout(Layout::top_down(align), |ui| {
                    egui::Frame::new()
                        .fill(fill)
                        .corner_radius(10.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.set_max_width(ui.available_width() * 0.75);
                            ui.label(RichText::new(message.text()).color(colors.text));
                        });
                });
                ui.add_space(4.0);
            }

            if session.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Thinking…").color(colors.text_dim));
                });
            }
        });

    if let Some(error) = session.error() {
        ui.label(RichText::new(error).color(colors.error));
    }
}

fn render_composer(ui: &mut egui::Ui, state: &mut AppState, colors: &ThemeColors) -> Option<ChatInteraction> {
    let mut interaction = None;
    let loading = state.chat.session().is_loading();

    ui.horizontal_wrapped(|ui| {
        for suggestion in SUGGESTIONS {
            if ui.add_enabled(!loading, egui::Button::new(suggestion).small()).clicked() {
                interaction = Some(ChatInteraction::Send(Some(suggestion.to_string())));
            }
        }
    });

    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new("Healthy picks:").color(colors.text_dim));
        for (icon, dish) in HEALTHY_DISHES {
            let button = egui::Button::new(format!("{icon} {dish}")).small();
            if ui.add_enabled(!loading, button).clicked() {
                interaction = Some(ChatInteraction::Send(Some(recipe_prompt(dish))));
            }
        }
    });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let can_send = state.chat.session().can_send();
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.chat.session_mut().input)
                .hint_text("Ask about food…")
                .desired_width(ui.available_width() - 70.0),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() || (entered && can_send) {
            interaction = Some(ChatInteraction::Send(None));
            response.request_focus();
        }
    });

    interaction
}
