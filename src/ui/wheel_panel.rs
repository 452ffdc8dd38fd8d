//! "What to eat" wheel section
//!
//! The wheel is drawn at the resolver's angle for the current frame time. Spin
//! completion is polled by the update loop so it fires even when this section
//! is not shown.

use eframe::egui;
use egui::RichText;

use crate::app::AppState;
use crate::rendering::wheel_renderer::render_wheel;

const WHEEL_DIAMETER: f32 = 360.0;

/// Renders the wheel, its start/stop button and the result history
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
pub fn render_wheel_panel(ui: &mut egui::Ui, state: &mut AppState) {
    let colors = state.theme.colors().clone();
    let now = ui.input(|i| i.time);

    ui.heading(RichText::new("Can't decide what to eat?").color(colors.heading));
    ui.label(RichText::new("Spin the wheel and let it pick.").color(colors.text_dim));
    ui.add_space(8.0);

    ui.vertical_centered(|ui| {
        let resolver = state.wheel.resolver();
        render_wheel(
            ui,
            resolver.layout(),
            resolver.angle_at(now),
            resolver.selected_index(),
            &colors,
            WHEEL_DIAMETER.min(ui.available_width()),
        );

        ui.add_space(8.0);
        let button = egui::Button::new(RichText::new(state.wheel.button_label()).size(18.0))
            .min_size(egui::vec2(120.0, 36.0));
        if ui.add(button).clicked() {
            state.wheel.toggle(now);
        }

        ui.add_space(8.0);
        match state.wheel.resolver().selected_label() {
            Some(label) => {
                ui.label(RichText::new(format!("Today's pick: {label}")).strong().size(20.0).color(colors.accent));
            }
            None if state.wheel.resolver().is_animating() => {
                ui.label(RichText::new("Spinning…").color(colors.text_dim));
            }
            None => {}
        }

        if !state.wheel.history().is_empty() {
            ui.add_space(8.0);
            ui.label(RichText::new(format!("Earlier: {}", state.wheel.history().join(" · "))).color(colors.text_dim));
        }
    });
}
