//! Home and gallery sections
//!
//! Home shows the hero tile and the toy text carousel. The gallery shows one
//! slider per configured gallery followed by the card grids.

use eframe::egui;
use egui::{vec2, RichText};
use folio::Direction;

use crate::app::AppState;
use crate::rendering::slide_renderer::{paint_image_tile, render_slide_track};

const SLIDE_HEIGHT: f32 = 260.0;
const CARD_SIZE: f32 = 150.0;

/// Renders the landing section
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
pub fn render_home(ui: &mut egui::Ui, state: &mut AppState) {
    let colors = state.theme.colors().clone();

    ui.heading(RichText::new("Welcome to my corner of the internet").color(colors.heading));
    ui.add_space(8.0);

    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(vec2(width, 220.0), egui::Sense::hover());
    paint_image_tile(&ui.painter_at(rect), rect, &state.config.hero_image, 0, &colors);

    ui.add_space(16.0);
    ui.label(RichText::new("Toy design").strong().size(16.0).color(colors.heading));

    let gallery = &mut state.gallery;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        match gallery.toy_paragraph() {
            Some(text) => {
                ui.label(text);
                ui.horizontal(|ui| {
                    if ui.button("◀").clicked() {
                        gallery.prev_toy_paragraph();
                    }
                    ui.label(gallery.toy_pager().position_label());
                    if ui.button("▶").clicked() {
                        gallery.next_toy_paragraph();
                    }
                });
            }
            None => {
                ui.label(RichText::new("Nothing here yet").color(colors.text_dim));
            }
        }
    });
}

/// Renders every slider and card grid
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
pub fn render_gallery(ui: &mut egui::Ui, state: &mut AppState) {
    let colors = state.theme.colors().clone();

    for index in 0..state.gallery.sliders().len() {
        let Some(slider) = state.gallery.slider_mut(index) else {
            continue;
        };

        ui.label(RichText::new(slider.title()).strong().size(16.0).color(colors.heading));

        let viewport = render_slide_track(ui, slider.carousel(), SLIDE_HEIGHT, &colors);
        if slider.on_resize(viewport.width()) {
            log::trace!("slider {} refreshed for width {}", index, viewport.width());
        }

        let view = *slider.view();
        ui.horizontal(|ui| {
            if ui.add_enabled(!view.prev_disabled, egui::Button::new("◀ Prev")).clicked() {
                slider.advance(Direction::Prev);
            }
            let count = slider.carousel().count();
            let position = if count == 0 {
                "0 / 0".to_string()
            } else {
                format!("{} / {}", view.index + 1, count)
            };
            ui.label(position);
            if ui.add_enabled(!view.next_disabled, egui::Button::new("Next ▶")).clicked() {
                slider.advance(Direction::Next);
            }
        });
        ui.add_space(16.0);
    }

    for grid in state.gallery.card_grids() {
        ui.label(RichText::new(&grid.title).strong().size(16.0).color(colors.heading));
        ui.horizontal_wrapped(|ui| {
            for (index, image) in grid.images.iter().enumerate() {
                let (rect, _) = ui.allocate_exact_size(vec2(CARD_SIZE, CARD_SIZE), egui::Sense::hover());
                paint_image_tile(&ui.painter_at(rect), rect, image, index + 1, &colors);
            }
        });
        ui.add_space(16.0);
    }
}
