//! Carousel track painting.
//!
//! All slides sit side by side on one track, each as wide as the viewport, and
//! the track is translated by the carousel's offset. Only the viewport is
//! visible; slides are drawn as captioned placeholder tiles.

use eframe::egui;
use egui::{pos2, vec2, Align2, FontId, Rect, Stroke};
use folio::theme::sector_color;
use folio::{Carousel, ThemeColors};

use crate::rendering::text_utils::{file_name, fit_text};

/// Draws one captioned tile for an image reference.
///
/// # Arguments
/// * `painter` - Painter clipped to the visible area
/// * `rect` - Tile bounds
/// * `image` - Image path shown as caption
/// * `tint_index` - Picks the tile's fill from the pastel palette
/// * `colors` - Theme palette
pub fn paint_image_tile(painter: &egui::Painter, rect: Rect, image: &str, tint_index: usize, colors: &ThemeColors) {
    painter.rect_filled(rect, 6.0, sector_color(tint_index));
    painter.text(
        rect.center() - vec2(0.0, 12.0),
        Align2::CENTER_CENTER,
        "🖼",
        FontId::proportional((rect.height() * 0.25).clamp(16.0, 48.0)),
        colors.text_dim,
    );

    let font = FontId::proportional(13.0);
    let caption = fit_text(painter, file_name(image), &font, rect.width() - 12.0);
    painter.text(
        pos2(rect.center().x, rect.bottom() - 14.0),
        Align2::CENTER_CENTER,
        caption,
        font,
        colors.text,
    );
}

/// Paints the carousel viewport with its track translated to the current slide.
///
/// Returns the viewport rectangle, whose width drives the resize refresh.
pub fn render_slide_track(ui: &mut egui::Ui, carousel: &Carousel, height: f32, colors: &ThemeColors) -> Rect {
    let width = ui.available_width().max(1.0);
    let (viewport, _) = ui.allocate_exact_size(vec2(width, height), egui::Sense::hover());
    let painter = ui.painter_at(viewport);

    painter.rect_filled(viewport, 8.0, colors.card_background);
    painter.rect_stroke(viewport, 8.0, Stroke::new(1.0, colors.border), egui::StrokeKind::Inside);

    if carousel.count() == 0 {
        painter.text(
            viewport.center(),
            Align2::CENTER_CENTER,
            "No photos yet",
            FontId::proportional(15.0),
            colors.text_dim,
        );
        return viewport;
    }

    let offset = carousel.track_offset(width);
    for (index, slide) in carousel.slides().iter().enumerate() {
        let left = viewport.left() + index as f32 * width + offset;
        let slide_rect = Rect::from_min_size(pos2(left, viewport.top()), viewport.size()).shrink(6.0);
        if slide_rect.intersects(viewport) {
            paint_image_tile(&painter, slide_rect, slide, index, colors);
        }
    }

    viewport
}
