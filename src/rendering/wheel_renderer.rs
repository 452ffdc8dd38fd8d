//! Spin wheel painting.
//!
//! Screen angles are degrees clockwise from 12 o'clock, the frame the wheel's
//! sector layout reports in, so the pointer sits at angle 0.

use eframe::egui;
use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Shape, Stroke};
use folio::theme::sector_color;
use folio::{SectorLayout, ThemeColors};

use crate::rendering::text_utils::fit_text;

/// Height of the pointer triangle above the rim
const POINTER_SIZE: f32 = 18.0;

/// Degrees per straight segment when approximating an arc
const ARC_STEP_DEG: f64 = 4.0;

/// Point at `degrees` clockwise from the top, `radius` away from `center`.
fn point_at(center: Pos2, radius: f32, degrees: f64) -> Pos2 {
    let rad = degrees.to_radians();
    center + vec2(radius * rad.sin() as f32, -radius * rad.cos() as f32)
}

/// Filled wedge from `start` spanning `width` degrees.
fn wedge(center: Pos2, radius: f32, start: f64, width: f64, fill: Color32, stroke: Stroke) -> Shape {
    let steps = (width / ARC_STEP_DEG).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        points.push(point_at(center, radius, start + width * step as f64 / steps as f64));
    }
    Shape::convex_polygon(points, fill, stroke)
}

/// Paints the wheel rotated by `rotation` degrees.
///
/// # Arguments
/// * `ui` - The egui UI to allocate in
/// * `layout` - Sectors to draw
/// * `rotation` - Current wheel rotation, unnormalized
/// * `highlighted` - Sector to outline (the last result)
/// * `colors` - Theme palette
/// * `diameter` - Wheel diameter in points
pub fn render_wheel(
    ui: &mut egui::Ui,
    layout: &SectorLayout,
    rotation: f64,
    highlighted: Option<usize>,
    colors: &ThemeColors,
    diameter: f32,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(vec2(diameter, diameter + POINTER_SIZE), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    let radius = diameter / 2.0 - 4.0;
    let center = pos2(rect.center().x, rect.top() + POINTER_SIZE + diameter / 2.0);
    let rim = Stroke::new(2.0, colors.border);

    if layout.is_empty() {
        painter.circle(center, radius, colors.card_background, rim);
        painter.text(center, Align2::CENTER_CENTER, "No items", FontId::proportional(16.0), colors.text_dim);
    } else if layout.len() == 1 {
        painter.circle(center, radius, sector_color(0), rim);
        let label = layout.label(0).unwrap_or_default();
        painter.text(center, Align2::CENTER_CENTER, label, FontId::proportional(16.0), colors.text);
    } else {
        let width = layout.sector_width();
        let font = FontId::proportional(14.0);
        // Roughly the chord at the label radius
        let label_width = (radius * 0.55).min(radius * (width.to_radians() as f32) * 0.6).max(30.0);

        for index in 0..layout.len() {
            let start = layout.screen_start(index, rotation);
            let stroke = if highlighted == Some(index) {
                Stroke::new(3.0, colors.accent)
            } else {
                Stroke::new(1.0, colors.card_background)
            };
            painter.add(wedge(center, radius, start, width, sector_color(index), stroke));

            let label = layout.label(index).unwrap_or_default();
            let text = fit_text(&painter, label, &font, label_width);
            let anchor = point_at(center, radius * 0.62, start + width / 2.0);
            painter.text(anchor, Align2::CENTER_CENTER, text, font.clone(), colors.text);
        }
        painter.circle_stroke(center, radius, rim);
    }

    // Hub
    painter.circle(center, radius * 0.08, colors.card_background, Stroke::new(2.0, colors.accent));

    // Pointer at 12 o'clock, tip into the rim
    let tip = pos2(center.x, center.y - radius + 8.0);
    let base_y = center.y - radius - POINTER_SIZE + 2.0;
    painter.add(Shape::convex_polygon(
        vec![pos2(center.x - 10.0, base_y), pos2(center.x + 10.0, base_y), tip],
        colors.accent,
        Stroke::new(1.0, colors.card_background),
    ));

    response
}
