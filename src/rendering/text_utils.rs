//! Text fitting helpers shared by the painters.

use eframe::egui;

/// Shortens `text` with a trailing ellipsis until it fits in `max_width`.
///
/// # Arguments
/// * `painter` - Painter used for measuring
/// * `text` - Text to fit
/// * `font_id` - Font the text will be drawn with
/// * `max_width` - Available width in points
pub fn fit_text(painter: &egui::Painter, text: &str, font_id: &egui::FontId, max_width: f32) -> String {
    let width_of = |s: String| painter.layout_no_wrap(s, font_id.clone(), egui::Color32::WHITE).size().x;

    if max_width <= 0.0 {
        return String::new();
    }
    if width_of(text.to_string()) <= max_width {
        return text.to_string();
    }

    // Binary search on the number of characters kept before the ellipsis
    let chars: Vec<char> = text.chars().collect();
    let (mut low, mut high) = (0usize, chars.len());
    while low < high {
        let mid = (low + high).div_ceil(2);
        let candidate: String = chars[..mid].iter().collect::<String>() + "…";
        if width_of(candidate) <= max_width {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    if low == 0 {
        return String::new();
    }
    chars[..low].iter().collect::<String>() + "…"
}

/// File name of an asset path, for captions.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
