//! Colour palettes for the portfolio showcase.
//!
//! Built-in themes are "Rose" (the site's own dusty-pink look, default),
//! "Dusk" (a dark variant of it) and "Sage".
//!
//! # Examples
//!
//! ```
//! use folio::theme::ThemeManager;
//!
//! let manager = ThemeManager::new();
//! let rose = manager.get_theme("Rose").unwrap();
//! println!("Rose accent: {:?}", rose.colors.accent);
//! ```

use egui::Color32;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_THEME: &str = "Rose";

/// Fill colours of the wheel sectors, cycled when there are more sectors than colours.
pub static WHEEL_SECTOR_COLORS: Lazy<Vec<Color32>> = Lazy::new(|| {
    ["#f5dfe0", "#ebb7b5", "#f0d5e3", "#e6acc7", "#e3c1e6"]
        .iter()
        .map(|hex| hex_to_color32(hex))
        .collect()
});

/// Colour of sector `index`.
pub fn sector_color(index: usize) -> Color32 {
    WHEEL_SECTOR_COLORS[index % WHEEL_SECTOR_COLORS.len()]
}

/// Complete color palette for a theme
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Background colors
    pub background: Color32,
    pub panel_background: Color32,
    pub card_background: Color32,

    // Foreground colors
    pub text: Color32,
    pub text_dim: Color32,
    pub heading: Color32,

    // Interactive colors
    pub accent: Color32,
    pub hover: Color32,
    pub border: Color32,

    // Status
    pub error: Color32,
    pub warning: Color32,
    pub success: Color32,

    // Chat bubbles
    pub user_bubble: Color32,
    pub model_bubble: Color32,
}

/// A complete theme definition with metadata and color palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub dark: bool,
    pub colors: ThemeColors,
}

/// Centralized theme manager providing access to all available themes
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    current_theme_name: String,
}

impl ThemeManager {
    /// Creates a new ThemeManager initialized with all built-in themes
    pub fn new() -> Self {
        let mut themes = HashMap::new();
        for theme in [rose_theme(), dusk_theme(), sage_theme()] {
            themes.insert(theme.name.clone(), theme);
        }

        Self {
            themes,
            current_theme_name: DEFAULT_THEME.to_string(),
        }
    }

    /// Retrieves a theme by name
    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Returns a list of all available theme names
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme_name
    }

    /// Gets the currently selected theme
    pub fn current_theme(&self) -> &Theme {
        self.themes
            .get(&self.current_theme_name)
            .or_else(|| self.themes.get(DEFAULT_THEME))
            .unwrap_or_else(|| unreachable!("built-in themes are always registered"))
    }

    /// Sets the current theme by name
    pub fn set_current_theme(&mut self, name: &str) -> Result<(), String> {
        if self.themes.contains_key(name) {
            self.current_theme_name = name.to_string();
            Ok(())
        } else {
            Err(format!("Theme '{}' not found", name))
        }
    }

    /// Builds egui visuals for a theme
    pub fn visuals(&self, theme: &Theme) -> egui::Visuals {
        let colors = &theme.colors;
        let mut visuals = if theme.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.panel_fill = colors.panel_background;
        visuals.window_fill = colors.card_background;
        visuals.extreme_bg_color = colors.card_background;
        visuals.faint_bg_color = colors.hover;
        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = with_alpha(colors.accent, 90);
        visuals.selection.stroke.color = colors.accent;

        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.inactive.weak_bg_fill = colors.hover;
        visuals.widgets.hovered.weak_bg_fill = adjust_brightness(colors.hover, 0.95);
        visuals.widgets.active.weak_bg_fill = colors.accent;

        visuals.hyperlink_color = colors.accent;
        visuals.error_fg_color = colors.error;
        visuals.warn_fg_color = colors.warning;
        visuals
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn rose_theme() -> Theme {
    Theme {
        name: "Rose".to_string(),
        description: "Dusty rose, the site's default look".to_string(),
        dark: false,
        colors: ThemeColors {
            background: hex_to_color32("#fbf4f3"),
            panel_background: hex_to_color32("#fbf4f3"),
            card_background: hex_to_color32("#ffffff"),

            text: hex_to_color32("#4a3a40"),
            text_dim: hex_to_color32("#9a8a90"),
            heading: hex_to_color32("#8a6878"),

            accent: hex_to_color32("#8a6878"),
            hover: hex_to_color32("#f5dfe0"),
            border: hex_to_color32("#e6c9cc"),

            error: hex_to_color32("#c0392b"),
            warning: hex_to_color32("#d68910"),
            success: hex_to_color32("#5d9c76"),

            user_bubble: hex_to_color32("#ebb7b5"),
            model_bubble: hex_to_color32("#f0d5e3"),
        },
    }
}

fn dusk_theme() -> Theme {
    Theme {
        name: "Dusk".to_string(),
        description: "Dark variant of Rose".to_string(),
        dark: true,
        colors: ThemeColors {
            background: hex_to_color32("#231c20"),
            panel_background: hex_to_color32("#231c20"),
            card_background: hex_to_color32("#2e2529"),

            text: hex_to_color32("#f2e6e8"),
            text_dim: hex_to_color32("#a8949b"),
            heading: hex_to_color32("#e6acc7"),

            accent: hex_to_color32("#e6acc7"),
            hover: hex_to_color32("#3b3035"),
            border: hex_to_color32("#5a4850"),

            error: hex_to_color32("#ff6b6b"),
            warning: hex_to_color32("#f5b041"),
            success: hex_to_color32("#7dcea0"),

            user_bubble: hex_to_color32("#6e4f5c"),
            model_bubble: hex_to_color32("#3b3035"),
        },
    }
}

fn sage_theme() -> Theme {
    Theme {
        name: "Sage".to_string(),
        description: "Muted green on cream".to_string(),
        dark: false,
        colors: ThemeColors {
            background: hex_to_color32("#f6f5ee"),
            panel_background: hex_to_color32("#f6f5ee"),
            card_background: hex_to_color32("#fffffa"),

            text: hex_to_color32("#36403a"),
            text_dim: hex_to_color32("#87918a"),
            heading: hex_to_color32("#5b7a65"),

            accent: hex_to_color32("#5b7a65"),
            hover: hex_to_color32("#e4ebdf"),
            border: hex_to_color32("#c9d4c4"),

            error: hex_to_color32("#b03a2e"),
            warning: hex_to_color32("#c7811c"),
            success: hex_to_color32("#4f8a5f"),

            user_bubble: hex_to_color32("#cfe0c8"),
            model_bubble: hex_to_color32("#ecefe4"),
        },
    }
}

/// Parses `#rrggbb`; anything else is black.
pub fn hex_to_color32(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::BLACK)
}

/// Scales each RGB channel by `factor`, saturating at 255. Alpha is dropped.
pub fn adjust_brightness(color: Color32, factor: f32) -> Color32 {
    let [r, g, b, _] = color.to_array();
    let scale = |c: u8| (f32::from(c) * factor).clamp(0.0, 255.0) as u8;
    Color32::from_rgb(scale(r), scale(g), scale(b))
}

/// Same color with a new, unmultiplied alpha.
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}
