//! Theme selection state.

use folio::theme::DEFAULT_THEME;
use folio::{ThemeColors, ThemeManager};

/// State related to visual theme and styling.
///
/// Responsibilities:
/// - Owning the theme manager
/// - Tracking the current theme selection
pub struct ThemeState {
    theme_manager: ThemeManager,
    current_theme_name: String,
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current_theme_name", &self.current_theme_name)
            .finish_non_exhaustive()
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::with_theme(DEFAULT_THEME.to_string())
    }
}

impl ThemeState {
    /// Creates a theme state with `theme_name`, falling back to the default for unknown names.
    ///
    /// # Arguments
    /// * `theme_name` - Name restored from persistent storage
    pub fn with_theme(theme_name: String) -> Self {
        let mut theme_manager = ThemeManager::new();
        if let Err(e) = theme_manager.set_current_theme(&theme_name) {
            log::warn!("{}, using {}", e, DEFAULT_THEME);
        }
        let current_theme_name = theme_manager.current_theme_name().to_string();
        Self {
            theme_manager,
            current_theme_name,
        }
    }

    // ===== Queries =====

    pub fn theme_manager(&self) -> &ThemeManager {
        &self.theme_manager
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme_name
    }

    /// Palette of the current theme.
    pub fn colors(&self) -> &ThemeColors {
        &self.theme_manager.current_theme().colors
    }

    // ===== Mutations =====

    /// Switches theme. Unknown names are ignored.
    pub fn set_theme(&mut self, theme_name: String) {
        if self.theme_manager.set_current_theme(&theme_name).is_ok() {
            self.current_theme_name = theme_name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_stored_theme_falls_back() {
        let state = ThemeState::with_theme("Solarized".to_string());
        assert_eq!(state.current_theme_name(), DEFAULT_THEME);
    }

    #[test]
    fn test_set_theme() {
        let mut state = ThemeState::default();
        state.set_theme("Dusk".to_string());
        assert_eq!(state.current_theme_name(), "Dusk");
        state.set_theme("Nope".to_string());
        assert_eq!(state.current_theme_name(), "Dusk");
    }
}
