//! Application-level modules for the portfolio showcase.
//!
//! This module contains the application coordinator and centralized state management.

mod app_state;
mod application_coordinator;
mod settings_coordinator;
mod theme_coordinator;

pub use app_state::AppState;
pub use application_coordinator::ApplicationCoordinator;
pub use settings_coordinator::{SettingsCoordinator, REMEMBER_KEY_KEY, SECTION_KEY};
pub use theme_coordinator::ThemeCoordinator;
