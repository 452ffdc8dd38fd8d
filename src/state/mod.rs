//! State management modules for the portfolio showcase.
//!
//! This module contains state-only logic (no UI concerns):
//! - Theme state (theme manager, current theme)
//! - Layout state (active section)
//! - Gallery state (sliders, text carousel)
//! - Wheel state (spin resolver, result history)
//! - Widget state (per-widget fetch results)
//! - Chat state (conversations, API key editor)

mod chat_state;
mod gallery_state;
mod layout_state;
mod theme_state;
mod wheel_state;
mod widget_state;

pub use chat_state::ChatPanelState;
pub use gallery_state::{GalleryState, SliderState};
pub use layout_state::{LayoutState, Section};
pub use theme_state::ThemeState;
pub use wheel_state::WheelPanelState;
pub use widget_state::{Slot, WidgetsState};
