//! UI panel rendering subsystem
//!
//! One module per section plus the shared chrome:
//! - Header panel (section navigation, theme selector)
//! - Status bar (background activity, storage location)
//! - Gallery panel (home hero, toy carousel, photo sliders, card grids)
//! - Wheel panel (what-to-eat spin wheel)
//! - Widgets panel (news ticker, weather, quote, APOD, Pokémon)
//! - Chat panel (food chat conversations)
//! - Contact panel (mail draft form)
//! - Panel manager (layout and interaction dispatch)

pub mod chat_panel;
pub mod contact_panel;
pub mod gallery_panel;
pub mod header;
pub mod panel_manager;
pub mod status_bar;
pub mod wheel_panel;
pub mod widgets_panel;
