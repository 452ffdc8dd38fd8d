//! Navigation and layout state.

use serde::{Deserialize, Serialize};

/// Top-level sections reachable from the header navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Section {
    #[default]
    Home,
    Gallery,
    Wheel,
    Widgets,
    Chat,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::Gallery,
        Section::Wheel,
        Section::Widgets,
        Section::Chat,
        Section::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "🏠 Home",
            Section::Gallery => "📷 Gallery",
            Section::Wheel => "🎡 What to eat",
            Section::Widgets => "🧩 Widgets",
            Section::Chat => "💬 Food chat",
            Section::Contact => "✉ Contact",
        }
    }
}

/// State related to which section is shown and how the window is laid out.
#[derive(Debug, Clone)]
pub struct LayoutState {
    section: Section,
    /// Width of the chat conversation list
    chat_sidebar_width: f32,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new(Section::default())
    }
}

impl LayoutState {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            chat_sidebar_width: 200.0,
        }
    }

    // ===== Queries =====

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn chat_sidebar_width(&self) -> f32 {
        self.chat_sidebar_width
    }

    // ===== Mutations =====

    pub fn show(&mut self, section: Section) {
        self.section = section;
    }
}
