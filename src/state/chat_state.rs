//! Chat section state: the conversation session plus the API key editor.

use folio::widgets::chat::ChatSession;
use folio::FolioConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct ChatPanelState {
    session: ChatSession,
    rng: StdRng,
    /// Text in the API key field, applied on Enter or focus loss
    pub key_draft: String,
    /// Whether the key is shown in clear text
    pub show_key: bool,
}

impl ChatPanelState {
    pub fn new(config: &FolioConfig) -> Self {
        let mut rng = StdRng::from_entropy();
        let session = ChatSession::new(&mut rng, &config.chat.default_model, &config.chat.starter);
        Self {
            session,
            rng,
            key_draft: config.chat.api_key.clone().unwrap_or_default(),
            show_key: false,
        }
    }

    // ===== Queries =====

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Whether the key field differs from the key in use.
    pub fn key_draft_changed(&self) -> bool {
        self.key_draft.trim() != self.session.api_key()
    }

    // ===== Mutations =====

    pub fn session_mut(&mut self) -> &mut ChatSession {
        &mut self.session
    }

    /// Opens a fresh conversation, optionally prefilled.
    pub fn new_conversation(&mut self, prefill: Option<&str>) {
        self.session.start_new_conversation(&mut self.rng, prefill);
    }

    /// Copies the key in use back into the field.
    pub fn sync_key_draft(&mut self) {
        self.key_draft = self.session.api_key().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_key_prefills_draft() {
        let mut config = FolioConfig::default();
        config.chat.api_key = Some("from-env".to_string());
        let mut state = ChatPanelState::new(&config);
        assert!(state.key_draft_changed());

        state.session_mut().set_api_key("from-env", &mut folio::MemoryStore::new());
        assert!(!state.key_draft_changed());
    }

    #[test]
    fn test_new_conversation_is_active() {
        let mut state = ChatPanelState::new(&FolioConfig::default());
        state.new_conversation(Some("Dessert near me?"));
        assert_eq!(state.session().conversations().len(), 2);
        assert_eq!(state.session().input, "Dessert near me?");
    }
}
