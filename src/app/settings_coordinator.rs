//! UI preference persistence.
//!
//! Preferences that belong to the window rather than the portfolio data (active
//! section, whether the chat key is remembered) live in eframe's storage as JSON
//! strings. Portfolio data such as caches goes to the key-value store instead.

use serde::{Deserialize, Serialize};

pub const SECTION_KEY: &str = "active_section";
pub const REMEMBER_KEY_KEY: &str = "remember_gemini_key";

/// Coordinates typed settings persistence over eframe's storage.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting, returning `default` when it is missing or unreadable.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface, if persistence is available
    /// * `key` - The storage key for this setting
    /// * `default` - Value to use if loading fails
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        Self::try_load_setting(storage, key).unwrap_or(default)
    }

    /// Loads a setting, `None` if missing or unreadable.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let json_str = storage?.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring stored setting {}: {}", key, e);
                None
            }
        }
    }

    /// Saves a setting as JSON.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => storage.set_string(key, json_str),
            Err(e) => log::warn!("could not save setting {}: {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Section;
    use eframe::Storage as _;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self { data: HashMap::new() }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_section_roundtrip() {
        let mut storage = MockStorage::new();
        SettingsCoordinator::save_setting(&mut storage, SECTION_KEY, &Section::Chat);

        let loaded = SettingsCoordinator::load_setting_or(Some(&storage), SECTION_KEY, Section::Home);
        assert_eq!(loaded, Section::Chat);
    }

    #[test]
    fn test_missing_or_corrupt_uses_default() {
        let mut storage = MockStorage::new();
        assert!(SettingsCoordinator::load_setting_or(Some(&storage), REMEMBER_KEY_KEY, true));

        storage.set_string(REMEMBER_KEY_KEY, "not json".to_string());
        let result: Option<bool> = SettingsCoordinator::try_load_setting(Some(&storage), REMEMBER_KEY_KEY);
        assert_eq!(result, None);
    }

    #[test]
    fn test_no_storage() {
        let loaded = SettingsCoordinator::load_setting_or(None, SECTION_KEY, Section::Wheel);
        assert_eq!(loaded, Section::Wheel);
    }
}
