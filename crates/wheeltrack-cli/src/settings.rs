//! Environment-backed settings for the CLI.
//!
//! The dashboard persists settings in its own store; the CLI reads the
//! same keys from the environment instead. `polygon_api_key` maps to
//! `POLYGON_API_KEY` and `polygon_tier` to `POLYGON_TIER`.

use wheeltrack_core::SettingsStore;

/// Settings store that resolves keys against environment variables.
#[derive(Debug, Default)]
pub struct EnvSettingsStore;

impl EnvSettingsStore {
    pub fn new() -> Self {
        Self
    }
}

impl SettingsStore for EnvSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        let variable = key.to_ascii_uppercase();
        std::env::var(variable).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheeltrack_core::API_KEY_SETTING;

    #[test]
    fn maps_setting_key_to_environment_variable() {
        std::env::set_var("POLYGON_API_KEY", "pk_env_test");
        let store = EnvSettingsStore::new();
        assert_eq!(store.get(API_KEY_SETTING).as_deref(), Some("pk_env_test"));
        std::env::remove_var("POLYGON_API_KEY");
    }
}
