use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "menu_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every API path. Empty means same-origin.
    pub api_base: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: option_env!("MENU_API_BASE").unwrap_or("").to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Reads an override from `localStorage`, falling back to the built-in
/// defaults when nothing usable is stored.
pub fn load_config() -> ClientConfig {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
                if let Some(config) = ClientConfig::from_json(&raw) {
                    return config;
                }
            }
        }
    }
    ClientConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_base(base: &str) -> ClientConfig {
        ClientConfig {
            api_base: base.to_string(),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn same_origin_endpoint_keeps_absolute_path() {
        assert_eq!(with_base("").endpoint("/api/foods/1"), "/api/foods/1");
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        assert_eq!(
            with_base("http://localhost:8000/").endpoint("/api/categories/show"),
            "http://localhost:8000/api/categories/show"
        );
        assert_eq!(
            with_base("http://localhost:8000").endpoint("api/categories/show"),
            "http://localhost:8000/api/categories/show"
        );
    }

    #[test]
    fn stored_override_fills_missing_fields() {
        let config = ClientConfig::from_json(r#"{"api_base":"http://menu.local"}"#).unwrap();
        assert_eq!(config.api_base, "http://menu.local");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn malformed_override_is_ignored() {
        assert!(ClientConfig::from_json("not json").is_none());
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let mut config = ClientConfig::default();
        config.log_level = "chatty".to_string();
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
        config.log_level = "debug".to_string();
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
    }
}
