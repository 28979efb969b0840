use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    api::http::DEFAULT_SERVER_URL,
    session::{
        queue::DEFAULT_PREFETCH_TARGET,
        SessionSettings,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub server_url: String,
    pub prefetch_target: usize,
    pub swipe_duration_ms: u64,
    /// Drag distance, in points, that counts as a swipe.
    pub swipe_threshold: f32,
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            prefetch_target: DEFAULT_PREFETCH_TARGET,
            swipe_duration_ms: 300,
            swipe_threshold: 120.0,
            dark_mode: true,
        }
    }
}

impl SettingsData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            prefetch_target: self.prefetch_target.max(1),
            swipe_duration: Duration::from_millis(self.swipe_duration_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: SettingsData =
            serde_json::from_str(r#"{ "server_url": "http://food.local:8080" }"#).unwrap();

        assert_eq!(settings.server_url, "http://food.local:8080");
        assert_eq!(settings.prefetch_target, 2);
        assert_eq!(settings.swipe_threshold, 120.0);
        assert!(settings.dark_mode);
    }

    #[test]
    fn test_session_settings() {
        let settings = SettingsData { prefetch_target: 0, swipe_duration_ms: 450, ..SettingsData::new() };
        let session = settings.session_settings();

        assert_eq!(session.prefetch_target, 1);
        assert_eq!(session.swipe_duration, Duration::from_millis(450));
        assert_eq!(SettingsData::default().session_settings(), SessionSettings::default());
    }
}
