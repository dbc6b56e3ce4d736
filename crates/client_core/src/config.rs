//! Runtime settings: an optional `board.toml` next to the executable, then
//! environment overrides. Environment always wins.

use std::{collections::HashMap, fs, time::Duration};

use serde::Deserialize;
use shared::domain::BusinessId;

use crate::poll::{BOARD_POLL_INTERVAL, KITCHEN_POLL_INTERVAL};

const SETTINGS_FILE: &str = "board.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub backend_url: String,
    pub business_id: i64,
    pub kitchen_poll_seconds: u64,
    pub board_poll_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".into(),
            business_id: 1,
            kitchen_poll_seconds: KITCHEN_POLL_INTERVAL.as_secs(),
            board_poll_seconds: BOARD_POLL_INTERVAL.as_secs(),
        }
    }
}

impl Settings {
    pub fn business(&self) -> BusinessId {
        BusinessId(self.business_id)
    }

    pub fn kitchen_poll(&self) -> Duration {
        Duration::from_secs(self.kitchen_poll_seconds.max(1))
    }

    pub fn board_poll(&self) -> Duration {
        Duration::from_secs(self.board_poll_seconds.max(1))
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_settings_file(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Ok(v) = std::env::var("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Ok(v) = std::env::var("BUSINESS_ID") {
        if let Ok(parsed) = v.parse() {
            settings.business_id = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__BUSINESS_ID") {
        if let Ok(parsed) = v.parse() {
            settings.business_id = parsed;
        }
    }

    if let Ok(v) = std::env::var("APP__KITCHEN_POLL_SECONDS") {
        if let Ok(parsed) = v.parse() {
            settings.kitchen_poll_seconds = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__BOARD_POLL_SECONDS") {
        if let Ok(parsed) = v.parse() {
            settings.board_poll_seconds = parsed;
        }
    }

    settings.backend_url = normalize_backend_url(&settings.backend_url);
    settings
}

fn apply_settings_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("backend_url").and_then(toml::Value::as_str) {
        settings.backend_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("business_id").and_then(toml::Value::as_integer) {
        settings.business_id = v;
    }
    if let Some(v) = file_cfg
        .get("kitchen_poll_seconds")
        .and_then(toml::Value::as_integer)
    {
        if v > 0 {
            settings.kitchen_poll_seconds = v as u64;
        }
    }
    if let Some(v) = file_cfg
        .get("board_poll_seconds")
        .and_then(toml::Value::as_integer)
    {
        if v > 0 {
            settings.board_poll_seconds = v as u64;
        }
    }
}

fn normalize_backend_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return Settings::default().backend_url;
    }
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_file_overrides_defaults() {
        let mut settings = Settings::default();
        apply_settings_file(
            &mut settings,
            "backend_url = \"http://orders.internal:9000\"\nbusiness_id = 7\nkitchen_poll_seconds = 2\n",
        );

        assert_eq!(settings.backend_url, "http://orders.internal:9000");
        assert_eq!(settings.business_id, 7);
        assert_eq!(settings.kitchen_poll_seconds, 2);
        assert_eq!(
            settings.board_poll_seconds,
            Settings::default().board_poll_seconds
        );
    }

    #[test]
    fn malformed_settings_file_is_ignored() {
        let mut settings = Settings::default();
        apply_settings_file(&mut settings, "backend_url = [not toml");
        assert_eq!(settings.backend_url, Settings::default().backend_url);
    }

    #[test]
    fn non_positive_poll_intervals_are_rejected() {
        let mut settings = Settings::default();
        apply_settings_file(&mut settings, "kitchen_poll_seconds = 0\n");
        assert_eq!(
            settings.kitchen_poll_seconds,
            Settings::default().kitchen_poll_seconds
        );
    }

    #[test]
    fn normalizes_trailing_slash_and_blank_url() {
        assert_eq!(
            normalize_backend_url("http://localhost:8000/"),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_backend_url("   "),
            Settings::default().backend_url
        );
    }

    #[test]
    fn poll_durations_have_a_one_second_floor() {
        let settings = Settings {
            kitchen_poll_seconds: 0,
            ..Settings::default()
        };
        assert_eq!(settings.kitchen_poll(), Duration::from_secs(1));
    }
}
