//! Runtime settings loaded from the environment (and `.env`).

use std::path::PathBuf;
use std::time::Duration;

use crate::analyze::gemini::DEFAULT_MODEL;
use crate::data::DEFAULT_NEUTRAL_RATE;
use crate::data::fred::DEFAULT_REQUEST_SPACING;
use crate::error::{AppError, EXIT_CONFIG};
use crate::notify::ntfy::DEFAULT_BASE_URL;
use crate::store::json::DEFAULT_STORE_PATH;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub fred_api_key: Option<String>,
    pub ntfy_topic: Option<String>,
    pub ntfy_base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub store_path: PathBuf,
    pub neutral_rate: f64,
    pub request_spacing: Duration,
}

impl Settings {
    /// Load `.env` (if present) and read settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let neutral_rate = match get("MACRO_NEUTRAL_RATE") {
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| AppError::new(EXIT_CONFIG, format!("Invalid MACRO_NEUTRAL_RATE '{raw}'.")))?,
            None => DEFAULT_NEUTRAL_RATE,
        };

        let request_spacing = match get("MACRO_REQUEST_SPACING_MS") {
            Some(raw) => Duration::from_millis(raw.parse::<u64>().map_err(|_| {
                AppError::new(EXIT_CONFIG, format!("Invalid MACRO_REQUEST_SPACING_MS '{raw}'."))
            })?),
            None => DEFAULT_REQUEST_SPACING,
        };

        Ok(Self {
            fred_api_key: get("FRED_API_KEY"),
            ntfy_topic: get("NTFY_TOPIC"),
            ntfy_base_url: get("NTFY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            store_path: get("MACRO_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            neutral_rate,
            request_spacing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(s.fred_api_key, None);
        assert_eq!(s.ntfy_base_url, "https://ntfy.sh");
        assert_eq!(s.gemini_model, "gemini-1.5-flash");
        assert_eq!(s.store_path, PathBuf::from("data/snapshots.json"));
        assert_eq!(s.neutral_rate, 2.5);
        assert_eq!(s.request_spacing, Duration::from_millis(100));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let s = Settings::from_lookup(lookup(&[("FRED_API_KEY", "  "), ("NTFY_TOPIC", "macro-42")])).unwrap();
        assert_eq!(s.fred_api_key, None);
        assert_eq!(s.ntfy_topic.as_deref(), Some("macro-42"));
    }

    #[test]
    fn overrides_are_parsed() {
        let s = Settings::from_lookup(lookup(&[
            ("MACRO_NEUTRAL_RATE", "3.0"),
            ("MACRO_REQUEST_SPACING_MS", "250"),
            ("MACRO_STORE_PATH", "/tmp/snap.json"),
        ]))
        .unwrap();
        assert_eq!(s.neutral_rate, 3.0);
        assert_eq!(s.request_spacing, Duration::from_millis(250));
        assert_eq!(s.store_path, PathBuf::from("/tmp/snap.json"));
    }

    #[test]
    fn invalid_numbers_are_config_errors() {
        let err = Settings::from_lookup(lookup(&[("MACRO_NEUTRAL_RATE", "high")])).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_CONFIG);
        let err = Settings::from_lookup(lookup(&[("MACRO_REQUEST_SPACING_MS", "-5")])).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_CONFIG);
    }
}
