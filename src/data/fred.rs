//! FRED API integration for macro observation series.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::RawObservation;

pub const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// Default spacing between consecutive FRED requests.
pub const DEFAULT_REQUEST_SPACING: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Missing FRED_API_KEY in environment (.env).")]
    MissingApiKey,

    #[error("FRED request for {series_id} failed: {reason}")]
    Transport { series_id: String, reason: String },

    #[error("FRED request for {series_id} failed with status {status}.")]
    Status { series_id: String, status: u16 },

    #[error("Failed to parse FRED response for {series_id}: {reason}")]
    Parse { series_id: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Parameters of one observations query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRequest {
    pub series_id: String,
    pub sort_order: SortOrder,
    pub limit: Option<usize>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ObservationRequest {
    /// The `limit` most recent observations, newest first.
    pub fn latest(series_id: &str, limit: usize) -> Self {
        Self {
            series_id: series_id.to_string(),
            sort_order: SortOrder::Desc,
            limit: Some(limit),
            start: None,
            end: None,
        }
    }

    /// All observations in `[start, end]`, oldest first.
    ///
    /// `start` is clamped to FRED's earliest observation date.
    pub fn range(series_id: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            series_id: series_id.to_string(),
            sort_order: SortOrder::Asc,
            limit: None,
            start: Some(start.max(earliest_observation_date())),
            end: Some(end),
        }
    }
}

/// FRED's default `observation_start`.
pub fn earliest_observation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1776, 7, 4).unwrap_or(NaiveDate::MIN)
}

/// Anything that can answer observation queries keyed by series id.
pub trait ObservationSource: Send + Sync {
    fn observations(&self, request: &ObservationRequest) -> Result<Vec<RawObservation>, FetchError>;
}

pub struct FredClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    spacing: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl FredClient {
    pub fn new(api_key: Option<String>, spacing: Duration) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: BASE_URL.to_string(),
            spacing,
            last_request: Mutex::new(None),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sleep until at least `spacing` has passed since the previous request.
    fn throttle(&self) {
        let mut last = match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.spacing {
                std::thread::sleep(self.spacing - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}

impl ObservationSource for FredClient {
    fn observations(&self, request: &ObservationRequest) -> Result<Vec<RawObservation>, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;
        let series_id = request.series_id.as_str();

        let mut req = self.client.get(&self.base_url).query(&[
            ("series_id", series_id),
            ("api_key", api_key),
            ("file_type", "json"),
            ("sort_order", request.sort_order.as_str()),
        ]);
        if let Some(limit) = request.limit {
            req = req.query(&[("limit", &limit.to_string())]);
        }
        if let Some(start) = request.start {
            req = req.query(&[("observation_start", &start.format("%Y-%m-%d").to_string())]);
        }
        if let Some(end) = request.end {
            req = req.query(&[("observation_end", &end.format("%Y-%m-%d").to_string())]);
        }

        self.throttle();
        log::debug!("FRED request: {series_id} ({:?})", request.sort_order);

        let resp = req.send().map_err(|e| FetchError::Transport {
            series_id: series_id.to_string(),
            reason: e.to_string(),
        })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                series_id: series_id.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().map_err(|e| FetchError::Transport {
            series_id: series_id.to_string(),
            reason: e.to_string(),
        })?;
        parse_observations(series_id, &body)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

/// Decode a FRED observations payload.
pub fn parse_observations(series_id: &str, body: &str) -> Result<Vec<RawObservation>, FetchError> {
    let parsed: ObservationsResponse = serde_json::from_str(body).map_err(|e| FetchError::Parse {
        series_id: series_id.to_string(),
        reason: e.to_string(),
    })?;
    Ok(parsed.observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_observations_payload() {
        let body = r#"{
            "realtime_start": "2025-06-01",
            "count": 3,
            "observations": [
                {"realtime_start": "2025-06-01", "date": "2025-03-01", "value": "4.2"},
                {"realtime_start": "2025-06-01", "date": "2025-04-01", "value": "."},
                {"realtime_start": "2025-06-01", "date": "2025-05-01", "value": "4.1"}
            ]
        }"#;
        let obs = parse_observations("UNRATE", body).unwrap();
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[1], RawObservation::new("2025-04-01", "."));
    }

    #[test]
    fn missing_observations_field_is_empty() {
        let obs = parse_observations("UNRATE", "{}").unwrap();
        assert!(obs.is_empty());
    }

    #[test]
    fn malformed_payload_is_parse_error() {
        let err = parse_observations("UNRATE", "<html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[test]
    fn missing_key_fails_without_network() {
        let client = FredClient::new(Some("   ".to_string()), Duration::ZERO);
        assert!(!client.has_api_key());
        let err = client
            .observations(&ObservationRequest::latest("UNRATE", 1))
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingApiKey));
    }

    #[test]
    fn request_builders_set_order() {
        let latest = ObservationRequest::latest("CPIAUCSL", 13);
        assert_eq!(latest.sort_order, SortOrder::Desc);
        assert_eq!(latest.limit, Some(13));

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let range = ObservationRequest::range("UNRATE", start, end);
        assert_eq!(range.sort_order, SortOrder::Asc);
        assert_eq!(range.limit, None);
        assert_eq!(range.start, Some(start));

        let ancient = ObservationRequest::range("UNRATE", NaiveDate::MIN, end);
        assert_eq!(ancient.start, Some(earliest_observation_date()));
    }
}
