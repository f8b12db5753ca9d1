//! In-memory observation source for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::data::fred::{FetchError, ObservationRequest, ObservationSource, SortOrder};
use crate::domain::RawObservation;

/// Serves canned observations per series and records every request.
///
/// Observations are stored oldest first; `Desc` requests are reversed and
/// then truncated to `limit`, like FRED does.
#[derive(Default)]
pub struct CannedSource {
    series: HashMap<String, Vec<RawObservation>>,
    failing: Vec<String>,
    pub requests: Mutex<Vec<ObservationRequest>>,
}

impl CannedSource {
    pub fn with(mut self, series_id: &str, obs: Vec<RawObservation>) -> Self {
        self.series.insert(series_id.to_string(), obs);
        self
    }

    pub fn failing(mut self, series_id: &str) -> Self {
        self.failing.push(series_id.to_string());
        self
    }
}

impl ObservationSource for CannedSource {
    fn observations(&self, request: &ObservationRequest) -> Result<Vec<RawObservation>, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.failing.contains(&request.series_id) {
            return Err(FetchError::Status {
                series_id: request.series_id.clone(),
                status: 503,
            });
        }
        let mut obs = self.series.get(&request.series_id).cloned().unwrap_or_default();
        if request.sort_order == SortOrder::Desc {
            obs.reverse();
        }
        if let Some(limit) = request.limit {
            obs.truncate(limit);
        }
        Ok(obs)
    }
}
