//! Export indicator history to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one long-format row per observation.

use std::path::Path;

use serde::Serialize;

use crate::data::HistoryBundle;
use crate::domain::Indicator;
use crate::error::{AppError, EXIT_STORE};

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    indicator: &'a str,
    date: String,
    value: f64,
}

/// Write every available point in `bundle` as `indicator,date,value`.
///
/// Indicators are written in dashboard order; empty or failed series contribute no rows.
/// Returns the number of rows written.
pub fn write_history_csv(path: &Path, bundle: &HistoryBundle) -> Result<usize, AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(EXIT_STORE, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    let mut rows = 0;
    for indicator in Indicator::ALL {
        for obs in bundle.get(indicator) {
            writer
                .serialize(HistoryRow {
                    indicator: indicator.key(),
                    date: obs.date.to_string(),
                    value: obs.value,
                })
                .map_err(|e| AppError::new(EXIT_STORE, format!("Failed to write export CSV row: {e}")))?;
            rows += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_STORE, format!("Failed to flush export CSV: {e}")))?;
    log::info!("wrote {rows} rows to {}", path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Observation, SeriesOutcome};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[test]
    fn writes_long_format_rows() {
        let d = |m| NaiveDate::from_ymd_opt(2025, m, 1).unwrap();
        let mut series = BTreeMap::new();
        series.insert(
            Indicator::FedFunds,
            SeriesOutcome::Data(vec![Observation::new(d(1), 4.33), Observation::new(d(2), 4.33)]),
        );
        series.insert(
            Indicator::Unemployment,
            SeriesOutcome::Data(vec![Observation::new(d(1), 4.0)]),
        );
        series.insert(Indicator::RealRate, SeriesOutcome::Failed("timeout".to_string()));
        let bundle = HistoryBundle {
            days: 90,
            end: d(3),
            series,
        };

        let path = std::env::temp_dir().join(format!("macro-export-{}.csv", std::process::id()));
        let rows = write_history_csv(&path, &bundle).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(rows, 3);
        assert_eq!(
            text,
            "indicator,date,value\n\
             unemployment,2025-01-01,4.0\n\
             fed_funds,2025-01-01,4.33\n\
             fed_funds,2025-02-01,4.33\n"
        );
    }
}
