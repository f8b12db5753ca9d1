//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fetch/scoring code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::{StepStatus, UpdateReport};
use crate::data::HistoryBundle;
use crate::domain::{Indicator, ScoredSnapshot, SeriesOutcome};
use crate::signals::RegimeScore;
use crate::signals::regime::WEIGHTS;

/// Format a reading for display (`-` when absent).
pub fn fmt_reading(indicator: Indicator, value: Option<f64>) -> String {
    match value {
        Some(v) if indicator.is_percent() => format!("{v:.2}%"),
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

/// Snapshot table plus regime score.
pub fn format_scored_snapshot(scored: &ScoredSnapshot) -> String {
    let snap = &scored.snapshot;
    let mut out = String::new();

    out.push_str("=== macro-dash - Regime Dashboard ===\n");
    out.push_str(&format!("As-of: {}\n", snap.timestamp.format("%Y-%m-%d %H:%M UTC")));
    out.push('\n');
    for indicator in Indicator::ALL {
        out.push_str(&format!(
            "{:<24}{:>10}\n",
            indicator.display_name(),
            fmt_reading(indicator, snap.get(indicator))
        ));
    }
    if let Some(neutral) = snap.neutral_rate {
        out.push_str(&format!("{:<24}{:>10}\n", "Neutral Rate (est.)", format!("{neutral:.2}%")));
    }
    out.push('\n');

    match &scored.regime {
        Some(regime) => out.push_str(&format_breakdown(regime)),
        None => out.push_str("Regime score: n/a (inputs incomplete)\n"),
    }
    out
}

/// Composite score with per-component contributions.
pub fn format_breakdown(regime: &RegimeScore) -> String {
    let labels = ["growth", "inflation", "employment", "manufacturing", "yield curve", "fed stance"];
    let scores = regime.breakdown.as_array();

    let mut out = format!("Regime score: {:.1} / 100\n", regime.composite);
    out.push_str("  component       score  weight  contrib\n");
    for ((label, score), weight) in labels.iter().zip(scores.iter()).zip(WEIGHTS.iter()) {
        out.push_str(&format!(
            "  {label:<14}{score:>7.1}{weight:>8.2}{:>9.2}\n",
            score * weight
        ));
    }
    out
}

fn fmt_step(status: &StepStatus) -> String {
    match status {
        StepStatus::Done => "ok".to_string(),
        StepStatus::Skipped => "skipped".to_string(),
        StepStatus::Failed(reason) => format!("failed ({reason})"),
    }
}

/// Full update report: snapshot, step statuses, signal, optional summary.
pub fn format_update_report(report: &UpdateReport) -> String {
    let mut out = format_scored_snapshot(&report.scored);
    out.push('\n');

    for (indicator, reason) in &report.failures {
        out.push_str(&format!("! {} unavailable: {reason}\n", indicator.display_name()));
    }

    match &report.signal {
        Some(signal) => out.push_str(&format!("Signal: {} ({})\n", signal.action.label(), signal.reason)),
        None => out.push_str("Signal: none\n"),
    }
    out.push_str(&format!("Saved: {}\n", fmt_step(&report.saved)));
    out.push_str(&format!("Notified: {}\n", fmt_step(&report.notified)));

    match &report.summary {
        Some(Ok(text)) => out.push_str(&format!("\nSummary:\n{text}\n")),
        Some(Err(reason)) => out.push_str(&format!("\nSummary unavailable: {reason}\n")),
        None => {}
    }
    out
}

/// One row per stored snapshot, newest first.
pub fn format_stored(rows: &[ScoredSnapshot]) -> String {
    if rows.is_empty() {
        return "No stored snapshots.\n".to_string();
    }
    let mut out = format!(
        "{:<17}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}\n",
        "timestamp", "gdp", "cpi", "unemp", "real", "spread", "score"
    );
    for row in rows {
        let s = &row.snapshot;
        let cell = |v: Option<f64>| v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "-".to_string());
        let score = row
            .regime
            .map(|r| format!("{:.1}", r.composite))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<17}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}\n",
            s.timestamp.format("%Y-%m-%d %H:%M"),
            cell(s.gdp_growth),
            cell(s.inflation),
            cell(s.unemployment),
            cell(s.real_rate),
            cell(s.yield_spread),
            score,
        ));
    }
    out
}

/// Per-indicator status, date range and last value.
pub fn format_history_overview(bundle: &HistoryBundle) -> String {
    let mut out = format!("History: last {} days ending {}\n", bundle.days, bundle.end);
    out.push_str(&format!(
        "{:<24}{:<18}{:>12}{:>12}{:>10}\n",
        "indicator", "status", "first", "last", "value"
    ));
    for indicator in Indicator::ALL {
        let outcome = bundle.outcome(indicator).cloned().unwrap_or(SeriesOutcome::Empty);
        let series = outcome.series();
        let (first, last, value) = match (series.first(), series.last()) {
            (Some(f), Some(l)) => (
                f.date.to_string(),
                l.date.to_string(),
                fmt_reading(indicator, Some(l.value)),
            ),
            _ => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        let status = match &outcome {
            SeriesOutcome::Failed(_) => "failed".to_string(),
            other => other.status_label(),
        };
        out.push_str(&format!(
            "{:<24}{:<18}{first:>12}{last:>12}{value:>10}\n",
            indicator.display_name(),
            status
        ));
    }
    for indicator in Indicator::ALL {
        if let Some(SeriesOutcome::Failed(reason)) = bundle.outcome(indicator) {
            out.push_str(&format!("! {}: {reason}\n", indicator.display_name()));
        }
    }
    out
}

/// Every point of one indicator.
pub fn format_series(indicator: Indicator, outcome: &SeriesOutcome) -> String {
    let mut out = format!("{} ({})\n", indicator.display_name(), outcome.status_label());
    for obs in outcome.series() {
        out.push_str(&format!("{}  {:>10}\n", obs.date, fmt_reading(indicator, Some(obs.value))));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MacroSnapshot, Observation};
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::BTreeMap;

    fn full_snapshot() -> MacroSnapshot {
        let mut s = MacroSnapshot::empty(Utc.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap());
        s.gdp_growth = Some(4.4);
        s.inflation = Some(2.65);
        s.unemployment = Some(4.1);
        s.manufacturing = Some(10.0);
        s.real_rate = Some(1.92);
        s.yield_spread = Some(15.0);
        s.fed_funds = Some(4.5);
        s.neutral_rate = Some(2.5);
        s.fed_stance = Some(2.0);
        s
    }

    #[test]
    fn snapshot_report_includes_score_breakdown() {
        let txt = format_scored_snapshot(&ScoredSnapshot::new(full_snapshot()));
        assert!(txt.contains("As-of: 2025-06-01 14:30 UTC"));
        assert!(txt.contains("Manufacturing Index          10.00"));
        assert!(txt.contains("Regime score: 70.6 / 100"));
        assert!(txt.contains("  growth           73.3    0.25    18.33\n"));
        assert!(txt.contains("  fed stance       20.0    0.10     2.00\n"));
    }

    #[test]
    fn incomplete_snapshot_reports_no_score() {
        let mut snap = full_snapshot();
        snap.real_rate = None;
        let txt = format_scored_snapshot(&ScoredSnapshot::new(snap));
        assert!(txt.contains("10Y Real Rate (TIPS)             -"));
        assert!(txt.contains("Regime score: n/a (inputs incomplete)"));
    }

    #[test]
    fn history_overview_flags_failures() {
        let d = |m| NaiveDate::from_ymd_opt(2025, m, 1).unwrap();
        let mut series = BTreeMap::new();
        series.insert(
            Indicator::Unemployment,
            SeriesOutcome::Data(vec![Observation::new(d(1), 4.0), Observation::new(d(5), 4.2)]),
        );
        series.insert(Indicator::RealRate, SeriesOutcome::Failed("status 503".to_string()));
        let bundle = HistoryBundle {
            days: 365,
            end: d(6),
            series,
        };
        let txt = format_history_overview(&bundle);
        assert!(txt.contains("History: last 365 days ending 2025-06-01"));
        assert!(txt.contains("2 pts"));
        assert!(txt.contains("2025-01-01  2025-05-01     4.20%"));
        assert!(txt.contains("! 10Y Real Rate (TIPS): status 503"));
    }

    #[test]
    fn stored_table_marks_missing_cells() {
        let mut partial = full_snapshot();
        partial.inflation = None;
        let rows = vec![ScoredSnapshot::new(full_snapshot()), ScoredSnapshot::new(partial)];
        let txt = format_stored(&rows);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("70.6"));
        assert!(lines[2].ends_with("-"));
        assert_eq!(format_stored(&[]), "No stored snapshots.\n");
    }
}
