//! Shared "update cycle" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! FRED fetch -> store -> score -> signal -> notify -> (optional) summary
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use chrono::{DateTime, NaiveDate, Utc};

use crate::analyze::{Analyzer, GeminiAnalyzer};
use crate::config::Settings;
use crate::data::{FredClient, HistoryBundle, MacroFetcher, ObservationSource};
use crate::domain::{Indicator, MacroSnapshot, ScoredSnapshot, Signal};
use crate::error::{AppError, EXIT_DATA};
use crate::notify::{Notifier, NtfyNotifier, signal_notification};
use crate::signals::evaluate_signal;
use crate::store::{JsonFileStore, SnapshotStore};

/// The external collaborators, built once at start-up and passed by reference.
pub struct Services {
    pub source: Box<dyn ObservationSource>,
    pub store: Box<dyn SnapshotStore>,
    pub notifier: Box<dyn Notifier>,
    pub analyzer: Box<dyn Analyzer>,
    pub neutral_rate: f64,
}

impl Services {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            source: Box::new(FredClient::new(
                settings.fred_api_key.clone(),
                settings.request_spacing,
            )),
            store: Box::new(JsonFileStore::new(settings.store_path.clone())),
            notifier: Box::new(NtfyNotifier::new(
                settings.ntfy_base_url.clone(),
                settings.ntfy_topic.clone(),
            )),
            analyzer: Box::new(GeminiAnalyzer::new(
                settings.gemini_api_key.clone(),
                settings.gemini_model.clone(),
            )),
            neutral_rate: settings.neutral_rate,
        }
    }

    pub fn fetcher(&self) -> MacroFetcher<'_> {
        MacroFetcher::new(self.source.as_ref(), self.neutral_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    pub notify: bool,
    pub summarize: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            notify: true,
            summarize: false,
        }
    }
}

/// Outcome of a collaborator step that is allowed to fail without aborting the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Skipped,
    Failed(String),
}

/// Everything a single update cycle produced.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub scored: ScoredSnapshot,
    pub failures: Vec<(Indicator, String)>,
    pub signal: Option<Signal>,
    pub saved: StepStatus,
    pub notified: StepStatus,
    pub summary: Option<Result<String, String>>,
}

/// Run one fetch/store/score/notify cycle.
///
/// Only a cycle where no indicator could be fetched at all is an error; every
/// other failure is logged and reported.
pub fn run_update(
    services: &Services,
    now: DateTime<Utc>,
    options: UpdateOptions,
) -> Result<UpdateReport, AppError> {
    let fetch = services.fetcher().fetch_snapshot(now);
    if fetch.is_total_failure() {
        let detail = fetch
            .failures
            .first()
            .map(|(_, reason)| reason.clone())
            .unwrap_or_else(|| "no observations returned".to_string());
        return Err(AppError::new(
            EXIT_DATA,
            format!("Update failed: no indicator could be fetched ({detail})"),
        ));
    }

    let snapshot = fetch.snapshot;

    let saved = match services.store.save(&snapshot) {
        Ok(()) => StepStatus::Done,
        Err(err) => {
            log::warn!("snapshot not saved: {err}");
            StepStatus::Failed(err.to_string())
        }
    };

    let signal = evaluate_signal(&snapshot);
    let notified = match (&signal, options.notify) {
        (Some(sig), true) => match services.notifier.send(&signal_notification(sig, &snapshot)) {
            Ok(()) => StepStatus::Done,
            Err(err) => {
                log::warn!("signal notification not sent: {err}");
                StepStatus::Failed(err.to_string())
            }
        },
        _ => StepStatus::Skipped,
    };

    let summary = options.summarize.then(|| {
        services.analyzer.summarize(&snapshot).map_err(|err| {
            log::warn!("summary unavailable: {err}");
            err.to_string()
        })
    });

    let scored = ScoredSnapshot::new(snapshot);
    match &scored.regime {
        Some(regime) => log::info!("regime score: {:.1}", regime.composite),
        None => log::info!("regime score skipped: incomplete inputs"),
    }

    Ok(UpdateReport {
        scored,
        failures: fetch.failures,
        signal,
        saved,
        notified,
        summary,
    })
}

/// Latest stored snapshot with its regime score.
pub fn current(services: &Services) -> Result<Option<ScoredSnapshot>, AppError> {
    Ok(services.store.latest()?.map(ScoredSnapshot::new))
}

/// Up to `limit` stored snapshots, newest first.
pub fn stored(services: &Services, limit: usize) -> Result<Vec<ScoredSnapshot>, AppError> {
    Ok(services
        .store
        .history(limit)?
        .into_iter()
        .map(ScoredSnapshot::new)
        .collect())
}

/// History for every indicator over the last `days` days.
pub fn history(services: &Services, days: u32, today: NaiveDate) -> HistoryBundle {
    services.fetcher().fetch_all_historical(days, today)
}

/// Summary of the latest stored snapshot.
pub fn summarize_latest(services: &Services) -> Result<(MacroSnapshot, String), AppError> {
    let snapshot = services
        .store
        .latest()?
        .ok_or_else(|| AppError::new(EXIT_DATA, "No stored snapshot yet; run `macro-dash update` first."))?;
    let summary = services.analyzer.summarize(&snapshot)?;
    Ok((snapshot, summary))
}
