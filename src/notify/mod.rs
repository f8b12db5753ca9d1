//! Push notifications for fired signals.

use thiserror::Error;

use crate::domain::{MacroSnapshot, Signal, SignalAction};

pub mod ntfy;

pub use ntfy::NtfyNotifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notifications not configured (set NTFY_TOPIC).")]
    NotConfigured,

    #[error("Notification request failed: {0}")]
    Transport(String),

    #[error("Notification rejected with status {0}.")]
    Status(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Min,
    Low,
    Default,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Min => "min",
            Priority::Low => "low",
            Priority::Default => "default",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub priority: Priority,
    /// Emoji shortcodes (e.g. `chart_with_upwards_trend`).
    pub tags: Vec<String>,
}

pub trait Notifier: Send + Sync {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Notification for a fired BUY/SELL signal.
pub fn signal_notification(signal: &Signal, snapshot: &MacroSnapshot) -> Notification {
    let (icon, tags) = match signal.action {
        SignalAction::Buy => ("📈", ["chart_with_upwards_trend", "moneybag"]),
        SignalAction::Sell => ("📉", ["chart_with_downwards_trend", "warning"]),
    };
    let label = signal.action.label();
    let message = format!(
        "{icon} {label} Signal Generated\n{}\n\nGDP Growth: {}\nInflation: {}\nReal Rate: {}",
        signal.reason,
        fmt_pct(snapshot.gdp_growth),
        fmt_pct(snapshot.inflation),
        fmt_pct(snapshot.real_rate),
    );
    Notification {
        title: format!("Trading Signal: {label}"),
        message,
        priority: Priority::High,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// Low-priority notification confirming the notifier setup.
pub fn test_notification() -> Notification {
    Notification {
        title: "Test Notification".to_string(),
        message: "Your macro tracker is set up correctly! 🎉".to_string(),
        priority: Priority::Low,
        tags: vec!["white_check_mark".to_string()],
    }
}

fn fmt_pct(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}%")).unwrap_or_else(|| "N/A".to_string())
}
