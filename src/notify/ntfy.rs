//! ntfy.sh publisher.

use reqwest::blocking::Client;

use crate::notify::{Notification, Notifier, NotifyError};

pub const DEFAULT_BASE_URL: &str = "https://ntfy.sh";

pub struct NtfyNotifier {
    client: Client,
    base_url: String,
    topic: Option<String>,
}

impl NtfyNotifier {
    pub fn new(base_url: impl Into<String>, topic: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            topic: topic.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Publish URL, or `None` without a topic.
    pub fn topic_url(&self) -> Option<String> {
        let topic = self.topic.as_deref()?;
        Some(format!("{}/{}", self.base_url.trim_end_matches('/'), topic))
    }
}

impl Notifier for NtfyNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let url = self.topic_url().ok_or(NotifyError::NotConfigured)?;

        let mut req = self
            .client
            .post(&url)
            .header("Title", notification.title.as_str())
            .header("Priority", notification.priority.as_str())
            .body(notification.message.clone().into_bytes());
        if !notification.tags.is_empty() {
            req = req.header("Tags", notification.tags.join(","));
        }

        let resp = req
            .send()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        if resp.status().as_u16() != 200 {
            return Err(NotifyError::Status(resp.status().as_u16()));
        }

        log::info!("Notification sent: {}", notification.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::test_notification;

    #[test]
    fn topic_url_joins_base_and_topic() {
        let n = NtfyNotifier::new("https://ntfy.sh/", Some("macro-tracker-1234".to_string()));
        assert_eq!(n.topic_url().as_deref(), Some("https://ntfy.sh/macro-tracker-1234"));
    }

    #[test]
    fn blank_topic_is_not_configured() {
        let n = NtfyNotifier::new(DEFAULT_BASE_URL, Some("  ".to_string()));
        assert!(n.topic_url().is_none());
        assert!(matches!(n.send(&test_notification()), Err(NotifyError::NotConfigured)));
    }
}
