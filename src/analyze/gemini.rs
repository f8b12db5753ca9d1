//! Gemini `generateContent` client.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::analyze::{AnalyzeError, Analyzer, build_prompt};
use crate::domain::MacroSnapshot;

pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub struct GeminiAnalyzer {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiAnalyzer {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/{}:generateContent", self.model)
    }
}

impl Analyzer for GeminiAnalyzer {
    fn summarize(&self, snapshot: &MacroSnapshot) -> Result<String, AnalyzeError> {
        let api_key = self.api_key.as_deref().ok_or(AnalyzeError::MissingApiKey)?;
        let payload = json!({
            "contents": [{ "parts": [{ "text": build_prompt(snapshot) }] }]
        });

        log::debug!("Gemini request: model={}", self.model);
        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AnalyzeError::Status(resp.status().as_u16()));
        }

        let body = resp.text().map_err(|e| AnalyzeError::Transport(e.to_string()))?;
        extract_text(&body)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Trimmed text of the first candidate's first part.
pub fn extract_text(body: &str) -> Result<String, AnalyzeError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| AnalyzeError::Parse(e.to_string()))?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(|t| t.trim().to_string())
        .ok_or(AnalyzeError::EmptyResponse)
}
