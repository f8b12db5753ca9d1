//! Natural-language summaries of a snapshot from a hosted language model.

use thiserror::Error;

use crate::domain::MacroSnapshot;

pub mod gemini;
pub mod prompt;

pub use gemini::GeminiAnalyzer;
pub use prompt::build_prompt;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Gemini API key not configured. Set GEMINI_API_KEY in .env file.")]
    MissingApiKey,

    #[error("Gemini request failed: {0}")]
    Transport(String),

    #[error("Gemini request failed with status {0}.")]
    Status(u16),

    #[error("Failed to parse Gemini response: {0}")]
    Parse(String),

    #[error("Unable to generate summary (no candidates returned).")]
    EmptyResponse,
}

pub trait Analyzer: Send + Sync {
    fn summarize(&self, snapshot: &MacroSnapshot) -> Result<String, AnalyzeError>;
}
