//! Application error type and the process exit-code contract.
//!
//! Subsystems return their own `thiserror` enums; they are converted into
//! `AppError` at the command boundary, and `main` exits with `exit_code()`:
//!
//! | code | meaning |
//! |------|---------|
//! | 1 | terminal I/O (TUI) |
//! | 2 | configuration or usage (missing keys, bad env values) |
//! | 3 | snapshot store or export file |
//! | 4 | upstream data (FRED) |
//! | 5 | notifier or analyzer |

use crate::analyze::AnalyzeError;
use crate::data::FetchError;
use crate::notify::NotifyError;
use crate::store::StoreError;

/// Exit code for terminal I/O failures.
pub const EXIT_TERMINAL: u8 = 1;
/// Exit code for configuration and usage problems.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for snapshot store failures.
pub const EXIT_STORE: u8 = 3;
/// Exit code for upstream data failures.
pub const EXIT_DATA: u8 = 4;
/// Exit code for notifier/analyzer failures.
pub const EXIT_COLLABORATOR: u8 = 5;

/// A user-facing message plus the exit code `main` returns for it.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let code = match err {
            FetchError::MissingApiKey => EXIT_CONFIG,
            _ => EXIT_DATA,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::new(EXIT_STORE, err.to_string())
    }
}

impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        let code = match err {
            NotifyError::NotConfigured => EXIT_CONFIG,
            _ => EXIT_COLLABORATOR,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<AnalyzeError> for AppError {
    fn from(err: AnalyzeError) -> Self {
        let code = match err {
            AnalyzeError::MissingApiKey => EXIT_CONFIG,
            _ => EXIT_COLLABORATOR,
        };
        AppError::new(code, err.to_string())
    }
}
