//! AI-friendly error types with suggestions.
//!
//! Analysis itself never fails: malformed input degrades to smaller
//! results and "nothing found" outcomes are ordinary return values.
//! [`ApiError`] exists for the command layer around the core, where a
//! request can name an element that does not exist or a snapshot that
//! has been superseded. Every constructor supplies an actionable
//! suggestion so an agent can recover without human help.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::session::SessionError;

/// Error codes for protocol responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ElementNotFound,
    StaleSnapshot,
    InvalidInput,
    CommandFailed,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::ElementNotFound => write!(f, "ELEMENT_NOT_FOUND"),
            ErrorCode::StaleSnapshot => write!(f, "STALE_SNAPSHOT"),
            ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
            ErrorCode::CommandFailed => write!(f, "COMMAND_FAILED"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// An error response with AI-friendly context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (hint: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// No element matched a natural-language description.
    pub fn no_match(description: &str) -> Self {
        Self {
            code: ErrorCode::ElementNotFound,
            message: format!("No element matching '{}'", description),
            suggestion: Some(
                "Dump the UI tree to see what is on screen, or try a shorter description".into(),
            ),
        }
    }

    /// An index-based lookup referenced a snapshot that no longer exists.
    pub fn stale_snapshot(err: &SessionError) -> Self {
        Self {
            code: ErrorCode::StaleSnapshot,
            message: err.to_string(),
            suggestion: Some(
                "Re-dump the UI tree and resolve the element again before acting on it".into(),
            ),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: message.into(),
            suggestion: Some("Check the command syntax and try again".into()),
        }
    }

    /// Create an invalid input error with a custom suggestion.
    pub fn invalid_input_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    /// A device-side command (tap, launch, log retrieval) failed.
    pub fn command_failed(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::CommandFailed,
            message: message.into(),
            suggestion: Some("Check that the device is connected and responsive".into()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InternalError,
            message: message.into(),
            suggestion: Some("This is an internal error. Please report it if it persists.".into()),
        }
    }
}
