//! Error types for pm
//!
//! Exit codes:
//! - 0: Success, or a rejected command (usage, not found, ownership, validation)
//! - 2: User error (invalid configuration)
//! - 4: Operation failed (state file unreadable, malformed, or not writable)
//!
//! Rejected commands report on stdout and never touch the state file, so they
//! still exit cleanly. Everything else is fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the pm CLI
pub mod exit_codes {
    pub const REJECTED: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for pm operations
#[derive(Error, Debug)]
pub enum Error {
    // Rejections (exit code 0, state untouched)
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Epic {0} not found")]
    EpicNotFound(String),

    #[error("Ticket {0} not found")]
    TicketNotFound(String),

    #[error("Ticket {ticket} is assigned to {assigned_to}, not {agent}")]
    NotAssigned {
        ticket: String,
        assigned_to: String,
        agent: String,
    },

    #[error("Risk status must be: green, yellow, or red")]
    InvalidRiskStatus(String),

    #[error("Epic {0} already exists")]
    DuplicateEpic(String),

    #[error("Ticket {0} already exists")]
    DuplicateTicket(String),

    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("Cannot read state file {path}: {source}")]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed state file {path}: {source}")]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),
}

impl Error {
    /// Whether this error is a rejected command rather than a failure.
    ///
    /// Rejections are detected before any mutation, so the document on disk
    /// is exactly what it was before the command ran.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::Usage(_)
                | Error::UnknownCommand(_)
                | Error::EpicNotFound(_)
                | Error::TicketNotFound(_)
                | Error::NotAssigned { .. }
                | Error::InvalidRiskStatus(_)
                | Error::DuplicateEpic(_)
                | Error::DuplicateTicket(_)
        )
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_)
            | Error::UnknownCommand(_)
            | Error::EpicNotFound(_)
            | Error::TicketNotFound(_)
            | Error::NotAssigned { .. }
            | Error::InvalidRiskStatus(_)
            | Error::DuplicateEpic(_)
            | Error::DuplicateTicket(_) => exit_codes::REJECTED,

            Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            Error::StateRead { .. }
            | Error::StateParse { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Short machine-readable category used in JSON envelopes
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Usage(_) | Error::UnknownCommand(_) => "usage",
            Error::EpicNotFound(_) | Error::TicketNotFound(_) => "not_found",
            Error::NotAssigned { .. } => "ownership",
            Error::InvalidRiskStatus(_) | Error::DuplicateEpic(_) | Error::DuplicateTicket(_) => {
                "validation"
            }
            Error::InvalidConfig(_) => "user_error",
            _ => "operation_failed",
        }
    }

    /// Structured details for JSON output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::NotAssigned {
                ticket,
                assigned_to,
                agent,
            } => Some(serde_json::json!({
                "ticket": ticket,
                "assigned_to": assigned_to,
                "agent": agent,
            })),
            Error::EpicNotFound(id) | Error::DuplicateEpic(id) => {
                Some(serde_json::json!({ "epic": id }))
            }
            Error::TicketNotFound(id) | Error::DuplicateTicket(id) => {
                Some(serde_json::json!({ "ticket": id }))
            }
            Error::InvalidRiskStatus(value) => Some(serde_json::json!({
                "value": value,
                "allowed": ["green", "yellow", "red"],
            })),
            Error::StateRead { path, .. } | Error::StateParse { path, .. } => {
                Some(serde_json::json!({ "path": path }))
            }
            _ => None,
        }
    }
}

/// Result type alias for pm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error body of the JSON envelope
#[derive(serde::Serialize)]
pub struct JsonError {
    pub message: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            message: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
            details: err.details(),
        }
    }
}
