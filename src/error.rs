//! Error taxonomy for navigator operations.
//!
//! Every rejection carries a stable kind string (see [`NavigatorError::kind`])
//! so callers can branch on the failure without matching message text.

use thiserror::Error;

/// Errors produced by the navigator, its stack and its collaborators.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NavigatorError {
    /// Malformed arguments, detected before any state change.
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// The requested animation name is not registered.
    #[error("Animation '{name}' is not registered")]
    UnknownAnimation { name: String },

    /// An animator registration was rejected.
    #[error("Invalid animator '{name}': {reason}")]
    InvalidAnimator { name: String, reason: String },

    /// The stack is too small for the requested operation.
    #[error("Page stack is empty")]
    EmptyStack,

    /// Another mutating operation is in flight on the same navigator.
    #[error("{operation} is already running")]
    AlreadyRunning { operation: &'static str },

    /// A pre-event listener canceled the operation.
    #[error("Canceled in {event} event")]
    Canceled { event: &'static str },

    /// Refresh was requested for a page without a content reference.
    #[error("Refresh cannot be used with inline pages; give the page a content reference")]
    RefreshUnsupported,

    /// Index or selector out of range.
    #[error("Index {index} is out of range for a stack of {len} page(s)")]
    Index { index: isize, len: usize },

    /// Resolved content is not a valid page.
    #[error("Content is not a page: {0}")]
    Structural(String),

    /// Malformed animation-options string.
    #[error("Failed to parse animation options '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// The runtime shut down while a claimed operation was still running.
    #[error("{operation} was interrupted by runtime shutdown")]
    Interrupted { operation: &'static str },

    /// The content resolver could not find the requested reference.
    #[error("Content '{reference}' not found")]
    ContentNotFound { reference: String },
}

impl NavigatorError {
    /// Stable identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            NavigatorError::Validation(_) => "validation",
            NavigatorError::UnknownAnimation { .. } => "unknown_animation",
            NavigatorError::InvalidAnimator { .. } => "invalid_animator",
            NavigatorError::EmptyStack => "empty_stack",
            NavigatorError::AlreadyRunning { .. } => "already_running",
            NavigatorError::Canceled { .. } => "canceled",
            NavigatorError::RefreshUnsupported => "refresh_unsupported",
            NavigatorError::Index { .. } => "index",
            NavigatorError::Structural(_) => "structural",
            NavigatorError::Parse { .. } => "parse",
            NavigatorError::ContentNotFound { .. } => "content_not_found",
            NavigatorError::Interrupted { .. } => "interrupted",
        }
    }

    /// True for errors reported before any state change because the
    /// arguments themselves were unusable.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            NavigatorError::Validation(_)
                | NavigatorError::UnknownAnimation { .. }
                | NavigatorError::InvalidAnimator { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
