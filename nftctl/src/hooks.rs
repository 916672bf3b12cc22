//! Notification hooks for the presentation layer.
//!
//! The controller never renders anything itself. Hosts implement
//! [`ConsoleHooks`] to receive transient notices (toasts, status lines) and
//! per-function result updates as they happen. All methods default to
//! no-ops; implement only what the host renders.

use crate::call::{CallResult, Erc721Function};

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral progress information.
    Info,
    /// An operation completed.
    Success,
    /// An operation failed.
    Error,
}

/// A transient notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// How to style the notice.
    pub severity: Severity,
    /// Message text, already user-facing.
    pub text: String,
}

impl Notice {
    /// Builds an informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    /// Builds a success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    /// Builds an error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

/// Observer hooks the presentation layer implements.
pub trait ConsoleHooks: Send + Sync {
    /// Called once for every transient notice.
    fn on_notice(&self, notice: &Notice) {
        let _ = notice;
    }

    /// Called whenever a per-function result slot changes, including the
    /// intermediate pending state of a submitted transaction.
    fn on_result(&self, function: Erc721Function, result: &CallResult) {
        let _ = (function, result);
    }
}

/// Hook implementation that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl ConsoleHooks for NoHooks {}
