// SPDX-License-Identifier: MPL-2.0
//! Remote service ports: report extraction, risk prediction and feedback.
//!
//! # Design Notes
//!
//! - Calls return boxed `'static` futures so the session can hand them to the
//!   runtime without borrowing the adapter
//! - Implementations are `Send + Sync` and shared behind an `Arc`
//! - Error payloads returned by a service are surfaced verbatim through
//!   [`ServiceError::Rejected`]

use crate::domain::report::AcquiredFile;
use crate::domain::risk::{ExtractedData, FormState, PredictionResult};
use futures_util::future::BoxFuture;
use std::fmt;

// =============================================================================
// ServiceError
// =============================================================================

/// Errors returned by the remote collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never produced a response (DNS, refused connection, timeout).
    Transport(String),

    /// The service answered with a failure, optionally explaining why.
    Rejected {
        /// HTTP status, if the transport has one.
        status: Option<u16>,
        /// Reason taken from the `error` field of the response body.
        reason: Option<String>,
    },

    /// The response could not be understood.
    Malformed(String),
}

impl ServiceError {
    /// Returns the service's own explanation, trimmed, when it gave a
    /// non-blank one.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected {
                reason: Some(reason),
                ..
            } => Some(reason.trim()).filter(|r| !r.is_empty()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ServiceError::Transport(_))
    }

    /// Returns the i18n key for a generic message about this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ServiceError::Transport(_) => "error-service-network",
            ServiceError::Rejected { .. } => "error-service-rejected",
            ServiceError::Malformed(_) => "error-service-malformed",
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Transport(msg) => write!(f, "Transport error: {msg}"),
            ServiceError::Rejected {
                status,
                reason: Some(reason),
            } => match status {
                Some(code) => write!(f, "Service rejected request ({code}): {reason}"),
                None => write!(f, "Service rejected request: {reason}"),
            },
            ServiceError::Rejected {
                status: Some(code),
                reason: None,
            } => write!(f, "Service rejected request ({code})"),
            ServiceError::Rejected {
                status: None,
                reason: None,
            } => write!(f, "Service rejected request"),
            ServiceError::Malformed(msg) => write!(f, "Malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

// =============================================================================
// Feedback entry
// =============================================================================

/// A free-text review left by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    /// Optional display name, sent as typed (possibly empty).
    pub name: String,
    /// Review text; never blank when sent.
    pub review: String,
}

// =============================================================================
// Ports
// =============================================================================

/// Converts a report file into risk-factor fields.
pub trait ReportExtractor: Send + Sync {
    /// Sends the file for extraction.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the request fails or the service
    /// answers with an error payload.
    fn extract(&self, file: &AcquiredFile) -> BoxFuture<'static, Result<ExtractedData, ServiceError>>;
}

/// Converts a complete form into a disease probability.
pub trait RiskPredictor: Send + Sync {
    /// Requests a prediction for the form.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the request fails, the service answers
    /// `{error}`, or the probability is missing or out of range.
    fn predict(&self, form: &FormState) -> BoxFuture<'static, Result<PredictionResult, ServiceError>>;
}

/// Stores user feedback.
pub trait FeedbackSink: Send + Sync {
    /// Submits one feedback entry.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the entry could not be stored.
    fn submit(&self, entry: &FeedbackEntry) -> BoxFuture<'static, Result<(), ServiceError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ReportExtractor, _: &dyn RiskPredictor, _: &dyn FeedbackSink) {}

    #[test]
    fn rejected_reason_is_surfaced() {
        let err = ServiceError::Rejected {
            status: Some(400),
            reason: Some("Unreadable scan".into()),
        };
        assert_eq!(err.reason(), Some("Unreadable scan"));
    }

    #[test]
    fn missing_or_blank_reason_is_none() {
        let none = ServiceError::Rejected {
            status: Some(500),
            reason: None,
        };
        let blank = ServiceError::Rejected {
            status: None,
            reason: Some("  ".into()),
        };
        assert_eq!(none.reason(), None);
        assert_eq!(blank.reason(), None);
        assert_eq!(ServiceError::Malformed("x".into()).reason(), None);
    }

    #[test]
    fn transport_errors_carry_no_reason() {
        let err = ServiceError::Transport("connection refused".into());
        assert!(err.is_transport());
        assert_eq!(err.reason(), None);
    }

    #[test]
    fn display_includes_status() {
        let err = ServiceError::Rejected {
            status: Some(503),
            reason: None,
        };
        assert_eq!(err.to_string(), "Service rejected request (503)");
    }
}
