//! Error types used by the emitter and its handlers.
//!
//! This module defines two error enums:
//!
//! - [`HandlerError`]: a failure reported by a single handler invocation.
//! - [`EmitError`]: the outcome of an [`Emitter::emit`](crate::Emitter::emit) call that did not complete cleanly.
//!
//! Every other registry operation (subscribe, unsubscribe, clear, count) is infallible:
//! when there is nothing to do it is a silent no-op.
//!
//! Both enums provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// Boxed, thread-safe error produced by user code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced by handlers.
///
/// Handlers are closures or [`Listen`](crate::Listen) implementations. A handler
/// that returns `Err` is reported through this type; panics are **not** caught.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Handler returned an error.
    #[error("handler failed: {source}")]
    Failed {
        /// The underlying error returned by the handler.
        source: BoxError,
    },
}

impl HandlerError {
    /// Wraps any error (or message) returned by a handler.
    ///
    /// # Example
    /// ```
    /// use eventvisor::HandlerError;
    ///
    /// let err = HandlerError::new("disk full");
    /// assert_eq!(err.to_string(), "handler failed: disk full");
    /// ```
    pub fn new(error: impl Into<BoxError>) -> Self {
        HandlerError::Failed {
            source: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failed { .. } => "handler_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Failed { source } => format!("error: {source}"),
        }
    }
}

/// # Errors produced by a single emit call.
///
/// With [`ErrorPolicy::FailFast`](crate::ErrorPolicy::FailFast) (default) the first
/// failing handler aborts dispatch and is reported as [`EmitError::Handler`].
/// With [`ErrorPolicy::Collect`](crate::ErrorPolicy::Collect) every handler runs and
/// all failures are returned together as [`EmitError::Aggregate`].
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EmitError {
    /// A handler failed; handlers registered after it were not invoked.
    #[error("handler #{position} for event {event:?} failed: {source}")]
    Handler {
        /// Event name that was being emitted.
        event: String,
        /// Zero-based position of the failing handler in the dispatch snapshot.
        position: usize,
        /// The handler's error.
        #[source]
        source: HandlerError,
    },

    /// One or more handlers failed; every handler was invoked.
    #[error("{} handler(s) for event {event:?} failed", .failures.len())]
    Aggregate {
        /// Event name that was being emitted.
        event: String,
        /// `(position, error)` for each failing handler, in dispatch order.
        failures: Vec<(usize, HandlerError)>,
    },

    /// A listener was registered under the same name with a different payload type.
    ///
    /// Happens only when two [`Event`](crate::Event) types share one `NAME`.
    #[error("event {event:?} emitted with payload {found}, but a listener expects {expected}")]
    PayloadMismatch {
        /// Event name that was being emitted.
        event: String,
        /// Payload type expected by the registered listener.
        expected: &'static str,
        /// Payload type of the emitted value.
        found: &'static str,
    },
}

impl EmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::{EmitError, HandlerError};
    ///
    /// let err = EmitError::Handler {
    ///     event: "ping".into(),
    ///     position: 0,
    ///     source: HandlerError::new("boom"),
    /// };
    /// assert_eq!(err.as_label(), "emit_handler_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitError::Handler { .. } => "emit_handler_failed",
            EmitError::Aggregate { .. } => "emit_handlers_failed",
            EmitError::PayloadMismatch { .. } => "emit_payload_mismatch",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitError::Handler {
                event,
                position,
                source,
            } => format!("event={event} handler={position} {}", source.as_message()),
            EmitError::Aggregate { event, failures } => {
                let positions: Vec<usize> = failures.iter().map(|(pos, _)| *pos).collect();
                format!("event={event} failed_handlers={positions:?}")
            }
            EmitError::PayloadMismatch {
                event,
                expected,
                found,
            } => format!("event={event} expected={expected} found={found}"),
        }
    }

    /// Name of the event whose dispatch failed.
    pub fn event(&self) -> &str {
        match self {
            EmitError::Handler { event, .. }
            | EmitError::Aggregate { event, .. }
            | EmitError::PayloadMismatch { event, .. } => event,
        }
    }

    /// Number of handlers that reported an error.
    pub fn failure_count(&self) -> usize {
        match self {
            EmitError::Handler { .. } => 1,
            EmitError::Aggregate { failures, .. } => failures.len(),
            EmitError::PayloadMismatch { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_error_wraps_message() {
        let err = HandlerError::new("boom");
        assert_eq!(err.as_label(), "handler_failed");
        assert_eq!(err.as_message(), "error: boom");
    }

    #[test]
    fn aggregate_reports_positions() {
        let err = EmitError::Aggregate {
            event: "tick".into(),
            failures: vec![(1, HandlerError::new("a")), (3, HandlerError::new("b"))],
        };
        assert_eq!(err.failure_count(), 2);
        assert_eq!(err.event(), "tick");
        assert_eq!(err.as_message(), "event=tick failed_handlers=[1, 3]");
        assert_eq!(err.to_string(), "2 handler(s) for event \"tick\" failed");
    }

    #[test]
    fn handler_variant_exposes_source() {
        use std::error::Error as _;

        let err = EmitError::Handler {
            event: "ping".into(),
            position: 2,
            source: HandlerError::new("nope"),
        };
        assert!(err.source().is_some());
        assert_eq!(err.failure_count(), 1);
    }
}
