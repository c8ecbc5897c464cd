//! # Emitter configuration.
//!
//! Provides [`EmitterConfig`], the settings shared by every clone of one
//! [`Emitter`](crate::Emitter).
//!
//! Config is used in two ways:
//! 1. **Direct**: `Emitter::with_config(config)`
//! 2. **Builder**: `Emitter::builder().with_config(config).build()`
//!
//! ## Sentinel values
//! - `warn_threshold = 0` → disabled (no listener-leak warning)

/// How `emit` reacts to a handler returning `Err`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first failing handler and return its error (default).
    ///
    /// Handlers registered after the failing one are not invoked for that emit.
    #[default]
    FailFast,
    /// Invoke every handler, then return all failures together.
    Collect,
}

/// Configuration for an emitter instance.
///
/// ## Field semantics
/// - `error_policy`: handler failure propagation (see [`ErrorPolicy`])
/// - `warn_threshold`: listener count per event above which a warning is logged (`0` = off)
#[derive(Clone, Debug, Default)]
pub struct EmitterConfig {
    /// Handler failure propagation policy.
    pub error_policy: ErrorPolicy,

    /// Listener count per event that, once exceeded, logs a `tracing` warning.
    ///
    /// - `0` = disabled
    /// - `n > 0` = warn when an event's listener count goes from `n` to `n + 1`
    ///
    /// Useful to spot handlers that are subscribed repeatedly and never removed.
    pub warn_threshold: usize,
}

impl EmitterConfig {
    /// Returns the listener warning threshold as an `Option`.
    ///
    /// - `None` → warnings disabled
    /// - `Some(n)` → warn when more than `n` listeners are registered for one event
    #[inline]
    pub fn listener_warning(&self) -> Option<usize> {
        if self.warn_threshold == 0 {
            None
        } else {
            Some(self.warn_threshold)
        }
    }

    /// Returns `true` if a listener count of `count` has just crossed the threshold.
    ///
    /// Only the step from `n` to `n + 1` counts, so one leak logs one warning.
    #[inline]
    pub fn crosses_threshold(&self, count: usize) -> bool {
        self.listener_warning().is_some_and(|limit| count == limit + 1)
    }

    /// Returns `true` if dispatch stops at the first failing handler.
    #[inline]
    pub fn fail_fast(&self) -> bool {
        self.error_policy == ErrorPolicy::FailFast
    }
}
