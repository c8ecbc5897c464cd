//! # Struct-based listeners
//!
//! `Listen` is the extension point for handlers that carry their own state
//! (counters, sinks, caches) and would be awkward as closures. Register one with
//! [`Emitter::subscribe_listener`](crate::Emitter::subscribe_listener) or adapt it
//! with [`Handler::from_listener`](crate::Handler::from_listener).
//!
//! ## Contract
//! - Called synchronously on the emitting thread, in registration order.
//! - Returning `Err` is reported to the caller of `emit` (never swallowed).
//! - Panics are not caught by the emitter.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//! use eventvisor::{event, Emitter, HandlerError, Listen};
//!
//! event!(Bytes => "bytes", u64);
//!
//! #[derive(Default)]
//! struct Total(AtomicU64);
//!
//! impl Listen<u64> for Total {
//!     fn on_event(&self, n: &u64) -> Result<(), HandlerError> {
//!         self.0.fetch_add(*n, Ordering::Relaxed);
//!         Ok(())
//!     }
//!     fn name(&self) -> &'static str { "total" }
//! }
//!
//! let emitter = Emitter::new();
//! let total = Arc::new(Total::default());
//! let _sub = emitter.subscribe_listener::<Bytes, _>(Arc::clone(&total));
//!
//! emitter.emit::<Bytes>(&512).unwrap();
//! emitter.emit::<Bytes>(&512).unwrap();
//! assert_eq!(total.0.load(Ordering::Relaxed), 1024);
//! ```

use crate::error::HandlerError;

/// Contract for struct-based event listeners.
pub trait Listen<P>: Send + Sync + 'static {
    /// Handle a single payload.
    ///
    /// # Parameters
    /// - `payload`: reference to the emitted value (does not transfer ownership)
    fn on_event(&self, payload: &P) -> Result<(), HandlerError>;

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
