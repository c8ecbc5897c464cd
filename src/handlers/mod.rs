//! # Handlers invoked by the emitter.
//!
//! This module provides the [`Handler`] type stored in the registry, the
//! [`Listen`] trait for struct-based listeners, and built-in implementations.
//!
//! ## Architecture
//! ```text
//! emit::<E>(&payload)
//!     │
//!     └──► snapshot of E's handlers (registration order)
//!              │
//!              ├──► Handler::call(&payload) ── closure `Fn(&P) -> R`
//!              ├──► Handler::call(&payload) ── Listen::on_event (LogWriter, custom, ...)
//!              └──► Handler::call(&payload) ── EventStream forwarder ──► async consumer
//! ```
//!
//! ## Handler kinds
//! - **Closures**: any `Fn(&P) -> R` where `R` is `()` or `Result<(), E>`
//! - **Listeners**: shared structs implementing [`Listen`]
//! - **Streams**: [`EventStream`] receivers fed by a forwarding handler

#[cfg(feature = "logging")]
mod embedded;
mod handler;
mod listen;
mod stream;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use handler::{Handler, HandlerOutput};
pub use listen::Listen;
pub(crate) use stream::channel;
pub use stream::EventStream;
