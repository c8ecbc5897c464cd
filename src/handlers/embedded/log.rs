//! # LogWriter: simple payload printer
//!
//! A minimal listener that prints every payload of one event to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [emit] event="user.created" payload="ada"
//! [emit] event="tick" payload=()
//! [emit] event="bytes" payload=512
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use eventvisor::{event, Emitter, LogWriter};
//!
//! event!(Tick => "tick", u64);
//!
//! let emitter = Emitter::new();
//! let _sub = emitter.subscribe_listener::<Tick, _>(Arc::new(LogWriter::for_event::<Tick>()));
//! emitter.emit::<Tick>(&1).unwrap(); // prints: [emit] event="tick" payload=1
//! ```

use std::fmt::Debug;

use crate::error::HandlerError;
use crate::events::{Event, EventName};
use crate::handlers::Listen;

/// Payload writer listener.
#[derive(Debug, Clone)]
pub struct LogWriter {
    event: EventName,
}

impl LogWriter {
    /// Construct a writer labelled with an arbitrary event name.
    #[must_use]
    pub fn new(event: impl Into<EventName>) -> Self {
        Self {
            event: event.into(),
        }
    }

    /// Construct a writer labelled with `E::NAME`.
    #[must_use]
    pub fn for_event<E: Event>() -> Self {
        Self { event: E::name() }
    }

    /// Formats one line the way [`Listen::on_event`] prints it.
    pub fn format<P: Debug>(&self, payload: &P) -> String {
        format!("[emit] event={:?} payload={payload:?}", self.event)
    }
}

impl<P> Listen<P> for LogWriter
where
    P: Debug,
{
    fn on_event(&self, payload: &P) -> Result<(), HandlerError> {
        println!("{}", self.format(payload));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
