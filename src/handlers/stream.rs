//! # Async bridge (`EventStream`)
//!
//! Dispatch is synchronous, but consumers often live in async code. An
//! [`EventStream`] is fed by a forwarding handler that clones every payload into
//! an unbounded [`tokio::sync::mpsc`] channel; the receiving side implements
//! [`futures::Stream`].
//!
//! ```text
//! emit(&p) ──► forwarding handler ──► tx.send(p.clone()) ──► EventStream::next().await
//!               (sync, non-blocking)      (unbounded)
//! ```
//!
//! ## Rules
//! - **Non-blocking**: forwarding never waits; the channel is unbounded.
//! - **Termination**: the stream ends once the forwarding handler is dropped
//!   (its [`Subscription`](crate::Subscription) is cancelled or the event is cleared)
//!   and buffered payloads are drained.
//! - **Dropped stream**: forwarding becomes a no-op; it is not an emit error.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::handlers::Handler;

/// Stream of payloads forwarded from an emitter.
#[derive(Debug)]
pub struct EventStream<P> {
    rx: mpsc::UnboundedReceiver<P>,
}

impl<P> EventStream<P> {
    /// Receives the next payload.
    ///
    /// Returns `None` once the forwarding handler is gone and the buffer is empty.
    pub async fn recv(&mut self) -> Option<P> {
        self.rx.recv().await
    }

    /// Returns a buffered payload without waiting, if any.
    pub fn try_recv(&mut self) -> Option<P> {
        self.rx.try_recv().ok()
    }

    /// Number of payloads buffered and not yet received.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Returns `true` if no payloads are buffered.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl<P> Stream for EventStream<P> {
    type Item = P;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<P>> {
        self.rx.poll_recv(cx)
    }
}

/// Creates a forwarding handler and the stream it feeds.
pub(crate) fn channel<P>() -> (Handler<P>, EventStream<P>)
where
    P: Clone + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<P>();
    let handler = Handler::named("EventStream", move |payload: &P| {
        if tx.send(payload.clone()).is_err() {
            tracing::trace!("event stream dropped; payload discarded");
        }
    });
    (handler, EventStream { rx })
}
