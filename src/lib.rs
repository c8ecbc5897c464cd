//! # eventvisor
//!
//! **Eventvisor** is a small, typed, in-process publish/subscribe registry.
//!
//! Producers and consumers of application events agree on an event *name* and a
//! payload *type*; the [`Emitter`] keeps the ordered list of handlers per name and
//! calls them synchronously on `emit`. There is no transport, persistence,
//! scheduling or backpressure: everything happens on the caller's thread, in
//! registration order.
//!
//! ## Architecture
//! ```text
//!   event!(Ping => "ping", u32)          compile time: name ──► payload type
//!               │
//!               ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │ Emitter (Clone, Send + Sync)                                  │
//! │  RwLock<Registry>:  "ping"  ─► [h1, h2, h1, once(h3)]         │
//! │                     "ready" ─► [h4]                           │
//! └──────┬──────────────────────────────┬─────────────────────────┘
//!        │ subscribe / once / on        │ emit::<Ping>(&42)
//!        ▼                              ▼
//!   Subscription ── unsubscribe()   snapshot ─► h1(&42) ─► h2(&42) ─► h1(&42) ─► h3(&42)
//!   (this registration only)        (registration order; once(h3) removed before call)
//! ```
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                        |
//! |-------------------|------------------------------------------------------------------|-------------------------------------------|
//! | **Events**        | Compile-time mapping of event names to payload types.            | [`Event`], [`EventName`], [`event!`]      |
//! | **Handlers**      | Identity-compared closures and struct listeners.                 | [`Handler`], [`Listen`], [`HandlerOutput`]|
//! | **Dispatch**      | Subscribe, once, unsubscribe, emit, clear, counts.               | [`Emitter`], [`Subscription`]             |
//! | **Async bridge**  | Forward payloads into async code as a `Stream`.                  | [`EventStream`]                           |
//! | **Errors**        | Fail-fast (or collected) handler failures.                       | [`EmitError`], [`HandlerError`]           |
//! | **Configuration** | Failure policy and listener leak warning.                        | [`EmitterConfig`], [`ErrorPolicy`]        |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] listener _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use eventvisor::{event, Emitter, Handler};
//!
//! event!(pub Ping => "ping", u32);
//! event!(pub Ready => "ready");
//!
//! let emitter = Emitter::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let record = Handler::new(move |n: &u32| sink.lock().unwrap().push(*n));
//!
//! let _first = emitter.subscribe::<Ping>(record.clone());
//! emitter.emit::<Ping>(&42).unwrap();
//! emitter.emit::<Ping>(&43).unwrap();
//!
//! // A second registration of the same handler, cancelled through its own handle.
//! let second = emitter.subscribe::<Ping>(record.clone());
//! second.unsubscribe();
//! emitter.emit::<Ping>(&44).unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec![42, 43, 44]);
//!
//! // One-shot handlers fire once.
//! let _once = emitter.once::<Ready>(Handler::new(|_: &()| println!("ready!")));
//! emitter.notify::<Ready>().unwrap();
//! emitter.notify::<Ready>().unwrap();
//! assert_eq!(emitter.listener_count::<Ready>(), 0);
//! ```
mod core;
mod error;
mod events;
mod handlers;

// ---- Public re-exports ----

pub use crate::core::{
    Emitter, EmitterBuilder, EmitterConfig, ErrorPolicy, Subscription, SubscriptionGuard,
};
pub use crate::error::{BoxError, EmitError, HandlerError};
pub use crate::events::{Event, EventName};
pub use crate::handlers::{EventStream, Handler, HandlerOutput, Listen};

// Optional: expose a simple built-in payload printer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use crate::handlers::LogWriter;
