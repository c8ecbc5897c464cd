//! Event declarations: names and payload bindings.
//!
//! ## Contents
//! - [`Event`] compile-time mapping from an event name to its payload type
//! - [`EventName`] opaque registry key
//! - [`event!`](crate::event) declaration macro
//!
//! The registry in `core/` is payload-agnostic; everything in this module exists
//! so that the compiler rejects an emit with the wrong payload shape.

mod event;

pub use event::{Event, EventName};
