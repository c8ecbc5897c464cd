//! # Built-in handlers
//!
//! Small, self-contained listeners useful for demos and debugging.
//!
//! - [`LogWriter`]: prints payloads in a human-readable form (demo/debug).

mod log;

pub use log::LogWriter;
