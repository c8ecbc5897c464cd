//! Registry core: storage, dispatch and subscription handles.
//!
//! The public API from this module is [`Emitter`] and the types it hands out.
//!
//! Internal modules:
//! - [`registry`]: event name → ordered handler entries (pure data);
//! - [`emitter`]: locking, snapshot dispatch, failure policy, logging;
//! - [`subscription`]: per-registration removal handles;
//! - [`config`] / [`builder`]: emitter settings.
//!
//! ```text
//! Emitter (Clone) ──► Arc<Shared> ──► RwLock<Registry>
//!                                          ▲
//! Subscription ──► Weak<Shared> ───────────┘
//! ```

mod builder;
mod config;
mod emitter;
mod registry;
mod subscription;

pub use builder::EmitterBuilder;
pub use config::{EmitterConfig, ErrorPolicy};
pub use emitter::Emitter;
pub use subscription::{Subscription, SubscriptionGuard};
