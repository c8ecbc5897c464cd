//! # Example: basic
//!
//! Minimal publish/subscribe flow with two events.
//!
//! Demonstrates how to:
//! - Declare events with [`event!`].
//! - Subscribe closures and shared [`Handler`]s.
//! - Emit payloads and remove registrations.
//!
//! ## Flow
//! ```text
//! Emitter::new()
//!     ├─► subscribe::<UserCreated>(greet)
//!     ├─► subscribe::<UserCreated>(audit)
//!     ├─► emit::<UserCreated>("ada")   → greet, audit
//!     ├─► unsubscribe::<UserCreated>(&audit)
//!     ├─► emit::<UserCreated>("linus") → greet
//!     └─► notify::<Shutdown>()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use eventvisor::{event, Emitter, Handler};

event!(UserCreated => "user.created", String);
event!(Shutdown => "shutdown");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. One explicit instance, shared by clone with whoever needs it
    let emitter = Emitter::new();

    // 2. A closure subscription; keep the handle to cancel it later
    let greet = emitter.on::<UserCreated, _, _>(|name| println!("[greet] hello, {name}"));

    // 3. A shared handler: removable by identity
    let audit = Handler::named("audit", |name: &String| println!("[audit] user={name}"));
    let _audit_sub = emitter.subscribe::<UserCreated>(audit.clone());

    let _bye = emitter.on::<Shutdown, _, _>(|_| println!("[shutdown] bye"));

    emitter.emit::<UserCreated>(&"ada".to_string())?;

    emitter.unsubscribe::<UserCreated>(&audit);
    emitter.emit::<UserCreated>(&"linus".to_string())?;

    println!("listeners: {emitter:?}");
    greet.unsubscribe();
    emitter.notify::<Shutdown>()?;
    Ok(())
}
