//! # Example: one_shot
//!
//! One-shot handlers and fail-fast error propagation.
//!
//! ## Flow
//! ```text
//! once::<Ready>(init)          ─► fires on the first notify only
//! on::<Request>(validate)      ─► returns Err for empty requests
//! on::<Request>(process)       ─► skipped when validate fails
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example one_shot
//! ```

use eventvisor::{event, EmitError, Emitter, Handler};

event!(Ready => "ready");
event!(Request => "request", String);

fn main() -> anyhow::Result<()> {
    let emitter = Emitter::new();

    let _init = emitter.once::<Ready>(Handler::new(|_: &()| println!("[ready] initialised")));
    for _ in 0..3 {
        // Only the first notify reaches the handler.
        emitter.notify::<Ready>()?;
    }
    println!("ready listeners left: {}", emitter.listener_count::<Ready>());

    let _validate = emitter.on::<Request, _, _>(|body| {
        if body.is_empty() {
            return Err("empty request");
        }
        Ok(())
    });
    let _process = emitter.on::<Request, _, _>(|body| println!("[process] {body}"));

    for body in ["GET /", ""] {
        match emitter.emit::<Request>(&body.to_string()) {
            Ok(()) => {}
            Err(err @ EmitError::Handler { .. }) => {
                println!("[error] {} ({})", err, err.as_label());
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
