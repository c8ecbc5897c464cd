//! # Example: async_stream
//!
//! Bridges synchronous dispatch into async code with [`EventStream`].
//!
//! ## Flow
//! ```text
//! blocking producer ── emit::<Progress>(&pct) ──► forwarding handler ──► EventStream
//!                                                                          │
//!                                               async consumer ◄── next().await
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example async_stream
//! ```

use std::time::Duration;

use eventvisor::{event, Emitter};
use futures::StreamExt;

event!(Progress => "progress", u8);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let emitter = Emitter::new();
    let (mut stream, sub) = emitter.stream::<Progress>();

    let producer = emitter.clone();
    let worker = tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        for pct in (0..=100).step_by(25) {
            producer.emit::<Progress>(&pct)?;
            std::thread::sleep(Duration::from_millis(100));
        }
        Ok(())
    });

    while let Some(pct) = stream.next().await {
        println!("[progress] {pct}%");
        if pct == 100 {
            break;
        }
    }

    worker.await??;
    sub.unsubscribe();
    Ok(())
}
