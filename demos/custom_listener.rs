//! # Custom Listener Example
//!
//! Shows how to implement a struct-based listener that keeps metrics, next to
//! the built-in [`LogWriter`].
//!
//! The example counts:
//! - Total orders
//! - Total amount
//! - Rejected orders
//!
//! ## Run
//! ```bash
//! cargo run --example custom_listener --features logging
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eventvisor::{event, Emitter, ErrorPolicy, HandlerError, Listen, LogWriter};

#[derive(Debug, Clone)]
struct Order {
    id: u64,
    cents: u64,
}

event!(OrderPlaced => "order.placed", Order);

#[derive(Default)]
struct OrderMetrics {
    orders: AtomicU64,
    cents: AtomicU64,
    rejected: AtomicU64,
}

impl OrderMetrics {
    fn print_stats(&self) {
        println!();
        println!("Metrics:");
        println!(" ├─► Orders:   {}", self.orders.load(Ordering::Relaxed));
        println!(" ├─► Amount:   {}", self.cents.load(Ordering::Relaxed));
        println!(" └─► Rejected: {}", self.rejected.load(Ordering::Relaxed));
    }
}

impl Listen<Order> for OrderMetrics {
    fn on_event(&self, order: &Order) -> Result<(), HandlerError> {
        if order.cents == 0 {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return Err(HandlerError::new(format!("order {} has no amount", order.id)));
        }
        self.orders.fetch_add(1, Ordering::Relaxed);
        self.cents.fetch_add(order.cents, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "order-metrics"
    }
}

fn main() {
    // Collect: the logger still runs when metrics reject an order.
    let emitter = Emitter::builder()
        .with_error_policy(ErrorPolicy::Collect)
        .build();

    let metrics = Arc::new(OrderMetrics::default());
    let _metrics = emitter.subscribe_listener::<OrderPlaced, _>(Arc::clone(&metrics));
    let _log = emitter
        .subscribe_listener::<OrderPlaced, _>(Arc::new(LogWriter::for_event::<OrderPlaced>()));

    for (id, cents) in [(1, 1999), (2, 0), (3, 500)] {
        if let Err(err) = emitter.emit::<OrderPlaced>(&Order { id, cents }) {
            println!("[error] {}", err.as_message());
        }
    }

    metrics.print_stats();
    emitter.unsubscribe_listener::<OrderPlaced, _>(&metrics);
}
