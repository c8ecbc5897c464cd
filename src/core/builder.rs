use crate::core::{Emitter, EmitterConfig, ErrorPolicy};
use crate::events::Event;
use crate::handlers::Handler;

type Registration = Box<dyn FnOnce(&Emitter) + Send>;

/// Builder for constructing an [`Emitter`] with custom settings.
///
/// ## Example
/// ```rust
/// use eventvisor::{event, Emitter, ErrorPolicy, Handler};
///
/// event!(Audit => "audit", String);
///
/// let emitter = Emitter::builder()
///     .with_error_policy(ErrorPolicy::Collect)
///     .with_warn_threshold(64)
///     .with_handler::<Audit>(Handler::new(|line: &String| println!("{line}")))
///     .build();
///
/// assert_eq!(emitter.listener_count::<Audit>(), 1);
/// ```
pub struct EmitterBuilder {
    cfg: EmitterConfig,
    registrations: Vec<Registration>,
}

impl EmitterBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: EmitterConfig) -> Self {
        Self {
            cfg,
            registrations: Vec::new(),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: EmitterConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets how handler failures propagate out of `emit`.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.cfg.error_policy = policy;
        self
    }

    /// Sets the per-event listener count above which a warning is logged (`0` = off).
    pub fn with_warn_threshold(mut self, threshold: usize) -> Self {
        self.cfg.warn_threshold = threshold;
        self
    }

    /// Registers a handler for `E` when the emitter is built.
    ///
    /// Handlers are registered in the order they were added to the builder.
    /// Keep a clone of `handler` to remove it later with
    /// [`Emitter::unsubscribe`].
    pub fn with_handler<E: Event>(mut self, handler: Handler<E::Payload>) -> Self {
        self.registrations.push(Box::new(move |emitter: &Emitter| {
            let _ = emitter.subscribe::<E>(handler);
        }));
        self
    }

    /// Builds the emitter and applies the queued registrations.
    pub fn build(self) -> Emitter {
        let emitter = Emitter::with_config(self.cfg);
        for register in self.registrations {
            register(&emitter);
        }
        emitter
    }
}

impl Default for EmitterBuilder {
    fn default() -> Self {
        Self::new(EmitterConfig::default())
    }
}
