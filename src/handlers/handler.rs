//! # Identity-compared handler (`Handler<P>`)
//!
//! [`Handler`] wraps a callable `Fn(&P) -> R` behind an `Arc`. Clones share the
//! same allocation and therefore the same **identity**; this is what
//! [`Emitter::unsubscribe`](crate::Emitter::unsubscribe) compares.
//!
//! ## Identity rules
//! - `h.clone()` is the same handler as `h`.
//! - Two handlers built from identical closures are **different** handlers.
//! - A handler built from a [`Listen`] implementation is identified by the
//!   listener's `Arc`, so every `Handler::from_listener(l.clone())` is the same handler.
//!
//! ## Example
//! ```rust
//! use eventvisor::Handler;
//!
//! let a = Handler::new(|n: &u32| println!("got {n}"));
//! let b = a.clone();
//! let c = Handler::new(|n: &u32| println!("got {n}"));
//!
//! assert!(a.same(&b));
//! assert!(!a.same(&c));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, HandlerError};
use crate::handlers::Listen;

/// Type-erased handler callable.
pub(crate) type HandlerFn<P> = dyn Fn(&P) -> Result<(), HandlerError> + Send + Sync;

/// Values a handler closure may return.
///
/// Closures can return `()` (infallible) or `Result<(), E>` for any `E` that
/// converts into a boxed error (`&str`, `String`, any `std::error::Error`).
pub trait HandlerOutput {
    /// Converts the closure's return value into the dispatcher's result type.
    fn into_result(self) -> Result<(), HandlerError>;
}

impl HandlerOutput for () {
    #[inline]
    fn into_result(self) -> Result<(), HandlerError> {
        Ok(())
    }
}

impl<E> HandlerOutput for Result<(), E>
where
    E: Into<BoxError>,
{
    #[inline]
    fn into_result(self) -> Result<(), HandlerError> {
        self.map_err(HandlerError::new)
    }
}

/// Shared, identity-compared callable receiving a payload of type `P`.
pub struct Handler<P: 'static> {
    f: Arc<HandlerFn<P>>,
    identity: usize,
    name: Cow<'static, str>,
}

impl<P: 'static> Handler<P> {
    /// Wraps a closure.
    ///
    /// The handler name (used in logs) defaults to the closure's type name.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&P) -> R + Send + Sync + 'static,
        R: HandlerOutput,
    {
        Self::named(std::any::type_name::<F>(), f)
    }

    /// Wraps a closure with an explicit name for logs.
    pub fn named<F, R>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&P) -> R + Send + Sync + 'static,
        R: HandlerOutput,
    {
        let f: Arc<HandlerFn<P>> = Arc::new(move |payload: &P| f(payload).into_result());
        let identity = Arc::as_ptr(&f) as *const () as usize;
        Self {
            f,
            identity,
            name: name.into(),
        }
    }

    /// Adapts a [`Listen`] implementation.
    ///
    /// Identity follows the listener `Arc`: adapting the same listener twice
    /// yields handlers that compare as the same.
    pub fn from_listener<L>(listener: Arc<L>) -> Self
    where
        L: Listen<P>,
    {
        let identity = Arc::as_ptr(&listener) as *const () as usize;
        let name = listener.name();
        let f: Arc<HandlerFn<P>> = Arc::new(move |payload: &P| listener.on_event(payload));
        Self {
            f,
            identity,
            name: Cow::Borrowed(name),
        }
    }

    /// Invokes the handler with `payload`.
    #[inline]
    pub fn call(&self, payload: &P) -> Result<(), HandlerError> {
        (self.f)(payload)
    }

    /// Returns `true` if both values refer to the same handler.
    #[inline]
    pub fn same(&self, other: &Handler<P>) -> bool {
        self.identity == other.identity
    }

    /// Human-readable name (for logs).
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub(crate) fn identity(&self) -> usize {
        self.identity
    }
}

impl<P: 'static> Clone for Handler<P> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
            identity: self.identity,
            name: self.name.clone(),
        }
    }
}

impl<P: 'static> fmt::Debug for Handler<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("identity", &format_args!("{:#x}", self.identity))
            .finish()
    }
}
