//! # Statically declared events.
//!
//! An event is a zero-sized marker type implementing [`Event`]. The trait binds a
//! stable name (the registry key) to the payload type delivered to handlers:
//!
//! ```text
//! Ping      ──► NAME = "ping"      Payload = u32
//! Shutdown  ──► NAME = "shutdown"  Payload = ()
//! ```
//!
//! The mapping is a compile-time concern only: the registry stores handlers by
//! [`EventName`] and never inspects payloads. `emit::<Ping>(&"oops")` does not compile.
//!
//! ## Example
//! ```rust
//! use eventvisor::{event, Event};
//!
//! event!(pub Ping => "ping", u32);
//! event!(pub Shutdown => "shutdown");
//!
//! assert_eq!(Ping::NAME, "ping");
//! assert_eq!(Shutdown::name().as_str(), "shutdown");
//! ```

use std::borrow::{Borrow, Cow};
use std::fmt;

/// Compile-time binding of an event name to its payload type.
///
/// Implement it on a marker type, by hand or with [`event!`](crate::event).
/// Events that carry no value use `()` as their payload.
pub trait Event: 'static {
    /// Stable event name used as the registry key.
    const NAME: &'static str;

    /// Value passed (by reference) to every handler of this event.
    type Payload: Send + Sync + 'static;

    /// Returns [`Self::NAME`] as an [`EventName`].
    #[inline]
    fn name() -> EventName {
        EventName::from_static(Self::NAME)
    }
}

/// Opaque event identifier; the key space of the registry.
///
/// Compared by string equality only. Cheap to clone for `'static` names.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventName(Cow<'static, str>);

impl EventName {
    /// Creates a name from a `'static` string without allocating.
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a name from any string-like value.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&'static str> for EventName {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// Declares a marker type implementing [`Event`].
///
/// ```rust
/// use eventvisor::event;
///
/// event!(pub UserCreated => "user.created", String);
/// event!(Tick => "tick");
/// ```
///
/// The first form binds a payload type; the second declares a payload-less
/// event (`Payload = ()`).
#[macro_export]
macro_rules! event {
    ($(#[$meta:meta])* $vis:vis $ty:ident => $name:literal, $payload:ty $(,)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $ty;

        impl $crate::Event for $ty {
            const NAME: &'static str = $name;
            type Payload = $payload;
        }
    };
    ($(#[$meta:meta])* $vis:vis $ty:ident => $name:literal $(,)?) => {
        $crate::event!($(#[$meta])* $vis $ty => $name, ());
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::event!(Ping => "ping", u32);
    crate::event!(Quiet => "quiet");

    #[test]
    fn macro_binds_name_and_payload() {
        fn payload_of<E: Event>(_: &E::Payload) -> &'static str {
            E::NAME
        }
        assert_eq!(payload_of::<Ping>(&7), "ping");
        assert_eq!(payload_of::<Quiet>(&()), "quiet");
    }

    #[test]
    fn names_compare_by_value() {
        assert_eq!(Ping::name(), EventName::from(String::from("ping")));
        assert_ne!(Ping::name(), Quiet::name());
    }

    #[test]
    fn name_formats_like_a_string() {
        let name = EventName::new("user.created");
        assert_eq!(name.to_string(), "user.created");
        assert_eq!(format!("{name:?}"), "\"user.created\"");
    }
}
