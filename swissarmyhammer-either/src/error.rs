//! Error types for swissarmyhammer-either

use std::any::Any;
use std::panic;

/// A panic captured by [`catch_call`](crate::catch_call) or
/// [`catch_call_async`](crate::catch_call_async)
///
/// The payload is whatever the panicking code passed to `panic!`; its shape
/// is unknown to the chain. The message is extracted when the payload is a
/// string, which covers `panic!("...")` with or without format arguments.
///
/// `Fault` is `Send` but not `Sync`: a panic payload is a
/// `Box<dyn Any + Send>`. It boxes as `Box<dyn Error + Send>`, not as the
/// `Box<dyn Error + Send + Sync>` most error stacks expect. To cross into one
/// of those, convert through the message, e.g.
/// `Box::<dyn Error + Send + Sync>::from(fault.message())`.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Fault {
    message: String,
    payload: Box<dyn Any + Send>,
}

impl Fault {
    /// Message used when the payload is not a string
    pub const UNKNOWN: &'static str = "unknown fault";

    /// Create a fault carrying a message as its payload
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            payload: Box::new(message.clone()),
            message,
        }
    }

    /// Wrap a payload caught from an unwinding panic
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            Self::UNKNOWN.to_string()
        };
        Self { message, payload }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Borrow the payload as a concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }

    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Continue unwinding with the original payload
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }
}
