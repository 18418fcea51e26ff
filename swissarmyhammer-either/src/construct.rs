//! Construction helpers
//!
//! The only places where a fault becomes an error payload. Chaining
//! operations never catch: a panic inside a transform unwinds out of the
//! chain.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use tracing::debug;

use crate::{Either, EitherAsync, Fault};

/// Create a result in success state
pub fn success<E, S>(value: S) -> Either<E, S> {
    Either::Success(value)
}

/// Create a result in error state
pub fn error<E, S>(error: E) -> Either<E, S> {
    Either::Error(error)
}

/// Run a fallible function, turning its `Err` into the error payload.
pub fn try_call<E, S, F>(f: F) -> Either<E, S>
where
    F: FnOnce() -> Result<S, E>,
{
    f().into()
}

/// Run a fallible async function, turning its `Err` into the error payload.
pub fn try_call_async<E, S, F, Fut>(f: F) -> EitherAsync<E, S>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<S, E>> + Send + 'static,
    E: Send + 'static,
    S: Send + 'static,
{
    let pending = f();
    EitherAsync::new(pending.map(Either::from))
}

/// Run a function that may panic, capturing the panic as a [`Fault`].
///
/// ```
/// use swissarmyhammer_either::catch_call;
///
/// let caught = catch_call(|| -> i32 { panic!("boom") });
/// assert_eq!(caught.resolve_with(|fault| fault.message().len() as i32), 4);
///
/// assert_eq!(catch_call(|| 42).resolve(0), 42);
/// ```
pub fn catch_call<S, F>(f: F) -> Either<Fault, S>
where
    F: FnOnce() -> S,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Either::Success(value),
        Err(payload) => Either::Error(captured(payload)),
    }
}

/// Run an async function that may panic, capturing the panic as a [`Fault`].
///
/// A panic while creating the future and a panic while polling it are both
/// captured.
pub fn catch_call_async<S, F, Fut>(f: F) -> EitherAsync<Fault, S>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = S> + Send + 'static,
    S: Send + 'static,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(pending) => EitherAsync::new(AssertUnwindSafe(pending).catch_unwind().map(
            |outcome| match outcome {
                Ok(value) => Either::Success(value),
                Err(payload) => Either::Error(captured(payload)),
            },
        )),
        Err(payload) => EitherAsync::error(captured(payload)),
    }
}

fn captured(payload: Box<dyn std::any::Any + Send>) -> Fault {
    let fault = Fault::from_panic(payload);
    debug!(fault = %fault, "captured fault as error payload");
    fault
}
