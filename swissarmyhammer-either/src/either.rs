//! Immediate result container
//!
//! An [`Either`] is settled at construction: it holds a success value or an
//! error payload, never both. Every chaining operation consumes the container
//! and hands back the next one. Operations aimed at the channel the container
//! is not on move it through untouched.

use std::future::Future;

use futures::future;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Chain, EitherAsync, IntoStep};

/// A settled result: a success value or an error payload
///
/// Serializes as `{"type": "success", "value": ...}` or
/// `{"type": "error", "value": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Either<E, S> {
    /// The computation succeeded
    Success(S),
    /// The computation failed
    Error(E),
}

impl<E, S> Either<E, S> {
    /// Create a result in success state
    pub fn success(value: S) -> Self {
        Self::Success(value)
    }

    /// Create a result in error state
    pub fn error(error: E) -> Self {
        Self::Error(error)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Borrow the success value, if any
    pub fn success_ref(&self) -> Option<&S> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    /// Borrow the error payload, if any
    pub fn error_ref(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Error(error) => Some(error),
        }
    }

    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<S, E> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error(error) => Err(error),
        }
    }

    /// Transform the success value, if any.
    pub fn on_success<S2, F>(self, f: F) -> Either<E, S2>
    where
        F: FnOnce(S) -> S2,
    {
        match self {
            Self::Success(value) => Either::Success(f(value)),
            Self::Error(error) => {
                trace!(channel = "error", "skipping success transform");
                Either::Error(error)
            }
        }
    }

    /// Transform the success value into another result and flatten it.
    ///
    /// The returned result becomes the chain state. If the transform returns
    /// an [`EitherAsync`] the chain is deferred from here on, which is why
    /// this returns a [`Chain`] rather than an `Either`.
    ///
    /// ```
    /// use swissarmyhammer_either::{error, success, Either};
    ///
    /// let half = |x: i32| -> Either<String, i32> {
    ///     if x % 2 == 0 { success(x / 2) } else { error(format!("{x} is odd")) }
    /// };
    ///
    /// let even = success(8).on_success_then(half).resolve(0);
    /// assert_eq!(even.into_ready(), Some(4));
    ///
    /// let odd = success(7).on_success_then(half).resolve_with(|e| e.len() as i32);
    /// assert_eq!(odd.into_ready(), Some(8));
    /// ```
    pub fn on_success_then<S2, F, R>(self, f: F) -> Chain<E, S2>
    where
        F: FnOnce(S) -> R,
        R: IntoStep<E, S2>,
    {
        match self {
            Self::Success(value) => f(value).into_step().into_chain(),
            Self::Error(error) => {
                trace!(channel = "error", "skipping success transform");
                Chain::Immediate(Either::Error(error))
            }
        }
    }

    /// Run a side effect on the success value without changing it.
    pub fn tap_success<F>(self, f: F) -> Self
    where
        F: FnOnce(&S),
    {
        if let Self::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Transform the success value with an async function.
    ///
    /// `f` runs right away; only the future it returns is deferred.
    pub fn on_success_async<S2, F, Fut>(self, f: F) -> EitherAsync<E, S2>
    where
        F: FnOnce(S) -> Fut,
        Fut: Future<Output = S2> + Send + 'static,
        E: Send + 'static,
        S2: Send + 'static,
    {
        match self {
            Self::Success(value) => {
                let pending = f(value);
                EitherAsync::new(async move { Either::Success(pending.await) })
            }
            Self::Error(error) => {
                trace!(channel = "error", "skipping async success transform");
                EitherAsync::ready(Either::Error(error))
            }
        }
    }

    /// Async flavour of [`Either::on_success_then`].
    ///
    /// A deferred result produced by the awaited value is awaited as well, so
    /// the outcome is always a single pending resolution.
    pub fn on_success_then_async<S2, F, Fut, R>(self, f: F) -> EitherAsync<E, S2>
    where
        F: FnOnce(S) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoStep<E, S2>,
        E: Send + 'static,
        S2: Send + 'static,
    {
        match self {
            Self::Success(value) => {
                let pending = f(value);
                EitherAsync::new(async move {
                    let step = pending.await.into_step();
                    step.settle().await
                })
            }
            Self::Error(error) => {
                trace!(channel = "error", "skipping async success transform");
                EitherAsync::ready(Either::Error(error))
            }
        }
    }

    /// Run an async side effect on the success value without changing it.
    ///
    /// The future returned by `f` must own what it needs; copy out of the
    /// borrowed value before going async.
    pub fn tap_success_async<F, Fut>(self, f: F) -> EitherAsync<E, S>
    where
        F: FnOnce(&S) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
        E: Send + 'static,
        S: Send + 'static,
    {
        match self {
            Self::Success(value) => {
                let pending = f(&value);
                EitherAsync::new(async move {
                    pending.await;
                    Either::Success(value)
                })
            }
            error => EitherAsync::ready(error),
        }
    }

    /// Replace the error payload, if any.
    pub fn on_error<E2, F>(self, f: F) -> Either<E2, S>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Success(value) => {
                trace!(channel = "success", "skipping error transform");
                Either::Success(value)
            }
            Self::Error(error) => Either::Error(f(error)),
        }
    }

    /// Run a side effect on the error payload without changing it.
    pub fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Self::Error(error) = &self {
            f(error);
        }
        self
    }

    /// Replace the error payload with the output of an async function.
    pub fn on_error_async<E2, F, Fut>(self, f: F) -> EitherAsync<E2, S>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = E2> + Send + 'static,
        E2: Send + 'static,
        S: Send + 'static,
    {
        match self {
            Self::Success(value) => {
                trace!(channel = "success", "skipping async error transform");
                EitherAsync::ready(Either::Success(value))
            }
            Self::Error(error) => {
                let pending = f(error);
                EitherAsync::new(async move { Either::Error(pending.await) })
            }
        }
    }

    /// Run an async side effect on the error payload without changing it.
    pub fn tap_error_async<F, Fut>(self, f: F) -> EitherAsync<E, S>
    where
        F: FnOnce(&E) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
        E: Send + 'static,
        S: Send + 'static,
    {
        match self {
            Self::Error(error) => {
                let pending = f(&error);
                EitherAsync::new(async move {
                    pending.await;
                    Either::Error(error)
                })
            }
            success => EitherAsync::ready(success),
        }
    }

    /// Get the success value, or `fallback` when in error state.
    pub fn resolve(self, fallback: S) -> S {
        match self {
            Self::Success(value) => value,
            Self::Error(_) => fallback,
        }
    }

    /// Get the success value, or derive one from the error.
    pub fn resolve_with<F>(self, f: F) -> S
    where
        F: FnOnce(E) -> S,
    {
        match self {
            Self::Success(value) => value,
            Self::Error(error) => f(error),
        }
    }

    /// Get the success value, or derive one from the error with an async
    /// function.
    ///
    /// The fallback is invoked right away when in error state; only its
    /// future is awaited later. A success value comes back as a ready future.
    pub fn resolve_with_async<F, Fut>(self, f: F) -> impl Future<Output = S> + Send + 'static
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = S> + Send + 'static,
        S: Send + 'static,
    {
        match self {
            Self::Success(value) => future::Either::Left(future::ready(value)),
            Self::Error(error) => future::Either::Right(f(error)),
        }
    }
}

impl<E, S> From<Result<S, E>> for Either<E, S> {
    fn from(result: Result<S, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Error(error),
        }
    }
}

impl<E, S> From<Either<E, S>> for Result<S, E> {
    fn from(either: Either<E, S>) -> Self {
        either.into_result()
    }
}
