//! Deferred result container
//!
//! An [`EitherAsync`] owns one pending computation that settles into an
//! [`Either`]. Each operation awaits the inner result, delegates to the
//! matching [`Either`] operation and re-wraps the outcome, so a deferred chain
//! is always "one pending `Either`", never a pending result of a pending
//! result. Nothing runs until the final future is polled.

use std::fmt;
use std::future::{Future, IntoFuture};

use futures::future::{self, BoxFuture};
use futures::FutureExt;

use crate::{Either, IntoStep};

/// A result that settles once its pending computation completes
///
/// The state is never readable synchronously. Await the container itself to
/// get the settled [`Either`] (for example to observe taps without
/// discarding the result), or use one of the `resolve*` operations.
#[must_use = "a deferred result does nothing unless awaited"]
pub struct EitherAsync<E, S> {
    pending: BoxFuture<'static, Either<E, S>>,
}

impl<E, S> fmt::Debug for EitherAsync<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EitherAsync")
            .field("pending", &"<future>")
            .finish()
    }
}

impl<E, S> EitherAsync<E, S>
where
    E: Send + 'static,
    S: Send + 'static,
{
    /// Wrap a future that settles into an [`Either`]
    pub fn new<F>(pending: F) -> Self
    where
        F: Future<Output = Either<E, S>> + Send + 'static,
    {
        Self {
            pending: pending.boxed(),
        }
    }

    /// Wrap an already settled result
    pub fn ready(either: Either<E, S>) -> Self {
        Self::new(future::ready(either))
    }

    /// Create a deferred result that settles in success state
    pub fn success(value: S) -> Self {
        Self::ready(Either::Success(value))
    }

    /// Create a deferred result that settles in error state
    pub fn error(error: E) -> Self {
        Self::ready(Either::Error(error))
    }

    pub fn on_success<S2, F>(self, f: F) -> EitherAsync<E, S2>
    where
        F: FnOnce(S) -> S2 + Send + 'static,
        S2: Send + 'static,
    {
        let pending = self.pending;
        EitherAsync::new(async move { pending.await.on_success(f) })
    }

    /// Transform the success value into another result and flatten it.
    ///
    /// When the transform returns a deferred result it is awaited in place,
    /// keeping the chain a single pending resolution.
    pub fn on_success_then<S2, F, R>(self, f: F) -> EitherAsync<E, S2>
    where
        F: FnOnce(S) -> R + Send + 'static,
        R: IntoStep<E, S2>,
        S2: Send + 'static,
    {
        let pending = self.pending;
        EitherAsync::new(async move {
            let next = pending.await.on_success_then(f);
            next.await
        })
    }

    pub fn tap_success<F>(self, f: F) -> Self
    where
        F: FnOnce(&S) + Send + 'static,
    {
        let pending = self.pending;
        Self::new(async move { pending.await.tap_success(f) })
    }

    pub fn on_success_async<S2, F, Fut>(self, f: F) -> EitherAsync<E, S2>
    where
        F: FnOnce(S) -> Fut + Send + 'static,
        Fut: Future<Output = S2> + Send + 'static,
        S2: Send + 'static,
    {
        let pending = self.pending;
        EitherAsync::new(async move { pending.await.on_success_async(f).await })
    }

    pub fn on_success_then_async<S2, F, Fut, R>(self, f: F) -> EitherAsync<E, S2>
    where
        F: FnOnce(S) -> Fut + Send + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoStep<E, S2>,
        S2: Send + 'static,
    {
        let pending = self.pending;
        EitherAsync::new(async move { pending.await.on_success_then_async(f).await })
    }

    pub fn tap_success_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(&S) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let pending = self.pending;
        Self::new(async move { pending.await.tap_success_async(f).await })
    }

    pub fn on_error<E2, F>(self, f: F) -> EitherAsync<E2, S>
    where
        F: FnOnce(E) -> E2 + Send + 'static,
        E2: Send + 'static,
    {
        let pending = self.pending;
        EitherAsync::new(async move { pending.await.on_error(f) })
    }

    pub fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        let pending = self.pending;
        Self::new(async move { pending.await.tap_error(f) })
    }

    pub fn on_error_async<E2, F, Fut>(self, f: F) -> EitherAsync<E2, S>
    where
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = E2> + Send + 'static,
        E2: Send + 'static,
    {
        let pending = self.pending;
        EitherAsync::new(async move { pending.await.on_error_async(f).await })
    }

    pub fn tap_error_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(&E) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let pending = self.pending;
        Self::new(async move { pending.await.tap_error_async(f).await })
    }

    /// Settle and get the success value, or `fallback` when in error state.
    pub fn resolve(self, fallback: S) -> impl Future<Output = S> + Send + 'static {
        let pending = self.pending;
        async move { pending.await.resolve(fallback) }
    }

    /// Settle and get the success value, or derive one from the error.
    pub fn resolve_with<F>(self, f: F) -> impl Future<Output = S> + Send + 'static
    where
        F: FnOnce(E) -> S + Send + 'static,
    {
        let pending = self.pending;
        async move { pending.await.resolve_with(f) }
    }

    /// Settle and get the success value, or derive one from the error with
    /// an async function.
    pub fn resolve_with_async<F, Fut>(self, f: F) -> impl Future<Output = S> + Send + 'static
    where
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = S> + Send + 'static,
    {
        let pending = self.pending;
        async move {
            match pending.await {
                Either::Success(value) => value,
                Either::Error(error) => f(error).await,
            }
        }
    }
}

impl<E, S> IntoFuture for EitherAsync<E, S> {
    type Output = Either<E, S>;
    type IntoFuture = BoxFuture<'static, Either<E, S>>;

    fn into_future(self) -> Self::IntoFuture {
        self.pending
    }
}
