//! The common interface of immediate and deferred results
//!
//! A flattening transform decides at runtime whether the chain stays
//! immediate or becomes deferred, so its caller gets a [`Chain`]. The same
//! operations are available on both variants; an immediate chain becomes
//! deferred on the first async step and never goes back.

use std::fmt;
use std::future::{Future, IntoFuture};

use futures::future::{self, BoxFuture};
use futures::FutureExt;
use tracing::debug;

use crate::{Either, EitherAsync, IntoStep};

/// A result chain that is either still immediate or already deferred
#[derive(Debug)]
pub enum Chain<E, S> {
    /// Settled; operations run synchronously
    Immediate(Either<E, S>),
    /// Pending; operations are queued behind the pending computation
    Deferred(EitherAsync<E, S>),
}

impl<E, S> Chain<E, S> {
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Get the settled result if the chain is still immediate
    pub fn into_immediate(self) -> Option<Either<E, S>> {
        match self {
            Self::Immediate(either) => Some(either),
            Self::Deferred(_) => None,
        }
    }
}

impl<E, S> Chain<E, S>
where
    E: Send + 'static,
    S: Send + 'static,
{
    /// Move the chain into the deferred state
    pub fn into_deferred(self) -> EitherAsync<E, S> {
        match self {
            Self::Immediate(either) => EitherAsync::ready(either),
            Self::Deferred(pending) => pending,
        }
    }

    pub fn on_success<S2, F>(self, f: F) -> Chain<E, S2>
    where
        F: FnOnce(S) -> S2 + Send + 'static,
        S2: Send + 'static,
    {
        match self {
            Self::Immediate(either) => Chain::Immediate(either.on_success(f)),
            Self::Deferred(pending) => Chain::Deferred(pending.on_success(f)),
        }
    }

    pub fn on_success_then<S2, F, R>(self, f: F) -> Chain<E, S2>
    where
        F: FnOnce(S) -> R + Send + 'static,
        R: IntoStep<E, S2>,
        S2: Send + 'static,
    {
        match self {
            Self::Immediate(either) => either.on_success_then(f),
            Self::Deferred(pending) => Chain::Deferred(pending.on_success_then(f)),
        }
    }

    pub fn tap_success<F>(self, f: F) -> Self
    where
        F: FnOnce(&S) + Send + 'static,
    {
        match self {
            Self::Immediate(either) => Self::Immediate(either.tap_success(f)),
            Self::Deferred(pending) => Self::Deferred(pending.tap_success(f)),
        }
    }

    pub fn on_success_async<S2, F, Fut>(self, f: F) -> Chain<E, S2>
    where
        F: FnOnce(S) -> Fut + Send + 'static,
        Fut: Future<Output = S2> + Send + 'static,
        S2: Send + 'static,
    {
        Chain::Deferred(match self {
            Self::Immediate(either) => upgraded(either.on_success_async(f)),
            Self::Deferred(pending) => pending.on_success_async(f),
        })
    }

    pub fn on_success_then_async<S2, F, Fut, R>(self, f: F) -> Chain<E, S2>
    where
        F: FnOnce(S) -> Fut + Send + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoStep<E, S2>,
        S2: Send + 'static,
    {
        Chain::Deferred(match self {
            Self::Immediate(either) => upgraded(either.on_success_then_async(f)),
            Self::Deferred(pending) => pending.on_success_then_async(f),
        })
    }

    pub fn tap_success_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(&S) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::Deferred(match self {
            Self::Immediate(either) => upgraded(either.tap_success_async(f)),
            Self::Deferred(pending) => pending.tap_success_async(f),
        })
    }

    pub fn on_error<E2, F>(self, f: F) -> Chain<E2, S>
    where
        F: FnOnce(E) -> E2 + Send + 'static,
        E2: Send + 'static,
    {
        match self {
            Self::Immediate(either) => Chain::Immediate(either.on_error(f)),
            Self::Deferred(pending) => Chain::Deferred(pending.on_error(f)),
        }
    }

    pub fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        match self {
            Self::Immediate(either) => Self::Immediate(either.tap_error(f)),
            Self::Deferred(pending) => Self::Deferred(pending.tap_error(f)),
        }
    }

    pub fn on_error_async<E2, F, Fut>(self, f: F) -> Chain<E2, S>
    where
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = E2> + Send + 'static,
        E2: Send + 'static,
    {
        Chain::Deferred(match self {
            Self::Immediate(either) => upgraded(either.on_error_async(f)),
            Self::Deferred(pending) => pending.on_error_async(f),
        })
    }

    pub fn tap_error_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(&E) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::Deferred(match self {
            Self::Immediate(either) => upgraded(either.tap_error_async(f)),
            Self::Deferred(pending) => pending.tap_error_async(f),
        })
    }

    /// Get the success value, or `fallback` when in error state.
    ///
    /// Ready for an immediate chain, pending once the chain is deferred.
    pub fn resolve(self, fallback: S) -> Resolution<S> {
        match self {
            Self::Immediate(either) => Resolution::Ready(either.resolve(fallback)),
            Self::Deferred(pending) => Resolution::Pending(pending.resolve(fallback).boxed()),
        }
    }

    /// Get the success value, or derive one from the error.
    pub fn resolve_with<F>(self, f: F) -> Resolution<S>
    where
        F: FnOnce(E) -> S + Send + 'static,
    {
        match self {
            Self::Immediate(either) => Resolution::Ready(either.resolve_with(f)),
            Self::Deferred(pending) => Resolution::Pending(pending.resolve_with(f).boxed()),
        }
    }

    /// Get the success value, or derive one from the error with an async
    /// function. Always pending, even for an immediate chain.
    pub fn resolve_with_async<F, Fut>(self, f: F) -> Resolution<S>
    where
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = S> + Send + 'static,
    {
        Resolution::Pending(match self {
            Self::Immediate(either) => either.resolve_with_async(f).boxed(),
            Self::Deferred(pending) => pending.resolve_with_async(f).boxed(),
        })
    }
}

fn upgraded<E, S>(pending: EitherAsync<E, S>) -> EitherAsync<E, S> {
    debug!("async step on an immediate chain, chain is now deferred");
    pending
}

impl<E, S> From<Either<E, S>> for Chain<E, S> {
    fn from(either: Either<E, S>) -> Self {
        Self::Immediate(either)
    }
}

impl<E, S> From<EitherAsync<E, S>> for Chain<E, S> {
    fn from(pending: EitherAsync<E, S>) -> Self {
        Self::Deferred(pending)
    }
}

impl<E, S> IntoFuture for Chain<E, S>
where
    E: Send + 'static,
    S: Send + 'static,
{
    type Output = Either<E, S>;
    type IntoFuture = BoxFuture<'static, Either<E, S>>;

    fn into_future(self) -> Self::IntoFuture {
        self.into_deferred().into_future()
    }
}

/// The outcome of resolving a [`Chain`]
///
/// Always awaitable; only an immediate chain can be read without awaiting.
pub enum Resolution<S> {
    Ready(S),
    Pending(BoxFuture<'static, S>),
}

impl<S> Resolution<S> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Get the value if it did not require awaiting
    pub fn into_ready(self) -> Option<S> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending(_) => None,
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Resolution<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Pending(_) => f.write_str("Pending(<future>)"),
        }
    }
}

impl<S: Send + 'static> IntoFuture for Resolution<S> {
    type Output = S;
    type IntoFuture = BoxFuture<'static, S>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(value) => future::ready(value).boxed(),
            Self::Pending(pending) => pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_chain_resolves_synchronously() {
        let resolution = Chain::from(Either::<&str, i32>::success(2))
            .on_success(|x| x * 2)
            .tap_error(|_| panic!("error tap ran on success"))
            .resolve(0);

        assert!(!resolution.is_pending());
        assert_eq!(resolution.into_ready(), Some(4));
    }

    #[test]
    fn test_async_step_makes_chain_deferred() {
        let chain = Chain::from(Either::<&str, i32>::success(2))
            .on_success_async(|x| async move { x * 2 })
            .on_success(|x| x + 1);

        assert!(chain.is_deferred());
        assert!(chain.into_immediate().is_none());
    }

    #[test]
    fn test_async_step_on_error_still_defers() {
        let chain = Chain::from(Either::<&str, i32>::error("e"))
            .on_success_async(|x| async move { x * 2 });
        assert!(chain.is_deferred());
        assert!(chain.resolve(0).is_pending());
    }

    #[test_log::test(tokio::test)]
    async fn test_deferred_chain_never_returns_to_immediate() {
        let chain = Chain::from(EitherAsync::<&str, i32>::success(1))
            .on_success_then(|x| Either::success(x + 1))
            .on_error(|e| e.to_uppercase())
            .tap_success(|_| {});
        assert!(chain.is_deferred());

        let resolution = chain.resolve_with(|e| e.len() as i32);
        assert!(resolution.is_pending());
        assert_eq!(resolution.await, 2);
    }

    #[test_log::test(tokio::test)]
    async fn test_resolve_with_async_is_always_pending() {
        let resolution = Chain::from(Either::<&str, usize>::error("e"))
            .resolve_with_async(|e| async move { e.len() + 1 });
        assert!(resolution.is_pending());
        assert_eq!(resolution.await, 2);

        let resolution = Chain::from(Either::<&str, usize>::success(4))
            .resolve_with_async(|_| async { 0 });
        assert!(resolution.is_pending());
        assert_eq!(resolution.await, 4);

        let resolution = Chain::from(EitherAsync::<&str, usize>::error("abc"))
            .resolve_with_async(|e| async move { e.len() });
        assert_eq!(resolution.await, 3);
    }

    #[test_log::test(tokio::test)]
    async fn test_ready_resolution_is_awaitable() {
        let resolution = Chain::from(Either::<&str, i32>::error("e")).resolve(7);
        assert_eq!(resolution.await, 7);
    }

    #[test_log::test(tokio::test)]
    async fn test_chain_awaits_to_settled_either() {
        let settled = Chain::from(Either::<&str, i32>::error("e"))
            .on_error_async(|e| async move { format!("{e}?") })
            .tap_error_async(|_| async {})
            .await;
        assert_eq!(settled, Either::Error("e?".to_string()));

        let settled = Chain::from(Either::<&str, i32>::success(3)).await;
        assert_eq!(settled, Either::Success(3));
    }

    #[test]
    fn test_resolution_debug() {
        assert_eq!(format!("{:?}", Resolution::Ready(3)), "Ready(3)");
        let pending = Chain::from(EitherAsync::<(), i32>::success(3)).resolve(0);
        assert_eq!(format!("{:?}", pending), "Pending(<future>)");
    }
}
