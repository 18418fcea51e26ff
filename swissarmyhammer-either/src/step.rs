//! Classification of transform outputs
//!
//! A flattening transform may hand back a plain value, a settled [`Either`]
//! or a pending [`EitherAsync`]. [`Step`] is the closed set of those shapes and
//! [`IntoStep`] is how a returned container names its own shape, so the
//! enclosing chain never has to guess and never wraps a container twice.

use tracing::debug;

use crate::{Chain, Either, EitherAsync};

/// What a flattening transform produced
#[derive(Debug)]
pub enum Step<E, S> {
    /// A plain success value to be wrapped
    Value(S),
    /// A settled result that becomes the new chain state
    Immediate(Either<E, S>),
    /// A pending result; the chain is deferred from here on
    Deferred(EitherAsync<E, S>),
}

impl<E, S> Step<E, S> {
    /// Normalize into the container the chain continues with.
    ///
    /// A [`Step::Deferred`] upgrades the chain: the returned [`Chain`] is
    /// deferred and every later step on it stays deferred.
    pub fn into_chain(self) -> Chain<E, S> {
        match self {
            Self::Value(value) => Chain::Immediate(Either::Success(value)),
            Self::Immediate(either) => Chain::Immediate(either),
            Self::Deferred(pending) => {
                debug!("transform returned a deferred result, chain is now deferred");
                Chain::Deferred(pending)
            }
        }
    }

    /// Await the step down to a settled [`Either`].
    pub async fn settle(self) -> Either<E, S> {
        match self {
            Self::Value(value) => Either::Success(value),
            Self::Immediate(either) => either,
            Self::Deferred(pending) => pending.await,
        }
    }

    /// Check whether settling this step requires awaiting
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

/// Conversion of a transform's return value into a [`Step`]
///
/// Implemented for the result containers of this crate and for [`Step`]
/// itself. Arbitrary values have no implementation; plain values go through
/// the mapping operations (`on_success`, `on_success_async`) instead.
pub trait IntoStep<E, S> {
    fn into_step(self) -> Step<E, S>;
}

impl<E, S> IntoStep<E, S> for Step<E, S> {
    fn into_step(self) -> Step<E, S> {
        self
    }
}

impl<E, S> IntoStep<E, S> for Either<E, S> {
    fn into_step(self) -> Step<E, S> {
        Step::Immediate(self)
    }
}

impl<E, S> IntoStep<E, S> for EitherAsync<E, S> {
    fn into_step(self) -> Step<E, S> {
        Step::Deferred(self)
    }
}

impl<E, S> IntoStep<E, S> for Chain<E, S> {
    fn into_step(self) -> Step<E, S> {
        match self {
            Chain::Immediate(either) => Step::Immediate(either),
            Chain::Deferred(pending) => Step::Deferred(pending),
        }
    }
}
