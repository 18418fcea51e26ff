//! # SwissArmyHammer Either
//!
//! Success/error result containers that chain the same way whether the work
//! behind them is synchronous or asynchronous.
//!
//! - [`Either`] is settled at construction and chains synchronously.
//! - [`EitherAsync`] wraps one pending computation that settles into an
//!   [`Either`]; it offers the same operations, each returning another
//!   `EitherAsync`.
//! - [`Chain`] is returned when a transform decides at runtime whether the
//!   chain stays immediate or becomes deferred.
//!
//! Operations aimed at the success channel skip error containers and the
//! other way round. Once an async step runs, the chain stays deferred.
//!
//! ## Example
//!
//! ```
//! use swissarmyhammer_either::{error, success, Either};
//!
//! assert_eq!(success::<&str, i32>(2).on_success(|x| x * 2).resolve(0), 4);
//! assert_eq!(error::<&str, i32>("e").on_success(|x| x * 4).resolve(0), 0);
//!
//! let shouted = error::<&str, i32>("e").on_error(|e| format!("{e}!"));
//! assert_eq!(shouted, Either::Error("e!".to_string()));
//! ```
//!
//! ```
//! use swissarmyhammer_either::success;
//!
//! # futures::executor::block_on(async {
//! let value = success::<&str, i32>(42)
//!     .on_success_async(|x| async move { x })
//!     .on_success(|x| x + 1)
//!     .resolve(0)
//!     .await;
//! assert_eq!(value, 43);
//! # });
//! ```
//!
//! ## Modules
//!
//! - [`either`] - the immediate container
//! - [`either_async`] - the deferred container
//! - [`chain`] - the common interface and [`Resolution`]
//! - [`step`] - classification of transform outputs
//! - [`construct`] - constructors and fault capture
//! - [`error`](mod@error) - the [`Fault`] error payload

pub mod chain;
pub mod construct;
pub mod either;
pub mod either_async;
pub mod error;
pub mod step;

pub use chain::{Chain, Resolution};
pub use construct::{catch_call, catch_call_async, error, success, try_call, try_call_async};
pub use either::Either;
pub use either_async::EitherAsync;
pub use error::Fault;
pub use step::{IntoStep, Step};

/// Everything needed to build and chain results
pub mod prelude {
    pub use crate::{
        catch_call, catch_call_async, error, success, try_call, try_call_async, Chain, Either,
        EitherAsync, Fault, IntoStep, Resolution, Step,
    };
}
