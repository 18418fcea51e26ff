//! Property-based tests for resolution, short-circuiting and flattening

use std::future::IntoFuture;

use proptest::prelude::*;
use swissarmyhammer_either::prelude::*;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime should build")
        .block_on(future)
}

proptest! {
    #[test]
    fn test_success_ignores_fallback(value in any::<i64>(), fallback in any::<i64>()) {
        prop_assert_eq!(success::<String, i64>(value).resolve(fallback), value);
        prop_assert_eq!(success::<String, i64>(value).resolve_with(|_| fallback), value);
    }

    #[test]
    fn test_error_uses_fallback(err in ".*", fallback in any::<i64>()) {
        prop_assert_eq!(error::<String, i64>(err.clone()).resolve(fallback), fallback);
        prop_assert_eq!(
            error::<String, i64>(err.clone()).resolve_with(|e| e.len() as i64),
            err.len() as i64
        );
    }

    #[test]
    fn test_on_success_never_touches_error(err in ".*") {
        let mut calls = 0;
        let result = error::<String, i32>(err.clone())
            .on_success(|x| { calls += 1; x + 1 })
            .tap_success(|_| calls += 1);
        prop_assert_eq!(calls, 0);
        prop_assert_eq!(result, Either::Error(err));
    }

    #[test]
    fn test_on_error_never_touches_success(value in any::<i32>()) {
        let mut calls = 0;
        let result = success::<String, i32>(value)
            .on_error(|e| { calls += 1; e.len() })
            .tap_error(|_| calls += 1);
        prop_assert_eq!(calls, 0);
        prop_assert_eq!(result, Either::Success(value));
    }

    #[test]
    fn test_flattening_is_transparent(value in -1_000_000i64..1_000_000, fallback in any::<i64>()) {
        let g = |x: i64| x * 3 - 1;

        let mapped = success::<String, i64>(value).on_success(g).resolve(fallback);
        let flattened = success::<String, i64>(value)
            .on_success_then(move |x| success(g(x)))
            .resolve(fallback);

        prop_assert_eq!(flattened.into_ready(), Some(mapped));
    }

    #[test]
    fn test_async_step_always_pends(value in any::<i32>(), is_error in any::<bool>()) {
        let start: Either<String, i32> = if is_error {
            error("e".to_string())
        } else {
            success(value)
        };

        let resolution = Chain::from(start)
            .on_success_async(|x| async move { x.wrapping_add(1) })
            .resolve(0);
        prop_assert!(resolution.is_pending());

        let expected = if is_error { 0 } else { value.wrapping_add(1) };
        prop_assert_eq!(block_on(resolution.into_future()), expected);
    }

    #[test]
    fn test_deferred_matches_immediate(value in any::<i32>(), is_error in any::<bool>()) {
        let start: Either<String, i32> = if is_error {
            error("bad".to_string())
        } else {
            success(value)
        };

        let immediate = start
            .clone()
            .on_success(|x| x / 2)
            .on_error(|e| e.to_uppercase());
        let deferred = block_on(
            EitherAsync::ready(start)
                .on_success(|x| x / 2)
                .on_error(|e| e.to_uppercase())
                .into_future(),
        );

        prop_assert_eq!(deferred, immediate);
    }

    #[test]
    fn test_try_call_mirrors_result(input in "[0-9]{1,6}|[a-z]{1,6}") {
        let expected = input.parse::<u32>().ok();
        let parsed = try_call(|| input.parse::<u32>());
        prop_assert_eq!(parsed.into_result().ok(), expected);
    }
}
