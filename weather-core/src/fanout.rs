//! Two-way fan-out with an all-or-nothing fan-in.

use std::future::Future;

/// Drive `a` and `b` concurrently on the current task and wait for both.
///
/// Neither future is cancelled when the other fails. The result is `Ok` only
/// when both succeed; otherwise it is the first error in argument order.
pub async fn join_all_or_nothing<A, B, T, U, E>(a: A, b: B) -> Result<(T, U), E>
where
    A: Future<Output = Result<T, E>>,
    B: Future<Output = Result<U, E>>,
{
    let (a, b) = tokio::join!(a, b);
    Ok((a?, b?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn both_succeed() {
        let out = join_all_or_nothing(async { Ok::<_, String>(1) }, async { Ok("two") }).await;
        assert_eq!(out, Ok((1, "two")));
    }

    #[tokio::test]
    async fn one_failure_fails_the_join() {
        let out: Result<(i32, i32), &str> =
            join_all_or_nothing(async { Ok(1) }, async { Err("boom") }).await;
        assert_eq!(out, Err("boom"));

        let out: Result<(i32, i32), &str> =
            join_all_or_nothing(async { Err("boom") }, async { Ok(2) }).await;
        assert_eq!(out, Err("boom"));
    }

    #[tokio::test]
    async fn first_argument_error_wins() {
        let out: Result<((), ()), &str> =
            join_all_or_nothing(async { Err("first") }, async { Err("second") }).await;
        assert_eq!(out, Err("first"));
    }

    #[tokio::test]
    async fn failure_does_not_cancel_the_other_branch() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let slow = async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            flag.store(true, Ordering::SeqCst);
            Ok::<_, &str>(())
        };

        let out = join_all_or_nothing(async { Err::<(), _>("fast failure") }, slow).await;
        assert_eq!(out, Err("fast failure"));
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn branches_run_concurrently() {
        let started = std::time::Instant::now();
        let delay = || async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, ()>(())
        };

        join_all_or_nothing(delay(), delay()).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(190));
    }
}
