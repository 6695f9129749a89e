//! All-or-nothing join over exactly two fallible futures.

use std::future::Future;

/// Result of [`join_both`]: either both values, or the first failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome<A, B, E> {
    Both(A, B),
    Failed(E),
}

impl<A, B, E> JoinOutcome<A, B, E> {
    pub fn into_result(self) -> Result<(A, B), E> {
        match self {
            Self::Both(a, b) => Ok((a, b)),
            Self::Failed(e) => Err(e),
        }
    }
}

/// Poll `a` and `b` concurrently on the current task.
///
/// Completes when both succeed, or as soon as either fails; the unfinished
/// branch is dropped. Completion order between the branches is unspecified.
pub async fn join_both<A, B, E, FA, FB>(a: FA, b: FB) -> JoinOutcome<A, B, E>
where
    FA: Future<Output = Result<A, E>>,
    FB: Future<Output = Result<B, E>>,
{
    match futures::future::try_join(a, b).await {
        Ok((a, b)) => JoinOutcome::Both(a, b),
        Err(e) => JoinOutcome::Failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Barrier;

    #[tokio::test]
    async fn both_succeed() {
        let outcome: JoinOutcome<u8, &str, ()> =
            join_both(async { Ok(1) }, async { Ok("two") }).await;
        assert_eq!(outcome, JoinOutcome::Both(1, "two"));
        assert_eq!(outcome.into_result(), Ok((1, "two")));
    }

    #[tokio::test]
    async fn either_failure_fails_the_whole() {
        let left: JoinOutcome<u8, u8, &str> = join_both(async { Err("left") }, async { Ok(2) }).await;
        assert_eq!(left, JoinOutcome::Failed("left"));

        let right: JoinOutcome<u8, u8, &str> = join_both(async { Ok(1) }, async { Err("right") }).await;
        assert_eq!(right, JoinOutcome::Failed("right"));
    }

    #[tokio::test]
    async fn failure_does_not_wait_for_the_other_branch() {
        let outcome: JoinOutcome<u8, u8, &str> = tokio::time::timeout(
            Duration::from_secs(5),
            join_both(futures::future::pending(), async { Err("fast failure") }),
        )
        .await
        .expect("join should not hang on the pending branch");
        assert_eq!(outcome, JoinOutcome::Failed("fast failure"));
    }

    #[tokio::test]
    async fn branches_run_concurrently() {
        // Each branch waits for the other; sequential execution would deadlock.
        let barrier = Arc::new(Barrier::new(2));
        let (b1, b2) = (barrier.clone(), barrier.clone());
        let outcome: JoinOutcome<(), (), ()> = tokio::time::timeout(
            Duration::from_secs(5),
            join_both(
                async move {
                    b1.wait().await;
                    Ok(())
                },
                async move {
                    b2.wait().await;
                    Ok(())
                },
            ),
        )
        .await
        .expect("branches should make progress together");
        assert_eq!(outcome, JoinOutcome::Both((), ()));
    }
}
