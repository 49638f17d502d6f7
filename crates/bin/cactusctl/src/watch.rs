//! Periodic refresh loop behind `cactusctl watch`.

use std::future::Future;
use std::time::Duration;

use cactus_app::latest_request::LatestRequest;
use tokio::sync::mpsc;

/// Start `fetch` every `every` and hand each outcome to `apply`, until
/// `shutdown` completes or `apply` fails.
///
/// Fetches run concurrently, so a slow backend can have several in flight.
/// An outcome is applied when it is newer than the last applied one; an
/// older outcome that completes late is dropped.
///
/// # Errors
///
/// Returns the first error raised by `apply`.
pub async fn refresh_loop<T, Fut>(
    every: Duration,
    mut fetch: impl FnMut() -> Fut,
    mut apply: impl FnMut(T) -> anyhow::Result<()>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()>
where
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let latest = LatestRequest::new();
    let (tx, mut rx) = mpsc::channel(8);
    let mut ticker = tokio::time::interval(every);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let ticket = latest.begin();
                let pending = fetch();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send((ticket, pending.await)).await;
                });
            }
            Some((ticket, outcome)) = rx.recv() => {
                if !latest.accept(ticket) {
                    tracing::debug!(?ticket, "dropping stale result");
                    continue;
                }
                apply(outcome)?;
            }
            () = &mut shutdown => {
                tracing::info!("interrupted");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    /// Fetch closure returning its sequence number after `delay(n)`.
    fn sequenced(
        delay: impl Fn(u64) -> Duration,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = u64> + Send>> {
        let counter = Arc::new(AtomicU64::new(0));
        move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            let wait = delay(n);
            Box::pin(async move {
                tokio::time::sleep(wait).await;
                n
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_apply_results_when_backend_is_slower_than_refresh() {
        let mut applied = Vec::new();

        refresh_loop(
            Duration::from_secs(1),
            sequenced(|_| Duration::from_secs(2)),
            |n| {
                applied.push(n);
                Ok(())
            },
            tokio::time::sleep(Duration::from_secs(30)),
        )
        .await
        .unwrap();

        assert!(applied.len() >= 20, "applied {applied:?}");
        assert!(applied.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn should_drop_results_completing_out_of_order() {
        let mut applied = Vec::new();

        // Even fetches take 5 s, odd ones 1 s: each slow result lands after
        // a newer fast one has been applied.
        refresh_loop(
            Duration::from_secs(2),
            sequenced(|n| Duration::from_secs(if n % 2 == 0 { 5 } else { 1 })),
            |n| {
                applied.push(n);
                Ok(())
            },
            tokio::time::sleep(Duration::from_secs(20)),
        )
        .await
        .unwrap();

        assert!(!applied.is_empty());
        assert!(applied.iter().all(|n| n % 2 == 1), "applied {applied:?}");
        assert!(applied.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn should_apply_every_result_from_fast_backend() {
        let mut applied = Vec::new();

        refresh_loop(
            Duration::from_secs(10),
            sequenced(|_| Duration::from_millis(100)),
            |n| {
                applied.push(n);
                Ok(())
            },
            tokio::time::sleep(Duration::from_secs(35)),
        )
        .await
        .unwrap();

        assert_eq!(applied, [0, 1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_when_apply_fails() {
        let result = refresh_loop(
            Duration::from_secs(1),
            sequenced(|_| Duration::ZERO),
            |_| Err(anyhow::anyhow!("stdout closed")),
            std::future::pending(),
        )
        .await;

        assert_eq!(result.unwrap_err().to_string(), "stdout closed");
    }
}
