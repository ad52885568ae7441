//! Injectable latency for the mock service.

use std::future::Future;
use std::time::Duration;

/// Suspends the calling operation for a simulated round trip.
pub trait Delay: Send + Sync + 'static {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Real timer backed by `tokio::time`. Follows tokio's paused clock in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Completes immediately, whatever the configured latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    async fn sleep(&self, _duration: Duration) {}
}
