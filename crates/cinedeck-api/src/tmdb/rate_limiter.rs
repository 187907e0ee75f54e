//! Minimum-interval request pacing for the TMDB client.

use std::time::{Duration, Instant};

/// Default minimum interval between requests (~40 req/s).
pub(crate) const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Spaces consecutive TMDB requests at least `min_interval` apart.
///
/// Shared behind a `tokio::sync::Mutex` so concurrent fetches (movie and TV
/// tracks) are serialized through the same pacing window.
#[derive(Debug)]
pub struct RequestPacer {
    /// Minimum interval between requests.
    min_interval: Duration,
    /// When the previous request was released.
    last_release: Option<Instant>,
}

impl RequestPacer {
    /// Creates a pacer with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_release: None,
        }
    }

    /// How long a request issued at `now` has to wait.
    fn delay_at(&self, now: Instant) -> Duration {
        self.last_release.map_or(Duration::ZERO, |last| {
            self.min_interval
                .saturating_sub(now.saturating_duration_since(last))
        })
    }

    /// Waits until the next request may be sent and records its release.
    pub async fn wait(&mut self) {
        let delay = self.delay_at(Instant::now());
        if !delay.is_zero() {
            tracing::trace!(delay_ms = delay.as_millis(), "pacing TMDB request");
            tokio::time::sleep(delay).await;
        }
        self.last_release = Some(Instant::now());
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
