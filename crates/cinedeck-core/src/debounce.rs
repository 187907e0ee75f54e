//! Quiet-period debouncer with an injected clock.

use std::time::{Duration, Instant};

/// Default quiet period before search text is applied.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Holds the latest value until no new value has arrived for `delay`.
///
/// Time is passed in by the caller so the debouncer can be driven by a
/// real clock in the UI loop and by fixed instants in tests.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Creates an idle debouncer.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Stores `value` and restarts the quiet period at `now`.
    pub fn reset(&mut self, value: T, now: Instant) {
        let deadline = now.checked_add(self.delay).unwrap_or(now);
        self.pending = Some((value, deadline));
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// When the pending value fires, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// `true` while a value is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value once its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::arithmetic_side_effects)]

    use super::*;

    #[test]
    fn test_fires_after_quiet_period() {
        // Arrange
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.reset("bat", start);

        // Act & Assert
        assert_eq!(debouncer.fire(start + Duration::from_millis(499)), None);
        assert_eq!(debouncer.fire(start + Duration::from_millis(500)), Some("bat"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_reset_moves_deadline_and_keeps_latest() {
        // Arrange
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.reset("b", start);

        // Act
        debouncer.reset("ba", start + Duration::from_millis(300));
        debouncer.reset("bat", start + Duration::from_millis(600));

        // Assert
        assert_eq!(debouncer.fire(start + Duration::from_millis(900)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(1100))
        );
        assert_eq!(
            debouncer.fire(start + Duration::from_millis(1100)),
            Some("bat")
        );
    }

    #[test]
    fn test_cancel_drops_pending_value() {
        // Arrange
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.reset(1_u32, start);

        // Act
        debouncer.cancel();

        // Assert
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.fire(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_default_delay() {
        let debouncer: Debouncer<String> = Debouncer::default();
        assert_eq!(debouncer.delay(), Duration::from_millis(500));
    }
}
