//! Coalescing of rapid successive edits.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Window used by the quote form for airport-code edits.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Trailing-edge debouncer.
///
/// Each call to [`Self::settle`] waits out the window and reports whether
/// it was the last call made in the meantime. Only the winner should go on
/// to do the work.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    generation: AtomicU64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    /// Debouncer with the given window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            generation: AtomicU64::new(0),
        }
    }

    /// The debounce window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Waits for the window to pass.
    ///
    /// Returns `true` if no other call to `settle` started while waiting.
    pub async fn settle(&self) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.window).await;
        let latest = self.generation.load(Ordering::SeqCst) == ticket;
        if !latest {
            log::trace!("Debounced call {ticket} superseded");
        }
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn only_last_call_in_window_wins() {
        let debouncer = Debouncer::default();

        let (first, second, third) = tokio::join!(
            debouncer.settle(),
            async {
                sleep(Duration::from_millis(100)).await;
                debouncer.settle().await
            },
            async {
                sleep(Duration::from_millis(250)).await;
                debouncer.settle().await
            },
        );

        assert!(!first);
        assert!(!second);
        assert!(third);
    }

    #[tokio::test(start_paused = true)]
    async fn calls_spaced_beyond_window_all_win() {
        let debouncer = Debouncer::new(Duration::from_millis(400));

        assert!(debouncer.settle().await);
        sleep(Duration::from_millis(50)).await;
        assert!(debouncer.settle().await);
    }
}
