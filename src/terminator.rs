//! Delayed whole-process termination.
//!
//! A kill request is answered first, then a detached task sleeps for the
//! configured delay and exits the process with status 0. Nothing is drained
//! or closed. Every call schedules its own task; the first to fire wins.

use std::sync::Arc;
use std::time::Duration;

type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

/// Exit code used for a requested termination
pub const KILL_EXIT_CODE: i32 = 0;

#[derive(Clone)]
pub struct Terminator {
    delay: Duration,
    exit: ExitFn,
}

impl std::fmt::Debug for Terminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminator")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl Terminator {
    /// Terminator that exits the current process.
    pub fn process(delay: Duration) -> Self {
        Self::with_exit(delay, |code| {
            std::process::exit(code);
        })
    }

    /// Terminator with a custom exit action.
    pub fn with_exit<F>(delay: Duration, exit: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        Self {
            delay,
            exit: Arc::new(exit),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule termination after the delay. Returns immediately and cannot be cancelled.
    pub fn schedule(&self) {
        let delay = self.delay;
        let exit = Arc::clone(&self.exit);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!(code = KILL_EXIT_CODE, "Terminating process");
            exit(KILL_EXIT_CODE);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_schedule_exits_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let terminator = Terminator::with_exit(Duration::from_secs(1), move |code| {
            let _ = tx.send(code);
        });

        terminator.schedule();

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(rx.try_recv().is_err(), "exit fired before the delay");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.recv().await, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_does_not_block_caller() {
        let terminator = Terminator::with_exit(Duration::from_secs(60), |_| {});
        let start = tokio::time::Instant::now();
        terminator.schedule();
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_call_schedules_its_own_exit() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let terminator = Terminator::with_exit(Duration::from_secs(1), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        terminator.schedule();
        terminator.schedule();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
