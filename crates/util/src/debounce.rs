//! Trailing-edge debouncer backed by tokio timers.
//!
//! Each call restarts the quiet period; only the last value of a burst is
//! delivered, once the interval elapses without another call. Values arrive
//! on the receiver returned by [`Debouncer::new`], so the event loop can
//! `select!` on it alongside terminal input.
//!
//! Dropping the debouncer aborts the pending timer: nothing is delivered
//! after the owner is gone.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

#[derive(Debug)]
pub struct Debouncer<T> {
    interval: Duration,
    sender: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver its settled values arrive on.
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let debouncer = Self {
            interval,
            sender,
            pending: None,
        };
        (debouncer, receiver)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedules `value`, replacing any value still waiting out the interval.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call(&mut self, value: T) {
        self.cancel();
        let sender = self.sender.clone();
        let interval = self.interval;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            // The receiver may already be gone during shutdown.
            let _ = sender.send(value);
        }));
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            trace!("cancelling pending debounced call");
            handle.abort();
        }
    }

    /// Whether a value is still waiting out the interval.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const INTERVAL: Duration = Duration::from_millis(200);

    #[tokio::test(start_paused = true)]
    async fn burst_coalesces_into_last_value() {
        let (mut debouncer, mut receiver) = Debouncer::new(INTERVAL);
        for width in [80u16, 90, 100, 120] {
            debouncer.call(width);
            sleep(Duration::from_millis(50)).await;
        }
        assert!(receiver.try_recv().is_err(), "nothing fires inside the burst");

        sleep(Duration::from_millis(300)).await;
        assert_eq!(receiver.try_recv(), Ok(120));
        assert!(receiver.try_recv().is_err(), "exactly one delivery");
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_deliver_separately() {
        let (mut debouncer, mut receiver) = Debouncer::new(INTERVAL);
        debouncer.call(1u16);
        sleep(Duration::from_millis(250)).await;
        debouncer.call(2);
        sleep(Duration::from_millis(250)).await;

        assert_eq!(receiver.try_recv(), Ok(1));
        assert_eq!(receiver.try_recv(), Ok(2));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_pending_call() {
        let (mut debouncer, mut receiver) = Debouncer::new(INTERVAL);
        debouncer.call(7u16);
        assert!(debouncer.is_pending());
        drop(debouncer);

        sleep(Duration::from_millis(500)).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_then_call_again() {
        let (mut debouncer, mut receiver) = Debouncer::new(INTERVAL);
        debouncer.call(1u16);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        sleep(Duration::from_millis(300)).await;
        assert!(receiver.try_recv().is_err());

        debouncer.call(2);
        sleep(Duration::from_millis(300)).await;
        assert_eq!(receiver.try_recv(), Ok(2));
    }
}
