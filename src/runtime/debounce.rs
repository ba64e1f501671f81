//! Cancel-and-reschedule debounce timer.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Delivers the most recent value once input has been quiet for `window`.
///
/// Each [`schedule`](Self::schedule) aborts the pending timer and starts a new
/// one, so only the last value of a burst is ever sent.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<JoinHandle<()>>,
    _value: std::marker::PhantomData<fn(T)>,
}

impl<T: Send + 'static> Debouncer<T> {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None, _value: std::marker::PhantomData }
    }

    /// Sends `value` on `tx` after the window, replacing any pending value.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, value: T, tx: &UnboundedSender<T>) {
        if self.cancel() {
            tracing::trace!("debounce rescheduled");
        }
        let tx = tx.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // receiver gone means the session ended
            let _ = tx.send(value);
        }));
    }

    /// Drops the pending value. Returns `true` if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some_and(|handle| {
            let waiting = !handle.is_finished();
            handle.abort();
            waiting
        })
    }

    #[must_use]
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
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn only_last_value_of_a_burst_is_sent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let started = Instant::now();

        debouncer.schedule("c", &tx);
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule("co", &tx);
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.schedule("cow", &tx);

        assert_eq!(rx.recv().await, Some("cow"));
        assert!(started.elapsed() >= Duration::from_millis(1000));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_value() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(1, &tx);
        assert!(debouncer.is_pending());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}
