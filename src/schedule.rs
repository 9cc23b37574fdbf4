//! Debounced refresh triggers
//!
//! Hosts that receive bursts of resize or content events arm a
//! [`RefreshDebouncer`] on each event and run [`crate::panel::refresh`] when
//! [`RefreshTicks::next`] yields. Only the last trigger of a burst fires.
//!
//! The widget tree itself is not `Send`, so ticks are delivered over a channel
//! to whichever task owns the tree.

use std::time::Duration;

use log::trace;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

pub struct RefreshDebouncer {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: UnboundedSender<u64>,
}

/// Receiving side of a [`RefreshDebouncer`]
pub struct RefreshTicks {
    rx: UnboundedReceiver<u64>,
}

impl RefreshDebouncer {
    pub fn new(delay: Duration) -> (Self, RefreshTicks) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = RefreshDebouncer {
            delay,
            generation: 0,
            pending: None,
            tx,
        };
        (debouncer, RefreshTicks { rx })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer, cancelling any pending one. Must be called inside a
    /// tokio runtime. Returns the generation the timer will deliver.
    pub fn trigger(&mut self) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        trace!("refresh armed (generation {})", generation);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means nobody wants the refresh any more
            let _ = tx.send(generation);
        }));
        generation
    }

    /// Drop the pending timer, if any, without delivering it
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().map_or(false, |h| !h.is_finished())
    }
}

impl Drop for RefreshDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl RefreshTicks {
    /// Wait for the next delivered tick. `None` once the debouncer is gone.
    pub async fn next(&mut self) -> Option<u64> {
        self.rx.recv().await
    }

    /// Take a tick that has already been delivered, without waiting
    pub fn try_next(&mut self) -> Option<u64> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_last_trigger_fires() {
        let (mut debouncer, mut ticks) = RefreshDebouncer::new(Duration::from_millis(100));
        debouncer.trigger();
        tokio::time::sleep(Duration::from_millis(50)).await;
        debouncer.trigger();
        let last = debouncer.trigger();

        assert_eq!(ticks.next().await, Some(last));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.try_next(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_tick() {
        let (mut debouncer, mut ticks) = RefreshDebouncer::new(Duration::from_millis(10));
        debouncer.trigger();
        assert!(debouncer.is_pending());
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticks.try_next(), None);

        drop(debouncer);
        assert_eq!(ticks.next().await, None);
    }
}
