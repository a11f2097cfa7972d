//! Cancellable one-shot timers that post into the event channel.
//!
//! A [`ScopedTimer`] sends its event once the delay elapses, unless the
//! guard is dropped first. Dropping disconnects the cancel channel, which
//! wakes the timer thread immediately; it exits without sending.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a pending deferred event. Drop to cancel.
#[derive(Debug)]
pub struct ScopedTimer {
    ticket: u64,
    cancel: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ScopedTimer {
    /// Send `event` on `tx` after `delay`, unless cancelled.
    pub fn start<E: Send + 'static>(
        delay: Duration,
        ticket: u64,
        event: E,
        tx: mpsc::Sender<E>,
    ) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(delay) {
                // Receiver gone means the loop is shutting down; nothing to do.
                let _ = tx.send(event);
            }
        });

        ScopedTimer {
            ticket,
            cancel: Some(cancel_tx),
            handle: Some(handle),
        }
    }

    /// Which submission this timer belongs to.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Whether the timer thread has finished (fired or cancelled).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        // Disconnect first so the thread wakes, then reap it.
        self.cancel.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
