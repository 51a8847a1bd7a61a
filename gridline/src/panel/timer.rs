//! Cancellable close timer
//!
//! Each close schedules a tokio task that sleeps for the close delay and
//! then posts its token on a channel. The pending timer is owned by the
//! `Closing` phase: dropping it cancels the task, so a preempted close can
//! never fire into a later panel state.

use std::time::Duration;

use log::trace;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Identifies one scheduled close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl std::fmt::Display for TimerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "close#{}", self.0)
    }
}

/// Spawns close timers onto a runtime.
#[derive(Debug)]
pub(crate) struct CloseScheduler {
    handle: Handle,
    tx: mpsc::UnboundedSender<TimerToken>,
    next: u64,
}

impl CloseScheduler {
    /// Create a scheduler and the receiver its timers post to.
    pub(crate) fn new(handle: Handle) -> (Self, mpsc::UnboundedReceiver<TimerToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { handle, tx, next: 0 }, rx)
    }

    /// Start a timer that posts its token after `delay`.
    pub(crate) fn schedule(&mut self, delay: Duration) -> PendingClose {
        self.next += 1;
        let token = TimerToken(self.next);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let tx = self.tx.clone();

        self.handle.spawn(async move {
            tokio::select! {
                biased;
                _ = task_cancel.cancelled() => {
                    trace!("Timer {token} cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    // Receiver gone = grid unmounted.
                    let _ = tx.send(token);
                }
            }
        });

        PendingClose { token, cancel }
    }
}

/// Handle to a scheduled close. Cancels the timer when dropped.
#[derive(Debug)]
pub(crate) struct PendingClose {
    token: TimerToken,
    cancel: CancellationToken,
}

impl PendingClose {
    pub(crate) fn token(&self) -> TimerToken {
        self.token
    }
}

impl Drop for PendingClose {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
