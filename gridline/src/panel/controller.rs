//! Detail panel state machine
//!
//! ```text
//! Closed  --click(a)--------------> Open(a)
//! Open(a) --click(a) / close()-----> Closing(a)   (timer scheduled)
//! Open(a) --click(b)--------------> Open(b)      (in place, no timer)
//! Closing(a) --timer--------------> Closed
//! Closing(a) --click(x)-----------> Open(x)      (timer cancelled)
//! ```
//!
//! The panel keeps a snapshot of the row it shows, so `Closing` renders
//! the last opened row even if the row has since left the collection.

use std::time::Duration;

use log::{debug, trace};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::model::{Row, RowId};

use super::timer::{CloseScheduler, PendingClose, TimerToken};
use super::{PanelState, PanelTransition};

enum Phase {
    Closed,
    Open { row: Row },
    Closing { row: Row, timer: PendingClose },
}

impl Phase {
    fn state(&self) -> PanelState {
        match self {
            Phase::Closed => PanelState::Closed,
            Phase::Open { row } => PanelState::Open(row.id().clone()),
            Phase::Closing { row, .. } => PanelState::Closing(row.id().clone()),
        }
    }
}

/// Coordinates which row's detail is shown and the timed exit.
pub struct DetailPanelController {
    phase: Phase,
    close_delay: Duration,
    scheduler: CloseScheduler,
    elapsed_rx: mpsc::UnboundedReceiver<TimerToken>,
}

impl DetailPanelController {
    /// Create a closed panel whose close timers run on `handle`.
    pub fn new(close_delay: Duration, handle: Handle) -> Self {
        let (scheduler, elapsed_rx) = CloseScheduler::new(handle);
        Self {
            phase: Phase::Closed,
            close_delay,
            scheduler,
            elapsed_rx,
        }
    }

    /// Current state.
    pub fn state(&self) -> PanelState {
        self.phase.state()
    }

    /// Row snapshot to render: the open row, or the row animating out.
    pub fn row(&self) -> Option<&Row> {
        match &self.phase {
            Phase::Closed => None,
            Phase::Open { row } | Phase::Closing { row, .. } => Some(row),
        }
    }

    /// Id of the row on screen, if any.
    pub fn focused_id(&self) -> Option<&RowId> {
        self.row().map(Row::id)
    }

    /// Handle a click on a row body.
    ///
    /// Re-clicking the open row closes the panel; clicking another row
    /// switches the panel to it. A click while closing cancels the pending
    /// close and opens the clicked row right away.
    pub fn click_row(&mut self, row: &Row) -> Vec<PanelTransition> {
        let reclick = matches!(&self.phase, Phase::Open { row: open } if open.id() == row.id());
        if reclick {
            return self.begin_close();
        }
        if let Phase::Closing { timer, .. } = &self.phase {
            trace!("Cancelling {} for click on '{}'", timer.token(), row.id());
        }
        let from = self.state();
        self.replace(Phase::Open { row: row.clone() }, from)
    }

    /// Explicit close gesture. Only acts on an open panel.
    pub fn close(&mut self) -> Vec<PanelTransition> {
        match self.phase {
            Phase::Open { .. } => self.begin_close(),
            _ => {
                trace!("Ignoring close on {:?}", self.state());
                vec![]
            }
        }
    }

    /// Close without waiting for the exit animation.
    ///
    /// Used when the shown row no longer exists: an open panel passes
    /// through `Closing` to `Closed` in one step and any pending timer is
    /// cancelled.
    pub fn force_close(&mut self) -> Vec<PanelTransition> {
        let (row, was_open) = match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Closed => return vec![],
            Phase::Open { row } => (row, true),
            Phase::Closing { row, timer } => {
                drop(timer);
                (row, false)
            }
        };

        let closing = PanelState::Closing(row.id().clone());
        let mut transitions = Vec::with_capacity(2);
        if was_open {
            transitions.push(PanelTransition {
                from: PanelState::Open(row.id().clone()),
                to: closing.clone(),
            });
        }
        transitions.push(PanelTransition {
            from: closing,
            to: PanelState::Closed,
        });
        debug!("Panel forced closed from '{}'", row.id());
        transitions
    }

    /// Refresh the open row's snapshot after the collection replaced it.
    ///
    /// A closing panel keeps its frozen snapshot.
    pub fn refresh(&mut self, row: &Row) -> bool {
        match &mut self.phase {
            Phase::Open { row: open } if open.id() == row.id() && *open != *row => {
                *open = row.clone();
                true
            }
            _ => false,
        }
    }

    /// Apply an elapsed timer. Tokens from cancelled or superseded closes
    /// are discarded.
    pub fn finish_close(&mut self, token: TimerToken) -> Option<PanelTransition> {
        let current = matches!(&self.phase, Phase::Closing { timer, .. } if timer.token() == token);
        if !current {
            trace!("Discarding stale {token}");
            return None;
        }
        let from = self.state();
        self.phase = Phase::Closed;
        debug!("Panel {from:?} -> Closed ({token} elapsed)");
        Some(PanelTransition {
            from,
            to: PanelState::Closed,
        })
    }

    /// Wait for the next close timer that applies to the current state.
    ///
    /// Stale tokens are skipped. Pending forever while nothing is closing.
    pub async fn next_elapsed(&mut self) -> Option<PanelTransition> {
        while let Some(token) = self.elapsed_rx.recv().await {
            if let Some(transition) = self.finish_close(token) {
                return Some(transition);
            }
        }
        None
    }

    /// Apply every timer that has already fired, without waiting.
    pub fn poll_elapsed(&mut self) -> Vec<PanelTransition> {
        let mut transitions = Vec::new();
        while let Ok(token) = self.elapsed_rx.try_recv() {
            transitions.extend(self.finish_close(token));
        }
        transitions
    }

    fn begin_close(&mut self) -> Vec<PanelTransition> {
        let from = self.state();
        let row = match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Open { row } => row,
            other => {
                self.phase = other;
                return vec![];
            }
        };
        let closing = PanelState::Closing(row.id().clone());

        if self.close_delay.is_zero() {
            debug!("Panel {from:?} -> {closing:?} -> Closed (no delay)");
            return vec![
                PanelTransition {
                    from,
                    to: closing.clone(),
                },
                PanelTransition {
                    from: closing,
                    to: PanelState::Closed,
                },
            ];
        }

        let timer = self.scheduler.schedule(self.close_delay);
        debug!("Panel {from:?} -> {closing:?} ({} in {:?})", timer.token(), self.close_delay);
        self.phase = Phase::Closing { row, timer };
        vec![PanelTransition { from, to: closing }]
    }

    fn replace(&mut self, next: Phase, from: PanelState) -> Vec<PanelTransition> {
        // Dropping a Closing phase cancels its timer.
        self.phase = next;
        let to = self.state();
        if from == to {
            return vec![];
        }
        debug!("Panel {from:?} -> {to:?}");
        vec![PanelTransition { from, to }]
    }
}

impl std::fmt::Debug for DetailPanelController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailPanelController")
            .field("state", &self.state())
            .field("close_delay", &self.close_delay)
            .finish()
    }
}
