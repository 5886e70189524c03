//! Notification-driven watch loop.
//!
//! ```text
//!            change event
//!   Idle ------------------> Scanning
//!    ^                          |
//!    +------ pass finished -----+
//!    |
//!    +-- interrupt / event source closed --> Stopped
//! ```
//!
//! Events are consumed on the calling thread. Everything already queued when a pass
//! starts is drained and folded into that pass; events that arrive while the pass
//! runs trigger one more pass afterwards. Access notifications are not changes and
//! are ignored, otherwise the scanner's own directory reads would retrigger it.
//! Events that only touch ignored paths (the log file, when it lives inside the
//! watched folder) are dropped for the same reason, and are not logged.

use anyhow::Result;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

use crate::errors::SorterError;
use crate::shutdown;
use crate::sorter::{PassReport, Sorter};

/// How often the loop wakes up to check for an interrupt while idle.
pub const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Channel end the loop consumes; fed by `notify` or by a test.
pub type EventReceiver = Receiver<notify::Result<Event>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Scanning,
    Stopped,
}

pub struct WatchLoop {
    sorter: Sorter,
    events: EventReceiver,
    state: WatchState,
    poll_interval: Duration,
    passes: usize,
    ignored: Vec<PathBuf>,
    // Dropping the watcher tears down the subscription.
    watcher: Option<RecommendedWatcher>,
}

impl WatchLoop {
    /// Subscribe to recursive change notifications on the sorter's source folder.
    pub fn subscribe(sorter: Sorter) -> Result<Self> {
        let dir = sorter.source_dir().to_path_buf();
        let watch_failed = |e: notify::Error| SorterError::WatchFailed {
            path: dir.clone(),
            reason: e.to_string(),
        };

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })
        .map_err(watch_failed)?;
        watcher
            .watch(&dir, RecursiveMode::Recursive)
            .map_err(watch_failed)?;
        info!(dir = %dir.display(), "Watching for changes");

        let mut lp = Self::from_receiver(sorter, rx);
        lp.watcher = Some(watcher);
        Ok(lp)
    }

    /// Build a loop over an existing event channel (no filesystem subscription).
    pub fn from_receiver(sorter: Sorter, events: EventReceiver) -> Self {
        Self {
            sorter,
            events,
            state: WatchState::Idle,
            poll_interval: SHUTDOWN_POLL_INTERVAL,
            passes: 0,
            ignored: Vec::new(),
            watcher: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Drop events whose paths are all `path`. Compared as given; pass a canonical path.
    pub fn ignore_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignored.push(path.into());
        self
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Number of passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Block until an interrupt is requested or the event source closes.
    /// Returns the summed counters of every pass that ran.
    pub fn run(&mut self) -> PassReport {
        let mut totals = PassReport::default();

        while self.state != WatchState::Stopped {
            if shutdown::is_requested() {
                info!("Interrupt received; stopping watch loop");
                self.stop();
                break;
            }

            match self.events.recv_timeout(self.poll_interval) {
                Ok(Ok(event)) => {
                    if self.is_change(&event) {
                        trace!(kind = ?event.kind, paths = ?event.paths, "change event");
                        totals += self.scan_now();
                    }
                }
                Ok(Err(e)) => warn!(error = %e, "Watch backend reported an error"),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("Event source closed; stopping watch loop");
                    self.stop();
                }
            }
        }

        totals
    }

    /// Run one pass now, folding any queued events into it.
    pub fn scan_now(&mut self) -> PassReport {
        self.state = WatchState::Scanning;
        let coalesced = self.events.try_iter().count();
        if coalesced > 0 {
            trace!(coalesced, "folded queued events into this pass");
        }

        let report = self.sorter.run_pass();
        self.passes += 1;
        self.state = WatchState::Idle;
        debug!(
            pass = self.passes,
            scanned = report.scanned,
            moved = report.moved,
            unmatched = report.unmatched,
            failed = report.failed,
            "Pass finished"
        );
        report
    }

    /// Tear down the subscription and enter the terminal state.
    pub fn stop(&mut self) {
        self.watcher.take();
        self.state = WatchState::Stopped;
    }

    fn is_change(&self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }
        event.paths.is_empty() || !event.paths.iter().all(|p| self.ignored.contains(p))
    }
}
