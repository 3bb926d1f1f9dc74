//! What the monitor loop tells the outside world.
//!
//! Discrete [`MonitorEvent`]s go over an unbounded `mpsc` channel; the latest
//! [`Progress`] snapshot sits in a `watch` channel for the UI to poll. Neither
//! send ever waits on a consumer.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tokio::sync::{mpsc, watch};

// ── MonitorEvent ──────────────────────────────────────────────────────────────

/// A state change worth showing or logging.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// A configured CRN resolved to a course title and is now tracked.
    CourseResolved { crn: String, name: String },
    /// A configured CRN could not be resolved and will not be tracked.
    CourseSkipped { crn: String, error: String },
    /// Resolution finished; polling begins over `total` courses.
    MonitoringStarted { total: usize },
    /// An availability check failed; the course is retried next cycle.
    CheckFailed {
        crn: String,
        /// Wall-clock start of the cycle the failure happened in.
        at: DateTime<Local>,
        error: String,
    },
    /// A course was seen with an open seat.
    SeatOpened { crn: String, name: String },
    NotificationSent { crn: String, destination: String },
    NotificationFailed { crn: String, error: String },
    /// No destination configured, so nothing was sent.
    NotificationSkipped { crn: String },
    /// Every tracked course has been found.
    AllFound { attempts: u32 },
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Which part of the state machine the loop is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Resolving,
    Checking,
    Waiting,
    Done,
}

/// Latest-value snapshot of the loop's counters.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    pub phase: Phase,
    /// Current cycle number, 0 until polling starts.
    pub attempt: u32,
    pub found: usize,
    pub total: usize,
    /// CRN being checked right now.
    pub current: Option<String>,
    /// Wall-clock start of the current cycle.
    pub cycle_started_at: Option<DateTime<Local>>,
    /// When the next cycle begins, while waiting.
    pub next_check_at: Option<Instant>,
}

impl Progress {
    /// Time left until the next cycle, or `None` outside the waiting phase.
    pub fn time_to_next_check(&self, now: Instant) -> Option<Duration> {
        self.next_check_at
            .map(|at| at.saturating_duration_since(now))
    }
}

// ── Reporter ──────────────────────────────────────────────────────────────────

/// Sending half held by the monitor loop.
#[derive(Debug, Clone)]
pub struct Reporter {
    events: mpsc::UnboundedSender<MonitorEvent>,
    progress: watch::Sender<Progress>,
}

/// Receiving half handed to the presentation layer.
#[derive(Debug)]
pub struct MonitorReceivers {
    pub events: mpsc::UnboundedReceiver<MonitorEvent>,
    pub progress: watch::Receiver<Progress>,
}

impl Reporter {
    /// Create a connected reporter / receiver pair.
    pub fn channel() -> (Reporter, MonitorReceivers) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (progress_tx, progress_rx) = watch::channel(Progress::default());
        (
            Reporter {
                events: events_tx,
                progress: progress_tx,
            },
            MonitorReceivers {
                events: events_rx,
                progress: progress_rx,
            },
        )
    }

    /// Emit an event. A dropped receiver is not an error for the loop.
    pub fn emit(&self, event: MonitorEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("event receiver dropped");
        }
    }

    /// Update the progress snapshot in place.
    pub fn update(&self, f: impl FnOnce(&mut Progress)) {
        self.progress.send_modify(f);
    }

    /// Current progress snapshot.
    pub fn progress(&self) -> Progress {
        self.progress.borrow().clone()
    }
}
