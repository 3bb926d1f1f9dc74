//! Async seat-monitoring orchestrator.
//!
//! [`SeatMonitor`] resolves the configured CRNs once, then polls each
//! unfound course in order, notifies on the first open seat, and sleeps
//! between cycles until every course has been found. It runs in a tokio task;
//! state changes are reported through a [`Reporter`] so the presentation
//! layer never shares mutable state with the loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use sniper_core::error::{Result, SniperError};
use sniper_core::models::{TrackedCourse, NOTIFICATION_SUBJECT};
use sniper_core::notifications::Notifier;
use sniper_data::availability::is_section_open;
use sniper_data::client::CourseLookup;
use sniper_data::resolver::resolve_course_name;
use tokio::task::JoinHandle;
use tokio::time;

use crate::events::{MonitorEvent, MonitorReceivers, Phase, Reporter};
use crate::state::MonitorState;

/// Pause between two availability requests within one cycle.
pub const REQUEST_DELAY: Duration = Duration::from_millis(500);

// ── Public types ──────────────────────────────────────────────────────────────

/// Outcome of a run that found every course.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of cycles it took.
    pub attempts: u32,
    /// Final course list, all `found`.
    pub courses: Vec<TrackedCourse>,
}

// ── SeatMonitor ───────────────────────────────────────────────────────────────

/// The resolve → check → notify → wait loop.
pub struct SeatMonitor {
    lookup: Arc<dyn CourseLookup>,
    notifier: Arc<dyn Notifier>,
    crns: Vec<String>,
    /// Sleep between the end of one cycle and the start of the next.
    check_interval: Duration,
    /// Sleep between two checks within a cycle.
    request_delay: Duration,
    /// Where seat-open emails go; `None` disables sending.
    destination: Option<String>,
}

impl SeatMonitor {
    /// Create a monitor over `crns` in the order given.
    pub fn new(
        lookup: Arc<dyn CourseLookup>,
        notifier: Arc<dyn Notifier>,
        crns: Vec<String>,
        check_interval: Duration,
    ) -> Self {
        Self {
            lookup,
            notifier,
            crns,
            check_interval,
            request_delay: REQUEST_DELAY,
            destination: None,
        }
    }

    pub fn with_destination(mut self, destination: Option<String>) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Spawn the loop on a tokio task.
    ///
    /// Returns the receivers for events and progress, and a handle that
    /// aborts or joins the task.
    pub fn start(self) -> (MonitorReceivers, MonitorHandle) {
        let (reporter, receivers) = Reporter::channel();
        let handle = tokio::spawn(async move { self.run(&reporter).await });
        (receivers, MonitorHandle { handle })
    }

    /// Run to completion on the current task.
    ///
    /// Fails only with [`SniperError::NoValidTargets`]; every other error is
    /// reported and absorbed.
    pub async fn run(self, reporter: &Reporter) -> Result<RunSummary> {
        let mut state = self.resolve_courses(reporter).await?;
        reporter.emit(MonitorEvent::MonitoringStarted {
            total: state.total(),
        });
        tracing::info!(total = state.total(), "monitoring started");

        loop {
            let attempt = state.begin_cycle();
            let cycle_start = Local::now();
            reporter.update(|p| {
                p.phase = Phase::Checking;
                p.attempt = attempt;
                p.cycle_started_at = Some(cycle_start);
                p.next_check_at = None;
            });

            for (n, idx) in state.pending().into_iter().enumerate() {
                if n > 0 {
                    time::sleep(self.request_delay).await;
                }
                self.check_course(&mut state, idx, cycle_start, reporter)
                    .await;
            }

            if state.is_done() {
                reporter.update(|p| {
                    p.phase = Phase::Done;
                    p.current = None;
                });
                reporter.emit(MonitorEvent::AllFound { attempts: attempt });
                tracing::info!(attempts = attempt, "all courses found");
                return Ok(RunSummary {
                    attempts: attempt,
                    courses: state.into_courses(),
                });
            }

            // No deadline when the interval runs past what `Instant` can hold.
            let next_check_at = Instant::now().checked_add(self.check_interval);
            reporter.update(|p| {
                p.phase = Phase::Waiting;
                p.current = None;
                p.next_check_at = next_check_at;
            });
            tracing::debug!(
                attempt,
                remaining = state.remaining(),
                "cycle complete; waiting"
            );
            time::sleep(self.check_interval).await;
        }
    }

    // ── Private implementation ────────────────────────────────────────────

    /// Resolve every configured CRN, dropping the ones that fail.
    async fn resolve_courses(&self, reporter: &Reporter) -> Result<MonitorState> {
        reporter.update(|p| p.phase = Phase::Resolving);

        let mut courses = Vec::with_capacity(self.crns.len());
        for crn in &self.crns {
            reporter.update(|p| p.current = Some(crn.clone()));
            match resolve_course_name(self.lookup.as_ref(), crn).await {
                Ok(name) => {
                    tracing::info!(crn = %crn, name = %name, "monitoring course");
                    reporter.emit(MonitorEvent::CourseResolved {
                        crn: crn.clone(),
                        name: name.clone(),
                    });
                    courses.push(TrackedCourse::new(crn.clone(), name));
                }
                Err(e) => {
                    tracing::warn!(
                        crn = %crn,
                        error = %e,
                        "couldn't get course name; removing from monitor list"
                    );
                    reporter.emit(MonitorEvent::CourseSkipped {
                        crn: crn.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if courses.is_empty() {
            return Err(SniperError::NoValidTargets);
        }

        let state = MonitorState::new(courses);
        reporter.update(|p| {
            p.current = None;
            p.total = state.total();
            p.found = state.found();
        });
        Ok(state)
    }

    /// Check one course and handle a transition to found.
    async fn check_course(
        &self,
        state: &mut MonitorState,
        idx: usize,
        cycle_start: DateTime<Local>,
        reporter: &Reporter,
    ) {
        let Some(course) = state.course(idx).cloned() else {
            return;
        };
        reporter.update(|p| p.current = Some(course.crn.clone()));

        match is_section_open(self.lookup.as_ref(), &course.crn).await {
            Err(e) => {
                tracing::warn!(
                    crn = %course.crn,
                    attempt = state.attempt(),
                    error = %e,
                    "availability check failed"
                );
                reporter.emit(MonitorEvent::CheckFailed {
                    crn: course.crn,
                    at: cycle_start,
                    error: e.to_string(),
                });
            }
            Ok(false) => {
                tracing::debug!(crn = %course.crn, "no open seat");
            }
            Ok(true) => {
                if !state.mark_found(idx) {
                    return;
                }
                let found = state.found();
                reporter.update(|p| p.found = found);
                tracing::info!(crn = %course.crn, name = %course.name, "open seat found");
                reporter.emit(MonitorEvent::SeatOpened {
                    crn: course.crn.clone(),
                    name: course.name.clone(),
                });
                self.notify(&course, reporter).await;
            }
        }
    }

    /// Send the seat-open email. Failures are reported, never propagated.
    async fn notify(&self, course: &TrackedCourse, reporter: &Reporter) {
        let Some(destination) = self.destination.as_deref() else {
            tracing::info!(crn = %course.crn, "no email configured; skipping notification");
            reporter.emit(MonitorEvent::NotificationSkipped {
                crn: course.crn.clone(),
            });
            return;
        };

        let body = course.open_seat_message();
        match self
            .notifier
            .send(destination, NOTIFICATION_SUBJECT, &body)
            .await
        {
            Ok(()) => {
                tracing::info!(crn = %course.crn, to = destination, "notification sent");
                reporter.emit(MonitorEvent::NotificationSent {
                    crn: course.crn.clone(),
                    destination: destination.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(crn = %course.crn, error = %e, "notification failed");
                reporter.emit(MonitorEvent::NotificationFailed {
                    crn: course.crn.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
}

// ── MonitorHandle ─────────────────────────────────────────────────────────────

/// A handle to the background monitoring task.
pub struct MonitorHandle {
    handle: JoinHandle<Result<RunSummary>>,
}

impl MonitorHandle {
    /// Immediately abort the monitoring loop.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the loop to finish.
    ///
    /// The outer error is set when the task panicked or was aborted.
    pub async fn join(self) -> std::result::Result<Result<RunSummary>, tokio::task::JoinError> {
        self.handle.await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
