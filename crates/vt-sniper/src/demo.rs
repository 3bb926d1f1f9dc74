//! Scripted run for screen recordings.
//!
//! The real monitor loop and console app run against an in-memory timetable:
//! `13466` opens on the second cycle and `13472` on the third. Notifications
//! are recorded, never sent.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sniper_core::error::Result;
use sniper_core::notifications::RecordingNotifier;
use sniper_data::client::CourseLookup;
use sniper_data::table::{ResultsTable, Row};
use sniper_runtime::orchestrator::SeatMonitor;
use sniper_ui::app::StartupInfo;
use tokio::sync::Mutex;

pub const DEMO_EMAIL: &str = "student@vt.edu";
pub const DEMO_TERM: &str = "202601";
pub const DEMO_INTERVAL: Duration = Duration::from_secs(3);

/// How long each fake request takes, so the spinner is visible.
const DEMO_LATENCY: Duration = Duration::from_millis(1500);

/// `(crn, course number, title, cycle it opens on)`
const DEMO_COURSES: [(&str, &str, &str, u32); 2] = [
    ("13466", "CS-3114", "Data Structures and Algorithms", 2),
    ("13472", "CS-3214", "Computer Systems", 3),
];

// ── ScriptedTimetable ─────────────────────────────────────────────────────────

/// Fake timetable whose sections open after a fixed number of open-only
/// searches.
pub struct ScriptedTimetable {
    courses: HashMap<String, (String, String, u32)>,
    open_checks: Mutex<HashMap<String, u32>>,
    latency: Duration,
}

impl ScriptedTimetable {
    pub fn new() -> Self {
        let courses = DEMO_COURSES
            .iter()
            .map(|(crn, number, title, opens_on)| {
                (
                    crn.to_string(),
                    (number.to_string(), title.to_string(), *opens_on),
                )
            })
            .collect();
        Self {
            courses,
            open_checks: Mutex::new(HashMap::new()),
            latency: DEMO_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn crns() -> Vec<String> {
        DEMO_COURSES.iter().map(|(crn, ..)| crn.to_string()).collect()
    }
}

impl Default for ScriptedTimetable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseLookup for ScriptedTimetable {
    async fn lookup(&self, crn: &str, open_only: bool) -> Result<ResultsTable> {
        tokio::time::sleep(self.latency).await;

        let Some((number, title, opens_on)) = self.courses.get(crn) else {
            return Ok(ResultsTable::default());
        };

        if open_only {
            let mut checks = self.open_checks.lock().await;
            let count = checks.entry(crn.to_string()).or_insert(0);
            *count += 1;
            if *count < *opens_on {
                return Ok(ResultsTable::default());
            }
        }

        let columns = vec![crn.to_string(), number.clone(), title.clone()];
        Ok(ResultsTable {
            text: columns.join(" "),
            rows: vec![Row { columns }],
        })
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

/// Monitor, recorder and config-box contents for a demo run.
pub fn build() -> (SeatMonitor, RecordingNotifier, StartupInfo) {
    let notifier = RecordingNotifier::new();
    let crns = ScriptedTimetable::crns();
    let info = StartupInfo {
        crn_count: crns.len(),
        email: Some(DEMO_EMAIL.to_string()),
        interval_secs: DEMO_INTERVAL.as_secs(),
        term: DEMO_TERM.to_string(),
    };
    let monitor = SeatMonitor::new(
        Arc::new(ScriptedTimetable::new()),
        Arc::new(notifier.clone()),
        crns,
        DEMO_INTERVAL,
    )
    .with_destination(Some(DEMO_EMAIL.to_string()));
    (monitor, notifier, info)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
