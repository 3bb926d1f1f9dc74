//! Per-run course bookkeeping owned by the monitor loop.

use sniper_core::models::TrackedCourse;

/// Tracked courses plus the counters the loop and the UI report on.
///
/// `remaining` always equals the number of courses with `found == false`,
/// and only [`MonitorState::mark_found`] changes either.
#[derive(Debug, Clone)]
pub struct MonitorState {
    courses: Vec<TrackedCourse>,
    remaining: usize,
    attempt: u32,
}

impl MonitorState {
    /// Start a run over `courses`, in the order given.
    pub fn new(courses: Vec<TrackedCourse>) -> Self {
        let remaining = courses.iter().filter(|c| !c.found).count();
        Self {
            courses,
            remaining,
            attempt: 0,
        }
    }

    pub fn courses(&self) -> &[TrackedCourse] {
        &self.courses
    }

    pub fn course(&self, idx: usize) -> Option<&TrackedCourse> {
        self.courses.get(idx)
    }

    pub fn total(&self) -> usize {
        self.courses.len()
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn found(&self) -> usize {
        self.courses.len() - self.remaining
    }

    /// Number of the current cycle; 0 before the first one starts.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    /// Advance to the next cycle and return its number (1 for the first).
    pub fn begin_cycle(&mut self) -> u32 {
        self.attempt += 1;
        self.attempt
    }

    /// Indices of courses still waiting for a seat, in configured order.
    pub fn pending(&self) -> Vec<usize> {
        self.courses
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.found)
            .map(|(i, _)| i)
            .collect()
    }

    /// Flip course `idx` to found.
    ///
    /// Returns `true` only on the false → true transition; repeated calls and
    /// out-of-range indices change nothing.
    pub fn mark_found(&mut self, idx: usize) -> bool {
        match self.courses.get_mut(idx) {
            Some(course) if !course.found => {
                course.found = true;
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn into_courses(self) -> Vec<TrackedCourse> {
        self.courses
    }
}
