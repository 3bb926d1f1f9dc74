use serde::{Deserialize, Serialize};

/// Subject line of every seat-open email.
pub const NOTIFICATION_SUBJECT: &str = "VT Course Section Open!";

/// A course section being watched for an open seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedCourse {
    /// Course Reference Number.
    pub crn: String,
    /// Course title as shown in the timetable.
    pub name: String,
    /// Set once an open seat has been seen. Never cleared.
    pub found: bool,
}

impl TrackedCourse {
    /// A freshly resolved course that has not been seen open yet.
    pub fn new(crn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            crn: crn.into(),
            name: name.into(),
            found: false,
        }
    }

    /// The one-line message used for the notification body.
    ///
    /// Format: `"OPEN SEAT: Data Structures and Algorithms (CRN: 13466)"`
    pub fn open_seat_message(&self) -> String {
        format!("OPEN SEAT: {} (CRN: {})", self.name, self.crn)
    }
}
