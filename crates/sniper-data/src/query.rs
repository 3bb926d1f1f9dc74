//! Timetable search form.

/// Every search parameter sent to the timetable, one request's worth.
///
/// Subject, schedule type, session and course number are always wildcarded;
/// the section is selected by CRN alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub crn: String,
    pub term: String,
    pub campus: String,
    /// Restrict results to sections with open seats.
    pub open_only: bool,
}

impl QueryParams {
    pub fn new(
        crn: impl Into<String>,
        term: impl Into<String>,
        campus: impl Into<String>,
        open_only: bool,
    ) -> Self {
        Self {
            crn: crn.into(),
            term: term.into(),
            campus: campus.into(),
            open_only,
        }
    }

    /// Form-encoded field list, in the order the timetable page submits them.
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("CAMPUS", self.campus.as_str()),
            ("TERMYEAR", self.term.as_str()),
            ("CORE_CODE", "AR%"),
            ("subj_code", "%"),
            ("SCHDTYPE", "%"),
            ("CRSE_NUMBER", ""),
            ("crn", self.crn.as_str()),
            ("sess_code", "%"),
            ("BTN_PRESSED", "FIND class sections"),
            ("inst_name", ""),
            ("disp_comments_in", ""),
        ];
        if self.open_only {
            fields.push(("open_only", "on"));
        }
        fields
    }
}
