use std::time::Instant;

use crate::themes::Theme;
use ratatui::text::{Line, Span};
use sniper_core::formatting::format_countdown;
use sniper_runtime::events::{Phase, Progress};

/// Braille spinner frames, advanced once per UI tick.
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// ── StatusLine ───────────────────────────────────────────────────────────────

/// The single live row under the scrolling event log.
///
/// | Phase     | Text                                                  |
/// |-----------|-------------------------------------------------------|
/// | Resolving | `⠋ Resolving courses...`                              |
/// | Checking  | `⠋ Attempt #3 │ Checking 13466...`                    |
/// | Waiting   | `⠋ Attempt #3 │ Found: 1/2 │ Next: 25s [14:02:11]`     |
/// | Done      | empty                                                 |
pub struct StatusLine<'a> {
    pub progress: &'a Progress,
    pub spinner_idx: usize,
    pub now: Instant,
    pub theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(progress: &'a Progress, spinner_idx: usize, now: Instant, theme: &'a Theme) -> Self {
        Self {
            progress,
            spinner_idx,
            now,
            theme,
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_idx % SPINNER.len()]
    }

    pub fn to_line(&self) -> Line<'a> {
        let t = self.theme;
        let p = self.progress;

        let mut spans = match p.phase {
            Phase::Done => return Line::from(""),
            Phase::Resolving => {
                return Line::from(vec![
                    Span::styled(self.spinner(), t.accent),
                    Span::styled(" Resolving courses...", t.dim),
                ])
            }
            Phase::Checking | Phase::Waiting => vec![
                Span::styled(self.spinner(), t.accent),
                Span::raw(" "),
                Span::styled(format!("Attempt #{}", p.attempt), t.bold),
                Span::styled(" │ ", t.dim),
            ],
        };

        if p.phase == Phase::Checking {
            spans.push(Span::raw("Checking "));
            spans.push(Span::styled(
                p.current.clone().unwrap_or_default(),
                t.accent,
            ));
            spans.push(Span::raw("..."));
            return Line::from(spans);
        }

        let next = p
            .time_to_next_check(self.now)
            .map(format_countdown)
            .unwrap_or_else(|| "--".to_string());
        let checked_at = p
            .cycle_started_at
            .map(|at| at.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "--:--:--".to_string());

        spans.extend([
            Span::raw("Found: "),
            Span::styled(p.found.to_string(), t.success),
            Span::styled(format!("/{}", p.total), t.dim),
            Span::styled(" │ ", t.dim),
            Span::raw("Next: "),
            Span::styled(next, t.accent),
            Span::styled(format!(" [{}]", checked_at), t.dim),
        ]);
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
