//! Console front end for the seat monitor.
//!
//! [`ConsoleApp`] keeps a one-row inline viewport at the bottom of the normal
//! terminal scrollback. Monitor events are printed above it with
//! `insert_before`, and the row itself is redrawn every tick from the latest
//! progress snapshot.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame, Terminal, TerminalOptions, Viewport,
};

use sniper_runtime::events::{MonitorEvent, MonitorReceivers, Progress};

use crate::components::event_lines::event_lines;
use crate::components::header::{fetching_lines, Banner, ConfigBox};
use crate::components::status_line::StatusLine;
use crate::themes::Theme;

/// Spinner and countdown refresh period.
pub const TICK_RATE: Duration = Duration::from_millis(100);

// ── StartupInfo ───────────────────────────────────────────────────────────────

/// What the config box shows before polling starts.
#[derive(Debug, Clone)]
pub struct StartupInfo {
    pub crn_count: usize,
    pub email: Option<String>,
    pub interval_secs: u64,
    pub term: String,
}

// ── ConsoleApp ────────────────────────────────────────────────────────────────

pub struct ConsoleApp {
    pub theme: Theme,
    spinner_idx: usize,
    finished: bool,
}

impl ConsoleApp {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            spinner_idx: 0,
            finished: false,
        }
    }

    /// Whether an `AllFound` event has been seen.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Banner, config box and the "fetching" notice.
    pub fn intro_lines(&self, info: &StartupInfo) -> Vec<Line<'static>> {
        let theme = &self.theme;
        let mut lines: Vec<Line<'static>> = Banner::new(theme)
            .to_lines()
            .into_iter()
            .map(into_owned)
            .collect();
        lines.extend(
            ConfigBox {
                crn_count: info.crn_count,
                email: info.email.as_deref(),
                interval_secs: info.interval_secs,
                term: &info.term,
                theme,
            }
            .to_lines()
            .into_iter()
            .map(into_owned),
        );
        lines.extend(fetching_lines(theme));
        lines
    }

    /// Record `event` and return the lines to print for it.
    pub fn handle_event(&mut self, event: &MonitorEvent) -> Vec<Line<'static>> {
        if matches!(event, MonitorEvent::AllFound { .. }) {
            self.finished = true;
        }
        event_lines(event, &self.theme)
    }

    /// Lines printed once the monitor has gone away. Empty after a complete
    /// run; otherwise a notice that monitoring stopped early.
    pub fn closing_lines(&self) -> Vec<Line<'static>> {
        if self.finished {
            return Vec::new();
        }
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "✗  Monitoring stopped before every course was found",
                self.theme.error,
            )),
        ]
    }

    /// Advance the spinner by one frame.
    pub fn tick(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn status_line(&self, progress: &Progress, now: Instant) -> Line<'static> {
        into_owned(StatusLine::new(progress, self.spinner_idx, now, &self.theme).to_line())
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Print the intro, then mirror the monitor until its event channel
    /// closes.
    ///
    /// Never enables raw mode, so Ctrl+C still reaches the process as a
    /// signal and can be handled by the caller.
    pub async fn run(mut self, info: &StartupInfo, mut rx: MonitorReceivers) -> io::Result<()> {
        let mut terminal = Terminal::with_options(
            CrosstermBackend::new(io::stdout()),
            TerminalOptions {
                viewport: Viewport::Inline(1),
            },
        )?;

        print_lines(&mut terminal, self.intro_lines(info))?;

        let mut ticker = tokio::time::interval(TICK_RATE);
        loop {
            tokio::select! {
                event = rx.events.recv() => match event {
                    Some(event) => {
                        let lines = self.handle_event(&event);
                        print_lines(&mut terminal, lines)?;
                    }
                    None => break,
                },
                _ = ticker.tick() => self.tick(),
            }

            let progress = rx.progress.borrow().clone();
            let status = self.status_line(&progress, Instant::now());
            terminal.draw(|frame| render_status(frame, status))?;
        }

        terminal.draw(|frame| render_status(frame, Line::from("")))?;
        print_lines(&mut terminal, self.closing_lines())?;
        terminal.show_cursor()?;
        Ok(())
    }
}

impl Default for ConsoleApp {
    fn default() -> Self {
        Self::new(Theme::detect())
    }
}

// ── Terminal helpers ──────────────────────────────────────────────────────────

fn print_lines(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    lines: Vec<Line<'static>>,
) -> io::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    terminal.insert_before(height, |buf| {
        Paragraph::new(lines).render(buf.area, buf);
    })
}

fn render_status(frame: &mut Frame, status: Line<'static>) {
    frame.render_widget(Paragraph::new(status), frame.area());
}

fn into_owned(line: Line<'_>) -> Line<'static> {
    Line::from(
        line.spans
            .into_iter()
            .map(|span| Span::styled(span.content.into_owned(), span.style))
            .collect::<Vec<_>>(),
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::header::line_text;
    use sniper_runtime::events::{Phase, Reporter};

    fn info() -> StartupInfo {
        StartupInfo {
            crn_count: 2,
            email: Some("student@vt.edu".to_string()),
            interval_secs: 30,
            term: "202601".to_string(),
        }
    }

    #[test]
    fn test_intro_contains_banner_box_and_notice() {
        let app = ConsoleApp::new(Theme::vt());
        let text: Vec<String> = app.intro_lines(&info()).iter().map(line_text).collect();

        assert!(text.iter().any(|l| l.contains("Virginia Tech Course Availability Monitor")));
        assert!(text.iter().any(|l| l.contains("Monitoring 2 CRNs")));
        assert!(text.iter().any(|l| l.contains("student@vt.edu")));
        assert!(text
            .last()
            .map(|l| l.is_empty())
            .unwrap_or(false));
        assert!(text.iter().any(|l| l.contains("Fetching course information...")));
    }

    #[test]
    fn test_handle_event_marks_finished() {
        let mut app = ConsoleApp::new(Theme::vt());
        app.handle_event(&MonitorEvent::MonitoringStarted { total: 1 });
        assert!(!app.finished());

        let lines = app.handle_event(&MonitorEvent::AllFound { attempts: 2 });
        assert!(app.finished());
        assert!(lines
            .iter()
            .any(|l| line_text(l).contains("All courses found!")));
    }

    #[test]
    fn test_closing_lines_follow_outcome() {
        let mut app = ConsoleApp::new(Theme::vt());
        let early: Vec<String> = app.closing_lines().iter().map(line_text).collect();
        assert!(early
            .iter()
            .any(|l| l.contains("Monitoring stopped before every course was found")));

        app.handle_event(&MonitorEvent::AllFound { attempts: 1 });
        assert!(app.closing_lines().is_empty());
    }

    #[test]
    fn test_tick_advances_spinner() {
        let mut app = ConsoleApp::new(Theme::basic());
        let progress = Progress::default();
        let now = Instant::now();

        let first = line_text(&app.status_line(&progress, now));
        app.tick();
        let second = line_text(&app.status_line(&progress, now));
        assert_ne!(first, second);
        assert!(second.starts_with('⠙'));
    }

    #[tokio::test]
    async fn test_status_follows_progress_channel() {
        let (reporter, rx) = Reporter::channel();
        let app = ConsoleApp::new(Theme::vt());

        reporter.update(|p| {
            p.phase = Phase::Checking;
            p.attempt = 4;
            p.current = Some("13472".to_string());
        });

        let progress = rx.progress.borrow().clone();
        let text = line_text(&app.status_line(&progress, Instant::now()));
        assert_eq!(text, "⠋ Attempt #4 │ Checking 13472...");
    }
}
