use crate::themes::Theme;
use ratatui::text::{Line, Span};
use sniper_core::formatting::truncate;
use unicode_width::UnicodeWidthStr;

/// ASCII-art title, six rows.
pub const BANNER: [&str; 6] = [
    "██╗   ██╗████████╗    ███████╗███╗   ██╗██╗██████╗ ███████╗██████╗ ",
    "██║   ██║╚══██╔══╝    ██╔════╝████╗  ██║██║██╔══██╗██╔════╝██╔══██╗",
    "██║   ██║   ██║       ███████╗██╔██╗ ██║██║██████╔╝█████╗  ██████╔╝",
    "╚██╗ ██╔╝   ██║       ╚════██║██║╚██╗██║██║██╔═══╝ ██╔══╝  ██╔══██╗",
    " ╚████╔╝    ██║       ███████║██║ ╚████║██║██║     ███████╗██║  ██║",
    "  ╚═══╝     ╚═╝       ╚══════╝╚═╝  ╚═══╝╚═╝╚═╝     ╚══════╝╚═╝  ╚═╝",
];

pub const SUBTITLE: &str = "Virginia Tech Course Availability Monitor";

/// Horizontal run of box borders and dividers.
pub const BOX_WIDTH: usize = 50;

/// Longest email shown in the config box before it is cut.
const EMAIL_DISPLAY_LEN: usize = 35;

// ── Banner ───────────────────────────────────────────────────────────────────

/// Title art in orange fading to maroon, then a centred dim subtitle.
pub struct Banner<'a> {
    pub theme: &'a Theme,
}

impl<'a> Banner<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from("")];
        for (i, row) in BANNER.iter().enumerate() {
            let style = match i {
                0 | 1 => self.theme.banner_top,
                2 | 3 => self.theme.banner_mid,
                _ => self.theme.banner_bottom,
            };
            lines.push(Line::from(Span::styled(*row, style)));
        }

        let art_width = BANNER[0].width();
        let pad = art_width.saturating_sub(SUBTITLE.width()) / 2;
        lines.push(Line::from(Span::styled(
            format!("{}{}", " ".repeat(pad), SUBTITLE),
            self.theme.dim,
        )));
        lines.push(Line::from(""));
        lines
    }
}

// ── ConfigBox ────────────────────────────────────────────────────────────────

/// Summary of what is about to be monitored.
///
/// Drawn open on the right so that wide glyphs never break the alignment:
///
/// ```text
/// ╭──────────────────────────────────────────────────
/// │ ◎  Monitoring 2 CRNs
/// │ ✉  student@vt.edu
/// │ ◷  Interval: 30s  ▦  Term: 202601
/// ╰──────────────────────────────────────────────────
/// ```
pub struct ConfigBox<'a> {
    pub crn_count: usize,
    pub email: Option<&'a str>,
    pub interval_secs: u64,
    pub term: &'a str,
    pub theme: &'a Theme,
}

impl<'a> ConfigBox<'a> {
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let t = self.theme;
        let mut lines = vec![box_top(t)];

        lines.push(box_line(
            t,
            vec![
                Span::styled("◎  ", t.accent),
                Span::raw("Monitoring "),
                Span::styled(format!("{} CRNs", self.crn_count), t.value),
            ],
        ));

        if let Some(email) = self.email {
            lines.push(box_line(
                t,
                vec![
                    Span::styled("✉  ", t.accent),
                    Span::styled(truncate(email, EMAIL_DISPLAY_LEN), t.text),
                ],
            ));
        }

        lines.push(box_line(
            t,
            vec![
                Span::styled("◷  ", t.accent),
                Span::raw("Interval: "),
                Span::styled(format!("{}s", self.interval_secs), t.value),
                Span::styled("  ▦  ", t.accent),
                Span::raw("Term: "),
                Span::styled(self.term.to_string(), t.value),
            ],
        ));

        lines.push(box_bottom(t));
        lines.push(Line::from(""));
        lines
    }
}

/// Shown once while CRNs are being resolved.
pub fn fetching_lines<'a>(theme: &Theme) -> Vec<Line<'a>> {
    vec![
        Line::from(Span::styled("⌕  Fetching course information...", theme.dim)),
        Line::from(""),
    ]
}

// ── Box helpers ──────────────────────────────────────────────────────────────

pub(crate) fn box_top<'a>(theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(format!("╭{}", "─".repeat(BOX_WIDTH)), theme.frame))
}

pub(crate) fn box_bottom<'a>(theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(format!("╰{}", "─".repeat(BOX_WIDTH)), theme.frame))
}

pub(crate) fn box_line<'a>(theme: &Theme, content: Vec<Span<'a>>) -> Line<'a> {
    let mut spans = vec![Span::styled("│ ", theme.frame)];
    spans.extend(content);
    Line::from(spans)
}

/// Flatten a line's spans into plain text.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
