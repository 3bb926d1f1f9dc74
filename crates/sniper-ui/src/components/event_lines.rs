use crate::components::header::{box_bottom, box_line, box_top, BOX_WIDTH};
use crate::themes::Theme;
use ratatui::text::{Line, Span};
use sniper_runtime::events::MonitorEvent;

/// Turn one monitor event into the lines printed above the status row.
///
/// Every event produces at least one line; the caller inserts them verbatim.
pub fn event_lines<'a>(event: &MonitorEvent, theme: &Theme) -> Vec<Line<'a>> {
    let t = theme;
    match event {
        MonitorEvent::CourseResolved { crn, name } => vec![Line::from(vec![
            Span::raw("  "),
            Span::styled("✓", t.success),
            Span::raw(" "),
            Span::styled(crn.clone(), t.accent),
            Span::styled(" ▸ ", t.dim),
            Span::raw(name.clone()),
        ])],

        MonitorEvent::CourseSkipped { crn, error } => vec![Line::from(vec![
            Span::raw("  "),
            Span::styled("✗", t.error),
            Span::raw(" "),
            Span::styled(crn.clone(), t.dim),
            Span::raw(": "),
            Span::styled(format!("{}, skipping", error), t.error),
        ])],

        MonitorEvent::MonitoringStarted { .. } => divider(t),

        MonitorEvent::CheckFailed { crn, at, error } => vec![Line::from(vec![
            Span::styled("✗", t.error),
            Span::raw(" "),
            Span::styled(format!("[{}]", at.format("%H:%M:%S")), t.dim),
            Span::raw(format!(" Error checking {}: {}", crn, error)),
        ])],

        MonitorEvent::SeatOpened { crn, name } => seat_available(name, crn, t),

        MonitorEvent::NotificationSent { destination, .. } => vec![
            Line::from(vec![
                Span::raw("  "),
                Span::styled("✉", t.accent),
                Span::raw(" "),
                Span::styled(format!("Notification sent to {}", destination), t.dim),
            ]),
            Line::from(""),
        ],

        MonitorEvent::NotificationFailed { crn, error } => vec![
            Line::from(vec![
                Span::raw("  "),
                Span::styled("✗", t.error),
                Span::raw(" "),
                Span::styled(
                    format!("Failed to send notification for {}: {}", crn, error),
                    t.error,
                ),
            ]),
            Line::from(""),
        ],

        MonitorEvent::NotificationSkipped { .. } => vec![
            Line::from(vec![
                Span::raw("  "),
                Span::styled("✉", t.dim),
                Span::raw(" "),
                Span::styled("No email configured, notification skipped", t.dim),
            ]),
            Line::from(""),
        ],

        MonitorEvent::AllFound { .. } => vec![
            Line::from(""),
            Line::from(Span::styled("✓  All courses found! Exiting...", t.done)),
        ],
    }
}

fn divider<'a>(theme: &Theme) -> Vec<Line<'a>> {
    vec![
        Line::from(""),
        Line::from(Span::styled("─".repeat(BOX_WIDTH + 2), theme.frame)),
        Line::from(""),
    ]
}

fn seat_available<'a>(name: &str, crn: &str, theme: &Theme) -> Vec<Line<'a>> {
    let green = Theme {
        frame: theme.success,
        ..theme.clone()
    };
    vec![
        Line::from(""),
        box_top(&green),
        box_line(
            &green,
            vec![Span::styled("✓  SEAT AVAILABLE!", theme.success_bold)],
        ),
        box_line(
            &green,
            vec![Span::raw("  "), Span::styled(name.to_string(), theme.text)],
        ),
        box_line(
            &green,
            vec![Span::raw("  "), Span::styled(format!("CRN: {}", crn), theme.dim)],
        ),
        box_bottom(&green),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
