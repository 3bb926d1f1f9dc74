use ratatui::style::{Color, Modifier, Style};

/// Chicago Maroon `#630031`.
pub const VT_MAROON: Color = Color::Rgb(99, 0, 49);
/// Burnt Orange `#CF4420`.
pub const VT_ORANGE: Color = Color::Rgb(207, 68, 32);

/// Whether the terminal advertises 24-bit colour (`COLORTERM` / `TERM`).
pub fn supports_truecolor() -> bool {
    crossterm::style::available_color_count() == u16::MAX
}

/// Every style used by the sniper-ui components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Branding ─────────────────────────────────────────────────────────────
    pub banner_top: Style,
    pub banner_mid: Style,
    pub banner_bottom: Style,
    /// Box borders and dividers.
    pub frame: Style,
    /// Icons and highlighted identifiers.
    pub accent: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub success: Style,
    pub success_bold: Style,
    pub error: Style,
    pub done: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Virginia Tech maroon and orange in true colour.
    pub fn vt() -> Self {
        Self::with_palette(VT_MAROON, VT_ORANGE)
    }

    /// 16-colour approximation for terminals without true colour.
    pub fn basic() -> Self {
        Self::with_palette(Color::Magenta, Color::LightRed)
    }

    /// Pick [`Theme::vt`] or [`Theme::basic`] from the terminal's capabilities.
    pub fn detect() -> Self {
        if supports_truecolor() {
            Self::vt()
        } else {
            Self::basic()
        }
    }

    fn with_palette(maroon: Color, orange: Color) -> Self {
        Self {
            banner_top: Style::default().fg(orange).add_modifier(Modifier::BOLD),
            banner_mid: Style::default().fg(orange),
            banner_bottom: Style::default().fg(maroon),
            frame: Style::default().fg(maroon),
            accent: Style::default().fg(orange),

            text: Style::default().fg(Color::White),
            dim: Style::default().add_modifier(Modifier::DIM),
            bold: Style::default().add_modifier(Modifier::BOLD),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            success: Style::default().fg(Color::Green),
            success_bold: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
            done: Style::default().fg(orange).add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::vt()
    }
}
