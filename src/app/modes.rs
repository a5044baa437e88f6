//! Input mode state machine.
//!
//! The mode decides how key events are interpreted and which footer hints are
//! shown. An open modal takes precedence over every mode; see
//! [`crate::forms::Modal`].
//!
//! ```text
//! Normal ──/──▶ Search ──Esc/Enter──▶ Normal
//!   │ f                                  ▲
//!   ▼                                    │
//! Filter ───────────Esc/Enter────────────┤
//!   g / :                                │
//! Palette ─────────Esc/Enter─────────────┘
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Row navigation and single-key commands.
    #[default]
    Normal,

    /// Typed characters edit the table's search term.
    Search,

    /// Tab moves between categorical filters, left/right cycles the focused one.
    Filter,

    /// Typed characters edit the "go to screen" query.
    Palette,
}

impl InputMode {
    /// Whether printable characters are captured as text input.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        matches!(self, Self::Search | Self::Palette)
    }
}
