//! Alert dialog capability.
//!
//! One interface for user-facing alerts, regardless of how a backend
//! presents them. The return contract: 0 is the affirmative/default
//! button, 1 the secondary button, -1 means the alert could not be
//! displayed.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

/// Affirmative/default button was chosen.
pub const BUTTON_AFFIRMATIVE: i32 = 0;
/// Secondary button (Cancel/No) was chosen.
pub const BUTTON_SECONDARY: i32 = 1;
/// The alert could not be displayed.
pub const BUTTON_UNAVAILABLE: i32 = -1;

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Warning,
    Error,
}

impl AlertKind {
    /// Label shown in the alert header.
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::Info => "Info",
            AlertKind::Warning => "Warning",
            AlertKind::Error => "Error",
        }
    }
}

/// Buttons offered by an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSet {
    Ok,
    OkCancel,
    YesNo,
}

impl ButtonSet {
    /// Button labels, affirmative first.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            ButtonSet::Ok => &["OK"],
            ButtonSet::OkCancel => &["OK", "Cancel"],
            ButtonSet::YesNo => &["Yes", "No"],
        }
    }
}

/// Capability for displaying an alert and resolving a button choice.
pub trait AlertDisplay {
    /// Display an alert, blocking until a button is chosen or the
    /// timeout (0 = none) elapses. Returns the chosen button index per
    /// the contract above.
    fn display(
        &self,
        kind: AlertKind,
        buttons: ButtonSet,
        header: &str,
        body: &str,
        timeout_secs: u32,
    ) -> i32;
}

/// Fallback backend writing to standard error.
///
/// Used outside the TUI loop (startup failures). Cannot prompt, so it
/// always resolves to the affirmative button.
#[derive(Debug, Default)]
pub struct ConsoleAlert;

impl AlertDisplay for ConsoleAlert {
    fn display(
        &self,
        kind: AlertKind,
        _buttons: ButtonSet,
        header: &str,
        body: &str,
        _timeout_secs: u32,
    ) -> i32 {
        warn!(kind = kind.label(), header, "console alert");
        eprintln!("[{}] {header}", kind.label());
        eprintln!("{body}");
        BUTTON_AFFIRMATIVE
    }
}

/// An alert rendered as a modal inside the TUI loop.
///
/// The modal is ordinary UI state; key presses resolve to the same
/// button indices the capability contract defines.
#[derive(Debug, Clone)]
pub struct AlertState {
    pub kind: AlertKind,
    pub buttons: ButtonSet,
    pub header: String,
    pub body: String,
}

impl AlertState {
    /// Error alert with a single OK button.
    pub fn error(header: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            buttons: ButtonSet::Ok,
            header: header.into(),
            body: body.into(),
        }
    }

    /// Map a key press to a button index, or `None` if the key does not
    /// resolve the alert.
    pub fn resolve(&self, key: KeyEvent) -> Option<i32> {
        match (self.buttons, key.code) {
            (ButtonSet::Ok, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => {
                Some(BUTTON_AFFIRMATIVE)
            }
            (ButtonSet::OkCancel, KeyCode::Enter) => Some(BUTTON_AFFIRMATIVE),
            (ButtonSet::OkCancel, KeyCode::Esc) => Some(BUTTON_SECONDARY),
            (ButtonSet::YesNo, KeyCode::Enter | KeyCode::Char('y')) => Some(BUTTON_AFFIRMATIVE),
            (ButtonSet::YesNo, KeyCode::Esc | KeyCode::Char('n')) => Some(BUTTON_SECONDARY),
            _ => None,
        }
    }
}
