//! Terminal user interface for dirscope.
//!
//! This crate provides an interactive TUI for exploring disk usage,
//! built with ratatui.
//!
//! # Overview
//!
//! The view is a single explorer: the children of one directory sorted
//! largest-first, each with its aggregated subtree size, a share bar,
//! and a details panel for the selected entry. A spinner thread keeps
//! the status line animated between repaints.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dirscope_core::ScanOptions;
//!
//! dirscope_tui::run(ScanOptions::new("/path/to/explore")).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `Enter`/`l` - Drill into directory
//! - `Backspace`/`h` - Navigate back
//! - `a`/`.` - Toggle hidden entries
//! - `i` - Toggle details panel
//! - `t` - Toggle theme
//! - `r` - Rescan
//! - `?` - Help
//! - `q` - Quit

pub mod alert;
pub mod app;
mod event;
mod theme;
pub mod ticker;
mod ui;

pub use alert::{AlertDisplay, AlertKind, ButtonSet, ConsoleAlert};
pub use app::{App, AppResult};
pub use theme::Theme;
pub use ticker::{RedrawRequest, SpinnerTicker};

use dirscope_core::ScanOptions;

/// Run the TUI application.
///
/// Startup failures (unreadable root, unresolvable volume) are reported
/// through the console alert backend before the terminal is ever put
/// into raw mode.
pub fn run(options: ScanOptions) -> AppResult<()> {
    let app = match App::new(options) {
        Ok(app) => app,
        Err(error) => {
            eprintln!("{}", error.report());
            ConsoleAlert.display(
                AlertKind::Error,
                ButtonSet::Ok,
                "Startup failed",
                &error.message(),
                0,
            );
            return Err(error.into());
        }
    };

    // Runtime drives the event stream and the redraw queue.
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
