//! Main application state and event loop.

use std::collections::HashMap;
use std::path::PathBuf;

use compact_str::CompactString;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::debug;

use dirscope_core::{DirectoryEntry, DirectoryStats, OperationError, ScanOptions, SpaceInfo};
use dirscope_scan::{Descend, Scanner};

use crate::alert::AlertState;
use crate::event::KeyAction;
use crate::theme::Theme;
use crate::ticker::SpinnerTicker;
use crate::ui;

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Number of rows to move on page up/down.
const PAGE_SIZE: usize = 10;

/// Capacity of the redraw queue; pending requests coalesce into one paint.
const REDRAW_CHANNEL_SIZE: usize = 32;

/// One display row: an aggregation entry joined with the child's
/// directly observed metadata for the details panel.
#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub(crate) name: CompactString,
    pub(crate) stats: DirectoryStats,
    pub(crate) entry: DirectoryEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Quit,
}

/// Main application state.
///
/// Scans run synchronously on the UI thread; their results are owned by
/// the app and never shared with the spinner worker.
pub struct App {
    scanner: Scanner,
    options: ScanOptions,
    /// Directory currently being viewed (drill-down target).
    pub(crate) root: PathBuf,
    /// Stack of (path, selection) for navigating back up.
    history: Vec<(PathBuf, usize)>,
    /// Largest-first rows of the current aggregation.
    pub(crate) rows: Vec<Row>,
    /// Sum over all children, including hidden ones.
    pub(crate) total_size: u64,
    pub(crate) space: SpaceInfo,
    pub(crate) selected: usize,
    pub(crate) theme: Theme,
    pub(crate) show_details: bool,
    pub(crate) show_help: bool,
    pub(crate) alert: Option<AlertState>,
    spinner: Option<SpinnerTicker>,
    mode: Mode,
    needs_redraw: bool,
}

impl App {
    /// Create the application and perform the initial scan.
    ///
    /// Fails when the root's volume cannot be resolved or the first
    /// aggregation pass aborts; the caller decides how to present that.
    pub fn new(options: ScanOptions) -> Result<Self, OperationError> {
        let mut scanner = Scanner::new();
        let root = options.root.clone();
        let space = scanner.space_info(&root)?;

        let mut app = Self {
            scanner,
            options,
            root,
            history: Vec::new(),
            rows: Vec::new(),
            total_size: 0,
            space,
            selected: 0,
            theme: Theme::dark(),
            show_details: true,
            show_help: false,
            alert: None,
            spinner: None,
            mode: Mode::Normal,
            needs_redraw: true,
        };
        app.rescan()?;
        Ok(app)
    }

    /// Run the application event loop until quit.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let (redraw_tx, mut redraw_rx) = mpsc::channel(REDRAW_CHANNEL_SIZE);
        self.spinner = Some(SpinnerTicker::start(redraw_tx));

        let mut events = EventStream::new();

        while self.mode != Mode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| ui::render(frame, &self))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    if let Event::Key(key) = event {
                        if key.kind == KeyEventKind::Press {
                            self.handle_key(key);
                        }
                    }
                    self.needs_redraw = true;
                }

                Some(_) = redraw_rx.recv() => {
                    // Coalesce every queued request into the next paint.
                    while redraw_rx.try_recv().is_ok() {}
                    self.needs_redraw = true;
                }
            }
        }

        if let Some(mut spinner) = self.spinner.take() {
            spinner.stop();
        }
        debug!("event loop exited");
        Ok(())
    }

    /// Current spinner frame for the status line animation.
    pub(crate) fn spinner_frame(&self) -> usize {
        self.spinner.as_ref().map(|t| t.frame()).unwrap_or(0)
    }

    /// Re-list and re-aggregate the current root, rebuilding the rows.
    fn rescan(&mut self) -> Result<(), OperationError> {
        let children = self.scanner.list_directory(&self.root, Descend::Flat)?;
        let index = self.scanner.aggregate_sizes(&self.root)?;
        // Volume stats are recomputed on demand, never cached.
        self.space = self.scanner.space_info(&self.root)?;

        let mut by_path: HashMap<PathBuf, DirectoryEntry> = children
            .into_iter()
            .map(|entry| (entry.path.clone(), entry))
            .collect();

        let mut rows = Vec::with_capacity(index.len());
        for (path, stats) in index.sorted_by_size() {
            let entry = by_path
                .remove(path)
                .unwrap_or_else(|| DirectoryEntry::missing(path.clone()));
            let name = entry.name();
            if !self.options.keeps(&name) {
                continue;
            }
            rows.push(Row {
                name,
                stats: *stats,
                entry,
            });
        }

        self.total_size = index.total_size();
        self.rows = rows;
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
        self.needs_redraw = true;
        Ok(())
    }

    /// Rescan, surfacing any failure as an in-loop error alert.
    fn refresh(&mut self) {
        if let Err(error) = self.rescan() {
            self.alert = Some(AlertState::error("Scan failed", error.message()));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // An open alert captures all input until resolved.
        if let Some(alert) = &self.alert {
            if alert.resolve(key).is_some() {
                self.alert = None;
            }
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        match KeyAction::from_key_event(key) {
            KeyAction::Quit | KeyAction::ForceQuit => self.mode = Mode::Quit,
            KeyAction::MoveUp => self.move_selection(-1),
            KeyAction::MoveDown => self.move_selection(1),
            KeyAction::JumpToTop => self.selected = 0,
            KeyAction::JumpToBottom => {
                self.selected = self.rows.len().saturating_sub(1);
            }
            KeyAction::PageUp => self.move_selection(-(PAGE_SIZE as isize)),
            KeyAction::PageDown => self.move_selection(PAGE_SIZE as isize),
            KeyAction::DrillDown => self.drill_down(),
            KeyAction::NavigateBack => self.navigate_back(),
            KeyAction::ToggleHidden => {
                self.options.show_hidden = !self.options.show_hidden;
                self.refresh();
            }
            KeyAction::ToggleDetails => self.show_details = !self.show_details,
            KeyAction::ToggleTheme => self.theme = self.theme.toggle(),
            KeyAction::ToggleHelp => self.show_help = true,
            KeyAction::Refresh => self.refresh(),
            KeyAction::None => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.rows.len() - 1;
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, last as isize) as usize;
    }

    /// Enter the selected directory, remembering where we came from.
    fn drill_down(&mut self) {
        let Some(row) = self.rows.get(self.selected) else {
            return;
        };
        if !row.stats.is_directory || !row.entry.exists {
            return;
        }
        let next = row.entry.path.clone();
        self.history.push((self.root.clone(), self.selected));
        self.root = next;
        self.selected = 0;
        self.refresh();
        // A failed drill-down should not strand the view in the
        // unreadable directory.
        if self.alert.is_some() {
            if let Some((previous, selected)) = self.history.pop() {
                self.root = previous;
                self.selected = selected;
                let _ = self.rescan();
            }
        }
    }

    fn navigate_back(&mut self) {
        let Some((previous, selected)) = self.history.pop() else {
            return;
        };
        self.root = previous;
        self.refresh();
        self.selected = selected.min(self.rows.len().saturating_sub(1));
    }

    /// Scan options the app was started with.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }
}
