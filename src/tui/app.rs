use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use ratatui::widgets::TableState;
use tracing::warn;

use crate::commands::{task_rows, TaskRow};
use crate::deadline::DeadlineFormatter;
use crate::models::{DoneFilter, Task};
use crate::snapshot::load_snapshot;

/// State of the watch view: a task snapshot and its countdowns as of `now`.
pub struct App<Tz: TimeZone> {
    pub path: PathBuf,
    pub formatter: DeadlineFormatter<Tz>,
    pub tasks: Vec<Task>,
    pub rows: Vec<TaskRow>,
    pub filter: DoneFilter,
    pub state: TableState,
    pub now: DateTime<Utc>,
    /// Last reload failure, shown until the next successful reload.
    pub error: Option<String>,
}

impl<Tz: TimeZone> App<Tz>
where
    Tz::Offset: fmt::Display,
{
    pub fn new(path: PathBuf, formatter: DeadlineFormatter<Tz>, tasks: Vec<Task>, now: DateTime<Utc>) -> Self {
        let mut app = App {
            path,
            formatter,
            tasks,
            rows: Vec::new(),
            filter: DoneFilter::Todo,
            state: TableState::default(),
            now,
            error: None,
        };
        app.refresh();
        app
    }

    /// Advances the clock and recomputes every countdown.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.now = now;
        self.refresh();
    }

    /// Rebuilds the rows, keeping the selection in range.
    pub fn refresh(&mut self) {
        self.rows = task_rows(&self.tasks, &self.formatter, self.filter, self.now);
        if self.rows.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.rows.len() {
                self.state.select(Some(self.rows.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Re-reads the snapshot file. On failure the previous tasks stay on screen.
    pub fn reload(&mut self) {
        match load_snapshot(&self.path) {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
            }
            Err(err) => {
                warn!(file = %self.path.display(), error = %err, "reload failed");
                self.error = Some(format!("{err:#}"));
            }
        }
        self.refresh();
    }

    /// Switches between open and completed tasks.
    pub fn toggle_filter(&mut self) {
        self.filter = self.filter.toggle();
        self.state.select(None);
        self.refresh();
    }

    /// Selects the next row, wrapping around.
    pub fn next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.rows.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous row, wrapping around.
    pub fn previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }
}
