use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use tracing::warn;

use crate::deadline::{DeadlineFormatter, RemainingTime};
use crate::error::DeadlineError;
use crate::form::TaskForm;
use crate::models::{DoneFilter, Task};

/// Label shown in place of a countdown when a task's deadline cannot be read.
pub const INVALID_LABEL: &str = "不正な期限";

/// One task prepared for display in a listing.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub status: &'static str,
    /// Deadline as a local edit value, empty when unset or unreadable.
    pub deadline: String,
    pub remaining: Result<RemainingTime, DeadlineError>,
}

impl TaskRow {
    pub fn remaining_label(&self) -> String {
        match &self.remaining {
            Ok(r) => r.to_string(),
            Err(_) => INVALID_LABEL.to_string(),
        }
    }

    /// True for rows that need attention: past their deadline or unreadable.
    pub fn is_alert(&self) -> bool {
        !matches!(self.remaining, Ok(RemainingTime::NoDeadline) | Ok(RemainingTime::Left { .. }))
    }

    /// True when less than a day is left.
    pub fn is_due_soon(&self) -> bool {
        matches!(self.remaining, Ok(RemainingTime::Left { days: 0, .. }))
    }
}

/// Builds listing rows for the tasks matching `filter`, soonest deadline first.
///
/// Tasks without a deadline, or with one that cannot be read, sort last.
pub fn task_rows<Tz: TimeZone>(
    tasks: &[Task],
    formatter: &DeadlineFormatter<Tz>,
    filter: DoneFilter,
    now: DateTime<Utc>,
) -> Vec<TaskRow>
where
    Tz::Offset: fmt::Display,
{
    let mut keyed: Vec<(Option<DateTime<Utc>>, TaskRow)> = filter
        .apply(tasks)
        .into_iter()
        .map(|t| {
            let key = match formatter.parse_deadline(t.limit.as_deref()) {
                Ok(key) => key,
                Err(err) => {
                    warn!(task = %t.id, error = %err, "task has an unreadable deadline");
                    None
                }
            };
            let row = TaskRow {
                id: t.id.clone(),
                title: t.title.clone(),
                status: t.status_label(),
                deadline: formatter.local_input_value(t.limit.as_deref()).unwrap_or_default(),
                remaining: t.remaining(formatter, now),
            };
            (key, row)
        })
        .collect();

    keyed.sort_by_key(|(key, _)| (key.is_none(), *key));
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Remaining-time label for a single deadline.
pub fn cmd_remaining<Tz: TimeZone>(formatter: &DeadlineFormatter<Tz>, deadline: &str, now: DateTime<Utc>) -> anyhow::Result<String>
where
    Tz::Offset: fmt::Display,
{
    Ok(formatter.remaining_time(Some(deadline), now)?.to_string())
}

/// Stored instant rendered as a local edit value.
pub fn cmd_to_local<Tz: TimeZone>(formatter: &DeadlineFormatter<Tz>, stored: &str) -> anyhow::Result<String>
where
    Tz::Offset: fmt::Display,
{
    Ok(formatter.local_input_value(Some(stored))?)
}

/// Local edit value converted to its stored form; `null` when empty.
pub fn cmd_to_stored<Tz: TimeZone>(formatter: &DeadlineFormatter<Tz>, local: &str) -> anyhow::Result<String>
where
    Tz::Offset: fmt::Display,
{
    Ok(formatter
        .to_stored_instant(local)?
        .unwrap_or_else(|| "null".to_string()))
}

/// Request body for a create/update call, as pretty-printed JSON.
pub fn cmd_payload<Tz: TimeZone>(formatter: &DeadlineFormatter<Tz>, form: &TaskForm) -> anyhow::Result<String>
where
    Tz::Offset: fmt::Display,
{
    let payload = form.to_payload(formatter)?;
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Lists tasks in a formatted table, soonest deadline first.
pub fn cmd_list<Tz: TimeZone>(
    formatter: &DeadlineFormatter<Tz>,
    tasks: &[Task],
    filter: DoneFilter,
    now: DateTime<Utc>,
) -> String
where
    Tz::Offset: fmt::Display,
{
    let rows = task_rows(tasks, formatter, filter, now);
    if rows.is_empty() {
        return format!("No tasks found ({}).", filter.label());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Deadline").add_attribute(Attribute::Bold),
            Cell::new("Remaining").add_attribute(Attribute::Bold),
        ]);

    for row in &rows {
        let remaining_color = if row.is_alert() {
            Color::Red
        } else if row.is_due_soon() {
            Color::Yellow
        } else if matches!(row.remaining, Ok(RemainingTime::NoDeadline)) {
            Color::Grey
        } else {
            Color::Green
        };
        let status_color = if row.status == "完了" { Color::Green } else { Color::Yellow };

        table.add_row(vec![
            Cell::new(&row.id),
            Cell::new(&row.title),
            Cell::new(row.status).fg(status_color),
            Cell::new(if row.deadline.is_empty() { "-" } else { row.deadline.as_str() }),
            Cell::new(row.remaining_label()).fg(remaining_color),
        ]);
    }

    table.to_string()
}
