use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::deadline::{DeadlineFormatter, RemainingTime};
use crate::error::Result;
use crate::models::{Task, TaskPayload};

/// Editable state of a task form.
///
/// `limit` holds the local edit value (`YYYY-MM-DDTHH:mm`), empty when no
/// deadline has been entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub detail: String,
    pub done: bool,
    pub limit: String,
}

impl TaskForm {
    /// Prefills the form from a task fetched for editing.
    pub fn from_task<Tz: TimeZone>(task: &Task, formatter: &DeadlineFormatter<Tz>) -> Result<Self>
    where
        Tz::Offset: fmt::Display,
    {
        Ok(TaskForm {
            title: task.title.clone(),
            detail: task.detail.clone(),
            done: task.done,
            limit: formatter.local_input_value(task.limit.as_deref())?,
        })
    }

    /// Builds the create/update request body, converting the deadline back
    /// to its stored UTC form.
    pub fn to_payload<Tz: TimeZone>(&self, formatter: &DeadlineFormatter<Tz>) -> Result<TaskPayload>
    where
        Tz::Offset: fmt::Display,
    {
        Ok(TaskPayload {
            title: self.title.clone(),
            detail: self.detail.clone(),
            done: self.done,
            limit: formatter.to_stored_instant(&self.limit)?,
        })
    }

    /// Live countdown for the deadline currently entered.
    pub fn remaining<Tz: TimeZone>(&self, formatter: &DeadlineFormatter<Tz>, now: DateTime<Utc>) -> Result<RemainingTime>
    where
        Tz::Offset: fmt::Display,
    {
        formatter.remaining_time(Some(&self.limit), now)
    }
}
