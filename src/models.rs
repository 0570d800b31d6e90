use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::deadline::{DeadlineFormatter, RemainingTime};
use crate::error::Result;

/// A single task as returned by the task API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    /// Identifier assigned by the API.
    pub id: String,
    pub title: String,
    /// Free-form detail text.
    #[serde(default)]
    pub detail: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub done: bool,
    /// Deadline as a stored UTC instant, if one is set.
    #[serde(default)]
    pub limit: Option<String>,
}

impl Task {
    /// Time left until this task's deadline.
    pub fn remaining<Tz: TimeZone>(&self, formatter: &DeadlineFormatter<Tz>, now: DateTime<Utc>) -> Result<RemainingTime>
    where
        Tz::Offset: fmt::Display,
    {
        formatter.remaining_time(self.limit.as_deref(), now)
    }

    pub fn status_label(&self) -> &'static str {
        if self.done { "完了" } else { "未完了" }
    }
}

/// A named list that tasks belong to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskList {
    pub id: String,
    pub title: String,
}

/// Request body for creating or updating a task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskPayload {
    pub title: String,
    pub detail: String,
    pub done: bool,
    /// Stored UTC instant, or `null` when the task has no deadline.
    pub limit: Option<String>,
}

/// A task snapshot: either a bare array or the API's `{ "tasks": [...] }` body.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum TaskDocument {
    Envelope { tasks: Vec<Task> },
    Bare(Vec<Task>),
}

impl TaskDocument {
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            TaskDocument::Envelope { tasks } => tasks,
            TaskDocument::Bare(tasks) => tasks,
        }
    }
}

/// Which tasks a listing shows: the open ones or the completed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoneFilter {
    #[default]
    Todo,
    Done,
}

impl DoneFilter {
    pub fn matches(&self, task: &Task) -> bool {
        task.done == (*self == DoneFilter::Done)
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    pub fn toggle(&self) -> Self {
        match self {
            DoneFilter::Todo => DoneFilter::Done,
            DoneFilter::Done => DoneFilter::Todo,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DoneFilter::Todo => "未完了",
            DoneFilter::Done => "完了",
        }
    }
}

impl FromStr for DoneFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(DoneFilter::Todo),
            "done" => Ok(DoneFilter::Done),
            other => Err(format!("unknown filter '{other}'. Supported: todo, done.")),
        }
    }
}
