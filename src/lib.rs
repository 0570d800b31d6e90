//! # todolimit
//!
//! Deadline handling for a to-do list client. Tasks carry an optional deadline
//! that the task API stores as a UTC instant; this crate converts it to and from
//! the local `YYYY-MM-DDTHH:mm` value a datetime edit control works with, and
//! renders the countdown shown next to each task.
//!
//! ## Remaining time
//!
//! | Deadline                 | Label               |
//! |--------------------------|---------------------|
//! | none / empty             | `期限未設定`        |
//! | at or before now         | `期限切れ`          |
//! | after now                | `2日 5時間 30分`    |
//!
//! Minutes are floored and never shown as `0分` while time remains.
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use todolimit::deadline::DeadlineFormatter;
//!
//! let fmt = DeadlineFormatter::new(Utc);
//! let now: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
//! let label = fmt.remaining_time(Some("2024-01-03T05:30:00.000Z"), now).unwrap();
//! assert_eq!(label.to_string(), "2日 5時間 30分");
//! ```
//!
//! ## Command line
//!
//! ```bash
//! todolimit remaining 2025-12-01T09:00:00.000Z
//! todolimit --tz Asia/Tokyo to-local 2024-06-01T15:30:00.000Z   # 2024-06-02T00:30
//! todolimit --tz Asia/Tokyo to-stored 2024-06-02T00:30          # 2024-06-01T15:30:00.000Z
//! todolimit list tasks.json --done
//! todolimit watch tasks.json
//! ```
//!
//! ## Configuration
//!
//! The timezone comes from `--tz`, then `TODOLIMIT_TZ`, then `timezone` in
//! `~/.config/todolimit/config.toml` (override the path with `TODOLIMIT_CONFIG`),
//! and finally the system timezone.

pub mod commands;
pub mod config;
pub mod deadline;
pub mod error;
pub mod form;
pub mod models;
pub mod snapshot;
pub mod tui;

pub use deadline::{DeadlineFormatter, RemainingTime};
pub use error::DeadlineError;
