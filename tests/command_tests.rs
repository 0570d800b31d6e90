use chrono::{DateTime, Utc};
use chrono_tz::Asia::Tokyo;
use todolimit::commands::{cmd_list, cmd_payload, cmd_remaining, cmd_to_local, cmd_to_stored, task_rows};
use todolimit::deadline::DeadlineFormatter;
use todolimit::form::TaskForm;
use todolimit::models::{DoneFilter, Task};
use todolimit::snapshot::parse_snapshot;

const SNAPSHOT: &str = r#"{
  "tasks": [
    { "id": "1", "title": "No deadline", "detail": "", "done": false, "limit": null },
    { "id": "2", "title": "Later", "detail": "", "done": false, "limit": "2024-01-10T00:00:00.000Z" },
    { "id": "3", "title": "Overdue", "detail": "", "done": false, "limit": "2023-12-30T00:00:00.000Z" },
    { "id": "4", "title": "Broken", "detail": "", "done": false, "limit": "someday" },
    { "id": "5", "title": "Finished", "detail": "", "done": true, "limit": "2024-01-02T00:00:00.000Z" }
  ]
}"#;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap().with_timezone(&Utc)
}

fn tasks() -> Vec<Task> {
    parse_snapshot(SNAPSHOT).unwrap()
}

#[test]
fn test_rows_sorted_by_deadline() {
    let fmt = DeadlineFormatter::new(Tokyo);
    let rows = task_rows(&tasks(), &fmt, DoneFilter::Todo, now());
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "2", "1", "4"]);

    assert_eq!(rows[0].remaining_label(), "期限切れ");
    assert!(rows[0].is_alert());
    assert_eq!(rows[1].deadline, "2024-01-10T09:00");
    assert_eq!(rows[2].remaining_label(), "期限未設定");
    assert!(rows[3].remaining.is_err());
    assert!(rows[3].is_alert());
}

#[test]
fn test_list_done_tasks() {
    let fmt = DeadlineFormatter::new(Tokyo);
    let out = cmd_list(&fmt, &tasks(), DoneFilter::Done, now());
    assert!(out.contains("Finished"));
    assert!(!out.contains("Overdue"));
}

#[test]
fn test_list_shows_labels() {
    let fmt = DeadlineFormatter::new(Tokyo);
    let out = cmd_list(&fmt, &tasks(), DoneFilter::Todo, now());
    assert!(out.contains("期限切れ"));
    assert!(out.contains("期限未設定"));
    assert!(out.contains("不正な期限"));
}

#[test]
fn test_list_empty() {
    let fmt = DeadlineFormatter::new(Tokyo);
    assert_eq!(cmd_list(&fmt, &[], DoneFilter::Todo, now()), "No tasks found (未完了).");
}

#[test]
fn test_conversion_commands() {
    let fmt = DeadlineFormatter::new(Tokyo);
    assert_eq!(cmd_to_local(&fmt, "2024-06-01T15:30:00.000Z").unwrap(), "2024-06-02T00:30");
    assert_eq!(cmd_to_stored(&fmt, "2024-06-02T00:30").unwrap(), "2024-06-01T15:30:00.000Z");
    assert_eq!(cmd_to_stored(&fmt, "").unwrap(), "null");
    assert_eq!(cmd_remaining(&fmt, "2024-01-01T09:01", now()).unwrap(), "0日 0時間 1分");
    assert!(cmd_remaining(&fmt, "2024-01-01 nine", now()).is_err());
}

#[test]
fn test_payload_command() {
    let fmt = DeadlineFormatter::new(Tokyo);
    let form = TaskForm {
        title: "Write report".into(),
        detail: "draft".into(),
        done: false,
        limit: "2024-06-02T00:30".into(),
    };
    let json: serde_json::Value = serde_json::from_str(&cmd_payload(&fmt, &form).unwrap()).unwrap();
    assert_eq!(json["title"], "Write report");
    assert_eq!(json["done"], false);
    assert_eq!(json["limit"], "2024-06-01T15:30:00.000Z");

    let no_limit = TaskForm { limit: String::new(), ..form };
    let json: serde_json::Value = serde_json::from_str(&cmd_payload(&fmt, &no_limit).unwrap()).unwrap();
    assert!(json["limit"].is_null());
}
