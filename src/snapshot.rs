use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::models::{Task, TaskDocument};

/// Loads tasks from a snapshot of the task API's response.
///
/// `-` reads the document from stdin. The document may be a bare array of
/// tasks or a `{ "tasks": [...] }` envelope.
pub fn load_snapshot(path: &Path) -> anyhow::Result<Vec<Task>> {
    let raw = if path == Path::new("-") {
        let mut s = String::new();
        io::stdin()
            .read_to_string(&mut s)
            .context("failed to read tasks from stdin")?;
        s
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read task snapshot {}", path.display()))?
    };
    let tasks = parse_snapshot(&raw)
        .with_context(|| format!("failed to parse task snapshot {}", path.display()))?;
    debug!(file = %path.display(), count = tasks.len(), "loaded task snapshot");
    Ok(tasks)
}

pub fn parse_snapshot(raw: &str) -> anyhow::Result<Vec<Task>> {
    let doc: TaskDocument = serde_json::from_str(raw)?;
    Ok(doc.into_tasks())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_snapshot_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tasks":[{{"id":"1","title":"A","detail":"","done":false,"limit":null}}]}}"#).unwrap();
        let tasks = load_snapshot(file.path()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "A");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_snapshot(Path::new("/nonexistent/todolimit/tasks.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read task snapshot"));
    }

    #[test]
    fn test_malformed_snapshot() {
        assert!(parse_snapshot("{\"lists\": []}").is_err());
    }
}
