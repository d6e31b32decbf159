use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::directory::UserDirectory;
use crate::task::{Category, Color, Priority, Task};

/// Storage shape of one task, one JSON record per line. `assignee`,
/// `priority` and `color` joined the format later; older snapshots omit
/// them and receive defaults on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub color: Option<Color>,
}

impl TaskRecord {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            name: task.name.clone(),
            category: task.category,
            start: task.start,
            end: task.end,
            assignee: Some(task.assignee.clone()),
            priority: Some(task.priority),
            color: Some(task.color),
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    pub dropped: usize,
}

/// Decode a stored collection. Unreadable lines and records that cannot be
/// coerced into a valid task are dropped and counted, never fatal.
pub fn decode_collection(raw: &str, directory: &UserDirectory) -> LoadReport {
    let mut report = LoadReport::default();

    for (idx, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<TaskRecord>(trimmed) {
            Ok(record) => match coerce_record(record, directory) {
                Some(task) => report.tasks.push(task),
                None => report.dropped += 1,
            },
            Err(error) => {
                warn!(line = idx + 1, %error, "dropping unreadable task record");
                report.dropped += 1;
            }
        }
    }

    debug!(
        kept = report.tasks.len(),
        dropped = report.dropped,
        "decoded task collection"
    );
    report
}

fn coerce_record(record: TaskRecord, directory: &UserDirectory) -> Option<Task> {
    if record.name.trim().is_empty() {
        warn!(id = %record.id, "dropping task record with empty name");
        return None;
    }

    let (start, end) = if record.start <= record.end {
        (record.start, record.end)
    } else {
        warn!(id = %record.id, "repairing inverted stored range");
        (record.end, record.start)
    };

    let assignee = match record.assignee {
        Some(name) if !name.trim().is_empty() => name,
        _ => directory.first_name().to_string(),
    };

    Some(Task {
        id: record.id,
        name: record.name,
        category: record.category,
        start,
        end,
        assignee,
        priority: record.priority.unwrap_or(Priority::High),
        color: record.color.unwrap_or(Color::Sky),
    })
}

pub fn encode_collection(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        match serde_json::to_string(&TaskRecord::from_task(task)) {
            Ok(line) => {
                out.push_str(&line);
                out.push('\n');
            }
            Err(error) => {
                warn!(id = %task.id, %error, "failed serializing task; skipping");
            }
        }
    }
    out
}
