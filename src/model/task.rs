use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dates::days_between;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not started",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Fraction of the bar drawn as done.
    pub fn progress(self) -> f32 {
        match self {
            TaskStatus::NotStarted => 0.0,
            TaskStatus::InProgress => 0.5,
            TaskStatus::Completed => 1.0,
        }
    }
}

/// How close an unfinished task is to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Due date has passed.
    Overdue,
    /// Due today or within the next few days.
    DueSoon { days_left: i64 },
    OnTrack,
}

/// Days before the due date a task starts counting as due soon.
pub const DUE_SOON_DAYS: i64 = 3;

/// A single scheduled task in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier, stable for the task's lifetime.
    pub id: String,
    /// Short human code such as `T3`, shown before the name.
    #[serde(default)]
    pub code: String,
    pub name: String,
    pub start: NaiveDate,
    pub due: NaiveDate,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl Task {
    /// Create a new task with a fresh id.
    pub fn new(code: impl Into<String>, name: impl Into<String>, start: NaiveDate, due: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            code: code.into(),
            name: name.into(),
            start,
            due,
            status: TaskStatus::NotStarted,
            assignee: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Label drawn on the bar and in the task list.
    pub fn display_label(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.code, self.name)
        }
    }

    /// Deadline state as of `today`. Completed tasks are always on track.
    pub fn deadline(&self, today: NaiveDate) -> Deadline {
        if self.status == TaskStatus::Completed {
            return Deadline::OnTrack;
        }
        let days_left = days_between(today, self.due);
        if days_left < 0 {
            Deadline::Overdue
        } else if days_left <= DUE_SOON_DAYS {
            Deadline::DueSoon { days_left }
        } else {
            Deadline::OnTrack
        }
    }

    /// True when the dates can be drawn as a bar at all.
    pub fn has_valid_dates(&self) -> bool {
        self.start <= self.due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_grows_with_status() {
        let progress: Vec<f32> = TaskStatus::ALL.iter().map(|s| s.progress()).collect();
        assert_eq!(progress, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let task: Task = serde_json::from_str(
            r#"{ "id": "a1", "name": "Design", "start": "2024-01-05", "due": "2024-01-10" }"#,
        )
        .unwrap();
        assert_eq!(task.status, TaskStatus::NotStarted);
        assert_eq!(task.display_label(), "Design");
        assert!(task.assignee.is_none());
    }

    fn due(day: &str, status: TaskStatus) -> Task {
        let due = crate::model::dates::parse_day(day).unwrap();
        Task::new("T1", "a", due, due).with_status(status)
    }

    #[test]
    fn deadline_flags_overdue_and_due_soon() {
        let today = crate::model::dates::parse_day("2024-01-10").unwrap();
        assert_eq!(due("2024-01-09", TaskStatus::InProgress).deadline(today), Deadline::Overdue);
        assert_eq!(
            due("2024-01-10", TaskStatus::NotStarted).deadline(today),
            Deadline::DueSoon { days_left: 0 }
        );
        assert_eq!(
            due("2024-01-13", TaskStatus::NotStarted).deadline(today),
            Deadline::DueSoon { days_left: 3 }
        );
        assert_eq!(due("2024-01-14", TaskStatus::NotStarted).deadline(today), Deadline::OnTrack);
    }

    #[test]
    fn completed_tasks_are_never_late() {
        let today = crate::model::dates::parse_day("2024-01-10").unwrap();
        assert_eq!(due("2024-01-01", TaskStatus::Completed).deadline(today), Deadline::OnTrack);
        assert_eq!(due("2024-01-11", TaskStatus::Completed).deadline(today), Deadline::OnTrack);
    }

    #[test]
    fn status_is_stored_in_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, r#""in_progress""#);
    }
}
