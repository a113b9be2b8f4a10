use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dates::{parse_day, today_utc};
use super::task::{Task, TaskStatus};
use crate::error::ProjectError;

/// Who besides the owner may see or change a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectVisibility {
    #[default]
    Private,
    PublicView,
    PublicEdit,
}

/// Closed calendar interval `[start, due]` a project's tasks must fit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct ProjectRange {
    start: NaiveDate,
    due: NaiveDate,
}

#[derive(Deserialize)]
struct RawRange {
    start: NaiveDate,
    due: NaiveDate,
}

impl TryFrom<RawRange> for ProjectRange {
    type Error = ProjectError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        ProjectRange::new(raw.start, raw.due)
    }
}

impl ProjectRange {
    pub fn new(start: NaiveDate, due: NaiveDate) -> Result<Self, ProjectError> {
        if start > due {
            return Err(ProjectError::InvertedRange { start, due });
        }
        Ok(Self { start, due })
    }

    /// Build a range from the `YYYY-MM-DD` strings used at the boundary.
    pub fn parse(start: &str, due: &str) -> Result<Self, ProjectError> {
        Self::new(parse_day(start)?, parse_day(due)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn due(&self) -> NaiveDate {
        self.due
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.due
    }
}

/// A project: its date range, sharing settings, and ordered tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    #[serde(default)]
    pub visibility: ProjectVisibility,
    pub range: ProjectRange,
    pub tasks: Vec<Task>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>, range: ProjectRange) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            owner_id: owner_id.into(),
            visibility: ProjectVisibility::Private,
            range,
            tasks: Vec::new(),
            created: now,
            updated: now,
        }
    }

    /// Touch the updated timestamp.
    pub fn touch(&mut self) {
        self.updated = Utc::now();
    }

    /// The owner can always edit; others only when the project is public-edit.
    pub fn can_edit(&self, viewer_id: &str) -> bool {
        self.owner_id == viewer_id || self.visibility == ProjectVisibility::PublicEdit
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks whose dates are inverted or fall outside the project range.
    pub fn invalid_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| {
            !t.has_valid_dates() || !self.range.contains(t.start) || !self.range.contains(t.due)
        })
    }

    /// Number of tasks in each status, in `TaskStatus::ALL` order.
    pub fn status_counts(&self) -> [(TaskStatus, usize); 3] {
        TaskStatus::ALL.map(|status| (status, self.tasks.iter().filter(|t| t.status == status).count()))
    }

    /// Share of completed tasks as a whole percentage; 0 for an empty project.
    pub fn progress_percent(&self) -> u8 {
        if self.tasks.is_empty() {
            return 0;
        }
        let done = self.tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
        (done as f64 * 100.0 / self.tasks.len() as f64).round() as u8
    }

    /// Apply a committed reschedule coming back from the timeline.
    pub fn apply_task_dates(&mut self, task_id: &str, start: &str, due: &str) -> Result<&Task, ProjectError> {
        let start = parse_day(start)?;
        let due = parse_day(due)?;
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| ProjectError::UnknownTask(task_id.to_string()))?;
        self.touch();
        let task = &mut self.tasks[index];
        task.start = start;
        task.due = due;
        Ok(task)
    }

    /// A demo project starting a week before today, owned by `owner_id`.
    pub fn sample(owner_id: &str) -> Self {
        use super::dates::add_days;

        let today = today_utc();
        let start = add_days(today, -7);
        let due = add_days(today, 35);
        // start <= due by construction
        let range = ProjectRange { start, due };
        let mut project = Project::new("Sample Project", owner_id, range);

        project.tasks = vec![
            Task::new("T1", "Kickoff", start, add_days(start, 2)).with_status(TaskStatus::Completed),
            Task::new("T2", "Requirements", add_days(start, 3), add_days(today, 3))
                .with_status(TaskStatus::InProgress),
            Task::new("T3", "UI design", add_days(today, 2), add_days(today, 12)),
            Task::new("T4", "Backend", add_days(today, 4), add_days(today, 22)),
            Task::new("T5", "Testing & QA", add_days(today, 20), add_days(today, 30)),
            Task::new("T6", "Launch", add_days(today, 33), add_days(today, 35)),
        ];
        project
    }
}
