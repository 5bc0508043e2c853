//! Core types for the WorkTask store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task priority label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }

    /// Parse a stored value, falling back to the default for unrecognized text.
    pub fn from_db(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
    Blocked,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Done => "done",
            Status::Blocked => "blocked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Status::Todo),
            "in_progress" => Some(Status::InProgress),
            "done" => Some(Status::Done),
            "blocked" => Some(Status::Blocked),
            _ => None,
        }
    }

    /// Parse a stored value, falling back to the default for unrecognized text.
    pub fn from_db(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

/// A tracked task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub assigned_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: Status,
    pub ticket_id: Option<String>,
    pub ticket_url: Option<String>,
    pub notes: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds; refreshed on every task mutation.
    pub updated_at: i64,
}

/// An ordered sub-step of a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: i64,
    pub task_id: i64,
    pub title: String,
    pub stage: Option<String>,
    pub git_branch: Option<String>,
    pub completed: bool,
    pub order: i64,
    pub created_at: i64,
}

/// A directed dependency edge: `task_id` depends on `depends_on_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDependency {
    pub id: i64,
    pub task_id: i64,
    pub depends_on_id: i64,
}

/// A dependency entry as exposed on the task detail view:
/// the edge id plus the prerequisite task's id, title, and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyInfo {
    pub id: i64,
    pub depends_on_id: i64,
    pub title: String,
    pub status: Status,
}

/// Compact task representation for list views, with derived checklist counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSummary {
    #[serde(flatten)]
    pub task: Task,
    pub checklist_count: i64,
    pub completed_checklist_count: i64,
}

/// Full task detail: the task, its checklist (sorted by order), and its
/// outgoing dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub checklist_items: Vec<ChecklistItem>,
    pub dependencies: Vec<DependencyInfo>,
}

/// Fields for creating a task. Dates are flexible text, parsed by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub assigned_date: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub ticket_id: Option<String>,
    pub ticket_url: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for a task. Absent fields keep their stored value, with one
/// exception: `due_date` and `assigned_date` are recomputed from the patch
/// alone, so omitting a date clears it. Kept from the legacy API contract.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub assigned_date: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub ticket_id: Option<String>,
    pub ticket_url: Option<String>,
    pub notes: Option<String>,
}

/// Fields for adding a checklist item. Order is assigned by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewChecklistItem {
    pub title: String,
    pub stage: Option<String>,
    pub git_branch: Option<String>,
    pub completed: Option<bool>,
}

/// Partial update for a checklist item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChecklistPatch {
    pub title: Option<String>,
    pub stage: Option<String>,
    pub git_branch: Option<String>,
    pub completed: Option<bool>,
    pub order: Option<i64>,
}

/// Fields for constructing a task from an external ticket. No network call is
/// involved; this is a data-construction convenience.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketImport {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ticket_id: Option<String>,
    pub ticket_url: Option<String>,
    pub priority: Option<Priority>,
    pub assigned_date: Option<String>,
    pub due_date: Option<String>,
}

/// Filters for listing tasks. All filters AND-combine; absent filters impose
/// no constraint. Date bounds are flexible text and apply to assigned_date.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub search: Option<String>,
}

/// Dashboard aggregate snapshot, computed fresh on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_tasks: i64,
    pub todo_tasks: i64,
    pub in_progress_tasks: i64,
    pub done_tasks: i64,
    pub overdue_tasks: i64,
    pub upcoming_tasks: i64,
    pub total_checklist_items: i64,
    pub completed_checklist_items: i64,
    pub checklist_completion_rate: f64,
}
