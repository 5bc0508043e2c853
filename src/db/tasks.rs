//! Task CRUD, query engine, and ticket import.

use super::{now_ms, Database};
use crate::dates::{self, parse_date_field};
use crate::error::{StoreError, StoreResult};
use crate::types::{
    NewTask, Priority, Status, Task, TaskDetail, TaskFilter, TaskPatch, TaskSummary, TicketImport,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use tracing::debug;

pub(crate) fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let priority: String = row.get("priority")?;
    let status: String = row.get("status")?;
    let due_date: Option<String> = row.get("due_date")?;
    let assigned_date: Option<String> = row.get("assigned_date")?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date: due_date.and_then(|s| s.parse().ok()),
        assigned_date: assigned_date.and_then(|s| s.parse().ok()),
        priority: Priority::from_db(&priority),
        status: Status::from_db(&status),
        ticket_id: row.get("ticket_id")?,
        ticket_url: row.get("ticket_url")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Internal helper to get a task using an existing connection.
pub(crate) fn get_task_internal(conn: &Connection, task_id: i64) -> StoreResult<Option<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1")?;

    match stmt.query_row(params![task_id], parse_task_row) {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Dates are bound as ISO-8601 text so TEXT comparison stays chronological.
fn date_param(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.to_string())
}

/// Insert a task row and return the stored record. Caller holds the connection.
#[allow(clippy::too_many_arguments)]
fn insert_task(
    conn: &Connection,
    title: &str,
    description: Option<&str>,
    due_date: Option<NaiveDate>,
    assigned_date: Option<NaiveDate>,
    priority: Priority,
    status: Status,
    ticket_id: Option<&str>,
    ticket_url: Option<&str>,
    notes: Option<&str>,
) -> StoreResult<Task> {
    let now = now_ms();

    conn.execute(
        "INSERT INTO tasks (
            title, description, due_date, assigned_date, priority, status,
            ticket_id, ticket_url, notes, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            title,
            description,
            date_param(due_date),
            date_param(assigned_date),
            priority.as_str(),
            status.as_str(),
            ticket_id,
            ticket_url,
            notes,
            now,
            now,
        ],
    )?;

    Ok(Task {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
        description: description.map(str::to_string),
        due_date,
        assigned_date,
        priority,
        status,
        ticket_id: ticket_id.map(str::to_string),
        ticket_url: ticket_url.map(str::to_string),
        notes: notes.map(str::to_string),
        created_at: now,
        updated_at: now,
    })
}

impl Database {
    /// Create a new task. Title is required and must be non-empty.
    pub fn create_task(&self, input: NewTask) -> StoreResult<Task> {
        if input.title.trim().is_empty() {
            return Err(StoreError::missing_field("title"));
        }

        let due_date = parse_date_field("due_date", input.due_date.as_deref())?;
        let assigned_date = parse_date_field("assigned_date", input.assigned_date.as_deref())?;

        self.with_conn(|conn| {
            let task = insert_task(
                conn,
                input.title.trim(),
                input.description.as_deref(),
                due_date,
                assigned_date,
                input.priority.unwrap_or_default(),
                input.status.unwrap_or_default(),
                input.ticket_id.as_deref(),
                input.ticket_url.as_deref(),
                input.notes.as_deref(),
            )?;
            debug!(task_id = task.id, "created task");
            Ok(task)
        })
    }

    /// Construct a task from external ticket fields. Title defaults to a
    /// label derived from the ticket id, status is forced to todo, and the
    /// assigned date defaults to today.
    pub fn import_ticket(&self, input: TicketImport) -> StoreResult<Task> {
        let title = match input.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => format!(
                "Ticket: {}",
                input.ticket_id.as_deref().unwrap_or("unknown")
            ),
        };

        let due_date = parse_date_field("due_date", input.due_date.as_deref())?;
        let assigned_date = parse_date_field("assigned_date", input.assigned_date.as_deref())?
            .unwrap_or_else(dates::today);

        self.with_conn(|conn| {
            let task = insert_task(
                conn,
                title.trim(),
                input.description.as_deref(),
                due_date,
                Some(assigned_date),
                input.priority.unwrap_or_default(),
                Status::Todo,
                input.ticket_id.as_deref(),
                input.ticket_url.as_deref(),
                None,
            )?;
            debug!(task_id = task.id, ticket_id = ?task.ticket_id, "imported ticket");
            Ok(task)
        })
    }

    /// Get a task with its checklist (sorted by order) and outgoing
    /// dependencies.
    pub fn get_task(&self, task_id: i64) -> StoreResult<TaskDetail> {
        self.with_conn(|conn| {
            let task = get_task_internal(conn, task_id)?
                .ok_or_else(|| StoreError::task_not_found(task_id))?;

            let checklist_items = super::checklist::items_for_task(conn, task_id)?;
            let dependencies = super::deps::dependencies_for_task(conn, task_id)?;

            Ok(TaskDetail {
                task,
                checklist_items,
                dependencies,
            })
        })
    }

    /// Partially update a task. Absent fields keep their stored value, except
    /// the two date fields: those are recomputed from the patch alone, so a
    /// patch without a date clears any stored date. Always refreshes
    /// updated_at.
    pub fn update_task(&self, task_id: i64, patch: TaskPatch) -> StoreResult<Task> {
        if let Some(ref title) = patch.title {
            if title.trim().is_empty() {
                return Err(StoreError::missing_field("title"));
            }
        }

        // Recomputed, not merged: omitting a date clears it.
        let due_date = parse_date_field("due_date", patch.due_date.as_deref())?;
        let assigned_date = parse_date_field("assigned_date", patch.assigned_date.as_deref())?;

        let now = now_ms();

        self.with_conn(|conn| {
            let task = get_task_internal(conn, task_id)?
                .ok_or_else(|| StoreError::task_not_found(task_id))?;

            let title = patch.title.map(|t| t.trim().to_string()).unwrap_or(task.title);
            let description = patch.description.or(task.description);
            let priority = patch.priority.unwrap_or(task.priority);
            let status = patch.status.unwrap_or(task.status);
            let ticket_id = patch.ticket_id.or(task.ticket_id);
            let ticket_url = patch.ticket_url.or(task.ticket_url);
            let notes = patch.notes.or(task.notes);

            conn.execute(
                "UPDATE tasks SET
                    title = ?1, description = ?2, due_date = ?3, assigned_date = ?4,
                    priority = ?5, status = ?6, ticket_id = ?7, ticket_url = ?8,
                    notes = ?9, updated_at = ?10
                 WHERE id = ?11",
                params![
                    title,
                    description,
                    date_param(due_date),
                    date_param(assigned_date),
                    priority.as_str(),
                    status.as_str(),
                    ticket_id,
                    ticket_url,
                    notes,
                    now,
                    task_id,
                ],
            )?;

            debug!(task_id, "updated task");

            Ok(Task {
                id: task_id,
                title,
                description,
                due_date,
                assigned_date,
                priority,
                status,
                ticket_id,
                ticket_url,
                notes,
                created_at: task.created_at,
                updated_at: now,
            })
        })
    }

    /// Delete a task, cascading to its checklist items and to every
    /// dependency edge touching it on either side.
    pub fn delete_task(&self, task_id: i64) -> StoreResult<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction().map_err(StoreError::database)?;

            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)",
                params![task_id],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(StoreError::task_not_found(task_id));
            }

            // Checklist items and dependency edges go with the task via
            // ON DELETE CASCADE.
            tx.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;

            tx.commit().map_err(StoreError::database)?;
            debug!(task_id, "deleted task");
            Ok(())
        })
    }

    /// List tasks matching the given filters, with derived checklist counts.
    ///
    /// Ordered by assigned_date ascending (NULLs first), then by the priority
    /// label. Priority is stored as its text label, so the secondary sort is
    /// alphabetical ("high" < "low" < "medium" < "urgent"), not severity
    /// order; callers rely on this long-standing ordering.
    pub fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<TaskSummary>> {
        let date_from = parse_date_field("date_from", filter.date_from.as_deref())?;
        let date_to = parse_date_field("date_to", filter.date_to.as_deref())?;

        self.with_conn(|conn| {
            let mut sql = String::from(
                "SELECT t.*,
                    (SELECT COUNT(*) FROM checklist_items c
                     WHERE c.task_id = t.id) AS checklist_count,
                    (SELECT COUNT(*) FROM checklist_items c
                     WHERE c.task_id = t.id AND c.completed = 1) AS completed_checklist_count
                 FROM tasks t WHERE 1=1",
            );
            let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

            if let Some(status) = filter.status {
                sql.push_str(" AND t.status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            }

            if let Some(priority) = filter.priority {
                sql.push_str(" AND t.priority = ?");
                params_vec.push(Box::new(priority.as_str().to_string()));
            }

            if let Some(from) = date_from {
                sql.push_str(" AND t.assigned_date >= ?");
                params_vec.push(Box::new(from.to_string()));
            }

            if let Some(to) = date_to {
                sql.push_str(" AND t.assigned_date <= ?");
                params_vec.push(Box::new(to.to_string()));
            }

            if let Some(ref search) = filter.search {
                sql.push_str(
                    " AND (t.title LIKE ? OR t.description LIKE ? OR t.ticket_id LIKE ?)",
                );
                let pattern = format!("%{}%", search);
                params_vec.push(Box::new(pattern.clone()));
                params_vec.push(Box::new(pattern.clone()));
                params_vec.push(Box::new(pattern));
            }

            sql.push_str(" ORDER BY t.assigned_date, t.priority");

            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params_vec.iter().map(|b| b.as_ref()).collect();

            let mut stmt = conn.prepare(&sql)?;
            let tasks = stmt
                .query_map(params_refs.as_slice(), |row| {
                    Ok(TaskSummary {
                        task: parse_task_row(row)?,
                        checklist_count: row.get("checklist_count")?,
                        completed_checklist_count: row.get("completed_checklist_count")?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(tasks)
        })
    }
}
