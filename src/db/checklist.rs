//! Checklist item operations with append-order assignment.

use super::{now_ms, Database};
use crate::error::{StoreError, StoreResult};
use crate::types::{ChecklistItem, ChecklistPatch, NewChecklistItem};
use rusqlite::{params, Connection, Row};
use tracing::debug;

fn parse_item_row(row: &Row) -> rusqlite::Result<ChecklistItem> {
    Ok(ChecklistItem {
        id: row.get("id")?,
        task_id: row.get("task_id")?,
        title: row.get("title")?,
        stage: row.get("stage")?,
        git_branch: row.get("git_branch")?,
        completed: row.get("completed")?,
        order: row.get("sort_order")?,
        created_at: row.get("created_at")?,
    })
}

fn get_item_internal(conn: &Connection, item_id: i64) -> StoreResult<Option<ChecklistItem>> {
    let mut stmt = conn.prepare("SELECT * FROM checklist_items WHERE id = ?1")?;

    match stmt.query_row(params![item_id], parse_item_row) {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Checklist items for a task, sorted by order ascending.
pub(crate) fn items_for_task(conn: &Connection, task_id: i64) -> StoreResult<Vec<ChecklistItem>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM checklist_items WHERE task_id = ?1 ORDER BY sort_order",
    )?;

    let items = stmt
        .query_map(params![task_id], parse_item_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(items)
}

impl Database {
    /// Add a checklist item to a task. The new item is appended: its order is
    /// the task's current maximum order plus one (1 for the first item).
    pub fn add_checklist_item(
        &self,
        task_id: i64,
        input: NewChecklistItem,
    ) -> StoreResult<ChecklistItem> {
        if input.title.trim().is_empty() {
            return Err(StoreError::missing_field("title"));
        }

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

            let max_order: i64 = tx.query_row(
                "SELECT COALESCE(MAX(sort_order), 0) FROM checklist_items WHERE task_id = ?1",
                params![task_id],
                |row| row.get(0),
            )?;

            let now = now_ms();
            let completed = input.completed.unwrap_or(false);
            let order = max_order + 1;

            tx.execute(
                "INSERT INTO checklist_items (
                    task_id, title, stage, git_branch, completed, sort_order, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    task_id,
                    input.title.trim(),
                    input.stage,
                    input.git_branch,
                    completed,
                    order,
                    now,
                ],
            )?;
            let id = tx.last_insert_rowid();

            tx.commit().map_err(StoreError::database)?;
            debug!(task_id, item_id = id, order, "added checklist item");

            Ok(ChecklistItem {
                id,
                task_id,
                title: input.title.trim().to_string(),
                stage: input.stage,
                git_branch: input.git_branch,
                completed,
                order,
                created_at: now,
            })
        })
    }

    /// Partially update a checklist item. Present fields replace; completed
    /// and order are each independently replaceable.
    pub fn update_checklist_item(
        &self,
        item_id: i64,
        patch: ChecklistPatch,
    ) -> StoreResult<ChecklistItem> {
        self.with_conn(|conn| {
            let item = get_item_internal(conn, item_id)?
                .ok_or_else(|| StoreError::checklist_item_not_found(item_id))?;

            let title = patch.title.unwrap_or(item.title);
            let stage = patch.stage.or(item.stage);
            let git_branch = patch.git_branch.or(item.git_branch);
            let completed = patch.completed.unwrap_or(item.completed);
            let order = patch.order.unwrap_or(item.order);

            conn.execute(
                "UPDATE checklist_items SET
                    title = ?1, stage = ?2, git_branch = ?3, completed = ?4, sort_order = ?5
                 WHERE id = ?6",
                params![title, stage, git_branch, completed, order, item_id],
            )?;

            Ok(ChecklistItem {
                id: item_id,
                task_id: item.task_id,
                title,
                stage,
                git_branch,
                completed,
                order,
                created_at: item.created_at,
            })
        })
    }

    /// Delete a checklist item by id.
    pub fn delete_checklist_item(&self, item_id: i64) -> StoreResult<()> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM checklist_items WHERE id = ?1",
                params![item_id],
            )?;
            if deleted == 0 {
                return Err(StoreError::checklist_item_not_found(item_id));
            }
            debug!(item_id, "deleted checklist item");
            Ok(())
        })
    }
}
