//! Dependency edge operations and optional cycle detection.

use super::Database;
use crate::config::DependenciesConfig;
use crate::error::{StoreError, StoreResult};
use crate::types::{DependencyInfo, Status, TaskDependency};
use rusqlite::{params, Connection};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Outgoing dependency entries for a task, joined with the prerequisite's
/// title and status.
pub(crate) fn dependencies_for_task(
    conn: &Connection,
    task_id: i64,
) -> StoreResult<Vec<DependencyInfo>> {
    let mut stmt = conn.prepare(
        "SELECT d.id, d.depends_on_id, p.title, p.status
         FROM task_dependencies d
         INNER JOIN tasks p ON p.id = d.depends_on_id
         WHERE d.task_id = ?1
         ORDER BY d.id",
    )?;

    let deps = stmt
        .query_map(params![task_id], |row| {
            let status: String = row.get(3)?;
            Ok(DependencyInfo {
                id: row.get(0)?,
                depends_on_id: row.get(1)?,
                title: row.get(2)?,
                status: Status::from_db(&status),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(deps)
}

/// Check whether `depends_on_id` can already reach `task_id` through existing
/// edges; adding task_id -> depends_on_id would then close a cycle.
fn would_create_cycle(conn: &Connection, task_id: i64, depends_on_id: i64) -> StoreResult<bool> {
    let mut visited: HashSet<i64> = HashSet::new();
    let mut queue: VecDeque<i64> = VecDeque::new();
    queue.push_back(depends_on_id);

    while let Some(current) = queue.pop_front() {
        if current == task_id {
            return Ok(true);
        }

        if !visited.insert(current) {
            continue;
        }

        let mut stmt =
            conn.prepare("SELECT depends_on_id FROM task_dependencies WHERE task_id = ?1")?;

        let next: Vec<i64> = stmt
            .query_map(params![current], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        for id in next {
            if !visited.contains(&id) {
                queue.push_back(id);
            }
        }
    }

    Ok(false)
}

impl Database {
    /// Add a dependency edge: `task_id` depends on `depends_on_id`.
    ///
    /// Fails on self-dependency, on a duplicate (task_id, depends_on_id)
    /// pair, when either endpoint does not exist, and — when
    /// `config.reject_cycles` is set — when the edge would close a cycle.
    pub fn add_dependency(
        &self,
        task_id: i64,
        depends_on_id: i64,
        config: &DependenciesConfig,
    ) -> StoreResult<TaskDependency> {
        if task_id == depends_on_id {
            return Err(StoreError::self_dependency(task_id));
        }

        self.with_conn_mut(|conn| {
            let tx = conn.transaction().map_err(StoreError::database)?;

            for id in [task_id, depends_on_id] {
                let exists: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)",
                    params![id],
                    |row| row.get(0),
                )?;
                if !exists {
                    return Err(StoreError::task_not_found(id));
                }
            }

            let duplicate: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM task_dependencies
                 WHERE task_id = ?1 AND depends_on_id = ?2)",
                params![task_id, depends_on_id],
                |row| row.get(0),
            )?;
            if duplicate {
                return Err(StoreError::duplicate_dependency(task_id, depends_on_id));
            }

            if config.reject_cycles && would_create_cycle(&tx, task_id, depends_on_id)? {
                return Err(StoreError::dependency_cycle(task_id, depends_on_id));
            }

            tx.execute(
                "INSERT INTO task_dependencies (task_id, depends_on_id) VALUES (?1, ?2)",
                params![task_id, depends_on_id],
            )?;
            let id = tx.last_insert_rowid();

            tx.commit().map_err(StoreError::database)?;
            debug!(task_id, depends_on_id, "added dependency");

            Ok(TaskDependency {
                id,
                task_id,
                depends_on_id,
            })
        })
    }

    /// Delete a dependency edge by its own id.
    pub fn delete_dependency(&self, dependency_id: i64) -> StoreResult<()> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM task_dependencies WHERE id = ?1",
                params![dependency_id],
            )?;
            if deleted == 0 {
                return Err(StoreError::dependency_not_found(dependency_id));
            }
            debug!(dependency_id, "deleted dependency");
            Ok(())
        })
    }
}
