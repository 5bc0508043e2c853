//! Dashboard aggregation queries.

use super::Database;
use crate::dates;
use crate::error::StoreResult;
use crate::types::DashboardStats;
use chrono::{Days, NaiveDate};
use rusqlite::params;
use std::collections::HashMap;

impl Database {
    /// Dashboard snapshot relative to the current local date.
    pub fn dashboard_stats(&self) -> StoreResult<DashboardStats> {
        self.dashboard_stats_on(dates::today())
    }

    /// Dashboard snapshot relative to an explicit reference date. Computed
    /// fresh from the full task and checklist collections on every call.
    ///
    /// Only todo, in_progress, and done are reported as per-status counts;
    /// blocked tasks appear in the total only, matching the dashboard the
    /// frontend has always shown.
    pub fn dashboard_stats_on(&self, today: NaiveDate) -> StoreResult<DashboardStats> {
        self.with_conn(|conn| {
            let total_tasks: i64 =
                conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;

            let mut by_status: HashMap<String, i64> = HashMap::new();
            let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM tasks GROUP BY status")?;
            let counts = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            for (status, count) in counts {
                by_status.insert(status, count);
            }

            // Overdue: strictly before today and not finished.
            let overdue_tasks: i64 = conn.query_row(
                "SELECT COUNT(*) FROM tasks
                 WHERE due_date IS NOT NULL AND due_date < ?1 AND status != 'done'",
                params![today.to_string()],
                |row| row.get(0),
            )?;

            // Upcoming: assigned within [today, today + 7 days], both inclusive.
            let window_end = today + Days::new(7);
            let upcoming_tasks: i64 = conn.query_row(
                "SELECT COUNT(*) FROM tasks
                 WHERE assigned_date >= ?1 AND assigned_date <= ?2",
                params![today.to_string(), window_end.to_string()],
                |row| row.get(0),
            )?;

            let (total_checklist_items, completed_checklist_items): (i64, i64) = conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM checklist_items",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;

            let checklist_completion_rate = if total_checklist_items > 0 {
                completed_checklist_items as f64 / total_checklist_items as f64 * 100.0
            } else {
                0.0
            };

            Ok(DashboardStats {
                total_tasks,
                todo_tasks: by_status.get("todo").copied().unwrap_or(0),
                in_progress_tasks: by_status.get("in_progress").copied().unwrap_or(0),
                done_tasks: by_status.get("done").copied().unwrap_or(0),
                overdue_tasks,
                upcoming_tasks,
                total_checklist_items,
                completed_checklist_items,
                checklist_completion_rate,
            })
        })
    }
}
