//! SQLite-backed [`RemoteStore`] for one employee's utilizations.

use crate::core::sync::{RemoteStore, SyncBatch};
use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{Connection, params};

pub struct SqliteStore<'a> {
    conn: &'a mut Connection,
    employee: String,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a mut Connection, employee: impl Into<String>) -> Self {
        Self {
            conn,
            employee: employee.into(),
        }
    }
}

impl RemoteStore for SqliteStore<'_> {
    /// Apply the batch in a single transaction. Rows that do not belong to
    /// the employee, or no longer exist, fail the whole batch.
    fn sync(&mut self, batch: &SyncBatch) -> AppResult<Vec<i64>> {
        let now = Local::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        for id in &batch.delete {
            let n = tx.execute(
                "DELETE FROM utilizations WHERE id = ?1 AND employee = ?2",
                params![id, self.employee],
            )?;
            if n == 0 {
                return Err(AppError::Sync(format!(
                    "utilization {} not found for '{}'",
                    id, self.employee
                )));
            }
        }

        for record in &batch.update {
            let Some(id) = record.id else {
                return Err(AppError::Sync("update without id".into()));
            };
            let n = tx.execute(
                "UPDATE utilizations
                 SET type_id = ?1, first_day = ?2, last_day = ?3, verified = ?4, updated_at = ?5
                 WHERE id = ?6 AND employee = ?7",
                params![
                    record.type_id,
                    record.first_day_str(),
                    record.last_day_str(),
                    record.verified as i32,
                    now,
                    id,
                    self.employee
                ],
            )?;
            if n == 0 {
                return Err(AppError::Sync(format!(
                    "utilization {} not found for '{}'",
                    id, self.employee
                )));
            }
        }

        let mut created = Vec::with_capacity(batch.create.len());
        for record in &batch.create {
            tx.execute(
                "INSERT INTO utilizations
                    (employee, type_id, first_day, last_day, verified, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    self.employee,
                    record.type_id,
                    record.first_day_str(),
                    record.last_day_str(),
                    record.verified as i32,
                    now
                ],
            )?;
            created.push(tx.last_insert_rowid());
        }

        if created.len() != batch.create.len() {
            return Err(AppError::Sync(format!(
                "inserted {} of {} utilizations",
                created.len(),
                batch.create.len()
            )));
        }

        tx.commit()?;
        Ok(created)
    }
}
