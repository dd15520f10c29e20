use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn create_utilization_types_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS utilization_types (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL UNIQUE
        );
        "#,
    )?;
    Ok(())
}

/// `first_day`/`last_day` are inclusive `YYYY-MM-DD` strings.
fn create_utilizations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS utilizations (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee    TEXT NOT NULL,
            type_id     INTEGER NOT NULL REFERENCES utilization_types(id),
            first_day   TEXT NOT NULL,
            last_day    TEXT NOT NULL CHECK(last_day >= first_day),
            verified    INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_utilizations_employee_day
            ON utilizations(employee, first_day);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Track when each utilization row was last written by a save.
fn migrate_add_updated_at_column(conn: &Connection) -> Result<()> {
    let version = "20250301_0002_add_utilization_updated_at";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !column_exists(conn, "utilizations", "updated_at")? {
        conn.execute(
            "ALTER TABLE utilizations ADD COLUMN updated_at TEXT NOT NULL DEFAULT '';",
            [],
        )?;
    }

    mark_applied(conn, version, "Added updated_at to utilizations")?;

    success(format!(
        "Migration applied: {} → added 'updated_at' to utilizations table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "utilization_types")? {
        create_utilization_types_table(conn)?;
        success("Created utilization_types table.");
    }

    if !table_exists(conn, "utilizations")? {
        create_utilizations_table(conn)?;
        success("Created utilizations table.");
    } else {
        conn.execute_batch(
            r#"
            CREATE INDEX IF NOT EXISTS idx_utilizations_employee_day
                ON utilizations(employee, first_day);
            "#,
        )?;
    }

    migrate_add_updated_at_column(conn)?;

    Ok(())
}
