use crate::errors::{AppError, AppResult};
use crate::export::model::UtilizationExport;
use crate::models::utilization::Utilization;
use crate::models::utilization_type::UtilizationType;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn parse_day(row: &Row, column: &str) -> Result<NaiveDate> {
    let s: String = row.get(column)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(s.clone())),
        )
    })
}

pub fn map_row(row: &Row) -> Result<Utilization> {
    let record = Utilization {
        cid: 0,
        id: Some(row.get("id")?),
        type_id: row.get("type_id")?,
        first_day: parse_day(row, "first_day")?,
        last_day: parse_day(row, "last_day")?,
        verified: row.get::<_, i32>("verified")? == 1,
    };
    Ok(record)
}

/// All stored utilizations of `employee`, ordered by first day.
pub fn load_utilizations(conn: &Connection, employee: &str) -> AppResult<Vec<Utilization>> {
    let mut stmt = conn.prepare(
        "SELECT id, type_id, first_day, last_day, verified
         FROM utilizations
         WHERE employee = ?1
         ORDER BY first_day ASC",
    )?;

    let rows = stmt.query_map([employee], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_employees(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT employee FROM utilizations ORDER BY employee")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// utilization types
// ---------------------------------------------------------------------------

fn map_type_row(row: &Row) -> Result<UtilizationType> {
    Ok(UtilizationType {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

pub fn insert_type(conn: &Connection, name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO utilization_types (name) VALUES (?1)",
        params![name],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_types(conn: &Connection) -> AppResult<Vec<UtilizationType>> {
    let mut stmt = conn.prepare("SELECT id, name FROM utilization_types ORDER BY id")?;
    let rows = stmt.query_map([], map_type_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_type_by_name(conn: &Connection, name: &str) -> AppResult<Option<UtilizationType>> {
    let found = conn
        .query_row(
            "SELECT id, name FROM utilization_types WHERE name = ?1",
            [name],
            map_type_row,
        )
        .optional()?;
    Ok(found)
}

pub fn find_type_by_id(conn: &Connection, id: i64) -> AppResult<Option<UtilizationType>> {
    let found = conn
        .query_row(
            "SELECT id, name FROM utilization_types WHERE id = ?1",
            [id],
            map_type_row,
        )
        .optional()?;
    Ok(found)
}

/// Resolve a type given by name or numeric id.
pub fn resolve_type(conn: &Connection, key: &str) -> AppResult<UtilizationType> {
    if let Some(t) = find_type_by_name(conn, key)? {
        return Ok(t);
    }
    if let Ok(id) = key.parse::<i64>()
        && let Some(t) = find_type_by_id(conn, id)?
    {
        return Ok(t);
    }
    Err(AppError::InvalidUtilizationType(key.to_string()))
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

/// Flat rows for export, joined with the type name. `bounds` keeps the
/// rows that touch the inclusive period.
pub fn load_export_rows(
    conn: &Connection,
    employee: Option<&str>,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<UtilizationExport>> {
    let (from, to) = match bounds {
        Some((first, last)) => (
            Some(first.format("%Y-%m-%d").to_string()),
            Some(last.format("%Y-%m-%d").to_string()),
        ),
        None => (None, None),
    };

    let mut stmt = conn.prepare(
        "SELECT u.id, u.employee, t.name AS type_name, u.first_day, u.last_day,
                u.verified, u.updated_at
         FROM utilizations u
         JOIN utilization_types t ON t.id = u.type_id
         WHERE (?1 IS NULL OR u.employee = ?1)
           AND (?2 IS NULL OR u.last_day >= ?2)
           AND (?3 IS NULL OR u.first_day <= ?3)
         ORDER BY u.employee ASC, u.first_day ASC",
    )?;

    let rows = stmt.query_map(params![employee, from, to], |row| {
        let first_day: String = row.get("first_day")?;
        let last_day: String = row.get("last_day")?;
        Ok(UtilizationExport {
            id: row.get("id")?,
            employee: row.get("employee")?,
            utilization_type: row.get("type_name")?,
            first_day,
            last_day,
            verified: row.get::<_, i32>("verified")? == 1,
            updated_at: row.get("updated_at")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
