#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rst() -> Command {
    cargo_bin_cmd!("rstaffer")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rstaffer.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rstaffer_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run a command against `db_path` and require success.
pub fn ok(db_path: &str, args: &[&str]) {
    rst().arg("--db").arg(db_path).args(args).assert().success();
}

/// Initialize the DB with the `work` (id 1) and `vacation` (id 2) types.
pub fn init_db_with_types(db_path: &str) {
    ok(db_path, &["--test", "init"]);
    ok(db_path, &["type", "--add", "work"]);
    ok(db_path, &["type", "--add", "vacation"]);
}

/// Assign `kind` to every day of April 2013 in `days`.
pub fn set_days(db_path: &str, employee: &str, days: std::ops::RangeInclusive<u32>, kind: &str) {
    for day in days {
        let date = format!("2013-04-{day:02}");
        ok(db_path, &["set", employee, &date, kind]);
    }
}

/// Stored rows of `employee` as `(first_day, last_day, type_id, verified)`.
pub fn stored_ranges(db_path: &str, employee: &str) -> Vec<(String, String, i64, bool)> {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let mut stmt = conn
        .prepare(
            "SELECT first_day, last_day, type_id, verified FROM utilizations
             WHERE employee = ?1 ORDER BY first_day",
        )
        .expect("prepare");
    stmt.query_map([employee], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get::<_, i32>(3)? == 1,
        ))
    })
    .expect("query")
    .map(|r| r.expect("row"))
    .collect()
}

fn s(v: &str) -> String {
    v.to_string()
}

pub fn range(first: &str, last: &str, type_id: i64, verified: bool) -> (String, String, i64, bool) {
    (s(first), s(last), type_id, verified)
}
