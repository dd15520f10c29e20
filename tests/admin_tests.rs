use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_types, ok, rst, set_days, setup_test_db, temp_out};

#[test]
fn init_creates_the_schema() {
    let db_path = setup_test_db("init_schema");

    rst()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'table' AND name IN ('log', 'utilization_types', 'utilizations')",
            [],
            |row| row.get(0),
        )
        .expect("count tables");
    assert_eq!(tables, 3);
}

#[test]
fn types_are_listed_and_duplicates_rejected() {
    let db_path = setup_test_db("types_list");
    init_db_with_types(&db_path);

    rst()
        .args(["--db", &db_path, "type", "--list"])
        .assert()
        .success()
        .stdout(contains("work").and(contains("vacation")));

    rst()
        .args(["--db", &db_path, "type", "--add", "work"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn mutating_commands_are_audited() {
    let db_path = setup_test_db("audit_log");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=3, "work");
    ok(&db_path, &["verify", "alice", "2013-04-01", "--through", "2"]);

    rst()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("init")
                .and(contains("type"))
                .and(contains("set"))
                .and(contains("verify"))
                .and(contains("alice")),
        );
}

#[test]
fn config_print_shows_the_settings() {
    let db_path = setup_test_db("config_print");

    rst()
        .args(["--db", &db_path, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("default_verify_days").and(contains("separator_char")));
}

#[test]
fn export_csv_writes_one_row_per_range() {
    let db_path = setup_test_db("export_csv");
    let out = temp_out("export_csv", "csv");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=2, "work");
    set_days(&db_path, "alice", 3..=3, "vacation");
    set_days(&db_path, "bob", 1..=1, "work");

    rst()
        .args([
            "--db",
            &db_path,
            "export",
            "--format",
            "csv",
            "--file",
            &out,
            "--employee",
            "alice",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "id,employee,utilization_type,first_day,last_day,verified,updated_at"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("alice,work,2013-04-01,2013-04-02,false"));
    assert!(lines[2].contains("alice,vacation,2013-04-03,2013-04-03,false"));
}

#[test]
fn export_json_filters_by_range() {
    let db_path = setup_test_db("export_json");
    let out = temp_out("export_json", "json");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=2, "work");
    ok(&db_path, &["set", "alice", "2013-05-20", "vacation"]);

    rst()
        .args([
            "--db",
            &db_path,
            "export",
            "--format",
            "json",
            "--file",
            &out,
            "--range",
            "2013-05",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("parse json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["utilization_type"], "vacation");
    assert_eq!(rows[0]["first_day"], "2013-05-20");
}

#[test]
fn export_requires_an_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=1, "work");

    rst()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("absolute"));
}
