use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_types, ok, range, rst, set_days, setup_test_db, stored_ranges};

#[test]
fn consecutive_days_coalesce_into_one_range() {
    let db_path = setup_test_db("coalesce_days");
    init_db_with_types(&db_path);

    set_days(&db_path, "alice", 1..=5, "work");

    assert_eq!(
        stored_ranges(&db_path, "alice"),
        vec![range("2013-04-01", "2013-04-05", 1, false)]
    );
}

#[test]
fn assigning_inside_a_range_splits_it_and_reassigning_joins_it() {
    let db_path = setup_test_db("split_join");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=5, "work");

    rst()
        .args(["--db", &db_path, "set", "alice", "2013-04-03", "vacation"])
        .assert()
        .success()
        .stdout(contains("add").and(contains("change:last_day")));

    assert_eq!(
        stored_ranges(&db_path, "alice"),
        vec![
            range("2013-04-01", "2013-04-02", 1, false),
            range("2013-04-03", "2013-04-03", 2, false),
            range("2013-04-04", "2013-04-05", 1, false),
        ]
    );

    // types may be given by id as well
    rst()
        .args(["--db", &db_path, "set", "alice", "2013-04-03", "1"])
        .assert()
        .success()
        .stdout(contains("remove"));

    assert_eq!(
        stored_ranges(&db_path, "alice"),
        vec![range("2013-04-01", "2013-04-05", 1, false)]
    );
}

#[test]
fn employees_have_separate_timelines() {
    let db_path = setup_test_db("separate_employees");
    init_db_with_types(&db_path);

    set_days(&db_path, "alice", 1..=2, "work");
    set_days(&db_path, "bob", 2..=3, "vacation");

    assert_eq!(
        stored_ranges(&db_path, "alice"),
        vec![range("2013-04-01", "2013-04-02", 1, false)]
    );
    assert_eq!(
        stored_ranges(&db_path, "bob"),
        vec![range("2013-04-02", "2013-04-03", 2, false)]
    );
}

#[test]
fn verify_splits_the_ranges_sticking_out() {
    let db_path = setup_test_db("verify_splits");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=10, "work");

    rst()
        .args([
            "--db",
            &db_path,
            "verify",
            "alice",
            "2013-04-03",
            "--through",
            "4",
        ])
        .assert()
        .success()
        .stdout(contains("Verified 1 utilization"));

    assert_eq!(
        stored_ranges(&db_path, "alice"),
        vec![
            range("2013-04-01", "2013-04-02", 1, false),
            range("2013-04-03", "2013-04-07", 1, true),
            range("2013-04-08", "2013-04-10", 1, false),
        ]
    );
}

#[test]
fn verify_uses_the_configured_default_span() {
    let db_path = setup_test_db("verify_default");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=7, "work");

    // default_verify_days = 4: Monday through Friday
    ok(&db_path, &["verify", "alice", "2013-04-01"]);

    assert_eq!(
        stored_ranges(&db_path, "alice"),
        vec![
            range("2013-04-01", "2013-04-05", 1, true),
            range("2013-04-06", "2013-04-07", 1, false),
        ]
    );
}

#[test]
fn verifying_twice_changes_nothing() {
    let db_path = setup_test_db("verify_twice");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=5, "work");

    ok(&db_path, &["verify", "alice", "2013-04-01", "--through", "4"]);
    rst()
        .args(["--db", &db_path, "verify", "alice", "2013-04-01", "--through", "4"])
        .assert()
        .success()
        .stdout(contains("Nothing to verify"));
}

#[test]
fn verified_and_pending_neighbours_stay_apart() {
    let db_path = setup_test_db("verified_neighbours");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=3, "work");
    ok(&db_path, &["verify", "alice", "2013-04-01", "--through", "2"]);

    ok(&db_path, &["set", "alice", "2013-04-04", "work"]);

    assert_eq!(
        stored_ranges(&db_path, "alice"),
        vec![
            range("2013-04-01", "2013-04-03", 1, true),
            range("2013-04-04", "2013-04-04", 1, false),
        ]
    );

    ok(&db_path, &["set", "alice", "2013-04-04", "work", "--verified"]);

    assert_eq!(
        stored_ranges(&db_path, "alice"),
        vec![range("2013-04-01", "2013-04-04", 1, true)]
    );
}

#[test]
fn split_command_cuts_a_range() {
    let db_path = setup_test_db("split_cmd");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=5, "work");

    ok(&db_path, &["split", "alice", "2013-04-03"]);

    assert_eq!(
        stored_ranges(&db_path, "alice"),
        vec![
            range("2013-04-01", "2013-04-02", 1, false),
            range("2013-04-03", "2013-04-05", 1, false),
        ]
    );

    // already starting there: nothing to split
    rst()
        .args(["--db", &db_path, "split", "alice", "2013-04-03"])
        .assert()
        .success()
        .stdout(contains("nothing to split"));
}

#[test]
fn show_looks_up_a_day_with_offset() {
    let db_path = setup_test_db("show_offset");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=2, "work");
    set_days(&db_path, "alice", 3..=4, "vacation");

    rst()
        .args([
            "--db",
            &db_path,
            "show",
            "alice",
            "--date",
            "2013-04-01",
            "--offset",
            "3",
        ])
        .assert()
        .success()
        .stdout(contains("vacation").and(contains("2013-04-03..2013-04-04")));

    rst()
        .args([
            "--db",
            &db_path,
            "show",
            "alice",
            "--date",
            "2013-04-03",
            "--offset",
            "-3",
        ])
        .assert()
        .success()
        .stdout(contains("--").and(contains("work").not()));
}

#[test]
fn show_lists_the_ranges_of_a_period() {
    let db_path = setup_test_db("show_period");
    init_db_with_types(&db_path);
    set_days(&db_path, "alice", 1..=2, "work");
    set_days(&db_path, "alice", 10..=12, "vacation");

    rst()
        .args(["--db", &db_path, "show", "alice", "--period", "2013-04"])
        .assert()
        .success()
        .stdout(
            contains("2013-04-01")
                .and(contains("2013-04-12"))
                .and(contains("3 days"))
                .and(contains("pending")),
        );

    rst()
        .args(["--db", &db_path, "show", "alice", "--period", "2013-05"])
        .assert()
        .success()
        .stdout(contains("No utilizations found"));
}

#[test]
fn unknown_type_is_rejected() {
    let db_path = setup_test_db("unknown_type");
    init_db_with_types(&db_path);

    rst()
        .args(["--db", &db_path, "set", "alice", "2013-04-01", "sabbatical"])
        .assert()
        .failure()
        .stderr(contains("Invalid utilization type"));

    assert!(stored_ranges(&db_path, "alice").is_empty());
}

#[test]
fn malformed_date_is_rejected() {
    let db_path = setup_test_db("bad_date");
    init_db_with_types(&db_path);

    rst()
        .args(["--db", &db_path, "set", "alice", "2013-02-30", "work"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}
