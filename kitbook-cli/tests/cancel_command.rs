//! Integration tests for the `cancel` command.

mod common;

use common::{plus, TestEnv};
use predicates::prelude::*;

#[test]
fn test_owner_cancels() {
    let env = TestEnv::new();
    let tent = env.add_equipment("Tent");
    let booking = env.book_ok("olena", tent, plus(2), plus(3));

    env.as_user("olena")
        .args(["cancel", booking.to_string().as_str()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Booking cancelled"));

    // The period is free again.
    env.book_ok("taras", tent, plus(2), plus(3));
}

#[test]
fn test_other_member_cannot_cancel() {
    let env = TestEnv::new();
    let tent = env.add_equipment("Tent");
    let booking = env.book_ok("olena", tent, plus(2), plus(3));

    env.as_user("taras")
        .args(["cancel", booking.to_string().as_str()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not allowed"));

    let csv = env.bookings(&["--format", "csv"]);
    assert_eq!(csv.lines().count(), 2, "booking should remain: {csv}");
}

#[test]
fn test_privileged_member_cancels_any_booking() {
    let env = TestEnv::new();
    let tent = env.add_equipment("Tent");
    let booking = env.book_ok("olena", tent, plus(2), plus(3));

    // Positions are matched without regard to case.
    env.as_user("bohdan")
        .args(["cancel", booking.to_string().as_str()])
        .assert()
        .success();

    let csv = env.bookings(&["--format", "csv"]);
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn test_cancel_missing_booking_is_noop() {
    let env = TestEnv::new();

    env.as_user("olena")
        .args(["cancel", "999"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No booking found"));
}

#[test]
fn test_cancel_dry_run_keeps_booking() {
    let env = TestEnv::new();
    let tent = env.add_equipment("Tent");
    let booking = env.book_ok("olena", tent, plus(2), plus(3));

    env.as_user("olena")
        .args(["cancel", booking.to_string().as_str(), "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Dry run"));

    let csv = env.bookings(&["--format", "csv"]);
    assert_eq!(csv.lines().count(), 2);
}
