// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use gymbook::models::{AppointmentStatus, MemberStatus};
use gymbook::store::{MEMBERS, Store};

fn setup() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::at(dir.path()).unwrap();
    (dir, store)
}

fn run(store: &Store, args: &[&str]) -> Result<()> {
    let m = gymbook::cli::build_cli().get_matches_from(args);
    match m.subcommand() {
        Some(("member", sub)) => gymbook::commands::members::handle(store, sub),
        Some(("package", sub)) => gymbook::commands::packages::handle(store, sub),
        Some(("service", sub)) => gymbook::commands::services::handle(store, sub),
        Some(("staff", sub)) => gymbook::commands::staff::handle(store, sub),
        Some(("appt", sub)) => gymbook::commands::appointments::handle(store, sub),
        _ => unreachable!(),
    }
}

fn seed_catalog(store: &Store) {
    run(store, &["gymbook", "service", "add", "--name", "Fitness"]).unwrap();
    run(
        store,
        &[
            "gymbook", "package", "add", "--service", "1", "--name", "8 Lessons",
            "--price", "2000", "--sessions", "8", "--validity", "30",
        ],
    )
    .unwrap();
    run(
        store,
        &[
            "gymbook", "staff", "add", "--name", "Coach", "--model", "commission",
            "--rate", "40",
        ],
    )
    .unwrap();
}

#[test]
fn enrollment_copies_the_package_terms() {
    let (_dir, store) = setup();
    seed_catalog(&store);

    run(
        &store,
        &[
            "gymbook", "member", "add", "--name", "Jamie", "--package", "1",
            "--start", "2025-08-01",
        ],
    )
    .unwrap();

    let m = &store.members().unwrap()[0];
    assert_eq!(m.remaining_sessions, Some(8));
    assert_eq!(m.end_date.unwrap().to_string(), "2025-08-31");
    assert_eq!(m.status, MemberStatus::Active);
}

#[test]
fn enrollment_with_unknown_package_fails() {
    let (_dir, store) = setup();
    assert!(
        run(
            &store,
            &["gymbook", "member", "add", "--name", "Jamie", "--package", "9"],
        )
        .is_err()
    );
    assert!(store.members().unwrap().is_empty());
}

#[test]
fn booking_consumes_a_session_and_deletion_refunds_it() {
    let (_dir, store) = setup();
    seed_catalog(&store);
    run(
        &store,
        &[
            "gymbook", "member", "add", "--name", "Jamie", "--package", "1",
            "--start", "2025-08-01",
        ],
    )
    .unwrap();

    run(
        &store,
        &[
            "gymbook", "appt", "add", "--member", "1", "--trainer", "1",
            "--date", "2025-08-05",
        ],
    )
    .unwrap();
    assert_eq!(store.members().unwrap()[0].remaining_sessions, Some(7));

    run(&store, &["gymbook", "appt", "rm", "1"]).unwrap();
    assert_eq!(store.members().unwrap()[0].remaining_sessions, Some(8));
    assert!(store.appointments().unwrap().is_empty());
}

#[test]
fn cancellation_forfeits_the_session() {
    let (_dir, store) = setup();
    seed_catalog(&store);
    run(
        &store,
        &[
            "gymbook", "member", "add", "--name", "Jamie", "--package", "1",
            "--start", "2025-08-01",
        ],
    )
    .unwrap();
    run(
        &store,
        &[
            "gymbook", "appt", "add", "--member", "1", "--trainer", "1",
            "--date", "2025-08-05",
        ],
    )
    .unwrap();

    run(&store, &["gymbook", "appt", "cancel", "1"]).unwrap();
    assert_eq!(
        store.appointments().unwrap()[0].status,
        AppointmentStatus::Cancelled
    );
    // No refund on cancellation.
    assert_eq!(store.members().unwrap()[0].remaining_sessions, Some(7));
}

#[test]
fn renewal_resets_sessions_and_reactivates() {
    let (_dir, store) = setup();
    seed_catalog(&store);
    run(
        &store,
        &[
            "gymbook", "member", "add", "--name", "Jamie", "--package", "1",
            "--start", "2025-07-01",
        ],
    )
    .unwrap();

    // Run the member down to passive with an empty balance.
    let mut members = store.members().unwrap();
    members[0].remaining_sessions = Some(0);
    members[0].status = MemberStatus::Passive;
    store.write(MEMBERS, &members).unwrap();

    run(
        &store,
        &[
            "gymbook", "member", "assign", "1", "--package", "1", "--start", "2025-08-01",
        ],
    )
    .unwrap();

    let m = &store.members().unwrap()[0];
    assert_eq!(m.remaining_sessions, Some(8));
    assert_eq!(m.status, MemberStatus::Active);
    assert_eq!(m.start_date.to_string(), "2025-08-01");
    assert_eq!(m.end_date.unwrap().to_string(), "2025-08-31");
}
