//! Tests for the in-memory booking backend and its compare-and-commit contract.

use std::sync::{Arc, Barrier};
use std::thread;

use slot_engine::backend::{AcceptanceDecision, BookingBackend, DecisionPath, InMemoryCalendar};
use slot_engine::{DayOfWeek, Interval, OwnerId, Reservation, SlotError, TeacherId, TimeOfDay, WeeklySlot};

fn iv(start: u16, end: u16) -> Interval {
    Interval::new(
        DayOfWeek::Monday,
        TimeOfDay::from_minutes(start).unwrap(),
        TimeOfDay::from_minutes(end).unwrap(),
    )
    .unwrap()
}

fn decision(owner: &str, slots: &[(u16, u16)]) -> AcceptanceDecision {
    AcceptanceDecision {
        teacher_id: TeacherId::from("t-1"),
        owner_id: OwnerId::from(owner),
        final_slots: slots
            .iter()
            .map(|&(s, e)| Reservation::new(OwnerId::from(owner), iv(s, e)))
            .collect(),
        path: DecisionPath::Direct,
    }
}

fn calendar() -> InMemoryCalendar {
    let calendar = InMemoryCalendar::new();
    calendar
        .insert_teacher(
            TeacherId::from("t-1"),
            vec![WeeklySlot::new(
                DayOfWeek::Monday,
                TimeOfDay::from_minutes(540).unwrap(),
                TimeOfDay::from_minutes(720).unwrap(),
                true,
            )
            .unwrap()],
            vec![],
        )
        .unwrap();
    calendar
}

#[test]
fn fetches_return_registered_data() {
    let calendar = calendar();
    assert_eq!(calendar.fetch_weekly_slots(&TeacherId::from("t-1")).unwrap().len(), 1);
    assert!(calendar.fetch_reservations(&TeacherId::from("t-1")).unwrap().is_empty());
}

#[test]
fn unknown_teacher_is_not_found() {
    let calendar = calendar();
    let missing = TeacherId::from("t-404");

    assert!(matches!(calendar.fetch_weekly_slots(&missing), Err(SlotError::NotFound(_))));
    assert!(matches!(calendar.fetch_reservations(&missing), Err(SlotError::NotFound(_))));

    let mut d = decision("A", &[(540, 600)]);
    d.teacher_id = missing;
    assert!(matches!(calendar.commit_decision(&d), Err(SlotError::NotFound(_))));
}

#[test]
fn overlapping_commit_from_other_owner_is_stale() {
    let calendar = calendar();
    calendar.commit_decision(&decision("A", &[(540, 600)])).unwrap();

    let err = calendar
        .commit_decision(&decision("B", &[(570, 630), (660, 720)]))
        .unwrap_err();

    assert_eq!(err, SlotError::StaleConflict { conflicting: vec![iv(570, 630)] });
    // Nothing from the rejected decision was written.
    let stored = calendar.fetch_reservations(&TeacherId::from("t-1")).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].owner, OwnerId::from("A"));
}

#[test]
fn recommit_replaces_owners_previous_slots() {
    let calendar = calendar();
    calendar.commit_decision(&decision("A", &[(540, 600)])).unwrap();
    calendar.commit_decision(&decision("A", &[(600, 660)])).unwrap();

    let stored = calendar.fetch_reservations(&TeacherId::from("t-1")).unwrap();
    assert_eq!(stored, vec![Reservation::new(OwnerId::from("A"), iv(600, 660))]);
}

#[test]
fn abutting_commits_both_succeed() {
    let calendar = calendar();
    calendar.commit_decision(&decision("A", &[(540, 600)])).unwrap();
    calendar.commit_decision(&decision("B", &[(600, 660)])).unwrap();

    assert_eq!(calendar.fetch_reservations(&TeacherId::from("t-1")).unwrap().len(), 2);
}

#[test]
fn concurrent_overlapping_commits_exactly_one_wins() {
    for _ in 0..50 {
        let calendar = Arc::new(calendar());
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = [("A", (540, 600)), ("B", (570, 630))]
            .into_iter()
            .map(|(owner, span)| {
                let calendar = Arc::clone(&calendar);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    calendar.commit_decision(&decision(owner, &[span]))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let wins = results.iter().filter(|r| r.is_ok()).count();
        let stale = results
            .iter()
            .filter(|r| matches!(r, Err(SlotError::StaleConflict { .. })))
            .count();
        assert_eq!((wins, stale), (1, 1), "results: {:?}", results);
        assert_eq!(calendar.fetch_reservations(&TeacherId::from("t-1")).unwrap().len(), 1);
    }
}
