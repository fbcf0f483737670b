use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use slot_engine::{
    check_all, generate_week_units, AvailabilityIndex, DayOfWeek, Interval, OwnerId, Reservation,
    TimeOfDay, WeeklySlot,
};

fn t(minutes: u16) -> TimeOfDay {
    TimeOfDay::from_minutes(minutes).unwrap()
}

/// A busy teacher: 08:00-20:00 every day, booked in 45-minute blocks by ten groups.
fn busy_week() -> (AvailabilityIndex, Vec<Reservation>) {
    let slots = DayOfWeek::ALL
        .into_iter()
        .map(|day| WeeklySlot::new(day, t(480), t(1200), true).unwrap())
        .collect();

    let mut reservations = Vec::new();
    for day in DayOfWeek::ALL {
        for (n, start) in (480u16..1155).step_by(90).enumerate() {
            let owner = OwnerId(format!("group-{}", n % 10));
            let interval = Interval::new(day, t(start), t(start + 45)).unwrap();
            reservations.push(Reservation::new(owner, interval));
        }
    }

    (AvailabilityIndex::new(slots), reservations)
}

fn bench_check_all(c: &mut Criterion) {
    let (_, reservations) = busy_week();
    let requested: Vec<Interval> = DayOfWeek::ALL
        .into_iter()
        .map(|day| Interval::new(day, t(600), t(660)).unwrap())
        .collect();
    let owner = OwnerId::from("group-new");

    c.bench_function("check_all_week", |b| {
        b.iter(|| check_all(black_box(&requested), black_box(&reservations), &owner))
    });
}

fn bench_week_units(c: &mut Criterion) {
    let (index, reservations) = busy_week();
    let owner = OwnerId::from("group-new");

    c.bench_function("generate_week_units_60", |b| {
        b.iter(|| generate_week_units(black_box(&index), 60, black_box(&reservations), &owner))
    });
}

criterion_group!(benches, bench_check_all, bench_week_units);
criterion_main!(benches);
