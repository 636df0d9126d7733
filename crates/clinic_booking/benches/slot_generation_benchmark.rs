use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use clinic_booking::availability::filter_available;
use clinic_booking::{generate_slots, Schedule};
use clinic_common::services::BusyInterval;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// A Tuesday, well in the future relative to `today`.
fn bench_day() -> (NaiveDate, NaiveDate) {
    let date = NaiveDate::from_ymd_opt(2030, 3, 12).unwrap();
    let today = NaiveDate::from_ymd_opt(2030, 3, 1).unwrap();
    (date, today)
}

// Every-15-minute clinic open 08:00-20:00, seven days a week.
fn dense_schedule() -> Schedule {
    Schedule {
        time_zone: Tz::Europe__Berlin,
        slot_duration: Duration::minutes(15),
        working_days: vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ],
        windows: vec![(
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        )],
        lead_time: None,
    }
}

fn create_busy_intervals(base: DateTime<Utc>, count: usize, length_minutes: i64) -> Vec<BusyInterval> {
    let mut busy = Vec::with_capacity(count);
    let mut cursor = base;
    for _ in 0..count {
        let start = cursor + Duration::minutes(length_minutes);
        let end = start + Duration::minutes(length_minutes);
        busy.push((start, end));
        cursor = end;
    }
    busy
}

fn benchmark_generate_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_slots");
    let (date, today) = bench_day();

    group.bench_function("default_schedule", |b| {
        let schedule = Schedule::default();
        b.iter(|| generate_slots(black_box(&schedule), black_box(date), black_box(today)))
    });

    group.bench_function("dense_schedule", |b| {
        let schedule = dense_schedule();
        b.iter(|| generate_slots(black_box(&schedule), black_box(date), black_box(today)))
    });

    group.finish();
}

fn benchmark_filter_available(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_available");
    let (date, today) = bench_day();
    let schedule = dense_schedule();
    let slots = generate_slots(&schedule, date, today);
    let base = slots[0].start;

    for (name, count) in [("no_busy", 0), ("few_busy", 5), ("many_busy", 40)] {
        let busy = create_busy_intervals(base, count, 20);
        group.bench_function(name, |b| {
            b.iter(|| filter_available(black_box(slots.clone()), black_box(&busy)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_generate_slots, benchmark_filter_available);
criterion_main!(benches);
