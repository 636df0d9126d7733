// --- File: crates/clinic_booking/src/slots.rs ---
//! Slot generation for one calendar day.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clinic_common::models::TimeSlot;
use clinic_common::timezone::{format_slot_label, local_to_utc, to_wire_instant};
use tracing::debug;

use crate::schedule::Schedule;

/// A bookable interval, both in UTC and in the clinic's wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub local_start: NaiveTime,
    pub local_end: NaiveTime,
}

impl Slot {
    /// `HH:MM` of the local start.
    pub fn time_key(&self) -> String {
        self.local_start.format("%H:%M").to_string()
    }

    pub fn label(&self) -> String {
        format_slot_label(self.local_start, self.local_end)
    }

    pub fn to_time_slot(&self) -> TimeSlot {
        TimeSlot {
            start: to_wire_instant(self.start),
            end: to_wire_instant(self.end),
            time: self.time_key(),
            label: self.label(),
        }
    }
}

/// All slots of `date`, in order.
///
/// Empty on non-working days and on dates before `today` (the clinic's
/// local day). Each window is cut into back-to-back slots of the configured
/// length; a tail shorter than one slot is dropped. Wall-clock times that a
/// clock change skips yield no slot, and neither does a slot whose real
/// length a clock change alters.
pub fn generate_slots(schedule: &Schedule, date: NaiveDate, today: NaiveDate) -> Vec<Slot> {
    if date < today || !schedule.is_working_day(date) {
        return Vec::new();
    }

    let mut slots = Vec::with_capacity(schedule.slots_per_day());
    for (window_start, window_end) in &schedule.windows {
        let mut local_start = *window_start;
        loop {
            let (local_end, wrapped) = local_start.overflowing_add_signed(schedule.slot_duration);
            if wrapped != 0 || local_end > *window_end {
                break;
            }

            match (
                local_to_utc(schedule.time_zone, date, local_start),
                local_to_utc(schedule.time_zone, date, local_end),
            ) {
                // A slot straddling a repeated hour would come out longer.
                (Ok(start), Ok(end)) if end - start == schedule.slot_duration => {
                    slots.push(Slot {
                        start,
                        end,
                        local_start,
                        local_end,
                    })
                }
                (Ok(_), Ok(_)) => debug!(
                    "Skipping slot {}-{} on {}: crosses a clock change",
                    local_start, local_end, date
                ),
                _ => debug!(
                    "Skipping slot {}-{} on {}: not a valid local time",
                    local_start, local_end, date
                ),
            }
            local_start = local_end;
        }
    }
    slots
}

/// Drops slots that start less than `lead_time` after `now`.
pub fn apply_lead_time(slots: Vec<Slot>, now: DateTime<Utc>, lead_time: Option<Duration>) -> Vec<Slot> {
    match lead_time {
        Some(lead) => {
            let earliest = now + lead;
            slots.into_iter().filter(|s| s.start >= earliest).collect()
        }
        None => slots,
    }
}

/// The slot of `date` starting at `time`, if the schedule offers one.
pub fn find_slot(
    schedule: &Schedule,
    date: NaiveDate,
    time: NaiveTime,
    now: DateTime<Utc>,
) -> Option<Slot> {
    let today = clinic_common::timezone::today_in(schedule.time_zone, now);
    apply_lead_time(generate_slots(schedule, date, today), now, schedule.lead_time)
        .into_iter()
        .find(|s| s.local_start == time)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{Datelike, Weekday};
    use proptest::prelude::*;

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..3650).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
        })
    }

    proptest! {
        #[test]
        fn weekends_never_have_slots(date in any_date()) {
            let schedule = Schedule::default();
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                prop_assert!(generate_slots(&schedule, date, NaiveDate::MIN).is_empty());
            }
        }

        #[test]
        fn past_dates_never_have_slots(date in any_date(), back in 1i64..400) {
            let today = date + Duration::days(back);
            prop_assert!(generate_slots(&Schedule::default(), date, today).is_empty());
        }

        #[test]
        fn weekday_slots_are_fixed_length_contiguous_and_disjoint(date in any_date()) {
            let schedule = Schedule::default();
            prop_assume!(schedule.is_working_day(date));
            let slots = generate_slots(&schedule, date, date);

            prop_assert_eq!(slots.len(), schedule.slots_per_day());
            for slot in &slots {
                prop_assert_eq!(slot.end - slot.start, schedule.slot_duration);
            }
            for pair in slots.windows(2) {
                let same_window = pair[0].local_end == pair[1].local_start;
                if same_window {
                    prop_assert_eq!(pair[0].end, pair[1].start);
                } else {
                    prop_assert!(pair[0].end < pair[1].start);
                }
            }
        }

        #[test]
        fn slots_keep_their_length_where_clocks_change(date in any_date()) {
            let schedule = Schedule {
                time_zone: chrono_tz::Europe::Berlin,
                working_days: vec![
                    Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu,
                    Weekday::Fri, Weekday::Sat, Weekday::Sun,
                ],
                windows: vec![(
                    NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
                )],
                ..Default::default()
            };
            let slots = generate_slots(&schedule, date, date);

            prop_assert!(!slots.is_empty());
            for slot in &slots {
                prop_assert_eq!(slot.end - slot.start, schedule.slot_duration);
            }
            for pair in slots.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }
    }
}
