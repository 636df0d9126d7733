// --- File: crates/clinic_booking/src/availability.rs ---
use chrono::{DateTime, NaiveDate, Utc};
use clinic_common::services::BusyInterval;
use clinic_common::timezone::{local_day_bounds, today_in};
use tracing::{info, warn};

use crate::slots::{apply_lead_time, generate_slots, Slot};
use crate::state::BookingState;

/// Half-open overlap: `[a_start, a_end)` and `[b_start, b_end)` share time.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Slots that overlap none of the busy intervals.
pub fn filter_available(slots: Vec<Slot>, busy: &[BusyInterval]) -> Vec<Slot> {
    slots
        .into_iter()
        .filter(|slot| {
            !busy
                .iter()
                .any(|(busy_start, busy_end)| overlaps(slot.start, slot.end, *busy_start, *busy_end))
        })
        .collect()
}

/// Bookable slots of `date`.
///
/// Without a calendar, or when the calendar query fails, every generated
/// slot is returned; this never fails.
pub async fn available_slots(state: &BookingState, date: NaiveDate, now: DateTime<Utc>) -> Vec<Slot> {
    let schedule = &state.schedule;
    let today = today_in(schedule.time_zone, now);
    let slots = apply_lead_time(generate_slots(schedule, date, today), now, schedule.lead_time);
    if slots.is_empty() {
        return slots;
    }

    let Some((calendar, calendar_id)) = state.calendar_target() else {
        warn!("No calendar configured, returning all {} slots for {}", slots.len(), date);
        return slots;
    };

    let (day_start, day_end) = match local_day_bounds(schedule.time_zone, date) {
        Ok(bounds) => bounds,
        Err(e) => {
            warn!("Cannot compute day bounds for {}: {}; returning all slots", date, e);
            return slots;
        }
    };

    match calendar.get_busy_times(calendar_id, day_start, day_end).await {
        Ok(busy) => {
            let available = filter_available(slots, &busy);
            info!(
                "{} of {} slots available on {} ({} busy interval(s))",
                available.len(),
                schedule.slots_per_day(),
                date,
                busy.len()
            );
            available
        }
        Err(e) => {
            warn!("Calendar query failed for {}: {}; returning all slots", date, e);
            slots
        }
    }
}
