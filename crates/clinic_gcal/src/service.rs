// --- File: crates/clinic_gcal/src/service.rs ---
//! Google Calendar implementation of [`CalendarService`].

use chrono::{DateTime, Utc};
use clinic_common::services::{
    BoxFuture, BusyInterval, CalendarEvent, CalendarEventResult, CalendarService,
};
use google_calendar3::api::{
    Event, EventDateTime, EventReminder, EventReminders, FreeBusyRequest, FreeBusyRequestItem,
    FreeBusyResponse,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::HubType;

#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

/// Pulls the busy periods of `calendar_id` out of a free/busy response,
/// sorted by start. Periods missing either bound are skipped.
pub fn extract_busy_periods(response: FreeBusyResponse, calendar_id: &str) -> Vec<BusyInterval> {
    let mut busy_periods: Vec<BusyInterval> = response
        .calendars
        .and_then(|mut calendars| calendars.remove(calendar_id))
        .and_then(|cal_info| cal_info.busy)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|period| match (period.start, period.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => {
                warn!("Skipping busy period with missing start/end: {:?}", period);
                None
            }
        })
        .collect();
    busy_periods.sort_by_key(|k| k.0);
    busy_periods
}

/// Builds the Google event body: times pinned to the clinic zone and the
/// default reminders replaced by the configured overrides.
pub fn to_google_event(event: CalendarEvent) -> Result<Event, GcalServiceError> {
    if event.end_time <= event.start_time {
        return Err(GcalServiceError::InvalidEvent(
            "End time must be after start time".to_string(),
        ));
    }

    let reminders = EventReminders {
        use_default: Some(false),
        overrides: Some(
            event
                .reminders
                .into_iter()
                .map(|r| EventReminder {
                    method: Some(r.method),
                    minutes: Some(r.minutes),
                })
                .collect(),
        ),
    };

    Ok(Event {
        summary: Some(event.summary),
        description: event.description,
        start: Some(EventDateTime {
            date_time: Some(event.start_time),
            time_zone: Some(event.time_zone.clone()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(event.end_time),
            time_zone: Some(event.time_zone),
            ..Default::default()
        }),
        reminders: Some(reminders),
        ..Default::default()
    })
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Free/busy query for `[start_time, end_time)`.
    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let req = FreeBusyRequest {
                time_min: Some(start_time),
                time_max: Some(end_time),
                time_zone: Some("UTC".to_string()),
                items: Some(vec![FreeBusyRequestItem {
                    id: Some(calendar_id.clone()),
                    ..Default::default()
                }]),
                ..Default::default()
            };

            let (_response, freebusy_response) = calendar_hub.freebusy().query(req).doit().await?;

            let busy = extract_busy_periods(freebusy_response, &calendar_id);
            debug!(
                "{} busy period(s) on {} between {} and {}",
                busy.len(),
                calendar_id,
                start_time,
                end_time
            );
            Ok(busy)
        })
    }

    /// Inserts the event. Conflict checking is the caller's job.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let new_event = to_google_event(event)?;

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .doit()
                .await?;

            info!("Created calendar event {:?}", created_event.id);
            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clinic_common::services::EventReminder as Reminder;
    use google_calendar3::api::{FreeBusyCalendar, TimePeriod};
    use std::collections::HashMap;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 20, h, m, 0).unwrap()
    }

    fn sample_event() -> CalendarEvent {
        CalendarEvent {
            start_time: at(4, 30),
            end_time: at(5, 0),
            time_zone: "Asia/Kolkata".to_string(),
            summary: "Appointment with Asha".to_string(),
            description: Some("Patient: Asha".to_string()),
            reminders: vec![
                Reminder {
                    method: "email".into(),
                    minutes: 1440,
                },
                Reminder {
                    method: "popup".into(),
                    minutes: 30,
                },
            ],
        }
    }

    #[test]
    fn google_event_carries_zone_and_reminder_overrides() {
        let event = to_google_event(sample_event()).unwrap();

        assert_eq!(event.summary.as_deref(), Some("Appointment with Asha"));
        let start = event.start.unwrap();
        assert_eq!(start.date_time, Some(at(4, 30)));
        assert_eq!(start.time_zone.as_deref(), Some("Asia/Kolkata"));
        assert_eq!(event.end.unwrap().date_time, Some(at(5, 0)));

        let reminders = event.reminders.unwrap();
        assert_eq!(reminders.use_default, Some(false));
        let overrides = reminders.overrides.unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides[0].method.as_deref(), Some("email"));
        assert_eq!(overrides[0].minutes, Some(1440));
        assert_eq!(overrides[1].method.as_deref(), Some("popup"));
        assert_eq!(overrides[1].minutes, Some(30));
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let mut event = sample_event();
        event.end_time = event.start_time;
        assert!(matches!(
            to_google_event(event),
            Err(GcalServiceError::InvalidEvent(_))
        ));
    }

    #[test]
    fn busy_periods_are_sorted_and_incomplete_ones_skipped() {
        let busy = vec![
            TimePeriod {
                start: Some(at(10, 0)),
                end: Some(at(10, 30)),
            },
            TimePeriod {
                start: Some(at(5, 0)),
                end: None,
            },
            TimePeriod {
                start: Some(at(4, 30)),
                end: Some(at(5, 0)),
            },
        ];
        let mut calendars = HashMap::new();
        calendars.insert(
            "doctor@example.com".to_string(),
            FreeBusyCalendar {
                busy: Some(busy),
                ..Default::default()
            },
        );
        let response = FreeBusyResponse {
            calendars: Some(calendars),
            ..Default::default()
        };

        let periods = extract_busy_periods(response, "doctor@example.com");
        assert_eq!(periods, vec![(at(4, 30), at(5, 0)), (at(10, 0), at(10, 30))]);
    }

    #[test]
    fn unknown_calendar_yields_no_busy_periods() {
        let response = FreeBusyResponse::default();
        assert!(extract_busy_periods(response, "someone-else").is_empty());
    }
}
