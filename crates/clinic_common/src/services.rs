// --- File: crates/clinic_common/src/services.rs ---
//! Service abstractions for the external collaborators.
//!
//! The booking logic only ever sees these traits, so the Google Calendar
//! and notification adapters can be swapped for in-memory doubles in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Busy interval as `(start, end)`, end exclusive.
pub type BusyInterval = (DateTime<Utc>, DateTime<Utc>);

/// A type-erased service error.
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// The doctor's calendar: source of truth for conflicts.
pub trait CalendarService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Busy intervals overlapping `[start_time, end_time)`, sorted by start.
    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error>;

    /// Inserts an event and returns the id the calendar assigned.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;
}

/// Outbound email and SMS.
pub trait NotificationService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;

    fn send_sms(&self, to: &str, body: &str) -> BoxFuture<'_, NotificationResult, Self::Error>;
}

pub type DynCalendarService = dyn CalendarService<Error = BoxedError>;
pub type DynNotificationService = dyn NotificationService<Error = BoxedError>;

/// Hands out the configured services. `None` means the integration is off.
pub trait ServiceFactory: Send + Sync {
    fn calendar_service(&self) -> Option<Arc<DynCalendarService>>;

    fn notification_service(&self) -> Option<Arc<DynNotificationService>>;
}

/// Adapter that erases a service's concrete error type into [`BoxedError`].
pub struct Boxed<S>(pub S);

impl<S> Boxed<S> {
    pub fn new(service: S) -> Self {
        Boxed(service)
    }
}

impl<S> CalendarService for Boxed<S>
where
    S: CalendarService,
{
    type Error = BoxedError;

    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        let fut = self.0.get_busy_times(calendar_id, start_time, end_time);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let fut = self.0.create_event(calendar_id, event);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }
}

impl<S> NotificationService for Boxed<S>
where
    S: NotificationService,
{
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let fut = self.0.send_email(to, subject, body, is_html);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn send_sms(&self, to: &str, body: &str) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let fut = self.0.send_sms(to, body);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }
}

/// A minute-offset reminder attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventReminder {
    /// `email` or `popup`
    pub method: String,
    pub minutes: i32,
}

/// Event to insert into the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// IANA zone the event is displayed in.
    pub time_zone: String,
    pub summary: String,
    pub description: Option<String>,
    pub reminders: Vec<EventReminder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventResult {
    pub event_id: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Provider message id, or a local id for simulated sends.
    pub id: String,
    /// `sent`, `queued` or `simulated`
    pub status: String,
}
