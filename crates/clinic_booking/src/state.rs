// --- File: crates/clinic_booking/src/state.rs ---
use clinic_common::services::{DynCalendarService, DynNotificationService};
use clinic_config::{AppConfig, ClinicConfig, GcalConfig};
use std::sync::Arc;

use crate::schedule::Schedule;

/// Shared state behind the booking routes.
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub schedule: Schedule,
    /// `None` when no calendar is configured (degraded mode).
    pub calendar: Option<Arc<DynCalendarService>>,
    pub notifier: Option<Arc<DynNotificationService>>,
}

impl BookingState {
    pub fn new(
        config: Arc<AppConfig>,
        schedule: Schedule,
        calendar: Option<Arc<DynCalendarService>>,
        notifier: Option<Arc<DynNotificationService>>,
    ) -> Self {
        Self {
            config,
            schedule,
            calendar,
            notifier,
        }
    }

    /// The calendar together with the id to query, when both are configured.
    pub fn calendar_target(&self) -> Option<(&Arc<DynCalendarService>, &str)> {
        let calendar = self.calendar.as_ref()?;
        let calendar_id = self.config.gcal.as_ref()?.calendar_id.as_deref()?;
        Some((calendar, calendar_id))
    }

    pub fn clinic(&self) -> &ClinicConfig {
        &self.config.clinic
    }

    pub fn gcal(&self) -> Option<&GcalConfig> {
        self.config.gcal.as_ref()
    }
}
