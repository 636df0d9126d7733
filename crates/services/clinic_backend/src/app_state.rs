// --- File: crates/services/clinic_backend/src/app_state.rs ---
use clinic_booking::{BookingState, Schedule};
use clinic_common::error::ClinicError;
use clinic_common::services::ServiceFactory;
use clinic_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use crate::service_factory::ClinicServiceFactory;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service_factory: Arc<dyn ServiceFactory>,
    pub booking: Arc<BookingState>,
}

impl AppState {
    /// Builds the state with services created from `config`.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, ClinicError> {
        let factory = Arc::new(ClinicServiceFactory::new(config.clone()).await);
        Self::with_factory(config, factory)
    }

    /// Builds the state around an existing factory.
    ///
    /// Fails when the `[schedule]` section does not describe a usable schedule.
    pub fn with_factory(
        config: Arc<AppConfig>,
        service_factory: Arc<dyn ServiceFactory>,
    ) -> Result<Self, ClinicError> {
        let schedule = Schedule::from_config(&config.schedule)?;
        info!(
            "Schedule: {} slots of {} min per working day in {}",
            schedule.slots_per_day(),
            schedule.slot_duration.num_minutes(),
            schedule.time_zone
        );

        let booking = Arc::new(BookingState::new(
            config.clone(),
            schedule,
            service_factory.calendar_service(),
            service_factory.notification_service(),
        ));

        Ok(Self {
            config,
            service_factory,
            booking,
        })
    }
}
