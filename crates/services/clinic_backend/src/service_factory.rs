// --- File: crates/services/clinic_backend/src/service_factory.rs ---
//! Builds the external services from the runtime configuration.
use clinic_common::services::{
    Boxed, DynCalendarService, DynNotificationService, ServiceFactory,
};
use clinic_config::AppConfig;
use clinic_notify::ClinicNotificationService;
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "gcal")]
use {
    clinic_common::features::is_gcal_enabled,
    clinic_gcal::{create_calendar_hub, GoogleCalendarService},
    tracing::error,
};

/// Service factory backing the server.
///
/// The calendar exists only with the `gcal` feature compiled in, `use_gcal`
/// set and a `[gcal]` section present. Notifications always exist; the
/// notifier itself decides between SendGrid, Twilio and simulated SMS.
pub struct ClinicServiceFactory {
    calendar_service: Option<Arc<DynCalendarService>>,
    notification_service: Option<Arc<DynNotificationService>>,
}

impl ClinicServiceFactory {
    pub async fn new(config: Arc<AppConfig>) -> Self {
        let calendar_service = Self::init_calendar(&config).await;

        let notifier = ClinicNotificationService::from_config(&config);
        info!(
            "✅ Notification service initialized (email {}).",
            if notifier.email_enabled() { "enabled" } else { "disabled" }
        );
        let notification_service: Arc<DynNotificationService> = Arc::new(Boxed::new(notifier));

        Self {
            calendar_service,
            notification_service: Some(notification_service),
        }
    }

    /// A factory over ready-made services.
    pub fn from_services(
        calendar_service: Option<Arc<DynCalendarService>>,
        notification_service: Option<Arc<DynNotificationService>>,
    ) -> Self {
        Self {
            calendar_service,
            notification_service,
        }
    }

    #[cfg(feature = "gcal")]
    async fn init_calendar(config: &AppConfig) -> Option<Arc<DynCalendarService>> {
        let gcal = match config.gcal.as_ref() {
            Some(gcal) if is_gcal_enabled(config) => gcal,
            _ => {
                info!("ℹ️ GCal feature compiled, but disabled via runtime config or missing gcal config section.");
                return None;
            }
        };

        info!("ℹ️ Initializing Google Calendar service...");
        match create_calendar_hub(gcal).await {
            Ok(hub) => {
                let service = GoogleCalendarService::new(Arc::new(hub));
                info!("✅ Google Calendar service initialized.");
                Some(Arc::new(Boxed::new(service)))
            }
            Err(e) => {
                error!(
                    "🚨 Failed to initialize Google Calendar service: {}. Slots will not be checked against the calendar.",
                    e
                );
                None
            }
        }
    }

    #[cfg(not(feature = "gcal"))]
    async fn init_calendar(_config: &AppConfig) -> Option<Arc<DynCalendarService>> {
        info!("ℹ️ Built without the gcal feature; no calendar service.");
        None
    }
}

impl ServiceFactory for ClinicServiceFactory {
    fn calendar_service(&self) -> Option<Arc<DynCalendarService>> {
        self.calendar_service.clone()
    }

    fn notification_service(&self) -> Option<Arc<DynNotificationService>> {
        self.notification_service.clone()
    }
}
