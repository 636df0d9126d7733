//! Logging setup shared by the server and the wizard.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the `clinic*` crates log at `level`
/// and everything else at WARN. Calling this twice is harmless.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,clinic_backend={level},clinic_booking={level},clinic_gcal={level},\
             clinic_notify={level},clinic_common={level},clinic_config={level},\
             clinic_wizard={level},tower_http={level}"
        ))
    });

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init_with_level(Level::DEBUG);
        init();
    }
}
