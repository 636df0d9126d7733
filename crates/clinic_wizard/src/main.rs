// File: crates/clinic_wizard/src/main.rs
use clap::Parser;
use clinic_common::timezone::parse_time_zone;
use clinic_wizard::ui::WizardUi;
use clinic_wizard::{ApiClient, DEFAULT_API_URL};
use tracing::Level;

/// Book a clinic appointment from the terminal.
#[derive(Parser, Debug)]
#[command(name = "clinic-wizard", version, about)]
struct Cli {
    /// Base URL of the booking API
    #[arg(long, env = "CLINIC_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Clinic time zone; decides which days count as past
    #[arg(long, default_value = "Asia/Kolkata")]
    time_zone: String,

    /// Log API traffic
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    clinic_common::logging::init_with_level(if cli.verbose { Level::DEBUG } else { Level::WARN });

    let time_zone = parse_time_zone(&cli.time_zone)?;
    let ui = WizardUi::new(ApiClient::new(&cli.api_url), time_zone);
    ui.run().await?;
    Ok(())
}
