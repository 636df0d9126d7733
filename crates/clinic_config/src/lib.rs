use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

use env_vars::{get_config_prefix, inject_env_secrets, CONFIG_SEPARATOR};

/// Loads the configuration from `$CONFIG_DIR` (default `config/`).
///
/// Sources, later ones winning: `default.toml`, `{RUN_ENV}.toml`
/// (`RUN_ENV` defaults to `debug`), then `CLINIC__*` environment variables.
/// `secret_from_env` markers are resolved last.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    load_config_from(Path::new(&config_dir))
}

/// Same as [`load_config`] with an explicit configuration directory.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = get_config_prefix();

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .prefix_separator(CONFIG_SEPARATOR)
                .separator(CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let raw: serde_json::Value = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw)
}

/// Resolves `secret_from_env` markers and deserializes the result.
pub fn apply_env_overrides_from_marker(
    mut raw: serde_json::Value,
) -> Result<AppConfig, ConfigError> {
    let missing = inject_env_secrets(&mut raw);
    if !missing.is_empty() {
        debug!("Unresolved secrets: {:?}", missing);
    }
    serde_json::from_value(raw)
        .map_err(|err| ConfigError::Message(format!("failed to parse config: {err}")))
}

static INIT_DOTENV: OnceCell<PathBuf> = OnceCell::new();

/// Loads the dotenv file once per process.
///
/// The file is taken from `DOTENV_OVERRIDE`, else from a first command line
/// argument starting with `.env`, else `.env`. A missing file is not an error.
pub fn ensure_dotenv_loaded() -> &'static Path {
    INIT_DOTENV.get_or_init(|| {
        let dotenv_path = env::var("DOTENV_OVERRIDE")
            .ok()
            .or_else(|| env::args().nth(1).filter(|s| s.starts_with(".env")))
            .unwrap_or_else(|| ".env".to_string());
        dotenv::from_filename(&dotenv_path).ok();
        PathBuf::from(dotenv_path)
    })
}
