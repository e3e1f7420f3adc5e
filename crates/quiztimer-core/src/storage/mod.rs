mod config;

pub use config::Config;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory, creating it if needed.
///
/// `QUIZTIMER_CONFIG_DIR` overrides the location outright (tests, e2e
/// runs). Otherwise resolves to `~/.config/quiztimer[-dev]/` based on
/// QUIZTIMER_ENV; set QUIZTIMER_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = if let Ok(dir) = std::env::var("QUIZTIMER_CONFIG_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("QUIZTIMER_ENV").unwrap_or_else(|_| "production".to_string());

        if env == "dev" {
            base_dir.join("quiztimer-dev")
        } else {
            base_dir.join("quiztimer")
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
    Ok(dir)
}
