//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `ROUTES_FILE` - Route table file (default: `routes.toml`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SEED_FILE` - Optional JSON array of movies loaded at startup
//!
//! ```bash
//! export LISTEN="127.0.0.1:8080"
//! export ROUTES_FILE="/etc/blockbuster/routes.toml"
//! ```

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";
pub const DEFAULT_ROUTES_FILE: &str = "routes.toml";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub routes_file: PathBuf,
    pub log_level: String,
    pub log_format: String,
    /// Movies to preload into the in-memory store.
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but not valid unicode.
    pub fn from_env() -> Result<Self> {
        let listen_addr = var_or("LISTEN", DEFAULT_LISTEN)?;
        let routes_file = PathBuf::from(var_or("ROUTES_FILE", DEFAULT_ROUTES_FILE)?);
        let log_level = var_or("RUST_LOG", "info")?;
        let log_format = var_or("LOG_FORMAT", "text")?;

        let seed_file = optional_var("SEED_FILE")?
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            listen_addr,
            routes_file,
            log_level,
            log_format,
            seed_file,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `routes_file` is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        let port = self.listen_addr.rsplit_once(':').map(|(_, port)| port);
        if port.is_none_or(|p| p.parse::<u16>().is_err()) {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.routes_file.as_os_str().is_empty() {
            anyhow::bail!("ROUTES_FILE must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Routes file: {}", self.routes_file.display());
        match &self.seed_file {
            Some(path) => tracing::info!("  Seed file: {}", path.display()),
            None => tracing::info!("  Seed file: none"),
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn optional_var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{name} is not valid unicode")),
    }
}

fn var_or(name: &str, default: &str) -> Result<String> {
    Ok(optional_var(name)?.unwrap_or_else(|| default.to_string()))
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
