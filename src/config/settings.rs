//! Application settings loaded from config.toml
//!
//! The file lists the staff who may run the bot and the role unknown Discord users
//! receive. The path comes from `AUCTION_CONFIG`, defaulting to `./config.toml`.

use crate::auth::{Role, StaffDirectory, StaffMember};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Role for Discord users not listed under `staff`; omit to reject them
    #[serde(default)]
    pub default_role: Option<Role>,
    /// Known staff members and their roles
    #[serde(default)]
    pub staff: Vec<StaffMember>,
}

impl AppConfig {
    /// Builds the staff lookup used by the bot's permission checks.
    #[must_use]
    pub fn staff_directory(&self) -> StaffDirectory {
        StaffDirectory::new(&self.staff, self.default_role)
    }
}

/// Loads the configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A staff entry has an unknown role
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the configuration from `AUCTION_CONFIG` or `./config.toml`.
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var("AUCTION_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}
