//! Relay config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use federator_core::error::{FederatorError, Result};

pub use schema::{RelayConfig, ServerSection};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FEDERATOR_CONFIG";
/// Config file used when `FEDERATOR_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "federator.yaml";

pub fn load_from_file(path: &str) -> Result<RelayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FederatorError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

/// Like `load_from_file`, but a missing file yields the defaults.
pub fn load_or_default(path: &str) -> Result<RelayConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(%path, "config file not found, using defaults");
            Ok(RelayConfig::default())
        }
        Err(e) => Err(FederatorError::Internal(format!("read config failed: {e}"))),
    }
}

pub fn load_from_str(s: &str) -> Result<RelayConfig> {
    let cfg: RelayConfig = serde_yaml::from_str(s)
        .map_err(|e| FederatorError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
