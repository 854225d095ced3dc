use std::env;
use std::time::Duration;

use super::{HostError, HostResult};

/// Environment variable holding the serial port path.
pub const PORT_ENV: &str = "POCKET_CUBE_UART";
/// Environment variable holding the read timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "POCKET_CUBE_TIMEOUT_MS";

/// Homing after a reset takes a few seconds, so be generous by default.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the host side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Serial port path; `None` means probe the usual device nodes.
    pub port_path: Option<String>,
    pub read_timeout: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            port_path: None,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl HostConfig {
    /// Reads the settings from the environment, loading `.env` first if present.
    ///
    /// # Errors
    /// Returns `HostError::Config` if the timeout is not a number.
    pub fn from_env() -> HostResult<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(env::var(PORT_ENV).ok(), env::var(TIMEOUT_ENV).ok())
    }

    fn from_vars(port: Option<String>, timeout_ms: Option<String>) -> HostResult<Self> {
        let read_timeout = match timeout_ms {
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|_| {
                    HostError::Config(format!("{TIMEOUT_ENV} is not a number: {raw:?}"))
                })?;
                Duration::from_millis(ms)
            }
            None => DEFAULT_READ_TIMEOUT,
        };
        Ok(Self {
            port_path: port.filter(|p| !p.trim().is_empty()),
            read_timeout,
        })
    }
}
