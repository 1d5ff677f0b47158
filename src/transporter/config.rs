//! Configuration consumed by [`TelegrafTransporter`](super::TelegrafTransporter).
//!
//! `TransporterBuilder` assembles these values, but the struct is also
//! deserialisable so it can be embedded in an application's own config file.

use serde::Deserialize;

use crate::level::LogLevel;

use super::{ConfigError, KeySet};

/// Destination used when no address is configured.
pub const DEFAULT_ADDRESS: &str = "localhost";
/// Default port of Telegraf's `socket_listener` UDP input.
pub const DEFAULT_PORT: u16 = 8094;
/// Default bounded channel capacity between callers and the worker.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;
/// Largest UDP payload that fits an IPv4 datagram.
pub const DEFAULT_MAX_DATAGRAM_SIZE: usize = 65_507;

/// Address family of the outbound socket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum SocketFamily {
    #[default]
    #[serde(rename = "udp4", alias = "v4")]
    V4,
    #[serde(rename = "udp6", alias = "v6")]
    V6,
}

/// Everything needed to construct a transporter.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransporterConfig {
    /// Measurement every line is written to.
    #[serde(default)]
    pub measurement_name: String,
    /// Destination host name or IP address.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, alias = "socketType")]
    pub socket_family: SocketFamily,
    /// Minimum level the logging library should forward.
    #[serde(default)]
    pub min_level: Option<LogLevel>,
    /// Attributes sent as tags. Must be given together with `field_keys`.
    #[serde(default)]
    pub tag_keys: Option<Vec<String>>,
    /// Attributes sent as fields. Must be given together with `tag_keys`.
    #[serde(default)]
    pub field_keys: Option<Vec<String>>,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_max_datagram_size")]
    pub max_datagram_size: usize,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

fn default_max_datagram_size() -> usize {
    DEFAULT_MAX_DATAGRAM_SIZE
}

impl TransporterConfig {
    /// Create a configuration for `measurement_name` with every other value
    /// defaulted.
    pub fn new(measurement_name: impl Into<String>) -> Self {
        Self {
            measurement_name: measurement_name.into(),
            address: None,
            port: DEFAULT_PORT,
            socket_family: SocketFamily::default(),
            min_level: None,
            tag_keys: None,
            field_keys: None,
            capacity: DEFAULT_CHANNEL_CAPACITY,
            max_datagram_size: DEFAULT_MAX_DATAGRAM_SIZE,
        }
    }

    /// Destination address, falling back to [`DEFAULT_ADDRESS`].
    pub fn address(&self) -> &str {
        match self.address.as_deref() {
            Some(addr) if !addr.trim().is_empty() => addr,
            _ => DEFAULT_ADDRESS,
        }
    }

    /// Minimum level, falling back to the most verbose level.
    pub fn min_level(&self) -> LogLevel {
        self.min_level.unwrap_or_default()
    }

    /// Check every construction rule and resolve the key partition.
    pub fn validate(&self) -> Result<KeySet, ConfigError> {
        self.validate_measurement()?;
        let keys = KeySet::resolve(self.tag_keys.clone(), self.field_keys.clone())?;
        self.validate_limits()?;
        Ok(keys)
    }

    fn validate_measurement(&self) -> Result<(), ConfigError> {
        let name = self.measurement_name.as_str();
        if name.trim().is_empty() {
            return Err(ConfigError::MissingMeasurementName);
        }
        if name.contains([' ', ',', '\n', '\r']) {
            return Err(ConfigError::InvalidMeasurementName(name.to_owned()));
        }
        Ok(())
    }

    fn validate_limits(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidConfig(
                "capacity must be greater than zero".into(),
            ));
        }
        if self.max_datagram_size == 0 {
            return Err(ConfigError::InvalidConfig(
                "max_datagram_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
