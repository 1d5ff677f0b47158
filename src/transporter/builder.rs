//! Builder for [`TelegrafTransporter`](super::TelegrafTransporter).
//!
//! Mirrors the fields of [`TransporterConfig`]; unset values fall back to the
//! config defaults when the transporter is built.

use crate::level::LogLevel;

use super::{
    ConfigError, TelegrafTransporter,
    config::{
        DEFAULT_CHANNEL_CAPACITY, DEFAULT_MAX_DATAGRAM_SIZE, DEFAULT_PORT, SocketFamily,
        TransporterConfig,
    },
};

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`TelegrafTransporter`] instances.
#[derive(Clone, Debug, Default)]
pub struct TransporterBuilder {
    measurement_name: Option<String>,
    address: Option<String>,
    port: Option<u16>,
    socket_family: Option<SocketFamily>,
    min_level: Option<LogLevel>,
    tag_keys: Option<Vec<String>>,
    field_keys: Option<Vec<String>>,
    capacity: Option<usize>,
    max_datagram_size: Option<usize>,
}

impl TransporterBuilder {
    /// Create a new builder with nothing configured.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measurement_name(mut self, name: impl Into<String>) -> Self {
        self.measurement_name = Some(name.into());
        self
    }

    /// Set the destination host name or IP address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Attributes to send as tags. Requires [`with_field_keys`](Self::with_field_keys).
    pub fn with_tag_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Attributes to send as fields. Requires [`with_tag_keys`](Self::with_tag_keys).
    pub fn with_field_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    option_setter!(
        #[doc = "Set the destination port."]
        with_port,
        port,
        u16
    );
    option_setter!(
        #[doc = "Choose between IPv4 and IPv6 sockets."]
        with_socket_family,
        socket_family,
        SocketFamily
    );
    option_setter!(
        #[doc = "Set the minimum level reported by the transport provider."]
        with_min_level,
        min_level,
        LogLevel
    );
    option_setter!(
        #[doc = "Set the bounded channel capacity."]
        with_capacity,
        capacity,
        usize
    );
    option_setter!(with_max_datagram_size, max_datagram_size, usize);

    /// Produce the configuration without validating it.
    pub fn into_config(self) -> TransporterConfig {
        TransporterConfig {
            measurement_name: self.measurement_name.unwrap_or_default(),
            address: self.address,
            port: self.port.unwrap_or(DEFAULT_PORT),
            socket_family: self.socket_family.unwrap_or_default(),
            min_level: self.min_level,
            tag_keys: self.tag_keys,
            field_keys: self.field_keys,
            capacity: self.capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY),
            max_datagram_size: self.max_datagram_size.unwrap_or(DEFAULT_MAX_DATAGRAM_SIZE),
        }
    }

    /// Validate the configuration and construct the transporter.
    pub fn build(&self) -> Result<TelegrafTransporter, ConfigError> {
        TelegrafTransporter::new(self.clone().into_config())
    }
}
