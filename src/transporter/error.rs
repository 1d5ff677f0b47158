//! Construction-time errors.

use std::io;

use thiserror::Error;

/// Errors raised while validating a transporter configuration.
///
/// These are fatal to construction: no transporter exists afterwards.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a measurement name must be provided")]
    MissingMeasurementName,
    #[error("measurement name {0:?} must not contain spaces, commas or line breaks")]
    InvalidMeasurementName(String),
    /// Tag keys were supplied on their own.
    #[error("tag keys were provided without field keys; provide both or neither")]
    MissingFieldKeys,
    /// Field keys were supplied on their own.
    #[error("field keys were provided without tag keys; provide both or neither")]
    MissingTagKeys,
    #[error("keys cannot be both tags and fields (duplicated: {0})")]
    DuplicateKey(String),
    #[error("invalid transporter configuration: {0}")]
    InvalidConfig(String),
    /// The outbound socket could not be opened.
    #[error("failed to open UDP socket: {0}")]
    Socket(#[from] io::Error),
}
