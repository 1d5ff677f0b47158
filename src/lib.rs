//! Line-protocol transport for structured log records.
//!
//! Records are flattened, split into tags and fields by attribute name,
//! encoded as a single line-protocol line and sent to a Telegraf-compatible
//! UDP listener on a background worker. The crate also ships bridges from the
//! `log` and `tracing` ecosystems.
//!
//! ```no_run
//! use femtologging_telegraf::{LogLevel, RecordMetadata, TelegrafTransporter};
//!
//! let transporter = TelegrafTransporter::builder("myLogs")
//!     .with_address("localhost")
//!     .with_port(8094)
//!     .build()?;
//! let record = RecordMetadata::new(LogLevel::Info).with_argument("started");
//! transporter.send(&record.into());
//! # Ok::<(), femtologging_telegraf::ConfigError>(())
//! ```

pub mod flatten;
pub mod handler;
pub mod level;
pub mod line_protocol;
pub mod log_record;
pub mod rate_limited_warner;
pub mod transporter;
pub mod value;

#[cfg(feature = "log-compat")]
pub mod log_compat;
#[cfg(feature = "tracing-compat")]
pub mod tracing_compat;

pub use flatten::{Leaf, flatten, flatten_value};
pub use handler::{HandlerError, RecordHandler};
pub use level::{LevelParseError, LogLevel};
pub use line_protocol::{LineEncoder, UNKNOWN, encode};
pub use log_record::{LogRecord, RecordMetadata};
pub use transporter::{
    ConfigError, DEFAULT_FIELD_KEYS, DEFAULT_PORT, DEFAULT_TAG_KEYS, KeySet, SocketFamily,
    TelegrafTransporter, TransportFn, TransportProvider, TransporterBuilder, TransporterConfig,
};
pub use value::RecordValue;

#[cfg(feature = "log-compat")]
pub use log_compat::{TransportLogAdapter, install_log_bridge};
#[cfg(feature = "tracing-compat")]
pub use tracing_compat::TransportLayer;

/// Return `true` for targets emitted by this crate's own diagnostics.
///
/// The bridges skip these so a failing send cannot feed itself.
#[cfg(any(feature = "log-compat", feature = "tracing-compat"))]
pub(crate) fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(env!("CARGO_CRATE_NAME"))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}
