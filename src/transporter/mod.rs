//! UDP transporter for line-protocol records.
//!
//! This module defines [`TelegrafTransporter`], which validates its
//! configuration up front, encodes each [`LogRecord`](crate::log_record::LogRecord)
//! as one line-protocol line and forwards it to a Telegraf-compatible UDP
//! listener. A worker thread owns the socket; callers only encode and enqueue,
//! so logging never waits on the network. Delivery is best effort: nothing is
//! retried, batched or acknowledged.

mod builder;
mod config;
mod error;
mod handler;
mod keys;
mod provider;
mod transport;
mod worker;


pub use builder::TransporterBuilder;
pub use config::{
    DEFAULT_ADDRESS, DEFAULT_CHANNEL_CAPACITY, DEFAULT_MAX_DATAGRAM_SIZE, DEFAULT_PORT,
    SocketFamily, TransporterConfig,
};
pub use error::ConfigError;
pub use handler::{DEFAULT_FLUSH_TIMEOUT, TelegrafTransporter};
pub use keys::{DEFAULT_FIELD_KEYS, DEFAULT_TAG_KEYS, KeySet};
pub use provider::{TransportFn, TransportProvider};
