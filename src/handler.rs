use thiserror::Error;

use crate::log_record::LogRecord;

/// Reasons a record could not be queued for delivery.
///
/// These describe the local queue only. Whether a datagram reaches the
/// collector is never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The bounded queue was full and the record was dropped.
    #[error("queue full")]
    QueueFull,
    /// The worker has shut down.
    #[error("handler closed")]
    Closed,
}

/// Trait implemented by record sinks.
///
/// Implementations are `Send + Sync` so they can be invoked from multiple
/// threads, and must not block the caller on network I/O.
pub trait RecordHandler: Send + Sync {
    /// Dispatch a log record for delivery.
    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError>;

    /// Wait for records queued so far to be handed to the OS.
    ///
    /// Returns `true` when the handler confirmed the flush.
    fn flush(&self) -> bool {
        true
    }
}
