//! Transport provider handed to the logging library.

use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::{level::LogLevel, log_record::LogRecord};

/// Callback invoked once per record. Its outcome is never reported back.
pub type TransportFn = Arc<dyn Fn(&LogRecord) + Send + Sync>;

/// Minimum level plus one callback per level.
///
/// Every level maps to the same callback. The provider does not filter by
/// `min_level` itself; the logging library consults it before dispatching.
#[derive(Clone)]
pub struct TransportProvider {
    pub min_level: LogLevel,
    pub transport_logger: BTreeMap<LogLevel, TransportFn>,
}

impl TransportProvider {
    /// Register `callback` for every level.
    pub fn new(min_level: LogLevel, callback: TransportFn) -> Self {
        let transport_logger = LogLevel::ALL
            .iter()
            .map(|level| (*level, Arc::clone(&callback)))
            .collect();
        Self {
            min_level,
            transport_logger,
        }
    }

    pub fn callback(&self, level: LogLevel) -> Option<&TransportFn> {
        self.transport_logger.get(&level)
    }

    /// Levels with a registered callback, most verbose first.
    pub fn levels(&self) -> impl Iterator<Item = LogLevel> + '_ {
        self.transport_logger.keys().copied()
    }

    /// Return `true` if `level` meets the minimum level.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Invoke the callback registered for `level`.
    pub fn dispatch(&self, level: LogLevel, record: &LogRecord) {
        if let Some(callback) = self.callback(level) {
            callback(record);
        }
    }
}

impl fmt::Debug for TransportProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportProvider")
            .field("min_level", &self.min_level)
            .field("levels", &self.levels().collect::<Vec<_>>())
            .finish()
    }
}
