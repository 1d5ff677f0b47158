//! Public transporter type exported by the crate.

use std::{fmt, sync::Arc, thread, time::Duration};

use log::warn;
use parking_lot::Mutex;

use crate::{
    handler::{HandlerError, RecordHandler},
    level::LogLevel,
    line_protocol::LineEncoder,
    log_record::LogRecord,
    rate_limited_warner::RateLimitedWarner,
};

use super::{
    ConfigError, KeySet, TransportProvider, TransporterBuilder,
    config::TransporterConfig,
    transport::{Destination, bind_socket},
    worker::{UdpCommand, WorkerState, enqueue_datagram, flush_queue, request_shutdown, spawn_worker},
};

/// How long `flush` and shutdown wait for the worker to acknowledge.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

struct Shared {
    encoder: LineEncoder,
    min_level: LogLevel,
    tx: crossbeam_channel::Sender<UdpCommand>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    warner: RateLimitedWarner,
}

impl Shared {
    fn enqueue(&self, record: &LogRecord) -> Result<(), HandlerError> {
        let line = self.encoder.encode(record);
        enqueue_datagram(&self.tx, line.into_bytes(), &self.warner)
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.warner.flush(|count| {
            warn!("TelegrafTransporter dropped {count} records before shutdown");
        });
        if !request_shutdown(&self.tx, DEFAULT_FLUSH_TIMEOUT) {
            warn!("TelegrafTransporter: worker did not acknowledge shutdown; detaching");
            return;
        }
        let Some(handle) = self.handle.lock().take() else {
            return;
        };
        if handle.join().is_err() {
            warn!("TelegrafTransporter: worker thread panicked");
        }
    }
}

/// Encodes records as line protocol and sends each one as a UDP datagram.
///
/// Construction validates the configuration and opens the socket; a
/// transporter that exists is ready to send. Encoding happens on the calling
/// thread, transmission on a dedicated worker, so [`send`](Self::send) never
/// waits on the network. Clones share the same socket and worker.
#[derive(Clone)]
pub struct TelegrafTransporter {
    inner: Arc<Shared>,
}

impl TelegrafTransporter {
    /// Validate `config`, open the socket and start the worker.
    pub fn new(config: TransporterConfig) -> Result<Self, ConfigError> {
        let keys = config.validate()?;
        let socket = bind_socket(config.socket_family)?;
        let destination = Destination::new(config.address(), config.port, config.socket_family);
        let state = WorkerState {
            socket,
            destination,
            max_datagram_size: config.max_datagram_size,
        };
        let (tx, handle) = spawn_worker(state, config.capacity)?;
        Ok(Self {
            inner: Arc::new(Shared {
                encoder: LineEncoder::new(config.measurement_name, keys),
                min_level: config.min_level.unwrap_or_default(),
                tx,
                handle: Mutex::new(Some(handle)),
                warner: RateLimitedWarner::default(),
            }),
        })
    }

    /// Start a builder for `measurement_name`.
    pub fn builder(measurement_name: impl Into<String>) -> TransporterBuilder {
        TransporterBuilder::new().with_measurement_name(measurement_name)
    }

    pub fn measurement(&self) -> &str {
        self.inner.encoder.measurement()
    }

    pub fn keys(&self) -> &KeySet {
        self.inner.encoder.keys()
    }

    pub fn min_level(&self) -> LogLevel {
        self.inner.min_level
    }

    /// Encode `record` without sending it.
    pub fn encode(&self, record: &LogRecord) -> String {
        self.inner.encoder.encode(record)
    }

    /// Encode `record` and queue it for a single best-effort datagram.
    ///
    /// Failures are logged (rate limited) and otherwise ignored.
    pub fn send(&self, record: &LogRecord) {
        let _ = self.inner.enqueue(record);
    }

    /// Build the provider the logging library registers as a transport.
    ///
    /// The provider keeps the transporter alive for as long as it exists.
    pub fn transport_provider(&self) -> TransportProvider {
        let inner = Arc::clone(&self.inner);
        TransportProvider::new(
            self.inner.min_level,
            Arc::new(move |record: &LogRecord| {
                let _ = inner.enqueue(record);
            }),
        )
    }

    /// Wait until the worker has handed every queued datagram to the OS.
    pub fn flush(&self) -> bool {
        self.inner.warner.flush(|count| {
            warn!("TelegrafTransporter dropped {count} records in the last interval");
        });
        flush_queue(&self.inner.tx, DEFAULT_FLUSH_TIMEOUT)
    }
}

impl RecordHandler for TelegrafTransporter {
    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError> {
        self.inner.enqueue(record)
    }

    fn flush(&self) -> bool {
        TelegrafTransporter::flush(self)
    }
}

impl fmt::Debug for TelegrafTransporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegrafTransporter")
            .field("measurement", &self.measurement())
            .field("min_level", &self.min_level())
            .field("keys", self.keys())
            .finish()
    }
}
