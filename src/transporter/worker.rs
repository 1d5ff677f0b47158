//! Worker thread driving UDP sends.

use std::{io, net::UdpSocket, thread, time::Duration};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use log::warn;

use crate::{handler::HandlerError, rate_limited_warner::RateLimitedWarner};

use super::transport::{Destination, send_datagram};

/// Commands processed by the worker thread.
#[derive(Debug)]
pub enum UdpCommand {
    Datagram(Vec<u8>),
    Flush(Sender<()>),
    Shutdown(Sender<()>),
}

/// Everything the worker owns for its lifetime.
pub struct WorkerState {
    pub socket: UdpSocket,
    pub destination: Destination,
    pub max_datagram_size: usize,
}

pub fn spawn_worker(
    state: WorkerState,
    capacity: usize,
) -> io::Result<(Sender<UdpCommand>, thread::JoinHandle<()>)> {
    let (tx, rx) = bounded(capacity);
    let handle = thread::Builder::new()
        .name("femtologging-telegraf".into())
        .spawn(move || worker_loop(rx, state))?;
    Ok((tx, handle))
}

fn worker_loop(rx: Receiver<UdpCommand>, mut state: WorkerState) {
    let warner = RateLimitedWarner::default();
    while let Ok(cmd) = rx.recv() {
        match cmd {
            UdpCommand::Datagram(payload) => {
                if let Err(err) = deliver(&mut state, &payload) {
                    warner.record_drop();
                    warner.warn_if_due(|count| {
                        warn!("TelegrafTransporter dropped {count} datagrams: {err}");
                    });
                }
            }
            UdpCommand::Flush(ack) => {
                report_drops(&warner);
                let _ = ack.send(());
            }
            UdpCommand::Shutdown(ack) => {
                report_drops(&warner);
                let _ = ack.send(());
                break;
            }
        }
    }
}

fn deliver(state: &mut WorkerState, payload: &[u8]) -> io::Result<()> {
    let addr = state.destination.resolve()?;
    send_datagram(&state.socket, addr, payload, state.max_datagram_size)
}

fn report_drops(warner: &RateLimitedWarner) {
    warner.flush(|count| {
        warn!("TelegrafTransporter dropped {count} datagrams since the last report");
    });
}

/// Queue a datagram without blocking.
pub fn enqueue_datagram(
    tx: &Sender<UdpCommand>,
    payload: Vec<u8>,
    warner: &RateLimitedWarner,
) -> Result<(), HandlerError> {
    match tx.try_send(UdpCommand::Datagram(payload)) {
        Ok(()) => Ok(()),
        Err(TrySendError::Full(_)) => {
            warner.record_drop();
            warner.warn_if_due(|count| {
                warn!("TelegrafTransporter queue full; dropped {count} records");
            });
            Err(HandlerError::QueueFull)
        }
        Err(TrySendError::Disconnected(_)) => {
            warner.record_drop();
            warner.warn_if_due(|count| {
                warn!("TelegrafTransporter worker stopped; dropped {count} records");
            });
            Err(HandlerError::Closed)
        }
    }
}

/// Wait until the worker has processed everything queued before the call.
pub fn flush_queue(tx: &Sender<UdpCommand>, timeout: Duration) -> bool {
    let (ack_tx, ack_rx) = bounded(1);
    if tx.send_timeout(UdpCommand::Flush(ack_tx), timeout).is_err() {
        return false;
    }
    ack_rx.recv_timeout(timeout).is_ok()
}

/// Ask the worker to stop; returns `true` once it acknowledged.
pub fn request_shutdown(tx: &Sender<UdpCommand>, timeout: Duration) -> bool {
    let (ack_tx, ack_rx) = bounded(1);
    if tx.send_timeout(UdpCommand::Shutdown(ack_tx), timeout).is_err() {
        return false;
    }
    ack_rx.recv_timeout(timeout).is_ok()
}
