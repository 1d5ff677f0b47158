//! Loopback UDP listener standing in for Telegraf's `socket_listener` input.
//! Tests point a transporter at it and read back the datagrams it sends.

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use femtologging_telegraf::{SocketFamily, TelegrafTransporter, TransporterBuilder};
use rstest::fixture;

/// A bound listener with a read timeout so a lost datagram fails the test
/// instead of hanging it.
pub struct UdpListener {
    socket: UdpSocket,
}

impl UdpListener {
    pub fn addr(&self) -> SocketAddr {
        self.socket.local_addr().expect("listener has a local address")
    }

    /// Builder already pointed at this listener.
    pub fn builder(&self, measurement: &str) -> TransporterBuilder {
        let addr = self.addr();
        TelegrafTransporter::builder(measurement)
            .with_address(addr.ip().to_string())
            .with_port(addr.port())
            .with_socket_family(SocketFamily::V4)
    }

    /// Receive one datagram as text.
    pub fn recv_line(&self) -> String {
        let mut buf = vec![0u8; 65_535];
        let (len, _) = self.socket.recv_from(&mut buf).expect("datagram received");
        buf.truncate(len);
        String::from_utf8(buf).expect("datagram is utf-8")
    }

    /// Receive `count` datagrams.
    pub fn recv_lines(&self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.recv_line()).collect()
    }

    /// Return `true` if nothing arrives within `wait`.
    pub fn is_quiet_for(&self, wait: Duration) -> bool {
        self.socket
            .set_read_timeout(Some(wait))
            .expect("set read timeout");
        let mut buf = [0u8; 1];
        self.socket.recv_from(&mut buf).is_err()
    }
}

/// Return a listener bound to an ephemeral loopback port.
#[fixture]
pub fn udp_listener(#[default(Duration::from_secs(2))] timeout: Duration) -> UdpListener {
    let socket = UdpSocket::bind(("127.0.0.1", 0)).expect("bind loopback listener");
    socket
        .set_read_timeout(Some(timeout))
        .expect("set read timeout");
    UdpListener { socket }
}
