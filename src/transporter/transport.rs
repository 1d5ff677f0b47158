//! UDP socket primitives used by the worker.

use std::{
    fmt, io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket},
};

use super::config::SocketFamily;

impl SocketFamily {
    fn unspecified(self) -> SocketAddr {
        match self {
            SocketFamily::V4 => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketFamily::V6 => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        }
    }

    fn accepts(self, addr: &SocketAddr) -> bool {
        match self {
            SocketFamily::V4 => addr.is_ipv4(),
            SocketFamily::V6 => addr.is_ipv6(),
        }
    }
}

impl fmt::Display for SocketFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SocketFamily::V4 => "udp4",
            SocketFamily::V6 => "udp6",
        })
    }
}

/// Open the outbound socket on an ephemeral local port.
///
/// The socket is non-blocking: a send that would block fails with
/// `WouldBlock` and the datagram is dropped.
pub fn bind_socket(family: SocketFamily) -> io::Result<UdpSocket> {
    let socket = UdpSocket::bind(family.unspecified())?;
    socket.set_nonblocking(true)?;
    Ok(socket)
}

/// Destination host and port, resolved on first use.
#[derive(Clone, Debug)]
pub struct Destination {
    host: String,
    port: u16,
    family: SocketFamily,
    resolved: Option<SocketAddr>,
}

impl Destination {
    pub fn new(host: impl Into<String>, port: u16, family: SocketFamily) -> Self {
        Self {
            host: host.into(),
            port,
            family,
            resolved: None,
        }
    }

    /// Return the first address of the configured family.
    ///
    /// A successful lookup is cached; a failed one is retried on the next
    /// call.
    pub fn resolve(&mut self) -> io::Result<SocketAddr> {
        if let Some(addr) = self.resolved {
            return Ok(addr);
        }
        let family = self.family;
        let addr = (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .find(|addr| family.accepts(addr))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no {family} address for {}:{}", self.host, self.port),
                )
            })?;
        self.resolved = Some(addr);
        Ok(addr)
    }
}

/// Send `payload` as a single datagram.
pub fn send_datagram(
    socket: &UdpSocket,
    addr: SocketAddr,
    payload: &[u8],
    max_size: usize,
) -> io::Result<()> {
    if payload.len() > max_size {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("datagram of {} bytes exceeds {max_size}", payload.len()),
        ));
    }
    let sent = socket.send_to(payload, addr)?;
    if sent != payload.len() {
        return Err(io::Error::new(
            io::ErrorKind::WriteZero,
            format!("sent {sent} of {} bytes", payload.len()),
        ));
    }
    Ok(())
}
