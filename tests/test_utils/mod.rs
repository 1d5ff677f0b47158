pub mod fixtures;

pub use fixtures::{UdpListener, udp_listener};
