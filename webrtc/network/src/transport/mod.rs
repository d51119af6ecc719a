//! Transport module - UDP sockets, plain and SRTP-secured

pub mod secure;
pub mod udp;

pub use secure::{MediaKind, PacketType, SecureUdpTransport, classify_packet};
pub use udp::UdpTransport;
