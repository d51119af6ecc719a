//! Network Module - RTP/RTCP codecs, DTLS-SRTP security, and UDP transport
//!
//! Handles RTP packetization and the secure UDP transport used to carry it.

pub mod codec;
pub mod security;
pub mod transport;

pub mod error;
pub mod traits;

pub use codec::{
    H264Extradata, H264RtpPacketizer, OpusRtpPacketizer, RtcpPacketType, RtpPacket, contains_pli,
    parse_extradata,
};
pub use error::NetworkError;
pub use security::{DtlsContext, DtlsEngine, SrtpContext, SrtpKeys};
pub use traits::RtpPacketizer;
pub use transport::{MediaKind, PacketType, SecureUdpTransport, UdpTransport, classify_packet};

pub type Result<T> = std::result::Result<T, NetworkError>;
