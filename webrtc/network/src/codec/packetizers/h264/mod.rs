//! H.264 RTP Packetization (RFC 6184)
//!
//! This module implements RTP packetization and depacketization for H.264 video
//! according to RFC 6184 specification.

mod packetizer;

pub use packetizer::H264RtpPacketizer;
