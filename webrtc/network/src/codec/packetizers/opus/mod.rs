//! Opus RTP packetization module

mod packetizer;

pub use packetizer::OpusRtpPacketizer;
