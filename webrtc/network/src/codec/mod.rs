//! Codec module - RTP/RTCP and packetizers

pub mod extradata;
pub mod packetizers;
pub mod rtcp;
pub mod rtp;

pub use extradata::{H264Extradata, parse_extradata};
pub use packetizers::h264::H264RtpPacketizer;
pub use packetizers::opus::OpusRtpPacketizer;
pub use rtcp::{RtcpFeedback, RtcpPacketType, contains_pli};
pub use rtp::RtpPacket;
