//! Shared packetizer trait implemented by each codec's RTP packetizer.

use crate::codec::rtp::RtpPacket;

/// Turns an encoded media frame into one or more RTP packets.
pub trait RtpPacketizer {
    /// Packetizes a single encoded frame, advancing the packetizer's
    /// internal sequence number and timestamp state.
    fn packetize(&mut self, data: &[u8]) -> Vec<RtpPacket>;

    fn get_payload_type(&self) -> u8;
    fn get_ssrc(&self) -> u32;
    fn get_timestamp(&self) -> u32;
    fn get_sequence_number(&self) -> u16;
}
