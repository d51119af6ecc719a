//! RTCP (RTP Control Protocol) receive-side classification
//!
//! This core never emits RTCP itself (no periodic sender reports, no BYE).
//! It only classifies inbound compound RTCP packets well enough to detect
//! Picture Loss Indication (RFC 4585) and otherwise log-and-ignore feedback.

/// RTCP packet types (RFC 3550 / RFC 4585).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcpPacketType {
    /// Sender Report (200)
    SR = 200,
    /// Receiver Report (201)
    RR = 201,
    /// Source Description (202)
    SDES = 202,
    /// Goodbye (203)
    BYE = 203,
    /// Application-defined (204)
    APP = 204,
    /// RTP Feedback, e.g. NACK (205)
    RTPFB = 205,
    /// Payload-specific Feedback, e.g. PLI/FIR/SLI (206)
    PSFB = 206,
    /// Extended Report (207)
    XR = 207,
}

impl RtcpPacketType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            200 => Some(RtcpPacketType::SR),
            201 => Some(RtcpPacketType::RR),
            202 => Some(RtcpPacketType::SDES),
            203 => Some(RtcpPacketType::BYE),
            204 => Some(RtcpPacketType::APP),
            205 => Some(RtcpPacketType::RTPFB),
            206 => Some(RtcpPacketType::PSFB),
            207 => Some(RtcpPacketType::XR),
            _ => None,
        }
    }
}

/// Payload-specific feedback message format (RFC 4585 section 6.3).
const FMT_PLI: u8 = 1;

/// One parsed header of an RTCP packet inside a compound packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcpFeedback {
    pub packet_type: RtcpPacketType,
    pub fmt_or_rc: u8,
}

/// Walks a (possibly compound) RTCP packet and returns the header of each
/// sub-packet found. Stops at the first malformed or unrecognized-type
/// sub-packet rather than erroring, since feedback we don't act on is
/// simply logged and skipped.
pub fn parse_compound(buf: &[u8]) -> Vec<RtcpFeedback> {
    let mut out = Vec::new();
    let mut offset = 0;

    while offset + 4 <= buf.len() {
        let fmt_or_rc = buf[offset] & 0x1F;
        let pt = match RtcpPacketType::from_u8(buf[offset + 1]) {
            Some(pt) => pt,
            None => break,
        };
        let length_words = u16::from_be_bytes([buf[offset + 2], buf[offset + 3]]) as usize;
        let packet_len = (length_words + 1) * 4;

        out.push(RtcpFeedback { packet_type: pt, fmt_or_rc });

        if offset + packet_len > buf.len() || packet_len == 0 {
            break;
        }
        offset += packet_len;
    }

    out
}

/// True if any sub-packet in this compound RTCP packet is a Picture Loss
/// Indication (PSFB, FMT=1).
pub fn contains_pli(buf: &[u8]) -> bool {
    parse_compound(buf)
        .iter()
        .any(|fb| fb.packet_type == RtcpPacketType::PSFB && fb.fmt_or_rc == FMT_PLI)
}
