//! SRTP-secured UDP transport: the send-path encryption hook and the
//! inbound-datagram classifier used to demultiplex STUN/DTLS/RTP/RTCP.

use crate::error::{NetworkError, Result};
use crate::security::{SrtpContext, SrtpKeys};
use crate::transport::udp::UdpTransport;
use logging::Logger;

/// H.264 STAP-A aggregate NAL unit type (RFC 6184 table 1).
const STAP_A_TYPE: u8 = 24;

/// Classification of an inbound datagram, per RFC 7983's byte-range rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    Stun,
    Dtls,
    Rtp,
    Rtcp,
    Unknown,
}

/// Classifies one inbound UDP datagram so the session's receive dispatch
/// can route it to the right handler.
pub fn classify_packet(buf: &[u8]) -> PacketType {
    if buf.is_empty() {
        return PacketType::Unknown;
    }

    match buf[0] {
        0..=1 => PacketType::Stun,
        20..=63 => PacketType::Dtls,
        128..=191 => {
            if buf.len() >= 2 && (192..=223).contains(&buf[1]) {
                PacketType::Rtcp
            } else {
                PacketType::Rtp
            }
        }
        _ => PacketType::Unknown,
    }
}

/// Which packetizer produced an outbound plaintext packet. Only meaningful
/// for the RTP case; RTCP packets are routed by `classify_packet` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// UDP transport wrapping per-direction SRTP contexts.
///
/// Four contexts exist because the send side keeps audio, video, and RTCP
/// streams in separate rollover/replay state even though all three derive
/// from the same send key (see role-asymmetry design note: this host is
/// always the DTLS server, so "send" is always the server half of the
/// exported keying material).
pub struct SecureUdpTransport {
    udp: UdpTransport,
    audio_send: SrtpContext,
    video_send: SrtpContext,
    rtcp_send: SrtpContext,
    recv: SrtpContext,
    logger: Logger,
}

impl SecureUdpTransport {
    pub fn new(udp: UdpTransport, keys: &SrtpKeys, logger: Logger) -> Self {
        SecureUdpTransport {
            audio_send: SrtpContext::new(keys.local_master_key, keys.local_master_salt),
            video_send: SrtpContext::new(keys.local_master_key, keys.local_master_salt),
            rtcp_send: SrtpContext::new(keys.local_master_key, keys.local_master_salt),
            recv: SrtpContext::new(keys.remote_master_key, keys.remote_master_salt),
            udp,
            logger,
        }
    }

    /// Encrypts and sends one plaintext RTP/RTCP packet emitted by a
    /// packetizer, applying the STAP-A marker/NRI defensive fix-up first.
    pub fn send_packet(&mut self, kind: MediaKind, mut buf: Vec<u8>) -> Result<usize> {
        if buf.len() < 12 || (buf[0] & 0xC0) != 0x80 {
            return Err(NetworkError::InvalidPacket(
                "outbound packet is not RTP/RTCP version 2".to_string(),
            ));
        }

        let is_rtcp = buf.len() >= 2 && (192..=223).contains(&buf[1]);

        if !is_rtcp && kind == MediaKind::Video {
            fix_up_stap_a(&mut buf);
        }

        let context = if is_rtcp {
            &mut self.rtcp_send
        } else {
            match kind {
                MediaKind::Audio => &mut self.audio_send,
                MediaKind::Video => &mut self.video_send,
            }
        };

        let plaintext_len = buf.len();
        let encrypted = context.protect_bytes(&buf)?;
        if encrypted.len() < plaintext_len {
            return Err(NetworkError::CryptoError(
                "SRTP ciphertext shorter than plaintext".to_string(),
            ));
        }

        self.udp.send(&encrypted)
    }

    /// Decrypts an inbound SRTP/SRTCP datagram already classified as
    /// `Rtp`/`Rtcp` by [`classify_packet`].
    pub fn unprotect(&mut self, srtp_bytes: &[u8]) -> Result<crate::codec::rtp::RtpPacket> {
        self.recv.unprotect(srtp_bytes)
    }

    /// Decrypts an inbound SRTCP datagram to its raw plaintext bytes,
    /// suitable for [`crate::codec::rtcp::parse_compound`].
    pub fn unprotect_rtcp_bytes(&mut self, srtcp_bytes: &[u8]) -> Result<Vec<u8>> {
        self.recv.unprotect_bytes(srtcp_bytes)
    }

    /// Non-blocking poll of the underlying socket.
    pub fn receive(&mut self) -> Result<Option<(Vec<u8>, std::net::SocketAddr)>> {
        self.udp.receive()
    }

    pub fn udp_mut(&mut self) -> &mut UdpTransport {
        &mut self.udp
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

/// Clears the marker bit on any outbound STAP-A packet, and if the
/// aggregate NAL header's NRI bits disagree with the first aggregated
/// NAL's NRI, rewrites byte 12 to match byte 15 (preserving F and type).
fn fix_up_stap_a(buf: &mut [u8]) {
    if buf.len() <= 15 || (buf[12] & 0x1F) != STAP_A_TYPE {
        return;
    }

    buf[1] &= 0x7F;

    if (buf[15] & 0x60) != (buf[12] & 0x60) {
        buf[12] = (buf[12] & 0x9F) | (buf[15] & 0x60);
    }
}
