//! Fixed-template SDP offer construction and tolerant SDP answer parsing
//! for the WHIP ingestion handshake.
//!
//! Unlike the generic [`SessionDescriptionBuilder`](crate::SessionDescriptionBuilder),
//! this module emits one exact, byte-deterministic template per RFC 8830/8840
//! conventions used by WHIP publishers — there is no negotiation surface to
//! model generically here.

use crate::errors::SdpError;

/// Audio leg parameters for the offer template.
#[derive(Debug, Clone)]
pub struct AudioOfferParams {
    pub payload_type: u8,
    pub ssrc: u32,
    pub sample_rate: u32,
    pub channels: u8,
}

/// Video leg parameters for the offer template.
#[derive(Debug, Clone)]
pub struct VideoOfferParams {
    pub payload_type: u8,
    pub ssrc: u32,
    /// Parsed SPS bytes, used to fill in `profile-level-id`. `None` falls
    /// back to profile 0x42, constraint 0x00, level 30 as specified.
    pub sps: Option<Vec<u8>>,
}

/// Everything needed to render the offer's local identity section.
#[derive(Debug, Clone)]
pub struct OfferIdentity<'a> {
    pub ice_ufrag: &'a str,
    pub ice_pwd: &'a str,
    pub fingerprint: &'a str,
}

/// Parsed fields extracted from a WHIP answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerInfo {
    pub ice_ufrag: String,
    pub ice_pwd: String,
    pub candidate_host: String,
    pub candidate_port: u16,
}

fn profile_level_id(sps: Option<&[u8]>) -> String {
    let (profile, constraint, level) = match sps {
        Some(s) if s.len() >= 4 => (s[1], s[2], s[3]),
        _ => (0x42u8, 0x00u8, 30u8),
    };
    format!("{:02x}{:02x}{:02x}", profile, constraint, level)
}

/// Builds the WHIP SDP offer from local session parameters.
///
/// Produces the tight, fixed template a WHIP peer expects: a single
/// `o=`/`s=`/`t=` preamble, `a=group:BUNDLE` over whichever mids are
/// present, then one `m=audio` and/or `m=video` section.
pub fn build_offer(
    identity: &OfferIdentity,
    audio: Option<&AudioOfferParams>,
    video: Option<&VideoOfferParams>,
) -> String {
    let mut mids = Vec::new();
    if audio.is_some() {
        mids.push("0");
    }
    if video.is_some() {
        mids.push("1");
    }

    let mut sdp = String::new();
    sdp.push_str("v=0\r\n");
    sdp.push_str("o=- 0 0 IN IP4 127.0.0.1\r\n");
    sdp.push_str("s=-\r\n");
    sdp.push_str("t=0 0\r\n");
    sdp.push_str(&format!("a=group:BUNDLE {}\r\n", mids.join(" ")));
    sdp.push_str("a=msid-semantic: WMS\r\n");

    if let Some(a) = audio {
        sdp.push_str(&format!(
            "m=audio 9 UDP/TLS/RTP/SAVPF {}\r\n",
            a.payload_type
        ));
        sdp.push_str("c=IN IP4 0.0.0.0\r\n");
        sdp.push_str(&format!("a=ice-ufrag:{}\r\n", identity.ice_ufrag));
        sdp.push_str(&format!("a=ice-pwd:{}\r\n", identity.ice_pwd));
        sdp.push_str(&format!("a=fingerprint:sha-256 {}\r\n", identity.fingerprint));
        sdp.push_str("a=setup:passive\r\n");
        sdp.push_str("a=mid:0\r\n");
        sdp.push_str("a=sendonly\r\n");
        sdp.push_str("a=rtcp-mux\r\n");
        sdp.push_str(&format!(
            "a=rtpmap:{} opus/{}/{}\r\n",
            a.payload_type, a.sample_rate, a.channels
        ));
        sdp.push_str(&format!("a=ssrc:{} cname:FFmpeg\r\n", a.ssrc));
        sdp.push_str(&format!("a=ssrc:{} msid:FFmpeg audio\r\n", a.ssrc));
    }

    if let Some(v) = video {
        sdp.push_str(&format!(
            "m=video 9 UDP/TLS/RTP/SAVPF {}\r\n",
            v.payload_type
        ));
        sdp.push_str("c=IN IP4 0.0.0.0\r\n");
        sdp.push_str(&format!("a=ice-ufrag:{}\r\n", identity.ice_ufrag));
        sdp.push_str(&format!("a=ice-pwd:{}\r\n", identity.ice_pwd));
        sdp.push_str(&format!("a=fingerprint:sha-256 {}\r\n", identity.fingerprint));
        sdp.push_str("a=setup:passive\r\n");
        sdp.push_str("a=mid:1\r\n");
        sdp.push_str("a=sendonly\r\n");
        sdp.push_str("a=rtcp-mux\r\n");
        sdp.push_str("a=rtcp-rsize\r\n");
        sdp.push_str(&format!("a=rtpmap:{} H264/90000\r\n", v.payload_type));
        sdp.push_str(&format!(
            "a=fmtp:{} level-asymmetry-allowed=1;packetization-mode=1;profile-level-id={}\r\n",
            v.payload_type,
            profile_level_id(v.sps.as_deref())
        ));
        sdp.push_str(&format!("a=ssrc:{} cname:FFmpeg\r\n", v.ssrc));
        sdp.push_str(&format!("a=ssrc:{} msid:FFmpeg video\r\n", v.ssrc));
    }

    sdp
}

/// Parses a WHIP answer, extracting exactly the three fields this ICE-Lite
/// implementation needs: the first `a=ice-ufrag:`, the first `a=ice-pwd:`,
/// and the first `a=candidate:` line naming a UDP host candidate.
pub fn parse_answer(answer: &str) -> Result<AnswerInfo, SdpError> {
    let mut ice_ufrag = None;
    let mut ice_pwd = None;
    let mut candidate = None;

    for line in answer.lines() {
        let line = line.trim_end_matches('\r');

        if ice_ufrag.is_none() {
            if let Some(rest) = line.strip_prefix("a=ice-ufrag:") {
                ice_ufrag = Some(rest.to_string());
                continue;
            }
        }
        if ice_pwd.is_none() {
            if let Some(rest) = line.strip_prefix("a=ice-pwd:") {
                ice_pwd = Some(rest.to_string());
                continue;
            }
        }
        if candidate.is_none() {
            if let Some(rest) = line.strip_prefix("a=candidate:") {
                if rest.contains(" udp ") && rest.contains(" typ host") {
                    candidate = Some(rest.to_string());
                }
            }
        }
    }

    let ice_ufrag = ice_ufrag.ok_or(SdpError::MissingIceCredentials)?;
    let ice_pwd = ice_pwd.ok_or(SdpError::MissingIceCredentials)?;
    let candidate = candidate.ok_or(SdpError::MissingHostCandidate)?;

    let parts: Vec<&str> = candidate.split_whitespace().collect();
    // foundation component protocol priority host port typ host
    if parts.len() < 8 {
        return Err(SdpError::MissingHostCandidate);
    }
    let protocol = parts[2];
    if !protocol.eq_ignore_ascii_case("udp") {
        return Err(SdpError::UnsupportedTransportProtocol(protocol.to_string()));
    }
    let host = parts[4].to_string();
    let port: u16 = parts[5]
        .parse()
        .map_err(|_| SdpError::MissingHostCandidate)?;

    Ok(AnswerInfo {
        ice_ufrag,
        ice_pwd,
        candidate_host: host,
        candidate_port: port,
    })
}
