//! The WHIP publish session: codec validation, the signaling exchange, the
//! ICE-Lite/DTLS-SRTP handshake, and steady-state media writes.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use rand::Rng;

use logging::Logger;
use network::{
    DtlsContext, DtlsEngine, H264RtpPacketizer, MediaKind, OpusRtpPacketizer, PacketType,
    RtpPacketizer, SecureUdpTransport, UdpTransport, classify_packet, contains_pli,
};
use sdp::whip::{AnswerInfo, AudioOfferParams, OfferIdentity, VideoOfferParams};
use stun::StunClass;

use crate::codec_params::{AudioParams, VideoParams, parse_audio_params, parse_video_params};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionErrorKind};
use crate::http_client::HttpClient;
use crate::signaler::WhipSignaler;

/// Reads up to this many datagrams per handshake-loop iteration, sleeping
/// between empty reads, before re-checking the overall deadline.
const HANDSHAKE_POLL_READS: usize = 10;
const HANDSHAKE_POLL_SLEEP: Duration = Duration::from_millis(5);
const VIDEO_CLOCK_RATE_FPS: f64 = 30.0;
const OPUS_FRAME_DURATION_MS: u32 = 20;
const OPUS_SAMPLE_RATE_HZ: u32 = 48000;
const OPUS_CHANNELS: u8 = 2;

/// Publish session lifecycle, matching the phases of [`Session::init`] and
/// steady-state writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    Init,
    Offer,
    Answer,
    Negotiated,
    UdpConnected,
    IceConnecting,
    IceConnected,
    DtlsFinished,
    SrtpFinished,
    Ready,
    Failed,
}

/// Codec-validated H.264 video leg plus the packetizer it drives.
struct VideoStream {
    params: VideoParams,
    packetizer: H264RtpPacketizer,
}

/// Codec-validated Opus audio leg plus the packetizer it drives.
struct AudioStream {
    params: AudioParams,
    packetizer: OpusRtpPacketizer,
}

/// Caller-supplied video codec parameters, unvalidated.
pub struct VideoInput<'b> {
    pub codec: &'b str,
    pub has_b_frames: bool,
    pub extradata: &'b [u8],
}

/// Caller-supplied audio codec parameters, unvalidated. The SSRC placed on
/// the wire is assigned by the packetizer, not the caller.
pub struct AudioInput<'b> {
    pub codec: &'b str,
    pub sample_rate: u32,
    pub channels: u8,
}

/// One WHIP publish: drives the handshake to `Ready`, then accepts encoded
/// video/audio frames to send as SRTP.
pub struct Session<'a> {
    config: SessionConfig,
    state: SessionState,
    logger: Logger,
    signaler: WhipSignaler<'a>,

    local_ice_ufrag: String,
    local_ice_pwd: String,
    remote_ice_ufrag: String,
    remote_ice_pwd: String,
    binding_transaction_id: [u8; 12],
    ice_connected: bool,
    dtls_closed: bool,

    dtls_context: DtlsContext,
    dtls_engine: Option<DtlsEngine>,

    udp: Option<UdpTransport>,
    transport: Option<SecureUdpTransport>,

    video: Option<VideoStream>,
    audio: Option<AudioStream>,

    on_keyframe_request: Option<Box<dyn FnMut() + 'a>>,
}

impl<'a> Session<'a> {
    /// Creates a session in state `Init`. Nothing touches the network until
    /// [`Session::init`] is called.
    pub fn new(
        config: SessionConfig,
        client: &'a dyn HttpClient,
        logger: Logger,
    ) -> Result<Self, SessionError> {
        let dtls_context = DtlsContext::new()
            .map_err(|e| SessionError::new(SessionErrorKind::Configuration, e))?;

        let signaler = WhipSignaler::new(
            client,
            config.whip_url().to_string(),
            config.authorization().map(str::to_string),
            logger.for_component("signaler").unwrap_or_else(|_| logger.clone()),
        );

        Ok(Session {
            config,
            state: SessionState::Init,
            logger,
            signaler,
            local_ice_ufrag: random_hex(8),
            local_ice_pwd: random_hex(32),
            remote_ice_ufrag: String::new(),
            remote_ice_pwd: String::new(),
            binding_transaction_id: random_transaction_id(),
            ice_connected: false,
            dtls_closed: false,
            dtls_context,
            dtls_engine: None,
            udp: None,
            transport: None,
            video: None,
            audio: None,
            on_keyframe_request: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Registers a callback invoked when the remote peer requests a
    /// keyframe via RTCP PLI (RFC 4585).
    pub fn set_keyframe_request_callback(&mut self, callback: impl FnMut() + 'a) {
        self.on_keyframe_request = Some(Box::new(callback));
    }

    /// Validates codec parameters, exchanges SDP over WHIP, and runs the
    /// ICE-Lite/DTLS-SRTP handshake to completion. On success, `state()` is
    /// `Ready` and `write_video`/`write_audio` may be called.
    pub fn init(
        &mut self,
        video: Option<VideoInput>,
        audio: Option<AudioInput>,
    ) -> Result<(), SessionError> {
        if video.is_none() && audio.is_none() {
            return Err(SessionError::new(
                SessionErrorKind::Configuration,
                "at least one of video or audio must be configured",
            ));
        }

        let video_params = video
            .as_ref()
            .map(|v| parse_video_params(v.codec, v.has_b_frames, v.extradata))
            .transpose()?;
        let audio_params = audio
            .as_ref()
            .map(|a| parse_audio_params(a.codec, a.sample_rate, a.channels))
            .transpose()?;

        if let Some(params) = video_params {
            let max_payload = self.config.max_rtp_packet_size();
            let packetizer = H264RtpPacketizer::new(params.payload_type, max_payload, VIDEO_CLOCK_RATE_FPS)
                .with_avcc(params.extradata.nal_length_size);
            self.video = Some(VideoStream { params, packetizer });
        }
        if let (Some(input), Some(params)) = (audio.as_ref(), audio_params) {
            let max_payload = self.config.max_rtp_packet_size();
            let packetizer =
                OpusRtpPacketizer::new(params.payload_type, max_payload, input.sample_rate, OPUS_FRAME_DURATION_MS);
            self.audio = Some(AudioStream { params, packetizer });
        }

        // SSRCs are assigned by each packetizer, not by the caller; the
        // offer must declare the SSRC actually placed on the wire.
        let offer = self.build_offer();

        self.state = SessionState::Offer;
        self.logger.info("exchanging WHIP offer/answer");
        let answer = self.signaler.exchange(&offer)?;
        self.state = SessionState::Answer;

        let answer_info = sdp::whip::parse_answer(&answer)?;
        self.remote_ice_ufrag = answer_info.ice_ufrag.clone();
        self.remote_ice_pwd = answer_info.ice_pwd.clone();
        self.state = SessionState::Negotiated;

        let remote_addr = remote_candidate_addr(&answer_info)?;
        let udp = UdpTransport::new("0.0.0.0:0".parse().unwrap(), self.logger.for_component("udp").unwrap_or_else(|_| self.logger.clone()))?;
        let mut udp = udp;
        udp.set_remote(remote_addr);
        self.udp = Some(udp);
        self.state = SessionState::UdpConnected;

        let dtls_engine = DtlsEngine::new(self.dtls_context.get_dimpl_certificate().clone())
            .map_err(|e| SessionError::new(SessionErrorKind::Handshake, e))?;
        self.dtls_engine = Some(dtls_engine);
        self.state = SessionState::IceConnecting;

        self.run_handshake()?;
        self.state = SessionState::Ready;
        self.logger.info("session ready");
        Ok(())
    }

    fn build_offer(&self) -> String {
        let identity = OfferIdentity {
            ice_ufrag: &self.local_ice_ufrag,
            ice_pwd: &self.local_ice_pwd,
            fingerprint: self.dtls_context.get_fingerprint(),
        };

        let audio_offer = self.audio.as_ref().map(|stream| AudioOfferParams {
            payload_type: stream.params.payload_type,
            ssrc: stream.packetizer.get_ssrc(),
            sample_rate: OPUS_SAMPLE_RATE_HZ,
            channels: OPUS_CHANNELS,
        });
        let video_offer = self.video.as_ref().map(|stream| VideoOfferParams {
            payload_type: stream.params.payload_type,
            ssrc: stream.packetizer.get_ssrc(),
            sps: Some(stream.params.extradata.sps.clone()),
        });

        sdp::whip::build_offer(&identity, audio_offer.as_ref(), video_offer.as_ref())
    }

    fn run_handshake(&mut self) -> Result<(), SessionError> {
        let deadline = Instant::now() + Duration::from_millis(self.config.handshake_timeout_ms());

        loop {
            if Instant::now() >= deadline {
                self.state = SessionState::Failed;
                return Err(SessionError::new(
                    SessionErrorKind::Timeout,
                    format!(
                        "handshake did not complete within {} ms",
                        self.config.handshake_timeout_ms()
                    ),
                ));
            }

            if self.state <= SessionState::IceConnecting {
                self.emit_binding_request()?;
            }

            for _ in 0..HANDSHAKE_POLL_READS {
                // The socket is moved into `self.transport` the moment SRTP
                // keys land (see `dispatch_dtls_record`), so it must not be
                // read again once that happens this iteration.
                if self.state == SessionState::SrtpFinished {
                    break;
                }
                let received = {
                    let udp = self.udp.as_mut().ok_or_else(|| {
                        SessionError::new(SessionErrorKind::Handshake, "UDP socket not open")
                    })?;
                    udp.receive()?
                };
                match received {
                    Some((data, _addr)) => self.dispatch_handshake_packet(&data)?,
                    None => std::thread::sleep(HANDSHAKE_POLL_SLEEP),
                }
            }

            if self.state == SessionState::SrtpFinished {
                return Ok(());
            }
        }
    }

    fn emit_binding_request(&mut self) -> Result<(), SessionError> {
        let request = stun::build_binding_request(
            &self.remote_ice_ufrag,
            &self.local_ice_ufrag,
            &self.remote_ice_pwd,
            self.binding_transaction_id,
        );
        self.udp
            .as_mut()
            .ok_or_else(|| SessionError::new(SessionErrorKind::Handshake, "UDP socket not open"))?
            .send(&request)?;
        Ok(())
    }

    fn dispatch_handshake_packet(&mut self, data: &[u8]) -> Result<(), SessionError> {
        match classify_packet(data) {
            PacketType::Stun => self.dispatch_stun_packet(data)?,
            PacketType::Dtls => self.dispatch_dtls_record(data)?,
            PacketType::Rtp | PacketType::Rtcp => {
                self.logger.debug("dropped RTP/RTCP datagram received before handshake completed");
            }
            PacketType::Unknown => {
                self.logger.debug("dropped unrecognized datagram during handshake");
            }
        }
        Ok(())
    }

    fn dispatch_stun_packet(&mut self, data: &[u8]) -> Result<(), SessionError> {
        match stun::classify(data) {
            Some(StunClass::BindingRequest) => {
                let message = stun::Message::decode(data)?;
                let response = stun::build_binding_response(message.header.transaction_id, &self.local_ice_pwd);
                self.udp
                    .as_mut()
                    .ok_or_else(|| SessionError::new(SessionErrorKind::Handshake, "UDP socket not open"))?
                    .send(&response)?;
            }
            Some(StunClass::BindingSuccess) => {
                if !self.ice_connected {
                    self.ice_connected = true;
                    self.state = SessionState::IceConnected;
                    self.logger.info("ICE binding succeeded");
                }
            }
            None => {
                self.logger.warn("dropped malformed STUN datagram");
            }
        }
        Ok(())
    }

    fn dispatch_dtls_record(&mut self, data: &[u8]) -> Result<(), SessionError> {
        let logger = self.logger.clone();
        let engine = self
            .dtls_engine
            .as_mut()
            .ok_or_else(|| SessionError::new(SessionErrorKind::Handshake, "DTLS engine not initialized"))?;

        engine
            .handle_packet(data)
            .map_err(|e| SessionError::new(SessionErrorKind::Handshake, e))?;

        let pending = engine.take_pending_packets();
        let udp = self
            .udp
            .as_mut()
            .ok_or_else(|| SessionError::new(SessionErrorKind::Handshake, "UDP socket not open"))?;
        for packet in pending {
            udp.send(&packet)?;
        }

        if engine.is_closed() {
            self.state = SessionState::Failed;
            return Err(SessionError::new(
                SessionErrorKind::Handshake,
                engine.failure_reason().unwrap_or("DTLS handshake failed").to_string(),
            ));
        }

        if engine.is_connected() && self.state < SessionState::DtlsFinished {
            self.state = SessionState::DtlsFinished;
            logger.info("DTLS handshake complete");
        }

        if self.transport.is_none() {
            if let Some(keys) = engine.get_srtp_keys() {
                let udp = self.udp.take().ok_or_else(|| {
                    SessionError::new(SessionErrorKind::Handshake, "UDP socket not open")
                })?;
                self.transport = Some(SecureUdpTransport::new(udp, keys, logger.clone()));
                self.state = SessionState::SrtpFinished;
                logger.info("SRTP keys derived, session transport ready");
            }
        }

        Ok(())
    }

    /// Polls the socket once (non-blocking) for inbound STUN keepalives and
    /// RTCP feedback. Called before every media write.
    fn poll_incoming(&mut self) -> Result<(), SessionError> {
        let Some(transport) = self.transport.as_mut() else {
            return Ok(());
        };

        let Some((data, _addr)) = transport.receive()? else {
            return Ok(());
        };

        match classify_packet(&data) {
            PacketType::Stun => {
                if let Some(StunClass::BindingRequest) = stun::classify(&data) {
                    if let Ok(message) = stun::Message::decode(&data) {
                        let response =
                            stun::build_binding_response(message.header.transaction_id, &self.local_ice_pwd);
                        transport.udp_mut().send(&response)?;
                    }
                }
            }
            PacketType::Rtcp => match transport.unprotect_rtcp_bytes(&data) {
                Ok(plaintext) => {
                    if contains_pli(&plaintext) {
                        self.logger.info("received PLI, requesting keyframe");
                        if let Some(callback) = self.on_keyframe_request.as_mut() {
                            callback();
                        }
                    } else {
                        self.logger.debug("received non-PLI RTCP feedback, ignoring");
                    }
                }
                Err(e) => self.logger.warn(&format!("failed to decrypt inbound RTCP: {}", e)),
            },
            PacketType::Dtls => {
                let Some(engine) = self.dtls_engine.as_mut() else {
                    self.logger.warn("dropped DTLS record with no active DTLS engine");
                    return Ok(());
                };

                if let Err(e) = engine.handle_packet(&data) {
                    self.logger.warn(&format!("DTLS error in steady state: {}", e));
                }

                for packet in engine.take_pending_packets() {
                    transport.udp_mut().send(&packet)?;
                }

                if engine.is_closed() {
                    self.logger.warn("DTLS session closed by peer");
                    self.dtls_closed = true;
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Sends one encoded H.264 access unit. If it carries an IDR slice, the
    /// out-of-band SPS/PPS are injected as a preceding access unit.
    pub fn write_video(&mut self, frame: &[u8]) -> Result<(), SessionError> {
        self.ensure_ready()?;
        self.poll_incoming()?;

        let is_idr = {
            let video = self.video.as_ref().ok_or_else(|| {
                SessionError::new(SessionErrorKind::Configuration, "no video stream configured")
            })?;
            contains_idr_nal(frame, video.params.extradata.nal_length_size)
        };

        if is_idr {
            let param_set_packets = {
                let video = self.video.as_mut().unwrap();
                let unit = video.params.extradata.sps_pps_access_unit();
                video.packetizer.packetize_parameter_sets(&unit)
            };
            for packet in param_set_packets {
                self.send_video_packet(packet)?;
            }
        }

        let packets = self.video.as_mut().unwrap().packetizer.packetize(frame);
        for packet in packets {
            self.send_video_packet(packet)?;
        }
        Ok(())
    }

    fn send_video_packet(&mut self, packet: network::RtpPacket) -> Result<(), SessionError> {
        self.transport
            .as_mut()
            .ok_or_else(|| SessionError::new(SessionErrorKind::Transport, "transport not ready"))?
            .send_packet(MediaKind::Video, packet.to_bytes())?;
        Ok(())
    }

    /// Sends one encoded Opus frame (typically a 20 ms frame at 48 kHz).
    pub fn write_audio(&mut self, frame: &[u8]) -> Result<(), SessionError> {
        self.ensure_ready()?;
        self.poll_incoming()?;

        if self.audio.is_none() {
            return Err(SessionError::new(SessionErrorKind::Configuration, "no audio stream configured"));
        }

        let packets = self.audio.as_mut().unwrap().packetizer.packetize(frame);
        for packet in packets {
            self.transport
                .as_mut()
                .ok_or_else(|| SessionError::new(SessionErrorKind::Transport, "transport not ready"))?
                .send_packet(MediaKind::Audio, packet.to_bytes())?;
        }
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), SessionError> {
        if self.dtls_closed {
            // EIO: the transport closed out from under the caller.
            const EIO: i32 = 5;
            return Err(std::io::Error::from_raw_os_error(EIO).into());
        }
        if self.state == SessionState::Failed {
            return Err(SessionError::new(SessionErrorKind::Transport, "session has failed"));
        }
        if self.state != SessionState::Ready {
            return Err(SessionError::new(
                SessionErrorKind::Transport,
                "session is not ready to send media",
            ));
        }
        Ok(())
    }

    /// Tears the session down: best-effort WHIP `DELETE` of the resource
    /// captured from the `Location` header during `init`.
    pub fn shutdown(&mut self) {
        self.signaler.shutdown();
    }
}

fn random_hex(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| std::char::from_digit(rng.gen_range(0..16u32), 16).unwrap()).collect()
}

fn random_transaction_id() -> [u8; 12] {
    let mut rng = rand::thread_rng();
    let mut id = [0u8; 12];
    rng.fill(&mut id);
    id
}

fn remote_candidate_addr(answer: &AnswerInfo) -> Result<SocketAddr, SessionError> {
    format!("{}:{}", answer.candidate_host, answer.candidate_port)
        .parse()
        .map_err(|_| {
            SessionError::new(
                SessionErrorKind::Signaling,
                format!("invalid candidate address {}:{}", answer.candidate_host, answer.candidate_port),
            )
        })
}

/// Walks an AVCC-framed access unit looking for an IDR slice NAL (type 5).
fn contains_idr_nal(data: &[u8], nal_length_size: u8) -> bool {
    const IDR_NAL_TYPE: u8 = 5;
    let length_size = nal_length_size as usize;
    if length_size == 0 {
        return false;
    }

    let mut offset = 0;
    while offset + length_size <= data.len() {
        let len = match length_size {
            1 => data[offset] as usize,
            2 => u16::from_be_bytes([data[offset], data[offset + 1]]) as usize,
            4 => u32::from_be_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]) as usize,
            _ => return false,
        };
        offset += length_size;
        if offset + len > data.len() || len == 0 {
            break;
        }
        if (data[offset] & 0x1F) == IDR_NAL_TYPE {
            return true;
        }
        offset += len;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::HttpResponse;
    use crate::http_client::mock::MockHttpClient;
    use logging::LogLevel;

    fn test_logger() -> Logger {
        let dir = tempfile::tempdir().unwrap();
        Logger::new(dir.path().join("test.log"), LogLevel::Debug).unwrap()
    }

    fn avcc_extradata() -> Vec<u8> {
        let sps = [0x67u8, 0x42, 0x00, 0x1e, 0xAA];
        let pps = [0x68u8, 0xCE, 0x3C, 0x80];
        let mut buf = vec![1, 0x42, 0x00, 0x1e, 0xFF, 0xE1];
        buf.extend_from_slice(&(sps.len() as u16).to_be_bytes());
        buf.extend_from_slice(&sps);
        buf.push(1);
        buf.extend_from_slice(&(pps.len() as u16).to_be_bytes());
        buf.extend_from_slice(&pps);
        buf
    }

    #[test]
    fn test_contains_idr_nal_detects_type_5() {
        let mut frame = Vec::new();
        frame.extend_from_slice(&3u32.to_be_bytes());
        frame.extend_from_slice(&[0x41, 0xAA, 0xBB]); // non-IDR slice (type 1)
        frame.extend_from_slice(&3u32.to_be_bytes());
        frame.extend_from_slice(&[0x65, 0xCC, 0xDD]); // IDR slice (type 5)

        assert!(contains_idr_nal(&frame, 4));
    }

    #[test]
    fn test_contains_idr_nal_false_for_non_idr_frame() {
        let mut frame = Vec::new();
        frame.extend_from_slice(&3u32.to_be_bytes());
        frame.extend_from_slice(&[0x41, 0xAA, 0xBB]);

        assert!(!contains_idr_nal(&frame, 4));
    }

    #[test]
    fn test_random_hex_produces_requested_length() {
        assert_eq!(random_hex(8).len(), 8);
        assert_eq!(random_hex(32).len(), 32);
        assert!(random_hex(8).chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_init_rejects_empty_media() {
        let mock = MockHttpClient::new(
            HttpResponse { status: 201, headers: vec![], body: "v=0\r\n".to_string() },
            HttpResponse { status: 200, headers: vec![], body: String::new() },
        );
        let config = SessionConfig::builder().whip_url("https://whip.example.com/publish").build();
        let mut session = Session::new(config, &mock, test_logger()).unwrap();

        let result = session.init(None, None);
        assert!(matches!(
            result,
            Err(SessionError { kind: SessionErrorKind::Configuration, .. })
        ));
    }

    #[test]
    fn test_init_rejects_invalid_video_codec() {
        let mock = MockHttpClient::new(
            HttpResponse { status: 201, headers: vec![], body: "v=0\r\n".to_string() },
            HttpResponse { status: 200, headers: vec![], body: String::new() },
        );
        let config = SessionConfig::builder().whip_url("https://whip.example.com/publish").build();
        let mut session = Session::new(config, &mock, test_logger()).unwrap();

        let extradata = avcc_extradata();
        let result = session.init(
            Some(VideoInput { codec: "vp8", has_b_frames: false, extradata: &extradata }),
            None,
        );
        assert!(result.is_err());
        assert_eq!(session.state(), SessionState::Init);
    }

    #[test]
    fn test_write_video_before_ready_is_rejected() {
        let mock = MockHttpClient::new(
            HttpResponse { status: 201, headers: vec![], body: "v=0\r\n".to_string() },
            HttpResponse { status: 200, headers: vec![], body: String::new() },
        );
        let config = SessionConfig::builder().whip_url("https://whip.example.com/publish").build();
        let mut session = Session::new(config, &mock, test_logger()).unwrap();

        let result = session.write_video(&[0, 0, 0, 1]);
        assert!(result.is_err());
    }

    #[test]
    fn test_init_fails_when_answer_is_missing_ice_credentials() {
        let mock = MockHttpClient::new(
            HttpResponse {
                status: 201,
                headers: vec![],
                body: "v=0\r\no=- 0 0 IN IP4 127.0.0.1\r\n".to_string(),
            },
            HttpResponse { status: 200, headers: vec![], body: String::new() },
        );
        let config = SessionConfig::builder()
            .whip_url("https://whip.example.com/publish")
            .handshake_timeout_ms(50)
            .build();
        let mut session = Session::new(config, &mock, test_logger()).unwrap();

        let extradata = avcc_extradata();
        let result = session.init(
            Some(VideoInput { codec: "h264", has_b_frames: false, extradata: &extradata }),
            None,
        );
        assert!(result.is_err());
        assert_eq!(session.state(), SessionState::Answer);
    }
}
