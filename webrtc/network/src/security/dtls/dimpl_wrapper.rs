//! dimpl DTLS wrapper for WebRTC
//!
//! Provides a Sans-IO DTLS engine that integrates with our UDP demultiplexer.
//! This session is always the DTLS **server** (the offer advertises
//! `a=setup:passive`), so the engine is always run in passive mode.

use super::SrtpKeys;
use dimpl::{Config, Dtls, DtlsCertificate, KeyingMaterial, Output, SrtpProfile};
use std::sync::Arc;
use std::time::Instant;

/// Default DTLS/RTP MTU. Keeps each handshake flight within one UDP datagram.
pub const DEFAULT_MTU: usize = 1200;

/// Content-type byte for DTLS handshake records (RFC 6347).
const CONTENT_TYPE_HANDSHAKE: u8 = 22;

/// DTLS engine state wrapping dimpl.
pub struct DtlsEngine {
    dtls: Dtls,
    cert: DtlsCertificate,
    srtp_keys: Option<SrtpKeys>,
    connected: bool,
    closed: bool,
    failed: Option<String>,
    pending_packets: Vec<Vec<u8>>,
    last_handshake_record: Option<(u8, u8)>,
    retransmission_count: u32,
}

impl DtlsEngine {
    /// Create a new engine in the passive (server) role, using an existing
    /// certificate that MUST match the fingerprint advertised in the SDP.
    pub fn new(cert: DtlsCertificate) -> Result<Self, String> {
        let mut config = Config::default();
        config.mtu = DEFAULT_MTU;
        let mut dtls = Dtls::new(Arc::new(config), cert.clone());
        dtls.set_active(false);

        let mut engine = DtlsEngine {
            dtls,
            cert,
            srtp_keys: None,
            connected: false,
            closed: false,
            failed: None,
            pending_packets: Vec::new(),
            last_handshake_record: None,
            retransmission_count: 0,
        };

        engine
            .dtls
            .handle_timeout(Instant::now())
            .map_err(|e| format!("Failed to initialize DTLS timeout: {:?}", e))?;
        engine.process_output()?;

        Ok(engine)
    }

    /// Get local certificate fingerprint for SDP (SHA-256, colon-separated hex).
    pub fn get_fingerprint(&self) -> String {
        use openssl::sha::sha256;
        let digest = sha256(&self.cert.certificate);
        digest
            .iter()
            .map(|byte| format!("{:02X}", byte))
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Feed an incoming DTLS record to the engine.
    pub fn handle_packet(&mut self, packet: &[u8]) -> Result<(), String> {
        if let Err(e) = self.dtls.handle_packet(packet) {
            self.failed = Some(format!("{:?}", e));
            return Err(format!("DTLS packet handling failed: {:?}", e));
        }
        self.process_output()
    }

    /// Drive retransmission timers.
    pub fn handle_timeout(&mut self, now: Instant) -> Result<(), String> {
        if let Err(e) = self.dtls.handle_timeout(now) {
            self.failed = Some(format!("{:?}", e));
            return Err(format!("DTLS timeout handling failed: {:?}", e));
        }
        self.process_output()
    }

    /// Process all pending output from dimpl, tracking each record as its
    /// own datagram (never concatenated — required for MTU correctness).
    fn process_output(&mut self) -> Result<(), String> {
        let mut out_buf = vec![0u8; 2048];

        loop {
            match self.dtls.poll_output(&mut out_buf) {
                Output::Packet(packet) => {
                    self.track_retransmission(packet);
                    self.pending_packets.push(packet.to_vec());
                }
                Output::Timeout(_instant) => break,
                Output::Connected => self.connected = true,
                Output::Closed => self.closed = true,
                Output::PeerCert(_der) => {}
                Output::KeyingMaterial(km, profile) => {
                    self.srtp_keys = Some(extract_srtp_keys(&km, &profile)?);
                }
                Output::ApplicationData(_data) => {
                    // No data-channel transport in this core; drop silently.
                }
            }
        }

        Ok(())
    }

    /// Heuristic ARQ counter: a repeated handshake record (same content
    /// type + handshake message type emitted again) means the flight was
    /// retransmitted after a timeout.
    fn track_retransmission(&mut self, record: &[u8]) {
        if record.is_empty() || record[0] != CONTENT_TYPE_HANDSHAKE {
            return;
        }
        const RECORD_HEADER_LEN: usize = 13;
        if record.len() <= RECORD_HEADER_LEN {
            return;
        }
        let msg_type = record[RECORD_HEADER_LEN];
        let current = (record[0], msg_type);
        if self.last_handshake_record == Some(current) {
            self.retransmission_count += 1;
        }
        self.last_handshake_record = Some(current);
    }

    pub fn retransmission_count(&self) -> u32 {
        self.retransmission_count
    }

    /// Drain pending outbound records. Each element must be written as its
    /// own UDP datagram.
    pub fn take_pending_packets(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.pending_packets)
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// True once the peer has sent a close-notify, or the engine observed
    /// a fatal alert. Callers should surface this as a write error.
    pub fn is_closed(&self) -> bool {
        self.closed || self.failed.is_some()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failed.as_deref()
    }

    pub fn get_srtp_keys(&self) -> Option<&SrtpKeys> {
        self.srtp_keys.as_ref()
    }
}

/// Splits DTLS-SRTP keying material per the fixed layout this core requires:
/// `client_key(16) | server_key(16) | client_salt(14) | server_salt(14)`.
///
/// Because this session is always the DTLS server, "local" is always the
/// server half and "remote" the client half (see role-asymmetry design note).
fn extract_srtp_keys(km: &KeyingMaterial, profile: &SrtpProfile) -> Result<SrtpKeys, String> {
    if !matches!(profile, SrtpProfile::Aes128CmSha1_80) {
        return Err(format!("unsupported SRTP profile: {:?}", profile));
    }

    const KEY_LEN: usize = 16;
    const SALT_LEN: usize = 14;
    const EXPECTED_LEN: usize = KEY_LEN * 2 + SALT_LEN * 2;

    if km.len() != EXPECTED_LEN {
        return Err(format!(
            "invalid keying material length: {} (expected {})",
            km.len(),
            EXPECTED_LEN
        ));
    }

    let client_key_off = 0;
    let server_key_off = KEY_LEN;
    let client_salt_off = KEY_LEN * 2;
    let server_salt_off = KEY_LEN * 2 + SALT_LEN;

    let mut client_key = [0u8; KEY_LEN];
    let mut server_key = [0u8; KEY_LEN];
    let mut client_salt = [0u8; SALT_LEN];
    let mut server_salt = [0u8; SALT_LEN];

    client_key.copy_from_slice(&km[client_key_off..client_key_off + KEY_LEN]);
    server_key.copy_from_slice(&km[server_key_off..server_key_off + KEY_LEN]);
    client_salt.copy_from_slice(&km[client_salt_off..client_salt_off + SALT_LEN]);
    server_salt.copy_from_slice(&km[server_salt_off..server_salt_off + SALT_LEN]);

    Ok(SrtpKeys {
        local_master_key: server_key,
        local_master_salt: server_salt,
        remote_master_key: client_key,
        remote_master_salt: client_salt,
    })
}
