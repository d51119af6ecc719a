//! Session configuration
//!
//! Mirrors the teacher's `P2PConfig`/`P2PConfigBuilder` pattern: a plain
//! struct with a builder, plus an optional JSON-config-file loading path
//! via `config_loader`/`json_parser`.

use crate::error::{SessionError, SessionErrorKind};
use json_parser::{Deserialize, JsonValue, Serialize, from_str};

/// Configuration for one WHIP publish.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// WHIP endpoint URL the offer is POSTed to.
    whip_url: String,
    /// Bounds the whole ICE+DTLS handshake phase.
    handshake_timeout_ms: u64,
    /// RTP MTU; also the DTLS MTU. Max RTP packet size is `pkt_size - 16`.
    pkt_size: usize,
    /// Optional bearer token sent as `Authorization` on POST/DELETE.
    authorization: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            whip_url: String::new(),
            handshake_timeout_ms: 5000,
            pkt_size: 1200,
            authorization: None,
        }
    }
}

impl SessionConfig {
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    pub fn whip_url(&self) -> &str {
        &self.whip_url
    }

    pub fn handshake_timeout_ms(&self) -> u64 {
        self.handshake_timeout_ms
    }

    pub fn pkt_size(&self) -> usize {
        self.pkt_size
    }

    /// Max RTP payload-bearing packet size, reserving room for the SRTP
    /// auth tag and any padding.
    pub fn max_rtp_packet_size(&self) -> usize {
        self.pkt_size - 16
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// Loads a `SessionConfig` from a JSON document found via
    /// `config_loader`, falling back to defaults for absent fields.
    pub fn from_config_file(filename: &str) -> Result<Self, SessionError> {
        let path = config_loader::find_config_file(filename)
            .map_err(|e| SessionError::new(SessionErrorKind::Configuration, e.to_string()))?;
        let content = config_loader::load_config_file(&path)
            .map_err(|e| SessionError::new(SessionErrorKind::Configuration, e.to_string()))?;

        from_str::<SessionConfig>(&content)
            .map_err(|e| SessionError::new(SessionErrorKind::Configuration, e.to_string()))
    }
}

impl Default for SessionConfigBuilder {
    fn default() -> Self {
        SessionConfigBuilder {
            config: SessionConfig::default(),
        }
    }
}

#[derive(Debug)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    pub fn whip_url(mut self, url: impl Into<String>) -> Self {
        self.config.whip_url = url.into();
        self
    }

    pub fn handshake_timeout_ms(mut self, ms: u64) -> Self {
        self.config.handshake_timeout_ms = ms;
        self
    }

    pub fn pkt_size(mut self, bytes: usize) -> Self {
        self.config.pkt_size = bytes;
        self
    }

    pub fn authorization(mut self, token: impl Into<String>) -> Self {
        self.config.authorization = Some(token.into());
        self
    }

    pub fn build(self) -> SessionConfig {
        self.config
    }
}

json_parser::impl_json! {
    SessionConfig {
        whip_url: String,
        handshake_timeout_ms: u64,
        pkt_size: usize,
        authorization: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_builder_defaults() {
        let config = SessionConfig::builder()
            .whip_url("https://whip.example.com/publish")
            .build();

        assert_eq!(config.handshake_timeout_ms(), 5000);
        assert_eq!(config.pkt_size(), 1200);
        assert_eq!(config.max_rtp_packet_size(), 1184);
        assert!(config.authorization().is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = SessionConfig::builder()
            .whip_url("https://whip.example.com/publish")
            .handshake_timeout_ms(8000)
            .pkt_size(1400)
            .authorization("secret-token")
            .build();

        assert_eq!(config.handshake_timeout_ms(), 8000);
        assert_eq!(config.pkt_size(), 1400);
        assert_eq!(config.authorization(), Some("secret-token"));
    }

    #[test]
    fn test_from_config_file_reads_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"whip_url":"https://whip.example.com/publish","handshake_timeout_ms":7000,"pkt_size":1200,"authorization":null}}"#
        )
        .unwrap();

        unsafe {
            std::env::set_var("CONFIG_PATH", path.to_str().unwrap());
        }
        let config = SessionConfig::from_config_file("config.json").unwrap();
        unsafe {
            std::env::remove_var("CONFIG_PATH");
        }

        assert_eq!(config.whip_url(), "https://whip.example.com/publish");
        assert_eq!(config.handshake_timeout_ms(), 7000);
    }
}
