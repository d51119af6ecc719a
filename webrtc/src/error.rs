//! Session-level error type
//!
//! Every downstream crate keeps its own error enum; this module collects
//! them behind one `kind` so callers can dispatch on failure category
//! without matching each crate's error type.

use std::fmt;

/// Broad category of a session failure, matching the phases of `init` and
/// steady-state operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    Configuration,
    Signaling,
    Handshake,
    Timeout,
    Transport,
    Packetization,
}

impl fmt::Display for SessionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionErrorKind::Configuration => "configuration",
            SessionErrorKind::Signaling => "signaling",
            SessionErrorKind::Handshake => "handshake",
            SessionErrorKind::Timeout => "timeout",
            SessionErrorKind::Transport => "transport",
            SessionErrorKind::Packetization => "packetization",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
pub struct SessionError {
    pub kind: SessionErrorKind,
    pub message: String,
}

impl SessionError {
    pub fn new(kind: SessionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self.message)
    }
}

impl std::error::Error for SessionError {}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::new(SessionErrorKind::Transport, e.to_string())
    }
}

impl From<stun::StunError> for SessionError {
    fn from(e: stun::StunError) -> Self {
        SessionError::new(SessionErrorKind::Handshake, e.to_string())
    }
}

impl From<sdp::SdpError> for SessionError {
    fn from(e: sdp::SdpError) -> Self {
        SessionError::new(SessionErrorKind::Signaling, e.to_string())
    }
}

impl From<network::NetworkError> for SessionError {
    fn from(e: network::NetworkError) -> Self {
        SessionError::new(SessionErrorKind::Transport, e.to_string())
    }
}
