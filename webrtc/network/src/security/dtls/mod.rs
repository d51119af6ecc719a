//! DTLS (Datagram Transport Layer Security) for WebRTC
//!
//! Provides secure key exchange using DTLS-SRTP for WebRTC connections

mod certificate;
mod dimpl_wrapper;

pub use certificate::compute_fingerprint;
pub use dimpl::DtlsCertificate;
pub use dimpl_wrapper::DtlsEngine;

/// SRTP key material extracted from DTLS
#[derive(Debug, Clone)]
pub struct SrtpKeys {
    pub local_master_key: [u8; 16],
    pub local_master_salt: [u8; 14],
    pub remote_master_key: [u8; 16],
    pub remote_master_salt: [u8; 14],
}

/// DTLS context for WebRTC
pub struct DtlsContext {
    dimpl_cert: dimpl::DtlsCertificate,
    local_fingerprint: String,
}

impl DtlsContext {
    /// Create a new DTLS context with a self-signed certificate (uses dimpl's
    /// certificate generator, which this engine requires for wire compatibility).
    ///
    /// Note: dimpl's generator does not expose a subject-name parameter, so
    /// the CN cannot be pinned to a fixed value here; the fingerprint is what
    /// the peer actually authenticates against, which this still computes
    /// correctly.
    pub fn new() -> Result<Self, String> {
        let dimpl_cert = dimpl::certificate::generate_self_signed_certificate()
            .map_err(|e| format!("Failed to generate dimpl certificate: {}", e))?;

        // Compute fingerprint from dimpl's certificate (SHA-256 of DER)
        use openssl::sha::sha256;
        let digest = sha256(&dimpl_cert.certificate);
        let local_fingerprint = digest
            .iter()
            .map(|byte| format!("{:02X}", byte))
            .collect::<Vec<_>>()
            .join(":");

        Ok(DtlsContext {
            dimpl_cert,
            local_fingerprint,
        })
    }

    /// Get the local certificate fingerprint for SDP
    pub fn get_fingerprint(&self) -> &str {
        &self.local_fingerprint
    }

    /// Get dimpl certificate for DTLS engine
    pub fn get_dimpl_certificate(&self) -> &dimpl::DtlsCertificate {
        &self.dimpl_cert
    }
}
