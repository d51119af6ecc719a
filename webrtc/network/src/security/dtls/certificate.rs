//! DTLS certificate generation and management

use openssl::x509::X509;

/// Compute SHA-256 fingerprint of certificate
pub fn compute_fingerprint(cert: &X509) -> Result<String, String> {
    let der = cert
        .to_der()
        .map_err(|e| format!("Failed to encode certificate: {}", e))?;

    let digest = openssl::sha::sha256(&der);

    // Format as colon-separated hex (without algorithm prefix)
    let fingerprint = digest
        .iter()
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<_>>()
        .join(":");

    Ok(fingerprint)
}
