//! High-level Binding Request/Response construction and classification for
//! the ICE-Lite exchange used during connection bring-up.

use crate::attribute_type::AttributeType;
use crate::errors::StunError;
use crate::integrity;
use crate::message::Message;
use crate::message_type::MessageType;

/// Classification of an inbound datagram that looks like a STUN message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StunClass {
    BindingRequest,
    BindingSuccess,
}

/// Classifies the first two bytes of a datagram as STUN Binding Request or
/// Binding Success, per RFC 5389 §6. Returns `None` for anything else
/// (including non-STUN traffic such as DTLS records).
pub fn classify(bytes: &[u8]) -> Option<StunClass> {
    if bytes.len() < 2 {
        return None;
    }
    match (bytes[0], bytes[1]) {
        (0x00, 0x01) => Some(StunClass::BindingRequest),
        (0x01, 0x01) => Some(StunClass::BindingSuccess),
        _ => None,
    }
}

/// Builds the single outbound Binding Request used to nominate the one
/// candidate pair this ICE-Lite implementation ever considers.
///
/// `USERNAME` is `"{remote_ufrag}:{local_ufrag}"`, integrity is keyed with
/// the **remote** ICE password (we are proving our identity to the peer).
pub fn build_binding_request(
    remote_ufrag: &str,
    local_ufrag: &str,
    remote_pwd: &str,
    transaction_id: [u8; 12],
) -> Vec<u8> {
    let mut message = Message::new(MessageType::Request, transaction_id);

    let username = format!("{}:{}", remote_ufrag, local_ufrag);
    message.add_attribute(AttributeType::Username, username.as_bytes());
    message.add_attribute(AttributeType::UseCandidate, &[]);

    integrity::append_message_integrity(&mut message, remote_pwd.as_bytes());
    integrity::append_fingerprint(&mut message);

    message.encode()
}

/// Builds the Binding Success reply to an inbound Binding Request, so the
/// peer's own ICE-Lite check against this host succeeds.
///
/// Integrity is keyed with the **local** ICE password (the peer verifies us
/// using the credentials it learned from our SDP offer).
pub fn build_binding_response(request_transaction_id: [u8; 12], local_pwd: &str) -> Vec<u8> {
    let mut message = Message::new(MessageType::Response, request_transaction_id);

    integrity::append_message_integrity(&mut message, local_pwd.as_bytes());
    integrity::append_fingerprint(&mut message);

    message.encode()
}

/// Locates the first attribute of `attr_type` within an encoded STUN
/// message's attribute section, returning its value's byte offset within
/// `encoded` (i.e. after the 20-byte header and the attribute's own
/// type+length fields).
pub fn find_attribute_value_offset(encoded: &[u8], attr_type: AttributeType) -> Option<usize> {
    if encoded.len() < 20 {
        return None;
    }
    let mut offset = 20usize;
    while offset + 4 <= encoded.len() {
        let kind = u16::from_be_bytes([encoded[offset], encoded[offset + 1]]);
        let len = u16::from_be_bytes([encoded[offset + 2], encoded[offset + 3]]) as usize;
        let value_offset = offset + 4;
        if value_offset + len > encoded.len() {
            return None;
        }
        if AttributeType::from_u16(kind) == Some(attr_type) {
            return Some(value_offset);
        }
        let padding = (4 - (len % 4)) % 4;
        offset = value_offset + len + padding;
    }
    None
}

/// Verifies MESSAGE-INTEGRITY on an inbound message keyed with `key`.
///
/// Absence of the attribute is treated as a verification failure — this
/// implementation requires integrity on every Binding Request/Response it
/// accepts.
pub fn verify_integrity(encoded: &[u8], key: &[u8]) -> Result<(), StunError> {
    let offset = find_attribute_value_offset(encoded, AttributeType::MessageIntegrity)
        .ok_or(StunError::MissingRequiredField("MESSAGE-INTEGRITY"))?;
    if integrity::verify_message_integrity(encoded, offset, key) {
        Ok(())
    } else {
        Err(StunError::InvalidAttributeFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(&[0x00, 0x01, 0, 0]), Some(StunClass::BindingRequest));
        assert_eq!(classify(&[0x01, 0x01, 0, 0]), Some(StunClass::BindingSuccess));
        assert_eq!(classify(&[20, 3, 0, 0]), None); // looks like a DTLS record
    }

    #[test]
    fn test_binding_request_round_trip_integrity() {
        let tid = [9u8; 12];
        let req = build_binding_request("Xabc", "local1", "remotepwd", tid);

        assert_eq!(classify(&req), Some(StunClass::BindingRequest));
        assert!(verify_integrity(&req, b"remotepwd").is_ok());
        assert!(verify_integrity(&req, b"wrongpwd").is_err());

        let username_offset = find_attribute_value_offset(&req, AttributeType::Username).unwrap();
        assert_eq!(&req[username_offset..username_offset + 11], b"Xabc:local1");
    }

    #[test]
    fn test_binding_response_matches_transaction_id() {
        let tid = [3u8; 12];
        let resp = build_binding_response(tid, "localpwd");
        assert_eq!(classify(&resp), Some(StunClass::BindingSuccess));
        assert!(verify_integrity(&resp, b"localpwd").is_ok());
    }

    #[test]
    fn test_deterministic_rebuild_with_fixed_inputs() {
        let tid = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let a = build_binding_request("ufrag-r", "ufrag-l", "pwd-r", tid);
        let b = build_binding_request("ufrag-r", "ufrag-l", "pwd-r", tid);
        assert_eq!(a, b);
    }
}
