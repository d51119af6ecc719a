//! MESSAGE-INTEGRITY and FINGERPRINT computation for STUN messages.
//!
//! Both attributes require the header's `message_length` field to be set
//! *as if the attribute were already present* before the covered bytes are
//! hashed, per RFC 5389 §15.4 and §15.5.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::attribute_type::AttributeType;
use crate::message::Message;

type HmacSha1 = Hmac<Sha1>;

/// XOR mask applied to the FINGERPRINT CRC32, per RFC 5389 §15.5.
const FINGERPRINT_XOR: u32 = 0x5354_554E;

/// Appends MESSAGE-INTEGRITY keyed by `key` (the relevant side's ICE password).
///
/// Must be called before [`append_fingerprint`] — FINGERPRINT covers the
/// integrity attribute too.
pub fn append_message_integrity(message: &mut Message, key: &[u8]) {
    let prospective_len = message.attributes_bytes().len() as u16 + 24;
    message.header.set_message_length(prospective_len);

    let mut covered = message.header.encode();
    covered.extend_from_slice(message.attributes_bytes());

    let tag = hmac_sha1(key, &covered);
    message.add_attribute(AttributeType::MessageIntegrity, &tag);
}

/// Appends FINGERPRINT, the final attribute in any STUN message we emit.
pub fn append_fingerprint(message: &mut Message) {
    let prospective_len = message.attributes_bytes().len() as u16 + 8;
    message.header.set_message_length(prospective_len);

    let mut covered = message.header.encode();
    covered.extend_from_slice(message.attributes_bytes());

    let crc = crc32fast::hash(&covered) ^ FINGERPRINT_XOR;
    message.add_attribute(AttributeType::Fingerprint, &crc.to_be_bytes());
}

/// Verifies MESSAGE-INTEGRITY against `key` over the raw encoded message.
///
/// `integrity_value_offset` is the byte offset of the 20-byte HMAC value
/// within `encoded` (i.e. immediately after the attribute's type+length).
pub fn verify_message_integrity(encoded: &[u8], integrity_value_offset: usize, key: &[u8]) -> bool {
    if integrity_value_offset < 20 || integrity_value_offset + 20 > encoded.len() {
        return false;
    }

    let covered_len = integrity_value_offset;
    let mut covered = encoded[..covered_len].to_vec();
    // Header length must reflect the message as if truncated right after
    // the integrity attribute, matching what was hashed on the sender side.
    let header_len = (covered_len - 20 + 4) as u16;
    covered[2] = (header_len >> 8) as u8;
    covered[3] = (header_len & 0xFF) as u8;

    let expected = hmac_sha1(key, &covered);
    expected.as_slice() == &encoded[integrity_value_offset..integrity_value_offset + 20]
}

/// Verifies FINGERPRINT over the raw encoded message.
///
/// `fingerprint_value_offset` is the byte offset of the 4-byte CRC value.
pub fn verify_fingerprint(encoded: &[u8], fingerprint_value_offset: usize) -> bool {
    if fingerprint_value_offset + 4 > encoded.len() {
        return false;
    }

    let covered_len = fingerprint_value_offset;
    let mut covered = encoded[..covered_len].to_vec();
    let header_len = (covered_len - 20 + 8) as u16;
    covered[2] = (header_len >> 8) as u8;
    covered[3] = (header_len & 0xFF) as u8;

    let expected = crc32fast::hash(&covered) ^ FINGERPRINT_XOR;
    let actual = u32::from_be_bytes([
        encoded[fingerprint_value_offset],
        encoded[fingerprint_value_offset + 1],
        encoded[fingerprint_value_offset + 2],
        encoded[fingerprint_value_offset + 3],
    ]);
    expected == actual
}

fn hmac_sha1(key: &[u8], data: &[u8]) -> [u8; 20] {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    let result = mac.finalize().into_bytes();
    let mut out = [0u8; 20];
    out.copy_from_slice(&result);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message_type::MessageType;

    #[test]
    fn test_integrity_and_fingerprint_round_trip() {
        let mut message = Message::new(MessageType::Request, [7u8; 12]);
        message.add_attribute(AttributeType::Username, b"alice:bob");
        append_message_integrity(&mut message, b"password");
        append_fingerprint(&mut message);

        let encoded = message.encode();

        // USERNAME attr: 4 + 9 padded to 12 = 16 bytes, starting at header (20).
        let integrity_attr_offset = 20 + 16;
        let integrity_value_offset = integrity_attr_offset + 4;
        assert!(verify_message_integrity(
            &encoded,
            integrity_value_offset,
            b"password"
        ));

        let fingerprint_attr_offset = integrity_value_offset + 20;
        let fingerprint_value_offset = fingerprint_attr_offset + 4;
        assert!(verify_fingerprint(&encoded, fingerprint_value_offset));
    }

    #[test]
    fn test_integrity_rejects_wrong_key() {
        let mut message = Message::new(MessageType::Request, [1u8; 12]);
        append_message_integrity(&mut message, b"password");
        append_fingerprint(&mut message);

        let encoded = message.encode();
        let integrity_value_offset = 20 + 4;
        assert!(!verify_message_integrity(
            &encoded,
            integrity_value_offset,
            b"wrong"
        ));
    }
}
