//! XOR-MAPPED-ADDRESS attribute decoding
//!
//! This module implements the XOR-MAPPED-ADDRESS attribute according to RFC 5389.
//! XOR-MAPPED-ADDRESS is the preferred method for conveying reflexive addresses
//! as it XORs the address with the magic cookie and transaction ID, providing
//! better NAT traversal behavior.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::message_header::MAGIC_COOKIE;

/// Address family values according to RFC 5389.
const FAMILY_IPV4: u8 = 0x01;
const FAMILY_IPV6: u8 = 0x02;

/// Decodes an XOR-MAPPED-ADDRESS attribute value.
///
/// # Arguments
/// * `bytes` - The attribute value bytes
/// * `transaction_id` - The transaction ID from the message header
///
/// # Returns
/// * `Some(SocketAddr)` - If decoding succeeds
/// * `None` - If the format is invalid
pub fn decode(bytes: &[u8], transaction_id: &[u8; 12]) -> Option<SocketAddr> {
    if bytes.len() < 4 {
        return None;
    }

    let family = bytes[1];

    // XOR mask: magic cookie + transaction ID
    let mut xor_mask = Vec::new();
    xor_mask.extend_from_slice(&MAGIC_COOKIE.to_be_bytes());
    xor_mask.extend_from_slice(transaction_id);

    // XOR port
    let xor_port = u16::from_be_bytes([bytes[2], bytes[3]]);
    let port = xor_port ^ (MAGIC_COOKIE >> 16) as u16;

    match family {
        FAMILY_IPV4 => {
            // IPv4
            if bytes.len() < 8 {
                return None;
            }
            let magic_bytes = MAGIC_COOKIE.to_be_bytes();
            let ip = Ipv4Addr::new(
                bytes[4] ^ magic_bytes[0],
                bytes[5] ^ magic_bytes[1],
                bytes[6] ^ magic_bytes[2],
                bytes[7] ^ magic_bytes[3],
            );
            Some(SocketAddr::new(IpAddr::V4(ip), port))
        }
        FAMILY_IPV6 => {
            // IPv6
            if bytes.len() < 20 {
                return None;
            }
            let mut octets = [0u8; 16];
            for i in 0..16 {
                octets[i] = bytes[4 + i] ^ xor_mask[i];
            }
            let ip = Ipv6Addr::from(octets);
            Some(SocketAddr::new(IpAddr::V6(ip), port))
        }
        _ => None,
    }
}
