//! STUN Module - Session Traversal Utilities for NAT
//!
//! Implementation of STUN (Session Traversal Utilities for NAT) as per RFC 5389.

// Internal modules
mod attribute_type;
mod binding;
mod client;
mod errors;
mod integrity;
mod message;
mod message_builder;
mod message_header;
mod message_type;
mod xor_mapped_address;

pub use attribute_type::AttributeType;
pub use binding::{
    build_binding_request, build_binding_response, classify, find_attribute_value_offset,
    verify_integrity, StunClass,
};
pub use client::StunClient;
pub use errors::StunError;
pub use message::Message;
pub use message_header::MAGIC_COOKIE;
pub use message_type::MessageType;
