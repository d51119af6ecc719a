//! SDP media description representation.
//!
//! Media descriptions define the properties of individual media streams
//! within an SDP session.

use crate::{attribute::Attribute, connection::Connection};

/// Represents a media description (m=) in an SDP message as defined in RFC 4566.
///
/// A media description starts with an 'm=' line and contains all of the following
/// fields in the specified order:
/// ```text
/// m=<media> <port> <proto> <fmt> ...
/// ```
///
/// # Arguments
/// * `media_type` - Media type ("audio", "video", "text", "application", "message")
/// * `port` - Transport port number for the media stream
/// * `protocol` - Transport protocol (e.g., "RTP/AVP", "udp")
/// * `formats` - Media format descriptions (codec types, payload types)
/// * `connection` - Optional connection information specific to this media
/// * `attributes` - Media-level attributes that apply only to this media stream
#[derive(Debug, Clone)]
pub struct MediaDescription {
    pub media_type: String,
    pub port: u16,
    pub protocol: String,
    pub formats: Vec<String>,
    pub connection: Option<Connection>,
    pub attributes: Vec<Attribute>,
}

/// Valid media types as per RFC 4566.
/// Common types include "audio", "video", "text", "application", and "message".
const VALID_MEDIA_TYPES: &[&str] = &["audio", "video", "text", "application", "message"];

impl MediaDescription {
    /// Parses a media description line according to RFC 4566.
    ///
    /// The media description line must be in the format:
    /// `<media> <port> <proto> <fmt> ...`
    ///
    /// # Arguments
    /// * `value` - The media description string to parse (without the "m=" prefix)
    ///
    /// # Returns
    /// * `Ok(MediaDescription)` - A successfully parsed media description
    /// * `Err(SdpError::InvalidMediaFormat)` - If the format is incorrect
    /// * `Err(SdpError::InvalidPort)` - If the port number is invalid
    pub fn parse(value: &str) -> Result<Self, crate::errors::SdpError> {
        let parts: Vec<&str> = value.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(crate::errors::SdpError::InvalidMediaFormat);
        }

        let port = parts[1]
            .parse()
            .map_err(|_| crate::errors::SdpError::InvalidPort)?;

        Ok(MediaDescription {
            media_type: parts[0].to_string(),
            port,
            protocol: parts[2].to_string(),
            formats: parts[3..].iter().map(|s| s.to_string()).collect(),
            connection: None,
            attributes: Vec::new(),
        })
    }

    /// Validates the media description according to RFC 4566 specifications.
    ///
    /// This method performs the following checks:
    /// - Media type must be one of: "audio", "video", "text", "application", "message"
    /// - At least one media format must be specified
    ///
    /// # Returns
    /// * `Ok(())` - If all validation checks pass
    /// * `Err(SdpError::InvalidMediaType)` - If the media type is not recognized
    /// * `Err(SdpError::NoMediaFormats)` - If no media formats are specified
    pub fn validate(&self) -> Result<(), crate::errors::SdpError> {
        // Media type must be one of: audio, video, text, application, message
        if !VALID_MEDIA_TYPES.contains(&self.media_type.as_str()) {
            return Err(crate::errors::SdpError::InvalidMediaType(
                self.media_type.clone(),
            ));
        }

        // Must have at least one format
        if self.formats.is_empty() {
            return Err(crate::errors::SdpError::NoMediaFormats);
        }

        Ok(())
    }
}

/// Implements the Display trait to format media descriptions according to RFC 4566.
///
/// The media description is formatted in the following order:
/// 1. Media line ('m=') with type, port, protocol, and formats
/// 2. Connection data ('c=') if present
/// 3. Media-level attributes ('a=')
impl std::fmt::Display for MediaDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "m={} {} {} {}\r\n",
            self.media_type,
            self.port,
            self.protocol,
            self.formats.join(" ")
        )?;

        if let Some(ref conn) = self.connection {
            write!(f, "{}", conn)?;
        }

        for attr in &self.attributes {
            write!(f, "{}", attr)?;
        }

        Ok(())
    }
}
