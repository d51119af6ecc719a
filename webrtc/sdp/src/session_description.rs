//! Complete SDP session description.
//!
//! This module provides the main `SessionDescription` type that represents
//! a complete SDP message according to RFC 4566.

use crate::{
    attribute::Attribute, connection::Connection, errors::SdpError,
    media_description::MediaDescription, origin::Origin, sdp_type::SdpType,
    session_description_builder::SessionDescriptionBuilder, timing::Timing,
};

/// Represents a complete Session Description according to RFC 4566.
#[derive(Debug, Clone)]
pub struct SessionDescription {
    pub sdp_type: SdpType,
    pub version: i32,
    pub origin: Origin,
    pub session_name: String,
    pub timing: Timing,
    pub media: Vec<MediaDescription>,
    pub attributes: Vec<Attribute>,
    pub connection: Option<Connection>,
}

/// Represents the different types of SDP lines for pattern matching.
enum SdpLineType {
    Version,
    Origin,
    SessionName,
    Timing,
    Connection,
    Media,
    Attribute,
    Unknown,
}

impl From<char> for SdpLineType {
    fn from(c: char) -> Self {
        match c {
            'v' => Self::Version,
            'o' => Self::Origin,
            's' => Self::SessionName,
            't' => Self::Timing,
            'c' => Self::Connection,
            'm' => Self::Media,
            'a' => Self::Attribute,
            _ => Self::Unknown,
        }
    }
}

impl SessionDescription {
    /// Creates a new empty `SessionDescription` with default values.
    ///
    /// # Arguments
    /// * `sdp_type` - The type of SDP message (Offer or Answer)
    ///
    /// # Returns
    /// A new `SessionDescription` instance with default values for all fields
    pub fn new(sdp_type: SdpType) -> Self {
        Self {
            sdp_type,
            ..Default::default()
        }
    }

    /// Creates a builder for constructing `SessionDescription` instances.
    ///
    /// # Arguments
    /// * `sdp_type` - The type of SDP message (Offer or Answer)
    ///
    /// # Returns
    /// A new `SessionDescriptionBuilder` instance
    pub fn builder(sdp_type: SdpType) -> SessionDescriptionBuilder {
        SessionDescriptionBuilder::new(sdp_type)
    }

    /// Parses an SDP string into a `SessionDescription`.
    ///
    /// # Arguments
    /// * `sdp_type` - The type of SDP message (Offer or Answer)
    /// * `sdp_str` - The SDP message string to parse
    ///
    /// # Returns
    /// * `Ok(SessionDescription)` - A fully parsed session description
    /// * `Err(SdpError)` - If there's any error in the SDP format or content
    pub fn parse(sdp_type: SdpType, sdp_str: &str) -> Result<Self, SdpError> {
        let mut session = SessionDescription::new(sdp_type);
        let mut current_media: Option<MediaDescription> = None;

        for line in sdp_str.lines() {
            if line.is_empty() {
                continue;
            }

            let (type_char, value) = Self::split_line(line)?;
            Self::process_line(&mut session, &mut current_media, type_char, value)?;
        }

        if let Some(media) = current_media {
            session.media.push(media);
        }

        session.validate()?;
        Ok(session)
    }

    /// Splits an SDP line into its type character and value components.
    ///
    /// Each SDP line must be in the format `<type>=<value>` where `type` is
    /// a single character followed by '=' and `value` is the rest of the line.
    ///
    /// # Arguments
    /// * `line` - The SDP line to split
    ///
    /// # Returns
    /// * `Ok((char, &str))` - The type character and value
    /// * `Err(SdpError)` - If the line format is invalid
    fn split_line(line: &str) -> Result<(char, &str), SdpError> {
        let mut parts = line.splitn(2, '=');

        let type_str = parts.next().ok_or(SdpError::InvalidLineFormat)?;
        let value = parts.next().ok_or(SdpError::InvalidLineFormat)?;

        let type_char = type_str.chars().next().ok_or(SdpError::EmptyTypeChar)?;

        if type_str.len() != 1 {
            return Err(SdpError::InvalidLineFormat);
        }

        Ok((type_char, value))
    }

    /// Processes a single line of SDP and updates the session accordingly.
    ///
    /// # Arguments
    /// * `session` - The session description to update
    /// * `current_media` - The current media section being parsed, if any
    /// * `type_char` - The type character from the SDP line
    /// * `value` - The value part of the SDP line
    ///
    /// # Returns
    /// * `Ok(())` - If the line was processed successfully
    /// * `Err(SdpError)` - If there was an error processing the line
    fn process_line(
        session: &mut Self,
        current_media: &mut Option<MediaDescription>,
        type_char: char,
        value: &str,
    ) -> Result<(), SdpError> {
        match SdpLineType::from(type_char) {
            SdpLineType::Version => session.set_version(value),
            SdpLineType::Origin => session.set_origin(value),
            SdpLineType::SessionName => session.set_session_name(value),
            SdpLineType::Timing => session.set_timing(value),
            SdpLineType::Connection => session.set_connection(current_media, value),
            SdpLineType::Media => session.set_media(current_media, value),
            SdpLineType::Attribute => session.set_attribute(current_media, value),
            SdpLineType::Unknown => Ok(()),
        }
    }

    /// Sets the SDP version number.
    ///
    /// According to RFC 4566, the version must be zero (0).
    ///
    /// # Arguments
    /// * `value` - The version string to parse
    fn set_version(&mut self, value: &str) -> Result<(), SdpError> {
        self.version = value.parse().map_err(|_| SdpError::InvalidVersion)?;
        Ok(())
    }

    /// Sets the origin field.
    ///
    /// The origin field identifies the session creator and a session identifier.
    ///
    /// # Arguments
    /// * `value` - The origin string to parse
    fn set_origin(&mut self, value: &str) -> Result<(), SdpError> {
        self.origin = Origin::parse(value)?;
        Ok(())
    }

    /// Sets the session name.
    ///
    /// The session name provides a human-readable identifier for the session.
    ///
    /// # Arguments
    /// * `value` - The session name
    fn set_session_name(&mut self, value: &str) -> Result<(), SdpError> {
        self.session_name = value.to_string();
        Ok(())
    }

    /// Sets the timing information.
    ///
    /// The timing field specifies when the session starts and stops.
    ///
    /// # Arguments
    /// * `value` - The timing string to parse
    fn set_timing(&mut self, value: &str) -> Result<(), SdpError> {
        self.timing = Timing::parse(value)?;
        Ok(())
    }

    /// Sets the connection data.
    ///
    /// Connection data can appear at the session level and/or in media descriptions.
    ///
    /// # Arguments
    /// * `current_media` - The current media section being parsed, if any
    /// * `value` - The connection data string to parse
    fn set_connection(
        &mut self,
        current_media: &mut Option<MediaDescription>,
        value: &str,
    ) -> Result<(), SdpError> {
        let conn = Connection::parse(value)?;
        match current_media.as_mut() {
            Some(media) => media.connection = Some(conn),
            None => self.connection = Some(conn),
        }
        Ok(())
    }

    /// Sets a media description.
    ///
    /// # Arguments
    /// * `current_media` - The current media section being parsed
    /// * `value` - The media description string to parse
    fn set_media(
        &mut self,
        current_media: &mut Option<MediaDescription>,
        value: &str,
    ) -> Result<(), SdpError> {
        if let Some(media) = current_media.take() {
            self.media.push(media);
        }
        *current_media = Some(MediaDescription::parse(value)?);
        Ok(())
    }

    /// Sets an attribute.
    ///
    /// # Arguments
    /// * `current_media` - The current media section being parsed, if any
    /// * `value` - The attribute string to parse
    fn set_attribute(
        &mut self,
        current_media: &mut Option<MediaDescription>,
        value: &str,
    ) -> Result<(), SdpError> {
        let attr = Attribute::parse(value)?;
        match current_media.as_mut() {
            Some(media) => media.attributes.push(attr),
            None => self.attributes.push(attr),
        }
        Ok(())
    }

    /// Validates the SDP session description according to RFC 4566.
    ///
    /// This method checks:
    /// - Version number is 0
    /// - Origin field is valid
    /// - Session name is not empty
    /// - Timing information is valid
    /// - At least one media section is present
    /// - All media sections are valid
    ///
    /// # Returns
    /// * `Ok(())` - If the session description is valid
    /// * `Err(SdpError)` - If any validation check fails
    pub fn validate(&self) -> Result<(), SdpError> {
        // Validate version
        if self.version != 0 {
            return Err(SdpError::InvalidVersionNumber);
        }

        // Validate origin
        self.origin.validate()?;

        // Session name must not be empty
        if self.session_name.is_empty() {
            return Err(SdpError::EmptySessionName);
        }

        // Validate timing
        self.timing.validate()?;

        // Validate media sections
        if self.media.is_empty() {
            return Err(SdpError::NoMediaSections);
        }

        for media in &self.media {
            media.validate()?;
        }

        Ok(())
    }
}

/// Provides a default implementation for [`SessionDescription`].
impl Default for SessionDescription {
    fn default() -> Self {
        Self {
            sdp_type: SdpType::Offer,
            version: 0,
            origin: Origin::default(),
            session_name: String::from("-"),
            timing: Timing::default(),
            media: Vec::new(),
            attributes: Vec::new(),
            connection: None,
        }
    }
}

/// Implements the Display trait to format a session description according to RFC 4566.
///
/// The session description is formatted in the standard SDP format with the following order:
/// 1. Protocol version ('v=')
/// 2. Origin ('o=')
/// 3. Session name ('s=')
/// 4. Connection data ('c=') if present
/// 5. Timing ('t=')
/// 6. Session-level attributes ('a=')
/// 7. Media descriptions ('m=') with their attributes
///
/// Each line is terminated with a CRLF as per RFC 4566.
impl std::fmt::Display for SessionDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "v={}", self.version)?;
        write!(f, "{}", self.origin)?;
        writeln!(f, "s={}", self.session_name)?;
        if let Some(ref conn) = self.connection {
            write!(f, "{}", conn)?;
        }
        write!(f, "{}", self.timing)?;

        for attr in &self.attributes {
            write!(f, "{}", attr)?;
        }

        for media in &self.media {
            write!(f, "{}", media)?;
        }

        Ok(())
    }
}
