//! Builder pattern for SDP session descriptions.
//!
//! Provides a fluent API for constructing SDP session descriptions
//! with validation.

use crate::{
    attribute::Attribute, connection::Connection, errors::SdpError,
    media_description::MediaDescription, origin::Origin, sdp_type::SdpType,
    session_description::SessionDescription, timing::Timing,
};

/// Builder for constructing `SessionDescription` instances.
pub struct SessionDescriptionBuilder {
    session: SessionDescription,
}

impl SessionDescriptionBuilder {
    /// Creates a new builder with the specified SDP type.
    ///
    /// # Arguments
    /// * `sdp_type` - The type of SDP message (Offer or Answer)
    pub fn new(sdp_type: SdpType) -> Self {
        Self {
            session: SessionDescription::new(sdp_type),
        }
    }

    /// Sets the origin field.
    ///
    /// # Arguments
    /// * `origin` - The origin information for the session
    pub fn origin(mut self, origin: Origin) -> Self {
        self.session.origin = origin;
        self
    }

    /// Sets the session name.
    ///
    /// # Arguments
    /// * `name` - The session name (can be any type that converts to String)
    pub fn session_name(mut self, name: impl Into<String>) -> Self {
        self.session.session_name = name.into();
        self
    }

    /// Sets the timing information.
    ///
    /// # Arguments
    /// * `timing` - The timing information for the session
    pub fn timing(mut self, timing: Timing) -> Self {
        self.session.timing = timing;
        self
    }

    /// Sets the connection information.
    ///
    /// # Arguments
    /// * `connection` - The connection information for the session
    pub fn connection(mut self, connection: Connection) -> Self {
        self.session.connection = Some(connection);
        self
    }

    /// Adds a media description to the session.
    ///
    /// # Arguments
    /// * `media` - The media description to add
    pub fn add_media(mut self, media: MediaDescription) -> Self {
        self.session.media.push(media);
        self
    }

    /// Adds an attribute to the session.
    ///
    /// # Arguments
    /// * `attr` - The attribute to add
    pub fn add_attribute(mut self, attr: Attribute) -> Self {
        self.session.attributes.push(attr);
        self
    }

    /// Adds ICE credentials to the session.
    ///
    /// # Arguments
    /// * `ufrag` - ICE username fragment
    /// * `pwd` - ICE password
    ///
    /// # Example
    /// ```no_run
    /// use sdp::{SessionDescriptionBuilder, SdpType};
    ///
    /// let sdp = SessionDescriptionBuilder::new(SdpType::Offer)
    ///     .ice_credentials("abcd1234", "secret_password_here")
    ///     // ... other fields
    ///     .build();
    /// ```
    pub fn ice_credentials(mut self, ufrag: &str, pwd: &str) -> Self {
        self.session.attributes.push(Attribute {
            name: "ice-ufrag".to_string(),
            value: Some(ufrag.to_string()),
        });
        self.session.attributes.push(Attribute {
            name: "ice-pwd".to_string(),
            value: Some(pwd.to_string()),
        });
        self
    }

    /// Adds ICE candidates to the session.
    ///
    /// # Arguments
    /// * `candidates` - Vector of ICE candidate strings in SDP format
    ///
    /// # Example
    /// ```no_run
    /// use sdp::{SessionDescriptionBuilder, SdpType};
    ///
    /// let candidates = vec![
    ///     "candidate:1 1 UDP 2130706431 192.168.1.5 5000 typ host".to_string(),
    ///     "candidate:2 1 UDP 1694498815 203.0.113.10 5000 typ srflx raddr 192.168.1.5 rport 5000".to_string(),
    /// ];
    ///
    /// let sdp = SessionDescriptionBuilder::new(SdpType::Offer)
    ///     .ice_candidates(&candidates)
    ///     // ... other fields
    ///     .build();
    /// ```
    pub fn ice_candidates(mut self, candidates: &[String]) -> Self {
        for candidate in candidates {
            self.session.attributes.push(Attribute {
                name: "candidate".to_string(),
                value: Some(candidate.clone()),
            });
        }
        self
    }

    /// Adds a single ICE candidate to the session.
    ///
    /// # Arguments
    /// * `candidate` - ICE candidate string in SDP format
    pub fn add_ice_candidate(mut self, candidate: &str) -> Self {
        self.session.attributes.push(Attribute {
            name: "candidate".to_string(),
            value: Some(candidate.to_string()),
        });
        self
    }

    /// Builds and validates the `SessionDescription`.
    ///
    /// # Returns
    /// * `Ok(SessionDescription)` - If the session description is valid
    /// * `Err(SdpError)` - If validation fails
    pub fn build(self) -> Result<SessionDescription, SdpError> {
        self.session.validate()?;
        Ok(self.session)
    }
}
