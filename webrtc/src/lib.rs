//! # webrtc - WHIP publisher core
//!
//! A single-connection WebRTC-HTTP Ingestion Protocol (WHIP) publisher: one
//! HTTP offer/answer exchange, an ICE-Lite handshake, DTLS-SRTP keying, and
//! encrypted RTP/RTCP for exactly one video (H.264) and one audio (Opus)
//! stream.
//!
//! ## Public API
//!
//! - **`Session`** - drives the handshake and accepts encoded frames to send
//! - **`SessionConfig`** / **`SessionConfigBuilder`** - WHIP URL, timeouts, auth
//! - **`SessionError`** / **`SessionErrorKind`** - unified error surface
//! - **`VideoInput`** / **`AudioInput`** - unvalidated codec parameters passed to `Session::init`
//! - **`HttpClient`** / **`UreqHttpClient`** - the signaling transport, swappable for tests
//!
//! ## Example Usage
//!
//! ```no_run
//! use webrtc::{Session, SessionConfig, UreqHttpClient, VideoInput};
//! use logging::{Logger, LogLevel};
//!
//! let config = SessionConfig::builder()
//!     .whip_url("https://whip.example.com/publish")
//!     .authorization("Bearer token")
//!     .build();
//! let client = UreqHttpClient::new();
//! let logger = Logger::new("whip.log".into(), LogLevel::Info).unwrap();
//! let mut session = Session::new(config, &client, logger).unwrap();
//!
//! let extradata = std::fs::read("sps_pps.bin").unwrap();
//! session
//!     .init(
//!         Some(VideoInput { codec: "h264", has_b_frames: false, extradata: &extradata }),
//!         None,
//!     )
//!     .unwrap();
//! ```

mod codec_params;
mod config;
mod error;
mod http_client;
mod session;
mod signaler;

pub use codec_params::{AudioParams, VideoParams, parse_audio_params, parse_video_params};
pub use config::{SessionConfig, SessionConfigBuilder};
pub use error::{SessionError, SessionErrorKind};
pub use http_client::{HttpClient, HttpResponse, UreqHttpClient};
pub use session::{AudioInput, Session, SessionState, VideoInput};

// Re-exported so callers can construct `VideoInput`/`AudioInput` and read
// back parsed codec/SDP details without a direct dependency on the network
// and sdp crates.
pub use network::H264Extradata;
pub use sdp::{AnswerInfo, SdpError};
