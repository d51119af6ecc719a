//! Codec-parameter validation for the one video and one audio stream this
//! core accepts: H.264 baseline/constrained-baseline (no B-frames) and
//! stereo Opus at 48 kHz.

use crate::error::{SessionError, SessionErrorKind};
use network::H264Extradata;

pub const VIDEO_PAYLOAD_TYPE: u8 = 106;
pub const AUDIO_PAYLOAD_TYPE: u8 = 111;
const OPUS_SAMPLE_RATE: u32 = 48000;
const OPUS_CHANNELS: u8 = 2;

/// Validated H.264 video stream parameters.
#[derive(Debug, Clone)]
pub struct VideoParams {
    pub payload_type: u8,
    pub extradata: H264Extradata,
}

/// Validated Opus audio stream parameters.
#[derive(Debug, Clone, Copy)]
pub struct AudioParams {
    pub payload_type: u8,
}

fn configuration_error(message: impl Into<String>) -> SessionError {
    SessionError::new(SessionErrorKind::Configuration, message)
}

/// Validates a video stream's codec name and B-frame flag, then parses its
/// extradata. Only H.264 without B-frames is accepted.
pub fn parse_video_params(
    codec: &str,
    has_b_frames: bool,
    extradata: &[u8],
) -> Result<VideoParams, SessionError> {
    if !codec.eq_ignore_ascii_case("h264") {
        return Err(configuration_error(format!(
            "unsupported video codec: {} (only H.264 is supported)",
            codec
        )));
    }
    if has_b_frames {
        return Err(configuration_error(
            "B-frames are not supported".to_string(),
        ));
    }

    let extradata = network::parse_extradata(extradata)
        .map_err(|e| configuration_error(e.to_string()))?;

    Ok(VideoParams { payload_type: VIDEO_PAYLOAD_TYPE, extradata })
}

/// Validates an audio stream: only stereo Opus at 48 kHz is accepted.
pub fn parse_audio_params(
    codec: &str,
    sample_rate: u32,
    channels: u8,
) -> Result<AudioParams, SessionError> {
    if !codec.eq_ignore_ascii_case("opus") {
        return Err(configuration_error(format!(
            "unsupported audio codec: {} (only Opus is supported)",
            codec
        )));
    }
    if sample_rate != OPUS_SAMPLE_RATE {
        return Err(configuration_error(format!(
            "unsupported Opus sample rate: {} (only {} Hz is supported)",
            sample_rate, OPUS_SAMPLE_RATE
        )));
    }
    if channels != OPUS_CHANNELS {
        return Err(configuration_error(format!(
            "unsupported Opus channel count: {} (only stereo is supported)",
            channels
        )));
    }

    Ok(AudioParams { payload_type: AUDIO_PAYLOAD_TYPE })
}
