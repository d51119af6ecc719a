//! H.264 extradata parsing (ISOM AVCC `avcC` box contents) with an
//! annex-B-presence fallback check, per RFC 6184 / ISO 14496-15.

use crate::error::{NetworkError, Result};

const NAL_START_CODE_4: &[u8] = &[0x00, 0x00, 0x00, 0x01];
const NAL_START_CODE_3: &[u8] = &[0x00, 0x00, 0x01];

/// Parsed H.264 out-of-band parameter sets and NAL framing mode.
#[derive(Debug, Clone)]
pub struct H264Extradata {
    pub sps: Vec<u8>,
    pub pps: Vec<u8>,
    /// AVCC length-prefix size in bytes (1, 2, or 4), or `0` for annex-B.
    pub nal_length_size: u8,
}

impl H264Extradata {
    pub fn is_avcc(&self) -> bool {
        self.nal_length_size != 0
    }

    /// Synthesizes the access unit to inject immediately before an IDR:
    /// SPS followed by PPS, each framed per the detected mode.
    pub fn sps_pps_access_unit(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.sps.len() + self.pps.len() + 16);
        if self.is_avcc() {
            append_length_prefixed(&mut out, &self.sps, self.nal_length_size);
            append_length_prefixed(&mut out, &self.pps, self.nal_length_size);
        } else {
            out.extend_from_slice(NAL_START_CODE_4);
            out.extend_from_slice(&self.sps);
            out.extend_from_slice(NAL_START_CODE_4);
            out.extend_from_slice(&self.pps);
        }
        out
    }
}

fn append_length_prefixed(out: &mut Vec<u8>, nal: &[u8], length_size: u8) {
    let len = nal.len() as u32;
    match length_size {
        1 => out.push(len as u8),
        2 => out.extend_from_slice(&(len as u16).to_be_bytes()),
        4 => out.extend_from_slice(&len.to_be_bytes()),
        _ => unreachable!("nal_length_size validated to {{1,2,4}} at parse time"),
    }
    out.extend_from_slice(nal);
}

/// Parses H.264 extradata, detecting ISOM AVCC (`avcC`) layout by
/// `extradata[0] == 1`; otherwise requires an annex-B start code to be
/// present, with the SPS/PPS extracted from the start-coded NALs
/// themselves (`nal_length_size = 0`).
pub fn parse_extradata(extradata: &[u8]) -> Result<H264Extradata> {
    if extradata.len() >= 4 && extradata[0] == 1 {
        return parse_avcc(extradata);
    }

    if contains_annex_b_start_code(extradata) {
        return parse_annex_b(extradata);
    }

    Err(NetworkError::Rtp(
        "extradata is neither AVCC nor annex-B".to_string(),
    ))
}

fn contains_annex_b_start_code(data: &[u8]) -> bool {
    data.windows(4).any(|w| w == NAL_START_CODE_4) || data.windows(3).any(|w| w == NAL_START_CODE_3)
}

/// Extracts the first SPS (type 7) and first PPS (type 8) NAL from
/// start-coded annex-B extradata.
fn parse_annex_b(data: &[u8]) -> Result<H264Extradata> {
    let nals = split_annex_b_nals(data);

    let sps = nals.iter().find(|nal| !nal.is_empty() && (nal[0] & 0x1F) == 7).cloned();
    let pps = nals.iter().find(|nal| !nal.is_empty() && (nal[0] & 0x1F) == 8).cloned();

    match (sps, pps) {
        (Some(sps), Some(pps)) => Ok(H264Extradata { sps, pps, nal_length_size: 0 }),
        _ => Err(NetworkError::Rtp(
            "annex-B extradata missing SPS or PPS NAL".to_string(),
        )),
    }
}

/// Splits start-coded annex-B data into individual NAL units (start codes
/// stripped), mirroring the packetizer's own annex-B scan.
fn split_annex_b_nals(data: &[u8]) -> Vec<Vec<u8>> {
    let mut nal_units = Vec::new();
    let mut start = 0;
    let mut i = 0;
    let mut have_start = false;

    while i < data.len() {
        if i + 3 <= data.len() && &data[i..i + 3] == NAL_START_CODE_3 {
            if have_start {
                nal_units.push(data[start..i].to_vec());
            }
            start = i + 3;
            have_start = true;
            i += 3;
        } else if i + 4 <= data.len() && &data[i..i + 4] == NAL_START_CODE_4 {
            if have_start {
                nal_units.push(data[start..i].to_vec());
            }
            start = i + 4;
            have_start = true;
            i += 4;
        } else {
            i += 1;
        }
    }

    if have_start && start < data.len() {
        nal_units.push(data[start..].to_vec());
    }

    nal_units
}

fn parse_avcc(data: &[u8]) -> Result<H264Extradata> {
    let mut offset = 4; // version(1) + profile/compat/level(3)

    if data.len() <= offset {
        return Err(NetworkError::Rtp("AVCC extradata truncated".to_string()));
    }
    let length_size_minus_one = data[offset] & 0x03;
    if length_size_minus_one == 2 {
        return Err(NetworkError::Rtp(
            "AVCC nal_length_size_minus_one=2 is reserved/invalid".to_string(),
        ));
    }
    let nal_length_size = length_size_minus_one + 1;
    offset += 1;

    if data.len() <= offset {
        return Err(NetworkError::Rtp("AVCC extradata truncated".to_string()));
    }
    let nb_sps = data[offset] & 0x1F;
    if nb_sps != 1 {
        return Err(NetworkError::Rtp(format!(
            "expected exactly one SPS, found {}",
            nb_sps
        )));
    }
    offset += 1;

    let (sps, next) = read_length_prefixed(data, offset)?;
    offset = next;

    if data.len() <= offset {
        return Err(NetworkError::Rtp("AVCC extradata truncated".to_string()));
    }
    let nb_pps = data[offset];
    if nb_pps != 1 {
        return Err(NetworkError::Rtp(format!(
            "expected exactly one PPS, found {}",
            nb_pps
        )));
    }
    offset += 1;

    let (pps, _next) = read_length_prefixed(data, offset)?;

    Ok(H264Extradata {
        sps,
        pps,
        nal_length_size,
    })
}

fn read_length_prefixed(data: &[u8], offset: usize) -> Result<(Vec<u8>, usize)> {
    if data.len() < offset + 2 {
        return Err(NetworkError::Rtp("AVCC extradata truncated".to_string()));
    }
    let size = u16::from_be_bytes([data[offset], data[offset + 1]]) as usize;
    let start = offset + 2;
    let end = start + size;
    if data.len() < end {
        return Err(NetworkError::Rtp("AVCC extradata truncated".to_string()));
    }
    Ok((data[start..end].to_vec(), end))
}
