//! `types` models the `AudioObject` data model: a typed `Frame`, `HeaderInfo`
//! and `Tag`, plus sum types for the MPEG header enumerations (version,
//! layer, channel mode, emphasis) instead of raw indices.

use std::fmt;

use super::errors;
use super::Result;

/// The MPEG audio version, decoded from the 2-bit version id in a frame header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

impl MpegVersion {
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0b00 => Ok(MpegVersion::Mpeg25),
            0b10 => Ok(MpegVersion::Mpeg2),
            0b11 => Ok(MpegVersion::Mpeg1),
            _ => errors::invalid_sync(),
        }
    }
}

impl fmt::Display for MpegVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            MpegVersion::Mpeg1 => "MPEG Version 1 (ISO/IEC 11172-3)",
            MpegVersion::Mpeg2 => "MPEG Version 2 (ISO/IEC 13818-3)",
            MpegVersion::Mpeg25 => "MPEG Version 2.5",
        };
        write!(f, "{}", s)
    }
}

/// The MPEG audio layer, decoded from the 2-bit layer id in a frame header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layer {
    LayerI,
    LayerII,
    LayerIII,
}

impl Layer {
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0b11 => Ok(Layer::LayerI),
            0b10 => Ok(Layer::LayerII),
            0b01 => Ok(Layer::LayerIII),
            _ => errors::invalid_sync(),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Layer::LayerI => "Layer I",
            Layer::LayerII => "Layer II",
            Layer::LayerIII => "Layer III",
        };
        write!(f, "{}", s)
    }
}

/// The channel mode, decoded from the 2-bit channel mode field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

impl ChannelMode {
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0b00 => Ok(ChannelMode::Stereo),
            0b01 => Ok(ChannelMode::JointStereo),
            0b10 => Ok(ChannelMode::DualChannel),
            0b11 => Ok(ChannelMode::Mono),
            _ => errors::invalid_sync(),
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ChannelMode::Stereo => "Stereo",
            ChannelMode::JointStereo => "Joint Stereo",
            ChannelMode::DualChannel => "Dual Channel",
            ChannelMode::Mono => "Mono",
        };
        write!(f, "{}", s)
    }
}

/// The joint-stereo mode extension bits, reported as the two independent
/// flags the ISO header layout defines them as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct ModeExtension {
    pub intensity_stereo: bool,
    pub ms_stereo: bool,
}

impl ModeExtension {
    pub fn from_id(id: u8) -> Self {
        ModeExtension {
            intensity_stereo: id & 0b01 != 0,
            ms_stereo: id & 0b10 != 0,
        }
    }
}

/// The emphasis applied during encoding, decoded from the 2-bit emphasis field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Emphasis {
    None,
    FiftyFifteenMs,
    Reserved,
    CcittJ17,
}

impl Emphasis {
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0b00 => Ok(Emphasis::None),
            0b01 => Ok(Emphasis::FiftyFifteenMs),
            0b10 => Ok(Emphasis::Reserved),
            0b11 => Ok(Emphasis::CcittJ17),
            _ => errors::invalid_sync(),
        }
    }
}

impl fmt::Display for Emphasis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Emphasis::None => "None",
            Emphasis::FiftyFifteenMs => "50/15 ms",
            Emphasis::Reserved => "Reserved",
            Emphasis::CcittJ17 => "CCITT J.17",
        };
        write!(f, "{}", s)
    }
}

/// A single ID3v2 metadata frame: a 4-character identifier, its raw value
/// bytes (including a leading text-encoding byte, if the frame has one —
/// that byte is not stripped), and its 2-octet frame flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub identifier: String,
    pub value: Vec<u8>,
    pub flags: [u8; 2],
}

/// The leading ID3v2 header, present whenever the stream carries a tag
/// container before its first MPEG frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// `"ID3V2.<major>.<minor>"`, e.g. `"ID3V2.4.0"`.
    pub tag_version: String,
    pub has_footer: bool,
    pub experimental: bool,
    pub extended: bool,
    /// 0 or 1, mirroring the raw flag bit rather than a bool.
    pub unsynchronisation: u8,
    pub tag_size: usize,
}

/// One decoded MPEG audio frame: header fields plus the raw payload bytes
/// that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// 32-character `'0'`/`'1'` rendering of the header, MSB first.
    pub raw_header_bits: String,
    pub header_bytes: [u8; 4],
    pub mpeg_version_id: u8,
    pub mpeg_version: MpegVersion,
    pub layer_id: u8,
    pub layer: Layer,
    pub crc_protected: bool,
    pub bitrate_id: u8,
    /// kbit/s.
    pub bitrate: u32,
    pub sampling_rate_id: u8,
    /// Hz.
    pub sampling_rate: u32,
    pub padded: bool,
    pub private_bit: u8,
    pub channel: ChannelMode,
    pub mode_extension: ModeExtension,
    pub is_copyrighted: bool,
    pub is_original: bool,
    pub emphasis: Emphasis,
    /// Payload size in bytes, excluding the 4-octet header.
    pub size: usize,
    pub raw_data: Vec<u8>,
}

impl Frame {
    /// `true` for `Mono`, `false` for every stereo-family mode.
    pub fn is_mono(&self) -> bool {
        self.channel == ChannelMode::Mono
    }

    /// Duration of this single frame in seconds, derived from its already
    /// parsed sampling rate and layer (not a new parsing operation — Layer I
    /// frames carry 384 samples, Layer II/III carry 1152).
    pub fn duration_seconds(&self) -> f64 {
        let samples_per_frame = match self.layer {
            Layer::LayerI => 384.0,
            Layer::LayerII | Layer::LayerIII => 1152.0,
        };
        samples_per_frame / self.sampling_rate as f64
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}, {} kbit/s, {} Hz, {}",
            self.mpeg_version, self.layer, self.bitrate, self.sampling_rate, self.channel
        )
    }
}

/// The fully parsed representation of an `.mp3` byte stream: an optional
/// ID3v2 header descriptor, its tags in file order, and every MPEG frame in
/// stream order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioObject {
    pub header: Option<HeaderInfo>,
    pub tags: Vec<Tag>,
    pub frames: Vec<Frame>,
}

impl fmt::Display for AudioObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.header {
            Some(header) => writeln!(f, "| Tag version:   {}", header.tag_version)?,
            None => writeln!(f, "| Tag version:   (none)")?,
        }
        writeln!(f, "| Tags:          {}", self.tags.len())?;
        write!(f, "| Frames:        {}", self.frames.len())
    }
}
