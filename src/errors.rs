//! The `errors` module defines the common error types.

use std::error;
use std::fmt;

use super::Result;

/// `Error` enumerates every way decoding an ID3v2 container or an MPEG frame
/// header can fail. All variants are structural and fatal at the point raised;
/// there is no intra-stream recovery (see crate docs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A hex string handed to `HexToDecimal` contained a character outside `[0-9a-fA-F]`.
    InvalidHexCharacter(char),
    /// The sync scan reached the end of the buffer without matching the 11-bit frame sync.
    NoFrameFound,
    /// The ID3v2 synchsafe size field did not match the actual preamble length.
    TagSizeMismatch { expected: usize, actual: usize },
    /// `NewFrame` was invoked on four octets lacking the `0x7FF` sync pattern.
    InvalidSync,
    /// The bitrate index / version / layer combination has no table entry.
    InvalidBitrate {
        bitrate_id: u8,
        mpeg_version_id: u8,
        layer_id: u8,
    },
    /// The resolved sampling rate is the `Reserved` sentinel or non-positive.
    InvalidSamplingRate,
    /// The computed frame size (before subtracting the header) went negative.
    InvalidFrameSize(i64),
    /// The payload read returned fewer octets than the frame's declared size.
    TruncatedFrame { expected: usize, actual: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidHexCharacter(c) => write!(f, "invalid hex character: '{}'", c),
            Error::NoFrameFound => write!(f, "no MPEG frame sync found before end of buffer"),
            Error::TagSizeMismatch { expected, actual } => write!(
                f,
                "ID3v2 declared tag size {} does not match actual preamble length {}",
                expected, actual
            ),
            Error::InvalidSync => write!(f, "four octets handed to NewFrame lack the frame sync"),
            Error::InvalidBitrate {
                bitrate_id,
                mpeg_version_id,
                layer_id,
            } => write!(
                f,
                "no bitrate table entry for bitrate index {} (mpeg version id {}, layer id {})",
                bitrate_id, mpeg_version_id, layer_id
            ),
            Error::InvalidSamplingRate => {
                write!(f, "resolved sampling rate is reserved or non-positive")
            }
            Error::InvalidFrameSize(size) => write!(f, "computed frame size is negative: {}", size),
            Error::TruncatedFrame { expected, actual } => write!(
                f,
                "frame payload truncated: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl error::Error for Error {}

/// function to create an invalid-hex-character error.
pub fn invalid_hex_character<T>(c: char) -> Result<T> {
    Err(Error::InvalidHexCharacter(c))
}

/// function to create a no-frame-found error.
pub fn no_frame_found<T>() -> Result<T> {
    Err(Error::NoFrameFound)
}

/// function to create a tag-size-mismatch error.
pub fn tag_size_mismatch<T>(expected: usize, actual: usize) -> Result<T> {
    Err(Error::TagSizeMismatch { expected, actual })
}

/// function to create an invalid-sync error.
pub fn invalid_sync<T>() -> Result<T> {
    Err(Error::InvalidSync)
}

/// function to create an invalid-bitrate error.
pub fn invalid_bitrate<T>(bitrate_id: u8, mpeg_version_id: u8, layer_id: u8) -> Result<T> {
    Err(Error::InvalidBitrate {
        bitrate_id,
        mpeg_version_id,
        layer_id,
    })
}

/// function to create an invalid-sampling-rate error.
pub fn invalid_sampling_rate<T>() -> Result<T> {
    Err(Error::InvalidSamplingRate)
}

/// function to create an invalid-frame-size error.
pub fn invalid_frame_size<T>(size: i64) -> Result<T> {
    Err(Error::InvalidFrameSize(size))
}

/// function to create a truncated-frame error.
pub fn truncated_frame<T>(expected: usize, actual: usize) -> Result<T> {
    Err(Error::TruncatedFrame { expected, actual })
}
