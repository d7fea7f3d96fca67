//! Static lookup tables for sample rate and bitrate resolution. Read-only,
//! immutable, and shared across parser invocations without synchronization.
//!
//! A sentinel-string matrix mixing `"Reserved"` with integers is replaced
//! with `Option<u32>`; `None` is treated as a hard error at the point of use.

use super::errors;
use super::types::{Layer, MpegVersion};
use super::Result;

/// `[sample_rate_index][version_column]`. Version columns: 0 = MPEG-1,
/// 1 = MPEG-2, 2 = MPEG-2.5. Index 3 (reserved) is represented by the caller
/// never indexing this table with it — see `sample_rate`.
const SAMPLE_RATE_MATRIX: [[u32; 3]; 3] = [
    [44_100, 22_050, 11_025],
    [48_000, 24_000, 12_000],
    [32_000, 16_000, 8_000],
];

/// Resolves a sampling rate in Hz from its 2-bit index and the frame's MPEG
/// version. Index `0b11` is the reserved sentinel and always fails.
pub fn sample_rate(sampling_rate_id: u8, version: MpegVersion) -> Result<u32> {
    if sampling_rate_id == 0b11 {
        return errors::invalid_sampling_rate();
    }
    let column = match version {
        MpegVersion::Mpeg1 => 0,
        MpegVersion::Mpeg2 => 1,
        MpegVersion::Mpeg25 => 2,
    };
    Ok(SAMPLE_RATE_MATRIX[sampling_rate_id as usize][column])
}

/// `BITRATE_MATRIX[bitrate_index][column]`, kbit/s. `None` marks the
/// `free`/`bad` rows (index 0 and 15) of every column.
///
/// MPEG-1 gets one column per layer (0, 1, 2); MPEG-2 Layer III gets its own
/// column (3) while MPEG-2 Layer I *and* Layer II share column 4 — this
/// column layout is preserved exactly rather than "naturalized" into a
/// per-layer grouping (where Layer I would otherwise get its own column);
/// see DESIGN.md.
const BITRATE_MATRIX: [[Option<u32>; 5]; 16] = [
    [None, None, None, None, None],
    [Some(32), Some(32), Some(32), Some(32), Some(8)],
    [Some(64), Some(48), Some(40), Some(48), Some(16)],
    [Some(96), Some(56), Some(48), Some(56), Some(24)],
    [Some(128), Some(64), Some(56), Some(64), Some(32)],
    [Some(160), Some(80), Some(64), Some(80), Some(40)],
    [Some(192), Some(96), Some(80), Some(96), Some(48)],
    [Some(224), Some(112), Some(96), Some(112), Some(56)],
    [Some(256), Some(128), Some(112), Some(128), Some(64)],
    [Some(288), Some(160), Some(128), Some(144), Some(80)],
    [Some(320), Some(192), Some(160), Some(160), Some(96)],
    [Some(352), Some(224), Some(192), Some(176), Some(112)],
    [Some(384), Some(256), Some(224), Some(192), Some(128)],
    [Some(416), Some(320), Some(256), Some(224), Some(144)],
    [Some(448), Some(384), Some(320), Some(256), Some(160)],
    [None, None, None, None, None],
];

/// Resolves a bitrate in kbit/s from its 4-bit index, the frame's MPEG
/// version, and its layer. MPEG-2.5 has no defined bitrate column and
/// always fails here (see DESIGN.md's Open Question on this).
pub fn bitrate(bitrate_id: u8, version: MpegVersion, layer: Layer) -> Result<u32> {
    let column = match (version, layer) {
        (MpegVersion::Mpeg1, Layer::LayerI) => 0,
        (MpegVersion::Mpeg1, Layer::LayerII) => 1,
        (MpegVersion::Mpeg1, Layer::LayerIII) => 2,
        (MpegVersion::Mpeg2, Layer::LayerIII) => 3,
        (MpegVersion::Mpeg2, Layer::LayerI) => 4,
        (MpegVersion::Mpeg2, Layer::LayerII) => 4,
        (MpegVersion::Mpeg25, _) => {
            return errors::invalid_bitrate(bitrate_id, version_id(version), layer_id(layer))
        }
    };

    match BITRATE_MATRIX
        .get(bitrate_id as usize)
        .and_then(|row| row[column])
    {
        Some(rate) => Ok(rate),
        None => errors::invalid_bitrate(bitrate_id, version_id(version), layer_id(layer)),
    }
}

fn version_id(version: MpegVersion) -> u8 {
    match version {
        MpegVersion::Mpeg25 => 0b00,
        MpegVersion::Mpeg2 => 0b10,
        MpegVersion::Mpeg1 => 0b11,
    }
}

fn layer_id(layer: Layer) -> u8 {
    match layer {
        Layer::LayerIII => 0b01,
        Layer::LayerII => 0b10,
        Layer::LayerI => 0b11,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rate_mpeg1() {
        assert_eq!(sample_rate(0b00, MpegVersion::Mpeg1).unwrap(), 44_100);
        assert_eq!(sample_rate(0b10, MpegVersion::Mpeg1).unwrap(), 32_000);
    }

    #[test]
    fn sample_rate_reserved_index_fails() {
        assert!(sample_rate(0b11, MpegVersion::Mpeg1).is_err());
    }

    #[test]
    fn bitrate_mpeg1_layer3_128() {
        assert_eq!(bitrate(9, MpegVersion::Mpeg1, Layer::LayerIII).unwrap(), 128);
    }

    #[test]
    fn bitrate_free_and_bad_index_fail() {
        assert!(bitrate(0, MpegVersion::Mpeg1, Layer::LayerI).is_err());
        assert!(bitrate(15, MpegVersion::Mpeg1, Layer::LayerI).is_err());
    }

    #[test]
    fn bitrate_mpeg25_always_fails() {
        assert!(bitrate(5, MpegVersion::Mpeg25, Layer::LayerIII).is_err());
    }
}
