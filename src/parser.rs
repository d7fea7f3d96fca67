//! `parser` holds the static lookup tables' entry points and the top-level
//! parse pipeline: align, read the leading ID3v2 container, then read frames
//! until the buffer is exhausted.

use super::cursor::ByteCursor;
use super::errors;
use super::tables;
use super::types::{
    AudioObject, ChannelMode, Emphasis, Frame, HeaderInfo, Layer, ModeExtension, MpegVersion, Tag,
};
use super::Result;

/// Constructor-time configuration. The only recognized option mirrors the
/// `{Debug: bool}` record: it gates diagnostic logging and never
/// changes parsed output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserConfig {
    pub debug: bool,
}

/// Parses a fully materialized MPEG/ID3v2 byte buffer into an `AudioObject`.
/// This is the crate's single public entry point, mirroring a one-obvious-way
/// constructor over hand-rolled alternatives.
pub fn parse_bytes(buffer: &[u8], config: ParserConfig) -> Result<AudioObject> {
    MpegParser::new(buffer, config).parse()
}

/// Holds a `ByteCursor` over the input buffer plus the parse configuration.
/// Owns no other mutable state — the static lookup tables it consults live
/// in `tables` and are read-only.
pub struct MpegParser<'b> {
    cursor: ByteCursor<'b>,
    config: ParserConfig,
}

impl<'b> MpegParser<'b> {
    pub fn new(buffer: &'b [u8], config: ParserConfig) -> Self {
        MpegParser {
            cursor: ByteCursor::new(buffer),
            config,
        }
    }

    /// Runs the full pipeline: align → read header → read frames.
    pub fn parse(&mut self) -> Result<AudioObject> {
        let preamble = self.align()?;
        let (header, tags) = Self::read_header(&preamble)?;

        let mut frames = Vec::new();
        while self.cursor.position() < self.cursor.len() {
            let header_bytes = self.cursor.read(3, false);
            if header_bytes.len() < 4 {
                break;
            }
            let frame = self.new_frame(&header_bytes)?;
            frames.push(frame);
        }

        Ok(AudioObject {
            header,
            tags,
            frames,
        })
    }

    /// Consumes the buffer one octet at a time, accumulating into what
    /// doubles as the pending ID3v2 container, until the last four
    /// accumulated octets form a valid frame sync. Rewinds the cursor by 4
    /// and strips those bytes from the accumulator tail before returning it.
    fn align(&mut self) -> Result<Vec<u8>> {
        let mut accumulator: Vec<u8> = Vec::new();

        loop {
            let next = self.cursor.read(0, false);
            if next.is_empty() {
                return errors::no_frame_found();
            }
            accumulator.extend_from_slice(&next);

            if Self::possible_frame(&accumulator) {
                self.cursor.rewind(4);
                let new_len = accumulator.len() - 4;
                accumulator.truncate(new_len);
                return Ok(accumulator);
            }
        }
    }

    /// Tests whether the last four octets of `window` (in buffer order) form
    /// a valid 11-bit frame sync prefix. A window shorter than four octets
    /// never matches.
    fn possible_frame(window: &[u8]) -> bool {
        if window.len() < 4 {
            return false;
        }
        let tail = &window[window.len() - 4..];
        tail[0] == 0xFF && (tail[1] & 0xE0) == 0xE0
    }

    /// Decodes the leading ID3v2 header and its tag frames from the bytes
    /// accumulated before the first MPEG frame sync. An empty or
    /// too-short-to-contain-a-preamble accumulator yields an empty header and
    /// an empty tag list — both are valid output.
    fn read_header(header_bytes: &[u8]) -> Result<(Option<HeaderInfo>, Vec<Tag>)> {
        const PREAMBLE_LEN: usize = 10;

        if header_bytes.len() < PREAMBLE_LEN {
            return Ok((None, Vec::new()));
        }

        let major = header_bytes[3];
        let minor = header_bytes[4];
        let flags = header_bytes[5];

        let unsynchronisation = if flags & 0b1000_0000 != 0 { 1 } else { 0 };
        let extended = flags & 0b0100_0000 != 0;
        let experimental = flags & 0b0010_0000 != 0;
        let has_footer = flags & 0b0001_0000 != 0;

        let expected_size = Self::synchsafe_size(&header_bytes[6..10]);
        let actual_size = header_bytes.len() - PREAMBLE_LEN;

        if expected_size != actual_size {
            return errors::tag_size_mismatch(expected_size, actual_size);
        }

        let header = HeaderInfo {
            tag_version: format!("ID3V2.{}.{}", major, minor),
            has_footer,
            experimental,
            extended,
            unsynchronisation,
            tag_size: expected_size,
        };

        let tags = Self::read_tag_frames(header_bytes, PREAMBLE_LEN + expected_size);

        Ok((Some(header), tags))
    }

    /// Reads tag frames starting right after the 10-octet preamble, until
    /// `end` (the declared tag size boundary) is reached. Each iteration
    /// advances by `10 + Size`; the per-frame size is plain big-endian, not
    /// synchsafe (see DESIGN.md).
    fn read_tag_frames(header_bytes: &[u8], end: usize) -> Vec<Tag> {
        let mut tags = Vec::new();
        let mut offset = 10usize;

        while offset < end {
            if offset + 10 > header_bytes.len() {
                break;
            }

            let identifier = ByteCursor::byte_arr_to_ascii(&header_bytes[offset..offset + 4]);
            let size = u32::from_be_bytes([
                header_bytes[offset + 4],
                header_bytes[offset + 5],
                header_bytes[offset + 6],
                header_bytes[offset + 7],
            ]) as usize;
            let flags = [header_bytes[offset + 8], header_bytes[offset + 9]];

            let value_start = offset + 10;
            let value_end = (value_start + size).min(header_bytes.len());
            let value = header_bytes[value_start..value_end].to_vec();

            let is_padding = size == 0 && header_bytes[offset] == 0x00;
            if !is_padding {
                tags.push(Tag {
                    identifier,
                    value,
                    flags,
                });
            }

            // Cooperative scheduling hook: a no-op here, since parsing is
            // synchronous and single-threaded in this crate.

            offset += 10 + size;
        }

        tags
    }

    /// `(b7 << 21) | (b8 << 14) | (b9 << 7) | b10` — the ID3v2 synchsafe
    /// 28-bit size encoding.
    fn synchsafe_size(bytes: &[u8]) -> usize {
        ((bytes[0] as usize) << 21)
            | ((bytes[1] as usize) << 14)
            | ((bytes[2] as usize) << 7)
            | (bytes[3] as usize)
    }

    /// Decodes a single MPEG frame header from exactly four octets and reads
    /// its payload from the cursor. `header_bytes` must pass `possible_frame`.
    fn new_frame(&mut self, header_bytes: &[u8]) -> Result<Frame> {
        if !Self::possible_frame(header_bytes) {
            return errors::invalid_sync();
        }

        let header_u32 = ByteCursor::get32_bit_int(&header_bytes[0..4])?;
        let raw_header_bits = ByteCursor::byte_arr_to_binary(&header_bytes[0..4]);

        let mpeg_version_id = ((header_u32 >> 19) & 0b11) as u8;
        let layer_id = ((header_u32 >> 17) & 0b11) as u8;
        let crc_protected = (header_u32 >> 16) & 1 == 0;
        let bitrate_id = ((header_u32 >> 12) & 0b1111) as u8;
        let sampling_rate_id = ((header_u32 >> 10) & 0b11) as u8;
        let padded = (header_u32 >> 9) & 1 == 1;
        let private_bit = ((header_u32 >> 8) & 1) as u8;
        let channel_mode_id = ((header_u32 >> 6) & 0b11) as u8;
        let mode_extension_id = ((header_u32 >> 4) & 0b11) as u8;
        let is_copyrighted = (header_u32 >> 3) & 1 == 1;
        let is_original = (header_u32 >> 2) & 1 == 1;
        let emphasis_id = (header_u32 & 0b11) as u8;

        let mpeg_version = MpegVersion::from_id(mpeg_version_id)?;
        let layer = Layer::from_id(layer_id)?;
        let channel = ChannelMode::from_id(channel_mode_id)?;
        let mode_extension = ModeExtension::from_id(mode_extension_id);
        let emphasis = Emphasis::from_id(emphasis_id)?;

        let sampling_rate = tables::sample_rate(sampling_rate_id, mpeg_version)?;
        let bitrate = tables::bitrate(bitrate_id, mpeg_version, layer)?;

        let size = Self::frame_size(layer, bitrate, sampling_rate, padded)? as usize;

        if self.config.debug {
            tracing::debug!(
                version = %mpeg_version,
                layer = %layer,
                bitrate,
                sampling_rate,
                size,
                "decoded MPEG frame header"
            );
        }

        let raw_data = if size == 0 {
            Vec::new()
        } else {
            // Read(n) yields n + 1 octets, so the call site asks for one
            // less than the payload size it actually wants.
            self.cursor.read(size - 1, false)
        };

        if raw_data.len() != size {
            if self.config.debug {
                tracing::warn!(
                    expected = size,
                    actual = raw_data.len(),
                    "frame payload truncated before end of buffer"
                );
            }
            return errors::truncated_frame(size, raw_data.len());
        }

        let mut header_array = [0u8; 4];
        header_array.copy_from_slice(&header_bytes[0..4]);

        Ok(Frame {
            raw_header_bits,
            header_bytes: header_array,
            mpeg_version_id,
            mpeg_version,
            layer_id,
            layer,
            crc_protected,
            bitrate_id,
            bitrate,
            sampling_rate_id,
            sampling_rate,
            padded,
            private_bit,
            channel,
            mode_extension,
            is_copyrighted,
            is_original,
            emphasis,
            size,
            raw_data,
        })
    }

    /// Frame payload size in bytes, excluding the 4-octet header already
    /// consumed. `bitrate` is in kbit/s and is multiplied by 1000 before use.
    fn frame_size(layer: Layer, bitrate_kbps: u32, sampling_rate: u32, padded: bool) -> Result<i64> {
        if sampling_rate < 1 {
            return errors::invalid_sampling_rate();
        }

        let bitrate = bitrate_kbps as i64 * 1000;
        let sampling_rate = sampling_rate as i64;
        let p: i64 = if padded { 1 } else { 0 };

        let size = match layer {
            Layer::LayerI => ((12 * bitrate) / sampling_rate + 4 * p) * 4 - 4,
            Layer::LayerII | Layer::LayerIII => (144 * bitrate) / sampling_rate + p - 4,
        };

        if size < 0 {
            return errors::invalid_frame_size(size);
        }

        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn possible_frame_rejects_short_window() {
        assert!(!MpegParser::possible_frame(&[0xFF, 0xFB, 0x90]));
    }

    #[test]
    fn possible_frame_accepts_sync() {
        assert!(MpegParser::possible_frame(&[0xFF, 0xFB, 0x90, 0x00]));
    }

    #[test]
    fn possible_frame_rejects_non_sync() {
        assert!(!MpegParser::possible_frame(&[0x00, 0x00, 0x00, 0x00]));
    }

    #[test]
    fn frame_size_layer3_matches_spec_example() {
        // (144 * 128000 / 44100 + 0) - 4 = 413
        let size = MpegParser::frame_size(Layer::LayerIII, 128, 44_100, false).unwrap();
        assert_eq!(size, 413);
    }

    #[test]
    fn frame_size_layer3_padded_matches_spec_example() {
        let size = MpegParser::frame_size(Layer::LayerIII, 128, 44_100, true).unwrap();
        assert_eq!(size, 414);
    }
}
