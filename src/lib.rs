//! `mp3probe` parses MPEG-1/2/2.5 Layer I/II/III audio streams — together
//! with any leading ID3v2 tag container — into a structured, in-memory
//! representation: an optional header descriptor, the tags it carries, and
//! the ordered list of frames (decoded header fields plus the raw payload
//! bytes).
//!
//! The crate does not decode audio (no Huffman/IMDCT/synthesis), does not
//! perform file I/O (callers supply a fully materialized byte buffer), and
//! does not resynchronize after a structural error — it fails fast instead.
//!
//! ```no_run
//! use mp3probe::{parse_bytes, ParserConfig};
//!
//! let bytes = std::fs::read("song.mp3").expect("read song.mp3");
//! let audio = parse_bytes(&bytes, ParserConfig::default())?;
//! println!("{}", audio);
//! # Ok::<(), mp3probe::Error>(())
//! ```

mod cursor;
pub mod errors;
mod parser;
mod tables;
pub mod types;

pub use errors::Error;
pub use parser::{parse_bytes, MpegParser, ParserConfig};
pub use types::{
    AudioObject, ChannelMode, Emphasis, Frame, HeaderInfo, Layer, ModeExtension, MpegVersion, Tag,
};

/// Crate-wide result alias: every fallible operation returns `Error` on
/// failure, never a type the caller must downcast.
pub type Result<T> = std::result::Result<T, Error>;
