//! Decoder and offline atlas packer for the Mugen Sprite File (SFF) format.
//!
//! This crate is the core of `mugen-sff`: a binary-format parser for both
//! SFF major versions, the four custom sprite codecs (RLE-PCX, RLE8, RLE5,
//! LZ5), PNG ingestion, palette resolution, sprite linking, an ACT palette
//! loader, and a rectangle-packing atlas builder. It is strictly
//! synchronous and allocates nothing beyond the decoded catalog itself —
//! there is no interactive viewer, GPU upload path, or animation playback
//! here; those are external collaborators this crate's types are shaped to
//! feed.

pub mod act;
pub mod atlas;
pub mod color;
pub mod error;
pub mod export;
mod png_io;
pub mod reader;
pub mod sff;

pub use color::{Color, Palette};
pub use error::SffError;
pub use sff::Sff;
pub use sff::sprite::{CodecTag, Sprite};
