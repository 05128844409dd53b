//! ACT palette file loader: 256 RGB triplets, entry order reversed
//! at load, entry 0 forced fully transparent.
//!
//! `original_source`'s `generateTextureFromPaletteACT` applies this
//! transparency eagerly at load rather than deferring it to render time —
//! the same place [`crate::color::Palette::from_entries`] applies it for
//! SFF-sourced palettes.

use crate::color::{Color, Palette};

const ACT_LEN: usize = 768;

/// Loads a 768-byte ACT palette. File entry `i` becomes in-memory entry
/// `255 - i`; entry 0 is then forced fully transparent and entries 1..255
/// forced fully opaque, same as every other [`Palette`].
///
/// A file shorter than 768 bytes is not an error: a warning is logged and
/// an all-transparent-black palette is returned, matching the source's
/// own silent fallback.
pub fn load(data: &[u8]) -> Palette {
	if data.len() < ACT_LEN {
		log::warn!("ACT palette truncated: expected {ACT_LEN} bytes, got {}; using a blank palette", data.len());
		return Palette::blank();
	}

	let mut entries = [Color::default(); 256];
	for (i, chunk) in data[..ACT_LEN].chunks_exact(3).enumerate() {
		entries[255 - i] = Color::opaque(chunk[0], chunk[1], chunk[2]);
	}

	Palette::from_entries(entries)
}
