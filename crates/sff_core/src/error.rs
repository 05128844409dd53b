//! Error types for SFF, ACT and atlas-packer operations.

use thiserror::Error;

/// Errors that can occur while decoding an SFF container, an ACT palette,
/// or while running the atlas packer.
#[derive(Debug, Error)]
pub enum SffError {
	/// The 12-byte magic signature did not match `"ElecbyteSpr\0"`.
	#[error("bad SFF magic")]
	BadMagic,

	/// The major version byte was neither 1 nor 2.
	#[error("unsupported SFF version: {0}")]
	UnsupportedVersion(u8),

	/// The header was shorter than the fields a given version requires.
	#[error("truncated SFF header: expected at least {expected} bytes, got {actual}")]
	TruncatedHeader {
		/// Bytes required to parse the field being read.
		expected: usize,
		/// Bytes actually available.
		actual: usize,
	},

	/// A sprite or palette payload ended before a required field could be read.
	#[error("truncated sprite or palette payload")]
	TruncatedPayload,

	/// A v1 PCX payload declared bits-per-plane other than 8.
	#[error("unsupported PCX bit depth: {0}")]
	BadPcxDepth(u8),

	/// The `image` crate rejected a PNG payload.
	#[error("invalid PNG payload: {0}")]
	BadPngPayload(String),

	/// A v2 codec tag fell outside {0, 2, 3, 4, 10, 11, 12}.
	#[error("unrecognized codec tag: {0}")]
	BadCodecTag(u8),

	/// A v1 sprite set `ps` (palette-same) but no previous sprite exists to inherit from.
	#[error("palette-same flag set with no previous sprite to inherit from")]
	BadPaletteLink,

	/// The atlas packer found no (group=0, item=0) paletted sprite to anchor the default palette.
	#[error("no default palette: no (group=0, item=0) paletted sprite found")]
	NoDefaultPalette,

	/// The atlas packer could not place every rectangle even after doubling the atlas height once.
	#[error("atlas overflow: rectangles did not fit after one doubled-height retry")]
	AtlasOverflow,

	/// Every sprite was filtered out or cropped to zero size; there is nothing to pack.
	#[error("empty atlas: no sprites survived filtering and cropping")]
	EmptyAtlas,

	/// Underlying file I/O failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
