//! SFF container header: magic, version dispatch, and the version-specific
//! directory offsets.

use crate::error::SffError;
use crate::reader::ByteReader;

mod constants {
	/// The 12-byte magic signature every SFF file starts with.
	pub const MAGIC: [u8; 12] = *b"ElecbyteSpr\0";
}

/// SFF major version. Only 1 and 2 are recognized; anything else is
/// [`SffError::UnsupportedVersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
	/// SFF v1: linked-list sprite directory, embedded PCX payloads.
	V1,
	/// SFF v2: fixed-stride sprite directory, palette directory, custom codecs.
	V2,
}

/// Parsed SFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	/// Container major version.
	pub version: Version,
	/// Third version sub-byte, as read from the file.
	pub sub3: u8,
	/// Second version sub-byte.
	pub sub2: u8,
	/// First version sub-byte.
	pub sub1: u8,
	/// Offset of the first sprite sub-header.
	pub first_sprite_header_offset: u32,
	/// Number of sprites in the directory.
	pub num_sprites: u32,
	/// Offset of the first palette directory entry. Zero for v1.
	pub first_palette_header_offset: u32,
	/// Number of palette directory entries. Zero for v1 (v1 palette count is
	/// derived later, from the number of embedded palettes actually decoded).
	pub num_palettes: u32,
	/// Base offset added to literal (paletted) sprite payload offsets. Zero for v1.
	pub lofs: u32,
	/// Base offset added to translucent (RGBA) sprite payload offsets. Zero for v1.
	pub tofs: u32,
}

impl Header {
	/// Parses the header starting at the beginning of `data`.
	pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self, SffError> {
		let magic = reader
			.read_bytes(constants::MAGIC.len())
			.ok_or(SffError::TruncatedHeader {
				expected: constants::MAGIC.len(),
				actual: reader.remaining(),
			})?;
		if magic != constants::MAGIC {
			return Err(SffError::BadMagic);
		}

		let sub3 = reader.read_u8().ok_or(SffError::TruncatedHeader {
			expected: 1,
			actual: 0,
		})?;
		let sub2 = reader.read_u8().ok_or(SffError::TruncatedHeader {
			expected: 1,
			actual: 0,
		})?;
		let sub1 = reader.read_u8().ok_or(SffError::TruncatedHeader {
			expected: 1,
			actual: 0,
		})?;
		let major = reader.read_u8().ok_or(SffError::TruncatedHeader {
			expected: 1,
			actual: 0,
		})?;

		// common 32-bit reserved field
		reader.read_u32_le().ok_or(SffError::TruncatedHeader {
			expected: 4,
			actual: reader.remaining(),
		})?;

		match major {
			2 => Self::parse_v2(reader),
			1 => Self::parse_v1(reader),
			other => Err(SffError::UnsupportedVersion(other)),
		}
		.map(|mut header| {
			header.sub3 = sub3;
			header.sub2 = sub2;
			header.sub1 = sub1;
			header
		})
	}

	fn parse_v2(reader: &mut ByteReader<'_>) -> Result<Self, SffError> {
		let err = |reader: &ByteReader<'_>| SffError::TruncatedHeader {
			expected: 4,
			actual: reader.remaining(),
		};

		for _ in 0..4 {
			reader.read_u32_le().ok_or_else(|| err(reader))?;
		}

		let first_sprite_header_offset = reader.read_u32_le().ok_or_else(|| err(reader))?;
		let num_sprites = reader.read_u32_le().ok_or_else(|| err(reader))?;
		let first_palette_header_offset = reader.read_u32_le().ok_or_else(|| err(reader))?;
		let num_palettes = reader.read_u32_le().ok_or_else(|| err(reader))?;
		let lofs = reader.read_u32_le().ok_or_else(|| err(reader))?;
		reader.read_u32_le().ok_or_else(|| err(reader))?; // reserved
		let tofs = reader.read_u32_le().ok_or_else(|| err(reader))?;

		Ok(Header {
			version: Version::V2,
			sub3: 0,
			sub2: 0,
			sub1: 0,
			first_sprite_header_offset,
			num_sprites,
			first_palette_header_offset,
			num_palettes,
			lofs,
			tofs,
		})
	}

	fn parse_v1(reader: &mut ByteReader<'_>) -> Result<Self, SffError> {
		let err = |reader: &ByteReader<'_>| SffError::TruncatedHeader {
			expected: 4,
			actual: reader.remaining(),
		};

		let num_sprites = reader.read_u32_le().ok_or_else(|| err(reader))?;
		let first_sprite_header_offset = reader.read_u32_le().ok_or_else(|| err(reader))?;

		Ok(Header {
			version: Version::V1,
			sub3: 0,
			sub2: 0,
			sub1: 0,
			first_sprite_header_offset,
			num_sprites,
			first_palette_header_offset: 0,
			num_palettes: 0,
			lofs: 0,
			tofs: 0,
		})
	}
}
