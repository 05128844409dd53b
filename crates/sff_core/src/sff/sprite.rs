//! Decoded sprites, the version-specific sub-header layouts, and the
//! directory walkers that turn a sub-header stream into `RawSprite` records
//! ready for codec dispatch.

use std::fmt;

use crate::error::SffError;
use crate::reader::ByteReader;

use super::header::Header;

/// Payload encoding for a single sprite.
///
/// For v1 this is always [`CodecTag::Pcx`]; for v2 it is read directly from
/// the sub-header's codec-tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecTag {
	/// v1 embedded PCX with a custom run-length stream.
	Pcx,
	/// v2 tag 0: uncompressed pixel data.
	Raw,
	/// v2 tag 2.
	Rle8,
	/// v2 tag 3.
	Rle5,
	/// v2 tag 4.
	Lz5,
	/// v2 tag 10: paletted PNG.
	Png10,
	/// v2 tag 11: truecolor PNG.
	Png11,
	/// v2 tag 12: truecolor-alpha PNG.
	Png12,
}

impl CodecTag {
	/// Maps a v2 codec-tag byte to a [`CodecTag`]. Tag 1 and any value
	/// outside `{0, 2, 3, 4, 10, 11, 12}` is [`SffError::BadCodecTag`].
	pub fn from_v2_tag(tag: u8) -> Result<Self, SffError> {
		match tag {
			0 => Ok(Self::Raw),
			2 => Ok(Self::Rle8),
			3 => Ok(Self::Rle5),
			4 => Ok(Self::Lz5),
			10 => Ok(Self::Png10),
			11 => Ok(Self::Png11),
			12 => Ok(Self::Png12),
			other => Err(SffError::BadCodecTag(other)),
		}
	}

	/// Whether this codec yields 32-bit RGBA pixels directly, bypassing
	/// palette lookup.
	#[inline]
	pub fn is_truecolor(self) -> bool {
		matches!(self, Self::Png11 | Self::Png12)
	}

	/// The numeric codec tag for the sprite-database dump.
	/// "codec_tag_positive"). v1's PCX codec has no v2 directory slot of
	/// its own; it is reported as 1, the reserved-but-never-emitted v2
	/// PCX tag, since that is the only numeric identifier the format's
	/// codec-tag space sets aside for it.
	#[inline]
	pub fn tag_value(self) -> u8 {
		match self {
			Self::Pcx => 1,
			Self::Raw => 0,
			Self::Rle8 => 2,
			Self::Rle5 => 3,
			Self::Lz5 => 4,
			Self::Png10 => 10,
			Self::Png11 => 11,
			Self::Png12 => 12,
		}
	}
}

impl fmt::Display for CodecTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Pcx => "PCX",
			Self::Raw => "RAW",
			Self::Rle8 => "RLE8",
			Self::Rle5 => "RLE5",
			Self::Lz5 => "LZ5",
			Self::Png10 => "PNG10",
			Self::Png11 => "PNG11",
			Self::Png12 => "PNG12",
		};
		f.write_str(name)
	}
}

/// A fully decoded sprite: metadata plus its pixel buffer.
///
/// Paletted sprites (every codec except [`CodecTag::Png11`] and
/// [`CodecTag::Png12`]) store one byte per pixel, a palette index into the
/// catalog's palette table. Truecolor sprites store four bytes per pixel,
/// RGBA, and do not participate in palette lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
	/// Sprite group id.
	pub group: u16,
	/// Sprite item id within its group.
	pub item: u16,
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
	/// Logical x origin.
	pub x_offset: i16,
	/// Logical y origin.
	pub y_offset: i16,
	/// Index into the catalog's palette table. Meaningless for truecolor sprites.
	pub palette_index: u16,
	/// Codec this sprite was decoded with.
	pub codec: CodecTag,
	/// v2 color-depth byte, carried through but not acted upon. Always 0 for v1.
	pub color_depth: u8,
	/// Decoded pixel buffer: `width * height` bytes (paletted) or `width * height * 4` (truecolor).
	pub pixels: Vec<u8>,
	/// Top-left of the opaque bounding box within this sprite's own bitmap,
	/// set by the atlas packer's crop step. `None` until cropped.
	pub crop_origin: Option<(u32, u32)>,
}

impl Sprite {
	/// An empty placeholder for an out-of-range link sprite: zero
	/// size, palette 0, no pixels. Not fatal, logged by the caller.
	pub(crate) fn empty(group: u16, item: u16) -> Self {
		Self {
			group,
			item,
			width: 0,
			height: 0,
			x_offset: 0,
			y_offset: 0,
			palette_index: 0,
			codec: CodecTag::Raw,
			color_depth: 0,
			pixels: Vec::new(),
			crop_origin: None,
		}
	}

	/// Bytes a well-formed pixel buffer must have for this sprite's
	/// dimensions and codec.
	pub fn expected_pixel_len(&self) -> usize {
		let pixels = self.width as usize * self.height as usize;
		if self.codec.is_truecolor() {
			pixels * 4
		} else {
			pixels
		}
	}
}

/// Version-specific fields produced by the directory walk, not yet resolved
/// into a [`Sprite`].
#[derive(Debug, Clone, Copy)]
pub(crate) enum DirectoryFields {
	V1 {
		/// Offset of the `ps` (palette-same) flag byte, immediately after
		/// the 18 explicit sub-header fields and before 13 reserved bytes.
		ps_offset: usize,
		/// Offset of the next sub-header, also the linked-list successor of `shofs`.
		next_offset: usize,
	},
	V2 {
		width: u32,
		height: u32,
		codec: CodecTag,
		color_depth: u8,
		palette_index: u16,
	},
}

/// A directory record: everything the walker can produce without touching
/// the payload bytes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawSprite {
	pub group: u16,
	pub item: u16,
	pub x_offset: i16,
	pub y_offset: i16,
	pub link: u16,
	/// Declared payload size. Zero means this record is a link.
	pub size: u32,
	/// Absolute offset of the payload (fixed +32 past the v1 sub-header, or
	/// `ofs + lofs/tofs` for v2).
	pub payload_offset: usize,
	pub fields: DirectoryFields,
}

fn truncated(reader: &ByteReader<'_>, expected: usize) -> SffError {
	SffError::TruncatedHeader {
		expected,
		actual: reader.remaining(),
	}
}

/// Walks the v1 linked-list sprite directory starting at
/// `header.first_sprite_header_offset`.
pub(crate) fn read_directory_v1(data: &[u8], header: &Header) -> Result<Vec<RawSprite>, SffError> {
	let mut shofs = header.first_sprite_header_offset as usize;
	let mut records = Vec::with_capacity(header.num_sprites as usize);

	for _ in 0..header.num_sprites {
		let mut reader = ByteReader::new(data);
		reader.seek(shofs);

		let next_offset = reader.read_u32_le().ok_or_else(|| truncated(&reader, 4))? as usize;
		let size = reader.read_u32_le().ok_or_else(|| truncated(&reader, 4))?;
		let x_offset = reader.read_i16_le().ok_or_else(|| truncated(&reader, 2))?;
		let y_offset = reader.read_i16_le().ok_or_else(|| truncated(&reader, 2))?;
		let group = reader.read_u16_le().ok_or_else(|| truncated(&reader, 2))?;
		let item = reader.read_u16_le().ok_or_else(|| truncated(&reader, 2))?;
		let link = reader.read_u16_le().ok_or_else(|| truncated(&reader, 2))?;
		let ps_offset = reader.position();

		records.push(RawSprite {
			group,
			item,
			x_offset,
			y_offset,
			link,
			size,
			payload_offset: shofs + 32,
			fields: DirectoryFields::V1 {
				ps_offset,
				next_offset,
			},
		});

		shofs = next_offset;
	}

	Ok(records)
}

/// Walks the v2 fixed-28-byte-stride sprite directory starting at
/// `header.first_sprite_header_offset`.
pub(crate) fn read_directory_v2(data: &[u8], header: &Header) -> Result<Vec<RawSprite>, SffError> {
	let mut shofs = header.first_sprite_header_offset as usize;
	let mut records = Vec::with_capacity(header.num_sprites as usize);

	for _ in 0..header.num_sprites {
		let mut reader = ByteReader::new(data);
		reader.seek(shofs);

		let group = reader.read_u16_le().ok_or_else(|| truncated(&reader, 2))?;
		let item = reader.read_u16_le().ok_or_else(|| truncated(&reader, 2))?;
		let width = u32::from(reader.read_u16_le().ok_or_else(|| truncated(&reader, 2))?);
		let height = u32::from(reader.read_u16_le().ok_or_else(|| truncated(&reader, 2))?);
		let x_offset = reader.read_i16_le().ok_or_else(|| truncated(&reader, 2))?;
		let y_offset = reader.read_i16_le().ok_or_else(|| truncated(&reader, 2))?;
		let link = reader.read_u16_le().ok_or_else(|| truncated(&reader, 2))?;
		let codec_tag = reader.read_u8().ok_or_else(|| truncated(&reader, 1))?;
		let color_depth = reader.read_u8().ok_or_else(|| truncated(&reader, 1))?;
		let raw_offset = reader.read_u32_le().ok_or_else(|| truncated(&reader, 4))?;
		let size = reader.read_u32_le().ok_or_else(|| truncated(&reader, 4))?;
		let palette_index = reader.read_u16_le().ok_or_else(|| truncated(&reader, 2))?;
		let flags = reader.read_u16_le().ok_or_else(|| truncated(&reader, 2))?;

		let codec = CodecTag::from_v2_tag(codec_tag)?;
		let base = if flags & 1 == 0 { header.lofs } else { header.tofs };
		let payload_offset = raw_offset as usize + base as usize;

		records.push(RawSprite {
			group,
			item,
			x_offset,
			y_offset,
			link,
			size,
			payload_offset,
			fields: DirectoryFields::V2 {
				width,
				height,
				codec,
				color_depth,
				palette_index,
			},
		});

		shofs += 28;
	}

	Ok(records)
}
