//! v2 codec dispatch plus the four custom compression codecs and the PNG
//! ingestion path. v1's embedded-PCX codec lives in [`pcx`] and is driven
//! directly by the sprite directory walker rather than this dispatcher,
//! since it needs mutable access to the in-progress palette table.

pub(super) mod lz5;
pub(crate) mod pcx;
pub(super) mod png;
pub(super) mod rle5;
pub(super) mod rle8;

use crate::error::SffError;
use crate::reader::ByteReader;

use super::sprite::{CodecTag, DirectoryFields, RawSprite, Sprite};

/// A byte cursor that never fails: once past the end of its input it
/// returns the final byte on every subsequent read rather than erroring.
/// This matches the source's own behavior on pathological or truncated
/// codec streams.
pub(super) struct SatReader<'a> {
	src: &'a [u8],
	pos: usize,
}

impl<'a> SatReader<'a> {
	pub(super) fn new(src: &'a [u8]) -> Self {
		Self {
			src,
			pos: 0,
		}
	}

	/// Returns the byte at the cursor without advancing.
	pub(super) fn peek(&self) -> u8 {
		self.src.get(self.pos).copied().unwrap_or_else(|| self.src.last().copied().unwrap_or(0))
	}

	/// Advances the cursor by one byte, saturating at the last valid index.
	pub(super) fn advance(&mut self) {
		if self.pos + 1 < self.src.len() {
			self.pos += 1;
		}
	}

	/// Reads the byte at the cursor and advances.
	pub(super) fn next(&mut self) -> u8 {
		let byte = self.peek();
		self.advance();
		byte
	}
}

/// Decodes a v2 sprite payload. The four-byte prefix RLE8/RLE5/LZ5 share is
/// skipped before handing bytes to the respective codec; PNG payloads are
/// handed to the `image`/`png` decoders whole.
pub(crate) fn decode(data: &[u8], record: &RawSprite) -> Result<Sprite, SffError> {
	let (mut width, mut height, codec, color_depth, palette_index) = match record.fields {
		DirectoryFields::V2 {
			width,
			height,
			codec,
			color_depth,
			palette_index,
		} => (width, height, codec, color_depth, palette_index),
		DirectoryFields::V1 { .. } => unreachable!("v2 codec dispatch only ever sees v2 records"),
	};

	let mut reader = ByteReader::new(data);
	reader.seek(record.payload_offset);
	let payload = reader.read_bytes(record.size as usize).ok_or(SffError::TruncatedPayload)?;

	let pixels = match codec {
		CodecTag::Raw => payload.to_vec(),
		CodecTag::Rle8 => rle8::decode(skip_prefix(payload), width, height),
		CodecTag::Rle5 => rle5::decode(skip_prefix(payload), width, height),
		CodecTag::Lz5 => lz5::decode(skip_prefix(payload), width, height),
		CodecTag::Png10 => {
			let (pixels, w, h) = png::decode_paletted(payload)?;
			width = w;
			height = h;
			pixels
		}
		CodecTag::Png11 | CodecTag::Png12 => {
			let (pixels, w, h) = png::decode_truecolor(payload)?;
			width = w;
			height = h;
			pixels
		}
		CodecTag::Pcx => unreachable!("v2 directory never produces codec tag 1"),
	};

	Ok(Sprite {
		group: record.group,
		item: record.item,
		width,
		height,
		x_offset: record.x_offset,
		y_offset: record.y_offset,
		palette_index,
		codec,
		color_depth,
		pixels,
		crop_origin: None,
	})
}

fn skip_prefix(payload: &[u8]) -> &[u8] {
	payload.get(4..).unwrap_or(&[])
}
