//! v1 embedded PCX payload: `ps` flag, 128-byte PCX header, RLE-PCX pixel
//! stream, and the trailing 768-byte RGB palette a sprite owns unless it
//! inherits one via `ps`.

use crate::color::{Color, Palette};
use crate::error::SffError;
use crate::reader::ByteReader;

use super::super::sprite::{CodecTag, DirectoryFields, RawSprite, Sprite};

const PCX_HEADER_LEN: usize = 128;
const PALETTE_BYTES: usize = 768;

/// Decodes a v1 sprite payload, appending a new palette to `palettes`
/// unless the sprite inherits one from `prev` via the `ps` flag.
pub(crate) fn decode(data: &[u8], record: &RawSprite, prev: Option<&Sprite>, palettes: &mut Vec<Palette>) -> Result<Sprite, SffError> {
	let (ps_offset, next_offset) = match record.fields {
		DirectoryFields::V1 { ps_offset, next_offset } => (ps_offset, next_offset),
		DirectoryFields::V2 { .. } => unreachable!("v1 codec dispatch only ever sees v1 records"),
	};

	let mut reader = ByteReader::new(data);
	reader.seek(ps_offset);
	let ps = reader.read_u8().ok_or(SffError::TruncatedPayload)?;

	let inherited_palette_index = if ps != 0 {
		match prev {
			Some(p) => Some(p.palette_index),
			None => return Err(SffError::BadPaletteLink),
		}
	} else {
		None
	};
	let palette_same = inherited_palette_index.is_some();

	let header_offset = record.payload_offset;
	let (width, height) = read_pcx_header(data, header_offset)?;

	let declared_size = if next_offset > header_offset {
		next_offset - header_offset
	} else {
		record.size as usize
	};

	let pal_size = if palette_same { 0 } else { PALETTE_BYTES };
	let datasize = declared_size.max(PCX_HEADER_LEN + pal_size);
	let src_len = datasize - (PCX_HEADER_LEN + pal_size);

	let mut reader = ByteReader::new(data);
	reader.seek(header_offset + PCX_HEADER_LEN);
	let src = reader.read_bytes(src_len).ok_or(SffError::TruncatedPayload)?;
	let pixels = rle_pcx_decode(src, width, height);

	let palette_index = if let Some(idx) = inherited_palette_index {
		idx
	} else {
		let mut reader = ByteReader::new(data);
		reader.seek(header_offset + PCX_HEADER_LEN + src_len);
		let mut entries = [Color::default(); 256];
		for entry in &mut entries {
			let r = reader.read_u8().ok_or(SffError::TruncatedPayload)?;
			let g = reader.read_u8().ok_or(SffError::TruncatedPayload)?;
			let b = reader.read_u8().ok_or(SffError::TruncatedPayload)?;
			*entry = Color::opaque(r, g, b);
		}
		palettes.push(Palette::from_entries(entries));
		(palettes.len() - 1) as u16
	};

	Ok(Sprite {
		group: record.group,
		item: record.item,
		width: u32::from(width),
		height: u32::from(height),
		x_offset: record.x_offset,
		y_offset: record.y_offset,
		palette_index,
		codec: CodecTag::Pcx,
		color_depth: 0,
		pixels,
		crop_origin: None,
	})
}

/// Reads the fields of the embedded PCX header used by this codec: the
/// inclusive bounding rectangle (giving width/height) and the bits-per-plane
/// validation. Everything else in the 128-byte header is unused.
fn read_pcx_header(data: &[u8], offset: usize) -> Result<(u16, u16), SffError> {
	let mut reader = ByteReader::new(data);
	reader.seek(offset);
	reader.skip(2).ok_or(SffError::TruncatedPayload)?; // dummy manufacturer/version bytes
	let encoding = reader.read_u8().ok_or(SffError::TruncatedPayload)?;
	let bpp = reader.read_u8().ok_or(SffError::TruncatedPayload)?;
	if bpp != 8 || encoding != 1 {
		return Err(SffError::BadPcxDepth(bpp));
	}
	let xmin = reader.read_u16_le().ok_or(SffError::TruncatedPayload)?;
	let ymin = reader.read_u16_le().ok_or(SffError::TruncatedPayload)?;
	let xmax = reader.read_u16_le().ok_or(SffError::TruncatedPayload)?;
	let ymax = reader.read_u16_le().ok_or(SffError::TruncatedPayload)?;

	let width = xmax.wrapping_sub(xmin).wrapping_add(1);
	let height = ymax.wrapping_sub(ymin).wrapping_add(1);
	Ok((width, height))
}

/// `(b & 0xC0) == 0xC0`: low 6 bits are a run length, next byte is the
/// value. Otherwise the byte is a literal run of length 1. Pads the
/// remainder with zero if input runs out before the output buffer fills.
fn rle_pcx_decode(src: &[u8], width: u16, height: u16) -> Vec<u8> {
	let dst_len = width as usize * height as usize;
	let mut out = vec![0u8; dst_len];
	let mut i = 0;
	let mut j = 0;

	while i < src.len() && j < dst_len {
		let byte = src[i];
		i += 1;

		let (count, value) = if byte & 0xC0 == 0xC0 {
			let count = (byte & 0x3F) as usize;
			if i >= src.len() {
				break;
			}
			let value = src[i];
			i += 1;
			(count, value)
		} else {
			(1, byte)
		};

		for _ in 0..count {
			if j >= dst_len {
				break;
			}
			out[j] = value;
			j += 1;
		}
	}

	out
}
