//! v2 codec tags 10-12: PNG-backed payloads. Tag 10 (paletted) is decoded
//! with the `png` crate directly so the raw index bytes reach the sprite's
//! pixel buffer untouched; tags 11/12 (truecolor, truecolor-alpha) go
//! through `image` and are normalized to RGBA8.

use crate::error::SffError;

/// Decodes a paletted PNG payload, returning raw palette-index bytes (one
/// per pixel, not RGB) plus intrinsic dimensions. The sprite's own palette
/// index (from its sub-header) selects which catalog palette these indices
/// are looked up against; the PNG's own embedded palette, if any, is unused.
pub(super) fn decode_paletted(payload: &[u8]) -> Result<(Vec<u8>, u32, u32), SffError> {
	let mut decoder = png::Decoder::new(payload);
	decoder.set_transformations(png::Transformations::IDENTITY);
	let mut reader = decoder.read_info().map_err(|e| SffError::BadPngPayload(e.to_string()))?;

	let mut buf = vec![0u8; reader.output_buffer_size()];
	let info = reader.next_frame(&mut buf).map_err(|e| SffError::BadPngPayload(e.to_string()))?;
	buf.truncate(info.buffer_size());

	if info.color_type != png::ColorType::Indexed {
		return Err(SffError::BadPngPayload("expected an indexed PNG for codec tag 10".to_string()));
	}

	Ok((buf, info.width, info.height))
}

/// Decodes a truecolor(-alpha) PNG payload into RGBA8 bytes plus intrinsic
/// dimensions.
pub(super) fn decode_truecolor(payload: &[u8]) -> Result<(Vec<u8>, u32, u32), SffError> {
	let img = image::load_from_memory(payload).map_err(|e| SffError::BadPngPayload(e.to_string()))?;
	let rgba = img.to_rgba8();
	let (width, height) = rgba.dimensions();
	Ok((rgba.into_raw(), width, height))
}
