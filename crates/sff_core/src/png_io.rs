//! Shared PNG encoding helpers used by [`crate::atlas`] and [`crate::export`].
//!
//! Writing an 8-bit paletted PNG with an embedded palette (including a
//! `tRNS` alpha chunk) isn't expressible through the `image` crate's
//! `DynamicImage`/`save_buffer` surface, which only round-trips true
//! color and grayscale buffers — so this goes straight to the `png` crate,
//! the way `dvine_types`'s own export tooling reaches for `image` only
//! where indexed output isn't required.

use crate::color::Palette;
use crate::error::SffError;

/// Encodes `indices` (one palette index per pixel, `width * height` bytes)
/// as an 8-bit indexed PNG with `palette` embedded as `PLTE`/`tRNS`.
pub(crate) fn encode_indexed(width: u32, height: u32, indices: &[u8], palette: &Palette) -> Result<Vec<u8>, SffError> {
	let mut buf = Vec::new();
	{
		let mut encoder = png::Encoder::new(&mut buf, width, height);
		encoder.set_color(png::ColorType::Indexed);
		encoder.set_depth(png::BitDepth::Eight);

		let mut rgb = Vec::with_capacity(Palette::LEN * 3);
		let mut alpha = Vec::with_capacity(Palette::LEN);
		for color in palette.colors() {
			rgb.push(color.r);
			rgb.push(color.g);
			rgb.push(color.b);
			alpha.push(color.a);
		}
		encoder.set_palette(rgb);
		encoder.set_trns(alpha);

		let mut writer = encoder.write_header().map_err(|e| SffError::BadPngPayload(e.to_string()))?;
		writer.write_image_data(indices).map_err(|e| SffError::BadPngPayload(e.to_string()))?;
	}
	Ok(buf)
}

/// Encodes `rgba` (four bytes per pixel) as a truecolor-alpha PNG.
pub(crate) fn encode_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, SffError> {
	let image = image::RgbaImage::from_raw(width, height, rgba.to_vec()).ok_or_else(|| SffError::BadPngPayload("pixel buffer does not match declared dimensions".to_string()))?;
	let mut buf = Vec::new();
	image::DynamicImage::ImageRgba8(image).write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png).map_err(|e| SffError::BadPngPayload(e.to_string()))?;
	Ok(buf)
}
