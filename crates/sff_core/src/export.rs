//! Per-sprite PNG export and the sprite-database dump.
//!
//! Export failures are per-sprite: a bad palette index or an `image`
//! encode error is logged and counted, never aborts the batch, matching
//! the recovery policy ("the enclosing call always returns the
//! success count").

use std::fs;
use std::path::Path;

use crate::color::Palette;
use crate::error::SffError;
use crate::png_io;
use crate::sff::Sff;
use crate::sff::sprite::Sprite;

/// Filename a single exported sprite is written under: `<basename>_<group>_<item>.png`.
pub fn sprite_filename(basename: &str, sprite: &Sprite) -> String {
	format!("{basename}_{}_{}.png", sprite.group, sprite.item)
}

/// Encodes one sprite as a PNG: 8-bit paletted for every codec except
/// truecolor PNG (tags 11/12), which is written as 32-bit truecolor-alpha.
pub fn export_sprite_png(sprite: &Sprite, palettes: &[Palette]) -> Result<Vec<u8>, SffError> {
	if sprite.codec.is_truecolor() {
		return png_io::encode_rgba(sprite.width, sprite.height, &sprite.pixels);
	}

	let palette = palettes.get(sprite.palette_index as usize).ok_or(SffError::BadPngPayload(format!("palette index {} out of range ({} palettes loaded)", sprite.palette_index, palettes.len())))?;
	png_io::encode_indexed(sprite.width, sprite.height, &sprite.pixels, palette)
}

/// Exports every sprite in `sff` as `<dir>/<basename>_<group>_<item>.png`.
/// Returns `(successes, total)`; a failed sprite is logged and skipped.
pub fn export_all(sff: &Sff, dir: &Path, basename: &str) -> (usize, usize) {
	let mut successes = 0;
	for sprite in &sff.sprites {
		let result = export_sprite_png(sprite, &sff.palettes).and_then(|bytes| fs::write(dir.join(sprite_filename(basename, sprite)), bytes).map_err(SffError::Io));

		match result {
			Ok(()) => successes += 1,
			Err(e) => log::error!("failed to export sprite (group {}, item {}): {e}", sprite.group, sprite.item),
		}
	}
	(successes, sff.sprites.len())
}

/// Builds the tab-separated sprite database: one line per sprite,
/// columns `group`, `item`, `width`, `height`, `x_offset`, `y_offset`,
/// `palette_index`, `codec_tag_positive`, `codec_name`.
pub fn dump_database(sff: &Sff) -> String {
	let mut out = String::new();
	for sprite in &sff.sprites {
		out.push_str(&format!(
			"{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
			sprite.group,
			sprite.item,
			sprite.width,
			sprite.height,
			sprite.x_offset,
			sprite.y_offset,
			sprite.palette_index,
			sprite.codec.tag_value(),
			sprite.codec,
		));
	}
	out
}

/// Writes the sprite database dump to `<dir>/sprite_database_<basename>.txt`.
pub fn write_database(sff: &Sff, dir: &Path, basename: &str) -> Result<(), SffError> {
	let contents = dump_database(sff);
	fs::write(dir.join(format!("sprite_database_{basename}.txt")), contents)?;
	Ok(())
}
