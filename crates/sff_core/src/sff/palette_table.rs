//! v2 palette directory: walks the palette table, deduplicates by
//! `(group, item)`, and loads each distinct palette's 256 RGBA words.

use std::collections::HashMap;

use crate::color::{Color, Palette};
use crate::error::SffError;
use crate::reader::ByteReader;

/// Loads the v2 palette directory starting at
/// `header.first_palette_header_offset`, returning a dense array of
/// distinct palettes. Duplicate `(group, item)` entries reuse the
/// already-loaded palette rather than re-reading its data.
pub fn load(data: &[u8], first_palette_header_offset: u32, num_palettes: u32, lofs: u32) -> Result<Vec<Palette>, SffError> {
	let mut seen: HashMap<(u16, u16), usize> = HashMap::new();
	let mut palettes = Vec::new();

	for i in 0..num_palettes {
		let entry_offset = first_palette_header_offset as usize + 16 * i as usize;
		let mut reader = ByteReader::new(data);
		reader.seek(entry_offset);

		let group = reader.read_u16_le().ok_or(SffError::TruncatedHeader {
			expected: 16,
			actual: reader.remaining(),
		})?;
		let item = reader.read_u16_le().ok_or(SffError::TruncatedHeader {
			expected: 16,
			actual: reader.remaining(),
		})?;
		// color count: advisory, read to advance the cursor, not acted upon
		reader.read_u16_le().ok_or(SffError::TruncatedHeader {
			expected: 16,
			actual: reader.remaining(),
		})?;
		// link: advisory, read but never consulted
		reader.read_u16_le().ok_or(SffError::TruncatedHeader {
			expected: 16,
			actual: reader.remaining(),
		})?;
		let data_offset = reader.read_u32_le().ok_or(SffError::TruncatedHeader {
			expected: 16,
			actual: reader.remaining(),
		})?;
		// data size: advisory, never used to bound the 256-word read
		reader.read_u32_le().ok_or(SffError::TruncatedHeader {
			expected: 16,
			actual: reader.remaining(),
		})?;

		let key = (group, item);
		if let Some(&existing) = seen.get(&key) {
			palettes.push(palettes[existing].clone());
			continue;
		}

		let palette = read_palette_data(data, lofs as usize + data_offset as usize)?;
		seen.insert(key, palettes.len());
		palettes.push(palette);
	}

	Ok(palettes)
}

fn read_palette_data(data: &[u8], offset: usize) -> Result<Palette, SffError> {
	let mut reader = ByteReader::new(data);
	reader.seek(offset);

	let mut entries = [Color::default(); 256];
	for entry in &mut entries {
		let word = reader.read_u32_le().ok_or(SffError::TruncatedPayload)?;
		let bytes = word.to_le_bytes();
		*entry = Color::new(bytes[0], bytes[1], bytes[2], bytes[3]);
	}

	Ok(Palette::from_entries(entries))
}
