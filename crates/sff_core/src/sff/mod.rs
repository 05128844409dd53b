//! SFF container loading: header, palette table, sprite directory, and the
//! per-sprite codec dispatch and link-resolution pass that ties them together.

mod codec;
pub mod header;
pub mod palette_table;
pub mod sprite;

use crate::color::Palette;
use crate::error::SffError;
use crate::reader::ByteReader;

use header::{Header, Version};
use sprite::{RawSprite, Sprite};

/// A fully decoded SFF catalog: header, resolved palette table, and the
/// resolved sprite sequence in file order.
#[derive(Debug, Clone)]
pub struct Sff {
	/// Parsed container header.
	pub header: Header,
	/// All distinct palettes referenced by the file, in load order.
	pub palettes: Vec<Palette>,
	/// Resolved sprites, one per directory entry, link sprites already copied
	/// from their targets.
	pub sprites: Vec<Sprite>,
}

impl Sff {
	/// Parses and fully decodes an SFF file image.
	///
	/// Decoding is strictly sequential: sprite `i` is resolved before sprite
	/// `i + 1`, since v1 palette inheritance and link resolution both read
	/// prior results.
	pub fn load(data: &[u8]) -> Result<Self, SffError> {
		let mut reader = ByteReader::new(data);
		let mut header = Header::parse(&mut reader)?;

		let mut palettes = match header.version {
			Version::V2 => palette_table::load(data, header.first_palette_header_offset, header.num_palettes, header.lofs)?,
			Version::V1 => Vec::new(),
		};

		let records = match header.version {
			Version::V1 => sprite::read_directory_v1(data, &header)?,
			Version::V2 => sprite::read_directory_v2(data, &header)?,
		};

		let mut sprites: Vec<Sprite> = Vec::with_capacity(records.len());
		let mut prev_index: Option<usize> = None;

		for (i, record) in records.iter().enumerate() {
			let prev = prev_index.map(|idx| &sprites[idx]);
			let sprite = resolve_sprite(data, record, i, prev, &sprites, &mut palettes)?;

			let is_9000_range = record.group == 9000 && record.item != 0;
			if header.version == Version::V1 && record.size != 0 && !is_9000_range {
				prev_index = Some(i);
			}

			sprites.push(sprite);
		}

		if header.version == Version::V1 {
			header.num_palettes = palettes.len() as u32;
		}

		Ok(Self {
			header,
			palettes,
			sprites,
		})
	}
}

fn resolve_sprite(data: &[u8], record: &RawSprite, index: usize, prev: Option<&Sprite>, sprites: &[Sprite], palettes: &mut Vec<Palette>) -> Result<Sprite, SffError> {
	if record.size == 0 {
		return Ok(resolve_link(record, index, sprites));
	}

	match record.fields {
		sprite::DirectoryFields::V1 { .. } => codec::pcx::decode(data, record, prev, palettes),
		sprite::DirectoryFields::V2 { .. } => codec::decode(data, record),
	}
}

/// A link sprite is a verbatim copy of its target, including group/item/
/// offsets, per the "copy all fields" link semantics: two sprites pointing
/// at the same target are bit-identical.
fn resolve_link(record: &RawSprite, index: usize, sprites: &[Sprite]) -> Sprite {
	let link = record.link as usize;
	if link < index {
		return sprites[link].clone();
	}

	log::warn!("sprite {index} (group {}, item {}) has size 0 and an out-of-range link {link}; using an empty bitmap", record.group, record.item);
	Sprite::empty(record.group, record.item)
}
