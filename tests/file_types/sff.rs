//! End-to-end decode tests driven through `mugen_sff::Sff::load`, covering
//! a v2 catalog with a palette directory, a raw-codec sprite, and a sprite
//! link, and a minimal v1 catalog with an embedded PCX payload.

use mugen_sff::Sff;

use crate::support::{HEADER_LEN, push_palette_entry, push_rgba_palette, push_v2_header, push_v2_sprite_subheader};

#[test]
fn v2_catalog_decodes_palette_sprite_and_link() {
	let dir_offset = HEADER_LEN;
	let sprite_dir_len = 28 * 2;
	let palette_dir_offset = dir_offset + sprite_dir_len;
	let palette_data_offset = palette_dir_offset + 16;
	let sprite_payload_offset = palette_data_offset + 1024;

	let mut data = Vec::new();
	push_v2_header(&mut data, dir_offset, 2, palette_dir_offset, 1, 0, 0);

	push_v2_sprite_subheader(&mut data, 0, 0, 2, 1, 0, 0, sprite_payload_offset, 2, 0, 0);
	push_v2_sprite_subheader(&mut data, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0); // links to sprite 0

	push_palette_entry(&mut data, 0, 0, palette_data_offset);
	push_rgba_palette(&mut data, 0xFF11_2233);

	data.extend_from_slice(&[5, 9]); // raw payload, 2x1

	let sff = Sff::load(&data).unwrap();
	assert_eq!(sff.sprites.len(), 2);
	assert_eq!(sff.palettes.len(), 1);

	let base = &sff.sprites[0];
	assert_eq!(base.width, 2);
	assert_eq!(base.height, 1);
	assert_eq!(base.pixels, vec![5, 9]);

	let linked = &sff.sprites[1];
	assert_eq!(linked.group, 0);
	assert_eq!(linked.item, 1);
	assert_eq!(linked.pixels, base.pixels);
	assert_eq!(linked.palette_index, base.palette_index);

	let palette_color = sff.palettes[0].get(0);
	assert_eq!(palette_color.r, 0x33);
	assert_eq!(palette_color.g, 0x22);
	assert_eq!(palette_color.b, 0x11);
	assert_eq!(palette_color.a, 0);
}

#[test]
fn v1_catalog_decodes_embedded_pcx_sprite() {
	let mut data = Vec::new();
	data.extend_from_slice(b"ElecbyteSpr\0");
	data.extend_from_slice(&[0, 0, 0, 1]);
	data.extend_from_slice(&0u32.to_le_bytes());
	data.extend_from_slice(&1u32.to_le_bytes()); // num sprites
	data.extend_from_slice(&28u32.to_le_bytes()); // first sprite header offset

	// sub-header at offset 28: next (self, last sprite), size=897
	// (128-byte PCX header + 1 RLE-literal byte + 768-byte palette), x, y, group, item, link, ps, pad to 32
	data.extend_from_slice(&28u32.to_le_bytes());
	data.extend_from_slice(&897u32.to_le_bytes());
	data.extend_from_slice(&0i16.to_le_bytes());
	data.extend_from_slice(&0i16.to_le_bytes());
	data.extend_from_slice(&0u16.to_le_bytes()); // group
	data.extend_from_slice(&0u16.to_le_bytes()); // item
	data.extend_from_slice(&0u16.to_le_bytes()); // link
	data.push(0); // ps = 0, owns its own palette
	data.resize(60, 0); // 28 + 32 = 60

	let mut pcx_header = [0u8; 128];
	pcx_header[2] = 1; // encoding
	pcx_header[3] = 8; // bits per pixel
	data.extend_from_slice(&pcx_header);
	data.push(13); // literal pixel value, 1x1
	let mut palette_bytes = vec![0u8; 768];
	palette_bytes[3] = 99;
	data.extend_from_slice(&palette_bytes);

	let sff = Sff::load(&data).unwrap();
	assert_eq!(sff.sprites.len(), 1);
	assert_eq!(sff.sprites[0].pixels, vec![13]);
	assert_eq!(sff.palettes.len(), 1);
	assert_eq!(sff.header.num_palettes, 1);
}

#[test]
fn bad_magic_is_rejected() {
	let data = vec![0u8; 64];
	let err = Sff::load(&data).unwrap_err();
	assert!(matches!(err, mugen_sff::SffError::BadMagic));
}
