//! Benchmark helper utilities for `sff_core`.
//!
//! Builds synthetic SFF v2 catalogs at a handful of standard sizes, the
//! same way the crate's own integration tests build them, but
//! parameterized for benchmarking instead of assertions.

const HEADER_LEN: u32 = 64;
const SUBHEADER_LEN: u32 = 28;

fn push_header(data: &mut Vec<u8>, first_sprite_offset: u32, num_sprites: u32) {
	data.extend_from_slice(b"ElecbyteSpr\0");
	data.extend_from_slice(&[0, 1, 0, 2]);
	data.extend_from_slice(&0u32.to_le_bytes());
	for _ in 0..4 {
		data.extend_from_slice(&0u32.to_le_bytes());
	}
	data.extend_from_slice(&first_sprite_offset.to_le_bytes());
	data.extend_from_slice(&num_sprites.to_le_bytes());
	data.extend_from_slice(&0u32.to_le_bytes()); // no palette directory
	data.extend_from_slice(&0u32.to_le_bytes());
	data.extend_from_slice(&0u32.to_le_bytes()); // lofs
	data.extend_from_slice(&0u32.to_le_bytes());
	data.extend_from_slice(&0u32.to_le_bytes()); // tofs
}

#[allow(clippy::too_many_arguments)]
fn push_subheader(data: &mut Vec<u8>, group: u16, item: u16, width: u16, height: u16, offset: u32, size: u32) {
	data.extend_from_slice(&group.to_le_bytes());
	data.extend_from_slice(&item.to_le_bytes());
	data.extend_from_slice(&width.to_le_bytes());
	data.extend_from_slice(&height.to_le_bytes());
	data.extend_from_slice(&0i16.to_le_bytes());
	data.extend_from_slice(&0i16.to_le_bytes());
	data.extend_from_slice(&0u16.to_le_bytes()); // link
	data.push(2); // codec tag: RLE8
	data.push(0); // color depth
	data.extend_from_slice(&offset.to_le_bytes());
	data.extend_from_slice(&size.to_le_bytes());
	data.extend_from_slice(&0u16.to_le_bytes()); // palette index
	data.extend_from_slice(&0u16.to_le_bytes()); // flags
}

/// A mixed run/literal RLE8 stream exercising both decode branches, rather
/// than a single long run or a flat literal copy.
fn generate_rle8_stream(width: usize, height: usize) -> Vec<u8> {
	let total = width * height;
	let mut out = Vec::with_capacity(total);
	let mut written = 0usize;
	let mut tick = 0u8;

	while written < total {
		if tick % 3 == 0 {
			let run = 20.min(total - written);
			out.push(0x40 | (run as u8 & 0x3f));
			out.push(tick);
			written += run;
		} else {
			out.push(tick);
			written += 1;
		}
		tick = tick.wrapping_add(1);
	}

	out
}

/// Builds a synthetic v2 SFF catalog of `sprite_count` sprites, all
/// `width`x`height`, group 0, items `0..sprite_count`, each RLE8-encoded
/// with [`generate_rle8_stream`].
pub fn generate_test_sff(width: u16, height: u16, sprite_count: u16) -> Vec<u8> {
	let stream = generate_rle8_stream(width as usize, height as usize);
	let payload_size = stream.len() as u32 + 4; // 4-byte prefix skipped by the decoder

	let dir_offset = HEADER_LEN;
	let mut payload_offset = dir_offset + SUBHEADER_LEN * u32::from(sprite_count);

	let mut data = Vec::new();
	push_header(&mut data, dir_offset, u32::from(sprite_count));

	let mut offsets = Vec::with_capacity(sprite_count as usize);
	for _ in 0..sprite_count {
		offsets.push(payload_offset);
		payload_offset += payload_size;
	}
	for (item, &offset) in offsets.iter().enumerate() {
		push_subheader(&mut data, 0, item as u16, width, height, offset, payload_size);
	}
	for _ in 0..sprite_count {
		data.extend_from_slice(&[0, 0, 0, 0]);
		data.extend_from_slice(&stream);
	}

	data
}

/// Common benchmark sprite sizes.
pub mod sizes {
	/// Tiny sprite: 32x32 (1,024 pixels)
	pub const TINY: (u16, u16) = (32, 32);
	/// Small sprite: 128x128 (16,384 pixels)
	pub const SMALL: (u16, u16) = (128, 128);
	/// Medium sprite: 256x256 (65,536 pixels)
	pub const MEDIUM: (u16, u16) = (256, 256);
	/// Large sprite: 640x480 (307,200 pixels), a typical full-screen frame
	pub const LARGE: (u16, u16) = (640, 480);
}

#[cfg(test)]
mod tests {
	use super::*;
	use sff_core::Sff;

	#[test]
	fn generated_catalog_round_trips_through_load() {
		let data = generate_test_sff(16, 16, 3);
		let sff = Sff::load(&data).unwrap();
		assert_eq!(sff.sprites.len(), 3);
		assert_eq!(sff.sprites[0].width, 16);
		assert_eq!(sff.sprites[0].height, 16);
	}
}
