//! Offline atlas packer: crops transparent margins from every
//! sprite sharing the catalog's default palette, packs the survivors into
//! a power-of-two bin with a skyline bottom-left packer, and emits a
//! single paletted PNG plus a tab-separated sidecar.
//!
//! `original_source` packs rectangles with `stb_rectpack`
//! (`STBRP_HEURISTIC_Skyline_BL_sortHeight`); no crate in the example pack
//! wraps an equivalent packer, and the packing rule is fully pinned by the
//! spec, so [`Skyline`] hand-rolls the same observable behavior: rectangles
//! sorted by descending height, a skyline height profile, each rectangle
//! placed at the lowest-then-leftmost fit.

use std::fs;
use std::path::Path;

use crate::color::Palette;
use crate::error::SffError;
use crate::png_io;
use crate::sff::Sff;
use crate::sff::sprite::CodecTag;

/// A single sprite's placement within the packed atlas, plus the crop it
/// underwent before packing.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
	/// Source sprite's group id.
	pub group: u16,
	/// Source sprite's item id.
	pub item: u16,
	/// X of this sprite's packed rectangle within the atlas.
	pub atlas_x: u32,
	/// Y of this sprite's packed rectangle within the atlas.
	pub atlas_y: u32,
	/// Width of the cropped, packed rectangle.
	pub atlas_w: u32,
	/// Height of the cropped, packed rectangle.
	pub atlas_h: u32,
	/// X, within the sprite's own original bitmap, of the opaque bounding
	/// box's top-left corner.
	pub crop_src_x: u32,
	/// Y, within the sprite's own original bitmap, of the opaque bounding
	/// box's top-left corner.
	pub crop_src_y: u32,
	/// The sprite's uncropped width.
	pub orig_w: u32,
	/// The sprite's uncropped height.
	pub orig_h: u32,
}

/// A packed atlas: the rendered paletted image plus every sprite's placement.
#[derive(Debug, Clone)]
pub struct Atlas {
	/// Atlas image width.
	pub width: u32,
	/// Atlas image height.
	pub height: u32,
	/// Paletted pixel buffer, `width * height` bytes, index 0 = transparent.
	pub pixels: Vec<u8>,
	/// Index into the catalog's palette table used to render and emit this atlas.
	pub palette_index: u16,
	/// One entry per packed sprite, in packing order.
	pub placements: Vec<Placement>,
	/// Basename this atlas's output files are keyed off of.
	pub basename: String,
}

impl Atlas {
	/// PNG filename for this atlas: `sprite_atlas_<basename>.png`.
	pub fn png_filename(&self) -> String {
		format!("sprite_atlas_{}.png", self.basename)
	}

	/// Sidecar filename for this atlas: `sprite_atlas_<basename>.txt`.
	pub fn sidecar_filename(&self) -> String {
		format!("sprite_atlas_{}.txt", self.basename)
	}

	/// Encodes the atlas as an 8-bit paletted PNG with `palette` embedded.
	pub fn to_png(&self, palette: &Palette) -> Result<Vec<u8>, SffError> {
		png_io::encode_indexed(self.width, self.height, &self.pixels, palette)
	}

	/// Builds the tab-separated sidecar text: one line
	/// per placed sprite, columns `atlas_x atlas_y atlas_w atlas_h
	/// crop_src_x crop_src_y orig_w orig_h group_item`.
	pub fn sidecar(&self) -> String {
		let mut out = String::new();
		for p in &self.placements {
			out.push_str(&format!("{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}_{}\n", p.atlas_x, p.atlas_y, p.atlas_w, p.atlas_h, p.crop_src_x, p.crop_src_y, p.orig_w, p.orig_h, p.group, p.item));
		}
		out
	}

	/// Writes the atlas PNG and its sidecar to `dir`, under the filenames
	/// in [`Self::png_filename`]/[`Self::sidecar_filename`].
	pub fn write(&self, dir: &Path, palette: &Palette) -> Result<(), SffError> {
		fs::write(dir.join(self.png_filename()), self.to_png(palette)?)?;
		fs::write(dir.join(self.sidecar_filename()), self.sidecar())?;
		Ok(())
	}
}

struct Candidate {
	sprite_index: usize,
	group: u16,
	item: u16,
	orig_w: u32,
	orig_h: u32,
	crop_x: u32,
	crop_y: u32,
	w: u32,
	h: u32,
	pixels: Vec<u8>,
}

/// Packs the default-palette sprites of `sff` into a single atlas.
///
/// Writes the cropped origin back into each packed sprite's
/// [`crate::sff::sprite::Sprite::crop_origin`] (spec §3 lifecycle, §4.12
/// step 2), so `sff` is taken mutably even though no pixels change.
pub fn pack(sff: &mut Sff, basename: &str) -> Result<Atlas, SffError> {
	let palette_index = default_palette_index(sff)?;

	let candidates: Vec<Candidate> = sff
		.sprites
		.iter()
		.enumerate()
		.filter(|(_, s)| !s.codec.is_truecolor() && s.palette_index == palette_index)
		.filter_map(|(i, s)| {
			let (cx, cy, w, h) = crop_bounds(s.width, s.height, &s.pixels)?;
			Some(Candidate {
				sprite_index: i,
				group: s.group,
				item: s.item,
				orig_w: s.width,
				orig_h: s.height,
				crop_x: cx,
				crop_y: cy,
				w,
				h,
				pixels: extract_region(&s.pixels, s.width, cx, cy, w, h),
			})
		})
		.collect();

	if candidates.is_empty() {
		return Err(SffError::EmptyAtlas);
	}

	for c in &candidates {
		sff.sprites[c.sprite_index].crop_origin = Some((c.crop_x, c.crop_y));
	}

	let total_area: u64 = candidates.iter().map(|c| u64::from(c.w) * u64::from(c.h)).sum();
	let w_max = candidates.iter().map(|c| c.w).max().unwrap_or(1);
	let h_max = candidates.iter().map(|c| c.h).max().unwrap_or(1);

	let mut atlas_width = next_pow2(w_max);
	while u64::from(atlas_width) * u64::from(atlas_width) < total_area {
		atlas_width *= 2;
	}
	let rows_needed = total_area.div_ceil(u64::from(atlas_width)) as u32;
	let mut atlas_height = next_pow2(rows_needed.max(h_max));

	let mut order: Vec<usize> = (0..candidates.len()).collect();
	order.sort_by(|&a, &b| candidates[b].h.cmp(&candidates[a].h));

	let mut positions = pack_attempt(&candidates, &order, atlas_width, atlas_height);
	if positions.is_none() {
		atlas_height *= 2;
		positions = pack_attempt(&candidates, &order, atlas_width, atlas_height);
	}
	let positions = positions.ok_or(SffError::AtlasOverflow)?;

	let tight_w = positions.iter().zip(&candidates).map(|(&(x, _), c)| x + c.w).max().unwrap_or(0);
	let tight_h = positions.iter().zip(&candidates).map(|(&(_, y), c)| y + c.h).max().unwrap_or(0);

	let mut pixels = vec![0u8; tight_w as usize * tight_h as usize];
	let mut placements = Vec::with_capacity(candidates.len());
	for (i, c) in candidates.iter().enumerate() {
		let (x, y) = positions[i];
		blit(&mut pixels, tight_w, &c.pixels, c.w, x, y, c.h);
		placements.push(Placement {
			group: c.group,
			item: c.item,
			atlas_x: x,
			atlas_y: y,
			atlas_w: c.w,
			atlas_h: c.h,
			crop_src_x: c.crop_x,
			crop_src_y: c.crop_y,
			orig_w: c.orig_w,
			orig_h: c.orig_h,
		});
	}

	Ok(Atlas {
		width: tight_w,
		height: tight_h,
		pixels,
		palette_index,
		placements,
		basename: basename.to_string(),
	})
}

fn default_palette_index(sff: &Sff) -> Result<u16, SffError> {
	sff.sprites
		.iter()
		.find(|s| s.group == 0 && s.item == 0 && matches!(s.codec, CodecTag::Pcx | CodecTag::Rle8 | CodecTag::Rle5 | CodecTag::Lz5 | CodecTag::Png10))
		.map(|s| s.palette_index)
		.ok_or(SffError::NoDefaultPalette)
}

/// Bounding box of non-transparent (index != 0) pixels, or `None` if every
/// pixel is transparent.
fn crop_bounds(width: u32, height: u32, pixels: &[u8]) -> Option<(u32, u32, u32, u32)> {
	let (w, h) = (width as usize, height as usize);
	let (mut min_x, mut max_x, mut min_y, mut max_y) = (w, 0usize, h, 0usize);
	let mut any = false;

	for y in 0..h {
		for x in 0..w {
			if pixels[y * w + x] != 0 {
				any = true;
				min_x = min_x.min(x);
				max_x = max_x.max(x);
				min_y = min_y.min(y);
				max_y = max_y.max(y);
			}
		}
	}

	if !any {
		return None;
	}
	Some((min_x as u32, min_y as u32, (max_x - min_x + 1) as u32, (max_y - min_y + 1) as u32))
}

fn extract_region(pixels: &[u8], stride: u32, x: u32, y: u32, w: u32, h: u32) -> Vec<u8> {
	let mut out = vec![0u8; w as usize * h as usize];
	for row in 0..h {
		let src_start = ((y + row) * stride + x) as usize;
		let dst_start = (row * w) as usize;
		out[dst_start..dst_start + w as usize].copy_from_slice(&pixels[src_start..src_start + w as usize]);
	}
	out
}

fn blit(dst: &mut [u8], dst_stride: u32, src: &[u8], src_w: u32, x: u32, y: u32, h: u32) {
	for row in 0..h {
		let dst_start = ((y + row) * dst_stride + x) as usize;
		let src_start = (row * src_w) as usize;
		dst[dst_start..dst_start + src_w as usize].copy_from_slice(&src[src_start..src_start + src_w as usize]);
	}
}

fn next_pow2(n: u32) -> u32 {
	let mut p = 1u32;
	while p < n.max(1) {
		p = p.saturating_mul(2);
	}
	p
}

fn pack_attempt(candidates: &[Candidate], order: &[usize], atlas_width: u32, atlas_height: u32) -> Option<Vec<(u32, u32)>> {
	let mut skyline = Skyline::new(atlas_width);
	let mut positions = vec![(0u32, 0u32); candidates.len()];
	for &idx in order {
		let c = &candidates[idx];
		positions[idx] = skyline.place(c.w, c.h, atlas_height)?;
	}
	Some(positions)
}

/// A skyline height profile over `[0, width)`, as a list of contiguous,
/// x-sorted `(x, width, height)` segments.
struct Skyline {
	segments: Vec<(u32, u32, u32)>,
	width: u32,
}

impl Skyline {
	fn new(width: u32) -> Self {
		Self {
			segments: vec![(0, width, 0)],
			width,
		}
	}

	fn height_over(&self, x: u32, w: u32) -> u32 {
		let end = x + w;
		self.segments
			.iter()
			.filter(|&&(sx, sw, _)| sx < end && sx + sw > x)
			.map(|&(_, _, sh)| sh)
			.max()
			.unwrap_or(0)
	}

	/// Lowest-then-leftmost bottom-left placement, or `None` if no segment
	/// origin fits `w` within the atlas width or `h` within `atlas_height`.
	fn place(&mut self, w: u32, h: u32, atlas_height: u32) -> Option<(u32, u32)> {
		let mut best: Option<(u32, u32)> = None; // (y, x)
		for &(sx, _, _) in &self.segments {
			if sx + w > self.width {
				continue;
			}
			let y = self.height_over(sx, w);
			if y + h > atlas_height {
				continue;
			}
			best = Some(match best {
				Some(b) if b <= (y, sx) => b,
				_ => (y, sx),
			});
		}

		let (y, x) = best?;
		self.insert(x, w, y + h);
		Some((x, y))
	}

	fn insert(&mut self, x: u32, w: u32, new_height: u32) {
		let end = x + w;
		let mut segments = Vec::with_capacity(self.segments.len() + 2);
		for &(sx, sw, sh) in &self.segments {
			let sx_end = sx + sw;
			if sx_end <= x || sx >= end {
				segments.push((sx, sw, sh));
				continue;
			}
			if sx < x {
				segments.push((sx, x - sx, sh));
			}
			if sx_end > end {
				segments.push((end, sx_end - end, sh));
			}
		}
		segments.push((x, w, new_height));
		segments.sort_by_key(|&(sx, _, _)| sx);
		self.segments = segments;
	}
}
