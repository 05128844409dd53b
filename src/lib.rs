//! `mugen-sff` decodes the Mugen Sprite File (SFF) format — both the v1
//! linked-list container and the v2 fixed-stride container — into an
//! in-memory catalog of sprite bitmaps and color palettes, and packs that
//! catalog into a single atlas image for offline re-export.
//!
//! This crate is a thin facade over [`sff_core`], which holds the actual
//! parsing, codec, and packing logic.

pub use sff_core::*;
