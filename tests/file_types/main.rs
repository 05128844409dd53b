//! End-to-end integration tests exercising the full SFF decode and atlas
//! pack pipeline through `mugen-sff`'s public surface, rather than the
//! per-module unit tests colocated with each piece of `sff_core`.

mod sff;
