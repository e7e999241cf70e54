//! Octree color quantization with Floyd-Steinberg dithering (§4.F).
mod octree;
mod quantize;

pub use octree::{generate_octree, IndexTables, Octree, CQ_NLEVELS};
pub use quantize::{bitmap_from_indexed_colors, quantize, quantized};
