//! Umbrella crate for the `pixel-vector` workspace.
//!
//! Re-exports the grid, region and SVG crates and adds the file boundary:
//! decoding a raster into an RGBA grid and writing the finished document.

mod io;

pub use io::{
    RasterError, SUPPORTED_EXTENSIONS, is_supported_extension, load_rgba, output_path,
    rgba_from_dynamic, save_document,
};
pub use pv_core::*;
pub use pv_region::*;
pub use pv_svg::*;
