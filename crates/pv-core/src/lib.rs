//! Pixel grid primitives for raster-to-vector conversion.
//!
//! ## Grids
//! Grids are stored packed and row-major: cell `(x, y)` lives at
//! `y * width + x`. Views borrow the whole grid.
//!
//! ## Coordinates
//! `(x, y)` addresses column `x` of row `y`; `(0, 0)` is the top-left pixel.
//! Signed lookups through [`ImageView::in_bounds`] accept out-of-range neighbors
//! and report them as outside the full `0..width`, `0..height` extent.
//!
//! ## Opacity
//! A pixel is opaque only when its alpha is exactly 255. Anything lower is
//! treated as transparent by the region scan.

mod error;
mod image;
mod pixel;

pub use error::Error;
pub use image::{Image, ImageView, ImageViewMut};
pub use pixel::{Rgb, Rgba};
