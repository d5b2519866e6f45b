//! Vector output for extracted pixel regions.
//!
//! - [`ShapeEmitter`] turns one region into SVG `<rect>` markup: a lone pixel
//!   is written bare, a multi-pixel region is wrapped in a numbered `<g>`.
//! - [`Template`] substitutes named placeholders in a document skeleton.
//! - [`Converter`] drives the row-major region scan over a grid and
//!   accumulates the document body.
//!
//! Coordinates are `pixel index × pitch`, where the pitch is
//! `(pixel_size + gap) × unit_scale`. The default unit scale converts
//! 96-dpi pixel units into millimetres.

mod convert;
mod emit;
mod template;

pub use convert::{Conversion, ConversionStats, Converter};
pub use emit::{MM_PER_PX, Pitch, ShapeEmitter, ShapeStyle};
pub use template::{HEIGHT_KEY, SHAPES_KEY, Template, TemplateError, WIDTH_KEY};
