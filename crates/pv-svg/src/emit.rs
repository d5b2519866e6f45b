use std::fmt::{self, Write};

use pv_region::Region;
use serde::{Deserialize, Serialize};

/// Millimetres per 96-dpi pixel unit.
pub const MM_PER_PX: f64 = 25.4 / 96.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pitch {
    /// Edge length of one output square, in pixel units.
    pub pixel_size: f64,
    /// Spacing between neighboring squares, in pixel units.
    pub gap: f64,
    /// Conversion from pixel units to document units.
    pub unit_scale: f64,
}

impl Default for Pitch {
    fn default() -> Self {
        Self {
            pixel_size: 64.0,
            gap: 0.0,
            unit_scale: MM_PER_PX,
        }
    }
}

impl Pitch {
    /// Distance between adjacent pixel origins, in document units.
    #[inline]
    pub fn pitch(&self) -> f64 {
        (self.pixel_size + self.gap) * self.unit_scale
    }

    /// Square edge length, in document units.
    #[inline]
    pub fn edge(&self) -> f64 {
        self.pixel_size * self.unit_scale
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub id_prefix: String,
    pub group_prefix: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            id_prefix: "p_".to_owned(),
            group_prefix: "g_".to_owned(),
            stroke: "#000000".to_owned(),
            stroke_width: 0.1,
        }
    }
}

/// Writes one region as unit squares.
///
/// Rectangle ids are `id_prefix + (y * image_width + x)`, so each pixel keeps
/// a stable address across runs.
#[derive(Debug, Clone)]
pub struct ShapeEmitter {
    pitch: Pitch,
    style: ShapeStyle,
    image_width: usize,
}

impl ShapeEmitter {
    pub fn new(pitch: Pitch, style: ShapeStyle, image_width: usize) -> Self {
        Self {
            pitch,
            style,
            image_width,
        }
    }

    /// Markup for `region`.
    ///
    /// A single-pixel region is emitted bare. A larger one is wrapped in a
    /// group named after `group_counter`, which is then incremented. Empty
    /// regions produce no markup and leave the counter alone.
    pub fn emit(&self, region: &Region, group_counter: &mut usize) -> String {
        let mut out = String::new();
        self.emit_into(&mut out, region, group_counter)
            .expect("writing into a String cannot fail");
        out
    }

    pub fn emit_into(
        &self,
        out: &mut String,
        region: &Region,
        group_counter: &mut usize,
    ) -> fmt::Result {
        match region.pixels.as_slice() {
            [] => Ok(()),
            [(x, y)] => self.write_rect(out, region, *x, *y, "    "),
            pixels => {
                writeln!(out, "    <g")?;
                writeln!(
                    out,
                    "       id=\"{}{}\">",
                    self.style.group_prefix, group_counter
                )?;
                for &(x, y) in pixels {
                    self.write_rect(out, region, x, y, "      ")?;
                }
                writeln!(out, "    </g>")?;
                *group_counter += 1;
                Ok(())
            }
        }
    }

    fn write_rect(
        &self,
        out: &mut String,
        region: &Region,
        x: usize,
        y: usize,
        indent: &str,
    ) -> fmt::Result {
        let step = self.pitch.pitch();
        let edge = self.pitch.edge();

        writeln!(out, "{indent}<rect")?;
        writeln!(
            out,
            "{indent}   style=\"fill:{};fill-opacity:1;stroke:{};stroke-width:{};stroke-opacity:1\"",
            region.color, self.style.stroke, self.style.stroke_width
        )?;
        writeln!(
            out,
            "{indent}   id=\"{}{}\"",
            self.style.id_prefix,
            y * self.image_width + x
        )?;
        writeln!(out, "{indent}   width=\"{edge}\"")?;
        writeln!(out, "{indent}   height=\"{edge}\"")?;
        writeln!(out, "{indent}   x=\"{}\"", x as f64 * step)?;
        writeln!(out, "{indent}   y=\"{}\" />", y as f64 * step)
    }
}
