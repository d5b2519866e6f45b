use std::collections::BTreeMap;

use log::{debug, trace};
use pv_core::{ImageView, Rgba};
use pv_region::{CellState, ExtractConfig, RegionScan};
use serde::Serialize;

use crate::emit::{Pitch, ShapeEmitter, ShapeStyle};
use crate::template::{HEIGHT_KEY, SHAPES_KEY, Template, TemplateError, WIDTH_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ConversionStats {
    pub width: usize,
    pub height: usize,
    pub regions: usize,
    pub groups: usize,
    pub single_pixels: usize,
    pub opaque_pixels: usize,
    pub transparent_pixels: usize,
    pub largest_region: usize,
}

/// Result of one scan: the shape markup plus document dimensions.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub body: String,
    pub doc_width: f64,
    pub doc_height: f64,
    pub stats: ConversionStats,
}

impl Conversion {
    /// Fills the width, height and shape placeholders of `template`.
    pub fn render(&self, template: &Template) -> Result<String, TemplateError> {
        let values = BTreeMap::from([
            (WIDTH_KEY, self.doc_width.to_string()),
            (HEIGHT_KEY, self.doc_height.to_string()),
            (SHAPES_KEY, self.body.clone()),
        ]);
        template.render(&values)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Converter {
    pub extract: ExtractConfig,
    pub pitch: Pitch,
    pub style: ShapeStyle,
}

impl Converter {
    pub fn new(extract: ExtractConfig, pitch: Pitch, style: ShapeStyle) -> Self {
        Self {
            extract,
            pitch,
            style,
        }
    }

    pub fn convert(&self, grid: &ImageView<'_, Rgba>) -> Conversion {
        let emitter = ShapeEmitter::new(self.pitch, self.style.clone(), grid.width());
        let mut ctx = RunContext::new(*grid, self.extract);
        ctx.run(&emitter);

        let step = self.pitch.pitch();
        Conversion {
            doc_width: grid.width() as f64 * step,
            doc_height: grid.height() as f64 * step,
            stats: ctx.stats,
            body: ctx.body,
        }
    }

    pub fn render(
        &self,
        grid: &ImageView<'_, Rgba>,
        template: &Template,
    ) -> Result<String, TemplateError> {
        self.convert(grid).render(template)
    }
}

/// State owned by a single conversion run.
struct RunContext<'a> {
    scan: RegionScan<'a>,
    group_counter: usize,
    body: String,
    stats: ConversionStats,
}

impl<'a> RunContext<'a> {
    fn new(grid: ImageView<'a, Rgba>, cfg: ExtractConfig) -> Self {
        Self {
            scan: RegionScan::new(grid, cfg),
            group_counter: 0,
            body: String::new(),
            stats: ConversionStats {
                width: grid.width(),
                height: grid.height(),
                ..ConversionStats::default()
            },
        }
    }

    fn run(&mut self, emitter: &ShapeEmitter) {
        for region in self.scan.by_ref() {
            trace!(
                "region {} color {} size {} bbox {:?}",
                self.stats.regions,
                region.color,
                region.len(),
                region.bounding_box()
            );

            self.stats.regions += 1;
            self.stats.opaque_pixels += region.len();
            self.stats.largest_region = self.stats.largest_region.max(region.len());
            if region.is_single() {
                self.stats.single_pixels += 1;
            }

            emitter
                .emit_into(&mut self.body, &region, &mut self.group_counter)
                .expect("writing into a String cannot fail");
        }

        self.stats.groups = self.group_counter;
        self.stats.transparent_pixels = self.scan.visited().count(CellState::Transparent);

        debug!(
            "scanned {}x{}: {} regions, {} groups, {} single pixels, {} transparent",
            self.stats.width,
            self.stats.height,
            self.stats.regions,
            self.stats.groups,
            self.stats.single_pixels,
            self.stats.transparent_pixels
        );
    }
}
