use pv_core::{ImageView, Rgba};

use crate::extract::{ExtractConfig, Region, RegionExtractor};
use crate::visited::VisitedMap;

/// Row-major seed scan that yields one region per unvisited opaque pixel.
///
/// Transparent cells are marked as they are passed. Empty regions are never
/// yielded.
#[derive(Debug)]
pub struct RegionScan<'a> {
    grid: ImageView<'a, Rgba>,
    visited: VisitedMap,
    extractor: RegionExtractor,
    cursor: usize,
}

impl<'a> RegionScan<'a> {
    pub fn new(grid: ImageView<'a, Rgba>, cfg: ExtractConfig) -> Self {
        Self {
            visited: VisitedMap::new(grid.width(), grid.height()),
            grid,
            extractor: RegionExtractor::with_config(cfg),
            cursor: 0,
        }
    }

    pub fn visited(&self) -> &VisitedMap {
        &self.visited
    }

    pub fn into_visited(self) -> VisitedMap {
        self.visited
    }
}

impl Iterator for RegionScan<'_> {
    type Item = Region;

    fn next(&mut self) -> Option<Region> {
        let width = self.grid.width();
        let total = width * self.grid.height();

        while self.cursor < total {
            let (x, y) = (self.cursor % width, self.cursor / width);
            self.cursor += 1;

            if self.visited.is_visited(x, y) {
                continue;
            }
            let Some(&px) = self.grid.get(x, y) else {
                continue;
            };
            if !px.is_opaque() {
                self.visited.mark_transparent(x, y);
                continue;
            }

            let region = self
                .extractor
                .extract(&self.grid, &mut self.visited, (x, y), px.rgb());
            if !region.is_empty() {
                return Some(region);
            }
        }

        None
    }
}

/// Runs a full scan and collects every region in seed order.
pub fn scan_regions(grid: &ImageView<'_, Rgba>, cfg: &ExtractConfig) -> Vec<Region> {
    RegionScan::new(*grid, *cfg).collect()
}
