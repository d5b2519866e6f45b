use std::collections::VecDeque;

use log::trace;
use pv_core::{ImageView, Rgb, Rgba};
use serde::{Deserialize, Serialize};

use crate::visited::VisitedMap;

/// Default cap on the number of pixels in one region.
pub const LIMIT: usize = 500;

// N, S, E, W, NE, NW, SE, SW
const DX: [isize; 8] = [0, 0, 1, -1, 1, -1, 1, -1];
const DY: [isize; 8] = [-1, 1, 0, 0, -1, -1, 1, 1];
const DIRS_C4: [usize; 4] = [0, 1, 2, 3];
const DIRS_C8: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    C4,
    #[default]
    C8,
}

impl Connectivity {
    #[inline]
    fn dirs(self) -> &'static [usize] {
        match self {
            Self::C4 => &DIRS_C4,
            Self::C8 => &DIRS_C8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub connectivity: Connectivity,
    /// Maximum members per region. `0` is treated as `1`.
    pub limit: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::C8,
            limit: LIMIT,
        }
    }
}

/// Pixels of one region in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub color: Rgb,
    pub pixels: Vec<(usize, usize)>,
}

impl Region {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            pixels: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.pixels.len() == 1
    }

    /// `(min_x, min_y, max_x, max_y)`, inclusive.
    pub fn bounding_box(&self) -> Option<(usize, usize, usize, usize)> {
        let (&(x0, y0), rest) = self.pixels.split_first()?;
        Some(rest.iter().fold(
            (x0, y0, x0, y0),
            |(min_x, min_y, max_x, max_y), &(x, y)| {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            },
        ))
    }
}

/// Breadth-first flood fill with a reusable work queue.
#[derive(Debug, Default)]
pub struct RegionExtractor {
    cfg: ExtractConfig,
    queue: VecDeque<(isize, isize)>,
}

impl RegionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: ExtractConfig) -> Self {
        Self {
            cfg,
            queue: VecDeque::new(),
        }
    }

    /// Collects the opaque pixels of `color` reachable from `seed`.
    ///
    /// Every accepted pixel is marked in `visited`. Once the region holds
    /// `limit` members the traversal stops and queued candidates are dropped
    /// without being marked. A seed that is visited, transparent or of another
    /// color yields an empty region.
    pub fn extract(
        &mut self,
        grid: &ImageView<'_, Rgba>,
        visited: &mut VisitedMap,
        seed: (usize, usize),
        color: Rgb,
    ) -> Region {
        debug_assert_eq!(grid.width(), visited.width());
        debug_assert_eq!(grid.height(), visited.height());

        let limit = self.cfg.limit.max(1);
        let dirs = self.cfg.connectivity.dirs();
        let mut region = Region::new(color);

        self.queue.clear();
        self.queue.push_back((seed.0 as isize, seed.1 as isize));

        while let Some((x, y)) = self.queue.pop_front() {
            let Some((xu, yu)) = grid.in_bounds(x, y) else {
                continue;
            };
            if visited.is_visited(xu, yu) {
                continue;
            }
            let Some(&px) = grid.get(xu, yu) else {
                continue;
            };
            if !px.is_opaque() || px.rgb() != color {
                continue;
            }

            visited.mark_region(xu, yu);
            region.pixels.push((xu, yu));
            if region.len() >= limit {
                trace!("region seeded at {seed:?} capped at {limit} pixels");
                break;
            }

            for &dir in dirs {
                self.queue.push_back((x + DX[dir], y + DY[dir]));
            }
        }

        self.queue.clear();
        region
    }
}
