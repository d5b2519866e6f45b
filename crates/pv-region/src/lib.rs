//! Same-color connected-region extraction over RGBA pixel grids.
//!
//! A region is a set of opaque pixels sharing one RGB color that are
//! reachable from a seed pixel through the chosen connectivity:
//! - [`Connectivity::C8`]: orthogonal and diagonal neighbors (default).
//! - [`Connectivity::C4`]: orthogonal neighbors only.
//!
//! Extraction is a breadth-first traversal with an explicit queue and a hard
//! member cap ([`LIMIT`] by default). Pixels beyond the cap stay unvisited and
//! seed later regions, so one large blob may be split into several regions.
//! The split is deterministic for a given grid and configuration.

mod extract;
mod scan;
mod visited;

pub use extract::{Connectivity, ExtractConfig, LIMIT, Region, RegionExtractor};
pub use scan::{RegionScan, scan_regions};
pub use visited::{CellState, VisitedMap};
