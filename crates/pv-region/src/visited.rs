use pv_core::Image;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Unvisited,
    Transparent,
    InRegion,
}

/// Per-run scan state, one cell per grid pixel.
///
/// A cell leaves `Unvisited` at most once and never returns to it.
#[derive(Debug, Clone)]
pub struct VisitedMap {
    cells: Image<CellState>,
}

impl VisitedMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Image::new_fill(width, height, CellState::Unvisited),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    /// Out-of-range coordinates report `Unvisited`.
    pub fn state(&self, x: usize, y: usize) -> CellState {
        self.cells.get(x, y).copied().unwrap_or_default()
    }

    #[inline]
    pub fn is_visited(&self, x: usize, y: usize) -> bool {
        self.state(x, y) != CellState::Unvisited
    }

    pub fn mark_transparent(&mut self, x: usize, y: usize) {
        self.transition(x, y, CellState::Transparent);
    }

    pub fn mark_region(&mut self, x: usize, y: usize) {
        self.transition(x, y, CellState::InRegion);
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.data().iter().filter(|&&s| s == state).count()
    }

    pub fn all_visited(&self) -> bool {
        self.cells
            .data()
            .iter()
            .all(|&s| s != CellState::Unvisited)
    }

    fn transition(&mut self, x: usize, y: usize, to: CellState) {
        if let Some(cell) = self.cells.get_mut(x, y)
            && *cell == CellState::Unvisited
        {
            *cell = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CellState, VisitedMap};

    #[test]
    fn fresh_map_is_unvisited() {
        let map = VisitedMap::new(3, 2);
        assert_eq!(map.count(CellState::Unvisited), 6);
        assert!(!map.all_visited());
        assert!(!map.is_visited(2, 1));
    }

    #[test]
    fn visited_cells_never_change_state() {
        let mut map = VisitedMap::new(2, 1);
        map.mark_transparent(0, 0);
        map.mark_region(0, 0);
        map.mark_region(1, 0);
        map.mark_transparent(1, 0);

        assert_eq!(map.state(0, 0), CellState::Transparent);
        assert_eq!(map.state(1, 0), CellState::InRegion);
        assert!(map.all_visited());
    }

    #[test]
    fn out_of_range_marks_are_ignored() {
        let mut map = VisitedMap::new(1, 1);
        map.mark_region(5, 5);
        assert_eq!(map.state(5, 5), CellState::Unvisited);
        assert_eq!(map.count(CellState::InRegion), 0);
    }
}
