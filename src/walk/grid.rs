//! Occupancy grid and extent bookkeeping

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Running bounds of every floor cell written so far.
///
/// Used only to center output around the origin, never for walk correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub min: IVec2,
    pub max: IVec2,
}

impl Extent {
    fn at(point: IVec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Fold a newly set floor cell into the bounds.
    fn cover(&mut self, point: IVec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Span of the used area along each axis.
    pub fn size(&self) -> IVec2 {
        self.max - self.min
    }
}

/// Square boolean occupancy buffer, flat row-major.
///
/// The side is `2 * steps + 3`: `2 * steps + 1` so a walker taking `steps`
/// moves from the center can never leave the buffer, plus a one-cell apron
/// so every derived wall also lands in bounds. Writes outside the grid are
/// silent no-ops; the boundary is a soft constraint for both generator and
/// host.
#[derive(Debug, Clone)]
pub struct FloorGrid {
    cells: Vec<bool>,
    size: i32,
    mid: i32,
    extent: Extent,
}

impl FloorGrid {
    /// Allocate a cleared grid for the given step budget and mark the center
    /// cell as floor.
    pub fn new(steps: u32) -> Self {
        let size = steps as i32 * 2 + 3;
        let mid = steps as i32 + 1;
        let mut grid = Self {
            cells: vec![false; (size * size) as usize],
            size,
            mid,
            extent: Extent::at(IVec2::splat(mid)),
        };
        grid.set_floor(IVec2::splat(mid));
        grid
    }

    /// Side length of the square buffer.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The guaranteed-interior starting coordinate (on both axes).
    pub fn mid(&self) -> i32 {
        self.mid
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.size && cell.y >= 0 && cell.y < self.size
    }

    /// Whether a cell is floor. Out-of-bounds cells are not.
    pub fn is_floor(&self, cell: IVec2) -> bool {
        self.in_bounds(cell) && self.cells[self.index(cell)]
    }

    /// Mark a cell as floor and grow the extent. Out-of-bounds writes and
    /// revisits are no-ops.
    pub fn set_floor(&mut self, cell: IVec2) {
        if !self.in_bounds(cell) {
            return;
        }
        let index = self.index(cell);
        self.cells[index] = true;
        self.extent.cover(cell);
    }

    fn index(&self, cell: IVec2) -> usize {
        (cell.y * self.size + cell.x) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_has_center_floor() {
        let grid = FloorGrid::new(5);
        assert_eq!(grid.size(), 13);
        assert_eq!(grid.mid(), 6);
        assert!(grid.is_floor(IVec2::splat(6)));
        assert_eq!(grid.extent(), Extent::at(IVec2::splat(6)));
    }

    #[test]
    fn test_zero_budget_grid() {
        let grid = FloorGrid::new(0);
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.mid(), 1);
        assert!(grid.is_floor(IVec2::splat(1)));
    }

    #[test]
    fn test_out_of_bounds_write_is_noop() {
        let mut grid = FloorGrid::new(1);
        let extent = grid.extent();
        grid.set_floor(IVec2::new(-1, 0));
        grid.set_floor(IVec2::new(0, grid.size()));
        assert!(!grid.is_floor(IVec2::new(-1, 0)));
        assert_eq!(grid.extent(), extent);
    }

    #[test]
    fn test_extent_tracks_writes() {
        let mut grid = FloorGrid::new(2);
        grid.set_floor(IVec2::new(1, 3));
        grid.set_floor(IVec2::new(5, 2));
        let extent = grid.extent();
        assert_eq!(extent.min, IVec2::new(1, 2));
        assert_eq!(extent.max, IVec2::new(5, 3));
        assert_eq!(extent.size(), IVec2::new(4, 1));
    }

    #[test]
    fn test_revisit_is_idempotent() {
        let mut grid = FloorGrid::new(2);
        grid.set_floor(IVec2::new(4, 4));
        let extent = grid.extent();
        grid.set_floor(IVec2::new(4, 4));
        assert_eq!(grid.extent(), extent);
        assert!(grid.is_floor(IVec2::new(4, 4)));
    }
}
