use fastrand::Rng;
use log::debug;

use crate::error::LayoutError;
use crate::grid::{CellGrid, GridCell};

/// Unassigned building slots. Cells leave the pool when drawn and never come back.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    grid: CellGrid,
    cells: Vec<GridCell>,
}

impl CandidatePool {
    pub fn generate(grid_amount: u32, scale: f32) -> Result<Self, LayoutError> {
        let grid = CellGrid::new(grid_amount, scale)?;
        Ok(Self::from_grid(grid))
    }

    pub fn from_grid(grid: CellGrid) -> Self {
        let cells: Vec<GridCell> = grid.cells().collect();
        if cells.is_empty() {
            debug!("grid span {} leaves no room for buildings", grid.span());
        }
        Self { grid, cells }
    }

    /// Builds a pool from an explicit set of free cells, e.g. when restoring a snapshot.
    pub fn from_cells(grid: CellGrid, cells: Vec<GridCell>) -> Self {
        Self { grid, cells }
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    /// Removes and returns a uniformly chosen cell.
    pub fn take_random(&mut self, rng: &mut Rng) -> Option<GridCell> {
        if self.cells.is_empty() {
            return None;
        }
        let index = rng.usize(..self.cells.len());
        Some(self.cells.swap_remove(index))
    }
}
