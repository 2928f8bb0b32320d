use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Cells closer than this to the floor edge are never built on.
pub const GRID_MARGIN: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Position on the floor plane, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

impl WorldPos {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

/// Symmetric `span x span` grid of building slots centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    span: u32,
    scale: f32,
}

impl CellGrid {
    pub fn new(grid_amount: u32, scale: f32) -> Result<Self, LayoutError> {
        validate_scale(scale)?;
        Ok(Self {
            span: grid_amount.saturating_sub(GRID_MARGIN),
            scale,
        })
    }

    pub fn span(&self) -> u32 {
        self.span
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Half the number of cells per side; half-integral for odd spans.
    pub fn building_size(&self) -> f32 {
        self.span as f32 / 2.0
    }

    pub fn cell_size(&self) -> f32 {
        self.scale * 2.0
    }

    pub fn cell_count(&self) -> usize {
        (self.span as usize) * (self.span as usize)
    }

    /// Distance from the origin to the edge of the buildable area.
    pub fn buildable_half_extent(&self) -> f32 {
        self.building_size() * self.cell_size()
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let half = (self.span / 2) as i32;
        let span = self.span as i32;
        (0..span).flat_map(move |col| {
            (0..span).map(move |row| GridCell::new(col - half, row - half))
        })
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        let half = (self.span / 2) as i32;
        let range = -half..(self.span as i32 - half);
        range.contains(&cell.col) && range.contains(&cell.row)
    }

    pub fn to_world(&self, cell: GridCell) -> WorldPos {
        let shift = if self.span % 2 == 1 { 0.5 } else { 0.0 };
        WorldPos::new(
            (cell.col as f32 - shift) * self.cell_size(),
            (cell.row as f32 - shift) * self.cell_size(),
        )
    }
}

pub(crate) fn validate_scale(scale: f32) -> Result<(), LayoutError> {
    if !scale.is_finite() {
        return Err(LayoutError::NonFinite { field: "scale" });
    }
    if scale <= 0.0 {
        return Err(LayoutError::NonPositive {
            field: "scale",
            value: scale,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn even_span_is_integral_and_symmetric() {
        let grid = CellGrid::new(20, 0.8).unwrap();
        assert_eq!(grid.span(), 10);
        assert_eq!(grid.building_size(), 5.0);

        let cols: HashSet<i32> = grid.cells().map(|cell| cell.col).collect();
        assert_eq!(cols, (-5..5).collect());

        let world = grid.to_world(GridCell::new(-5, 4));
        assert!((world.x + 8.0).abs() < 1e-5);
        assert!((world.z - 6.4).abs() < 1e-5);
    }

    #[test]
    fn odd_span_shifts_by_half_a_cell() {
        let grid = CellGrid::new(21, 1.0).unwrap();
        assert_eq!(grid.span(), 11);
        assert_eq!(grid.cells().count(), 121);

        let xs: Vec<f32> = grid
            .cells()
            .filter(|cell| cell.row == 0)
            .map(|cell| grid.to_world(cell).x)
            .collect();
        assert_eq!(xs.first().copied(), Some(-11.0));
        assert_eq!(xs.last().copied(), Some(9.0));
    }

    #[test]
    fn small_grids_have_no_cells() {
        for amount in [0, 5, 10] {
            let grid = CellGrid::new(amount, 1.0).unwrap();
            assert_eq!(grid.cells().count(), 0);
            assert_eq!(grid.buildable_half_extent(), 0.0);
        }
    }

    #[test]
    fn rejects_bad_scale() {
        assert!(matches!(
            CellGrid::new(20, 0.0),
            Err(LayoutError::NonPositive { field: "scale", .. })
        ));
        assert!(matches!(
            CellGrid::new(20, -0.8),
            Err(LayoutError::NonPositive { .. })
        ));
        assert!(matches!(
            CellGrid::new(20, f32::NAN),
            Err(LayoutError::NonFinite { .. })
        ));
    }

    #[test]
    fn contains_matches_enumeration() {
        let grid = CellGrid::new(15, 1.0).unwrap();
        assert!(grid.cells().all(|cell| grid.contains(cell)));
        assert!(grid.contains(GridCell::new(-7, 7)));
        assert!(!grid.contains(GridCell::new(8, 0)));
        assert!(!grid.contains(GridCell::new(0, -8)));
    }
}
