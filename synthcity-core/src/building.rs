use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{CellGrid, GridCell, WorldPos};
use crate::pool::CandidatePool;
use crate::range::HeightRange;

/// Fraction of the cell a building's footprint covers; the rest is street.
pub const FOOTPRINT_RATIO: f32 = 0.9;
/// Height of the slab under every building, in world units.
pub const BASE_SLAB_HEIGHT: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseSlab {
    pub size: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub cell: GridCell,
    pub position: WorldPos,
    /// Number of floors, each `scale` world units tall.
    pub height: u32,
    pub footprint: f32,
    pub world_height: f32,
    pub base: BaseSlab,
}

impl Building {
    pub fn new(grid: &CellGrid, cell: GridCell, height: u32) -> Self {
        let cell_size = grid.cell_size();
        Self {
            cell,
            position: grid.to_world(cell),
            height,
            footprint: cell_size * FOOTPRINT_RATIO,
            world_height: height as f32 * grid.scale(),
            base: BaseSlab {
                size: cell_size,
                height: BASE_SLAB_HEIGHT,
            },
        }
    }

    /// Y coordinate of the box center so the building rests on the floor.
    pub fn center_y(&self) -> f32 {
        self.world_height / 2.0
    }
}

/// Draws up to `count` buildings from `pool`. Fewer are returned once the pool runs dry.
pub fn place_buildings(
    pool: &mut CandidatePool,
    count: usize,
    heights: HeightRange,
    rng: &mut Rng,
) -> Vec<Building> {
    let grid = *pool.grid();
    let mut buildings = Vec::with_capacity(count.min(pool.len()));

    for _ in 0..count {
        let Some(cell) = pool.take_random(rng) else {
            break;
        };
        let height = heights.sample(rng);
        buildings.push(Building::new(&grid, cell, height));
    }

    buildings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn heights() -> HeightRange {
        HeightRange::new(1, 5).unwrap()
    }

    fn position_key(building: &Building) -> (i32, i32) {
        (
            (building.position.x * 1000.0).round() as i32,
            (building.position.z * 1000.0).round() as i32,
        )
    }

    #[test]
    fn reference_scene_places_fifty_distinct_buildings() {
        let mut pool = CandidatePool::generate(20, 0.8).unwrap();
        let mut rng = Rng::with_seed(42);

        let buildings = place_buildings(&mut pool, 50, heights(), &mut rng);

        assert_eq!(buildings.len(), 50);
        assert_eq!(pool.len(), 50);
        let positions: HashSet<(i32, i32)> = buildings.iter().map(position_key).collect();
        assert_eq!(positions.len(), 50);
        assert!(buildings.iter().all(|b| heights().contains(b.height)));
    }

    #[test]
    fn stops_when_the_pool_runs_dry() {
        let mut pool = CandidatePool::generate(13, 1.0).unwrap();
        let mut rng = Rng::with_seed(7);

        let buildings = place_buildings(&mut pool, 100, heights(), &mut rng);

        assert_eq!(buildings.len(), 9);
        assert!(pool.is_empty());
        assert!(place_buildings(&mut pool, 3, heights(), &mut rng).is_empty());
    }

    #[test]
    fn sequential_calls_never_overlap() {
        let mut pool = CandidatePool::generate(18, 0.8).unwrap();
        let mut rng = Rng::with_seed(11);

        let first = place_buildings(&mut pool, 30, heights(), &mut rng);
        let second = place_buildings(&mut pool, 30, heights(), &mut rng);

        let first_cells: HashSet<GridCell> = first.iter().map(|b| b.cell).collect();
        assert!(second.iter().all(|b| !first_cells.contains(&b.cell)));
        assert_eq!(first.len() + second.len(), 60);
    }

    #[test]
    fn zero_count_or_empty_pool_yields_nothing() {
        let mut pool = CandidatePool::generate(20, 0.8).unwrap();
        let mut rng = Rng::with_seed(1);
        assert!(place_buildings(&mut pool, 0, heights(), &mut rng).is_empty());
        assert_eq!(pool.len(), 100);

        let mut empty = CandidatePool::generate(4, 0.8).unwrap();
        assert!(place_buildings(&mut empty, 10, heights(), &mut rng).is_empty());
    }

    #[test]
    fn building_geometry_scales_with_the_grid() {
        let grid = CellGrid::new(20, 0.8).unwrap();
        let building = Building::new(&grid, GridCell::new(1, -2), 3);

        assert!((building.footprint - 1.44).abs() < 1e-5);
        assert!((building.world_height - 2.4).abs() < 1e-5);
        assert!((building.center_y() - 1.2).abs() < 1e-5);
        assert!((building.base.size - 1.6).abs() < 1e-5);
        assert!(building.base.height < building.world_height);
        assert!((building.position.z + 3.2).abs() < 1e-5);
    }
}
