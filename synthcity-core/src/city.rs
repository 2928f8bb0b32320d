use std::collections::HashSet;

use fastrand::Rng;
use log::{debug, warn};

use crate::building::{Building, place_buildings};
use crate::config::CityConfig;
use crate::error::LayoutError;
use crate::floor::FloorGrid;
use crate::grid::{CellGrid, GridCell};
use crate::layout::Layout;
use crate::parallax::{ParallaxDelta, ParallaxState, PointerInput};
use crate::pool::CandidatePool;
use crate::vehicle::{Lanes, Vehicle, place_vehicles};

/// Input consumed by one call to [`City::step`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub delta_seconds: f32,
    pub pointer: PointerInput,
}

impl FrameInput {
    pub fn new(delta_seconds: f32, pointer: PointerInput) -> Self {
        Self {
            delta_seconds,
            pointer,
        }
    }

    fn sanitized_delta(&self) -> f32 {
        sanitize_delta(self.delta_seconds)
    }
}

/// Negative and non-finite frame times count as no time passing.
pub(crate) fn sanitize_delta(delta_seconds: f32) -> f32 {
    if delta_seconds.is_finite() {
        delta_seconds.max(0.0)
    } else {
        0.0
    }
}

pub struct City {
    pub tick: u64,
    seed: u64,
    config: CityConfig,
    floor: FloorGrid,
    lanes: Lanes,
    pool: CandidatePool,
    buildings: Vec<Building>,
    vehicles: Vec<Vehicle>,
    parallax: ParallaxState,
    rng: Rng,
}

impl City {
    pub fn generate(config: CityConfig, seed: u64) -> Result<Self, LayoutError> {
        config.validate()?;

        let mut rng = Rng::with_seed(seed);
        let grid = CellGrid::new(config.grid_amount, config.scale)?;
        let floor = FloorGrid::new(config.grid_amount, config.scale)?;
        let lanes = Lanes::for_grid(config.grid_amount, &grid);
        let mut pool = CandidatePool::from_grid(grid);

        let buildings = place_buildings(
            &mut pool,
            config.building_amount,
            config.building_heights,
            &mut rng,
        );
        if buildings.len() < config.building_amount {
            warn!(
                "placed {} of {} requested buildings; grid amount {} is too small",
                buildings.len(),
                config.building_amount,
                config.grid_amount
            );
        }

        let vehicles = place_vehicles(
            config.vehicle_amount,
            lanes,
            config.vehicle_speeds,
            config.vehicle_elevations,
            &mut rng,
        );

        debug!(
            "generated city seed={} buildings={} vehicles={} free cells={}",
            seed,
            buildings.len(),
            vehicles.len(),
            pool.len()
        );

        Ok(Self {
            tick: 0,
            seed,
            parallax: ParallaxState::new(config.pitch_limits),
            config,
            floor,
            lanes,
            pool,
            buildings,
            vehicles,
            rng,
        })
    }

    /// Rebuilds a city from a snapshot. Cells already built on are kept out of the pool.
    ///
    /// Building geometry is recomputed from each cell and height, so only those two
    /// fields of a stored building are trusted.
    pub fn from_layout(layout: Layout) -> Result<Self, LayoutError> {
        let Layout {
            seed,
            config,
            buildings: stored,
            vehicles,
        } = layout;
        config.validate()?;

        let grid = CellGrid::new(config.grid_amount, config.scale)?;
        let mut used = HashSet::with_capacity(stored.len());
        let mut buildings = Vec::with_capacity(stored.len());
        for building in &stored {
            let GridCell { col, row } = building.cell;
            if !grid.contains(building.cell) {
                return Err(LayoutError::Snapshot(format!(
                    "building cell ({col}, {row}) lies outside the grid"
                )));
            }
            if !used.insert(building.cell) {
                return Err(LayoutError::Snapshot(format!(
                    "two buildings share cell ({col}, {row})"
                )));
            }
            if !config.building_heights.contains(building.height) {
                return Err(LayoutError::Snapshot(format!(
                    "building at ({col}, {row}) has height {} outside {}..={}",
                    building.height,
                    config.building_heights.min(),
                    config.building_heights.max()
                )));
            }
            buildings.push(Building::new(&grid, building.cell, building.height));
        }

        for vehicle in &vehicles {
            if !config.vehicle_speeds.contains(vehicle.speed)
                || !config.vehicle_elevations.contains(vehicle.elevation)
            {
                return Err(LayoutError::Snapshot(format!(
                    "vehicle speed {} or elevation {} is outside the configured ranges",
                    vehicle.speed, vehicle.elevation
                )));
            }
        }

        let free: Vec<GridCell> = grid.cells().filter(|cell| !used.contains(cell)).collect();
        let pool = CandidatePool::from_cells(grid, free);

        Ok(Self {
            tick: 0,
            seed,
            parallax: ParallaxState::new(config.pitch_limits),
            floor: FloorGrid::new(config.grid_amount, config.scale)?,
            lanes: Lanes::for_grid(config.grid_amount, &grid),
            config,
            pool,
            buildings,
            vehicles,
            rng: Rng::with_seed(seed.wrapping_add(1)),
        })
    }

    /// Advances every vehicle and the parallax by one frame.
    pub fn step(&mut self, input: FrameInput) -> ParallaxDelta {
        let delta_seconds = input.sanitized_delta();
        self.tick += 1;

        for vehicle in &mut self.vehicles {
            vehicle.advance(delta_seconds, self.lanes.half_length);
        }

        self.parallax.update(
            input.pointer,
            self.config.parallax_sensitivity,
            delta_seconds,
        )
    }

    /// Draws more buildings from the cells left in the pool and returns the new ones.
    pub fn place_more_buildings(&mut self, count: usize) -> &[Building] {
        let start = self.buildings.len();
        let added = place_buildings(
            &mut self.pool,
            count,
            self.config.building_heights,
            &mut self.rng,
        );
        self.buildings.extend(added);
        &self.buildings[start..]
    }

    pub fn layout(&self) -> Layout {
        Layout {
            seed: self.seed,
            config: self.config.clone(),
            buildings: self.buildings.clone(),
            vehicles: self.vehicles.clone(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    pub fn floor(&self) -> &FloorGrid {
        &self.floor
    }

    pub fn lanes(&self) -> Lanes {
        self.lanes
    }

    pub fn grid(&self) -> &CellGrid {
        self.pool.grid()
    }

    pub fn free_cells(&self) -> usize {
        self.pool.len()
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn parallax(&self) -> &ParallaxState {
        &self.parallax
    }
}
