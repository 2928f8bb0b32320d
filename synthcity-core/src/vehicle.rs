use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::city::sanitize_delta;
use crate::grid::CellGrid;
use crate::range::FloatRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// +Z
    North,
    /// -Z
    South,
    /// +X
    East,
    /// -X
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::Z,
            Direction::East | Direction::West => Axis::X,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Direction::North | Direction::East => 1.0,
            Direction::South | Direction::West => -1.0,
        }
    }
}

/// Extent of the roads vehicles drive on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lanes {
    /// Distance from the center to the point where a vehicle wraps around.
    pub half_length: f32,
    /// Lateral offsets are drawn from `[-lateral_half_extent, lateral_half_extent)`.
    pub lateral_half_extent: f32,
}

impl Lanes {
    pub fn for_grid(grid_amount: u32, grid: &CellGrid) -> Self {
        Self {
            half_length: grid_amount as f32 * grid.scale(),
            lateral_half_extent: grid.buildable_half_extent(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub direction: Direction,
    pub lateral_offset: f32,
    pub elevation: f32,
    pub speed: f32,
    /// Coordinate along the travel axis.
    pub position: f32,
}

impl Vehicle {
    /// Creates a vehicle sitting on the boundary it drives away from.
    pub fn new(
        direction: Direction,
        lateral_offset: f32,
        elevation: f32,
        speed: f32,
        lane_half_length: f32,
    ) -> Self {
        Self {
            direction,
            lateral_offset,
            elevation,
            speed,
            position: -direction.sign() * lane_half_length,
        }
    }

    pub fn advance(&mut self, delta_seconds: f32, lane_half_length: f32) {
        let step = sanitize_delta(self.speed * sanitize_delta(delta_seconds));
        match self.direction {
            Direction::North | Direction::East => {
                self.position += step;
                if self.position >= lane_half_length {
                    self.position = -lane_half_length;
                }
            }
            Direction::South | Direction::West => {
                self.position -= step;
                if self.position <= -lane_half_length {
                    self.position = lane_half_length;
                }
            }
        }
    }

    /// World-space `[x, y, z]` of the vehicle.
    pub fn world_position(&self) -> [f32; 3] {
        match self.direction.axis() {
            Axis::Z => [self.lateral_offset, self.elevation, self.position],
            Axis::X => [self.position, self.elevation, self.lateral_offset],
        }
    }

    /// Unit travel vector on the floor plane as `[x, z]`.
    pub fn heading(&self) -> [f32; 2] {
        let sign = self.direction.sign();
        match self.direction.axis() {
            Axis::Z => [0.0, sign],
            Axis::X => [sign, 0.0],
        }
    }
}

pub fn place_vehicles(
    count: usize,
    lanes: Lanes,
    speeds: FloatRange,
    elevations: FloatRange,
    rng: &mut Rng,
) -> Vec<Vehicle> {
    (0..count)
        .map(|_| {
            let direction = Direction::ALL[rng.usize(..Direction::ALL.len())];
            let lateral_offset = lanes.lateral_half_extent * (rng.f32() * 2.0 - 1.0);
            let speed = speeds.sample(rng);
            let elevation = elevations.sample(rng);
            Vehicle::new(
                direction,
                lateral_offset,
                elevation,
                speed,
                lanes.half_length,
            )
        })
        .collect()
}
