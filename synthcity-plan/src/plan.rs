use std::error::Error;
use std::fmt;

use synthcity_core::CityConfig;

/// Pixels per floor cell in the rendered plan.
pub const CELL_PIXEL_SIZE: u32 = 16;
/// Largest plan image side, in pixels.
pub const MAX_IMAGE_SIDE: u32 = 16_384;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanTooLarge {
    pub grid_amount: u32,
}

impl fmt::Display for PlanTooLarge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grid amount {} gives a plan wider than {} pixels",
            self.grid_amount, MAX_IMAGE_SIDE
        )
    }
}

impl Error for PlanTooLarge {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanGeometry {
    grid_amount: u32,
    scale: f32,
    cell_px: u32,
    side: u32,
}

impl PlanGeometry {
    pub fn for_config(config: &CityConfig) -> Result<Self, PlanTooLarge> {
        let too_large = PlanTooLarge {
            grid_amount: config.grid_amount,
        };
        let side = config
            .grid_amount
            .checked_mul(2)
            .and_then(|cells| cells.checked_mul(CELL_PIXEL_SIZE))
            .filter(|&side| side <= MAX_IMAGE_SIDE)
            .ok_or(too_large)?;

        Ok(Self {
            grid_amount: config.grid_amount,
            scale: config.scale,
            cell_px: CELL_PIXEL_SIZE,
            side,
        })
    }

    pub fn cell_px(&self) -> u32 {
        self.cell_px
    }

    /// Floor cells per image side.
    pub fn cells_per_side(&self) -> u32 {
        self.grid_amount * 2
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.side, self.side)
    }

    pub fn pixels_per_unit(&self) -> f32 {
        self.cell_px as f32 / self.scale
    }

    /// Maps a floor position to pixel coordinates. World +Z points down the image.
    pub fn world_to_pixel(&self, x: f32, z: f32) -> (f32, f32) {
        let offset = self.grid_amount as f32 * self.scale;
        (
            (x + offset) * self.pixels_per_unit(),
            (z + offset) * self.pixels_per_unit(),
        )
    }

    pub fn length_to_pixels(&self, length: f32) -> f32 {
        length * self.pixels_per_unit()
    }
}
