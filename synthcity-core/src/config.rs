use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::grid::validate_scale;
use crate::parallax::PitchLimits;
use crate::range::{FloatRange, HeightRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Floor half-extent in cells. Buildings use the inner `grid_amount - 10`.
    pub grid_amount: u32,
    pub building_amount: usize,
    /// World units per floor cell.
    pub scale: f32,
    pub building_heights: HeightRange,
    pub vehicle_amount: usize,
    pub vehicle_speeds: FloatRange,
    pub vehicle_elevations: FloatRange,
    /// Radians per second at full pointer deflection.
    pub parallax_sensitivity: f32,
    pub pitch_limits: PitchLimits,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            grid_amount: 20,
            building_amount: 50,
            scale: 0.8,
            building_heights: HeightRange::DEFAULT_BUILDING,
            vehicle_amount: 12,
            vehicle_speeds: FloatRange::DEFAULT_SPEED,
            vehicle_elevations: FloatRange::DEFAULT_ELEVATION,
            parallax_sensitivity: 0.6,
            pitch_limits: PitchLimits::default(),
        }
    }
}

impl CityConfig {
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_scale(self.scale)?;
        self.building_heights.validate("building_heights")?;
        self.vehicle_speeds.validate("vehicle_speeds")?;
        self.vehicle_elevations.validate("vehicle_elevations")?;

        if !self.parallax_sensitivity.is_finite() {
            return Err(LayoutError::NonFinite {
                field: "parallax_sensitivity",
            });
        }
        if self.parallax_sensitivity < 0.0 {
            return Err(LayoutError::NonPositive {
                field: "parallax_sensitivity",
                value: self.parallax_sensitivity,
            });
        }

        self.pitch_limits.validate()
    }
}
