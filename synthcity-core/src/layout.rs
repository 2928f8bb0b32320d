use serde::{Deserialize, Serialize};

use crate::building::Building;
use crate::config::CityConfig;
use crate::error::LayoutError;
use crate::vehicle::Vehicle;

/// Serializable snapshot of a generated city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub seed: u64,
    pub config: CityConfig,
    pub buildings: Vec<Building>,
    pub vehicles: Vec<Vehicle>,
}

impl Layout {
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let layout: Self = serde_json::from_str(text)?;
        layout.config.validate()?;
        Ok(layout)
    }

    pub fn tallest(&self) -> Option<&Building> {
        self.buildings.iter().max_by_key(|building| building.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;

    #[test]
    fn tallest_building_has_max_height() {
        let layout = City::generate(CityConfig::default(), 4).unwrap().layout();
        let tallest = layout.tallest().unwrap();
        assert!(layout.buildings.iter().all(|b| b.height <= tallest.height));

        let empty = Layout {
            seed: 0,
            config: CityConfig::default(),
            buildings: Vec::new(),
            vehicles: Vec::new(),
        };
        assert!(empty.tallest().is_none());
    }

    #[test]
    fn snapshot_with_invalid_config_is_rejected() {
        let layout = City::generate(CityConfig::default(), 4).unwrap().layout();
        let mut value: serde_json::Value =
            serde_json::from_str(&layout.to_json().unwrap()).unwrap();
        value["config"]["building_heights"]["min"] = 0.into();
        let text = value.to_string();

        assert!(matches!(
            Layout::from_json(&text),
            Err(LayoutError::NonPositive {
                field: "building_heights",
                ..
            })
        ));
    }
}
