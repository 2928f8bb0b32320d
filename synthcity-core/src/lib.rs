pub mod building;
pub mod city;
pub mod config;
pub mod error;
pub mod floor;
pub mod grid;
pub mod layout;
pub mod parallax;
pub mod pool;
pub mod range;
pub mod vehicle;

pub use building::{BASE_SLAB_HEIGHT, BaseSlab, Building, FOOTPRINT_RATIO, place_buildings};
pub use city::{City, FrameInput};
pub use config::CityConfig;
pub use error::LayoutError;
pub use floor::{FloorGrid, FloorLine};
pub use grid::{CellGrid, GRID_MARGIN, GridCell, WorldPos};
pub use layout::Layout;
pub use parallax::{ParallaxDelta, ParallaxState, PitchLimits, PointerInput, Viewport};
pub use pool::CandidatePool;
pub use range::{FloatRange, HeightRange};
pub use vehicle::{Axis, Direction, Lanes, Vehicle, place_vehicles};
