pub mod palette;
pub mod plan;

#[cfg(feature = "generator")]
pub mod generator;
