use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Inclusive integer range used for building heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightRange {
    min: u32,
    max: u32,
}

impl HeightRange {
    pub(crate) const DEFAULT_BUILDING: Self = Self { min: 1, max: 5 };

    pub fn new(min: u32, max: u32) -> Result<Self, LayoutError> {
        let range = Self { min, max };
        range.validate("building_heights")?;
        Ok(range)
    }

    pub fn validate(&self, field: &'static str) -> Result<(), LayoutError> {
        if self.min == 0 {
            return Err(LayoutError::NonPositive { field, value: 0.0 });
        }
        if self.min > self.max {
            return Err(LayoutError::InvertedRange {
                field,
                min: self.min as f32,
                max: self.max as f32,
            });
        }
        Ok(())
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Bounds read from an unvalidated snapshot may be inverted; they are swapped here.
    pub fn sample(&self, rng: &mut Rng) -> u32 {
        let low = self.min.min(self.max);
        let high = self.min.max(self.max);
        rng.u32(low..=high)
    }
}

/// Inclusive real range for speeds and elevations. Zero is allowed, negative values are not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    min: f32,
    max: f32,
}

impl FloatRange {
    pub(crate) const DEFAULT_SPEED: Self = Self { min: 1.5, max: 4.0 };
    pub(crate) const DEFAULT_ELEVATION: Self = Self {
        min: 0.05,
        max: 0.15,
    };

    pub fn new(field: &'static str, min: f32, max: f32) -> Result<Self, LayoutError> {
        let range = Self { min, max };
        range.validate(field)?;
        Ok(range)
    }

    pub fn validate(&self, field: &'static str) -> Result<(), LayoutError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(LayoutError::NonFinite { field });
        }
        if self.min < 0.0 {
            return Err(LayoutError::NonPositive {
                field,
                value: self.min,
            });
        }
        if self.min > self.max {
            return Err(LayoutError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Never panics; an unvalidated range with non-finite bounds samples as zero.
    pub fn sample(&self, rng: &mut Rng) -> f32 {
        let (low, high) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        let value = low + (high - low) * rng.f32();
        if value.is_finite() {
            value.max(low).min(high)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_range_rejects_zero_and_inverted_bounds() {
        assert!(matches!(
            HeightRange::new(0, 3),
            Err(LayoutError::NonPositive { .. })
        ));
        assert!(matches!(
            HeightRange::new(5, 1),
            Err(LayoutError::InvertedRange { .. })
        ));
        assert!(HeightRange::new(2, 2).is_ok());
    }

    #[test]
    fn height_samples_stay_inclusive() {
        let range = HeightRange::new(1, 5).unwrap();
        let mut rng = Rng::with_seed(3);
        let mut seen_max = false;
        for _ in 0..500 {
            let value = range.sample(&mut rng);
            assert!(range.contains(value));
            seen_max |= value == 5;
        }
        assert!(seen_max);
    }

    #[test]
    fn float_range_validation() {
        assert!(matches!(
            FloatRange::new("speed", -1.0, 2.0),
            Err(LayoutError::NonPositive { field: "speed", .. })
        ));
        assert!(matches!(
            FloatRange::new("speed", 3.0, 2.0),
            Err(LayoutError::InvertedRange { .. })
        ));
        assert!(matches!(
            FloatRange::new("speed", 0.0, f32::INFINITY),
            Err(LayoutError::NonFinite { .. })
        ));

        let range = FloatRange::new("speed", 1.5, 4.0).unwrap();
        let mut rng = Rng::with_seed(9);
        for _ in 0..200 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn deserialized_inverted_ranges_still_sample_inside_their_bounds() {
        let heights: HeightRange = serde_json::from_str(r#"{ "min": 5, "max": 1 }"#).unwrap();
        assert!(heights.validate("building_heights").is_err());
        assert_eq!((heights.min(), heights.max()), (5, 1));

        let speeds: FloatRange = serde_json::from_str(r#"{ "min": 4.0, "max": 1.0 }"#).unwrap();
        let mut rng = Rng::with_seed(5);
        for _ in 0..200 {
            assert!((1..=5).contains(&heights.sample(&mut rng)));
            assert!((1.0..=4.0).contains(&speeds.sample(&mut rng)));
        }
    }
}
