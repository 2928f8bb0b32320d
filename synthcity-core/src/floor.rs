use crate::error::LayoutError;
use crate::grid::validate_scale;

/// Length of the unit segments the floor lines are made of.
pub const SEGMENT_LENGTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorLine {
    pub start: [f32; 3],
    pub end: [f32; 3],
}

/// Neon line grid covering `[-grid_amount, grid_amount)` cells at `scale` spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorGrid {
    grid_amount: u32,
    scale: f32,
}

impl FloorGrid {
    pub fn new(grid_amount: u32, scale: f32) -> Result<Self, LayoutError> {
        validate_scale(scale)?;
        Ok(Self { grid_amount, scale })
    }

    /// Min and max coordinate reached by any line, including segment overhang.
    pub fn extent(&self) -> (f32, f32) {
        let amount = self.grid_amount as f32;
        let overhang = SEGMENT_LENGTH / 2.0;
        (
            -amount * self.scale - overhang,
            (amount - 1.0) * self.scale + overhang,
        )
    }

    pub fn line_count(&self) -> usize {
        self.grid_amount as usize * 4
    }

    pub fn lines(&self) -> Vec<FloorLine> {
        if self.grid_amount == 0 {
            return Vec::new();
        }

        let amount = self.grid_amount as i32;
        let (min, max) = self.extent();
        let mut lines = Vec::with_capacity(self.line_count());

        for i in -amount..amount {
            let offset = i as f32 * self.scale;
            lines.push(FloorLine {
                start: [offset, 0.0, min],
                end: [offset, 0.0, max],
            });
            lines.push(FloorLine {
                start: [min, 0.0, offset],
                end: [max, 0.0, offset],
            });
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_floor_has_eighty_lines() {
        let floor = FloorGrid::new(20, 0.8).unwrap();
        let lines = floor.lines();
        assert_eq!(lines.len(), 80);
        assert_eq!(lines.len(), floor.line_count());

        let (min, max) = floor.extent();
        assert!((min + 16.5).abs() < 1e-5);
        assert!((max - 15.7).abs() < 1e-5);
        assert!(lines.iter().all(|line| line.start[1] == 0.0 && line.end[1] == 0.0));
    }

    #[test]
    fn lines_alternate_between_axes() {
        let floor = FloorGrid::new(2, 1.0).unwrap();
        let lines = floor.lines();
        assert_eq!(lines[0].start[0], -2.0);
        assert_eq!(lines[0].start[0], lines[0].end[0]);
        assert_eq!(lines[1].start[2], -2.0);
        assert_eq!(lines[1].start[2], lines[1].end[2]);
    }

    #[test]
    fn empty_floor() {
        assert!(FloorGrid::new(0, 1.0).unwrap().lines().is_empty());
        assert!(FloorGrid::new(3, 0.0).is_err());
    }
}
