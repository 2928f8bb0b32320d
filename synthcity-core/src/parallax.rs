use serde::{Deserialize, Serialize};

use crate::city::sanitize_delta;
use crate::error::LayoutError;

pub const DEFAULT_PITCH_MIN: f32 = -0.5;
pub const DEFAULT_PITCH_MAX: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Pointer position in `[-1, 1]` on both axes, origin at the viewport center, y up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerInput {
    pub x: f32,
    pub y: f32,
}

impl PointerInput {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: normalize_axis(x),
            y: normalize_axis(y),
        }
    }

    pub fn centered() -> Self {
        Self::default()
    }

    /// Converts a screen-space position (pixels, y down) into normalized coordinates.
    pub fn from_screen(screen_x: f32, screen_y: f32, viewport: Viewport) -> Self {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Self::centered();
        }
        Self::new(
            screen_x / viewport.width * 2.0 - 1.0,
            -(screen_y / viewport.height * 2.0 - 1.0),
        )
    }
}

fn normalize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchLimits {
    min: f32,
    max: f32,
}

impl PitchLimits {
    pub fn new(min: f32, max: f32) -> Result<Self, LayoutError> {
        let limits = Self { min, max };
        limits.validate()?;
        Ok(limits)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(LayoutError::NonFinite {
                field: "pitch_limits",
            });
        }
        if self.min > self.max {
            return Err(LayoutError::InvertedRange {
                field: "pitch_limits",
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

    /// Never panics, unlike `f32::clamp`. Inverted limits resolve to `max`.
    pub fn clamp(&self, pitch: f32) -> f32 {
        let pitch = if pitch.is_finite() { pitch } else { 0.0 };
        pitch.max(self.min).min(self.max)
    }
}

impl Default for PitchLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_PITCH_MIN,
            max: DEFAULT_PITCH_MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParallaxDelta {
    pub yaw: f32,
    pub pitch: f32,
}

/// Accumulated city rotation driven by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParallaxState {
    pub yaw: f32,
    pub pitch: f32,
    pub limits: PitchLimits,
}

impl ParallaxState {
    pub fn new(limits: PitchLimits) -> Self {
        Self {
            yaw: 0.0,
            pitch: limits.clamp(0.0),
            limits,
        }
    }

    /// Applies one frame of pointer input and returns the rotation actually applied.
    pub fn update(
        &mut self,
        pointer: PointerInput,
        sensitivity: f32,
        delta_seconds: f32,
    ) -> ParallaxDelta {
        let sensitivity = if sensitivity.is_finite() {
            sensitivity
        } else {
            0.0
        };
        let gain = sensitivity * sanitize_delta(delta_seconds);
        let yaw = finite_or_zero(-pointer.x * gain);
        let previous_pitch = self.pitch;

        self.yaw += yaw;
        self.pitch = self
            .limits
            .clamp(self.pitch + finite_or_zero(pointer.y * gain));

        ParallaxDelta {
            yaw,
            pitch: self.pitch - previous_pitch,
        }
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_from_screen_maps_corners() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(
            PointerInput::from_screen(0.0, 0.0, viewport),
            PointerInput::new(-1.0, 1.0)
        );
        assert_eq!(
            PointerInput::from_screen(800.0, 600.0, viewport),
            PointerInput::new(1.0, -1.0)
        );
        assert_eq!(
            PointerInput::from_screen(400.0, 300.0, viewport),
            PointerInput::centered()
        );
    }

    #[test]
    fn pointer_outside_the_viewport_is_clamped() {
        let viewport = Viewport::new(100.0, 100.0);
        let pointer = PointerInput::from_screen(-500.0, 1000.0, viewport);
        assert_eq!(pointer, PointerInput::new(-1.0, -1.0));
        assert_eq!(
            PointerInput::from_screen(10.0, 10.0, Viewport::new(0.0, 0.0)),
            PointerInput::centered()
        );
        assert_eq!(PointerInput::new(f32::NAN, 0.5).x, 0.0);
    }

    #[test]
    fn pointer_right_turns_the_city_left() {
        let mut state = ParallaxState::default();
        let delta = state.update(PointerInput::new(1.0, 0.0), 0.6, 0.5);
        assert!((delta.yaw + 0.3).abs() < 1e-6);
        assert!((state.yaw + 0.3).abs() < 1e-6);
        assert_eq!(delta.pitch, 0.0);
    }

    #[test]
    fn pitch_never_leaves_its_limits() {
        let mut state = ParallaxState::new(PitchLimits::default());

        for _ in 0..100 {
            state.update(PointerInput::new(0.0, 1.0), 50.0, 1.0);
            assert!(state.pitch <= DEFAULT_PITCH_MAX);
        }
        assert_eq!(state.pitch, DEFAULT_PITCH_MAX);

        for _ in 0..100 {
            state.update(PointerInput::new(0.3, -1.0), 1000.0, 0.25);
            assert!(state.pitch >= DEFAULT_PITCH_MIN);
        }
        assert_eq!(state.pitch, DEFAULT_PITCH_MIN);
    }

    #[test]
    fn clamped_update_reports_the_applied_delta() {
        let mut state = ParallaxState::new(PitchLimits::default());
        state.pitch = 0.15;

        let delta = state.update(PointerInput::new(0.0, 1.0), 1.0, 1.0);

        assert!((delta.pitch - 0.05).abs() < 1e-6);
        assert_eq!(state.pitch, DEFAULT_PITCH_MAX);
    }

    #[test]
    fn pitch_limits_reject_inverted_and_nan_bounds() {
        assert!(matches!(
            PitchLimits::new(0.3, -0.3),
            Err(LayoutError::InvertedRange { .. })
        ));
        assert!(matches!(
            PitchLimits::new(f32::NAN, 0.2),
            Err(LayoutError::NonFinite { .. })
        ));
        assert_eq!(PitchLimits::new(-0.5, 0.2).unwrap(), PitchLimits::default());
    }

    #[test]
    fn unvalidated_limits_do_not_panic() {
        let inverted: PitchLimits =
            serde_json::from_str(r#"{ "min": 0.3, "max": -0.3 }"#).unwrap();
        let mut state = ParallaxState::new(inverted);
        assert_eq!(state.pitch, -0.3);
        state.update(PointerInput::new(0.0, 1.0), 1.0, 0.1);
        assert!(state.pitch.is_finite());
    }

    #[test]
    fn infinite_delta_or_sensitivity_leaves_rotation_finite() {
        let mut state = ParallaxState::new(PitchLimits::default());

        let delta = state.update(PointerInput::centered(), 0.6, f32::INFINITY);
        assert_eq!(delta, ParallaxDelta::default());
        state.update(PointerInput::new(1.0, 1.0), f32::INFINITY, 0.1);
        state.update(PointerInput::new(1.0, 1.0), 0.6, f32::NAN);
        assert_eq!((state.yaw, state.pitch), (0.0, 0.0));

        state.update(PointerInput::new(1.0, 0.0), 0.6, 0.5);
        assert!((state.yaw + 0.3).abs() < 1e-6);
    }

    #[test]
    fn aspect_handles_zero_height() {
        assert_eq!(Viewport::new(1920.0, 1080.0).aspect(), 1920.0 / 1080.0);
        assert_eq!(Viewport::new(10.0, 0.0).aspect(), 1.0);
    }
}
