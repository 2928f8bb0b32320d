use macroquad::prelude::*;
use macroquad::rand;

/// Dust drifting upward inside a box around the city.
/// Particles leaving the top re-enter at the floor.
pub struct ParticleField {
    positions: Vec<Vec3>,
    speeds: Vec<f32>,
    ceiling: f32,
}

impl ParticleField {
    pub fn new(count: usize, half_extent: f32, ceiling: f32) -> Self {
        let half_extent = half_extent.max(0.0);
        let ceiling = ceiling.max(f32::EPSILON);
        let mut positions = Vec::with_capacity(count);
        let mut speeds = Vec::with_capacity(count);

        for _ in 0..count {
            positions.push(vec3(
                rand::gen_range(-half_extent, half_extent),
                rand::gen_range(0.0, ceiling),
                rand::gen_range(-half_extent, half_extent),
            ));
            speeds.push(rand::gen_range(0.05, 0.25));
        }

        Self {
            positions,
            speeds,
            ceiling,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn update(&mut self, delta_seconds: f32) {
        let delta_seconds = delta_seconds.max(0.0);
        for (position, speed) in self.positions.iter_mut().zip(&self.speeds) {
            position.y += speed * delta_seconds;
            if position.y > self.ceiling {
                position.y -= self.ceiling;
            }
        }
    }

    pub fn draw(&self, radius: f32, color: Color, tint: impl Fn(Vec3, Color) -> Color) {
        for &position in &self.positions {
            draw_sphere(position, radius, None, tint(position, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particles_start_inside_the_box() {
        let field = ParticleField::new(200, 5.0, 3.0);
        assert_eq!(field.positions().len(), 200);
        for p in field.positions() {
            assert!(p.x.abs() <= 5.0 && p.z.abs() <= 5.0);
            assert!((0.0..=3.0).contains(&p.y));
        }
    }

    #[test]
    fn particles_wrap_at_the_ceiling() {
        let mut field = ParticleField::new(50, 2.0, 1.0);
        for _ in 0..1000 {
            field.update(0.5);
        }
        assert!(field.positions().iter().all(|p| (0.0..=1.0).contains(&p.y)));
    }
}
