use macroquad::prelude::*;
use synthcity_core::{Axis, Vehicle};
use synthcity_plan::palette;

#[derive(Debug, Clone)]
pub struct CarDrawConfig {
    pub length: f32,
    pub width: f32,
    pub height: f32,
    pub trail_length: f32, // world units behind the car
    pub body_color: Color,
    pub trail_color: Color,
}

impl Default for CarDrawConfig {
    fn default() -> Self {
        Self {
            length: 0.3,
            width: 0.1,
            height: 0.06,
            trail_length: 1.2,
            body_color: color_from(palette::CAR),
            trail_color: color_from(palette::CAR_TRAIL),
        }
    }
}

pub fn color_from(rgba: palette::Rgba8) -> Color {
    Color::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3])
}

pub fn car_center(vehicle: &Vehicle) -> Vec3 {
    let [x, y, z] = vehicle.world_position();
    vec3(x, y, z)
}

/// Box size with the long side on the travel axis.
pub fn car_size(vehicle: &Vehicle, config: &CarDrawConfig) -> Vec3 {
    match vehicle.direction.axis() {
        Axis::Z => vec3(config.width, config.height, config.length),
        Axis::X => vec3(config.length, config.height, config.width),
    }
}

pub fn trail_segment(vehicle: &Vehicle, config: &CarDrawConfig) -> (Vec3, Vec3) {
    let [hx, hz] = vehicle.heading();
    let heading = vec3(hx, 0.0, hz);
    let center = car_center(vehicle);
    let start = center - heading * (config.length * 0.5);
    (start, start - heading * config.trail_length)
}

pub fn draw_car(vehicle: &Vehicle, config: &CarDrawConfig, tint: impl Fn(Vec3, Color) -> Color) {
    let center = car_center(vehicle);
    let (trail_start, trail_end) = trail_segment(vehicle, config);

    draw_line_3d(trail_start, trail_end, tint(trail_end, config.trail_color));
    draw_cube(
        center,
        car_size(vehicle, config),
        None,
        tint(center, config.body_color),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthcity_core::Direction;

    #[test]
    fn car_is_long_along_its_axis() {
        let config = CarDrawConfig::default();
        let north = Vehicle::new(Direction::North, 1.0, 0.1, 2.0, 16.0);
        let west = Vehicle::new(Direction::West, 1.0, 0.1, 2.0, 16.0);

        assert_eq!(car_size(&north, &config).z, config.length);
        assert_eq!(car_size(&west, &config).x, config.length);
    }

    #[test]
    fn trail_points_behind_the_car() {
        let config = CarDrawConfig::default();
        let mut east = Vehicle::new(Direction::East, 2.0, 0.1, 2.0, 16.0);
        east.position = 0.0;

        let (start, end) = trail_segment(&east, &config);

        assert!((start.x + config.length * 0.5).abs() < 1e-6);
        assert!((end.x - (start.x - config.trail_length)).abs() < 1e-6);
        assert_eq!(start.z, 2.0);
        assert_eq!(end.y, 0.1);
    }
}
