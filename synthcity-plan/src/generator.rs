use image::{Rgba, RgbaImage};

use crate::palette::{self, Rgba8};
use crate::plan::{PlanGeometry, PlanTooLarge};
use synthcity_core::{Axis, Building, Layout, Vehicle};

fn put(image: &mut RgbaImage, x: i64, y: i64, color: Rgba8) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    image.put_pixel(x as u32, y as u32, Rgba(color));
}

fn fill_rect(image: &mut RgbaImage, min: (f32, f32), max: (f32, f32), color: Rgba8) {
    let (x0, y0) = (min.0.floor() as i64, min.1.floor() as i64);
    let (x1, y1) = (max.0.ceil() as i64, max.1.ceil() as i64);

    for y in y0..y1 {
        for x in x0..x1 {
            put(image, x, y, color);
        }
    }
}

fn stroke_rect(image: &mut RgbaImage, min: (f32, f32), max: (f32, f32), color: Rgba8) {
    let (x0, y0) = (min.0.floor() as i64, min.1.floor() as i64);
    let (x1, y1) = (max.0.ceil() as i64 - 1, max.1.ceil() as i64 - 1);

    for x in x0..=x1 {
        put(image, x, y0, color);
        put(image, x, y1, color);
    }
    for y in y0..=y1 {
        put(image, x0, y, color);
        put(image, x1, y, color);
    }
}

fn draw_floor(image: &mut RgbaImage, geometry: &PlanGeometry) {
    let (width, height) = image.dimensions();
    for pixel in image.pixels_mut() {
        *pixel = Rgba(palette::FLOOR);
    }

    let step = geometry.cell_px().max(1);
    for y in 0..height {
        for x in (0..width).step_by(step as usize) {
            put(image, x as i64, y as i64, palette::FLOOR_LINE);
        }
    }
    for y in (0..height).step_by(step as usize) {
        for x in 0..width {
            put(image, x as i64, y as i64, palette::FLOOR_LINE);
        }
    }
}

fn building_color(building: &Building, min_height: u32, max_height: u32) -> Rgba8 {
    let span = max_height.saturating_sub(min_height);
    let t = if span == 0 {
        1.0
    } else {
        (building.height.saturating_sub(min_height)) as f32 / span as f32
    };
    palette::mix(palette::BUILDING, palette::BUILDING_TOP, t)
}

fn draw_building(
    image: &mut RgbaImage,
    geometry: &PlanGeometry,
    building: &Building,
    color: Rgba8,
) {
    let (cx, cy) = geometry.world_to_pixel(building.position.x, building.position.z);

    let base_half = geometry.length_to_pixels(building.base.size) / 2.0;
    fill_rect(
        image,
        (cx - base_half, cy - base_half),
        (cx + base_half, cy + base_half),
        palette::BASE_SLAB,
    );

    let half = geometry.length_to_pixels(building.footprint) / 2.0;
    let min = (cx - half, cy - half);
    let max = (cx + half, cy + half);
    fill_rect(image, min, max, color);
    stroke_rect(image, min, max, palette::OUTLINE);
}

fn draw_lane(
    image: &mut RgbaImage,
    geometry: &PlanGeometry,
    vehicle: &Vehicle,
    half_length: f32,
) {
    let (width, height) = image.dimensions();
    let (lane_x, lane_y) =
        geometry.world_to_pixel(vehicle.lateral_offset, vehicle.lateral_offset);

    match vehicle.direction.axis() {
        Axis::Z => {
            for y in 0..height {
                put(image, lane_x as i64, y as i64, palette::CAR_TRAIL);
            }
        }
        Axis::X => {
            for x in 0..width {
                put(image, x as i64, lane_y as i64, palette::CAR_TRAIL);
            }
        }
    }

    let [x, _, z] = vehicle.world_position();
    let (px, py) = geometry.world_to_pixel(
        x.clamp(-half_length, half_length),
        z.clamp(-half_length, half_length),
    );
    fill_rect(image, (px - 2.0, py - 2.0), (px + 2.0, py + 2.0), palette::CAR);
}

/// Renders a top-down plan: floor grid, vehicle lanes, then buildings shaded by height.
pub fn render_plan(layout: &Layout) -> Result<RgbaImage, PlanTooLarge> {
    let geometry = PlanGeometry::for_config(&layout.config)?;
    let (width, height) = geometry.image_size();
    let mut image = RgbaImage::new(width, height);

    draw_floor(&mut image, &geometry);

    let half_length = layout.config.grid_amount as f32 * layout.config.scale;
    for vehicle in &layout.vehicles {
        draw_lane(&mut image, &geometry, vehicle, half_length);
    }

    let heights = layout.config.building_heights;
    for building in &layout.buildings {
        let color = building_color(building, heights.min(), heights.max());
        draw_building(&mut image, &geometry, building, color);
    }

    Ok(image)
}
