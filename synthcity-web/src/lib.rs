use macroquad::prelude::*;
#[cfg(target_arch = "wasm32")]
use macroquad::miniquad;
use macroquad::rand;
use synthcity_core::{City, CityConfig, FrameInput, LayoutError, PointerInput, Viewport};
use synthcity_plan::palette;

use crate::car::{CarDrawConfig, color_from, draw_car};
use crate::particles::ParticleField;

mod car;
mod particles;

const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 10.0, 10.0);
const CAMERA_FOVY_DEGREES: f32 = 20.0;
const FOG_NEAR: f32 = 10.0;
const FOG_FAR: f32 = 16.0;
const FLOOR_HALF_SIZE: f32 = 50.0;
const FLOOR_ALPHA: f32 = 0.8;
const LINE_LIFT: f32 = 0.001;
const REFLECTION_ALPHA: f32 = 0.35;
const PARTICLE_COUNT: usize = 300;
const PARTICLE_CEILING: f32 = 4.0;
const PARTICLE_RADIUS: f32 = 0.012;
const FIXED_STEP_SECONDS: f32 = 1.0 / 60.0;
const MAX_STEPS_PER_FRAME: u32 = 8;
const EXTRA_BUILDINGS_PER_PRESS: usize = 5;
const FPS_INTERVAL_SECS: f64 = 0.5;
const ZOOM_FACTOR: f32 = 1.15;
const MIN_ZOOM_POWER: i32 = -6;
const MAX_ZOOM_POWER: i32 = 8;
const ORBIT_RADIANS_PER_PIXEL: f32 = 0.005;
// Keeps the camera above the floor and short of straight down at any parallax pitch.
const ORBIT_PITCH_MIN: f32 = -0.2;
const ORBIT_PITCH_MAX: f32 = 0.55;

fn log_info(message: &str) {
    #[cfg(target_arch = "wasm32")]
    miniquad::info!("{}", message);
    #[cfg(not(target_arch = "wasm32"))]
    println!("{}", message);
}

fn log_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    miniquad::error!("{}", message);
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{}", message);
}

fn time_seed() -> u64 {
    (macroquad::miniquad::date::now() * 1000.0) as u64
}

/// Camera pose that shows the city rotated by `yaw` then `pitch`.
/// Rotating the camera by the inverse keeps the geometry axis-aligned.
fn orbit_camera(yaw: f32, pitch: f32, distance_scale: f32) -> (Vec3, Vec3) {
    let inverse = Quat::from_rotation_y(-yaw) * Quat::from_rotation_x(-pitch);
    (inverse * (CAMERA_POSITION * distance_scale), inverse * Vec3::Y)
}

fn clamp_zoom_power(power: i32) -> i32 {
    power.clamp(MIN_ZOOM_POWER, MAX_ZOOM_POWER)
}

/// Zooming in (positive power) moves the camera closer.
fn camera_distance_scale(power: i32) -> f32 {
    ZOOM_FACTOR.powi(-power)
}

fn clamp_orbit_pitch(pitch: f32) -> f32 {
    pitch.clamp(ORBIT_PITCH_MIN, ORBIT_PITCH_MAX)
}

fn fogged(color: Color, eye: Vec3, point: Vec3) -> Color {
    let t = palette::fog_factor(eye.distance(point), FOG_NEAR, FOG_FAR);
    let fog = color_from(palette::FOG);
    Color::new(
        color.r + (fog.r - color.r) * t,
        color.g + (fog.g - color.g) * t,
        color.b + (fog.b - color.b) * t,
        color.a,
    )
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, alpha)
}

fn sample_pointer(viewport: Viewport) -> PointerInput {
    let active_touches = touches();
    if active_touches.len() == 1 {
        let position = active_touches[0].position;
        return PointerInput::from_screen(position.x, position.y, viewport);
    }
    let (x, y) = mouse_position();
    PointerInput::from_screen(x, y, viewport)
}

pub struct CityScene {
    city: City,
    particles: ParticleField,
    car_draw: CarDrawConfig,
    pointer: PointerInput,
    pointer_origin: Option<(f32, f32)>,
    pointer_active: bool,
    zoom_power: i32,
    orbit_yaw: f32,
    orbit_pitch: f32,
    last_right_drag_pos: Option<Vec2>,
    step_accumulator: f32,
    fps: f32,
    fps_frame_count: u32,
    fps_last_update_time: f64,
}

impl CityScene {
    pub fn new(config: CityConfig, seed: u64) -> Result<Self, LayoutError> {
        let city = City::generate(config, seed)?;
        rand::srand(seed);
        let particles = ParticleField::new(
            PARTICLE_COUNT,
            city.lanes().half_length,
            PARTICLE_CEILING,
        );

        log_info(&format!(
            "city seed {}: {} buildings, {} vehicles, {} free cells",
            seed,
            city.buildings().len(),
            city.vehicles().len(),
            city.free_cells()
        ));

        Ok(Self {
            city,
            particles,
            car_draw: CarDrawConfig::default(),
            pointer: PointerInput::centered(),
            pointer_origin: None,
            pointer_active: false,
            zoom_power: 0,
            orbit_yaw: 0.0,
            orbit_pitch: 0.0,
            last_right_drag_pos: None,
            step_accumulator: 0.0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_last_update_time: get_time(),
        })
    }

    fn viewport() -> Viewport {
        Viewport::new(screen_width(), screen_height())
    }

    /// Pointer stays centered until the user actually moves it; last value wins afterwards.
    fn update_pointer(&mut self, viewport: Viewport) {
        let raw = mouse_position();
        let origin = *self.pointer_origin.get_or_insert(raw);
        if !self.pointer_active && (raw != origin || !touches().is_empty()) {
            self.pointer_active = true;
        }
        if self.pointer_active {
            self.pointer = sample_pointer(viewport);
        }
    }

    fn handle_mouse_wheel_zoom(&mut self) {
        let (_wheel_x, wheel_y) = mouse_wheel();
        if wheel_y == 0.0 {
            return;
        }
        self.zoom_power = clamp_zoom_power(self.zoom_power + wheel_y.signum() as i32);
    }

    /// Right-drag orbits the camera on top of the pointer parallax.
    fn handle_right_mouse_drag(&mut self) {
        let (mouse_x, mouse_y) = mouse_position();
        let current = vec2(mouse_x, mouse_y);

        if is_mouse_button_down(MouseButton::Right) {
            if let Some(last) = self.last_right_drag_pos {
                let delta = current - last;
                self.orbit_yaw += delta.x * ORBIT_RADIANS_PER_PIXEL;
                self.orbit_pitch =
                    clamp_orbit_pitch(self.orbit_pitch + delta.y * ORBIT_RADIANS_PER_PIXEL);
            }
            self.last_right_drag_pos = Some(current);
        } else {
            self.last_right_drag_pos = None;
        }
    }

    fn handle_keys(&mut self) {
        if is_key_pressed(KeyCode::R) {
            let config = self.city.config().clone();
            match Self::new(config, time_seed()) {
                Ok(scene) => *self = scene,
                Err(err) => log_error(&format!("failed to regenerate city: {}", err)),
            }
            return;
        }

        if is_key_pressed(KeyCode::Space) {
            let added = self
                .city
                .place_more_buildings(EXTRA_BUILDINGS_PER_PRESS)
                .len();
            log_info(&format!(
                "added {} buildings, {} free cells left",
                added,
                self.city.free_cells()
            ));
        }
    }

    fn update(&mut self, frame_seconds: f32) {
        self.update_pointer(Self::viewport());

        // Consume real elapsed time in fixed-size simulation steps.
        self.step_accumulator += frame_seconds.max(0.0);
        let mut steps = 0;
        while self.step_accumulator >= FIXED_STEP_SECONDS && steps < MAX_STEPS_PER_FRAME {
            self.city
                .step(FrameInput::new(FIXED_STEP_SECONDS, self.pointer));
            self.particles.update(FIXED_STEP_SECONDS);
            self.step_accumulator -= FIXED_STEP_SECONDS;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME {
            self.step_accumulator = 0.0;
        }
    }

    fn update_fps_if_due(&mut self) {
        self.fps_frame_count += 1;
        let now = get_time();
        let elapsed = now - self.fps_last_update_time;
        if elapsed >= FPS_INTERVAL_SECS {
            self.fps = (self.fps_frame_count as f64 / elapsed) as f32;
            self.fps_frame_count = 0;
            self.fps_last_update_time = now;
        }
    }

    fn render(&self) {
        let viewport = Self::viewport();
        let parallax = self.city.parallax();
        let (eye, up) = orbit_camera(
            parallax.yaw + self.orbit_yaw,
            parallax.pitch + self.orbit_pitch,
            camera_distance_scale(self.zoom_power),
        );

        clear_background(color_from(palette::FOG));
        set_camera(&Camera3D {
            position: eye,
            target: Vec3::ZERO,
            up,
            fovy: CAMERA_FOVY_DEGREES.to_radians(),
            aspect: Some(viewport.aspect()),
            ..Default::default()
        });

        let tint = |point: Vec3, color: Color| fogged(color, eye, point);

        self.render_reflection(&tint);
        draw_plane(
            vec3(0.0, -LINE_LIFT, 0.0),
            vec2(FLOOR_HALF_SIZE, FLOOR_HALF_SIZE),
            None,
            with_alpha(color_from(palette::FLOOR), FLOOR_ALPHA),
        );
        self.render_floor_lines(&tint);
        self.render_buildings(&tint);

        for vehicle in self.city.vehicles() {
            draw_car(vehicle, &self.car_draw, &tint);
        }
        self.particles
            .draw(PARTICLE_RADIUS, color_from(palette::PARTICLE), &tint);

        set_default_camera();
        self.render_hud();
    }

    fn render_reflection(&self, tint: &impl Fn(Vec3, Color) -> Color) {
        let body = palette::mix(palette::BUILDING, palette::REFLECTION_TINT, 0.15);
        for building in self.city.buildings() {
            let center = vec3(
                building.position.x,
                -building.center_y(),
                building.position.z,
            );
            let size = vec3(building.footprint, building.world_height, building.footprint);
            draw_cube(center, size, None, tint(center, color_from(body)));
            draw_cube_wires(
                center,
                size,
                with_alpha(tint(center, color_from(palette::OUTLINE)), REFLECTION_ALPHA),
            );
        }
    }

    fn render_floor_lines(&self, tint: &impl Fn(Vec3, Color) -> Color) {
        let color = color_from(palette::FLOOR_LINE);
        for line in self.city.floor().lines() {
            let start = Vec3::from(line.start) + Vec3::Y * LINE_LIFT;
            let end = Vec3::from(line.end) + Vec3::Y * LINE_LIFT;
            draw_line_3d(start, end, tint((start + end) * 0.5, color));
        }
    }

    fn render_buildings(&self, tint: &impl Fn(Vec3, Color) -> Color) {
        for building in self.city.buildings() {
            let base_center = vec3(
                building.position.x,
                building.base.height / 2.0,
                building.position.z,
            );
            draw_cube(
                base_center,
                vec3(building.base.size, building.base.height, building.base.size),
                None,
                tint(base_center, color_from(palette::BASE_SLAB)),
            );

            let center = vec3(building.position.x, building.center_y(), building.position.z);
            let size = vec3(building.footprint, building.world_height, building.footprint);
            draw_cube(center, size, None, tint(center, color_from(palette::BUILDING)));
            draw_cube_wires(center, size, tint(center, color_from(palette::OUTLINE)));
        }
    }

    fn render_hud(&self) {
        draw_text(
            &format!(
                "fps {:.0}  seed {}  buildings {}  free {}  zoom {:.2}x",
                self.fps,
                self.city.seed(),
                self.city.buildings().len(),
                self.city.free_cells(),
                1.0 / camera_distance_scale(self.zoom_power)
            ),
            16.0,
            24.0,
            20.0,
            WHITE,
        );
    }
}

pub async fn run() {
    install_panic_hook();

    let mut scene = match CityScene::new(CityConfig::default(), time_seed()) {
        Ok(scene) => scene,
        Err(err) => {
            log_error(&format!("failed to generate city: {}", err));
            return;
        }
    };

    loop {
        scene.handle_keys();
        scene.handle_mouse_wheel_zoom();
        scene.handle_right_mouse_drag();
        scene.update(get_frame_time());
        scene.update_fps_if_due();
        scene.render();

        next_frame().await;
    }
}

#[cfg(target_arch = "wasm32")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if let Some(location) = info.location() {
            miniquad::error!("panic at {}:{}: {}", location.file(), location.line(), msg);
        } else {
            miniquad::error!("panic: {}", msg);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn install_panic_hook() {}
