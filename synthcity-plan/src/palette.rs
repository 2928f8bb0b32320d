//! Colors shared by the live renderer and the plan generator.

pub type Rgba8 = [u8; 4];

pub const FOG: Rgba8 = [240, 32, 80, 255];
pub const FLOOR: Rgba8 = [0, 0, 0, 255];
pub const FLOOR_LINE: Rgba8 = [12, 6, 24, 255];
pub const REFLECTION_TINT: Rgba8 = [119, 119, 119, 255];
pub const BUILDING: Rgba8 = [4, 4, 8, 255];
pub const BUILDING_TOP: Rgba8 = [70, 20, 110, 255];
pub const OUTLINE: Rgba8 = [255, 70, 170, 255];
pub const BASE_SLAB: Rgba8 = [28, 24, 40, 255];
pub const CAR: Rgba8 = [255, 220, 110, 255];
pub const CAR_TRAIL: Rgba8 = [255, 120, 60, 160];
pub const PARTICLE: Rgba8 = [255, 255, 255, 170];

pub fn to_unit(color: Rgba8) -> [f32; 4] {
    color.map(|channel| channel as f32 / 255.0)
}

pub fn from_unit(color: [f32; 4]) -> Rgba8 {
    color.map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Linear blend, `t = 0` gives `a` and `t = 1` gives `b`.
pub fn mix(a: Rgba8, b: Rgba8, t: f32) -> Rgba8 {
    let t = t.clamp(0.0, 1.0);
    let (a, b) = (to_unit(a), to_unit(b));
    from_unit([
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ])
}

/// Blend factor for linear fog between `near` and `far`.
pub fn fog_factor(distance: f32, near: f32, far: f32) -> f32 {
    if far <= near {
        return if distance >= far { 1.0 } else { 0.0 };
    }
    ((distance - near) / (far - near)).clamp(0.0, 1.0)
}
