use bevy::prelude::*;

/// Gravitational acceleration used by the buoyancy model (m/s²).
pub const GRAVITY: f32 = 9.81;
/// Bodies whose centre is this far above the still water level are skipped.
pub const SURFACE_SKIP_MARGIN: f32 = 5.0;
/// Speeds below this produce no drag (avoids normalizing a near-zero vector).
pub const MIN_DRAG_SPEED: f32 = 0.001;
/// Sample points requested per unit of `hx * hy * hz`.
pub const SAMPLES_PER_HALF_EXTENT_VOLUME: f32 = 8.0;
/// Surge impulse amplitude relative to the primary wave height.
pub const SURGE_STRENGTH: f32 = 0.5;
/// Box used for bodies whose collider gives no usable extents.
pub const DEFAULT_HALF_EXTENTS: Vec3 = Vec3 {
    x: 0.5,
    y: 0.5,
    z: 0.5,
};
