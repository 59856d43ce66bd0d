//! Sample points used to approximate distributed buoyancy over a body.

use bevy::math::{Quat, Vec3};
use rand::Rng;

use crate::constants::SAMPLES_PER_HALF_EXTENT_VOLUME;
use crate::water::SamplingMode;

/// Number of points to sample for a box with the given half-extents.
///
/// Returns 0 when `max_points` is 0; callers treat that as "no submersion".
pub fn sample_count(max_points: u32, half_extents: Vec3) -> usize {
    let volume = half_extents.x * half_extents.y * half_extents.z;
    let wanted = (SAMPLES_PER_HALF_EXTENT_VOLUME * volume).ceil().max(0.0) as usize;
    wanted.min(max_points as usize)
}

/// Fill `out` with `count` world-space points inside the body's oriented box.
pub fn sample_points(
    mode: SamplingMode,
    rng: &mut impl Rng,
    position: Vec3,
    rotation: Quat,
    half_extents: Vec3,
    count: usize,
    out: &mut Vec<Vec3>,
) {
    out.clear();
    out.reserve(count);

    for i in 0..count {
        let unit = match mode {
            SamplingMode::Random => Vec3::new(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
            ),
            SamplingMode::LowDiscrepancy => {
                let index = i as u32 + 1;
                Vec3::new(
                    radical_inverse(index, 2),
                    radical_inverse(index, 3),
                    radical_inverse(index, 5),
                ) * 2.0
                    - Vec3::ONE
            }
        };
        out.push(position + rotation * (unit * half_extents));
    }
}

/// Van der Corput radical inverse of `index` in `base`, in `[0, 1)`.
fn radical_inverse(mut index: u32, base: u32) -> f32 {
    let inv_base = 1.0 / base as f32;
    let mut factor = inv_base;
    let mut result = 0.0;

    while index > 0 {
        result += (index % base) as f32 * factor;
        index /= base;
        factor *= inv_base;
    }

    result
}
