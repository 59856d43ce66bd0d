//! Closed-form wave height field.
//!
//! Three sine waves travel across the XZ plane: the primary along the
//! configured direction, a secondary along its perpendicular and a tertiary
//! along the diagonal between them. Renderers and physics query the same
//! field, so the visible surface and the buoyant surface always match.

use bevy::math::{Vec2, Vec3};

use super::config::WaterPhysicsConfig;
use crate::error::WaterConfigError;

/// Relative (amplitude, frequency, speed) of each layer against the primary.
const LAYER_SCALES: [(f32, f32, f32); 3] = [(1.0, 1.0, 1.0), (0.3, 1.5, 0.8), (0.15, 2.3, 1.2)];

/// Precomputed constants for a single wave layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct WaveLayer {
    amplitude: f32,
    frequency: f32,
    speed: f32,
    direction: Vec2,
}

impl WaveLayer {
    #[inline(always)]
    fn phase(&self, position: Vec2, time: f32) -> f32 {
        position.dot(self.direction) * self.frequency + time * self.speed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveField {
    layers: [WaveLayer; 3],
}

impl WaveField {
    /// Build the field from a config. Fails when the wave direction cannot be
    /// normalized.
    pub fn new(config: &WaterPhysicsConfig) -> Result<Self, WaterConfigError> {
        let primary = config
            .wave_direction
            .try_normalize()
            .ok_or(WaterConfigError::ZeroWaveDirection)?;
        let perpendicular = primary.perp();
        // Sum of two orthogonal unit vectors, never zero.
        let diagonal = (primary + perpendicular).normalize();

        let directions = [primary, perpendicular, diagonal];
        let mut layers = [WaveLayer::default(); 3];
        for (i, (amplitude, frequency, speed)) in LAYER_SCALES.into_iter().enumerate() {
            layers[i] = WaveLayer {
                amplitude: config.wave_height * amplitude,
                frequency: config.wave_frequency * frequency,
                speed: config.wave_speed * speed,
                direction: directions[i],
            };
        }

        Ok(Self { layers })
    }

    /// Vertical offset of the surface from the still water level.
    #[inline]
    pub fn height(&self, x: f32, z: f32, time: f32) -> f32 {
        let position = Vec2::new(x, z);
        self.layers
            .iter()
            .map(|layer| layer.amplitude * layer.phase(position, time).sin())
            .sum()
    }

    /// Unit surface normal from the analytic gradient of [`Self::height`].
    pub fn surface_normal(&self, x: f32, z: f32, time: f32) -> Vec3 {
        let position = Vec2::new(x, z);
        let mut gradient = Vec2::ZERO;

        for layer in &self.layers {
            let slope = layer.amplitude * layer.frequency * layer.phase(position, time).cos();
            gradient += layer.direction * slope;
        }

        Vec3::new(-gradient.x, 1.0, -gradient.y).normalize_or(Vec3::Y)
    }

    /// Largest possible `|height|`.
    pub fn max_amplitude(&self) -> f32 {
        self.layers.iter().map(|layer| layer.amplitude.abs()).sum()
    }

    /// Normalized direction of the primary wave.
    pub fn direction(&self) -> Vec2 {
        self.layers[0].direction
    }

    pub fn perpendicular(&self) -> Vec2 {
        self.layers[1].direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(config: WaterPhysicsConfig) -> WaveField {
        WaveField::new(&config).unwrap()
    }

    #[test]
    fn test_zero_direction_is_rejected() {
        let config = WaterPhysicsConfig {
            wave_direction: Vec2::ZERO,
            ..Default::default()
        };
        assert_eq!(
            WaveField::new(&config),
            Err(WaterConfigError::ZeroWaveDirection)
        );

        let config = WaterPhysicsConfig {
            wave_direction: Vec2::new(f32::NAN, 1.0),
            ..Default::default()
        };
        assert!(WaveField::new(&config).is_err());
    }

    #[test]
    fn test_direction_is_normalized() {
        let waves = field(WaterPhysicsConfig {
            wave_direction: Vec2::new(3.0, 4.0),
            ..Default::default()
        });
        assert!((waves.direction().length() - 1.0).abs() < 1e-6);
        assert!(waves.direction().dot(waves.perpendicular()).abs() < 1e-6);
    }

    #[test]
    fn test_height_is_bounded() {
        let config = WaterPhysicsConfig {
            wave_height: 2.0,
            wave_frequency: 0.7,
            wave_speed: 1.3,
            ..Default::default()
        };
        let waves = field(config);
        let bound = 1.45 * 2.0 + 1e-4;
        assert!((waves.max_amplitude() - 2.9).abs() < 1e-5);

        for ix in -20..=20 {
            for iz in -20..=20 {
                for it in 0..5 {
                    let h = waves.height(ix as f32 * 0.37, iz as f32 * 0.41, it as f32 * 0.9);
                    assert!(h.abs() <= bound, "height {h} out of bounds");
                }
            }
        }
    }

    #[test]
    fn test_height_is_pure() {
        let waves = field(WaterPhysicsConfig::default());
        let a = waves.height(3.2, -1.7, 12.5);
        let b = waves.height(3.2, -1.7, 12.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_height_at_origin_and_zero_time_is_flat() {
        let waves = field(WaterPhysicsConfig::default());
        assert_eq!(waves.height(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_height_varies_with_position_and_time() {
        let waves = field(WaterPhysicsConfig::default());
        let h1 = waves.height(0.0, 0.0, 1.0);
        let h2 = waves.height(5.0, 5.0, 1.0);
        let h3 = waves.height(0.0, 0.0, 2.0);
        assert!((h1 - h2).abs() > 0.001);
        assert!((h1 - h3).abs() > 0.001);
    }

    #[test]
    fn test_flat_water() {
        let waves = field(WaterPhysicsConfig {
            wave_height: 0.0,
            ..Default::default()
        });
        assert_eq!(waves.height(10.0, -4.0, 3.0), 0.0);
        assert_eq!(waves.surface_normal(10.0, -4.0, 3.0), Vec3::Y);
    }

    #[test]
    fn test_normal_is_normalized_and_tilts_downhill() {
        let waves = field(WaterPhysicsConfig::default());
        let normal = waves.surface_normal(1.0, 2.0, 0.3);
        assert!((normal.length() - 1.0).abs() < 1e-5);
        assert!(normal.y > 0.0);

        // At the origin at t=0 every layer has phase 0, so the slope is
        // positive along each direction and the normal leans back.
        let normal = waves.surface_normal(0.0, 0.0, 0.0);
        assert!(normal.x < 0.0);
    }
}
