//! Tuning parameters for the water force model.
//!
//! A config is owned by exactly one engine. Two engines built from the same
//! preset never share state, so tests can run side by side.

use bevy::math::Vec2;
use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

use crate::error::WaterConfigError;

/// How sample points are placed inside a body's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect, Default)]
pub enum SamplingMode {
    /// Uniformly random points, drawn fresh every tick.
    #[default]
    Random,
    /// Deterministic Halton points (bases 2, 3, 5). Same points every tick.
    LowDiscrepancy,
}

/// Complete water physics configuration.
/// Missing fields fall back to [`Default`] when read from a RON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct WaterPhysicsConfig {
    /// Fluid density factor
    pub density: f32,
    /// Scales the buoyant force
    pub buoyancy_multiplier: f32,
    /// Viscous drag coefficient (force ∝ speed)
    pub linear_drag: f32,
    /// Turbulent drag coefficient (force ∝ speed²)
    pub quadratic_drag: f32,
    /// Amplitude of the primary wave
    pub wave_height: f32,
    /// Spatial frequency of the primary wave
    pub wave_frequency: f32,
    /// Temporal speed of the primary wave
    pub wave_speed: f32,
    /// Propagation direction in the XZ plane, normalized by the wave field
    pub wave_direction: Vec2,
    /// Reserved, not used by the force model
    pub surface_tension: f32,
    /// Reserved, not used by the force model
    pub vorticity: f32,
    /// Reserved, not used by the force model
    pub damping: f32,
    /// Number of wave-phase slices evaluated per tick
    pub sub_steps: u32,
    /// Upper bound on sample points per body
    pub max_buoyancy_points: u32,
    pub sampling: SamplingMode,
    /// Seed for [`SamplingMode::Random`]. `None` seeds from entropy.
    pub sample_seed: Option<u64>,
}

impl Default for WaterPhysicsConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            buoyancy_multiplier: 1.0,
            linear_drag: 0.5,
            quadratic_drag: 0.05,
            wave_height: 0.3,
            wave_frequency: 0.5,
            wave_speed: 1.0,
            wave_direction: Vec2::X,
            surface_tension: 0.0,
            vorticity: 0.0,
            damping: 0.0,
            sub_steps: 1,
            max_buoyancy_points: 16,
            sampling: SamplingMode::Random,
            sample_seed: None,
        }
    }
}

impl WaterPhysicsConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Check every invariant the force model relies on.
    ///
    /// The wave direction is checked by [`crate::water::WaveField::new`],
    /// which is the only place it gets normalized.
    pub fn validate(&self) -> Result<(), WaterConfigError> {
        let finite = [
            ("density", self.density),
            ("buoyancy_multiplier", self.buoyancy_multiplier),
            ("linear_drag", self.linear_drag),
            ("quadratic_drag", self.quadratic_drag),
            ("wave_height", self.wave_height),
            ("wave_frequency", self.wave_frequency),
            ("wave_speed", self.wave_speed),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(WaterConfigError::NonFinite { name, value });
            }
        }

        if self.density <= 0.0 {
            return Err(WaterConfigError::InvalidDensity(self.density));
        }

        let non_negative = [
            ("buoyancy_multiplier", self.buoyancy_multiplier),
            ("linear_drag", self.linear_drag),
            ("quadratic_drag", self.quadratic_drag),
            ("wave_height", self.wave_height),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(WaterConfigError::NegativeCoefficient { name, value });
            }
        }

        if self.sub_steps == 0 {
            return Err(WaterConfigError::ZeroSubSteps);
        }

        Ok(())
    }
}

/// Preset configurations for different kinds of water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WaterPreset {
    /// Flat, motionless water
    Still,
    /// Small garden pond with gentle ripples
    #[default]
    Pond,
    /// Wind-driven chop
    Breezy,
    /// Large rolling waves
    Storm,
}

impl WaterPreset {
    pub fn to_config(self) -> WaterPhysicsConfig {
        let base = WaterPhysicsConfig::default();

        match self {
            WaterPreset::Still => WaterPhysicsConfig {
                wave_height: 0.0,
                ..base
            },
            WaterPreset::Pond => base,
            WaterPreset::Breezy => WaterPhysicsConfig {
                wave_height: 0.5,
                wave_frequency: 0.8,
                wave_speed: 1.6,
                wave_direction: Vec2::new(1.0, 0.4),
                max_buoyancy_points: 24,
                ..base
            },
            WaterPreset::Storm => WaterPhysicsConfig {
                wave_height: 1.2,
                wave_frequency: 0.35,
                wave_speed: 2.2,
                wave_direction: Vec2::new(0.7, -0.7),
                linear_drag: 0.8,
                quadratic_drag: 0.1,
                sub_steps: 2,
                max_buoyancy_points: 32,
                ..base
            },
        }
    }
}
