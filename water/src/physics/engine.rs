//! Buoyancy, drag and surge impulses for rigid bodies floating in the pond.
//!
//! The engine is a pure force generator: each tick it reads every dynamic
//! body from a [`PhysicsWorld`], samples the wave field inside the body's
//! bounding box and hands one impulse back. Integration and collisions stay
//! with the physics engine.

use bevy::math::Vec3;
use bevy_ecs::resource::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::body::{sanitize_half_extents, BodySnapshot, PhysicsWorld};
use super::sampling::{sample_count, sample_points};
use crate::constants::{
    DEFAULT_HALF_EXTENTS, GRAVITY, MIN_DRAG_SPEED, SURFACE_SKIP_MARGIN, SURGE_STRENGTH,
};
use crate::error::WaterConfigError;
use crate::water::{WaterPhysicsConfig, WaveField};

/// Buoyancy at a single point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuoyancySample {
    pub force: Vec3,
    /// Distance below the surface, 0 when above it
    pub submerged_depth: f32,
}

/// Impulses computed for one body over one tick (already scaled by the
/// tick's delta time).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyImpulse {
    pub buoyancy: Vec3,
    pub drag: Vec3,
    pub surge: Vec3,
    /// Average submerged depth over the samples of the last sub-step
    pub average_depth: f32,
    pub samples: usize,
}

impl BodyImpulse {
    pub fn total(&self) -> Vec3 {
        self.buoyancy + self.drag + self.surge
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Centre is more than the skip margin above the water level
    AboveSurface,
    /// Sample budget rounded to zero points
    NoSamples,
    /// Body missing or holding NaN/infinite state
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyOutcome {
    Applied(BodyImpulse),
    Skipped(SkipReason),
}

/// Counters for one call to [`WaterPhysics::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub visited: usize,
    pub affected: usize,
    pub above_surface: usize,
    pub no_samples: usize,
    pub rejected: usize,
}

impl TickReport {
    fn record(&mut self, outcome: &BodyOutcome) {
        self.visited += 1;
        match outcome {
            BodyOutcome::Applied(_) => self.affected += 1,
            BodyOutcome::Skipped(SkipReason::AboveSurface) => self.above_surface += 1,
            BodyOutcome::Skipped(SkipReason::NoSamples) => self.no_samples += 1,
            BodyOutcome::Skipped(SkipReason::Rejected) => self.rejected += 1,
        }
    }
}

/// The water force generator. One instance per pond; instances share nothing.
#[derive(Resource, Clone)]
pub struct WaterPhysics {
    config: WaterPhysicsConfig,
    waves: WaveField,
    rng: StdRng,
    /// Scratch buffer reused between bodies
    points: Vec<Vec3>,
}

impl WaterPhysics {
    pub fn new(config: WaterPhysicsConfig) -> Result<Self, WaterConfigError> {
        config.validate()?;
        let waves = WaveField::new(&config)?;
        let rng = match config.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::debug!(
            "Water physics ready: density={}, wave_height={}, max_points={}, sampling={:?}",
            config.density,
            config.wave_height,
            config.max_buoyancy_points,
            config.sampling
        );

        Ok(Self {
            config,
            waves,
            rng,
            points: Vec::new(),
        })
    }

    /// Swap in new tuning. The old config stays active if the new one is
    /// invalid. The random stream is only reseeded when the seed changes.
    pub fn set_config(&mut self, config: WaterPhysicsConfig) -> Result<(), WaterConfigError> {
        config.validate()?;
        let waves = WaveField::new(&config)?;

        if config.sample_seed != self.config.sample_seed {
            self.rng = match config.sample_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
        }

        log::debug!("Water physics reconfigured: {:?}", config);
        self.config = config;
        self.waves = waves;
        Ok(())
    }

    pub fn config(&self) -> &WaterPhysicsConfig {
        &self.config
    }

    pub fn wave_field(&self) -> &WaveField {
        &self.waves
    }

    /// Wave offset from the still water level at `(x, z)`.
    #[inline]
    pub fn water_height(&self, x: f32, z: f32, time: f32) -> f32 {
        self.waves.height(x, z, time)
    }

    /// Absolute surface height for a pond whose still level is `water_level`.
    #[inline]
    pub fn surface_height(&self, x: f32, z: f32, time: f32, water_level: f32) -> f32 {
        water_level + self.waves.height(x, z, time)
    }

    /// Buoyant force at a single point. The surface is a hard boundary:
    /// a point exactly on it gets nothing.
    pub fn buoyancy_at(&self, point: Vec3, water_level: f32, time: f32) -> BuoyancySample {
        let surface_y = self.surface_height(point.x, point.z, time, water_level);
        if point.y >= surface_y {
            return BuoyancySample::default();
        }

        // Not clamped to the body's extent: deeper points push harder.
        let submerged_depth = surface_y - point.y;
        let magnitude =
            self.config.density * GRAVITY * submerged_depth * self.config.buoyancy_multiplier;

        BuoyancySample {
            force: Vec3::new(0.0, magnitude, 0.0),
            submerged_depth,
        }
    }

    /// Linear plus quadratic drag opposing `velocity`, scaled by depth.
    pub fn drag_at(&self, velocity: Vec3, submerged_depth: f32) -> Vec3 {
        let speed = velocity.length();
        if submerged_depth <= 0.0 || speed < MIN_DRAG_SPEED {
            return Vec3::ZERO;
        }

        let magnitude = (self.config.linear_drag * speed
            + self.config.quadratic_drag * speed * speed)
            * submerged_depth;
        -velocity / speed * magnitude
    }

    /// Horizontal push along the wave direction for bodies floating at the
    /// surface. Not scaled by delta time.
    pub fn surge_at(&self, time: f32) -> Vec3 {
        let direction = self.waves.direction();
        let magnitude =
            SURGE_STRENGTH * self.config.wave_height * (time * self.config.wave_speed).sin();
        Vec3::new(direction.x, 0.0, direction.y) * magnitude
    }

    /// Impulses for one body over `[time, time + delta_time)`, without
    /// touching any world.
    pub fn body_impulse(
        &mut self,
        body: &BodySnapshot,
        water_level: f32,
        time: f32,
        delta_time: f32,
    ) -> BodyOutcome {
        if !body.is_finite() {
            return BodyOutcome::Skipped(SkipReason::Rejected);
        }
        if body.position.y > water_level + SURFACE_SKIP_MARGIN {
            return BodyOutcome::Skipped(SkipReason::AboveSurface);
        }

        let half_extents = sanitize_half_extents(body.half_extents, DEFAULT_HALF_EXTENTS);
        let count = sample_count(self.config.max_buoyancy_points, half_extents);
        if count == 0 {
            return BodyOutcome::Skipped(SkipReason::NoSamples);
        }

        let mut points = std::mem::take(&mut self.points);
        sample_points(
            self.config.sampling,
            &mut self.rng,
            body.position,
            body.rotation,
            half_extents,
            count,
            &mut points,
        );

        let sub_steps = self.config.sub_steps.max(1);
        let step_dt = delta_time / sub_steps as f32;
        let mut impulse = BodyImpulse {
            samples: count,
            ..Default::default()
        };

        for step in 0..sub_steps {
            let step_time = time + step_dt * step as f32;

            let mut force = Vec3::ZERO;
            let mut depth_sum = 0.0;
            for point in &points {
                let sample = self.buoyancy_at(*point, water_level, step_time);
                force += sample.force;
                depth_sum += sample.submerged_depth;
            }
            let average_depth = depth_sum / count as f32;

            impulse.buoyancy.y += force.y * step_dt;
            impulse.drag += self.drag_at(body.linear_velocity, average_depth) * step_dt;
            if average_depth > 0.0 && average_depth < 2.0 * half_extents.y {
                impulse.surge += self.surge_at(step_time) * step_dt;
            }
            impulse.average_depth = average_depth;
        }

        self.points = points;
        BodyOutcome::Applied(impulse)
    }

    /// Compute and apply water impulses to a single body.
    pub fn apply_tick<W: PhysicsWorld>(
        &mut self,
        world: &mut W,
        handle: W::Handle,
        water_level: f32,
        time: f32,
        delta_time: f32,
    ) -> BodyOutcome {
        let Some(body) = world.body(handle) else {
            log::debug!("Body {:?} has no readable state, skipping", handle);
            return BodyOutcome::Skipped(SkipReason::Rejected);
        };

        let outcome = self.body_impulse(&body, water_level, time, delta_time);
        match outcome {
            BodyOutcome::Applied(impulse) => world.apply_impulse(handle, impulse.total()),
            BodyOutcome::Skipped(SkipReason::Rejected) => {
                log::warn!("Body {:?} has non-finite state, skipping this tick", handle)
            }
            BodyOutcome::Skipped(_) => {}
        }
        outcome
    }

    /// Run one tick over every dynamic body in `world`.
    pub fn update<W: PhysicsWorld>(
        &mut self,
        world: &mut W,
        delta_time: f32,
        water_level: f32,
        time: f32,
    ) -> TickReport {
        let mut report = TickReport::default();
        if !delta_time.is_finite() || delta_time < 0.0 {
            log::warn!("Ignoring water tick with delta time {}", delta_time);
            return report;
        }

        for handle in world.dynamic_bodies() {
            let outcome = self.apply_tick(world, handle, water_level, time, delta_time);
            report.record(&outcome);
        }

        log::trace!("Water tick at t={}: {:?}", time, report);
        report
    }
}
