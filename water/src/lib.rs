//! Wave-field buoyancy for rigid bodies floating in a pond.
//!
//! [`WaterPhysics`] turns a closed-form wave surface into buoyancy, drag and
//! surge impulses for every dynamic body of a [`PhysicsWorld`].
//! [`WaterPhysicsPlugin`] wires it into a Bevy app running Rapier.

pub mod constants;
pub mod error;
pub mod physics;
pub mod sets;
pub mod water;

pub use constants::*;
pub use error::WaterConfigError;
pub use physics::{
    ApproximateExtents, BodySnapshot, PhysicsWorld, SimulationClock, TickReport, WaterPhysics,
    WaterPhysicsPlugin, WaterSurface,
};
pub use water::{SamplingMode, WaterPhysicsConfig, WaterPreset, WaveField};
