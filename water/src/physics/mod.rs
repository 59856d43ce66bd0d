pub mod body;
pub mod clock;
pub mod engine;
pub mod rapier;
pub mod sampling;

pub use body::{ApproximateExtents, BodySnapshot, PhysicsWorld};
pub use clock::SimulationClock;
pub use engine::{
    BodyImpulse, BodyOutcome, BuoyancySample, SkipReason, TickReport, WaterPhysics,
};
pub use rapier::{apply_water_forces, RapierBodies, WaterPhysicsPlugin, WaterSurface};
