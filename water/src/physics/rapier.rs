//! Rapier integration for the water engine.
//!
//! Every frame the dynamic bodies of the Rapier world are copied into a
//! [`RapierBodies`] snapshot, the engine runs over it, and the resulting
//! impulses are added to each body's [`ExternalImpulse`]. Rapier consumes
//! them on its next step.

use bevy::prelude::*;
use bevy_log::debug;
use bevy_rapier3d::prelude::*;

use super::body::{ApproximateExtents, BodySnapshot, PhysicsWorld};
use super::clock::SimulationClock;
use super::engine::WaterPhysics;
use crate::error::WaterConfigError;
use crate::sets::PondUpdateSet;
use crate::water::WaterPhysicsConfig;

/// Still water level of the pond (Y coordinate).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WaterSurface {
    pub level: f32,
}

/// Identifies a body inside one [`RapierBodies`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RapierHandle {
    index: usize,
    pub entity: Entity,
}

/// Per-frame view of Rapier's dynamic bodies.
#[derive(Debug, Default)]
pub struct RapierBodies {
    bodies: Vec<(Entity, Option<BodySnapshot>)>,
    impulses: Vec<(Entity, Vec3)>,
}

impl RapierBodies {
    pub fn push(&mut self, entity: Entity, body: Option<BodySnapshot>) {
        self.bodies.push((entity, body));
    }

    pub fn impulses(&self) -> &[(Entity, Vec3)] {
        &self.impulses
    }
}

impl PhysicsWorld for RapierBodies {
    type Handle = RapierHandle;

    fn dynamic_bodies(&self) -> Vec<RapierHandle> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, (entity, _))| RapierHandle {
                index,
                entity: *entity,
            })
            .collect()
    }

    fn body(&self, handle: RapierHandle) -> Option<BodySnapshot> {
        self.bodies.get(handle.index).and_then(|(_, body)| *body)
    }

    fn apply_impulse(&mut self, handle: RapierHandle, impulse: Vec3) {
        self.impulses.push((handle.entity, impulse));
    }
}

/// Adds the water engine to an app that already runs Rapier.
pub struct WaterPhysicsPlugin {
    engine: WaterPhysics,
    water_level: f32,
}

impl WaterPhysicsPlugin {
    /// Validates `config` up front so a bad config fails before the app is
    /// built.
    pub fn new(config: WaterPhysicsConfig, water_level: f32) -> Result<Self, WaterConfigError> {
        Ok(Self {
            engine: WaterPhysics::new(config)?,
            water_level,
        })
    }
}

impl Plugin for WaterPhysicsPlugin {
    fn build(&self, app: &mut App) {
        debug!("Installing water physics at level {}", self.water_level);

        app.insert_resource(self.engine.clone())
            .insert_resource(WaterSurface {
                level: self.water_level,
            })
            .init_resource::<SimulationClock>()
            .register_type::<WaterPhysicsConfig>()
            .configure_sets(
                Update,
                PondUpdateSet::WaterForces.before(PondUpdateSet::Telemetry),
            )
            .add_systems(
                Update,
                apply_water_forces.in_set(PondUpdateSet::WaterForces),
            );
    }
}

/// Applies buoyancy, drag and surge to every dynamic Rapier body.
///
/// Poses come from [`GlobalTransform`] so parented bodies are sampled where
/// they really are. Bodies without a [`Velocity`] component read their
/// velocity straight from the Rapier body set.
pub fn apply_water_forces(
    mut commands: Commands,
    time: Res<Time>,
    surface: Res<WaterSurface>,
    mut clock: ResMut<SimulationClock>,
    mut engine: ResMut<WaterPhysics>,
    rapier_bodies: Query<&RapierRigidBodySet>,
    mut bodies: Query<(
        Entity,
        &RigidBody,
        &GlobalTransform,
        Option<&Velocity>,
        Option<&RapierRigidBodyHandle>,
        Option<&Collider>,
        Option<&mut ExternalImpulse>,
    )>,
) {
    let delta = time.delta_secs();
    let now = clock.time();
    clock.advance(delta);

    if delta <= 0.0 {
        return;
    }

    let rigidbody_set = rapier_bodies.single().ok();
    let mut world = RapierBodies::default();
    for (entity, body, transform, velocity, handle, collider, _) in bodies.iter() {
        if !matches!(body, RigidBody::Dynamic) {
            continue;
        }
        let linear_velocity = match (velocity, handle, rigidbody_set) {
            (Some(velocity), _, _) => velocity.linvel,
            (None, Some(handle), Some(set)) => set
                .bodies
                .get(handle.0)
                .map_or(Vec3::ZERO, |rb| (*rb.linvel()).into()),
            _ => Vec3::ZERO,
        };
        let (_, rotation, position) = transform.to_scale_rotation_translation();
        let snapshot = BodySnapshot {
            position,
            linear_velocity,
            rotation,
            half_extents: collider.and_then(|c| c.approximate_half_extents()),
        };
        world.push(entity, Some(snapshot));
    }

    let report = engine.update(&mut world, delta, surface.level, now);
    if report.rejected > 0 {
        debug!("{} bodies skipped by water physics this frame", report.rejected);
    }

    for &(entity, impulse) in world.impulses() {
        if let Ok((_, _, _, _, _, _, Some(mut external))) = bodies.get_mut(entity) {
            external.impulse += impulse;
        } else {
            commands.entity(entity).insert(ExternalImpulse {
                impulse,
                ..default()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water::WaterPreset;
    use bevy::ecs::system::RunSystemOnce;
    use bevy_rapier3d::rapier::prelude::RigidBodyBuilder;
    use std::time::Duration;

    fn pond_world(delta: Duration) -> World {
        let mut world = World::new();
        let engine = WaterPhysics::new(WaterPreset::Still.to_config().with_seed(1)).unwrap();
        world.insert_resource(engine);
        world.insert_resource(WaterSurface { level: 0.0 });
        world.init_resource::<SimulationClock>();

        let mut time = Time::<()>::default();
        time.advance_by(delta);
        world.insert_resource(time);
        world
    }

    /// Bevy only propagates transforms inside a running app.
    fn placed(x: f32, y: f32, z: f32) -> (Transform, GlobalTransform) {
        let transform = Transform::from_xyz(x, y, z);
        (transform, GlobalTransform::from(transform))
    }

    #[test]
    fn test_submerged_bodies_receive_impulses() {
        let mut world = pond_world(Duration::from_millis(100));

        let sunk = world
            .spawn((
                RigidBody::Dynamic,
                placed(0.0, -2.0, 0.0),
                Velocity::zero(),
                Collider::cuboid(0.5, 0.5, 0.5),
                ExternalImpulse::default(),
            ))
            .id();
        let bare = world
            .spawn((RigidBody::Dynamic, placed(3.0, -2.0, 0.0)))
            .id();
        let flying = world
            .spawn((
                RigidBody::Dynamic,
                placed(0.0, 20.0, 0.0),
                ExternalImpulse::default(),
            ))
            .id();
        let fixed = world
            .spawn((
                RigidBody::Fixed,
                placed(0.0, -2.0, 0.0),
                ExternalImpulse::default(),
            ))
            .id();

        world.run_system_once(apply_water_forces).unwrap();

        assert!(world.get::<ExternalImpulse>(sunk).unwrap().impulse.y > 0.0);
        assert!(world.get::<ExternalImpulse>(bare).unwrap().impulse.y > 0.0);
        assert_eq!(
            world.get::<ExternalImpulse>(flying).unwrap().impulse,
            Vec3::ZERO
        );
        assert_eq!(
            world.get::<ExternalImpulse>(fixed).unwrap().impulse,
            Vec3::ZERO
        );

        let clock = world.resource::<SimulationClock>();
        assert!((clock.time() - 0.1).abs() < 1e-6);
        assert_eq!(clock.step_start(), 0.0);
    }

    #[test]
    fn test_velocity_falls_back_to_rapier_body_set() {
        let mut world = pond_world(Duration::from_millis(100));

        let mut set = RapierRigidBodySet::default();
        let moving = set.bodies.insert(
            RigidBodyBuilder::dynamic()
                .linvel(Vec3::new(0.0, 0.0, 4.0).into())
                .build(),
        );
        world.spawn(set);

        let swimmer = world
            .spawn((
                RigidBody::Dynamic,
                placed(0.0, -2.0, 0.0),
                RapierRigidBodyHandle(moving),
                ExternalImpulse::default(),
            ))
            .id();
        let resting = world
            .spawn((
                RigidBody::Dynamic,
                placed(5.0, -2.0, 0.0),
                ExternalImpulse::default(),
            ))
            .id();

        world.run_system_once(apply_water_forces).unwrap();

        // Still water: no surge, so any Z impulse is drag against +Z motion.
        let swimmer = world.get::<ExternalImpulse>(swimmer).unwrap().impulse;
        assert!(swimmer.z < 0.0, "{swimmer:?}");
        let resting = world.get::<ExternalImpulse>(resting).unwrap().impulse;
        assert_eq!(resting.z, 0.0);
    }

    #[test]
    fn test_parented_body_uses_world_pose() {
        let mut world = pond_world(Duration::from_millis(100));
        // Local pose is high above the pond but the parent sinks it.
        let child = world
            .spawn((
                RigidBody::Dynamic,
                Transform::from_xyz(0.0, 20.0, 0.0),
                GlobalTransform::from_xyz(0.0, -2.0, 0.0),
                ExternalImpulse::default(),
            ))
            .id();

        world.run_system_once(apply_water_forces).unwrap();

        assert!(world.get::<ExternalImpulse>(child).unwrap().impulse.y > 0.0);
    }

    #[test]
    fn test_zero_delta_applies_nothing() {
        let mut world = pond_world(Duration::ZERO);
        let sunk = world
            .spawn((
                RigidBody::Dynamic,
                placed(0.0, -2.0, 0.0),
                ExternalImpulse::default(),
            ))
            .id();

        world.run_system_once(apply_water_forces).unwrap();

        assert_eq!(
            world.get::<ExternalImpulse>(sunk).unwrap().impulse,
            Vec3::ZERO
        );
    }

    #[test]
    fn test_rapier_bodies_round_trip() {
        let mut bodies = RapierBodies::default();
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        bodies.push(a, Some(BodySnapshot::new(Vec3::ONE, Vec3::ZERO)));
        bodies.push(b, None);

        let handles = bodies.dynamic_bodies();
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].entity, a);
        assert!(bodies.body(handles[0]).is_some());
        assert!(bodies.body(handles[1]).is_none());

        bodies.apply_impulse(handles[0], Vec3::Y);
        assert_eq!(bodies.impulses(), &[(a, Vec3::Y)]);
    }

    #[test]
    fn test_plugin_rejects_bad_config() {
        let config = WaterPhysicsConfig {
            wave_direction: Vec2::ZERO,
            ..Default::default()
        };
        assert!(WaterPhysicsPlugin::new(config, 0.0).is_err());
    }
}
