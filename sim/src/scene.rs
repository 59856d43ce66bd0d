//! The pond: a fixed bed and island plus a handful of floating props.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use pond_water::WaterSurface;

/// Marks props that telemetry reports on.
#[derive(Component, Debug, Clone, Copy)]
pub struct Floater {
    /// Half-height used to decide whether the prop floats or sank
    pub half_height: f32,
}

/// Depth of the pond bed below the still water level.
const POND_DEPTH: f32 = 4.0;
const POND_HALF_WIDTH: f32 = 30.0;

struct PropSpec {
    name: &'static str,
    collider: Collider,
    density: f32,
    half_height: f32,
    offset: Vec3,
    rotation: Quat,
}

fn props() -> Vec<PropSpec> {
    vec![
        PropSpec {
            name: "capybara",
            collider: Collider::cuboid(0.45, 0.35, 0.8),
            density: 0.9,
            half_height: 0.35,
            offset: Vec3::new(0.0, 2.0, 0.0),
            rotation: Quat::IDENTITY,
        },
        PropSpec {
            name: "crate",
            collider: Collider::cuboid(0.5, 0.5, 0.5),
            density: 0.6,
            half_height: 0.5,
            offset: Vec3::new(-3.0, 1.5, 2.0),
            rotation: Quat::from_rotation_y(0.4),
        },
        PropSpec {
            name: "beach_ball",
            collider: Collider::ball(0.4),
            density: 0.2,
            half_height: 0.4,
            offset: Vec3::new(2.5, 3.0, -1.5),
            rotation: Quat::IDENTITY,
        },
        PropSpec {
            name: "log",
            collider: Collider::capsule_y(1.0, 0.25),
            density: 0.7,
            half_height: 0.25,
            offset: Vec3::new(-1.0, 1.0, -4.0),
            rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        },
        PropSpec {
            name: "anchor_stone",
            collider: Collider::ball(0.3),
            density: 8.0,
            half_height: 0.3,
            offset: Vec3::new(4.0, 1.0, 4.0),
            rotation: Quat::IDENTITY,
        },
    ]
}

/// Startup system spawning the pond around the current water level.
pub fn spawn_pond(mut commands: Commands, surface: Res<WaterSurface>) {
    let level = surface.level;

    commands.spawn((
        Name::new("pond_bed"),
        RigidBody::Fixed,
        Collider::cuboid(POND_HALF_WIDTH, 0.5, POND_HALF_WIDTH),
        Transform::from_xyz(0.0, level - POND_DEPTH - 0.5, 0.0),
    ));

    commands.spawn((
        Name::new("island"),
        RigidBody::Fixed,
        Collider::cuboid(3.0, 3.0, 3.0),
        Transform::from_xyz(10.0, level - 1.5, -8.0),
    ));

    for prop in props() {
        commands.spawn((
            Name::new(prop.name),
            Floater {
                half_height: prop.half_height,
            },
            RigidBody::Dynamic,
            prop.collider,
            ColliderMassProperties::Density(prop.density),
            Velocity::zero(),
            ExternalImpulse::default(),
            Transform::from_translation(Vec3::Y * level + prop.offset)
                .with_rotation(prop.rotation),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_spawn_pond() {
        let mut world = World::new();
        world.insert_resource(WaterSurface { level: 2.0 });
        world.run_system_once(spawn_pond).unwrap();

        let mut dynamic = 0;
        let mut fixed = 0;
        let mut query = world.query::<&RigidBody>();
        for body in query.iter(&world) {
            match body {
                RigidBody::Dynamic => dynamic += 1,
                RigidBody::Fixed => fixed += 1,
                _ => {}
            }
        }
        assert_eq!(dynamic, props().len());
        assert_eq!(fixed, 2);

        let mut floaters = world.query::<(&Name, &Transform, &Floater)>();
        for (name, transform, _) in floaters.iter(&world) {
            assert!(
                transform.translation.y > 2.0,
                "{name} should start above the water"
            );
        }
    }
}
