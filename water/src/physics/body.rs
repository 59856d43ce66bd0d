use bevy::math::primitives::{Capsule3d, Cuboid, Sphere};
use bevy::math::{Quat, Vec3};
use bevy_rapier3d::prelude::Collider;

/// State of a rigid body as read at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySnapshot {
    pub position: Vec3,
    pub linear_velocity: Vec3,
    pub rotation: Quat,
    /// Approximate box half-extents, `None` when the shape can't tell
    pub half_extents: Option<Vec3>,
}

impl BodySnapshot {
    pub fn new(position: Vec3, linear_velocity: Vec3) -> Self {
        Self {
            position,
            linear_velocity,
            rotation: Quat::IDENTITY,
            half_extents: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_half_extents(mut self, half_extents: Vec3) -> Self {
        self.half_extents = Some(half_extents);
        self
    }

    /// `false` when any state the force model reads is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.linear_velocity.is_finite() && self.rotation.is_finite()
    }
}

/// A rigid-body world owned by an external physics engine.
///
/// Handles are only valid for the tick in which they were listed; the water
/// engine never keeps one across calls.
pub trait PhysicsWorld {
    type Handle: Copy + std::fmt::Debug;

    /// Every body that should receive water forces this tick.
    fn dynamic_bodies(&self) -> Vec<Self::Handle>;

    /// Current state of a body, `None` if it vanished or can't be read.
    fn body(&self, handle: Self::Handle) -> Option<BodySnapshot>;

    /// Apply an impulse at the body's centre of mass.
    fn apply_impulse(&mut self, handle: Self::Handle, impulse: Vec3);
}

/// Shapes that can report an approximate axis-aligned half-extent in their
/// local frame.
pub trait ApproximateExtents {
    fn approximate_half_extents(&self) -> Option<Vec3>;
}

impl ApproximateExtents for Collider {
    fn approximate_half_extents(&self) -> Option<Vec3> {
        let half = self.raw.compute_local_aabb().half_extents();
        Some(Vec3::new(half.x, half.y, half.z))
    }
}

impl ApproximateExtents for Cuboid {
    fn approximate_half_extents(&self) -> Option<Vec3> {
        Some(self.half_size)
    }
}

impl ApproximateExtents for Sphere {
    fn approximate_half_extents(&self) -> Option<Vec3> {
        Some(Vec3::splat(self.radius))
    }
}

impl ApproximateExtents for Capsule3d {
    fn approximate_half_extents(&self) -> Option<Vec3> {
        Some(Vec3::new(
            self.radius,
            self.half_length + self.radius,
            self.radius,
        ))
    }
}

/// Half-extents usable for sampling: missing, flat or non-finite extents
/// fall back to `default`.
pub fn sanitize_half_extents(half_extents: Option<Vec3>, default: Vec3) -> Vec3 {
    match half_extents {
        Some(half) if half.is_finite() && half.cmpgt(Vec3::ZERO).all() => half,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collider_half_extents() {
        let cuboid = Collider::cuboid(1.0, 0.5, 2.0);
        let half = cuboid.approximate_half_extents().unwrap();
        assert!((half - Vec3::new(1.0, 0.5, 2.0)).length() < 1e-5);

        let ball = Collider::ball(0.75);
        let half = ball.approximate_half_extents().unwrap();
        assert!((half - Vec3::splat(0.75)).length() < 1e-5);
    }

    #[test]
    fn test_primitive_half_extents() {
        let capsule = Capsule3d::new(0.25, 1.0);
        assert_eq!(
            capsule.approximate_half_extents(),
            Some(Vec3::new(0.25, 0.75, 0.25))
        );
        assert_eq!(
            Sphere::new(2.0).approximate_half_extents(),
            Some(Vec3::splat(2.0))
        );
        assert_eq!(
            Cuboid::new(2.0, 4.0, 6.0).approximate_half_extents(),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_sanitize_half_extents() {
        let default = Vec3::splat(0.5);
        assert_eq!(sanitize_half_extents(None, default), default);
        assert_eq!(
            sanitize_half_extents(Some(Vec3::new(1.0, 0.0, 1.0)), default),
            default
        );
        assert_eq!(
            sanitize_half_extents(Some(Vec3::new(1.0, f32::NAN, 1.0)), default),
            default
        );
        assert_eq!(
            sanitize_half_extents(Some(Vec3::ONE), default),
            Vec3::ONE
        );
    }

    #[test]
    fn test_snapshot_finiteness() {
        assert!(BodySnapshot::new(Vec3::ZERO, Vec3::X).is_finite());
        assert!(!BodySnapshot::new(Vec3::new(0.0, f32::NAN, 0.0), Vec3::ZERO).is_finite());
    }
}
