//! Rigid-body capability consumed by the flight controller.
//!
//! The simulation core only talks to [`PhysicsBody`]; any 2-D integrator can
//! stand behind it. [`KinematicBody`] is a small deterministic implementation
//! used by the headless binary and the test suites.

use glam::Vec2;
use log::trace;

use crate::vector_math::up_axis;
use crate::{ANGULAR_DAMPING, DEFAULT_INERTIA, DEFAULT_MASS, GRAVITY_PULL};

/// Smallest acceptable mass to avoid numerically unstable accelerations.
const MIN_MASS: f32 = 1e-6;

/// Frame in which a force vector is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceSpace {
    /// Axes fixed to the world.
    World,
    /// Axes rotating with the body; `+y` is the body's up.
    Local,
}

/// Minimal rigid-body interface driven once per fixed step.
#[cfg_attr(test, mockall::automock)]
pub trait PhysicsBody {
    /// Queues a linear force for the next integration step.
    fn apply_force(&mut self, force: Vec2, space: ForceSpace);
    /// Queues a torque for the next integration step; positive turns left.
    fn apply_torque(&mut self, torque: f32);
    /// Current linear velocity in world space.
    fn velocity(&self) -> Vec2;
    /// Current position of the body's centre in world space.
    fn position(&self) -> Vec2;
    /// Unit vector pointing along the body's local up axis.
    fn up(&self) -> Vec2;
    /// Advances the body by `dt` seconds, consuming queued forces.
    fn integrate(&mut self, dt: f32);
}

/// Computes acceleration from a force vector and mass.
///
/// Returns `None` if `mass` is non-positive or effectively zero (see
/// [`MIN_MASS`]). The calculation applies `F=ma` for each component
/// independently.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use lander::applied_acceleration;
/// let accel = applied_acceleration(Vec2::new(7.0, -14.0), 7.0).unwrap();
/// assert!((accel.x - 1.0).abs() < 1e-6);
/// assert!((accel.y + 2.0).abs() < 1e-6);
/// assert!(applied_acceleration(Vec2::ONE, 0.0).is_none());
/// ```
#[must_use]
pub fn applied_acceleration(force: Vec2, mass: f32) -> Option<Vec2> {
    (mass > MIN_MASS).then(|| force / mass)
}

/// Deterministic semi-implicit Euler integrator for a single craft.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    position: Vec2,
    velocity: Vec2,
    rotation: f32,
    angular_velocity: f32,
    mass: f32,
    inertia: f32,
    gravity: Vec2,
    angular_damping: f32,
    pending_force: Vec2,
    pending_torque: f32,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

impl KinematicBody {
    /// Creates an upright body at rest at `position` with default parameters.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            mass: DEFAULT_MASS,
            inertia: DEFAULT_INERTIA,
            gravity: Vec2::new(0.0, GRAVITY_PULL),
            angular_damping: ANGULAR_DAMPING,
            pending_force: Vec2::ZERO,
            pending_torque: 0.0,
        }
    }

    /// Overrides the gravitational acceleration.
    #[must_use]
    pub const fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Overrides mass and rotational inertia.
    #[must_use]
    pub const fn with_mass(mut self, mass: f32, inertia: f32) -> Self {
        self.mass = mass;
        self.inertia = inertia;
        self
    }

    /// Overrides the fraction of angular velocity lost per second.
    #[must_use]
    pub const fn with_angular_damping(mut self, damping: f32) -> Self {
        self.angular_damping = damping;
        self
    }

    /// Overrides the initial linear velocity.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Overrides the initial rotation in radians.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Current rotation in radians; zero is upright.
    #[must_use]
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Current angular velocity in radians per second.
    #[must_use]
    pub const fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }
}

impl PhysicsBody for KinematicBody {
    fn apply_force(&mut self, force: Vec2, space: ForceSpace) {
        let world_force = match space {
            ForceSpace::World => force,
            ForceSpace::Local => Vec2::from_angle(self.rotation).rotate(force),
        };
        self.pending_force += world_force;
    }

    fn apply_torque(&mut self, torque: f32) {
        self.pending_torque += torque;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn up(&self) -> Vec2 {
        up_axis(self.rotation)
    }

    fn integrate(&mut self, dt: f32) {
        let thrust = applied_acceleration(self.pending_force, self.mass).unwrap_or(Vec2::ZERO);
        self.velocity += (self.gravity + thrust) * dt;
        self.position += self.velocity * dt;

        let spin = applied_acceleration(Vec2::new(self.pending_torque, 0.0), self.inertia)
            .map_or(0.0, |accel| accel.x);
        self.angular_velocity += spin * dt;
        self.angular_velocity *= (1.0 - self.angular_damping * dt).max(0.0);
        self.rotation += self.angular_velocity * dt;

        self.pending_force = Vec2::ZERO;
        self.pending_torque = 0.0;
        trace!(
            "body at {:?} moving {:?} rotation {:.3}",
            self.position,
            self.velocity,
            self.rotation
        );
    }
}
