//! Scripted physics body that records what the controller asked of it.

use glam::Vec2;
use lander::{ForceSpace, PhysicsBody};

/// Body with fixed kinematics that logs every force and torque it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingBody {
    /// Reported position.
    pub position: Vec2,
    /// Reported velocity.
    pub velocity: Vec2,
    /// Reported up axis.
    pub up: Vec2,
    /// Forces applied, in call order.
    pub forces: Vec<(Vec2, ForceSpace)>,
    /// Torques applied, in call order.
    pub torques: Vec<f32>,
    /// Step lengths passed to `integrate`.
    pub steps: Vec<f32>,
}

impl RecordingBody {
    /// Upright body at rest at `position`.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            up: Vec2::Y,
            ..Self::default()
        }
    }
}

impl PhysicsBody for RecordingBody {
    fn apply_force(&mut self, force: Vec2, space: ForceSpace) {
        self.forces.push((force, space));
    }

    fn apply_torque(&mut self, torque: f32) {
        self.torques.push(torque);
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn up(&self) -> Vec2 {
        self.up
    }

    fn integrate(&mut self, dt: f32) {
        self.steps.push(dt);
    }
}
