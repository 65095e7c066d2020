//! Headless collision probing for a loaded level.
//!
//! Stands in for an engine's collision callbacks: each step the craft's
//! footprint is tested against the pads, then the terrain, and its centre
//! against the remaining pickups.

use glam::Vec2;
use log::debug;

use crate::contact::Contact;
use crate::lander::Pickup;
use crate::level::{LevelDefinition, PadPlacement};
use crate::physics::PhysicsBody;
use crate::{LANDER_HALF_HEIGHT, PICKUP_RADIUS};

#[derive(Debug, Clone, Copy, PartialEq)]
struct PickupSpot {
    position: Vec2,
    kind: Pickup,
    collected: bool,
}

/// Geometry of the level currently in play.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelWorld {
    number: u32,
    ground_height: f32,
    pads: Vec<PadPlacement>,
    pickups: Vec<PickupSpot>,
    half_height: f32,
    pickup_radius: f32,
}

impl LevelWorld {
    /// Builds the world for `level` with the default craft dimensions.
    #[must_use]
    pub fn new(level: &LevelDefinition) -> Self {
        Self::with_dimensions(level, LANDER_HALF_HEIGHT, PICKUP_RADIUS)
    }

    /// Builds the world for `level` with explicit craft dimensions.
    #[must_use]
    pub fn with_dimensions(level: &LevelDefinition, half_height: f32, pickup_radius: f32) -> Self {
        let coins = level.coins.iter().map(|&position| PickupSpot {
            position,
            kind: Pickup::Coin,
            collected: false,
        });
        let fuel = level.fuel_cells.iter().map(|&position| PickupSpot {
            position,
            kind: Pickup::Fuel,
            collected: false,
        });
        Self {
            number: level.number,
            ground_height: level.ground_height,
            pads: level.pads.clone(),
            pickups: coins.chain(fuel).collect(),
            half_height: half_height.max(0.0),
            pickup_radius: pickup_radius.max(0.0),
        }
    }

    /// Number of the level this world was built from.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Height of the flat terrain.
    #[must_use]
    pub const fn ground_height(&self) -> f32 {
        self.ground_height
    }

    /// Distance from the craft's centre to its landing legs.
    #[must_use]
    pub const fn half_height(&self) -> f32 {
        self.half_height
    }

    /// Returns the contact the body is making, if any.
    ///
    /// A pad under the craft's footprint takes precedence over the terrain.
    pub fn probe<B: PhysicsBody + ?Sized>(&self, body: &B) -> Option<Contact> {
        let position = body.position();
        let footprint = position.y - self.half_height;
        let speed = body.velocity().length();
        let up = body.up();

        if let Some(placement) = self
            .pads
            .iter()
            .find(|pad| pad.spans(position.x) && footprint <= pad.centre.y)
        {
            debug!("pad contact at {position:?}");
            return Some(Contact::pad(placement.pad(), speed, up));
        }
        (footprint <= self.ground_height).then(|| {
            debug!("terrain contact at {position:?}");
            Contact::terrain(speed, up)
        })
    }

    /// Collects every pickup within reach of `position`.
    ///
    /// Each pickup is returned at most once per level.
    pub fn collect_pickups(&mut self, position: Vec2) -> Vec<Pickup> {
        let reach = self.pickup_radius;
        self.pickups
            .iter_mut()
            .filter(|spot| !spot.collected && spot.position.distance(position) <= reach)
            .map(|spot| {
                spot.collected = true;
                spot.kind
            })
            .collect()
    }

    /// Pickups not yet collected.
    #[must_use]
    pub fn remaining_pickups(&self) -> usize {
        self.pickups.iter().filter(|spot| !spot.collected).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactTarget;
    use crate::physics::KinematicBody;
    use rstest::{fixture, rstest};

    #[fixture]
    fn level() -> LevelDefinition {
        LevelDefinition {
            number: 1,
            start: Vec2::new(0.0, 10.0),
            ground_height: 0.0,
            pads: vec![PadPlacement {
                centre: Vec2::new(0.0, 1.0),
                width: 2.0,
                multiplier: 2.0,
            }],
            coins: vec![Vec2::new(0.0, 5.0)],
            fuel_cells: vec![Vec2::new(3.0, 5.0)],
        }
    }

    #[rstest]
    #[case::airborne(Vec2::new(0.0, 3.0), None)]
    #[case::on_pad(Vec2::new(0.5, 1.4), Some(true))]
    #[case::beside_pad(Vec2::new(4.0, 0.4), Some(false))]
    #[case::above_ground(Vec2::new(4.0, 0.6), None)]
    fn probe_prefers_pads(
        level: LevelDefinition,
        #[case] position: Vec2,
        #[case] on_pad: Option<bool>,
    ) {
        let world = LevelWorld::new(&level);
        let body = KinematicBody::at(position).with_velocity(Vec2::new(0.0, -2.0));
        let contact = world.probe(&body);
        assert_eq!(
            contact.map(|c| matches!(c.target, ContactTarget::Pad(_))),
            on_pad
        );
        if let Some(found) = contact {
            assert!((found.relative_speed - 2.0).abs() < 1e-6);
        }
    }

    #[rstest]
    fn pickups_are_collected_once(level: LevelDefinition) {
        let mut world = LevelWorld::new(&level);
        assert_eq!(world.collect_pickups(Vec2::new(0.0, 5.5)), vec![Pickup::Coin]);
        assert!(world.collect_pickups(Vec2::new(0.0, 5.5)).is_empty());
        assert_eq!(world.remaining_pickups(), 1);
        assert_eq!(world.collect_pickups(Vec2::new(3.0, 4.2)), vec![Pickup::Fuel]);
    }
}
