//! Headless game loop wiring every component together.
//!
//! A [`Simulation`] owns one bus, one rate multiplier and one run
//! coordinator for the whole session, and rebuilds the craft and level
//! geometry on every level load.

use std::rc::Rc;

use log::{info, warn};

use crate::clock::{FixedTimestep, TimeScale};
use crate::config::{ConfigError, LanderConfig};
use crate::contact::LandingOutcome;
use crate::events::EventBus;
use crate::flight::ControlInput;
use crate::lander::Lander;
use crate::level::LevelCatalog;
use crate::physics::{KinematicBody, PhysicsBody};
use crate::pilot::Pilot;
use crate::run::{LevelTransition, RunCoordinator};
use crate::telemetry::Telemetry;
use crate::world::LevelWorld;

/// Complete single-player session.
#[derive(Debug)]
pub struct Simulation {
    config: LanderConfig,
    catalog: LevelCatalog,
    bus: Rc<EventBus>,
    time_scale: Rc<TimeScale>,
    timestep: FixedTimestep,
    run: RunCoordinator,
    lander: Lander<KinematicBody>,
    world: LevelWorld,
    outcome: Option<LandingOutcome>,
}

impl Simulation {
    /// Validates `config` and loads the first level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the configuration is unusable.
    pub fn new(config: LanderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = config.catalog();
        let first = catalog
            .get(1)
            .cloned()
            .ok_or_else(|| ConfigError::Invalid {
                field: "levels",
                reason: "level 1 is missing".to_owned(),
            })?;

        let bus = Rc::new(EventBus::new());
        let time_scale = Rc::new(TimeScale::running());
        let run = RunCoordinator::new(
            Rc::clone(&bus),
            Rc::clone(&time_scale),
            catalog.count(),
            config.score.coin_bonus,
        );
        let lander = Lander::new(
            config.world.spawn_body(first.start),
            config.flight,
            config.landing,
            Rc::clone(&bus),
        );
        let world = LevelWorld::with_dimensions(
            &first,
            config.world.lander_half_height,
            config.world.pickup_radius,
        );
        let timestep = FixedTimestep::new(
            config.world.fixed_delta_time,
            config.world.max_steps_per_frame,
        );

        let simulation = Self {
            config,
            catalog,
            bus,
            time_scale,
            timestep,
            run,
            lander,
            world,
            outcome: None,
        };
        simulation.lander.announce_state();
        Ok(simulation)
    }

    /// Advances one rendered frame of `frame_dt` seconds.
    ///
    /// The frame is split into fixed steps according to the rate multiplier;
    /// `pilot` chooses the input for each step. Returns the number of steps
    /// run, which is zero while paused.
    pub fn frame<P: Pilot + ?Sized>(&mut self, frame_dt: f32, pilot: &mut P) -> u32 {
        self.run.update(frame_dt);
        let steps = self.timestep.advance(frame_dt, &self.time_scale);
        let dt = self.timestep.step();
        for _ in 0..steps {
            let input = pilot.control(&self.telemetry());
            self.fixed_step(input, dt);
        }
        steps
    }

    /// Runs a single fixed step with `input`.
    ///
    /// Does nothing while paused or once the craft has touched down.
    pub fn fixed_step(&mut self, input: ControlInput, dt: f32) {
        if self.time_scale.is_frozen() || self.lander.state().is_terminal() {
            return;
        }
        self.lander.fixed_step(input, dt);

        for pickup in self.world.collect_pickups(self.lander.body().position()) {
            self.lander.handle_pickup(pickup);
        }
        if let Some(contact) = self.world.probe(self.lander.body()) {
            if let Some(outcome) = self.lander.handle_contact(&contact) {
                self.outcome = Some(outcome);
            }
        }
    }

    /// Rebuilds the craft and geometry for `level`.
    ///
    /// Returns `false`, leaving the current level in place, if the catalog
    /// has no such level.
    pub fn load_level(&mut self, level: u32) -> bool {
        let Some(definition) = self.catalog.get(level).cloned() else {
            warn!("level {level} is not in the catalog");
            return false;
        };
        self.run.begin_level();
        self.lander = Lander::new(
            self.config.world.spawn_body(definition.start),
            self.config.flight,
            self.config.landing,
            Rc::clone(&self.bus),
        );
        self.world = LevelWorld::with_dimensions(
            &definition,
            self.config.world.lander_half_height,
            self.config.world.pickup_radius,
        );
        self.timestep.reset();
        self.outcome = None;
        info!("loaded level {level}");
        self.lander.announce_state();
        true
    }

    /// Replays the current level from scratch.
    pub fn retry_level(&mut self) {
        if let LevelTransition::Load(level) = self.run.retry_level() {
            self.load_level(level);
        }
    }

    /// Banks the level score and loads the next level if one remains.
    ///
    /// Only a successful landing advances. After a crash, or before any
    /// contact, the current level is replayed instead and its number
    /// returned.
    pub fn advance_level(&mut self) -> LevelTransition {
        if !self.outcome.is_some_and(|outcome| outcome.is_success()) {
            warn!("level {} not landed, replaying it", self.run.level());
            let retry = self.run.retry_level();
            if let LevelTransition::Load(level) = retry {
                self.load_level(level);
            }
            return retry;
        }
        let transition = self.run.advance_level();
        if let LevelTransition::Load(level) = transition {
            self.load_level(level);
        }
        transition
    }

    /// Starts a fresh game from level one with time running.
    pub fn new_game(&mut self) {
        self.run.reset_run_state();
        if self.run.is_paused() {
            self.run.unpause();
        }
        self.load_level(1);
    }

    /// Menu action: pauses or resumes the game.
    pub fn toggle_pause(&self) {
        self.run.toggle_pause();
    }

    /// Snapshot for HUDs and pilots.
    #[must_use]
    pub fn telemetry(&self) -> Telemetry {
        Telemetry::capture(
            &self.lander,
            &self.run.state(),
            self.world.ground_height(),
            self.world.half_height(),
        )
    }

    /// Outcome of the current level's contact, once it happened.
    #[must_use]
    pub const fn outcome(&self) -> Option<LandingOutcome> {
        self.outcome
    }

    /// Bus for attaching observers.
    #[must_use]
    pub const fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    /// Session bookkeeping.
    #[must_use]
    pub const fn run(&self) -> &RunCoordinator {
        &self.run
    }

    /// The craft.
    #[must_use]
    pub const fn lander(&self) -> &Lander<KinematicBody> {
        &self.lander
    }

    /// Geometry of the level in play.
    #[must_use]
    pub const fn world(&self) -> &LevelWorld {
        &self.world
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &LanderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lander::LanderState;
    use crate::pilot::{DescentPilot, HeldInput};
    use rstest::rstest;

    fn fly_until_contact(simulation: &mut Simulation, pilot: &mut impl Pilot) {
        for _ in 0..5_000 {
            if simulation.outcome().is_some() {
                return;
            }
            simulation.frame(1.0 / 60.0, pilot);
        }
    }

    #[rstest]
    fn autopilot_lands_the_first_level() {
        let mut simulation = Simulation::new(LanderConfig::default()).expect("default config");
        fly_until_contact(&mut simulation, &mut DescentPilot::default());

        let outcome = simulation.outcome().expect("craft touched down");
        assert!(outcome.is_success(), "unexpected outcome {outcome:?}");
        assert_eq!(simulation.lander().state(), LanderState::Landed);
        assert!(simulation.run.level_score() >= outcome.score());
    }

    #[rstest]
    fn free_fall_crashes() {
        let mut simulation = Simulation::new(LanderConfig::default()).expect("default config");
        fly_until_contact(&mut simulation, &mut HeldInput::default());
        assert_eq!(simulation.lander().state(), LanderState::Crashed);
    }

    #[rstest]
    fn paused_frames_do_not_step() {
        let mut simulation = Simulation::new(LanderConfig::default()).expect("default config");
        let before = simulation.telemetry();
        simulation.toggle_pause();
        let steps = simulation.frame(0.5, &mut HeldInput::default());
        assert_eq!(steps, 0);
        assert_eq!(simulation.telemetry(), before);
    }

    #[rstest]
    fn crashed_level_is_replayed_instead_of_advanced() {
        let mut simulation = Simulation::new(LanderConfig::default()).expect("default config");
        fly_until_contact(&mut simulation, &mut HeldInput::default());
        assert_eq!(simulation.lander().state(), LanderState::Crashed);

        assert_eq!(simulation.advance_level(), LevelTransition::Load(1));
        assert_eq!(simulation.run().level(), 1);
        assert_eq!(simulation.run().total_score(), 0);
        assert_eq!(simulation.world().number(), 1);
        assert_eq!(simulation.lander().state(), LanderState::Normal);
        assert!(simulation.outcome().is_none());
    }

    #[rstest]
    fn advancing_mid_flight_keeps_the_level() {
        let mut simulation = Simulation::new(LanderConfig::default()).expect("default config");
        simulation.frame(0.1, &mut HeldInput::default());
        assert_eq!(simulation.advance_level(), LevelTransition::Load(1));
        assert_eq!(simulation.run().level(), 1);
    }

    #[rstest]
    fn landed_level_advances() {
        let mut simulation = Simulation::new(LanderConfig::default()).expect("default config");
        fly_until_contact(&mut simulation, &mut DescentPilot::default());
        assert!(simulation.outcome().is_some_and(|outcome| outcome.is_success()));

        assert_eq!(simulation.advance_level(), LevelTransition::Load(2));
        assert_eq!(simulation.run().level(), 2);
        assert_eq!(simulation.world().number(), 2);
    }

    #[rstest]
    fn fixed_step_is_inert_while_paused() {
        let mut simulation = Simulation::new(LanderConfig::default()).expect("default config");
        let before = simulation.telemetry();
        simulation.toggle_pause();
        simulation.fixed_step(
            ControlInput {
                up: true,
                left: true,
                right: false,
            },
            0.02,
        );
        assert_eq!(simulation.telemetry(), before);
        assert!((simulation.lander().fuel().amount() - before.fuel).abs() < f32::EPSILON);
    }

    #[rstest]
    fn unknown_level_is_refused() {
        let mut simulation = Simulation::new(LanderConfig::default()).expect("default config");
        assert!(!simulation.load_level(42));
        assert_eq!(simulation.world().number(), 1);
    }
}
