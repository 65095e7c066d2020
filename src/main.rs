//! Headless lander runner.
//!
//! Plays every configured level with the descent autopilot and logs each
//! landing, the run's progress and the final score.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use lander::{
    init_logging, AudioSettings, DescentPilot, LanderConfig, LevelTransition, Simulation,
    SoundCues, ThrusterEmitters,
};
use log::{debug, info, warn};

/// Simulated frame length.
const FRAME_SECONDS: f32 = 1.0 / 60.0;

/// A thrust-controlled lunar lander, played by an autopilot
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration overriding the built-in settings and levels
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Attempts allowed per level before giving up
    #[arg(short, long, default_value_t = 3)]
    attempts: u32,
    /// Simulated seconds allowed per attempt
    #[arg(short, long, default_value_t = 120.0)]
    max_seconds: f32,
}

fn load_config(path: Option<&PathBuf>) -> Result<LanderConfig> {
    path.map_or_else(
        || Ok(LanderConfig::default()),
        |file| {
            LanderConfig::from_path(file)
                .with_context(|| format!("loading configuration from {}", file.display()))
        },
    )
}

/// Flies the current level until touchdown or the time limit.
fn fly_attempt(simulation: &mut Simulation, max_seconds: f32) -> bool {
    let mut pilot = DescentPilot::default();
    let mut flown = 0.0;
    while flown < max_seconds {
        simulation.frame(FRAME_SECONDS, &mut pilot);
        flown += FRAME_SECONDS;
        if let Some(outcome) = simulation.outcome() {
            let telemetry = simulation.telemetry();
            info!(
                "level {}: {:?} with {:.1} fuel left",
                telemetry.level,
                outcome.kind(),
                telemetry.fuel
            );
            return outcome.is_success();
        }
    }
    warn!("attempt timed out after {max_seconds:.0}s");
    false
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(args.config.as_ref())?;
    let mut simulation = Simulation::new(config).context("starting simulation")?;
    let sounds = SoundCues::attach(Rc::clone(simulation.bus()), AudioSettings::default());
    let emitters = ThrusterEmitters::attach(Rc::clone(simulation.bus()));

    let mut failures = 0;
    loop {
        let landed = fly_attempt(&mut simulation, args.max_seconds);
        for played in sounds.drain() {
            debug!("cue {:?} at volume {:.1}", played.cue, played.volume);
        }
        debug!("thrusters {:?}", emitters.state());

        if landed {
            failures = 0;
            match simulation.advance_level() {
                LevelTransition::Load(level) => info!("on to level {level}"),
                LevelTransition::RunComplete { total_score } => {
                    let telemetry = simulation.telemetry();
                    let (seconds, hundredths) = telemetry.clock();
                    info!("run complete: {total_score} points in {seconds}.{hundredths:02}s");
                    return Ok(());
                }
            }
        } else {
            failures += 1;
            if failures >= args.attempts {
                info!(
                    "giving up on level {} with {} points banked",
                    simulation.run().level(),
                    simulation.run().total_score()
                );
                return Ok(());
            }
            simulation.retry_level();
        }
    }
}
