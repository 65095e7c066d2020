//! Session bookkeeping across levels.
//!
//! [`RunCoordinator`] listens to the craft's notifications to keep score and
//! time, decides which level comes next, and owns the pause switch.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::clock::TimeScale;
use crate::events::{EventBus, EventKind, LanderEvent, SubscriptionId};
use crate::lander::LanderState;

/// Snapshot of the session's progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunState {
    /// One-based index of the level being played.
    pub level: u32,
    /// Score earned in the current level so far.
    pub level_score: u32,
    /// Score banked from completed levels.
    pub total_score: u32,
    /// Active seconds across the whole session.
    pub elapsed: f32,
    /// Active seconds in the current level.
    pub level_elapsed: f32,
    /// Whether the craft is in flight and the clock is counting.
    pub timer_running: bool,
    /// Set once the last level has been completed.
    pub finished: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            level: 1,
            level_score: 0,
            total_score: 0,
            elapsed: 0.0,
            level_elapsed: 0.0,
            timer_running: false,
            finished: false,
        }
    }
}

impl RunState {
    fn on_event(&mut self, event: &LanderEvent, coin_bonus: u32) {
        match *event {
            LanderEvent::StateChanged(state) => {
                self.timer_running = state == LanderState::Normal;
            }
            LanderEvent::Landed(outcome) if outcome.is_success() => {
                self.level_score = self.level_score.saturating_add(outcome.score());
                debug!("level score now {}", self.level_score);
            }
            LanderEvent::CoinPickup => {
                self.level_score = self.level_score.saturating_add(coin_bonus);
                debug!("coin collected, level score now {}", self.level_score);
            }
            _ => {}
        }
    }
}

/// Scene request emitted when the run moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTransition {
    /// Load the level with this one-based number.
    Load(u32),
    /// No levels remain; the run is over.
    RunComplete {
        /// Final banked score.
        total_score: u32,
    },
}

/// Aggregates score and time and controls pause for a whole session.
///
/// The coordinator subscribes itself on construction and unsubscribes when
/// dropped.
#[derive(Debug)]
pub struct RunCoordinator {
    bus: Rc<EventBus>,
    time_scale: Rc<TimeScale>,
    level_count: u32,
    state: Rc<RefCell<RunState>>,
    subscription: SubscriptionId,
}

impl RunCoordinator {
    /// Creates a fresh session over `level_count` levels.
    #[must_use]
    pub fn new(
        bus: Rc<EventBus>,
        time_scale: Rc<TimeScale>,
        level_count: u32,
        coin_bonus: u32,
    ) -> Self {
        let state = Rc::new(RefCell::new(RunState::default()));
        let sink = Rc::clone(&state);
        let subscription = bus.subscribe_many(
            &[
                EventKind::StateChanged,
                EventKind::Landed,
                EventKind::CoinPickup,
            ],
            move |event| sink.borrow_mut().on_event(event, coin_bonus),
        );
        Self {
            bus,
            time_scale,
            level_count: level_count.max(1),
            state,
            subscription,
        }
    }

    /// Advances the active-time clocks by one frame.
    ///
    /// The frame time is scaled by the rate multiplier, so nothing accrues
    /// while paused.
    pub fn update(&self, frame_dt: f32) {
        let scaled = frame_dt * self.time_scale.rate();
        if !scaled.is_finite() || scaled <= 0.0 {
            return;
        }
        let mut state = self.state.borrow_mut();
        if state.timer_running {
            state.elapsed += scaled;
            state.level_elapsed += scaled;
        }
    }

    /// Adds `points` to the current level's score.
    pub fn add_score(&self, points: u32) {
        let mut state = self.state.borrow_mut();
        state.level_score = state.level_score.saturating_add(points);
    }

    /// Clears per-level counters ahead of a level load.
    pub fn begin_level(&self) {
        let mut state = self.state.borrow_mut();
        state.level_score = 0;
        state.level_elapsed = 0.0;
        state.timer_running = false;
    }

    /// Banks the level score and moves to the next level.
    ///
    /// From the last level this reports [`LevelTransition::RunComplete`] and
    /// leaves the level index in range; calling again repeats the same
    /// result without banking anything further.
    pub fn advance_level(&self) -> LevelTransition {
        let transition = {
            let mut state = self.state.borrow_mut();
            if state.finished {
                return LevelTransition::RunComplete {
                    total_score: state.total_score,
                };
            }
            state.total_score = state.total_score.saturating_add(state.level_score);
            state.level_score = 0;
            if state.level < self.level_count {
                state.level += 1;
                LevelTransition::Load(state.level)
            } else {
                state.finished = true;
                LevelTransition::RunComplete {
                    total_score: state.total_score,
                }
            }
        };
        info!("advancing: {transition:?}");
        if let LevelTransition::Load(_) = transition {
            self.begin_level();
        }
        transition
    }

    /// Restarts the current level, discarding its score.
    pub fn retry_level(&self) -> LevelTransition {
        self.begin_level();
        let level = self.state.borrow().level;
        info!("retrying level {level}");
        LevelTransition::Load(level)
    }

    /// Returns the session to level one with no score or time.
    ///
    /// Only meant for a fresh game; mid-run progress is lost.
    pub fn reset_run_state(&self) {
        *self.state.borrow_mut() = RunState::default();
        info!("run state reset");
    }

    /// Freezes simulation time and announces the pause.
    pub fn pause(&self) {
        self.time_scale.set_rate(0.0);
        self.bus.publish(&LanderEvent::GamePaused);
    }

    /// Restores normal simulation speed and announces it.
    pub fn unpause(&self) {
        self.time_scale.set_rate(1.0);
        self.bus.publish(&LanderEvent::GameUnpaused);
    }

    /// Pauses when running, unpauses when frozen.
    pub fn toggle_pause(&self) {
        if self.is_paused() {
            self.unpause();
        } else {
            self.pause();
        }
    }

    /// Whether simulation time is frozen.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.time_scale.is_frozen()
    }

    /// Copy of the current session state.
    #[must_use]
    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    /// Current one-based level number.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.state.borrow().level
    }

    /// Score earned in the current level.
    #[must_use]
    pub fn level_score(&self) -> u32 {
        self.state.borrow().level_score
    }

    /// Score banked from completed levels.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.state.borrow().total_score
    }

    /// Number of levels in the session.
    #[must_use]
    pub const fn level_count(&self) -> u32 {
        self.level_count
    }
}

impl Drop for RunCoordinator {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
    }
}
