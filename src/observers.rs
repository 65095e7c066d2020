//! Presentation-side listeners driven purely by bus notifications.
//!
//! Neither observer knows about the other or about the craft; each keeps the
//! state a renderer or mixer would read.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;

use crate::events::{EventBus, EventKind, LanderEvent, SubscriptionId};
use crate::lander::LanderState;
use crate::{DEFAULT_MUSIC_VOLUME, DEFAULT_SOUND_VOLUME, VOLUME_LEVELS};

/// Which thruster plumes are lit, and whether the craft is drawn at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitterState {
    /// Plume on the left side; lit when turning right.
    pub left: bool,
    /// Main engine plume.
    pub middle: bool,
    /// Plume on the right side; lit when turning left.
    pub right: bool,
    /// Cleared when the craft crashes.
    pub visible: bool,
}

impl EmitterState {
    const DARK: Self = Self {
        left: false,
        middle: false,
        right: false,
        visible: true,
    };

    fn apply(&mut self, event: &LanderEvent) {
        match *event {
            LanderEvent::BeforeForce => {
                *self = Self {
                    visible: self.visible,
                    ..Self::DARK
                };
            }
            LanderEvent::UpForce => {
                self.left = true;
                self.middle = true;
                self.right = true;
            }
            LanderEvent::LeftForce => self.right = true,
            LanderEvent::RightForce => self.left = true,
            LanderEvent::Landed(outcome) if !outcome.is_success() => {
                *self = Self {
                    visible: false,
                    ..Self::DARK
                };
            }
            LanderEvent::StateChanged(LanderState::Normal) => *self = Self::DARK,
            _ => {}
        }
    }
}

impl Default for EmitterState {
    fn default() -> Self {
        Self::DARK
    }
}

/// Tracks thruster plumes from the flight notifications.
#[derive(Debug)]
pub struct ThrusterEmitters {
    bus: Rc<EventBus>,
    state: Rc<Cell<EmitterState>>,
    subscription: SubscriptionId,
}

impl ThrusterEmitters {
    /// Starts listening on `bus`.
    #[must_use]
    pub fn attach(bus: Rc<EventBus>) -> Self {
        let state = Rc::new(Cell::new(EmitterState::default()));
        let sink = Rc::clone(&state);
        let subscription = bus.subscribe_many(
            &[
                EventKind::BeforeForce,
                EventKind::UpForce,
                EventKind::LeftForce,
                EventKind::RightForce,
                EventKind::Landed,
                EventKind::StateChanged,
            ],
            move |event| {
                let mut current = sink.get();
                current.apply(event);
                sink.set(current);
            },
        );
        Self {
            bus,
            state,
            subscription,
        }
    }

    /// Current plume state.
    #[must_use]
    pub fn state(&self) -> EmitterState {
        self.state.get()
    }
}

impl Drop for ThrusterEmitters {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
    }
}

/// Discrete volume setting that wraps back to silence after the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeLevel(u8);

impl VolumeLevel {
    /// Creates a level, wrapping values past the maximum.
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self(level % VOLUME_LEVELS)
    }

    /// Moves to the next level, wrapping to zero.
    #[must_use]
    pub const fn cycled(self) -> Self {
        Self::new(self.0 + 1)
    }

    /// Raw level in `0..VOLUME_LEVELS`.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Level as a fraction of full volume.
    #[must_use]
    pub fn normalized(self) -> f32 {
        f32::from(self.0) / f32::from(VOLUME_LEVELS)
    }
}

/// Sound and music volume preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSettings {
    /// Effects volume.
    pub sound: VolumeLevel,
    /// Music volume.
    pub music: VolumeLevel,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sound: VolumeLevel::new(DEFAULT_SOUND_VOLUME),
            music: VolumeLevel::new(DEFAULT_MUSIC_VOLUME),
        }
    }
}

/// Sound effects the game can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A coin was collected.
    CoinPickup,
    /// A fuel cell was collected.
    FuelPickup,
    /// The craft landed.
    LandingSuccess,
    /// The craft crashed.
    LandingCrash,
}

/// A cue queued for playback at a given volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedCue {
    /// Which sound.
    pub cue: SoundCue,
    /// Normalised playback volume.
    pub volume: f32,
}

#[derive(Debug, Default)]
struct CueQueue {
    settings: AudioSettings,
    pending: Vec<PlayedCue>,
}

/// Queues sound cues in response to pickups and landings.
#[derive(Debug)]
pub struct SoundCues {
    bus: Rc<EventBus>,
    inner: Rc<RefCell<CueQueue>>,
    subscription: SubscriptionId,
}

impl SoundCues {
    /// Starts listening on `bus` with `settings`.
    #[must_use]
    pub fn attach(bus: Rc<EventBus>, settings: AudioSettings) -> Self {
        let inner = Rc::new(RefCell::new(CueQueue {
            settings,
            pending: Vec::new(),
        }));
        let sink = Rc::clone(&inner);
        let subscription = bus.subscribe_many(
            &[
                EventKind::CoinPickup,
                EventKind::FuelPickup,
                EventKind::Landed,
            ],
            move |event| {
                let cue = match *event {
                    LanderEvent::CoinPickup => SoundCue::CoinPickup,
                    LanderEvent::FuelPickup => SoundCue::FuelPickup,
                    LanderEvent::Landed(outcome) if outcome.is_success() => {
                        SoundCue::LandingSuccess
                    }
                    LanderEvent::Landed(_) => SoundCue::LandingCrash,
                    _ => return,
                };
                let mut queue = sink.borrow_mut();
                let volume = queue.settings.sound.normalized();
                queue.pending.push(PlayedCue { cue, volume });
            },
        );
        Self {
            bus,
            inner,
            subscription,
        }
    }

    /// Takes every cue queued since the last call.
    pub fn drain(&self) -> Vec<PlayedCue> {
        std::mem::take(&mut self.inner.borrow_mut().pending)
    }

    /// Current volume settings.
    #[must_use]
    pub fn settings(&self) -> AudioSettings {
        self.inner.borrow().settings
    }

    /// Steps the effects volume, wrapping to silence after the maximum.
    pub fn cycle_sound_volume(&self) -> VolumeLevel {
        let mut queue = self.inner.borrow_mut();
        queue.settings.sound = queue.settings.sound.cycled();
        debug!("sound volume {}", queue.settings.sound.level());
        queue.settings.sound
    }

    /// Steps the music volume, wrapping to silence after the maximum.
    pub fn cycle_music_volume(&self) -> VolumeLevel {
        let mut queue = self.inner.borrow_mut();
        queue.settings.music = queue.settings.music.cycled();
        debug!("music volume {}", queue.settings.music.level());
        queue.settings.music
    }
}

impl Drop for SoundCues {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::LandingOutcome;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn before_force_darkens_every_plume() {
        let bus = Rc::new(EventBus::new());
        let emitters = ThrusterEmitters::attach(Rc::clone(&bus));
        bus.publish(&LanderEvent::UpForce);
        assert!(emitters.state().middle);
        bus.publish(&LanderEvent::BeforeForce);
        assert_eq!(emitters.state(), EmitterState::default());
    }

    #[rstest]
    #[case(LanderEvent::LeftForce, false, true)]
    #[case(LanderEvent::RightForce, true, false)]
    fn rotation_lights_the_opposite_side(
        #[case] event: LanderEvent,
        #[case] left: bool,
        #[case] right: bool,
    ) {
        let bus = Rc::new(EventBus::new());
        let emitters = ThrusterEmitters::attach(Rc::clone(&bus));
        bus.publish(&LanderEvent::BeforeForce);
        bus.publish(&event);
        let state = emitters.state();
        assert_eq!((state.left, state.middle, state.right), (left, false, right));
    }

    #[rstest]
    fn crash_hides_the_craft() {
        let bus = Rc::new(EventBus::new());
        let emitters = ThrusterEmitters::attach(Rc::clone(&bus));
        bus.publish(&LanderEvent::Landed(LandingOutcome::TooFastLanding {
            landing_speed: 9.0,
        }));
        assert!(!emitters.state().visible);
        bus.publish(&LanderEvent::StateChanged(LanderState::Normal));
        assert!(emitters.state().visible);
    }

    #[rstest]
    fn cues_follow_events_at_current_volume() {
        let bus = Rc::new(EventBus::new());
        let sounds = SoundCues::attach(Rc::clone(&bus), AudioSettings::default());
        bus.publish(&LanderEvent::CoinPickup);
        bus.publish(&LanderEvent::Landed(LandingOutcome::WrongLandingArea));
        let played = sounds.drain();
        let cues: Vec<SoundCue> = played.iter().map(|p| p.cue).collect();
        assert_eq!(cues, vec![SoundCue::CoinPickup, SoundCue::LandingCrash]);
        assert!(played.iter().all(|p| (p.volume - 0.6).abs() < 1e-6));
        assert!(sounds.drain().is_empty());
    }

    #[rstest]
    fn volume_wraps_to_silence() {
        let bus = Rc::new(EventBus::new());
        let sounds = SoundCues::attach(bus, AudioSettings::default());
        for _ in 0..3 {
            sounds.cycle_sound_volume();
        }
        assert_eq!(sounds.settings().sound.level(), 9);
        assert_eq!(sounds.cycle_sound_volume().level(), 0);
        assert_relative_eq!(sounds.settings().music.normalized(), 0.4);
        assert_eq!(sounds.cycle_music_volume().level(), 5);
    }
}
