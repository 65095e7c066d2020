//! Classification of the craft's first ground contact.
//!
//! A contact is checked against three gates in a fixed order: the target must
//! be a landing pad, the impact must be soft, and the craft must be close to
//! upright. The first failing gate decides the outcome. Only a contact passing
//! all three is scored.

use glam::Vec2;
use log::{debug, info};
use serde::Deserialize;

use crate::numeric::round_score;
use crate::vector_math::alignment;
use crate::{
    ANGLE_SCORE_MULTIPLIER, MAX_ANGLE_SCORE, MIN_ALIGNMENT, SOFT_LANDING_THRESHOLD,
    SPEED_SCORE_MULTIPLIER,
};

/// Static landing target worth `multiplier` times the base score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingPad {
    multiplier: f32,
}

impl LandingPad {
    /// Creates a pad; negative or non-finite multipliers become zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use lander::LandingPad;
    /// assert_eq!(LandingPad::new(3.0).multiplier(), 3.0);
    /// assert_eq!(LandingPad::new(-1.0).multiplier(), 0.0);
    /// ```
    #[must_use]
    pub fn new(multiplier: f32) -> Self {
        let sanitized = if multiplier.is_finite() {
            multiplier.max(0.0)
        } else {
            0.0
        };
        Self {
            multiplier: sanitized,
        }
    }

    /// Score multiplier granted by this pad.
    #[must_use]
    pub const fn multiplier(&self) -> f32 {
        self.multiplier
    }
}

/// What the craft touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactTarget {
    /// Anything that is not a landing pad.
    Terrain,
    /// A landing pad.
    Pad(LandingPad),
}

/// Collision data captured at the moment of first contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Body the craft collided with.
    pub target: ContactTarget,
    /// Magnitude of the relative velocity at impact.
    pub relative_speed: f32,
    /// Craft's local up axis at impact.
    pub craft_up: Vec2,
}

impl Contact {
    /// Contact with plain terrain.
    #[must_use]
    pub const fn terrain(relative_speed: f32, craft_up: Vec2) -> Self {
        Self {
            target: ContactTarget::Terrain,
            relative_speed,
            craft_up,
        }
    }

    /// Contact with `pad`.
    #[must_use]
    pub const fn pad(pad: LandingPad, relative_speed: f32, craft_up: Vec2) -> Self {
        Self {
            target: ContactTarget::Pad(pad),
            relative_speed,
            craft_up,
        }
    }
}

/// Thresholds deciding whether a pad contact counts as a landing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LandingRules {
    /// Highest impact speed still considered soft.
    pub soft_landing_speed: f32,
    /// Lowest acceptable alignment with world up.
    pub min_alignment: f32,
}

impl Default for LandingRules {
    fn default() -> Self {
        Self {
            soft_landing_speed: SOFT_LANDING_THRESHOLD,
            min_alignment: MIN_ALIGNMENT,
        }
    }
}

/// Discriminant of a [`LandingOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingKind {
    /// Soft, upright touchdown on a pad.
    Success,
    /// Contact with anything but a pad.
    WrongLandingArea,
    /// Pad contact while tilted too far.
    TooSteepAngle,
    /// Pad contact faster than the soft landing threshold.
    TooFastLanding,
}

/// Result of classifying a contact, carrying only the fields each kind has.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandingOutcome {
    /// Crashed into terrain.
    WrongLandingArea,
    /// Hit a pad too hard.
    TooFastLanding {
        /// Impact speed.
        landing_speed: f32,
    },
    /// Hit a pad at a soft speed but tilted.
    TooSteepAngle {
        /// Impact speed.
        landing_speed: f32,
        /// Dot product of world up and craft up.
        alignment: f32,
    },
    /// Landed.
    Success {
        /// Impact speed.
        landing_speed: f32,
        /// Dot product of world up and craft up.
        alignment: f32,
        /// Multiplier of the pad landed on.
        multiplier: f32,
        /// Final rounded score.
        score: u32,
    },
}

impl LandingOutcome {
    /// Discriminant of this outcome.
    #[must_use]
    pub const fn kind(&self) -> LandingKind {
        match self {
            Self::WrongLandingArea => LandingKind::WrongLandingArea,
            Self::TooFastLanding { .. } => LandingKind::TooFastLanding,
            Self::TooSteepAngle { .. } => LandingKind::TooSteepAngle,
            Self::Success { .. } => LandingKind::Success,
        }
    }

    /// Whether the craft landed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Score earned; zero unless the craft landed.
    #[must_use]
    pub const fn score(&self) -> u32 {
        match self {
            Self::Success { score, .. } => *score,
            _ => 0,
        }
    }

    /// Impact speed, when the contact was with a pad.
    #[must_use]
    pub const fn landing_speed(&self) -> Option<f32> {
        match self {
            Self::WrongLandingArea => None,
            Self::TooFastLanding { landing_speed }
            | Self::TooSteepAngle { landing_speed, .. }
            | Self::Success { landing_speed, .. } => Some(*landing_speed),
        }
    }

    /// Alignment, when the classifier got far enough to measure it.
    #[must_use]
    pub const fn alignment(&self) -> Option<f32> {
        match self {
            Self::TooSteepAngle { alignment, .. } | Self::Success { alignment, .. } => {
                Some(*alignment)
            }
            _ => None,
        }
    }

    /// Multiplier of the pad landed on; zero unless the craft landed.
    #[must_use]
    pub const fn multiplier(&self) -> f32 {
        match self {
            Self::Success { multiplier, .. } => *multiplier,
            _ => 0.0,
        }
    }
}

/// Breakdown of a successful landing's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingScore {
    /// Points for alignment: 100 when upright, falling 10 per 0.01 deviation.
    pub angle_score: f64,
    /// Points for softness: 100 per unit of speed below the threshold.
    pub speed_score: f64,
    /// Final score after the pad multiplier and rounding.
    pub score: u32,
}

/// Scores a landing that already passed every gate.
///
/// Arithmetic runs in `f64` on the widened inputs and rounds half to even.
///
/// # Examples
///
/// ```
/// use lander::{landing_score, LandingRules};
/// let rules = LandingRules::default();
/// assert_eq!(landing_score(0.0, 1.0, 1.0, &rules).score, 500);
/// assert_eq!(landing_score(4.0, 1.0, 2.0, &rules).score, 200);
/// assert_eq!(landing_score(2.0, 0.95, 1.0, &rules).score, 250);
/// ```
#[must_use]
pub fn landing_score(
    speed: f32,
    alignment: f32,
    multiplier: f32,
    rules: &LandingRules,
) -> LandingScore {
    let deviation = (f64::from(alignment) - 1.0).abs();
    let angle_score = MAX_ANGLE_SCORE - deviation * ANGLE_SCORE_MULTIPLIER * MAX_ANGLE_SCORE;
    let speed_score =
        (f64::from(rules.soft_landing_speed) - f64::from(speed)) * SPEED_SCORE_MULTIPLIER;
    let score = round_score((angle_score + speed_score) * f64::from(multiplier.max(0.0)));
    LandingScore {
        angle_score,
        speed_score,
        score,
    }
}

/// Pure decision procedure mapping a [`Contact`] to a [`LandingOutcome`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactClassifier {
    rules: LandingRules,
}

impl ContactClassifier {
    /// Creates a classifier using `rules`.
    #[must_use]
    pub const fn new(rules: LandingRules) -> Self {
        Self { rules }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn rules(&self) -> &LandingRules {
        &self.rules
    }

    /// Classifies `contact`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use lander::{Contact, ContactClassifier, LandingKind, LandingPad};
    ///
    /// let classifier = ContactClassifier::default();
    /// let hard = Contact::pad(LandingPad::new(1.0), 6.0, Vec2::Y);
    /// assert_eq!(classifier.classify(&hard).kind(), LandingKind::TooFastLanding);
    /// ```
    #[must_use]
    pub fn classify(&self, contact: &Contact) -> LandingOutcome {
        let ContactTarget::Pad(pad) = contact.target else {
            info!("crashed on terrain");
            return LandingOutcome::WrongLandingArea;
        };

        let landing_speed = contact.relative_speed.abs();
        if landing_speed.is_nan() || landing_speed > self.rules.soft_landing_speed {
            info!("landed too hard at {landing_speed:.2}");
            return LandingOutcome::TooFastLanding { landing_speed };
        }

        let dot = alignment(contact.craft_up);
        if dot < self.rules.min_alignment {
            info!("landed at too steep an angle (alignment {dot:.3})");
            return LandingOutcome::TooSteepAngle {
                landing_speed,
                alignment: dot,
            };
        }

        let breakdown = landing_score(landing_speed, dot, pad.multiplier(), &self.rules);
        debug!(
            "angle score {:.2}, speed score {:.2}",
            breakdown.angle_score, breakdown.speed_score
        );
        info!("successful landing, score {}", breakdown.score);
        LandingOutcome::Success {
            landing_speed,
            alignment: dot,
            multiplier: pad.multiplier(),
            score: breakdown.score,
        }
    }
}
