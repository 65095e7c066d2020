//! Convenience constructors for contacts used in tests.

use glam::Vec2;
use lander::{Contact, LandingPad};

/// Returns a unit up vector whose dot product with world up is `alignment`.
///
/// The craft leans to the right; `alignment` is clamped to `[-1, 1]`.
///
/// # Examples
/// ```
/// use test_utils::craft_up_for_alignment;
/// let up = craft_up_for_alignment(0.95);
/// assert!((up.y - 0.95).abs() < 1e-6);
/// assert!((up.length() - 1.0).abs() < 1e-6);
/// ```
pub fn craft_up_for_alignment(alignment: f32) -> Vec2 {
    let y = alignment.clamp(-1.0, 1.0);
    Vec2::new((1.0 - y * y).max(0.0).sqrt(), y)
}

/// Contact with a pad of `multiplier` at `speed` and `alignment`.
pub fn pad_contact(multiplier: f32, speed: f32, alignment: f32) -> Contact {
    Contact::pad(
        LandingPad::new(multiplier),
        speed,
        craft_up_for_alignment(alignment),
    )
}

/// Contact with terrain at `speed` and `alignment`.
pub fn terrain_contact(speed: f32, alignment: f32) -> Contact {
    Contact::terrain(speed, craft_up_for_alignment(alignment))
}
