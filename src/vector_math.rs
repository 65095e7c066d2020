//! Basic vector math helper functions.
//! Small helpers for orientation and alignment of the craft in the plane.
use glam::Vec2;

/// World up direction used to measure craft alignment.
pub const WORLD_UP: Vec2 = Vec2::Y;

/// Returns the craft's local up axis for a rotation in radians.
///
/// A rotation of zero points straight up; positive angles turn the craft
/// counter-clockwise.
///
/// # Examples
/// ```
/// use lander::vector_math::up_axis;
/// let up = up_axis(std::f32::consts::FRAC_PI_2);
/// assert!((up.x + 1.0).abs() < 1e-6);
/// assert!(up.y.abs() < 1e-6);
/// ```
#[must_use]
pub fn up_axis(rotation: f32) -> Vec2 {
    Vec2::from_angle(rotation).rotate(WORLD_UP)
}

/// Returns the dot product of [`WORLD_UP`] and the normalised `craft_up`.
///
/// The result lies in `[-1, 1]`; `1.0` means perfectly upright. Invalid or
/// zero-length input yields `-1.0` so it can never pass an alignment check.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use lander::alignment;
/// assert!((alignment(Vec2::new(0.0, 3.0)) - 1.0).abs() < 1e-6);
/// assert!((alignment(Vec2::X)).abs() < 1e-6);
/// assert!((alignment(Vec2::ZERO) + 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn alignment(craft_up: Vec2) -> f32 {
    if !craft_up.is_finite() {
        return -1.0;
    }
    craft_up
        .try_normalize()
        .map_or(-1.0, |up| WORLD_UP.dot(up).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[rstest]
    #[case::upright(0.0, 1.0)]
    #[case::sideways(FRAC_PI_2, 0.0)]
    #[case::inverted(PI, -1.0)]
    fn alignment_follows_rotation(#[case] rotation: f32, #[case] expected: f32) {
        assert_relative_eq!(alignment(up_axis(rotation)), expected, epsilon = 1e-6);
    }

    #[rstest]
    fn nan_axis_never_aligns() {
        assert_relative_eq!(alignment(Vec2::new(f32::NAN, 1.0)), -1.0);
    }
}
