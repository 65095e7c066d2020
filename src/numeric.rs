//! Numeric conversion helpers used across the project.
//!
//! Landing scores are recorded as integers, so the float-to-integer step is
//! pinned down here: ties round to the nearest even integer, negative values
//! clamp to zero and anything past `u32::MAX` saturates.

/// Rounds a raw score to the nearest integer, breaking ties towards even.
///
/// Non-finite and negative inputs yield `0`.
///
/// # Examples
///
/// ```
/// use lander::numeric::round_score;
/// assert_eq!(round_score(62.5), 62);
/// assert_eq!(round_score(87.5), 88);
/// assert_eq!(round_score(-3.0), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is clamped to the u32 domain before casting."
)]
#[must_use]
pub fn round_score(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = value.round_ties_even();
    rounded.clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers assert that the value fits within f32 bounds."
)]
#[must_use]
pub fn expect_f32(value: f64) -> f32 {
    debug_assert!(value.is_finite(), "expected finite f64 for f32 conversion");
    debug_assert!(
        value <= f64::from(f32::MAX),
        "f64 value {value} exceeds f32::MAX"
    );
    debug_assert!(
        value >= f64::from(f32::MIN),
        "f64 value {value} is below f32::MIN"
    );
    value as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::exact(500.0, 500)]
    #[case::below_half(249.99998, 250)]
    #[case::tie_down_to_even(62.5, 62)]
    #[case::tie_up_to_even(87.5, 88)]
    #[case::tie_at_zero(0.5, 0)]
    #[case::negative(-12.0, 0)]
    #[case::nan(f64::NAN, 0)]
    #[case::infinite(f64::INFINITY, 0)]
    #[case::huge(1e12, u32::MAX)]
    fn rounds_scores(#[case] raw: f64, #[case] expected: u32) {
        assert_eq!(round_score(raw), expected);
    }

    #[rstest]
    fn narrows_to_f32() {
        assert!((expect_f32(0.25) - 0.25).abs() < f32::EPSILON);
    }
}
