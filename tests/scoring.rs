//! Landing score formula and its rounding rule.

use approx::assert_relative_eq;
use lander::{landing_score, ContactClassifier, LandingRules};
use rstest::rstest;
use test_utils::pad_contact;

#[rstest]
#[case::motionless(0.0, 1.0, 1.0, 100.0, 400.0, 500)]
#[case::threshold_double(4.0, 1.0, 2.0, 100.0, 0.0, 200)]
#[case::tilted(2.0, 0.95, 1.0, 50.0, 200.0, 250)]
#[case::triple_pad(1.5, 1.0, 3.0, 100.0, 250.0, 1050)]
#[case::worthless_pad(0.0, 1.0, 0.0, 100.0, 400.0, 0)]
fn score_breakdown(
    #[case] speed: f32,
    #[case] alignment: f32,
    #[case] multiplier: f32,
    #[case] angle: f64,
    #[case] speed_part: f64,
    #[case] score: u32,
) {
    let breakdown = landing_score(speed, alignment, multiplier, &LandingRules::default());
    assert_relative_eq!(breakdown.angle_score, angle, epsilon = 1e-3);
    assert_relative_eq!(breakdown.speed_score, speed_part, epsilon = 1e-3);
    assert_eq!(breakdown.score, score);
}

#[rstest]
#[case::half_rounds_down_to_even(3.75, 62)]
#[case::half_rounds_up_to_even(3.25, 88)]
fn ties_round_to_even(#[case] speed: f32, #[case] score: u32) {
    let breakdown = landing_score(speed, 1.0, 0.5, &LandingRules::default());
    assert_eq!(breakdown.score, score);
}

#[test]
fn score_never_negative_within_envelope() {
    let classifier = ContactClassifier::new(LandingRules::default());
    for speed_step in 0..=40_u8 {
        for alignment_step in 90..=100_u8 {
            let speed = f32::from(speed_step) * 0.1;
            let alignment = f32::from(alignment_step) / 100.0;
            let outcome = classifier.classify(&pad_contact(1.0, speed, alignment));
            if let Some(measured) = outcome.alignment().filter(|_| outcome.is_success()) {
                let expected = landing_score(speed, measured, 1.0, &LandingRules::default());
                assert_eq!(outcome.score(), expected.score);
            } else {
                assert_eq!(outcome.score(), 0);
            }
        }
    }
}
