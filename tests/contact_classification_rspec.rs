//! Behaviour-driven tests for contact classification using rust-rspec.
//!
//! Each scenario feeds a single contact to a fresh craft and checks the
//! outcome, the score and the craft's resulting lifecycle state.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use std::rc::Rc;

use lander::{
    Contact, EventBus, FlightSettings, KinematicBody, Lander, LanderState, LandingKind,
    LandingOutcome, LandingRules,
};
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use test_utils::{pad_contact, terrain_contact};

#[derive(Debug, Clone, Default)]
struct Touchdown {
    contact: Option<Contact>,
    outcome: Option<LandingOutcome>,
    state: Option<LanderState>,
}

impl Touchdown {
    fn with_contact(contact: Contact) -> Self {
        Self {
            contact: Some(contact),
            ..Self::default()
        }
    }

    fn land(&mut self) {
        let mut lander = Lander::new(
            KinematicBody::default(),
            FlightSettings::default(),
            LandingRules::default(),
            Rc::new(EventBus::new()),
        );
        let contact = self.contact.expect("scenario sets a contact");
        self.outcome = lander.handle_contact(&contact);
        self.state = Some(lander.state());
    }

    fn outcome(&self) -> LandingOutcome {
        self.outcome.expect("contact was classified")
    }
}

fn classify_scenario(description: &'static str, contact: Contact, kind: LandingKind, score: u32) {
    run_serial(&rspec::given(
        description,
        Touchdown::with_contact(contact),
        move |scenario: &mut Scenario<Touchdown>| {
            scenario.before_each(Touchdown::land);
            scenario.then("the outcome kind matches", move |touchdown| {
                assert_eq!(touchdown.outcome().kind(), kind);
            });
            scenario.then("the score matches", move |touchdown| {
                assert_eq!(touchdown.outcome().score(), score);
            });
            scenario.then("the craft is terminal", move |touchdown| {
                let expected = if kind == LandingKind::Success {
                    LanderState::Landed
                } else {
                    LanderState::Crashed
                };
                assert_eq!(touchdown.state, Some(expected));
            });
        },
    ));
}

#[test]
fn terrain_contact_is_wrong_area_even_when_perfect() {
    classify_scenario(
        "a perfectly gentle upright touchdown on terrain",
        terrain_contact(0.0, 1.0),
        LandingKind::WrongLandingArea,
        0,
    );
}

#[test]
fn fast_pad_contact_is_too_fast_even_when_upright() {
    classify_scenario(
        "an upright pad touchdown at 4.5 m/s",
        pad_contact(3.0, 4.5, 1.0),
        LandingKind::TooFastLanding,
        0,
    );
}

#[test]
fn tilted_pad_contact_is_too_steep() {
    classify_scenario(
        "a slow pad touchdown at alignment 0.85",
        pad_contact(1.0, 1.0, 0.85),
        LandingKind::TooSteepAngle,
        0,
    );
}

#[test]
fn soft_upright_pad_contact_succeeds() {
    classify_scenario(
        "a motionless upright touchdown on a x1 pad",
        pad_contact(1.0, 0.0, 1.0),
        LandingKind::Success,
        500,
    );
}

#[test]
fn threshold_speed_still_scores() {
    classify_scenario(
        "an upright touchdown at exactly 4.0 m/s on a x2 pad",
        pad_contact(2.0, 4.0, 1.0),
        LandingKind::Success,
        200,
    );
}

#[test]
fn second_contact_is_ignored() {
    run_serial(&rspec::given(
        "a craft that already crashed into terrain",
        Touchdown::with_contact(terrain_contact(2.0, 1.0)),
        |scenario: &mut Scenario<Touchdown>| {
            scenario.before_each(Touchdown::land);
            scenario.when("a perfect pad contact follows", |scenario| {
                scenario.then("it is not classified", |touchdown| {
                    let mut lander = Lander::new(
                        KinematicBody::default(),
                        FlightSettings::default(),
                        LandingRules::default(),
                        Rc::new(EventBus::new()),
                    );
                    let first = touchdown.contact.expect("scenario sets a contact");
                    assert!(lander.handle_contact(&first).is_some());
                    assert!(lander.handle_contact(&pad_contact(1.0, 0.0, 1.0)).is_none());
                    assert_eq!(lander.state(), LanderState::Crashed);
                });
            });
        },
    ));
}

#[test]
#[should_panic(expected = "failing examples")]
fn failing_expectation_fails_the_test() {
    classify_scenario(
        "a terrain touchdown expected to succeed",
        terrain_contact(0.0, 1.0),
        LandingKind::Success,
        500,
    );
}
