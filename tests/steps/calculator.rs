//! Step definitions for key input and what the calculator shows

use crate::common::world::CalclineWorld;
use calcline::Operator;
use crossterm::event::KeyCode;
use cucumber::{given, then, when};
use std::time::Duration;

/// Screen row holding the display value
const DISPLAY_ROW: u16 = 2;

/// Screen row holding the status line
const STATUS_ROW: u16 = 4;

#[given("the calculator is started")]
async fn given_calculator_started(world: &mut CalclineWorld) {
    world.start_app().expect("Failed to start calculator");
}

#[when(regex = r#"^I press "([^"]+)"$"#)]
async fn when_press_keys(world: &mut CalclineWorld, keys: String) {
    world.type_keys(&keys).await.expect("Failed to type keys");
}

#[when(regex = r#"^I press "([^"]+)" without waiting$"#)]
async fn when_press_keys_in_flight(world: &mut CalclineWorld, keys: String) {
    world
        .type_keys_in_flight(&keys)
        .expect("Failed to type keys");
}

#[when(regex = r"^the late response has had (\d+) ms to arrive$")]
async fn when_late_response_arrives(world: &mut CalclineWorld, wait_ms: u64) {
    let applied = world
        .settle(Duration::from_millis(wait_ms))
        .await
        .expect("Failed to poll responses");
    assert!(!applied, "A superseded response was applied");
}

#[when("I press Escape")]
async fn when_press_escape(world: &mut CalclineWorld) {
    world.send_key(KeyCode::Esc).await.expect("Failed to press Escape");
}

#[then(regex = r#"^the display should show "([^"]+)"$"#)]
async fn then_display_shows(world: &mut CalclineWorld, expected: String) {
    let app = world.app().expect("Calculator not started");
    assert_eq!(app.calculator().display_text(), expected);

    let row = world.screen().expect("No screen").row(DISPLAY_ROW);
    assert_eq!(row.trim(), expected, "Display row: {row:?}");
}

#[then(regex = r#"^the status line should show "([^"]+)"$"#)]
async fn then_status_shows(world: &mut CalclineWorld, expected: String) {
    let app = world.app().expect("Calculator not started");
    assert_eq!(app.calculator().status().text(), expected);

    let row = world.screen().expect("No screen").row(STATUS_ROW);
    assert_eq!(row.trim(), expected, "Status row: {row:?}");
}

#[then("the status line should be empty")]
async fn then_status_empty(world: &mut CalclineWorld) {
    let app = world.app().expect("Calculator not started");
    assert!(app.calculator().status().is_idle());

    let row = world.screen().expect("No screen").row(STATUS_ROW);
    assert!(row.trim().is_empty(), "Status row: {row:?}");
}

#[then("no operation should be pending")]
async fn then_nothing_pending(world: &mut CalclineWorld) {
    let app = world.app().expect("Calculator not started");
    assert!(!app.calculator().pending().is_pending());
}

#[then(regex = r#"^the pending operation should be (\w+) with left operand "([^"]+)"$"#)]
async fn then_pending_operation(world: &mut CalclineWorld, operator: String, left_operand: String) {
    let expected: Operator = operator.parse().expect("Unknown operator");
    let app = world.app().expect("Calculator not started");
    let pending = app.calculator().pending();
    assert_eq!(pending.operator(), Some(expected));
    assert_eq!(pending.left_operand(), Some(left_operand.as_str()));
}
