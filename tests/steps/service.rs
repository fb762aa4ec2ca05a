//! Step definitions for the mock arithmetic service

use crate::common::world::CalclineWorld;
use cucumber::{given, then};
use std::time::Duration;
use tracing::info;

#[given("the arithmetic service is running")]
async fn given_service_running(world: &mut CalclineWorld) {
    world.start_mock_server().await;
    info!("Mock arithmetic service at {}", world.server_uri);
}

#[given("the arithmetic service is unreachable")]
async fn given_service_unreachable(world: &mut CalclineWorld) {
    world.use_unreachable_server();
}

#[given(regex = r#"^the service answers (\w+) with result (-?[\d.]+) and request id "([^"]*)"$"#)]
async fn given_service_result(
    world: &mut CalclineWorld,
    operation: String,
    result: String,
    request_id: String,
) {
    world
        .mock_result(&operation, &result, &request_id)
        .await
        .expect("Failed to mount result mock");
}

#[given(
    regex = r#"^the service answers (\w+) after (\d+) ms with result (-?[\d.]+) and id "([^"]*)"$"#
)]
async fn given_service_delayed_result(
    world: &mut CalclineWorld,
    operation: String,
    delay_ms: u64,
    result: String,
    request_id: String,
) {
    world
        .mock_delayed_result(&operation, Duration::from_millis(delay_ms), &result, &request_id)
        .await
        .expect("Failed to mount delayed result mock");
}

#[given(regex = r#"^the service answers (\w+) with status (\d+) and error "([^"]*)"$"#)]
async fn given_service_error(
    world: &mut CalclineWorld,
    operation: String,
    status: u16,
    message: String,
) {
    world
        .mock_error(&operation, status, &message)
        .await
        .expect("Failed to mount error mock");
}

#[then(regex = r#"^the service should have received "([^"]+)"$"#)]
async fn then_service_received(world: &mut CalclineWorld, expected: String) {
    let requests = world
        .received_requests()
        .await
        .expect("Failed to read received requests");
    assert!(
        requests.contains(&expected),
        "Expected request {expected}, got {requests:?}"
    );
}

#[then("the service should have received no requests")]
async fn then_service_received_nothing(world: &mut CalclineWorld) {
    let requests = world
        .received_requests()
        .await
        .expect("Failed to read received requests");
    assert!(requests.is_empty(), "Unexpected requests: {requests:?}");
}
