//! Credential validation tests: the Testing -> Success/Failure protocol.

mod common;

use common::{Call, MockApi};
use std::time::Duration;
use stock_dashboard::TestStatus;

#[tokio::test]
async fn starts_idle() {
    let (dashboard, _tmp) = common::setup(MockApi::new());
    assert_eq!(dashboard.credentials().test_status(), TestStatus::Idle);
}

#[tokio::test]
async fn accepted_credential_reports_success() {
    let api = MockApi::new();
    api.valid_credentials.lock().unwrap().insert("good-key".into());
    let (dashboard, _tmp) = common::setup(api.clone());

    assert_eq!(dashboard.credentials().test("good-key").await, TestStatus::Success);
    assert_eq!(dashboard.credentials().test_status(), TestStatus::Success);
    assert_eq!(api.calls(), vec![Call::Validate("good-key".into())]);
}

#[tokio::test]
async fn rejected_credential_reports_failure() {
    let api = MockApi::new();
    let (dashboard, _tmp) = common::setup(api);

    assert_eq!(dashboard.credentials().test("bad-key").await, TestStatus::Failure);
    assert_eq!(dashboard.credentials().test_status(), TestStatus::Failure);
}

#[tokio::test]
async fn transport_failure_reports_failure() {
    let api = MockApi::new();
    *api.validate_fail.lock().unwrap() = true;
    let (dashboard, _tmp) = common::setup(api);

    assert_eq!(dashboard.credentials().test("any-key").await, TestStatus::Failure);
    assert_ne!(dashboard.credentials().test_status(), TestStatus::Testing);
}

#[tokio::test]
async fn testing_does_not_save() {
    let api = MockApi::new();
    api.valid_credentials.lock().unwrap().insert("good-key".into());
    let (dashboard, _tmp) = common::setup(api);

    dashboard.credentials().test("good-key").await;
    assert!(!dashboard.credentials().is_configured());
    assert!(!dashboard.store_path().exists());
}

#[tokio::test(start_paused = true)]
async fn status_is_testing_while_in_flight() {
    let api = MockApi::new();
    api.set_latency(Duration::from_millis(200));
    let (dashboard, _tmp) = common::setup(api);

    let handle = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.credentials().test("slow-key").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(dashboard.credentials().test_status(), TestStatus::Testing);

    assert_eq!(handle.await.unwrap(), TestStatus::Failure);
    assert_eq!(dashboard.credentials().test_status(), TestStatus::Failure);
}
