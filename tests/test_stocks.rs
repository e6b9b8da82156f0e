//! Stock list refresh tests.

mod common;

use common::MockApi;
use std::time::Duration;
use stock_dashboard::Market;

#[tokio::test]
async fn refresh_replaces_list() {
    let api = MockApi::with_stocks(common::sample_stocks());
    let (dashboard, _tmp) = common::setup(api.clone());

    assert_eq!(dashboard.stocks().refresh().await.unwrap(), 5);
    assert_eq!(dashboard.stock_list(), common::sample_stocks());

    *api.stocks.lock().unwrap() = vec![common::stock("005930", "삼성전자", Market::Kospi)];
    assert_eq!(dashboard.stocks().refresh().await.unwrap(), 1);
    assert_eq!(dashboard.stock_list().len(), 1);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_list() {
    let api = MockApi::with_stocks(common::sample_stocks());
    let (dashboard, _tmp) = common::setup(api.clone());
    dashboard.stocks().refresh().await.unwrap();

    *api.stocks_fail.lock().unwrap() = true;
    assert!(dashboard.stocks().refresh().await.is_err());

    assert_eq!(dashboard.stock_list(), common::sample_stocks());
    assert!(!dashboard.stocks().is_loading());
}

#[tokio::test]
async fn refresh_keeps_analysis_results() {
    let api = MockApi::with_stocks(common::sample_stocks());
    let (dashboard, _tmp) = common::setup(api);
    dashboard.stocks().refresh().await.unwrap();
    dashboard.analysis().run("005930").await.unwrap();

    dashboard.stocks().refresh().await.unwrap();
    assert!(dashboard.result("005930").is_some());
}

#[tokio::test(start_paused = true)]
async fn loading_flag_tracks_request() {
    let api = MockApi::with_stocks(common::sample_stocks());
    api.set_latency(Duration::from_millis(200));
    let (dashboard, _tmp) = common::setup(api);

    let handle = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.stocks().refresh().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(dashboard.stocks().is_loading());

    handle.await.unwrap().unwrap();
    assert!(!dashboard.stocks().is_loading());
}

#[test]
fn stock_list_json_shape() {
    let stocks: Vec<stock_dashboard::Stock> = serde_json::from_value(serde_json::json!([
        {"ticker": "005930", "name": "삼성전자", "market": "KOSPI"},
        {"ticker": "247540", "name": "에코프로비엠", "market": "KOSDAQ"}
    ]))
    .unwrap();
    assert_eq!(stocks[0].market, Market::Kospi);
    assert_eq!(stocks[1].market, Market::Kosdaq);
    assert_eq!(Market::Kosdaq.to_string(), "KOSDAQ");
}
