//! Integration tests for dashboard orchestration and the rate fallback chain

#![cfg(feature = "async")]

use fxquote::currency::{Currency, CurrencyPair};
use fxquote::dashboard::{Dashboard, DashboardConfig};
use fxquote::error::QuoteError;
use fxquote::feed::{resolve_rate, LiveRateClient, RateSheet, RateStrategy};

const RATES_CSV: &str = "\
base,quote,rate,time_of_rate
EUR,USD,1.08500,2025-01-01 10:00
GBP,USD,1.27000,2025-01-01 10:00";

const EVENTS_CSV: &str = "\
Date_And_Time,Currency,Importance,Event,Insights
11/13/2025 08:00:00,USD,3,Fed Rate Decision,https://example.com/x";

fn offline_config(pair: &str) -> DashboardConfig {
    let mut config = DashboardConfig::for_pair(pair.parse().unwrap());
    config.live_endpoint = None;
    config
}

#[tokio::test]
async fn test_full_offline_initialization() {
    let mut dash = Dashboard::new(offline_config("EUR/USD")).unwrap();
    let view = dash
        .init_from_documents(RATES_CSV, Some(EVENTS_CSV), 0.0055, 10_000.0)
        .await
        .unwrap();

    assert_eq!(view.market_rate, "1.08500");
    assert_eq!(dash.rate_source, "spreadsheet");
    assert_eq!(view.quote.offer_rate, "1.07903");
    assert!(view.events_html.contains("Fed Rate Decision"));
    // No holiday columns in this sheet.
    assert_eq!(
        view.holidays_html,
        "<p>No upcoming settlement holidays found.</p>"
    );
}

#[tokio::test]
async fn test_recalculation_is_idempotent() {
    let mut dash = Dashboard::new(offline_config("EUR/USD")).unwrap();
    dash.init_from_documents(RATES_CSV, None, 0.0055, 10_000.0)
        .await
        .unwrap();

    let first = dash.quote(0.0100, 50_000.0).unwrap();
    let second = dash.quote(0.0100, 50_000.0).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_dead_live_endpoint_falls_back_to_sheet() {
    let mut config = DashboardConfig::for_pair("EUR/USD".parse().unwrap());
    config.live_endpoint = Some("http://127.0.0.1:9/api/live-refresh".to_string());
    let mut dash = Dashboard::new(config).unwrap();

    let view = dash
        .init_from_documents(RATES_CSV, None, 0.0055, 0.0)
        .await
        .unwrap();
    assert_eq!(dash.rate_source, "spreadsheet");
    assert_eq!(view.market_rate, "1.08500");
}

#[tokio::test]
async fn test_live_strategy_not_used_for_other_pairs() {
    // GBP/USD is not the live pair; even a configured endpoint is skipped.
    let mut config = DashboardConfig::for_pair("GBP/USD".parse().unwrap());
    config.live_endpoint = Some("http://127.0.0.1:9/api/live-refresh".to_string());
    let mut dash = Dashboard::new(config).unwrap();

    let view = dash
        .init_from_documents(RATES_CSV, None, 0.0055, 0.0)
        .await
        .unwrap();
    assert_eq!(dash.rate_source, "spreadsheet");
    assert_eq!(view.market_rate, "1.27000");
}

#[tokio::test]
async fn test_pair_not_found_aborts_initialization() {
    let mut dash = Dashboard::new(offline_config("AUD/CAD")).unwrap();
    let result = dash
        .init_from_documents(RATES_CSV, Some(EVENTS_CSV), 0.0055, 0.0)
        .await;
    assert!(matches!(result, Err(QuoteError::PairNotFound(_))));
}

#[tokio::test]
async fn test_strategy_chain_order() {
    let sheet = RateSheet::parse(RATES_CSV).unwrap();
    let dead_live = LiveRateClient::new("http://127.0.0.1:9/api/live-refresh").unwrap();
    let pair = CurrencyPair::new(Currency::EUR, Currency::USD);

    let strategies = [
        RateStrategy::LiveEndpoint(&dead_live),
        RateStrategy::Spreadsheet(&sheet),
    ];
    let quote = resolve_rate(&strategies, pair).await.unwrap();
    assert_eq!(quote.source, "spreadsheet");
    assert_eq!(quote.rate, 1.085);
    assert_eq!(quote.as_of, "2025-01-01 10:00");
}
