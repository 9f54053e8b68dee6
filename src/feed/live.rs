//! Live rate endpoint integration
//!
//! Fetches the current price for a single pair from the worker endpoint.
//! The payload's `price` is number-like: some upstream responses carry a JSON
//! number, others a numeric string.

use crate::currency::CurrencyPair;
use crate::error::{QuoteError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// A price snapshot from the live endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct LiveQuote {
    pub price: f64,
    pub refreshed_at: String,
}

#[derive(Debug, Deserialize)]
struct LiveResponse {
    price: Option<serde_json::Value>,
    refreshed_at: Option<String>,
}

/// Client for the single-pair live rate endpoint
#[derive(Debug, Clone)]
pub struct LiveRateClient {
    client: Client,
    endpoint: String,
}

impl LiveRateClient {
    /// Create a client for the given endpoint base URL
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| QuoteError::FetchError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Fetch the current price for a pair.
    ///
    /// Errors on network failure, non-2xx status, or a missing/non-numeric
    /// `price` field; callers fall back to the spreadsheet rate.
    pub async fn fetch(&self, pair: CurrencyPair) -> Result<LiveQuote> {
        let url = format!("{}?pair={}", self.endpoint, pair.compact());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QuoteError::FetchError(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(QuoteError::FetchError(format!(
                "Live endpoint returned error: {}",
                response.status()
            )));
        }

        let data: LiveResponse = response
            .json()
            .await
            .map_err(|e| QuoteError::FetchError(format!("JSON parse error: {}", e)))?;

        let price = data
            .price
            .as_ref()
            .and_then(coerce_price)
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| {
                QuoteError::ParseError(format!("Live endpoint returned no usable price for {}", pair))
            })?;

        Ok(LiveQuote {
            price,
            refreshed_at: data.refreshed_at.unwrap_or_default(),
        })
    }
}

/// Coerce a number-like JSON value (number or numeric string) to f64
fn coerce_price(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
