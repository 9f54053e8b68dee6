//! Feed loading: CSV tokenization, rate/event sheets, live endpoint
//!
//! The market rate can come from more than one place. Rather than nested
//! try/catch fallbacks, the sources are an ordered list of named strategies
//! tried until one succeeds: the live endpoint (where configured for the
//! pair) and then the spreadsheet rate.

pub mod events;
pub mod rates;
pub mod tokenizer;

#[cfg(feature = "async")]
pub mod live;

pub use events::{parse_events, sort_events, EventEntry};
pub use rates::{RateRow, RateSheet};

#[cfg(feature = "async")]
pub use live::{LiveQuote, LiveRateClient};

#[cfg(feature = "async")]
use crate::currency::CurrencyPair;
#[cfg(feature = "async")]
use crate::error::{QuoteError, Result};

/// A resolved market rate with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub rate: f64,
    /// Display string for "last updated": the endpoint's refresh timestamp or
    /// the sheet's `time_of_rate`
    pub as_of: String,
    /// Name of the strategy that produced this quote
    pub source: &'static str,
}

/// One way of obtaining a market rate
#[cfg(feature = "async")]
pub enum RateStrategy<'a> {
    /// Query the live endpoint
    LiveEndpoint(&'a LiveRateClient),
    /// Look the pair up in the parsed rate sheet
    Spreadsheet(&'a RateSheet),
}

#[cfg(feature = "async")]
impl RateStrategy<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            RateStrategy::LiveEndpoint(_) => "live-endpoint",
            RateStrategy::Spreadsheet(_) => "spreadsheet",
        }
    }

    pub async fn fetch(&self, pair: CurrencyPair) -> Result<RateQuote> {
        match self {
            RateStrategy::LiveEndpoint(client) => {
                let quote = client.fetch(pair).await?;
                let as_of = if quote.refreshed_at.is_empty() {
                    "unknown".to_string()
                } else {
                    quote.refreshed_at
                };
                Ok(RateQuote {
                    rate: quote.price,
                    as_of,
                    source: "live-endpoint",
                })
            }
            RateStrategy::Spreadsheet(sheet) => {
                let row = sheet.find_pair(pair)?;
                let as_of = if row.time_of_rate.is_empty() {
                    "unknown".to_string()
                } else {
                    row.time_of_rate
                };
                Ok(RateQuote {
                    rate: row.rate,
                    as_of,
                    source: "spreadsheet",
                })
            }
        }
    }
}

/// Try strategies in order; the first success wins. Failures are logged, not
/// propagated, until every strategy has been exhausted.
#[cfg(feature = "async")]
pub async fn resolve_rate(
    strategies: &[RateStrategy<'_>],
    pair: CurrencyPair,
) -> Result<RateQuote> {
    for strategy in strategies {
        match strategy.fetch(pair).await {
            Ok(quote) => {
                log::info!("Rate for {} from {}: {}", pair, strategy.name(), quote.rate);
                return Ok(quote);
            }
            Err(e) => {
                log::warn!("Rate strategy '{}' failed for {}: {}", strategy.name(), pair, e);
            }
        }
    }
    Err(QuoteError::RateUnavailable(pair.to_string()))
}

/// Fetch a CSV document, bypassing intermediary caches.
#[cfg(feature = "async")]
pub async fn fetch_csv(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await
        .map_err(|e| QuoteError::FetchError(format!("HTTP request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(QuoteError::FetchError(format!(
            "Failed to fetch CSV ({})",
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| QuoteError::FetchError(format!("Failed to read response: {}", e)))
}
