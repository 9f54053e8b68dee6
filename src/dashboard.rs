//! Dashboard orchestration
//!
//! Ties the feeds, calculator and renderers together and owns the
//! application state (market rate, last-update label, cached sheet) that the
//! change handlers and the manual refresh read and write. Single execution
//! context; a refresh racing an initial load is last-write-wins.

use crate::calculator::{self, CalculatorState, QuoteDisplay};
use crate::calendar;
use crate::currency::{Currency, CurrencyPair};
use crate::error::{QuoteError, Result};
use crate::feed::{self, EventEntry, LiveRateClient, RateSheet, RateStrategy};
use crate::render;
use chrono::Local;
use reqwest::Client;
use std::time::Duration;

/// Published rate/holiday sheet
pub const DEFAULT_RATES_URL: &str =
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vR_1Df4oUf4sjTdt75U-dcQ5GiMKPmKs1GAOke-rfIck4dwoAS8jua_vjvlMhOou4Huyjd5o2B3FSlB/pub?gid=0&single=true&output=csv";

/// Published economic events sheet
pub const DEFAULT_EVENTS_URL: &str =
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vR_1Df4oUf4sjTdt75U-dcQ5GiMKPmKs1GAOke-rfIck4dwoAS8jua_vjvlMhOou4Huyjd5o2B3FSlB/pub?gid=135859645&single=true&output=csv";

/// Live price endpoint (single pair only)
pub const DEFAULT_LIVE_ENDPOINT: &str =
    "https://fxi-worker.anthonywongtradingview.workers.dev/api/live-refresh";

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub rates_url: String,
    pub events_url: String,
    /// Live endpoint; `None` disables the live strategy entirely
    pub live_endpoint: Option<String>,
    /// The one pair the live endpoint serves
    pub live_pair: CurrencyPair,
    /// Pair this dashboard quotes
    pub pair: CurrencyPair,
    pub holiday_limit: usize,
    pub event_limit: usize,
}

impl DashboardConfig {
    /// Default feeds for a given pair
    pub fn for_pair(pair: CurrencyPair) -> Self {
        Self {
            rates_url: DEFAULT_RATES_URL.to_string(),
            events_url: DEFAULT_EVENTS_URL.to_string(),
            live_endpoint: Some(DEFAULT_LIVE_ENDPOINT.to_string()),
            live_pair: CurrencyPair::new(Currency::EUR, Currency::USD),
            pair,
            holiday_limit: 5,
            event_limit: render::DEFAULT_EVENT_LIMIT,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::for_pair(CurrencyPair::new(Currency::EUR, Currency::USD))
    }
}

/// Rendered output for one initialization or recalculation pass
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub market_rate: String,
    pub last_update: String,
    pub holidays_html: String,
    pub events_html: String,
    pub quote: QuoteDisplay,
}

/// Quoting dashboard for a single currency pair
pub struct Dashboard {
    config: DashboardConfig,
    client: Client,
    live: Option<LiveRateClient>,
    sheet: Option<RateSheet>,
    /// Current market rate; written by init and manual refresh, read by the
    /// calculator
    pub market_rate: f64,
    /// Display label for when the rate was last updated
    pub last_update: String,
    /// Name of the strategy the current rate came from
    pub rate_source: &'static str,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| QuoteError::FetchError(format!("Failed to create HTTP client: {}", e)))?;

        let live = match &config.live_endpoint {
            Some(endpoint) => Some(LiveRateClient::new(endpoint.clone())?),
            None => None,
        };

        Ok(Self {
            config,
            client,
            live,
            sheet: None,
            market_rate: 0.0,
            last_update: String::new(),
            rate_source: "",
        })
    }

    /// Full initialization: fetch both feeds, resolve the rate, render the
    /// tables and run the calculator once.
    ///
    /// A rate-sheet fetch failure or an absent pair is fatal and propagates;
    /// an events-feed failure degrades to a placeholder table.
    pub async fn init(&mut self, margin: f64, volume: f64) -> Result<DashboardView> {
        let rates_csv = feed::fetch_csv(&self.client, &self.config.rates_url).await?;
        let events_csv = match feed::fetch_csv(&self.client, &self.config.events_url).await {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Events CSV failed: {}", e);
                None
            }
        };
        self.init_from_documents(&rates_csv, events_csv.as_deref(), margin, volume)
            .await
    }

    /// Initialize from already-fetched CSV documents. `None` for the events
    /// document renders the empty-state events table.
    pub async fn init_from_documents(
        &mut self,
        rates_csv: &str,
        events_csv: Option<&str>,
        margin: f64,
        volume: f64,
    ) -> Result<DashboardView> {
        let sheet = RateSheet::parse(rates_csv)?;

        // Pair presence is checked up front: a live quote for a pair the
        // sheet does not carry would leave the holiday panel unexplained.
        sheet.find_pair(self.config.pair)?;

        let mut strategies = Vec::new();
        if self.config.pair == self.config.live_pair {
            if let Some(live) = &self.live {
                strategies.push(RateStrategy::LiveEndpoint(live));
            }
        }
        strategies.push(RateStrategy::Spreadsheet(&sheet));

        let quote = feed::resolve_rate(&strategies, self.config.pair).await?;
        self.market_rate = quote.rate;
        self.last_update = quote.as_of;
        self.rate_source = quote.source;

        let holidays = calendar::upcoming(
            sheet.holidays_for(self.config.pair),
            Local::now().date_naive(),
            self.config.holiday_limit,
        );
        let holidays_html = render::holiday_table(&holidays);

        let events = events_csv.map(|text| self.prepare_events(text)).unwrap_or_default();
        let events_html = render::events_table(&events, self.config.event_limit);

        self.sheet = Some(sheet);
        let quote_display = self.quote(margin, volume)?;

        Ok(DashboardView {
            market_rate: format!("{:.5}", self.market_rate),
            last_update: self.last_update.clone(),
            holidays_html,
            events_html,
            quote: quote_display,
        })
    }

    /// Parse, filter to the dashboard's currencies, and sort the events feed
    fn prepare_events(&self, events_csv: &str) -> Vec<EventEntry> {
        let mut events = feed::parse_events(events_csv);
        let base = self.config.pair.base.code();
        let quote = self.config.pair.quote.code();
        events.retain(|e| e.currency == base || e.currency == quote);
        feed::sort_events(&mut events);
        events
    }

    /// Re-run the calculator against current state (margin/volume change
    /// handler path).
    pub fn quote(&self, margin: f64, volume: f64) -> Result<QuoteDisplay> {
        if self.market_rate <= 0.0 {
            return Err(QuoteError::InvalidInput(
                "market rate not initialised".to_string(),
            ));
        }
        let state = CalculatorState {
            market_rate: self.market_rate,
            margin,
            volume,
        };
        Ok(calculator::compute(&state).display(self.config.pair))
    }

    /// Manual live-rate refresh. Applies only when this dashboard's pair is
    /// the live pair; on any failure the previous rate and label are left
    /// untouched. Returns whether the rate was updated.
    pub async fn refresh_live(&mut self) -> bool {
        if self.config.pair != self.config.live_pair {
            return false;
        }
        let Some(live) = &self.live else {
            return false;
        };

        match live.fetch(self.config.pair).await {
            Ok(quote) => {
                self.market_rate = quote.price;
                self.last_update = if quote.refreshed_at.is_empty() {
                    "unknown".to_string()
                } else {
                    quote.refreshed_at
                };
                self.rate_source = "live-endpoint";
                true
            }
            Err(e) => {
                log::warn!("Live refresh failed, keeping previous rate: {}", e);
                false
            }
        }
    }
}
