//! # fxquote
//!
//! An FX exchange quoting engine: loads a spreadsheet-published CSV of rates
//! and settlement holidays plus an economic-events CSV, merges them with an
//! optional live rate feed, and derives margin/volume quotes and rendered
//! information tables.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fxquote::prelude::*;
//!
//! # async fn run() -> fxquote::error::Result<()> {
//! let pair: CurrencyPair = "EUR/USD".parse()?;
//! let mut dashboard = Dashboard::new(DashboardConfig::for_pair(pair))?;
//!
//! // Fetch feeds, resolve the rate, render tables, run the calculator once.
//! let view = dashboard.init(0.0055, 10_000.0).await?;
//! println!("offer rate: {}", view.quote.offer_rate);
//!
//! // Margin change handler path: recompute from current state.
//! let quote = dashboard.quote(0.0100, 10_000.0)?;
//! println!("offer rate: {}", quote.offer_rate);
//! # Ok(())
//! # }
//! ```

pub mod calculator;
pub mod calendar;
pub mod currency;
pub mod error;
pub mod feed;
pub mod render;

#[cfg(feature = "async")]
pub mod dashboard;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::calculator::{compute, CalculatorState, QuoteBreakdown, QuoteDisplay};
    pub use crate::calendar::HolidayEntry;
    pub use crate::currency::{Currency, CurrencyPair};
    pub use crate::error::{QuoteError, Result};
    pub use crate::feed::{EventEntry, RateQuote, RateRow, RateSheet};

    #[cfg(feature = "async")]
    pub use crate::dashboard::{Dashboard, DashboardConfig, DashboardView};
    #[cfg(feature = "async")]
    pub use crate::feed::{LiveQuote, LiveRateClient, RateStrategy};
}
