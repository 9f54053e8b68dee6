//! Margin/volume quote calculator
//!
//! Pure derivation of offer rates, exchange amounts and revenue estimates
//! from the current market rate, the selected margin and the trade volume.
//! No side effects; calling twice with the same state produces the same
//! displayed strings.

use crate::currency::CurrencyPair;

/// Fixed assumed transaction cost (0.055%) subtracted from the margin when
/// estimating revenue
pub const TRANSACTION_COST: f64 = 0.00055;

/// Placeholder shown for fields with nothing to display
pub const NOT_APPLICABLE: &str = "–";

/// Inputs to one calculation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorState {
    /// Current market rate; must be positive
    pub market_rate: f64,
    /// Margin fraction, one of the values in [`margin_options`]
    pub margin: f64,
    /// Trade volume in base currency units; 0 means "no calculation"
    pub volume: f64,
}

/// Derived quote values; `None` marks a field that is not applicable for the
/// given inputs (zero volume, or margin below the transaction cost)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteBreakdown {
    pub offer_rate: f64,
    pub inverse_rate: f64,
    pub volume: f64,
    pub offer_amount: Option<f64>,
    pub inverse_amount: Option<f64>,
    pub revenue_on_sell: Option<f64>,
    pub revenue_on_buyback: Option<f64>,
}

/// Display strings for the quote panel (rates to 5 decimal places, monetary
/// amounts to 2, currency symbols attached)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDisplay {
    pub offer_rate: String,
    pub inverse_rate: String,
    pub base_volume: String,
    pub quote_volume: String,
    pub offer_amount: String,
    pub inverse_amount: String,
    pub revenue_on_sell: String,
    pub revenue_on_buyback: String,
}

/// Compute the quote breakdown for a state. Pure function.
pub fn compute(state: &CalculatorState) -> QuoteBreakdown {
    let discount = 1.0 - state.margin;
    let offer_rate = state.market_rate * discount;
    let inverse_rate = (1.0 / state.market_rate) * discount;

    if state.volume <= 0.0 {
        return QuoteBreakdown {
            offer_rate,
            inverse_rate,
            volume: state.volume,
            offer_amount: None,
            inverse_amount: None,
            revenue_on_sell: None,
            revenue_on_buyback: None,
        };
    }

    let offer_amount = offer_rate * state.volume;
    let inverse_amount = inverse_rate * state.volume;

    let effective_margin = state.margin - TRANSACTION_COST;
    let (revenue_on_sell, revenue_on_buyback) = if effective_margin > 0.0 {
        (
            Some(state.volume * effective_margin),
            Some(inverse_amount * effective_margin),
        )
    } else {
        (None, None)
    };

    QuoteBreakdown {
        offer_rate,
        inverse_rate,
        volume: state.volume,
        offer_amount: Some(offer_amount),
        inverse_amount: Some(inverse_amount),
        revenue_on_sell,
        revenue_on_buyback,
    }
}

impl QuoteBreakdown {
    /// Format the breakdown for display. Amounts carry the symbol of the
    /// currency they are denominated in; revenues are reported in the base
    /// currency.
    pub fn display(&self, pair: CurrencyPair) -> QuoteDisplay {
        let base = pair.base.symbol();
        let quote = pair.quote.symbol();

        let volume = |sym: &str| {
            if self.volume > 0.0 {
                format!("{}{}", sym, format_grouped(self.volume, 0))
            } else {
                NOT_APPLICABLE.to_string()
            }
        };
        let amount = |sym: &str, value: Option<f64>| match value {
            Some(v) => format!("{}{}", sym, format_grouped(v, 2)),
            None => NOT_APPLICABLE.to_string(),
        };

        QuoteDisplay {
            offer_rate: format!("{:.5}", self.offer_rate),
            inverse_rate: format!("{:.5}", self.inverse_rate),
            base_volume: volume(base),
            quote_volume: volume(quote),
            offer_amount: amount(quote, self.offer_amount),
            inverse_amount: amount(base, self.inverse_amount),
            revenue_on_sell: amount(base, self.revenue_on_sell),
            revenue_on_buyback: amount(base, self.revenue_on_buyback),
        }
    }
}

/// Margin choices offered by the selector: 0.15% to 3.00% in 0.05% steps.
/// Built from integer multiples so the discrete values are exact.
pub fn margin_options() -> Vec<f64> {
    (3..=60).map(|i| i as f64 * 0.0005).collect()
}

/// Volume choices offered by the selector: 10,000 to 100,000 in 10,000 steps
pub fn volume_options() -> Vec<f64> {
    (1..=10).map(|i| (i * 10_000) as f64).collect()
}

/// Label for a margin option, e.g. `0.55%`
pub fn margin_label(margin: f64) -> String {
    format!("{:.2}%", margin * 100.0)
}

/// Label for a volume option, e.g. `10,000`
pub fn volume_label(volume: f64) -> String {
    format_grouped(volume, 0)
}

/// Fixed-point formatting with thousands separators
fn format_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (formatted, None),
    };

    let mut grouped = String::new();
    for (count, c) in int_part.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let mut out: String = grouped.chars().rev().collect();
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    if value < 0.0 {
        out.insert(0, '-');
    }
    out
}
