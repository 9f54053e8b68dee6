//! Rate/holiday sheet loader
//!
//! The published sheet carries one row per currency pair: `base`, `quote`,
//! `rate`, `time_of_rate`, plus optional per-currency holiday columns
//! (`year_<code>`, `month_<code>`, `day_<code>`, `name_<code>`). Header names
//! vary in casing between exports, so everything is keyed by the lower-cased,
//! trimmed header.

use crate::calendar::{month_from_abbr, HolidayEntry};
use crate::currency::CurrencyPair;
use crate::error::{QuoteError, Result};
use crate::feed::tokenizer::split_simple;
use chrono::NaiveDate;
use hashbrown::HashMap;

/// A resolved rate row for a single currency pair
#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub base: String,
    pub quote: String,
    pub rate: f64,
    pub time_of_rate: String,
}

/// Parsed rate sheet: ordered row mappings keyed by lower-cased header name
#[derive(Debug, Clone, Default)]
pub struct RateSheet {
    rows: Vec<HashMap<String, String>>,
}

impl RateSheet {
    /// Parse CSV text. The first line is the header; every further line
    /// becomes one row mapping, in CSV order. Short rows map their missing
    /// trailing fields to the empty string.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.trim().lines();
        let header_line = lines
            .next()
            .ok_or_else(|| QuoteError::ParseError("Rate sheet is empty".to_string()))?;
        let header: Vec<String> = split_simple(header_line)
            .into_iter()
            .map(|h| h.to_lowercase())
            .collect();

        let mut rows = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_simple(line);
            let row: HashMap<String, String> = header
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), fields.get(i).cloned().unwrap_or_default()))
                .collect();
            rows.push(row);
        }

        log::debug!("Parsed rate sheet: {} rows", rows.len());
        Ok(Self { rows })
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the sheet has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the first row for a pair (exact match on `base`/`quote`).
    ///
    /// A row whose `rate` field is missing or does not parse to a finite
    /// positive number does not count as a match; if no row qualifies the
    /// pair is reported as not found, which callers treat as fatal.
    pub fn find_pair(&self, pair: CurrencyPair) -> Result<RateRow> {
        for row in &self.rows {
            let base = row.get("base").map(String::as_str).unwrap_or("");
            let quote = row.get("quote").map(String::as_str).unwrap_or("");
            if base != pair.base.code() || quote != pair.quote.code() {
                continue;
            }
            let rate = row
                .get("rate")
                .and_then(|r| r.parse::<f64>().ok())
                .filter(|r| r.is_finite() && *r > 0.0);
            match rate {
                Some(rate) => {
                    return Ok(RateRow {
                        base: base.to_string(),
                        quote: quote.to_string(),
                        rate,
                        time_of_rate: row.get("time_of_rate").cloned().unwrap_or_default(),
                    })
                }
                None => {
                    log::warn!("Row for {} has no usable rate, skipping", pair);
                    continue;
                }
            }
        }
        Err(QuoteError::PairNotFound(pair.to_string()))
    }

    /// Collect settlement holidays for both sides of a pair.
    ///
    /// Each row may carry `year_c`/`month_c`/`day_c`/`name_c` columns per
    /// currency `c`; all four must be present and form a valid date to yield
    /// an entry. Rows with unparseable dates are skipped rather than pinned
    /// to today.
    pub fn holidays_for(&self, pair: CurrencyPair) -> Vec<HolidayEntry> {
        let mut holidays = Vec::new();
        for row in &self.rows {
            for currency in [pair.base, pair.quote] {
                let key = currency.code().to_lowercase();
                let year = row.get(&format!("year_{}", key));
                let month = row.get(&format!("month_{}", key));
                let day = row.get(&format!("day_{}", key));
                let name = row.get(&format!("name_{}", key));

                let (Some(year), Some(month), Some(day), Some(name)) = (year, month, day, name)
                else {
                    continue;
                };
                if year.is_empty() || month.is_empty() || day.is_empty() || name.is_empty() {
                    continue;
                }

                let date = parse_holiday_date(year, month, day);
                match date {
                    Some(date) => holidays.push(HolidayEntry {
                        region: currency,
                        date,
                        name: name.clone(),
                    }),
                    None => {
                        log::warn!(
                            "Skipping holiday '{}' ({}): bad date {}-{}-{}",
                            name,
                            currency,
                            year,
                            month,
                            day
                        );
                    }
                }
            }
        }
        holidays
    }
}

/// Build a date from sheet columns: numeric year/day, three-letter month
/// abbreviation (`JAN`..`DEC`, any casing).
fn parse_holiday_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    let month = month_from_abbr(month.trim())?;
    NaiveDate::from_ymd_opt(year, month, day)
}
