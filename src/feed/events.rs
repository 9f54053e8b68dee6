//! Economic calendar feed loader
//!
//! The events export is messier than the rate sheet: it may start with a
//! byte-order mark and arbitrary metadata lines before the real header, the
//! header's date column name varies (`date_and_time` vs `date_and_time_`),
//! and event descriptions can contain commas, so rows go through the
//! quote-aware tokenizer. Timestamps are normalized through a fixed list of
//! format attempts; rows whose timestamp cannot be parsed are kept with their
//! raw text and sort after everything else.

use crate::feed::tokenizer::{split_simple, tokenize_quoted};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Header token that marks the start of the real data (case-insensitive)
const HEADER_MARKER: &str = "date_and_time";

/// Timestamp formats attempted after the sheets-style `MM/DD/YYYY` patterns
const GENERIC_FORMATS: [&str; 6] = [
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// One economic calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    /// Parsed timestamp; `None` means the raw text did not match any known
    /// format and the entry is unsortable
    pub timestamp: Option<NaiveDateTime>,
    /// Raw date/time text as it appeared in the feed
    pub raw_datetime: String,
    pub currency: String,
    /// Impact rating 1-3; 0 when missing or unparseable
    pub importance: u8,
    pub event: String,
    pub insights: String,
}

/// Parse the events CSV into entries, feed order preserved.
///
/// Returns an empty vector when no header line is found; individual rows
/// never abort the batch.
pub fn parse_events(text: &str) -> Vec<EventEntry> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.trim().lines();

    let header_line = loop {
        match lines.next() {
            Some(line) if line.to_lowercase().contains(HEADER_MARKER) => break line,
            Some(_) => continue,
            None => {
                log::warn!("Events feed has no '{}' header line", HEADER_MARKER);
                return Vec::new();
            }
        }
    };

    let header: Vec<String> = split_simple(header_line)
        .into_iter()
        .map(|h| h.to_lowercase())
        .collect();
    let idx = ColumnIndices::resolve(&header);

    let mut events = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = tokenize_quoted(line);
        let field = |i: Option<usize>| -> String {
            i.and_then(|i| fields.get(i).cloned()).unwrap_or_default()
        };

        let raw_datetime = field(idx.datetime);
        let (timestamp, raw_datetime) = parse_event_timestamp(&raw_datetime);

        events.push(EventEntry {
            timestamp,
            raw_datetime,
            currency: field(idx.currency).to_uppercase(),
            importance: field(idx.importance).trim().parse().unwrap_or(0),
            event: field(idx.event),
            insights: field(idx.insights),
        });
    }

    log::debug!("Parsed events feed: {} entries", events.len());
    events
}

/// Sort ascending by timestamp; entries without one go last, original order
/// preserved among themselves.
pub fn sort_events(events: &mut [EventEntry]) {
    events.sort_by_key(|e| (e.timestamp.is_none(), e.timestamp));
}

struct ColumnIndices {
    datetime: Option<usize>,
    currency: Option<usize>,
    importance: Option<usize>,
    event: Option<usize>,
    insights: Option<usize>,
}

impl ColumnIndices {
    fn resolve(header: &[String]) -> Self {
        let find = |name: &str| header.iter().position(|h| h == name);
        Self {
            // One export variant appends a trailing underscore.
            datetime: find("date_and_time").or_else(|| find("date_and_time_")),
            currency: find("currency"),
            importance: find("importance"),
            event: find("event"),
            insights: find("insights"),
        }
    }
}

/// Attempt timestamp normalization, returning the parse result and the
/// trimmed raw text for display fallback.
fn parse_event_timestamp(raw: &str) -> (Option<NaiveDateTime>, String) {
    let raw = raw.trim();

    // Sheets-style MM/DD/YYYY HH:MM[:SS] first
    for fmt in ["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return (Some(ts), raw.to_string());
        }
    }
    for fmt in GENERIC_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return (Some(ts), raw.to_string());
        }
    }
    // Date-only forms land on midnight
    for fmt in ["%m/%d/%Y", "%Y-%m-%d", "%d-%b-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return (date.and_hms_opt(0, 0, 0), raw.to_string());
        }
    }
    (None, raw.to_string())
}
