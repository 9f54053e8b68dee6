//! HTML table renderers for the holiday and events panels
//!
//! Pure string builders: the hosting page injects the returned fragments into
//! its named display regions. Markup mirrors the page contract (column
//! widths, placeholder copy, the `insight-btn` link class).

use crate::calendar::HolidayEntry;
use crate::feed::EventEntry;

/// Default number of events shown
pub const DEFAULT_EVENT_LIMIT: usize = 10;

/// Segment colors for the 3-level severity meter, indexed by importance - 1
const SEVERITY_COLORS: [&str; 3] = ["#8bc34a", "#ff9800", "#f44336"];
const SEVERITY_OFF: &str = "#ddd";

/// Render the settlement holiday table (date, region, name).
///
/// Callers pass holidays already restricted to upcoming dates and truncated
/// (see [`crate::calendar::upcoming`]); an empty slice renders a placeholder
/// paragraph instead of an empty table.
pub fn holiday_table(holidays: &[HolidayEntry]) -> String {
    if holidays.is_empty() {
        return "<p>No upcoming settlement holidays found.</p>".to_string();
    }

    let rows: String = holidays
        .iter()
        .map(|h| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                h.date.format("%d %b %Y"),
                h.region,
                escape_html(&h.name)
            )
        })
        .collect();

    format!(
        "<table>\
         <thead><tr><th>Date</th><th>Region</th><th>Holiday</th></tr></thead>\
         <tbody>{}</tbody>\
         </table>",
        rows
    )
}

/// Render the economic events table (date-time, currency, importance meter,
/// description, insights link). Takes the first `limit` entries.
pub fn events_table(events: &[EventEntry], limit: usize) -> String {
    if events.is_empty() {
        return "<p>No upcoming events found.</p>".to_string();
    }

    let rows: String = events.iter().take(limit).map(event_row).collect();

    format!(
        "<table class=\"events-table\" style=\"font-size:13px;width:100%;border-collapse:collapse;table-layout:fixed;\">\
         <thead><tr>\
         <th style=\"width:22%;\">Date &amp; Time</th>\
         <th style=\"width:10%;\">Currency</th>\
         <th style=\"width:18%;\">Importance</th>\
         <th style=\"width:40%;\">Event</th>\
         <th style=\"width:10%;\">Insights</th>\
         </tr></thead>\
         <tbody>{}</tbody>\
         </table>",
        rows
    )
}

fn event_row(event: &EventEntry) -> String {
    let date_cell = match event.timestamp {
        Some(ts) => ts.format("%d %b %Y, %H:%M").to_string(),
        None => escape_html(&event.raw_datetime),
    };

    format!(
        "<tr>\
         <td style=\"width:22%;white-space:nowrap;\">{}</td>\
         <td style=\"width:10%;text-align:center;\">{}</td>\
         <td style=\"width:18%;text-align:center;\">{}</td>\
         <td style=\"width:40%;\">{}</td>\
         <td style=\"width:10%;text-align:center;\">{}</td>\
         </tr>",
        date_cell,
        escape_html(&event.currency),
        severity_meter(event.importance),
        escape_html(&event.event),
        insights_cell(&event.insights)
    )
}

/// Fixed 3-segment meter: segments filled up to the importance value, colored
/// by level; importance 0 (unknown) renders all segments off.
fn severity_meter(importance: u8) -> String {
    let level = importance.min(3) as usize;
    let color = if level > 0 {
        SEVERITY_COLORS[level - 1]
    } else {
        SEVERITY_OFF
    };

    (1..=3)
        .map(|segment| {
            let fill = if segment <= level { color } else { SEVERITY_OFF };
            format!(
                "<span style=\"display:inline-block;width:10px;height:10px;margin:0 1px;border-radius:2px;background:{};\"></span>",
                fill
            )
        })
        .collect()
}

/// Insights render as a link only for recognized URL schemes; other text
/// passes through plain, and an empty value becomes a grey dash.
fn insights_cell(insights: &str) -> String {
    let link = insights.trim().trim_matches('"').trim();
    if link.starts_with("http") {
        format!(
            "<a href=\"{}\" target=\"_blank\" class=\"insight-btn\">View</a>",
            escape_html(link)
        )
    } else if !link.is_empty() {
        format!("<span>{}</span>", escape_html(link))
    } else {
        "<span style=\"color:#ccc;\">–</span>".to_string()
    }
}

fn escape_html(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use chrono::NaiveDate;

    fn holiday(name: &str) -> HolidayEntry {
        HolidayEntry {
            region: Currency::USD,
            date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
            name: name.to_string(),
        }
    }

    fn event(importance: u8, insights: &str) -> EventEntry {
        EventEntry {
            timestamp: NaiveDate::from_ymd_opt(2025, 11, 13)
                .unwrap()
                .and_hms_opt(8, 0, 0),
            raw_datetime: "11/13/2025 08:00:00".to_string(),
            currency: "USD".to_string(),
            importance,
            event: "Fed Rate Decision".to_string(),
            insights: insights.to_string(),
        }
    }

    #[test]
    fn test_holiday_table() {
        let html = holiday_table(&[holiday("Independence Day")]);
        assert!(html.contains("<table>"));
        assert!(html.contains("04 Jul 2025"));
        assert!(html.contains("USD"));
        assert!(html.contains("Independence Day"));
    }

    #[test]
    fn test_holiday_table_empty_placeholder() {
        let html = holiday_table(&[]);
        assert_eq!(html, "<p>No upcoming settlement holidays found.</p>");
    }

    #[test]
    fn test_events_table_with_link() {
        let html = events_table(&[event(3, "https://example.com/x")], DEFAULT_EVENT_LIMIT);
        assert!(html.contains("13 Nov 2025, 08:00"));
        assert!(html.contains("Fed Rate Decision"));
        assert!(html.contains("<a href=\"https://example.com/x\""));
        assert!(html.contains("class=\"insight-btn\""));
    }

    #[test]
    fn test_events_table_empty_placeholder() {
        assert_eq!(events_table(&[], 10), "<p>No upcoming events found.</p>");
    }

    #[test]
    fn test_events_table_respects_limit() {
        let events: Vec<EventEntry> = (0..15).map(|_| event(1, "")).collect();
        let html = events_table(&events, 10);
        assert_eq!(html.matches("<tr>").count(), 11); // header row + 10 data rows
    }

    #[test]
    fn test_severity_meter_full() {
        let meter = severity_meter(3);
        assert_eq!(meter.matches(SEVERITY_COLORS[2]).count(), 3);
        assert_eq!(meter.matches(SEVERITY_OFF).count(), 0);
    }

    #[test]
    fn test_severity_meter_partial() {
        let meter = severity_meter(1);
        assert_eq!(meter.matches(SEVERITY_COLORS[0]).count(), 1);
        assert_eq!(meter.matches(SEVERITY_OFF).count(), 2);
    }

    #[test]
    fn test_severity_meter_unknown() {
        assert_eq!(severity_meter(0).matches(SEVERITY_OFF).count(), 3);
        // Out-of-range values clamp to the top level.
        assert_eq!(severity_meter(9).matches(SEVERITY_COLORS[2]).count(), 3);
    }

    #[test]
    fn test_insights_plain_text_and_dash() {
        assert_eq!(insights_cell("see notes"), "<span>see notes</span>");
        assert!(insights_cell("").contains("–"));
        assert!(insights_cell("\"\"").contains("–"));
    }

    #[test]
    fn test_insights_quoted_url() {
        // Some exports double-quote the URL; strip before scheme detection.
        let cell = insights_cell("\"https://example.com/y\"");
        assert!(cell.starts_with("<a href=\"https://example.com/y\""));
    }

    #[test]
    fn test_unparsed_timestamp_shows_raw() {
        let mut ev = event(2, "");
        ev.timestamp = None;
        ev.raw_datetime = "later today".to_string();
        let html = events_table(&[ev], 10);
        assert!(html.contains("later today"));
    }

    #[test]
    fn test_html_escaping() {
        let mut ev = event(2, "");
        ev.event = "CPI <flash> & \"core\"".to_string();
        let html = events_table(&[ev], 10);
        assert!(html.contains("CPI &lt;flash&gt; &amp; &quot;core&quot;"));
    }
}
