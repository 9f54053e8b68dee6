//! CSV line tokenizers
//!
//! Two variants are needed by the feeds: a naive split for the rate sheet,
//! whose fields never contain commas, and a quote-aware state machine for the
//! events sheet, whose event descriptions may embed commas and doubled quotes.

/// Split a line on commas, stripping one pair of surrounding quotes per field.
///
/// Does not handle commas inside quoted fields; use [`tokenize_quoted`] for
/// data where that can occur.
pub fn split_simple(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| strip_quotes(field.trim()).trim().to_string())
        .collect()
}

/// Quote-aware tokenization of a single CSV line.
///
/// A quoted run is one field, a doubled quote inside it is an escaped quote.
/// A line with unbalanced quotes is consumed best-effort: whatever has
/// accumulated when the line ends becomes the final field. Never errors.
pub fn tokenize_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => current.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => {
                    fields.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(c),
            }
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Escape a field for inclusion in a CSV line: quote it when it contains a
/// comma or a quote, doubling any embedded quotes.
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Join fields back into a CSV line, escaping as needed.
pub fn join_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn strip_quotes(field: &str) -> &str {
    let field = field.strip_prefix('"').unwrap_or(field);
    field.strip_suffix('"').unwrap_or(field)
}
