// Thousands/decimal separator disambiguation for clipboard numbers.
// "1,234.56", "1.234,56", "1,234" and "1,23" all need to land on a single f64.

const THOUSANDS_GROUP_LEN: usize = 3;
const MIN_DIGITS_FOR_GROUPING: usize = 4;

/// Decides which of `.` and `,` is the decimal point in a numeric token
#[derive(Debug, Clone, Copy, Default)]
pub struct ThousandsDetector;

impl ThousandsDetector {
    pub fn new() -> Self {
        Self
    }

    /// Parse a number that may use either `.` or `,` as decimal or grouping separator.
    /// Returns None for anything that is not a well formed number.
    pub fn parse_number(&self, text: &str) -> Option<f64> {
        let (negative, body) = if let Some(rest) = text.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = text.strip_prefix('+') {
            (false, rest)
        } else {
            (false, text)
        };

        if body.is_empty()
            || !body
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return None;
        }

        let commas = body.matches(',').count();
        let dots = body.matches('.').count();

        let normalized = match (commas, dots) {
            (0, 0) => body.to_string(),
            (n, 0) => resolve_single_kind(body, ',', n)?,
            (0, n) => resolve_single_kind(body, '.', n)?,
            _ => resolve_mixed(body)?,
        };

        let value: f64 = normalized.parse().ok()?;
        Some(if negative { -value } else { value })
    }
}

// Only one separator character appears, possibly several times
fn resolve_single_kind(body: &str, separator: char, occurrences: usize) -> Option<String> {
    let groups: Vec<&str> = body.split(separator).collect();
    if groups.iter().any(|g| g.is_empty()) {
        return None;
    }

    if occurrences > 1 {
        return join_thousands(&groups);
    }

    let (head, tail) = (groups[0], groups[1]);
    let looks_grouped = tail.len() == THOUSANDS_GROUP_LEN
        && head.len() + tail.len() >= MIN_DIGITS_FOR_GROUPING
        && !head.starts_with('0');

    if looks_grouped {
        Some(format!("{}{}", head, tail))
    } else {
        Some(format!("{}.{}", head, tail))
    }
}

// Both separators appear: the rightmost one is the decimal point
fn resolve_mixed(body: &str) -> Option<String> {
    let (decimal_index, decimal) = body
        .char_indices()
        .rev()
        .find(|(_, c)| *c == '.' || *c == ',')?;

    if body.matches(decimal).count() != 1 {
        return None;
    }

    let thousands = if decimal == '.' { ',' } else { '.' };
    let integer_part = &body[..decimal_index];
    let fraction = &body[decimal_index + 1..];
    if fraction.is_empty() {
        return None;
    }

    let groups: Vec<&str> = integer_part.split(thousands).collect();
    if groups.iter().any(|g| g.is_empty()) {
        return None;
    }

    let integer = join_thousands(&groups)?;
    Some(format!("{}.{}", integer, fraction))
}

// Every group after the first is exactly 3 digits; the first only needs one digit
fn join_thousands(groups: &[&str]) -> Option<String> {
    let (first, rest) = groups.split_first()?;
    if first.is_empty() {
        return None;
    }
    if rest.iter().any(|g| g.len() != THOUSANDS_GROUP_LEN) {
        return None;
    }
    Some(groups.concat())
}
