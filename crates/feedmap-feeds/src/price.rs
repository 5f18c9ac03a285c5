//! Coercion of loosely formatted feed prices into plain amounts.
//!
//! Feeds send prices as `10.5`, `"$19.99"`, `"1,299.00 USD"` or nothing at
//! all. [`normalize_price`] turns every one of those into a finite `f64`
//! and never fails.

use feedmap_core::RawPrice;

/// Normalizes a raw feed price into a finite amount.
///
/// - Absent or empty input yields `0.0`.
/// - Numbers are rendered to text first, so they follow the text rules and a
///   `-5` reads as `5`.
/// - Text keeps only ASCII digits and `.`, then reads the longest prefix made
///   of digits with at most one `.`. Anything from a second `.` onwards is
///   ignored, so `"1.2.3"` reads as `1.2`.
/// - Text with no digits (e.g. `"N/A"`, `"."`) yields `0.0`.
/// - Results that are not finite yield `0.0`.
#[must_use]
pub fn normalize_price(raw: Option<&RawPrice>) -> f64 {
    let amount = match raw {
        None => return 0.0,
        Some(RawPrice::Number(n)) => parse_price_text(&n.to_string()),
        Some(RawPrice::Text(s)) => parse_price_text(s),
    };
    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

fn parse_price_text(s: &str) -> f64 {
    let mut numeric = String::with_capacity(s.len());
    let mut has_dot = false;
    for ch in s.chars().filter(|c| c.is_ascii_digit() || *c == '.') {
        if ch == '.' {
            if has_dot {
                break;
            }
            has_dot = true;
        }
        numeric.push(ch);
    }

    if !numeric.bytes().any(|b| b.is_ascii_digit()) {
        return 0.0;
    }
    numeric.parse::<f64>().unwrap_or(0.0)
}
