//! Decoder for the pipe-delimited raw product export.
//!
//! The export starts with two header/metadata lines, followed by one product
//! per line:
//!
//! ```text
//! Product export 2024-01-01
//! sku|id|name|list|sale|stock
//! A-1|P2|Gadget|$19.99|$14.99|12
//! ```
//!
//! Columns are positional; the header content is never inspected.

use feedmap_core::{NormalizedRow, RawPrice};

/// Number of leading lines skipped before product lines begin.
const HEADER_LINES: usize = 2;

/// Lines with fewer columns than this are dropped as malformed.
const MIN_COLUMNS: usize = 6;

const COL_PRODUCT_ID: usize = 1;
const COL_PRODUCT_NAME: usize = 2;
const COL_LIST_PRICE: usize = 3;
const COL_SALES_PRICE: usize = 4;

/// Decodes a raw export into rows, one per well-formed product line.
///
/// Lines end in `\n` or `\r\n`. Short lines are skipped, not reported.
#[must_use]
pub fn parse_raw_feed(body: &str) -> Vec<NormalizedRow> {
    body.lines()
        .skip(HEADER_LINES)
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<NormalizedRow> {
    let columns: Vec<&str> = line.split('|').collect();
    if columns.len() < MIN_COLUMNS {
        return None;
    }

    let field = |idx: usize| -> Option<String> {
        let value = columns[idx].trim();
        (!value.is_empty()).then(|| value.to_owned())
    };

    Some(NormalizedRow {
        product_id: field(COL_PRODUCT_ID),
        product_name: field(COL_PRODUCT_NAME),
        list_price: field(COL_LIST_PRICE).map(RawPrice::Text),
        sales_price: field(COL_SALES_PRICE).map(RawPrice::Text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Product export\nsku|id|name|list|sale|stock\n";

    #[test]
    fn maps_columns_positionally() {
        let body = format!("{HEADER}x|P2|Gadget|$19.99|$14.99|x");
        let rows = parse_raw_feed(&body);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_id.as_deref(), Some("P2"));
        assert_eq!(rows[0].product_name.as_deref(), Some("Gadget"));
        assert_eq!(rows[0].list_price, Some(RawPrice::from("$19.99")));
        assert_eq!(rows[0].sales_price, Some(RawPrice::from("$14.99")));
    }

    #[test]
    fn short_line_is_dropped() {
        let body = format!("{HEADER}x|P3|Thing|bad");
        assert!(parse_raw_feed(&body).is_empty());
    }

    #[test]
    fn five_columns_is_still_too_short() {
        let body = format!("{HEADER}x|P3|Thing|1|2");
        assert!(parse_raw_feed(&body).is_empty());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let body = format!("{HEADER}x|P4|Thing|1|2|3|4|5");
        let rows = parse_raw_feed(&body);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_id.as_deref(), Some("P4"));
    }

    #[test]
    fn first_two_lines_are_always_skipped() {
        // Both header lines look like valid product lines.
        let body = "h|H1|Header one|1|1|h\nh|H2|Header two|2|2|h\nx|P1|Widget|3|3|x\n";
        let rows = parse_raw_feed(body);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_id.as_deref(), Some("P1"));
    }

    #[test]
    fn handles_crlf_line_endings() {
        let body = "a\r\nb\r\nx| P5 | Crlf |1.00|0.50|x\r\n";
        let rows = parse_raw_feed(body);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_id.as_deref(), Some("P5"));
        assert_eq!(rows[0].product_name.as_deref(), Some("Crlf"));
        assert_eq!(rows[0].sales_price, Some(RawPrice::from("0.50")));
    }

    #[test]
    fn blank_fields_are_absent() {
        let body = format!("{HEADER}x|P6|   |||x");
        let rows = parse_raw_feed(&body);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].product_name.is_none());
        assert!(rows[0].list_price.is_none());
        assert!(!rows[0].has_required_fields());
    }

    #[test]
    fn header_only_body_yields_nothing() {
        assert!(parse_raw_feed(HEADER).is_empty());
        assert!(parse_raw_feed("").is_empty());
    }

    #[test]
    fn blank_trailing_lines_are_dropped() {
        let body = format!("{HEADER}x|P7|Seven|7|7|x\n\n\n");
        assert_eq!(parse_raw_feed(&body).len(), 1);
    }
}
