//! Positional field decoding for the Tencent quote feed.
//!
//! Each variable holds one `~`-delimited record. Fields are read by fixed
//! offset into [`TencentFields`] and checked before being turned into a
//! [`Quote`], so a reshuffled record is dropped instead of producing
//! plausible-looking wrong numbers.

use log::warn;

use crate::models::{AShareCode, Quote};

/// Field separator in a feed record.
pub const DELIMITER: char = '~';

/// A record is accepted only when it splits into more than this many fields.
pub const MIN_FIELD_COUNT: usize = 30;

/// The market-cap field is reported in units of 10,000.
pub const MARKET_CAP_SCALE: f64 = 10_000.0;

const NAME: usize = 1;
const CODE: usize = 2;
const PRICE: usize = 3;
const PREVIOUS_CLOSE: usize = 4;
const CHANGE_PERCENT: usize = 32;
const MARKET_CAP: usize = 45;

/// Named view over one feed record.
#[derive(Clone, Debug, PartialEq)]
pub struct TencentFields {
    pub name: String,
    pub code: String,
    pub price: f64,
    pub previous_close: f64,
    pub change_percent: f64,
    /// Market cap in units of [`MARKET_CAP_SCALE`]
    pub market_cap_units: f64,
}

impl TencentFields {
    /// Split a raw record and pick fields by offset.
    ///
    /// Returns `None` when the record has too few fields. Numeric fields that
    /// fail to parse, or are missing from a short record, read as zero.
    pub fn parse(raw: &str) -> Option<Self> {
        let fields: Vec<&str> = raw.split(DELIMITER).collect();
        if fields.len() <= MIN_FIELD_COUNT {
            return None;
        }

        Some(Self {
            name: text_at(&fields, NAME),
            code: text_at(&fields, CODE),
            price: number_at(&fields, PRICE),
            previous_close: number_at(&fields, PREVIOUS_CLOSE),
            change_percent: number_at(&fields, CHANGE_PERCENT),
            market_cap_units: number_at(&fields, MARKET_CAP),
        })
    }

    /// Check the record actually describes `expected`.
    ///
    /// The code field is only compared when the feed filled it in.
    pub fn check(&self, expected: &AShareCode) -> Result<(), String> {
        if !self.code.is_empty() && self.code != expected.code() {
            return Err(format!(
                "code field '{}' does not match requested '{}'",
                self.code,
                expected.code()
            ));
        }
        Ok(())
    }

    /// Convert to a quote keyed by the caller's original symbol.
    pub fn into_quote(self, symbol: &str) -> Quote {
        let change = self.price - self.previous_close;
        Quote::new(
            symbol,
            self.name,
            self.price,
            change,
            self.change_percent,
            self.market_cap_units * MARKET_CAP_SCALE,
        )
    }
}

/// Decode one record for `code`, or `None` if it must be dropped.
pub fn parse_record(code: &AShareCode, raw: &str) -> Option<Quote> {
    let fields = match TencentFields::parse(raw) {
        Some(fields) => fields,
        None => {
            warn!(
                "Dropping {}: record has too few fields ({})",
                code,
                raw.split(DELIMITER).count()
            );
            return None;
        }
    };

    if let Err(reason) = fields.check(code) {
        warn!("Dropping {}: {}", code, reason);
        return None;
    }

    Some(fields.into_quote(code.code()))
}

fn text_at(fields: &[&str], index: usize) -> String {
    fields
        .get(index)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn number_at(fields: &[&str], index: usize) -> f64 {
    fields
        .get(index)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{moutai, record};
    use super::*;

    #[test]
    fn test_parse_moutai_record() {
        let code = AShareCode::parse("600519").unwrap();
        let quote = parse_record(&code, &moutai()).unwrap();

        assert_eq!(quote.symbol, "600519");
        assert_eq!(quote.name, "贵州茅台");
        assert_eq!(quote.price, 1800.0);
        assert_eq!(quote.change, 10.0);
        assert_eq!(quote.changes_percentage, 0.56);
        assert_eq!(quote.market_cap, 5_000_000.0);
    }

    #[test]
    fn test_change_is_price_minus_previous_close() {
        let raw = record(31, &[(1, "测试"), (3, "100"), (4, "90")]);
        let code = AShareCode::parse("000001").unwrap();
        let quote = parse_record(&code, &raw).unwrap();
        assert_eq!(quote.change, 10.0);
    }

    #[test]
    fn test_thirty_fields_is_rejected() {
        let raw = record(30, &[(1, "测试"), (3, "100"), (4, "90")]);
        let code = AShareCode::parse("000001").unwrap();
        assert!(parse_record(&code, &raw).is_none());
    }

    #[test]
    fn test_short_record_missing_offsets_read_as_zero() {
        let raw = record(31, &[(1, "测试"), (3, "12.5"), (4, "12")]);
        let fields = TencentFields::parse(&raw).unwrap();
        assert_eq!(fields.change_percent, 0.0);
        assert_eq!(fields.market_cap_units, 0.0);
    }

    #[test]
    fn test_unparsable_numbers_read_as_zero() {
        let raw = record(
            46,
            &[(1, "停牌股"), (3, "-"), (4, "abc"), (32, "NaN"), (45, "")],
        );
        let code = AShareCode::parse("600000").unwrap();
        let quote = parse_record(&code, &raw).unwrap();
        assert_eq!(quote.price, 0.0);
        assert_eq!(quote.change, 0.0);
        assert_eq!(quote.changes_percentage, 0.0);
        assert_eq!(quote.market_cap, 0.0);
        assert!(!quote.market_cap.is_nan());
    }

    #[test]
    fn test_mismatched_code_is_dropped() {
        let raw = record(46, &[(1, "五粮液"), (2, "000858"), (3, "150"), (4, "148")]);
        let code = AShareCode::parse("600519").unwrap();
        assert!(parse_record(&code, &raw).is_none());
    }
}
