//! Display formatting for panel labels.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Shown for fields the backend did not provide.
pub const MISSING: &str = "N/A";

/// Currency the index is quoted in unless configured otherwise.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Formats a price in `currency_code`, falling back to a bare two-decimal
/// number for unknown codes.
pub fn format_price(amount: Decimal, currency_code: &str) -> String {
    match iso::find(currency_code) {
        Some(currency) => Money::from_decimal(amount.round_dp(2), currency).to_string(),
        None => format!("{:.2}", amount.round_dp(2)),
    }
}

pub fn format_optional_price(amount: Option<Decimal>, currency_code: &str) -> String {
    amount.map_or_else(|| MISSING.to_string(), |a| format_price(a, currency_code))
}

/// Plain decimal such as a P/E ratio, two places.
pub fn format_ratio(value: Option<Decimal>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.2}", v.round_dp(2)))
}

/// Integer with comma thousands separators.
pub fn format_volume(volume: Option<u64>) -> String {
    let Some(volume) = volume else {
        return MISSING.to_string();
    };

    let digits = volume.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_separators() {
        assert_eq!(format_volume(Some(0)), "0");
        assert_eq!(format_volume(Some(999)), "999");
        assert_eq!(format_volume(Some(1000)), "1,000");
        assert_eq!(format_volume(Some(1234567)), "1,234,567");
        assert_eq!(format_volume(None), "N/A");
    }

    #[test]
    fn test_ratio_two_places() {
        assert_eq!(format_ratio(Some(Decimal::new(2145, 2))), "21.45");
        assert_eq!(format_ratio(Some(Decimal::new(21, 0))), "21.00");
        assert_eq!(format_ratio(None), "N/A");
    }

    #[test]
    fn test_price_in_unknown_currency_falls_back_to_plain_number() {
        assert_eq!(format_price(Decimal::new(10025, 2), "???"), "100.25");
    }

    #[test]
    fn test_price_in_known_currency_keeps_amount() {
        let formatted = format_price(Decimal::new(10025, 2), "USD");
        assert!(formatted.contains("100.25"), "got {}", formatted);
    }

    #[test]
    fn test_missing_price() {
        assert_eq!(format_optional_price(None, DEFAULT_CURRENCY), "N/A");
    }

    #[test]
    fn test_day_is_iso() {
        let day = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        assert_eq!(format_day(day), "2023-06-01");
    }
}
