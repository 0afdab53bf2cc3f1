//! Money formatting and parsing.
//!
//! The backend owns the numeric truth; these helpers only turn values into
//! text for tables and read what the cashier types.

use rust_decimal::prelude::*;

/// Currency symbol used until the server configuration has loaded.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "Q";

/// Round to cents, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Two-decimal text with thousands separators, e.g. `1,234.50`.
pub fn format_amount(value: Decimal) -> String {
    let fixed = format!("{:.2}", round2(value).abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !round2(value).is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Amount with currency symbol, e.g. `Q 1,234.50`.
pub fn format_money(value: Decimal, symbol: &str) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(rest) => format!("-{} {}", symbol, rest),
        None => format!("{} {}", symbol, amount),
    }
}

/// Quantities print without decimals when whole.
pub fn format_quantity(value: Decimal) -> String {
    if value.fract().is_zero() {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", round2(value))
    }
}

/// Read an amount typed into a form field. Accepts an optional currency
/// symbol and thousands separators. Empty input is `None`.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .trim()
        .trim_start_matches(|c: char| c.is_alphabetic() || c == '$')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Like [`parse_amount`] but treats empty or invalid input as zero.
pub fn parse_amount_or_zero(input: &str) -> Decimal {
    parse_amount(input).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(Decimal::new(123450, 2)), "1,234.50");
        assert_eq!(format_amount(Decimal::new(100000000, 2)), "1,000,000.00");
        assert_eq!(format_amount(Decimal::new(5, 1)), "0.50");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_format_money_with_symbol() {
        assert_eq!(format_money(Decimal::new(4000, 2), "Q"), "Q 40.00");
        assert_eq!(format_money(Decimal::new(-1050, 2), "$"), "-$ 10.50");
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(Decimal::new(1005, 3)), "1.01");
        assert_eq!(format_amount(Decimal::new(-1, 3)), "0.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("  12.5 "), Some(Decimal::new(125, 1)));
        assert_eq!(parse_amount("Q 1,234.50"), Some(Decimal::new(123450, 2)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount_or_zero("x"), Decimal::ZERO);
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(Decimal::from(3)), "3");
        assert_eq!(format_quantity(Decimal::new(25, 1)), "2.50");
    }
}
