// 2.0 numeric.rs: fixed-point helpers. everything is scaled integer math, no floats anywhere.
// 2.1 amounts are token units scaled by 10^decimals, prices by 10^8, factors by 10^18.
// 2.2 MAX_UINT256 is a request sentinel ("use everything available"), never an operand.

use num_bigint::BigUint;
use num_traits::{CheckedSub, One, Zero};

/// Scale exponent for fractional factors (collateral factors, safety margins).
pub const FACTOR_DECIMALS: u32 = 18;

/// Scale exponent for USD prices. price * 10^8 represents dollars.
pub const PRICE_DECIMALS: u32 = 8;

/// Fraction digits shown in user-facing amount messages.
pub const DISPLAY_DECIMALS: u32 = 4;

pub fn pow10(exp: u32) -> BigUint {
    num_traits::pow(BigUint::from(10u32), exp as usize)
}

pub fn factor_scale() -> BigUint {
    pow10(FACTOR_DECIMALS)
}

pub fn price_scale() -> BigUint {
    pow10(PRICE_DECIMALS)
}

/// 2^256 - 1. The wire sentinel for "use the entire available balance".
pub fn max_uint256() -> BigUint {
    (BigUint::one() << 256u32) - BigUint::one()
}

/// floor(amount * factor / 10^18). Truncating by contract: a safety margin
/// must never round an offered maximum upward.
pub fn take_percentage(amount: &BigUint, factor_scaled: &BigUint) -> BigUint {
    (amount * factor_scaled) / factor_scale()
}

/// a - b, floored at zero.
pub fn saturating_sub(a: &BigUint, b: &BigUint) -> BigUint {
    a.checked_sub(b).unwrap_or_default()
}

/// USD value (price-scaled) of `amount` token units.
pub fn token_value(amount: &BigUint, price_scaled: &BigUint, decimals: u32) -> BigUint {
    (amount * price_scaled) / pow10(decimals)
}

/// Inverse of `token_value`: token units purchasable for a price-scaled USD value.
/// A zero price yields zero rather than dividing by it.
pub fn value_to_tokens(value: &BigUint, price_scaled: &BigUint, decimals: u32) -> BigUint {
    if price_scaled.is_zero() {
        return BigUint::zero();
    }
    (value * pow10(decimals)) / price_scaled
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountParseError {
    #[error("empty amount")]
    Empty,

    #[error("invalid character `{0}` in amount")]
    InvalidCharacter(char),

    #[error("more than one decimal point")]
    MultipleDecimalPoints,
}

// 2.3: human input -> scaled units. pure string manipulation: split on the
// decimal point, pad or truncate the fraction to `decimals`, recombine.
// grouping separators (comma, underscore) are accepted in the whole part only.
pub fn parse_units(text: &str, decimals: u32) -> Result<BigUint, AmountParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AmountParseError::Empty);
    }

    let mut parts = trimmed.splitn(3, '.');
    let whole_raw = parts.next().unwrap_or("");
    let fraction_raw = parts.next().unwrap_or("");
    if parts.next().is_some() {
        return Err(AmountParseError::MultipleDecimalPoints);
    }

    let mut whole_digits = String::with_capacity(whole_raw.len());
    for c in whole_raw.chars() {
        match c {
            '0'..='9' => whole_digits.push(c),
            ',' | '_' => {}
            other => return Err(AmountParseError::InvalidCharacter(other)),
        }
    }

    let mut fraction_digits = String::with_capacity(decimals as usize);
    for c in fraction_raw.chars() {
        match c {
            '0'..='9' => fraction_digits.push(c),
            other => return Err(AmountParseError::InvalidCharacter(other)),
        }
    }

    if whole_digits.is_empty() && fraction_digits.is_empty() {
        return Err(AmountParseError::Empty);
    }

    // pad or truncate the fraction to exactly `decimals` digits
    fraction_digits.truncate(decimals as usize);
    while fraction_digits.len() < decimals as usize {
        fraction_digits.push('0');
    }

    let whole = parse_digits(&whole_digits);
    let fraction = parse_digits(&fraction_digits);

    Ok(whole * pow10(decimals) + fraction)
}

fn parse_digits(digits: &str) -> BigUint {
    if digits.is_empty() {
        return BigUint::zero();
    }
    // only ascii digits reach here
    digits.parse::<BigUint>().unwrap_or_default()
}

/// Canonical full-precision rendering. Round-trips losslessly through
/// `parse_units` at the same `decimals`.
pub fn format_units(amount: &BigUint, decimals: u32) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let scale = pow10(decimals);
    let whole = amount / &scale;
    let fraction = amount % &scale;
    format!(
        "{}.{:0>width$}",
        whole,
        fraction.to_string(),
        width = decimals as usize
    )
}

/// User-facing rendering: comma-grouped whole part, fixed fraction width.
/// format_units_display(1_000_000_000, 6, 4) == "1,000.0000"
pub fn format_units_display(amount: &BigUint, decimals: u32, display_decimals: u32) -> String {
    let scale = pow10(decimals);
    let whole = amount / &scale;
    let grouped = group_thousands(&whole.to_string());
    if display_decimals == 0 {
        return grouped;
    }

    let fraction = amount % &scale;
    let mut fraction_digits = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    fraction_digits.truncate(display_decimals as usize);
    while fraction_digits.len() < display_decimals as usize {
        fraction_digits.push('0');
    }
    format!("{grouped}.{fraction_digits}")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_percentage_floors() {
        // 95% of 100 = 95
        let ninety_five = BigUint::from(95u32) * pow10(16);
        assert_eq!(
            take_percentage(&BigUint::from(100u32), &ninety_five),
            BigUint::from(95u32)
        );
        // 95% of 1 floors to 0
        assert_eq!(
            take_percentage(&BigUint::from(1u32), &ninety_five),
            BigUint::zero()
        );
    }

    #[test]
    fn take_percentage_handles_uint256_range() {
        let full = factor_scale();
        assert_eq!(take_percentage(&max_uint256(), &full), max_uint256());
    }

    #[test]
    fn max_uint256_is_256_ones() {
        assert_eq!(max_uint256().bits(), 256);
        assert_eq!((max_uint256() + BigUint::one()).bits(), 257);
    }

    #[test]
    fn parse_plain_amount() {
        assert_eq!(parse_units("1234.56", 6).unwrap(), BigUint::from(1_234_560_000u64));
    }

    #[test]
    fn parse_grouped_amount() {
        assert_eq!(parse_units("1,234.56", 6).unwrap(), BigUint::from(1_234_560_000u64));
        assert_eq!(parse_units("1_000", 2).unwrap(), BigUint::from(100_000u32));
    }

    #[test]
    fn parse_fraction_only() {
        assert_eq!(parse_units(".5", 6).unwrap(), BigUint::from(500_000u32));
    }

    #[test]
    fn parse_truncates_excess_fraction_digits() {
        assert_eq!(parse_units("0.1234567", 6).unwrap(), BigUint::from(123_456u32));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_units("", 6), Err(AmountParseError::Empty));
        assert_eq!(parse_units("  . ", 6), Err(AmountParseError::Empty));
        assert_eq!(
            parse_units("12a", 6),
            Err(AmountParseError::InvalidCharacter('a'))
        );
        assert_eq!(
            parse_units("1.2.3", 6),
            Err(AmountParseError::MultipleDecimalPoints)
        );
        // grouping separators are not digits inside the fraction
        assert_eq!(
            parse_units("1.2,3", 6),
            Err(AmountParseError::InvalidCharacter(','))
        );
    }

    #[test]
    fn format_round_trips() {
        let amount = BigUint::from(1_234_560_001u64);
        let rendered = format_units(&amount, 6);
        assert_eq!(rendered, "1234.560001");
        assert_eq!(parse_units(&rendered, 6).unwrap(), amount);
    }

    #[test]
    fn format_zero_decimals() {
        assert_eq!(format_units(&BigUint::from(42u32), 0), "42");
    }

    #[test]
    fn display_formatting_groups_and_pads() {
        assert_eq!(
            format_units_display(&BigUint::from(1_000_000_000u64), 6, 4),
            "1,000.0000"
        );
        assert_eq!(
            format_units_display(&BigUint::from(1_234_567_891_234u64), 6, 4),
            "1,234,567.8912"
        );
        assert_eq!(format_units_display(&BigUint::from(999u32), 6, 4), "0.0009");
        assert_eq!(format_units_display(&BigUint::from(12_345u32), 2, 0), "123");
    }

    #[test]
    fn value_conversions() {
        // 1.5 tokens at $2,000 (8dp price) with 18 token decimals
        let amount = BigUint::from(15u32) * pow10(17);
        let price = BigUint::from(2_000u32) * price_scale();
        let value = token_value(&amount, &price, 18);
        assert_eq!(value, BigUint::from(3_000u32) * price_scale());
        assert_eq!(value_to_tokens(&value, &price, 18), amount);
    }

    #[test]
    fn zero_price_never_divides() {
        assert_eq!(
            value_to_tokens(&BigUint::from(1u32), &BigUint::zero(), 18),
            BigUint::zero()
        );
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        let a = BigUint::from(5u32);
        let b = BigUint::from(9u32);
        assert_eq!(saturating_sub(&a, &b), BigUint::zero());
        assert_eq!(saturating_sub(&b, &a), BigUint::from(4u32));
    }
}
