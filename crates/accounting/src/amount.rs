//! Lenient parsing of user-typed currency amounts.
//!
//! Amount fields are edited live, so half-typed input ("12.", "-", "1,5") must
//! never fail: whatever leading number can be read is used, anything else is zero.

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Two values closer than this are considered equal (one cent of a
/// two-decimal currency).
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest exponent magnitude worth handing to the decimal parser; anything
/// beyond it cannot be represented and reads as zero.
const MAX_EXPONENT: i64 = 56;

/// Parse the leading decimal number of `raw`, or zero if there is none.
///
/// Accepts an optional sign, integer digits, a fractional part and an
/// exponent (`1e3`, `2.5E-1`), stopping at the first character that cannot
/// continue the number (`"12.50 EUR"` reads as `12.50`, `"1e"` as `1`).
pub fn parse_amount(raw: &str) -> Decimal {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    pos = skip_digits(bytes, pos);
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        pos = skip_digits(bytes, frac_start);
        frac_part = &s[frac_start..pos];
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return Decimal::ZERO;
    }

    let mut mantissa = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        mantissa.push('-');
    }
    mantissa.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        mantissa.push('.');
        mantissa.push_str(frac_part);
    }

    // Out-of-range input (more than 28 significant digits, huge exponents)
    // degrades to zero.
    match exponent(s, pos) {
        None => Decimal::from_str(&mantissa).unwrap_or(Decimal::ZERO),
        Some(exp) if exp.abs() > MAX_EXPONENT => Decimal::ZERO,
        Some(exp) => Decimal::from_scientific(&format!("{mantissa}e{exp}")).unwrap_or(Decimal::ZERO),
    }
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// Exponent starting at `pos` (`e`/`E`, optional sign, at least one digit).
fn exponent(s: &str, pos: usize) -> Option<i64> {
    let bytes = s.as_bytes();
    if !matches!(bytes.get(pos), Some(b'e' | b'E')) {
        return None;
    }
    let mut start = pos + 1;
    let negative = match bytes.get(start) {
        Some(b'-') => {
            start += 1;
            true
        }
        Some(b'+') => {
            start += 1;
            false
        }
        _ => false,
    };
    let end = skip_digits(bytes, start);
    if end == start {
        return None;
    }
    // Saturate instead of overflowing on absurdly long exponents.
    let magnitude = s[start..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// True when `raw` reads as a strictly positive amount.
pub fn is_positive(raw: &str) -> bool {
    parse_amount(raw) > Decimal::ZERO
}

/// Format an amount with exactly two decimals, rounding half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// True when two totals differ by less than [`BALANCE_TOLERANCE`].
///
/// A difference too large to represent is never within tolerance.
pub fn within_tolerance(a: Decimal, b: Decimal) -> bool {
    a.checked_sub(b)
        .is_some_and(|diff| diff.abs() < BALANCE_TOLERANCE)
}

/// Sum of `amounts`, or `None` if it leaves the representable range.
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
}
