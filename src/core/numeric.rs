//! Lenient numeric coercion for form-originated input.
//!
//! Dashboard forms send numbers as JSON numbers or as raw strings, and a
//! half-typed field must never break a totals preview. Every numeric
//! boundary goes through [`parse_numeric_or_zero`] so the coercion contract
//! is explicit and testable instead of buried in ad-hoc parsing.

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

/// Coerce a string to a number the way the dashboard client does:
/// parse the longest leading numeric prefix, and fall back to 0 when no
/// valid number is found or the result is not finite.
pub fn parse_numeric_or_zero(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let prefix_len = numeric_prefix_len(trimmed);
    if prefix_len == 0 {
        return 0.0;
    }

    match trimmed[..prefix_len].parse::<f64>() {
        Ok(value) => finite_or_zero(value),
        Err(_) => 0.0,
    }
}

/// Replace NaN and infinities with 0 so multiplication stays well-behaved.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Length of the longest prefix of `s` that parses as a float literal:
/// optional sign, digits with at most one decimal point, optional exponent.
/// Returns 0 when the prefix contains no digits.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    let mut digits = 0;
    let mut seen_dot = false;
    while pos < bytes.len() {
        match bytes[pos] {
            b'0'..=b'9' => {
                digits += 1;
                pos += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                pos += 1;
            }
            _ => break,
        }
    }

    if digits == 0 {
        return 0;
    }

    // Exponent only counts when it is actually followed by digits,
    // so "1e" parses as 1 rather than failing outright.
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp_pos = pos + 1;
        if exp_pos < bytes.len() && matches!(bytes[exp_pos], b'+' | b'-') {
            exp_pos += 1;
        }
        let exp_digits_start = exp_pos;
        while exp_pos < bytes.len() && bytes[exp_pos].is_ascii_digit() {
            exp_pos += 1;
        }
        if exp_pos > exp_digits_start {
            pos = exp_pos;
        }
    }

    pos
}

struct NumericOrZeroVisitor;

impl<'de> Visitor<'de> for NumericOrZeroVisitor {
    type Value = f64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string, or null")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
        Ok(finite_or_zero(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
        Ok(parse_numeric_or_zero(value))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(NumericOrZeroVisitor)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<f64, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(0.0)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<f64, A::Error> {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(0.0)
    }
}

/// Deserialize a numeric field leniently: numbers pass through, strings go
/// through [`parse_numeric_or_zero`], null/absent/garbage become 0.
pub fn numeric_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(NumericOrZeroVisitor)
}

/// Option-wrapped variant for patch fields: an absent field stays `None`,
/// a present field is coerced like [`numeric_or_zero`].
pub fn opt_numeric_or_zero<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "numeric_or_zero")] f64);

    let wrapped = Option::<Wrapper>::deserialize(deserializer)?;
    Ok(wrapped.map(|Wrapper(value)| value))
}
