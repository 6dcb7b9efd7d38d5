use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::core::numeric::finite_or_zero;

/// Currencies the dashboard renders, with their display precision rules.
///
/// Unknown ISO 4217 codes fall back to USD-shaped formatting rather than
/// failing; a bad currency code must never take down a totals preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    /// US Dollar (2 decimal places)
    #[default]
    Usd,
    /// Euro (2 decimal places)
    Eur,
    /// British Pound (2 decimal places)
    Gbp,
    /// Japanese Yen (no decimal places)
    Jpy,
    /// Canadian Dollar (2 decimal places)
    Cad,
    /// Australian Dollar (2 decimal places)
    Aud,
}

/// Display style for formatted amounts.
///
/// Summary cards render whole currency units; line items and totals render
/// the full currency scale. The split is intentional and preserved per call
/// site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    /// Zero fractional digits (dashboard summary cards)
    Summary,
    /// Full currency scale (line items, invoice totals)
    Detail,
}

impl Currency {
    /// Resolve an ISO 4217 code, falling back to USD-shaped formatting for
    /// anything unrecognized. Never fails.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "JPY" => Currency::Jpy,
            "CAD" => Currency::Cad,
            "AUD" => Currency::Aud,
            _ => Currency::Usd,
        }
    }

    /// ISO 4217 code for serialization
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
        }
    }

    /// Returns the decimal scale for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// Symbol prefix used in formatted output
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "\u{20ac}",
            Currency::Gbp => "\u{a3}",
            Currency::Jpy => "\u{a5}",
            Currency::Cad => "CA$",
            Currency::Aud => "A$",
        }
    }

    /// Format an amount for display, e.g. `$1,234.50` or `-$1,235`.
    ///
    /// This is the only rounding point in the engine: the f64 amount is
    /// carried unrounded through every calculation and rounded here to the
    /// style's precision, half away from zero to match the client's
    /// `Intl.NumberFormat` output. Non-finite amounts render as zero.
    pub fn format(&self, amount: f64, style: FormatStyle) -> String {
        let dp = match style {
            FormatStyle::Summary => 0,
            FormatStyle::Detail => self.scale(),
        };

        let value = Decimal::from_f64(finite_or_zero(amount))
            .unwrap_or(Decimal::ZERO)
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);

        let negative = value.is_sign_negative() && !value.is_zero();
        let rendered = format!("{:.prec$}", value.abs(), prec = dp as usize);
        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (rendered.as_str(), None),
        };

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(self.symbol());
        out.push_str(&group_thousands(int_part));
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

/// Insert comma separators into a plain digit string ("1234567" -> "1,234,567")
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Currency::from_code(s))
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Currency::from_code(&code))
    }
}
