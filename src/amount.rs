//! Extraction of a decimal amount from free-form registry text.

use crate::error::{Error, Result};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d[\d,]*\.\d+").expect("amount regex is valid"))
}

/// Pull the first decimal amount out of surrounding currency text.
///
/// The registry renders cash amounts inside free-form labels such as
/// `"Cash Amount: $1,234.56 (estimated)"`. The first substring shaped like
/// a decimal number (optional thousands commas, mandatory fractional part)
/// is taken and its commas stripped. Fails with [`Error::AmountParse`] when
/// no such substring exists.
pub fn parse_amount(text: &str) -> Result<Decimal> {
    let matched = amount_pattern()
        .find(text)
        .ok_or_else(|| Error::AmountParse(text.to_string()))?;
    let digits = matched.as_str().replace(',', "");
    Decimal::from_str(&digits).map_err(|_| Error::AmountParse(text.to_string()))
}
