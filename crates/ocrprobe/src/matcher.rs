//! Locale-tolerant matching of decimal numbers in OCR output.
//!
//! OCR engines render the decimal separator according to whatever they think
//! the glyph is, so `123.45` may come back as `123,45`. An [`ExpectedDecimal`]
//! compiles to a pattern that accepts either separator and nothing else.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AssertionError;

/// Most fractional digits an expected value may carry.
pub const MAX_FRACTION_DIGITS: usize = 2;

const DECIMAL_PATTERN: &str = r"^(-?)([0-9]+)(?:[.,]([0-9]+))?$";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecimalParseError {
    #[error("'{0}' is not a decimal number")]
    Malformed(String),

    #[error("'{value}' has {digits} fractional digits, at most 2 are supported")]
    TooPrecise { value: String, digits: usize },
}

/// A decimal numeral the OCR output is expected to contain.
#[derive(Debug, Clone)]
pub struct ExpectedDecimal {
    negative: bool,
    integer: String,
    fraction: Option<String>,
    pattern: Regex,
}

impl ExpectedDecimal {
    pub fn parse(value: &str) -> Result<Self, DecimalParseError> {
        let trimmed = value.trim();
        let shape = Regex::new(DECIMAL_PATTERN)
            .map_err(|_| DecimalParseError::Malformed(trimmed.to_string()))?;
        let caps = shape
            .captures(trimmed)
            .ok_or_else(|| DecimalParseError::Malformed(trimmed.to_string()))?;

        let negative = !caps[1].is_empty();
        let integer = caps[2].to_string();
        let fraction = caps.get(3).map(|m| m.as_str().to_string());

        if let Some(ref digits) = fraction {
            if digits.len() > MAX_FRACTION_DIGITS {
                return Err(DecimalParseError::TooPrecise {
                    value: trimmed.to_string(),
                    digits: digits.len(),
                });
            }
        }

        let pattern = build_pattern(negative, &integer, fraction.as_deref())
            .map_err(|_| DecimalParseError::Malformed(trimmed.to_string()))?;

        Ok(Self {
            negative,
            integer,
            fraction,
            pattern,
        })
    }

    /// Builds the value `units / 100` rendered with two fractional digits.
    pub fn from_hundredths(units: i64) -> Result<Self, DecimalParseError> {
        let sign = if units < 0 { "-" } else { "" };
        let magnitude = units.unsigned_abs();
        Self::parse(&format!("{}{}.{:02}", sign, magnitude / 100, magnitude % 100))
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// First occurrence of the numeral anywhere in `text`.
    pub fn find_in(&self, text: &str) -> Option<DecimalMatch> {
        let found = self.pattern.find(text)?;
        let matched = found.as_str().to_string();
        let separator = self
            .fraction
            .as_ref()
            .and_then(|_| matched.chars().find(|c| *c == '.' || *c == ','));

        Some(DecimalMatch {
            matched,
            separator,
            start: found.start(),
            end: found.end(),
        })
    }
}

fn build_pattern(
    negative: bool,
    integer: &str,
    fraction: Option<&str>,
) -> Result<Regex, regex::Error> {
    let mut pattern = String::new();
    if negative {
        pattern.push_str(&regex::escape("-"));
    }
    pattern.push_str(&regex::escape(integer));
    if let Some(fraction) = fraction {
        pattern.push_str("[.,]");
        pattern.push_str(&regex::escape(fraction));
    }
    Regex::new(&pattern)
}

impl fmt::Display for ExpectedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.integer)?;
        if let Some(ref fraction) = self.fraction {
            write!(f, ".{}", fraction)?;
        }
        Ok(())
    }
}

impl FromStr for ExpectedDecimal {
    type Err = DecimalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for ExpectedDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.negative == other.negative
            && self.integer == other.integer
            && self.fraction == other.fraction
    }
}

impl Eq for ExpectedDecimal {}

impl Serialize for ExpectedDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExpectedDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Where and how the expected numeral showed up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalMatch {
    pub matched: String,
    /// `None` for integers.
    pub separator: Option<char>,
    pub start: usize,
    pub end: usize,
}

pub fn assert_decimal_present(
    ocr_text: &str,
    expected: &ExpectedDecimal,
) -> Result<DecimalMatch, AssertionError> {
    expected
        .find_in(ocr_text)
        .ok_or_else(|| AssertionError::NotFound {
            expected: expected.to_string(),
            ocr_text: ocr_text.to_string(),
        })
}
