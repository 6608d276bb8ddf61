// src/extractors/rules.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use regex::{Match, Regex};

// --- Shared Pattern Fragments ---
/// Unsigned amount as printed on the statement, thousands separators allowed.
pub const AMOUNT: &str = r"\d[\d,]*(?:\.\d+)?";

// --- Converters ---

/// Converts a captured amount to `f64`.
///
/// Commas are stripped. A leading or trailing minus (the statement prints
/// debits as `12.50-`) makes the value negative.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<f64, ExtractError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let leading = cleaned.strip_prefix('-');
    let unsigned = leading.unwrap_or(cleaned.as_str());
    let trailing = unsigned.strip_suffix('-');
    let negative = leading.is_some() || trailing.is_some();
    let digits = trailing.unwrap_or(unsigned);

    digits
        .parse::<f64>()
        .map(|v| if negative { -v } else { v })
        .map_err(|_| ExtractError::InvalidNumber { field, value: raw.to_string() })
}

/// Converts an optional quantity capture; a missing or blank group counts as 0.
pub fn parse_quantity(field: &'static str, capture: Option<Match<'_>>) -> Result<u32, ExtractError> {
    let raw = capture.map(|m| m.as_str().trim()).unwrap_or_default();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>()
        .map_err(|_| ExtractError::InvalidNumber { field, value: raw.to_string() })
}

// --- Named Rules ---

/// One labelled amount on the statement: the field it fills, the pattern that
/// finds it (capture group 1 holds the number) and where the value goes.
pub struct AmountRule<T> {
    pub field: &'static str,
    pub regex: Regex,
    assign: fn(&mut T, f64),
}

impl<T> AmountRule<T> {
    pub fn new(field: &'static str, pattern: &str, assign: fn(&mut T, f64)) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("Failed to compile rule for {}: {}", field, e));
        Self { field, regex, assign }
    }

    /// Applies the first match to `target`. Returns whether the rule matched;
    /// a miss leaves `target` untouched.
    pub fn apply(&self, text: &str, target: &mut T) -> Result<bool, ExtractError> {
        let Some(caps) = self.regex.captures(text) else {
            tracing::debug!("No match for '{}', keeping default", self.field);
            return Ok(false);
        };

        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let value = parse_amount(self.field, raw)?;
        tracing::trace!("Rule '{}' matched '{}' -> {}", self.field, raw, value);
        (self.assign)(target, value);
        Ok(true)
    }
}

/// Applies every rule in order onto a default-initialized target.
pub fn apply_all<T: Default>(rules: &[AmountRule<T>], text: &str) -> Result<T, ExtractError> {
    let mut target = T::default();
    for rule in rules {
        rule.apply(text, &mut target)?;
    }
    Ok(target)
}
