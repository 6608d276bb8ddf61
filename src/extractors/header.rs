// src/extractors/header.rs
use once_cell::sync::Lazy;
use regex::Regex;

// Name, street, city/state/zip and an optional country line
const NAME_ADDRESS_MAX_LINES: usize = 4;

// The name/address block starts right after the account number and runs over
// following non-blank lines.
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        concat!(
            r"STATEMENT DATE:\s+(?P<date>.*?)\s+",
            r"GMI ACCOUNT NUMBER:\s+(?P<account>.*?)\s+",
            r"(?P<block>[^\n]+(?:\n[^\S\n]*\S[^\n]*){{0,{extra}}})",
        ),
        extra = NAME_ADDRESS_MAX_LINES - 1
    );
    Regex::new(&pattern).expect("Failed to compile HEADER_RE")
});

/// Account identification printed at the top of the statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementHeader {
    pub statement_date: String,
    pub account_number: String,
    pub name_address: String,
}

/// Finds the first header block. Missing header yields empty strings.
pub fn extract_header(text: &str) -> StatementHeader {
    let Some(caps) = HEADER_RE.captures(text) else {
        tracing::warn!("Statement header not found, account fields left empty");
        return StatementHeader::default();
    };

    let header = StatementHeader {
        statement_date: caps["date"].trim().to_string(),
        account_number: caps["account"].trim().to_string(),
        name_address: flatten_block(&caps["block"]),
    };
    tracing::debug!(
        "Header: date '{}', account '{}'",
        header.statement_date,
        header.account_number
    );
    header
}

/// Joins the trimmed non-empty lines of a multi-line block with ", ".
fn flatten_block(block: &str) -> String {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn patterns() -> Vec<(&'static str, &'static Regex)> {
    vec![("header", Lazy::force(&HEADER_RE))]
}
