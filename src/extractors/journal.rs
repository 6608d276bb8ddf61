// src/extractors/journal.rs
use crate::extractors::rules::{parse_amount, AMOUNT};
use crate::statement::models::CASH_SWEEP_DESCRIPTION;
use crate::statement::JournalEntry;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// JOURNAL DESCRIPTION header line, then the dated entry line. Only cash sweeps
// are recognized; other descriptions never match.
static CASH_SWEEP_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        concat!(
            r"JOURNAL DESCRIPTION\s+.*?\n",
            r"\s*\d+/\d+/\d+\s+US\s+.*?{description}\s+US\s+",
            r"({amount})-",
        ),
        description = regex::escape(CASH_SWEEP_DESCRIPTION),
        amount = AMOUNT
    );
    Regex::new(&pattern).expect("Failed to compile CASH_SWEEP_RE")
});

pub fn extract_journal_entries(text: &str) -> Result<Vec<JournalEntry>, ExtractError> {
    let entries = CASH_SWEEP_RE
        .captures_iter(text)
        .map(|caps| parse_amount("journal_amount", &caps[1]).map(JournalEntry::cash_sweep))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Found {} cash sweep journal entries", entries.len());
    Ok(entries)
}

pub(crate) fn patterns() -> Vec<(&'static str, &'static Regex)> {
    vec![("journal_entry", Lazy::force(&CASH_SWEEP_RE))]
}
