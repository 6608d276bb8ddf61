// src/extractors/statement.rs
use crate::extractors::{header, journal, summary, trades};
use crate::statement::StatementRecord;
use crate::utils::error::ExtractError;
use regex::Regex;

/// Runs every field extraction over one statement's text.
///
/// Sections are independent: a section missing from the text leaves its fields
/// at their zero value and never fails the record. The only error is a matched
/// number that does not convert.
#[derive(Debug, Default)]
pub struct StatementExtractor;

impl StatementExtractor {
    pub fn new() -> Self { Self {} }

    pub fn extract(&self, text: &str) -> Result<StatementRecord, ExtractError> {
        tracing::info!("Extracting statement fields from {} bytes of text", text.len());

        let header = header::extract_header(text);
        let record = StatementRecord {
            statement_date: header.statement_date,
            account_number: header.account_number,
            name_address: header.name_address,
            trades: trades::extract_trades(text)?,
            fees: summary::extract_fees(text)?,
            gross_profit_loss: summary::extract_gross_profit_loss(text)?,
            balances: summary::extract_balances(text)?,
            journal_entries: journal::extract_journal_entries(text)?,
        };

        tracing::info!(
            "Extracted {} trades ({} groups), {} journal entries for account '{}'",
            record.trades.trade_count(),
            record.trades.len(),
            record.journal_entries.len(),
            record.account_number
        );
        Ok(record)
    }

    /// Every named field pattern, in extraction order. Used to annotate the
    /// statement text when debugging layout drift.
    pub fn rule_patterns(&self) -> Vec<(&'static str, &'static Regex)> {
        let mut patterns = header::patterns();
        patterns.extend(trades::patterns());
        patterns.extend(summary::patterns());
        patterns.extend(journal::patterns());
        patterns
    }
}
