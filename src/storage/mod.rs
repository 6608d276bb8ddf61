// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::statement::StatementRecord;
use crate::utils::error::StorageError;
use crate::utils::text_debug;
use regex::Regex;
use serde::Serialize;

const DEBUG_DIR: &str = "debug";
const JSON_INDENT: &[u8] = b"    ";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes the parsed statement as 4-space indented JSON.
    pub fn save_record(&self, record: &StatementRecord, file_name: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name);
        fs::write(&file_path, to_json_pretty(record)?)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved parsed statement to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves the raw statement text and a copy with every rule match marked,
    /// so a layout change that breaks a pattern is easy to spot.
    pub fn save_debug_text(&self, text: &str, patterns: &[(&str, &Regex)]) -> Result<PathBuf, StorageError> {
        let debug_dir = self.debug_dir()?;

        let raw_path = debug_dir.join("statement_text.txt");
        fs::write(&raw_path, text).map_err(StorageError::IoError)?;
        tracing::info!("Saved raw statement text to {}", raw_path.display());

        let highlights = text_debug::collect_highlights(text, patterns);
        tracing::debug!("{} rule matches to annotate", highlights.len());
        let annotated_path = debug_dir.join("statement_annotated.txt");
        fs::write(&annotated_path, text_debug::annotate(text, &highlights))
            .map_err(StorageError::IoError)?;
        tracing::info!("Saved annotated statement text to {}", annotated_path.display());

        Ok(annotated_path)
    }

    /// Saves a JSON summary of the extraction run next to the debug text.
    pub fn save_extraction_summary(
        &self,
        record: &StatementRecord,
        source: &Path,
        text_length: usize,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.debug_dir()?.join("extraction_summary.json");

        let summary = serde_json::json!({
            "source": source.display().to_string(),
            "text_length": text_length,
            "account_number": record.account_number,
            "statement_date": record.statement_date,
            "trade_groups": record.trades.len(),
            "trades": record.trades.trade_count(),
            "journal_entries": record.journal_entries.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        fs::write(&file_path, to_json_pretty(&summary)?)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved extraction summary to {}", file_path.display());
        Ok(file_path)
    }

    fn debug_dir(&self) -> Result<PathBuf, StorageError> {
        let dir = self.base_dir.join(DEBUG_DIR);
        fs::create_dir_all(&dir).map_err(StorageError::IoError)?;
        Ok(dir)
    }
}

/// Serializes with 4-space indentation, keeping struct field order.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, StorageError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| StorageError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{Direction, JournalEntry, Trade, TradeBook};

    fn sample_record() -> StatementRecord {
        let mut trades = TradeBook::new();
        trades.push(Trade {
            date: "6/13/5".to_string(),
            contract: "JUN 25 CME MICRO S&P".to_string(),
            direction: Direction::Buy,
            quantity: 2,
            price: 6012.25,
        });

        let mut record = StatementRecord {
            statement_date: "06/30/25".to_string(),
            account_number: "21-77310".to_string(),
            name_address: "PAT EXAMPLE, 400 LASALLE ST".to_string(),
            trades,
            gross_profit_loss: -45.00,
            journal_entries: vec![JournalEntry::cash_sweep(250.10)],
            ..Default::default()
        };
        record.fees.commission = 12.50;
        record.fees.nfa_fee = 0.06;
        record.balances.ending_balance = 12_537.84;
        record
    }

    #[test]
    fn test_json_layout() {
        let json = to_json_pretty(&sample_record()).unwrap();

        assert!(json.starts_with("{\n    \"statement_date\": \"06/30/25\",\n"), "Unexpected layout:\n{}", json);
        assert!(json.contains("\n        \"6/13/5 - JUN 25 CME MICRO S&P\": ["));
        assert!(json.contains("\"direction\": \"BUY\""));

        let order = ["statement_date", "account_number", "name_address", "trades", "fees", "gross_profit_loss", "balances", "journal_entries"];
        let positions: Vec<usize> = order
            .iter()
            .map(|key| json.find(&format!("\"{}\":", key)).expect(key))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "Fields out of order:\n{}", json);
    }

    #[test]
    fn test_record_round_trip() {
        let record = sample_record();
        let json = to_json_pretty(&record).unwrap();
        let back: StatementRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back, record);
        assert_eq!(back.fees.commission, 12.50);
        assert_eq!(back.journal_entries[0].amount, -250.10);
    }

    #[test]
    fn test_save_record_and_debug_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();
        let record = sample_record();

        let path = storage.save_record(&record, "parsed_statement.json").unwrap();
        let written: StatementRecord = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, record);

        let re = Regex::new(r"NFA FEE\s+US\s+[\d.]+-").unwrap();
        let annotated = storage.save_debug_text("NFA FEE US 0.06-\n", &[("nfa_fee", &re)]).unwrap();
        assert_eq!(fs::read_to_string(annotated).unwrap(), "[[nfa_fee>>NFA FEE US 0.06-<<nfa_fee]]\n");
        assert!(dir.path().join("out/debug/statement_text.txt").exists());

        let summary_path = storage.save_extraction_summary(&record, Path::new("document.pdf"), 42).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&fs::read_to_string(summary_path).unwrap()).unwrap();
        assert_eq!(summary["trades"], 1);
        assert_eq!(summary["text_length"], 42);
        assert_eq!(summary["source"], "document.pdf");
    }
}
