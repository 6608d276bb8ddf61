// src/statement/models.rs
#![allow(dead_code)]
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Description carried by every recognized journal entry.
pub const CASH_SWEEP_DESCRIPTION: &str = "Futures Cash Sweep";

/// Everything pulled out of one statement. Field order is the JSON field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    pub statement_date: String,
    pub account_number: String,
    pub name_address: String,
    pub trades: TradeBook,
    pub fees: Fees,
    pub gross_profit_loss: f64,
    pub balances: Balances,
    pub journal_entries: Vec<JournalEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub date: String, // As printed, e.g. "6/13/5"
    pub contract: String,
    pub direction: Direction,
    pub quantity: u32,
    pub price: f64,
}

impl Trade {
    /// Bucket key used by [`TradeBook`]: `"{date} - {contract}"`.
    pub fn group_key(&self) -> String {
        format!("{} - {}", self.date, self.contract)
    }
}

/// Fees are stored as positive magnitudes even though the statement prints them as debits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fees {
    pub commission: f64,
    pub exchange_fee: f64,
    pub nfa_fee: f64,
    pub total_fees: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    pub beginning_balance: f64,
    pub ending_balance: f64,
    pub total_equity: f64,
    pub account_value: f64,
    pub excess_equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub description: String,
    pub amount: f64, // Debit, never positive
}

impl JournalEntry {
    pub fn cash_sweep(magnitude: f64) -> Self {
        Self {
            description: CASH_SWEEP_DESCRIPTION.to_string(),
            amount: -magnitude,
        }
    }
}

/// Trades bucketed by `"{date} - {contract}"`.
///
/// Buckets keep the order in which their key first appeared in the statement,
/// and trades keep text order inside a bucket. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeBook {
    groups: Vec<(String, Vec<Trade>)>,
}

impl TradeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the trade to its bucket, opening a new bucket for an unseen key.
    pub fn push(&mut self, trade: Trade) {
        let key = trade.group_key();
        match self.groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, trades)) => trades.push(trade),
            None => self.groups.push((key, vec![trade])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[Trade]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, trades)| trades.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn trade_count(&self) -> usize {
        self.groups.iter().map(|(_, trades)| trades.len()).sum()
    }
}

impl Serialize for TradeBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, trades) in &self.groups {
            map.serialize_entry(key, trades)?;
        }
        map.end()
    }
}

struct TradeBookVisitor;

impl<'de> Visitor<'de> for TradeBookVisitor {
    type Value = TradeBook;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of trade group keys to trade lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TradeBook, A::Error> {
        let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, trades)) = access.next_entry::<String, Vec<Trade>>()? {
            groups.push((key, trades));
        }
        Ok(TradeBook { groups })
    }
}

impl<'de> Deserialize<'de> for TradeBook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TradeBookVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(date: &str, direction: Direction, quantity: u32, price: f64) -> Trade {
        Trade {
            date: date.to_string(),
            contract: "JUN 25 CME MICRO S&P".to_string(),
            direction,
            quantity,
            price,
        }
    }

    #[test]
    fn test_trade_book_groups_recurring_keys() {
        let mut book = TradeBook::new();
        book.push(trade("6/3/5", Direction::Buy, 1, 5300.25));
        book.push(trade("6/4/5", Direction::Sell, 2, 5310.00));
        book.push(trade("6/3/5", Direction::Sell, 1, 5301.50));

        assert_eq!(book.len(), 2);
        assert_eq!(book.trade_count(), 3);
        let keys: Vec<&str> = book.keys().collect();
        assert_eq!(keys, ["6/3/5 - JUN 25 CME MICRO S&P", "6/4/5 - JUN 25 CME MICRO S&P"]);

        let first = book.get("6/3/5 - JUN 25 CME MICRO S&P").unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].price, 5300.25);
        assert_eq!(first[1].price, 5301.50);
    }

    #[test]
    fn test_direction_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Direction::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&Direction::Sell).unwrap(), "\"SELL\"");
    }

    #[test]
    fn test_trade_book_key_order_survives_json() {
        let mut book = TradeBook::new();
        book.push(trade("6/9/5", Direction::Buy, 1, 5400.0));
        book.push(trade("6/2/5", Direction::Buy, 1, 5200.0));

        let json = serde_json::to_string(&book).unwrap();
        assert!(json.find("6/9/5").unwrap() < json.find("6/2/5").unwrap(), "Keys should keep insertion order: {}", json);

        let back: TradeBook = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_cash_sweep_is_a_debit() {
        let entry = JournalEntry::cash_sweep(500.0);
        assert_eq!(entry.description, "Futures Cash Sweep");
        assert_eq!(entry.amount, -500.0);
    }
}
