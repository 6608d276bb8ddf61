// src/statement/mod.rs
pub mod models;

pub use models::{
    Balances, Direction, Fees, JournalEntry, StatementRecord, Trade, TradeBook,
};
