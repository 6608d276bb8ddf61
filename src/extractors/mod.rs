// src/extractors/mod.rs
pub mod header;
pub mod journal;
pub mod rules;
pub mod statement;
pub mod summary;
pub mod trades;

// Re-export key extraction types for convenience
pub use statement::StatementExtractor;
