// src/extractors/mod.rs
pub mod decode;
pub mod models;
pub mod table;

// Re-export key extraction types for convenience
pub use table::{ExtractOptions, ShortRowPolicy, TableExtractor};
