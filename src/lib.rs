// Receipt Processor - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod deduplication;
pub mod error;
pub mod parser;
pub mod receipt;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use deduplication::{DuplicateDetector, Fingerprint};
pub use error::ReceiptError;
pub use parser::normalize;
pub use receipt::{
    Item, NormalizedReceipt, PurchaseDate, PurchaseTime, RawItem, RawReceipt,
    ScoredReceipt, StoredReceipt, Total,
};
pub use scoring::PointsBreakdown;
pub use service::ReceiptProcessor;
pub use store::ReceiptStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
