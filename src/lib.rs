//! A Rust library for loading, normalizing and filtering the Cultura Viva
//! survey base, with column resolution over its unstable schema and
//! text-to-filter interpretation via an external generative model.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod interpret;
pub mod model;
pub mod prepare;
pub mod report;
pub mod schema;
pub mod text;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::BaseReaderConfig;
pub use error::{BaseReaderError, Result};
pub use prepare::{BaseCache, load_base, prepare_base};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Filtering capabilities
pub use catalog::{ActionOption, FilterCatalog};
pub use filter::{Criterion, FilterSet, apply_criteria, apply_filter_set};

// Text-to-filter interpretation
pub use interpret::{InterpretStatus, Outcome, interpret};

// Session summary
pub use report::{ActiveFilter, SelectionSummary};
