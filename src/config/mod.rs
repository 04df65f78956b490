//! Configuration for the survey base reader.

use std::time::Duration;

/// Configuration for loading, preparing and interpreting the survey base
#[derive(Debug, Clone)]
pub struct BaseReaderConfig {
    /// Cache-busting tag for the prepared base; bump to force recomputation
    pub cache_version: String,
    /// Batch size used when decoding the CSV
    pub batch_size: usize,
    /// Minimum number of occurrences for a language to enter the catalog
    pub min_language_count: usize,
    /// Maximum enumeration size embedded in the dynamic response schema
    pub max_enum_items: usize,
    /// Generative model used by the text-to-filter interpreter
    pub model: String,
    /// Client-side timeout for the interpreter's network call
    pub request_timeout: Duration,
    /// Environment variable holding the generative-model API key
    pub api_key_env: String,
    /// Base URL of the generative-model API
    pub api_base_url: String,
}

impl Default for BaseReaderConfig {
    fn default() -> Self {
        Self {
            cache_version: "v2".to_string(),
            batch_size: 8192,
            min_language_count: 10,
            max_enum_items: 250,
            model: "gemini-3-flash-preview".to_string(),
            request_timeout: Duration::from_secs(60),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}
