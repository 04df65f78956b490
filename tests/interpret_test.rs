use cultura_base::{BaseReaderConfig, FilterCatalog, InterpretStatus, interpret};

/// Blank input short-circuits to `invalida` before any network traffic
#[tokio::test]
async fn blank_request_is_invalid_without_network() {
    let catalog = FilterCatalog::default();
    let config = BaseReaderConfig::default();

    let outcome = interpret("   ", &catalog, &config).await;

    assert_eq!(outcome.status, InterpretStatus::Invalid);
    assert!(outcome.filters.is_empty());
    assert_eq!(outcome.model_used, None);
}

/// A missing API key is a descriptive error, reported before any call
#[tokio::test]
async fn missing_api_key_is_reported_as_error() {
    let catalog = FilterCatalog::default();
    let config = BaseReaderConfig {
        api_key_env: "CULTURA_BASE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        ..BaseReaderConfig::default()
    };

    let outcome = interpret("pontões da Bahia", &catalog, &config).await;

    assert_eq!(outcome.status, InterpretStatus::Error);
    assert!(
        outcome
            .message
            .contains("CULTURA_BASE_TEST_KEY_THAT_IS_NEVER_SET")
    );
    assert!(outcome.filters.is_empty());
    assert_eq!(outcome.model_used, None);
}
