//! Tests for error classification.

use cora::error::*;

#[test]
fn api_error_display() {
    let err = CoraError::api(422, "customer.number must be a valid phone number");
    assert!(matches!(&err, CoraError::Api { status: 422, .. }));
    assert_eq!(
        err.to_string(),
        "API error (status 422): customer.number must be a valid phone number"
    );
}

#[test]
fn categories_and_retryability_are_stable() {
    let network_error = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .unwrap_err();
    let serde_error = serde_json::from_str::<serde_json::Value>("{not-json}").unwrap_err();

    let cases = vec![
        (CoraError::Authentication("bad key".into()), ErrorCategory::Authentication, false),
        (CoraError::RateLimited { retry_after_ms: Some(1000) }, ErrorCategory::RateLimit, true),
        (CoraError::Network(network_error), ErrorCategory::Network, true),
        (CoraError::api(502, "bad gateway"), ErrorCategory::Server, true),
        (CoraError::api(400, "bad request"), ErrorCategory::Api, false),
        (CoraError::api(403, "forbidden"), ErrorCategory::Authentication, false),
        (CoraError::NotFound("call".into()), ErrorCategory::NotFound, false),
        (CoraError::Configuration("no key".into()), ErrorCategory::Configuration, false),
        (CoraError::Serialization(serde_error), ErrorCategory::Serialization, false),
        (CoraError::invalid("bad uuid"), ErrorCategory::InvalidInput, false),
    ];

    for (error, category, retryable) in cases {
        assert_eq!(error.category(), category, "{error}");
        assert_eq!(error.is_retryable(), retryable, "{error}");
    }
}
