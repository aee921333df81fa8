#![cfg(feature = "json")]

use taxverify::core::*;

#[test]
fn empty_document_uses_defaults() {
    let config = VerificationConfig::from_json_str("{}").unwrap();
    assert_eq!(config, VerificationConfig::default());
}

#[test]
fn partial_document_overrides() {
    let json = r#"{
        "tpin": { "length": 9, "allowed_prefixes": [] },
        "filing_deadlines": {
            "VAT": { "manual": 5, "electronic": 18 },
            "PAYE": { "electronic": 10 }
        },
        "penalty_weights": { "payments": 50 },
        "lookup_timeout_secs": 5
    }"#;
    let config = VerificationConfig::from_json_str(json).unwrap();
    assert_eq!(config.tpin, TpinRules::nine_digit());
    assert_eq!(config.deadline_day(TaxType::Paye, FilingMode::Electronic), Some(10));
    assert_eq!(config.deadline_day(TaxType::Paye, FilingMode::Manual), None);
    assert_eq!(config.penalty_weights.payments, 50);
    assert_eq!(config.penalty_weights.returns, 30);
    assert_eq!(config.lookup_timeout_secs, 5);
    assert_eq!(config.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
}

#[test]
fn out_of_range_deadline_rejected() {
    let json = r#"{ "filing_deadlines": { "VAT": { "manual": 30 } } }"#;
    let err = VerificationConfig::from_json_str(json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn unknown_tax_type_rejected() {
    let json = r#"{ "filing_deadlines": { "GST": { "manual": 5 } } }"#;
    assert!(VerificationConfig::from_json_str(json).is_err());
}

#[test]
fn malformed_json_is_config_error() {
    let err = VerificationConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, VerificationError::Config(_)));
}

#[test]
fn reader_variant() {
    let json = br#"{ "lookup_timeout_secs": 12 }"#;
    let config = VerificationConfig::from_json_reader(&json[..]).unwrap();
    assert_eq!(config.lookup_timeout_secs, 12);
}
