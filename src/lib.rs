//! # taxverify
//!
//! Zambian tax verification: TPIN validation, filing deadlines, per-tax-type
//! filing verification, compliance records and an async verification
//! service facade.
//!
//! All monetary values use [`rust_decimal::Decimal`]. Dates use
//! [`chrono`]; filing periods are calendar months.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use taxverify::core::*;
//! use taxverify::filing::FilingRules;
//!
//! let tpin = validate_tpin("1234567890").unwrap();
//! assert_eq!(tpin.as_str(), "1234567890");
//! assert!(validate_tpin("0000000000").is_err());
//!
//! let rules = FilingRules::default();
//! let due = rules
//!     .due_date(TaxType::Vat, FilingMode::Manual, FilingPeriod::parse("2023-12").unwrap())
//!     .unwrap();
//! assert_eq!(due, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | TPIN rules, filing rules, VAT verifier, compliance, taxpayer model |
//! | `service` | Async [`VerificationService`](service::VerificationService) facade |
//! | `rates` | PAYE bands and VAT registration threshold |
//! | `json` | Load [`VerificationConfig`](core::VerificationConfig) from JSON |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod filing;

#[cfg(feature = "core")]
pub mod compliance;

#[cfg(feature = "core")]
pub mod taxpayer;

#[cfg(feature = "service")]
pub mod service;

#[cfg(feature = "rates")]
pub mod rates;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
