//! Filing deadlines and per-tax-type verification.
//!
//! [`FilingRules`] answers "when is this return due?". [`Verifier`] runs
//! the full check for one tax type: TPIN format, registration, due date
//! and timeliness. [`VerifierRegistry`] resolves a [`TaxType`](crate::core::TaxType)
//! to its verifier.
//!
//! # Example
//!
//! ```
//! use taxverify::core::*;
//! use taxverify::filing::*;
//! use chrono::NaiveDate;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let verifier = VatVerifier::default();
//! let outcome = verifier
//!     .verify(
//!         "1234567890",
//!         FilingMode::Electronic,
//!         FilingPeriod::new(2024, 3).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 4, 20),
//!     )
//!     .await
//!     .unwrap();
//! assert_eq!(outcome.status(), VerificationStatus::Verified);
//! assert_eq!(outcome.late_by_days(), Some(2));
//! # }
//! ```

mod registry;
mod rules;
mod verifier;

pub use registry::VerifierRegistry;
pub use rules::FilingRules;
pub use verifier::{AssumeRegistered, RegistrationLookup, VatVerifier, Verifier};
