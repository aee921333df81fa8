//! Async verification facade and its collaborator interfaces.
//!
//! [`VerificationService`] validates the TPIN first on every call, then
//! consults the [`TaxpayerDataSource`], the per-tax-type verifiers and the
//! compliance checker. A timeout surfaces as
//! [`VerificationError::Unavailable`](crate::core::VerificationError::Unavailable).
//!
//! Every call that reaches a collaborator, whether the data source, the
//! registration lookup or the compliance predicates, is bounded by
//! `lookup_timeout_secs`.
//!
//! # Runtime
//!
//! The timeout uses [`tokio::time`], so the service's futures must be polled
//! inside a tokio runtime with the time driver enabled (`#[tokio::main]`,
//! `#[tokio::test]` or a runtime built with `enable_time`). Polling them on
//! another executor panics.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chrono::{TimeZone, Utc};
//! use rust_decimal_macros::dec;
//! use taxverify::core::*;
//! use taxverify::service::*;
//! use taxverify::taxpayer::{AddressBuilder, TaxpayerBuilder};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), VerificationError> {
//! let registered = Utc.with_ymd_and_hms(2022, 1, 15, 0, 0, 0).unwrap();
//! let data = TaxpayerBuilder::new(
//!     "John Banda",
//!     registered,
//!     AddressBuilder::new("Cairo Road", "Lusaka", "Lusaka").build(),
//! )
//! .registration(TaxType::Vat, "VAT123456", registered)
//! .build();
//!
//! let directory = Arc::new(InMemoryDirectory::new().with_taxpayer("1234567890", data));
//! let service = VerificationService::builder(directory.clone())
//!     .registration_lookup(directory.clone())
//!     .compliance_checks(directory)
//!     .build()?;
//!
//! let taxpayer = service.verify_taxpayer("1234567890").await?;
//! assert_eq!(taxpayer.details.name, "John Banda");
//!
//! let status = service
//!     .verify_tax_payment(
//!         "1234567890",
//!         TaxType::Vat,
//!         "2024-03",
//!         dec!(1500),
//!         FilingMode::Electronic,
//!         None,
//!     )
//!     .await?;
//! assert_eq!(status, VerificationStatus::Pending);
//! # Ok(())
//! # }
//! ```

mod facade;
mod memory;
mod source;

pub use facade::{Clock, VerificationService, VerificationServiceBuilder};
pub use memory::InMemoryDirectory;
pub use source::TaxpayerDataSource;
