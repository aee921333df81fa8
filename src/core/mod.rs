//! Core types, configuration, and input validation.
//!
//! Everything here is pure: TPIN format rules, filing periods, amount
//! checks and the static [`VerificationConfig`] the other modules are
//! built from.

mod config;
mod error;
mod period;
mod tpin;
mod types;
mod validation;

pub use config::*;
pub use error::*;
pub use period::*;
pub use tpin::*;
pub use types::*;
pub use validation::*;
