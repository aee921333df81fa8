//! Taxpayer Identification Number (TPIN) format validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which format rule a TPIN violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TpinErrorKind {
    /// Not exactly the configured number of characters.
    Length,
    /// First character outside the allowed prefix set.
    Prefix,
    /// Contains a character that is not an ASCII digit.
    NonDigit,
    /// Rejected by a configured [`TpinChecksum`].
    Checksum,
}

/// Error returned when a TPIN fails format validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TpinFormatError {
    /// The invalid input value.
    pub value: String,
    /// Which rule failed.
    pub kind: TpinErrorKind,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for TpinFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid TPIN '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for TpinFormatError {}

/// Length and prefix rules for TPINs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TpinRules {
    /// Exact number of digits.
    pub length: usize,
    /// Allowed first digits. Empty means any digit.
    pub allowed_prefixes: Vec<char>,
}

impl Default for TpinRules {
    /// 10 digits starting with 1, 2 or 3.
    fn default() -> Self {
        Self {
            length: 10,
            allowed_prefixes: vec!['1', '2', '3'],
        }
    }
}

impl TpinRules {
    /// 9 digits with no prefix restriction.
    pub fn nine_digit() -> Self {
        Self {
            length: 9,
            allowed_prefixes: Vec::new(),
        }
    }

    /// Check `tpin` against length, prefix and digit rules, in that order.
    pub fn check(&self, tpin: &str) -> Result<(), TpinFormatError> {
        let fail = |kind, reason: String| TpinFormatError {
            value: tpin.to_string(),
            kind,
            reason,
        };

        if tpin.chars().count() != self.length {
            return Err(fail(
                TpinErrorKind::Length,
                format!("TPIN must be {} digits long", self.length),
            ));
        }

        if !self.allowed_prefixes.is_empty() {
            let first = tpin.chars().next();
            if !first.is_some_and(|c| self.allowed_prefixes.contains(&c)) {
                let allowed: String = self.allowed_prefixes.iter().collect();
                return Err(fail(
                    TpinErrorKind::Prefix,
                    format!("TPIN must start with one of [{allowed}]"),
                ));
            }
        }

        if !tpin.chars().all(|c| c.is_ascii_digit()) {
            return Err(fail(
                TpinErrorKind::NonDigit,
                "TPIN must contain only digits".into(),
            ));
        }

        Ok(())
    }
}

/// Extension point for a TPIN check-digit algorithm.
///
/// No algorithm is shipped; the authority has not published one.
pub trait TpinChecksum: Send + Sync {
    /// Returns `true` if the check digit(s) of an otherwise well-formed
    /// TPIN are correct.
    fn verify(&self, tpin: &str) -> bool;
}

/// Validates TPINs against [`TpinRules`] and an optional checksum.
#[derive(Clone, Default)]
pub struct TpinValidator {
    rules: TpinRules,
    checksum: Option<Arc<dyn TpinChecksum>>,
}

impl fmt::Debug for TpinValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TpinValidator")
            .field("rules", &self.rules)
            .field("checksum", &self.checksum.is_some())
            .finish()
    }
}

impl TpinValidator {
    pub fn new(rules: TpinRules) -> Self {
        Self {
            rules,
            checksum: None,
        }
    }

    pub fn with_checksum(mut self, checksum: Arc<dyn TpinChecksum>) -> Self {
        self.checksum = Some(checksum);
        self
    }

    pub fn rules(&self) -> &TpinRules {
        &self.rules
    }

    /// Validate `tpin`, returning the typed identifier on success.
    pub fn validate(&self, tpin: &str) -> Result<Tpin, TpinFormatError> {
        self.rules.check(tpin)?;
        if let Some(checksum) = &self.checksum {
            if !checksum.verify(tpin) {
                return Err(TpinFormatError {
                    value: tpin.to_string(),
                    kind: TpinErrorKind::Checksum,
                    reason: "TPIN check digit mismatch".into(),
                });
            }
        }
        Ok(Tpin(tpin.to_string()))
    }
}

/// Validate a TPIN against the default rules (10 digits, prefix 1 to 3).
pub fn validate_tpin(tpin: &str) -> Result<Tpin, TpinFormatError> {
    TpinValidator::default().validate(tpin)
}

/// A TPIN that has passed format validation.
///
/// Only obtainable from [`TpinValidator::validate`] or [`validate_tpin`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tpin(String);

impl Tpin {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Tpin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tpin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_default_tpin() {
        let t = validate_tpin("1234567890").unwrap();
        assert_eq!(t.as_str(), "1234567890");
    }

    #[test]
    fn wrong_length() {
        let e = validate_tpin("123456789").unwrap_err();
        assert_eq!(e.kind, TpinErrorKind::Length);
        assert!(e.reason.contains("10 digits"));
    }

    #[test]
    fn disallowed_prefix() {
        let e = validate_tpin("4234567890").unwrap_err();
        assert_eq!(e.kind, TpinErrorKind::Prefix);
        assert!(e.to_string().contains("[123]"));
    }

    #[test]
    fn non_digit_body() {
        let e = validate_tpin("12345A7890").unwrap_err();
        assert_eq!(e.kind, TpinErrorKind::NonDigit);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 10 chars, 11 bytes
        let e = validate_tpin("123456789é").unwrap_err();
        assert_eq!(e.kind, TpinErrorKind::NonDigit);
    }

    #[test]
    fn nine_digit_rules_accept_any_prefix() {
        let v = TpinValidator::new(TpinRules::nine_digit());
        assert!(v.validate("000000000").is_ok());
        assert!(v.validate("987654321").is_ok());
        assert!(v.validate("1234567890").is_err());
    }

    #[test]
    fn zeroes_rejected_with_prefix_rule() {
        let rules = TpinRules {
            length: 9,
            allowed_prefixes: vec!['1', '2', '3'],
        };
        let e = TpinValidator::new(rules).validate("000000000").unwrap_err();
        assert_eq!(e.kind, TpinErrorKind::Prefix);
    }

    struct LastDigitEven;

    impl TpinChecksum for LastDigitEven {
        fn verify(&self, tpin: &str) -> bool {
            tpin.chars()
                .last()
                .and_then(|c| c.to_digit(10))
                .is_some_and(|d| d % 2 == 0)
        }
    }

    #[test]
    fn checksum_hook_runs_after_format_rules() {
        let v = TpinValidator::default().with_checksum(Arc::new(LastDigitEven));
        assert!(v.validate("1234567890").is_ok());
        let e = v.validate("1234567891").unwrap_err();
        assert_eq!(e.kind, TpinErrorKind::Checksum);
        // format errors still win
        assert_eq!(v.validate("12").unwrap_err().kind, TpinErrorKind::Length);
    }
}
