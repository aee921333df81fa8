use std::collections::BTreeMap;

use super::verifier::{VatVerifier, Verifier};
use crate::core::{TaxType, VerificationConfig};

/// Map from tax type to its verifier, assembled once at start-up.
#[derive(Debug, Clone, Default)]
pub struct VerifierRegistry {
    verifiers: BTreeMap<TaxType, Verifier>,
}

impl VerifierRegistry {
    /// Registry with no verifiers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every implemented verifier (currently VAT).
    pub fn standard(config: &VerificationConfig) -> Self {
        let mut registry = Self::empty();
        registry.register(VatVerifier::new(config));
        registry
    }

    /// Add or replace the verifier for its tax type, returning the old one.
    pub fn register(&mut self, verifier: impl Into<Verifier>) -> Option<Verifier> {
        let verifier = verifier.into();
        self.verifiers.insert(verifier.tax_type(), verifier)
    }

    pub fn get(&self, tax_type: TaxType) -> Option<&Verifier> {
        self.verifiers.get(&tax_type)
    }

    pub fn contains(&self, tax_type: TaxType) -> bool {
        self.verifiers.contains_key(&tax_type)
    }

    /// Tax types with a registered verifier, in declaration order.
    pub fn tax_types(&self) -> impl Iterator<Item = TaxType> + '_ {
        self.verifiers.keys().copied()
    }
}
