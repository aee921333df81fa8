//! In-process collaborator backed by hash maps.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use super::source::TaxpayerDataSource;
use crate::compliance::ComplianceChecks;
use crate::core::{LookupError, TaxType, Tpin};
use crate::filing::RegistrationLookup;
use crate::taxpayer::TaxpayerData;

/// Taxpayer directory held in memory.
///
/// Implements every collaborator interface, so one instance can back a
/// whole [`VerificationService`](super::VerificationService). Unknown
/// identifiers are reported as not found, never synthesised.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    taxpayers: HashMap<String, TaxpayerData>,
    outstanding_returns: HashSet<String>,
    outstanding_payments: HashSet<String>,
    unpaid_penalties: HashSet<String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_taxpayer(mut self, tpin: impl Into<String>, data: TaxpayerData) -> Self {
        self.taxpayers.insert(tpin.into(), data);
        self
    }

    pub fn with_outstanding_returns(mut self, tpin: impl Into<String>) -> Self {
        self.outstanding_returns.insert(tpin.into());
        self
    }

    pub fn with_outstanding_payments(mut self, tpin: impl Into<String>) -> Self {
        self.outstanding_payments.insert(tpin.into());
        self
    }

    pub fn with_unpaid_penalties(mut self, tpin: impl Into<String>) -> Self {
        self.unpaid_penalties.insert(tpin.into());
        self
    }

    pub fn len(&self) -> usize {
        self.taxpayers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxpayers.is_empty()
    }
}

#[async_trait]
impl TaxpayerDataSource for InMemoryDirectory {
    async fn fetch(&self, tpin: &Tpin) -> Result<Option<TaxpayerData>, LookupError> {
        Ok(self.taxpayers.get(tpin.as_str()).cloned())
    }
}

#[async_trait]
impl RegistrationLookup for InMemoryDirectory {
    async fn is_registered(&self, tpin: &Tpin, tax_type: TaxType) -> Result<bool, LookupError> {
        Ok(self
            .taxpayers
            .get(tpin.as_str())
            .is_some_and(|data| data.is_registered_for(tax_type)))
    }
}

#[async_trait]
impl ComplianceChecks for InMemoryDirectory {
    async fn returns_filed(&self, tpin: &Tpin) -> Result<bool, LookupError> {
        Ok(!self.outstanding_returns.contains(tpin.as_str()))
    }

    async fn payments_current(&self, tpin: &Tpin) -> Result<bool, LookupError> {
        Ok(!self.outstanding_payments.contains(tpin.as_str()))
    }

    async fn penalties_clear(&self, tpin: &Tpin) -> Result<bool, LookupError> {
        Ok(!self.unpaid_penalties.contains(tpin.as_str()))
    }
}
