use async_trait::async_trait;

use crate::core::{LookupError, TaxType, Tpin};
use crate::taxpayer::{TaxRegistration, TaxpayerData};

/// Asynchronous source of taxpayer details, typically a client for the
/// tax authority's registry.
///
/// `Ok(None)` means the identifier has no record; transport or backend
/// failures are `Err`.
#[async_trait]
pub trait TaxpayerDataSource: Send + Sync {
    async fn fetch(&self, tpin: &Tpin) -> Result<Option<TaxpayerData>, LookupError>;

    /// Registration details for one tax type.
    ///
    /// Defaults to searching the registrations returned by [`fetch`](Self::fetch).
    async fn fetch_registration(
        &self,
        tpin: &Tpin,
        tax_type: TaxType,
    ) -> Result<Option<TaxRegistration>, LookupError> {
        Ok(self
            .fetch(tpin)
            .await?
            .and_then(|data| data.tax_registration(tax_type).cloned()))
    }
}
