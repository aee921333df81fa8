use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::sync::Arc;
use taxverify::core::*;
use taxverify::service::*;
use taxverify::taxpayer::*;

#[tokio::main]
async fn main() -> Result<(), VerificationError> {
    let registered = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
    let banda = TaxpayerBuilder::new(
        "John Banda",
        registered,
        AddressBuilder::new("123 Cairo Road", "Lusaka", "Lusaka")
            .postal_code("10101")
            .build(),
    )
    .business_name("Banda Enterprises Ltd")
    .category(BusinessCategory::Corporation)
    .email("john.banda@bandaenterprises.co.zm")
    .mobile("+260977123456")
    .registration(TaxType::Vat, "VAT123456", registered)
    .build();

    let directory = Arc::new(
        InMemoryDirectory::new()
            .with_taxpayer("1234567890", banda)
            .with_unpaid_penalties("1234567890"),
    );
    let service = VerificationService::builder(directory.clone())
        .registration_lookup(directory.clone())
        .compliance_checks(directory)
        .build()?;

    // Taxpayer and compliance record
    let taxpayer = service.verify_taxpayer("1234567890").await?;
    println!("{} ({})", taxpayer.details.name, taxpayer.tpin);
    if let Some(record) = &taxpayer.compliance {
        let (ok, message) = service.compliance_status(record);
        println!("  compliance: {} score {} -> {ok}: {message}", record.status(), record.score());
    }

    // A late electronic VAT return for March 2024
    let outcome = service
        .verify_filing(
            "1234567890",
            TaxType::Vat,
            FilingPeriod::parse("2024-03")?,
            FilingMode::Electronic,
            NaiveDate::from_ymd_opt(2024, 4, 20),
        )
        .await?;
    if let Some(outcome) = outcome {
        println!(
            "  VAT {}: {} due {:?}, late by {:?} days",
            outcome.filing_period(),
            outcome.status(),
            outcome.due_date(),
            outcome.late_by_days()
        );
    }

    let status = service
        .verify_tax_payment("1234567890", TaxType::Vat, "2024-04", dec!(15000), FilingMode::Manual, None)
        .await?;
    println!("  payment for 2024-04: {status}");

    // Malformed identifiers fail before any lookup
    match service.verify_taxpayer("000000000").await {
        Err(e) => println!("  rejected: {e} ({:?})", e.kind()),
        Ok(_) => unreachable!(),
    }

    Ok(())
}
