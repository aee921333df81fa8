#![no_main]

use libfuzzer_sys::fuzz_target;
use taxverify::core::FilingPeriod;
use taxverify::filing::FilingRules;
use taxverify::{FilingMode, TaxType};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(period) = FilingPeriod::parse(s) {
            // Display form must parse back to the same period
            assert_eq!(FilingPeriod::parse(&period.to_string()).ok(), Some(period));
            let due = FilingRules::default().due_date(TaxType::Vat, FilingMode::Manual, period);
            assert!(due.is_ok_and(|d| d > period.last_day()));
        }
    }
});
