#![no_main]

use libfuzzer_sys::fuzz_target;
use taxverify::core::{TpinRules, TpinValidator, validate_tpin};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tpin) = validate_tpin(s) {
            assert_eq!(tpin.as_str().len(), 10);
            assert!(tpin.as_str().bytes().all(|b| b.is_ascii_digit()));
        }
        let _ = TpinValidator::new(TpinRules::nine_digit()).validate(s);
    }
});
