#![no_main]

use libfuzzer_sys::fuzz_target;
use taxverify::core::VerificationConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = VerificationConfig::from_json_str(s) {
            assert!(config.validate().is_ok());
        }
    }
});
