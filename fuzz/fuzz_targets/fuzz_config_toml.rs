#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing and resolving must fail with an error, never panic
        if let Ok(config) = toml::from_str::<stackfleet::Config>(content) {
            let _ = config.resolve();
        }
    }
});
