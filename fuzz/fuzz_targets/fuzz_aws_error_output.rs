#![no_main]

use libfuzzer_sys::fuzz_target;
use stackfleet::infrastructure::aws::parse_error_output;

fuzz_target!(|data: &[u8]| {
    if let Ok(stderr) = std::str::from_utf8(data) {
        let _ = parse_error_output(stderr);
    }
});
