#![no_main]

use libfuzzer_sys::fuzz_target;
use stackfleet::domain::services::{classify, ConflictKind};

fuzz_target!(|data: &[u8]| {
    if let Ok(reason) = std::str::from_utf8(data) {
        let kind = classify(reason);
        assert_eq!(kind, classify(&reason.to_ascii_uppercase()));
        if kind == ConflictKind::AlreadyExists {
            assert!(kind.is_benign());
        }
    }
});
