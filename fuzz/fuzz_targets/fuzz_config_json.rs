//! Fuzz target for tracker configuration parsing.
//!
//! Arbitrary JSON must either deserialize into a config that survives
//! validation or come back as an error; it must never panic.

#![no_main]

use ili_common::TrackerConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<TrackerConfig>(data) {
        let _ = config.validate();
    }
});
