#![no_main]

use herald_core::{ServiceEvent, ServiceOutcome};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let Ok(event) = ServiceEvent::parse_json(&raw) else {
        return;
    };
    assert!(!event.name().is_empty());
    let reparsed = serde_json::to_string(&event).expect("parsed events serialize");
    let round_trip = ServiceEvent::parse_json(&reparsed).expect("serialized events parse");
    assert_eq!(round_trip.name(), event.name());
    assert!(!ServiceOutcome::unknown_state().ok());
});
