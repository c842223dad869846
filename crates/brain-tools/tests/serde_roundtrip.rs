#![cfg(feature = "serde")]

use brain_tools::{TraceEvent, TraceLog, TAG_START, TAG_STOP};

#[test]
fn trace_log_json_roundtrip() {
    let log = TraceLog {
        events: vec![
            TraceEvent::new(1, TAG_START).with_a(0).with_b(2).with_detail("strike"),
            TraceEvent::new(4, TAG_STOP).with_a(0).with_b(2).with_detail("deactivated"),
        ],
    };

    let json = serde_json::to_string(&log).expect("serialize");
    let roundtrip: TraceLog = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, log);
}
