use brain_core::{Blackboard, MemoryKey, MemoryStatus};
use proptest::prelude::*;

const FACT: MemoryKey<u8> = MemoryKey::new(42);

proptest! {
    #[test]
    fn fact_is_present_for_exactly_ttl_ticks(start in 0u64..1_000, ttl in 0u64..64, probe in 0u64..128) {
        let mut bb = Blackboard::new();
        bb.advance_to(start);
        bb.set_with_ttl(FACT, 1, Some(ttl));

        bb.advance_to(start + probe);
        let expected = if probe < ttl { MemoryStatus::Present } else { MemoryStatus::Absent };
        prop_assert_eq!(bb.status(FACT), expected);

        bb.sweep_expired();
        prop_assert_eq!(bb.status(FACT), expected);
    }
}

#[test]
fn zero_ttl_is_absent_immediately() {
    let mut bb = Blackboard::new();
    bb.advance_to(3);
    bb.set_with_ttl(FACT, 1, Some(0));
    assert_eq!(bb.status(FACT), MemoryStatus::Absent);
}
