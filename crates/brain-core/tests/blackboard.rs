use brain_core::{Blackboard, MemoryKey, MemoryStatus};

const COUNT: MemoryKey<u32> = MemoryKey::new(1);
const LABEL: MemoryKey<String> = MemoryKey::new(2);

#[test]
fn blackboard_set_get_erase() {
    let mut bb = Blackboard::new();
    assert_eq!(bb.status(COUNT), MemoryStatus::Absent);
    assert!(bb.is_empty());

    bb.set(COUNT, 123);
    bb.set(LABEL, "hello".to_string());

    assert_eq!(bb.get(COUNT).copied(), Some(123));
    assert_eq!(bb.get(LABEL).map(|s| s.as_str()), Some("hello"));
    assert_eq!(bb.len(), 2);

    *bb.get_mut(COUNT).unwrap() += 1;
    assert_eq!(bb.remove(COUNT), Some(124));
    assert_eq!(bb.get(COUNT), None);

    bb.erase(LABEL);
    bb.erase(LABEL);
    assert_eq!(bb.status(LABEL), MemoryStatus::Absent);
}

#[test]
fn expired_fact_reads_absent_before_sweep() {
    let mut bb = Blackboard::new();
    bb.advance_to(10);
    bb.set_with_ttl(COUNT, 7, Some(3));
    assert_eq!(bb.expires_at(COUNT), Some(13));

    bb.advance_to(12);
    assert_eq!(bb.get(COUNT).copied(), Some(7));

    bb.advance_to(13);
    assert_eq!(bb.get(COUNT), None);
    assert!(bb.get_mut(COUNT).is_none());
    assert_eq!(bb.status(COUNT), MemoryStatus::Absent);
    assert_eq!(bb.expires_at(COUNT), None);
    assert_eq!(bb.remove(COUNT), None);
}

#[test]
fn sweep_drops_only_expired_facts() {
    let mut bb = Blackboard::new();
    bb.set_with_ttl(COUNT, 1, Some(1));
    bb.set(LABEL, "forever".to_string());

    bb.advance_to(5);
    assert_eq!(bb.sweep_expired(), 1);
    assert_eq!(bb.sweep_expired(), 0);
    assert!(bb.contains(LABEL));
}

#[test]
fn overwrite_resets_expiry() {
    let mut bb = Blackboard::new();
    bb.set_with_ttl(COUNT, 1, Some(2));
    bb.set(COUNT, 2);
    bb.advance_to(100);
    assert_eq!(bb.get(COUNT).copied(), Some(2));
    assert_eq!(bb.expires_at(COUNT), None);
}

#[test]
#[should_panic(expected = "blackboard type mismatch")]
fn blackboard_type_mismatch_panics() {
    let mut bb = Blackboard::new();
    bb.set(MemoryKey::<u32>::new(1), 1u32);
    let _ = bb.get(MemoryKey::<i32>::new(1));
}
