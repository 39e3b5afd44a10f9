//! Event log persistence tests.
//!
//! Tests cover: ordering of shift events per session, rejected and
//! display-only events staying out of the log, and a broken log never
//! undoing or hiding a committed transition.

use chrono::{Duration, TimeZone, Utc};
use kiosk_core::{
    clock::ManualClock,
    config::KioskConfig,
    engine::KioskEngine,
    event::KioskEvent,
    role::Role,
    selection::StaffingMode,
    sink::MemorySink,
    store::KioskStore,
};

fn build() -> (KioskEngine, ManualClock) {
    let store = KioskStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 6, 11, 0, 0).unwrap());
    let engine = KioskEngine::new(
        KioskConfig::default_test(),
        Box::new(clock.clone()),
        Box::new(MemorySink::new()),
    )
    .with_store(store);
    (engine, clock)
}

#[test]
fn shift_events_are_logged_in_order() {
    let (mut engine, clock) = build();
    engine.toggle_role(Role::Runner).unwrap();
    engine.assign_role(Role::Runner, "1002").unwrap();
    engine.start().unwrap();
    let session_id = engine.session().unwrap().session_id.clone();

    clock.advance(Duration::seconds(1));
    engine.tick().unwrap();
    clock.advance(Duration::minutes(30));
    engine.clock_out().unwrap();

    let store = engine.store().unwrap();
    let types: Vec<String> = store
        .events_for_session(&session_id)
        .unwrap()
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(types, vec!["shift_started", "shift_completed"]);

    let completed = store.events_of_type("shift_completed").unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].device_id, "WINDOW-KIOSK-01");
    let event: KioskEvent = serde_json::from_str(&completed[0].payload).unwrap();
    match event {
        KioskEvent::ShiftCompleted { record, delivered } => {
            assert!(delivered);
            assert_eq!(record.session_id, session_id);
            assert_eq!(record.roles.get(&Role::Runner).map(|e| e.id.as_str()), Some("1002"));
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn rejected_intents_are_not_logged() {
    let (mut engine, _clock) = build();
    assert!(engine.start().is_err());
    assert!(engine.clock_out().is_err());
    assert_eq!(engine.store().unwrap().event_count().unwrap(), 0);
}

#[test]
fn display_events_are_not_logged() {
    let (mut engine, clock) = build();
    engine.select_solo().unwrap();
    engine.assign_solo("1001").unwrap();
    engine.start().unwrap();
    let before = engine.store().unwrap().event_count().unwrap();

    clock.advance(Duration::seconds(12));
    assert!(!engine.tick().unwrap().is_empty());
    engine.next_tip().unwrap();

    assert_eq!(engine.store().unwrap().event_count().unwrap(), before);
    assert_eq!(before, 3); // mode_changed, solo_assigned, shift_started
}

#[test]
fn log_write_failure_keeps_transition_and_events() {
    // Never migrated: every append fails.
    let store = KioskStore::in_memory().expect("in-memory store");
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 6, 11, 0, 0).unwrap());
    let sink = MemorySink::new();
    let mut engine = KioskEngine::new(
        KioskConfig::default_test(),
        Box::new(clock.clone()),
        Box::new(sink.clone()),
    )
    .with_store(store);

    let events = engine.select_solo().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(*engine.mode(), StaffingMode::Solo);

    engine.assign_solo("1001").unwrap();
    engine.start().unwrap();
    clock.advance(Duration::minutes(10));

    let events = engine.clock_out().unwrap();
    assert!(matches!(&events[0], KioskEvent::ShiftCompleted { delivered: true, .. }));
    assert_eq!(sink.len(), 1);
    assert!(engine.session().is_none());
}
