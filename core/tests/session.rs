//! Shift session lifecycle tests.
//!
//! Tests cover: start idempotence, elapsed-time clamping and
//! monotonicity, abandonment via change-staffing, clock-out
//! preconditions, sink failures, and the scoped session ticker.

use chrono::{Duration, TimeZone, Utc};
use kiosk_core::{
    assignment::RoleAssignment,
    clock::ManualClock,
    config::KioskConfig,
    directory::Employee,
    engine::KioskEngine,
    error::KioskError,
    event::KioskEvent,
    selection::StaffingMode,
    session::{format_elapsed, ShiftRecord, ShiftSession},
    sink::{CompletionSink, MemorySink},
    types::Timestamp,
};

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 5, 6, 6, 30, 0).unwrap()
}

fn solo_engine(sink: Box<dyn CompletionSink>) -> (KioskEngine, ManualClock) {
    let clock = ManualClock::new(t0());
    let mut engine = KioskEngine::new(KioskConfig::default_test(), Box::new(clock.clone()), sink);
    engine.select_solo().unwrap();
    engine.assign_solo("1001").unwrap();
    (engine, clock)
}

struct FailingSink;

impl CompletionSink for FailingSink {
    fn name(&self) -> &'static str { "failing" }

    fn deliver(&mut self, _record: &ShiftRecord) -> anyhow::Result<()> {
        anyhow::bail!("backend unreachable")
    }
}

#[test]
fn second_start_keeps_original_clock_in() {
    let (mut engine, clock) = solo_engine(Box::new(MemorySink::new()));
    engine.start().unwrap();
    let first = engine.session().unwrap().clone();

    clock.advance(Duration::minutes(10));
    let events = engine.start().unwrap();

    assert!(matches!(
        &events[0],
        KioskEvent::ShiftResumed { session_id, clock_in_at }
            if *session_id == first.session_id && *clock_in_at == t0()
    ));
    assert_eq!(engine.session().unwrap(), &first);
    assert_eq!(engine.elapsed(), Some(Duration::minutes(10)));
}

#[test]
fn elapsed_clamps_and_never_decreases() {
    let alex = Employee::new("1001", "Alex Kim");
    let assignment = RoleAssignment { solo: Some(alex), ..Default::default() };
    let session = ShiftSession::start(StaffingMode::Solo, assignment, t0());

    assert_eq!(session.elapsed(t0() - Duration::seconds(30)), Duration::zero());
    assert_eq!(session.elapsed(t0()), Duration::zero());

    let mut last = Duration::zero();
    for secs in [1, 59, 60, 3_599, 3_600, 86_400] {
        let e = session.elapsed(t0() + Duration::seconds(secs));
        assert!(e >= last);
        last = e;
    }
}

#[test]
fn elapsed_formats_as_hours_minutes_seconds() {
    assert_eq!(format_elapsed(Duration::zero()), "00:00:00");
    assert_eq!(format_elapsed(Duration::seconds(59)), "00:00:59");
    assert_eq!(format_elapsed(Duration::seconds(3_661)), "01:01:01");
    assert_eq!(format_elapsed(Duration::hours(26)), "26:00:00");
    assert_eq!(format_elapsed(Duration::seconds(-5)), "00:00:00");
}

#[test]
fn change_staffing_abandons_without_record() {
    let sink = MemorySink::new();
    let (mut engine, _clock) = solo_engine(Box::new(sink.clone()));
    engine.start().unwrap();
    let id = engine.session().unwrap().session_id.clone();

    let events = engine.change_staffing().unwrap();
    assert!(matches!(&events[0], KioskEvent::ShiftAbandoned { session_id, .. } if *session_id == id));
    assert!(sink.is_empty());
    assert!(engine.session().is_none());
    assert!(!engine.has_ticker());
    assert_eq!(*engine.mode(), StaffingMode::Unset);
    assert!(engine.assignment().is_empty());
}

#[test]
fn restart_after_change_staffing_gets_fresh_clock_in() {
    let (mut engine, clock) = solo_engine(Box::new(MemorySink::new()));
    engine.start().unwrap();
    clock.advance(Duration::minutes(5));
    engine.change_staffing().unwrap();

    engine.select_solo().unwrap();
    engine.assign_solo("1002").unwrap();
    engine.start().unwrap();
    assert_eq!(engine.session().unwrap().clock_in_at, t0() + Duration::minutes(5));
}

#[test]
fn clock_out_without_session_changes_nothing() {
    let sink = MemorySink::new();
    let (mut engine, _clock) = solo_engine(Box::new(sink.clone()));

    let err = engine.clock_out().unwrap_err();
    assert!(matches!(err, KioskError::NoActiveSession));
    assert!(err.is_precondition());
    assert!(sink.is_empty());
    assert_eq!(*engine.mode(), StaffingMode::Solo);
    assert!(engine.is_ready(), "staffing survives a rejected clock-out");
}

#[test]
fn sink_failure_still_ends_the_session() {
    let (mut engine, _clock) = solo_engine(Box::new(FailingSink));
    engine.start().unwrap();

    let events = engine.clock_out().unwrap();
    assert!(matches!(&events[0], KioskEvent::ShiftCompleted { delivered: false, .. }));
    assert!(engine.session().is_none());
    assert_eq!(*engine.mode(), StaffingMode::Unset);
}

#[test]
fn record_is_independent_of_later_state() {
    let sink = MemorySink::new();
    let (mut engine, _clock) = solo_engine(Box::new(sink.clone()));
    engine.start().unwrap();
    engine.clock_out().unwrap();

    engine.select_solo().unwrap();
    engine.assign_solo("1003").unwrap();

    let records = sink.records();
    let record = &records[0];
    assert_eq!(record.solo.as_ref().map(|e| e.id.as_str()), Some("1001"));
}

#[test]
fn ticker_refreshes_elapsed_and_rotates_tips() {
    let (mut engine, clock) = solo_engine(Box::new(MemorySink::new()));
    assert!(engine.tick().unwrap().is_empty(), "no ticker before a session");

    engine.start().unwrap();
    assert!(engine.has_ticker());
    assert_eq!(engine.tips().index(), 0);

    clock.advance(Duration::seconds(1));
    let events = engine.tick().unwrap();
    assert!(matches!(
        events.as_slice(),
        [KioskEvent::ElapsedRefreshed { elapsed, .. }] if elapsed == "00:00:01"
    ));

    clock.advance(Duration::seconds(5));
    let events = engine.tick().unwrap();
    assert!(events.contains(&KioskEvent::TipRotated { index: 1 }));

    // Six tips at six seconds each: a full cycle later we are back to 1.
    clock.advance(Duration::seconds(36));
    let events = engine.tick().unwrap();
    assert_eq!(engine.tips().index(), 1);
    assert!(
        !events.iter().any(|e| matches!(e, KioskEvent::TipRotated { .. })),
        "a whole cycle leaves the tip unchanged and reports no rotation"
    );
}

#[test]
fn manual_next_tip_wraps() {
    let (mut engine, _clock) = solo_engine(Box::new(MemorySink::new()));
    let count = engine.tips().len();
    for _ in 0..count - 1 {
        engine.next_tip().unwrap();
    }
    assert_eq!(engine.tips().index(), count - 1);
    assert_eq!(engine.tips().progress(), count);

    let events = engine.next_tip().unwrap();
    assert_eq!(events, vec![KioskEvent::TipRotated { index: 0 }]);
}

#[test]
fn empty_tips_and_zero_interval_run_a_whole_shift() {
    let mut config = KioskConfig::default_test();
    config.tips = vec![];
    config.tip_interval_secs = 0;
    config.validate().unwrap();

    let clock = ManualClock::new(t0());
    let sink = MemorySink::new();
    let mut engine = KioskEngine::new(config, Box::new(clock.clone()), Box::new(sink.clone()));
    engine.select_solo().unwrap();
    engine.assign_solo("1001").unwrap();
    engine.start().unwrap();

    for _ in 0..5 {
        clock.advance(Duration::seconds(7));
        let events = engine.tick().unwrap();
        assert!(events.iter().all(|e| matches!(e, KioskEvent::ElapsedRefreshed { .. })));
    }

    assert_eq!(engine.next_tip().unwrap(), vec![KioskEvent::TipRotated { index: 0 }]);
    let snap = engine.snapshot();
    assert_eq!(snap.tip, None);
    assert_eq!(snap.tip_count, 0);
    assert_eq!(snap.tip_progress, 0);
    assert_eq!(snap.session.expect("session view").elapsed, "00:00:35");

    engine.clock_out().unwrap();
    assert_eq!(sink.len(), 1);
}
