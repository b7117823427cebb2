//! End-to-end tests for the Pomodoro cycle through the public API.
//!
//! Time is simulated by calling `tick()` directly; no real clock is involved.

use tokio::sync::mpsc;

use focusboard::daemon::timer::{TimerEngine, TimerEvent};
use focusboard::{format_clock, CycleConfig, CyclePhase, PomodoroCycle};

// ============================================================================
// Test Helpers
// ============================================================================

/// Starts the cycle and ticks until the current phase finishes.
fn run_phase(cycle: &mut PomodoroCycle) -> CyclePhase {
    assert!(cycle.start());
    let mut ticks = 0;
    loop {
        ticks += 1;
        if let Some(transition) = cycle.tick() {
            return transition.to;
        }
        assert!(ticks < 10_000, "phase never finished");
    }
}

fn phase_seconds(config: &CycleConfig, phase: CyclePhase) -> u32 {
    match phase {
        CyclePhase::Work => config.work_seconds(),
        CyclePhase::ShortBreak => config.break_seconds(),
        CyclePhase::LongBreak => config.long_break_seconds(),
    }
}

// ============================================================================
// Full cycle
// ============================================================================

#[test]
fn full_cycle_with_default_session_count() {
    let config = CycleConfig::default()
        .with_work_minutes(1)
        .with_break_minutes(1)
        .with_long_break_minutes(2);
    let mut cycle = PomodoroCycle::new(config).unwrap();

    let mut phases = vec![cycle.phase()];
    for _ in 0..8 {
        phases.push(run_phase(&mut cycle));
    }

    use CyclePhase::*;
    assert_eq!(
        phases,
        vec![Work, ShortBreak, Work, ShortBreak, Work, ShortBreak, Work, LongBreak, Work]
    );
    assert_eq!(cycle.completed_sessions(), 0);
    assert!(!cycle.is_running());
}

#[test]
fn two_session_cycle_counter_progression() {
    let config = CycleConfig::default()
        .with_work_minutes(1)
        .with_break_minutes(1)
        .with_long_break_minutes(1)
        .with_sessions_before_long_break(2);
    let mut cycle = PomodoroCycle::new(config).unwrap();

    let mut observed = Vec::new();
    for _ in 0..4 {
        let phase = run_phase(&mut cycle);
        observed.push((phase, cycle.completed_sessions()));
    }

    assert_eq!(
        observed,
        vec![
            (CyclePhase::ShortBreak, 1),
            (CyclePhase::Work, 1),
            (CyclePhase::LongBreak, 2),
            (CyclePhase::Work, 0),
        ]
    );
}

#[test]
fn remaining_never_exceeds_phase_duration() {
    let config = CycleConfig::default()
        .with_work_minutes(2)
        .with_break_minutes(1)
        .with_long_break_minutes(3)
        .with_sessions_before_long_break(2);
    let mut cycle = PomodoroCycle::new(config).unwrap();

    for _ in 0..1_000 {
        if !cycle.is_running() {
            cycle.start();
        }
        cycle.tick();
        assert!(cycle.remaining_seconds() <= phase_seconds(&config, cycle.phase()));
        assert!(cycle.completed_sessions() <= config.sessions_before_long_break);
    }
}

#[test]
fn paused_cycle_ignores_ticks() {
    let mut cycle = PomodoroCycle::default();
    cycle.start();
    cycle.tick();
    cycle.pause();

    let before = cycle.state().clone();
    for _ in 0..100 {
        assert!(cycle.tick().is_none());
    }
    assert_eq!(cycle.state(), &before);
    assert_eq!(format_clock(cycle.remaining_seconds()), "24:59");
}

#[test]
fn reset_during_break_keeps_session_count() {
    let config = CycleConfig::default().with_work_minutes(1);
    let mut cycle = PomodoroCycle::new(config).unwrap();
    run_phase(&mut cycle);
    assert_eq!(cycle.phase(), CyclePhase::ShortBreak);

    cycle.start();
    cycle.tick();
    cycle.reset();

    assert_eq!(cycle.phase(), CyclePhase::Work);
    assert_eq!(cycle.remaining_seconds(), 60);
    assert!(!cycle.is_running());
    assert_eq!(cycle.completed_sessions(), 1);
}

#[test]
fn configure_while_running_keeps_countdown() {
    let mut cycle = PomodoroCycle::default();
    cycle.start();
    for _ in 0..10 {
        cycle.tick();
    }

    cycle
        .configure(CycleConfig::default().with_work_minutes(50))
        .unwrap();
    assert_eq!(cycle.remaining_seconds(), 25 * 60 - 10);

    cycle.reset();
    assert_eq!(cycle.remaining_seconds(), 50 * 60);
}

#[test]
fn invalid_configuration_is_rejected_whole() {
    let mut cycle = PomodoroCycle::default();
    let invalid = CycleConfig::default()
        .with_work_minutes(45)
        .with_long_break_minutes(0);

    let err = cycle.configure(invalid).unwrap_err();
    assert_eq!(err.field(), "longBreakMinutes");
    assert_eq!(*cycle.config(), CycleConfig::default());
    assert_eq!(cycle.remaining_seconds(), 25 * 60);

    assert!(PomodoroCycle::new(invalid).is_err());
}

// ============================================================================
// Timer engine events
// ============================================================================

#[test]
fn engine_reports_full_work_phase() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = CycleConfig::default().with_work_minutes(1);
    let mut engine = TimerEngine::new(config, tx).unwrap();

    engine.start();
    let mut transitions = 0;
    for _ in 0..60 {
        if engine.tick().is_some() {
            transitions += 1;
        }
    }
    // Paused after the boundary
    assert!(engine.tick().is_none());
    assert_eq!(transitions, 1);

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    assert!(matches!(events.first(), Some(TimerEvent::Started { phase: CyclePhase::Work })));
    let ticks = events
        .iter()
        .filter(|event| matches!(event, TimerEvent::Tick { .. }))
        .count();
    assert_eq!(ticks, 60);
    assert!(matches!(
        events.last(),
        Some(TimerEvent::PhaseCompleted {
            from: CyclePhase::Work,
            to: CyclePhase::ShortBreak,
            completed_sessions: 1,
        })
    ));
}

#[test]
fn engine_is_silent_for_no_op_commands() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut engine = TimerEngine::new(CycleConfig::default(), tx).unwrap();

    engine.pause();
    engine.tick();
    engine.reset();
    engine.configure(CycleConfig::default()).unwrap();
    assert!(rx.try_recv().is_err());

    engine.start();
    engine.start();
    assert!(matches!(rx.try_recv(), Ok(TimerEvent::Started { .. })));
    assert!(rx.try_recv().is_err());
}
