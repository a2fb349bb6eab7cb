//! Integration Test: Reference Scenarios
//!
//! Small hand-checked workloads whose schedules are known unit for unit.

use mlfq_twin::domain::process::{ProcessId, ProcessRecord, Residency};
use mlfq_twin::domain::scheduler::{EngineConfig, HeadlessEngine, RunOutcome};
use mlfq_twin::domain::trace::TraceEventKind;

fn pid(id: &str) -> ProcessId {
    ProcessId::new(id)
}

/// Three equal processes on one level, round robin with quantum 2
#[test]
fn test_scenario_a_round_robin() {
    let mut engine = HeadlessEngine::new(EngineConfig::new(vec![2])).unwrap();
    for id in ["P1", "P2", "P3"] {
        engine.add_process(ProcessRecord::new(id, 4, 1, 0)).unwrap();
    }

    let summary = engine.schedule().unwrap();

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.elapsed, 12);
    assert_eq!(summary.idle_units, 0);
    assert_eq!(
        engine.trace().execution_runs(),
        vec![
            (pid("P1"), 2),
            (pid("P2"), 2),
            (pid("P3"), 2),
            (pid("P1"), 2),
            (pid("P2"), 2),
            (pid("P3"), 2),
        ]
    );

    assert_eq!(summary.process(&pid("P1")).unwrap().completion_time, Some(8));
    assert_eq!(summary.process(&pid("P2")).unwrap().completion_time, Some(10));
    assert_eq!(summary.process(&pid("P3")).unwrap().completion_time, Some(12));
    assert_eq!(summary.average_turnaround(), Some(10.0));
}

/// A process already at the lowest level is never demoted further
#[test]
fn test_scenario_b_de_aging_clamped_at_lowest_level() {
    let config = EngineConfig::new(vec![1, 2, 4]).with_de_aging(2);
    let mut engine = HeadlessEngine::new(config).unwrap();
    engine.add_process(ProcessRecord::new("P1", 6, 3, 0)).unwrap();

    let summary = engine.schedule().unwrap();

    assert_eq!(summary.elapsed, 6);
    let stats = summary.process(&pid("P1")).unwrap();
    assert_eq!(stats.final_priority, 3);
    assert_eq!(stats.demotions, 0);
    assert_eq!(stats.completion_time, Some(6));

    assert!(engine
        .trace()
        .iter()
        .all(|e| !matches!(e.kind, TraceEventKind::DeAged { .. })));
    // Full quantum at level 3, then the remainder.
    assert_eq!(engine.trace().execution_runs(), vec![(pid("P1"), 4), (pid("P1"), 2)]);

    let record = engine.record(&pid("P1")).unwrap();
    assert_eq!(record.residency(), Residency::Finished);
    assert_eq!(record.total_cpu_time(), 6);
}

/// Idle units until the only process arrives
#[test]
fn test_scenario_c_idle_until_arrival() {
    let mut engine = HeadlessEngine::new(EngineConfig::new(vec![2])).unwrap();
    engine.add_process(ProcessRecord::new("P1", 1, 1, 5)).unwrap();

    let summary = engine.schedule().unwrap();

    assert_eq!(engine.trace().idle_count(), 5);
    assert_eq!(summary.idle_units, 5);
    assert_eq!(summary.elapsed, 6);

    let events = engine.trace().events();
    for (i, event) in events.iter().take(5).enumerate() {
        assert_eq!(event.kind, TraceEventKind::Idle);
        assert_eq!(event.time, i as u64 + 1);
    }
    assert_eq!(events[5].time, 5);
    assert_eq!(
        events[5].kind,
        TraceEventKind::Arrived {
            process: pid("P1"),
            level: 1
        }
    );

    let rendered = engine.trace().render();
    assert!(rendered.starts_with("t=1: CPU idle"));
    assert!(rendered.contains("t=5: P1 arrived in queue 1"));
    assert!(rendered.ends_with("t=6: P1 finished"));
}

/// De-aging from the top level forfeits the rest of the slice
#[test]
fn test_de_aging_interrupts_slice() {
    let config = EngineConfig::new(vec![4, 4]).with_de_aging(3);
    let mut engine = HeadlessEngine::new(config).unwrap();
    engine.add_process(ProcessRecord::new("P1", 8, 1, 0)).unwrap();
    engine.add_process(ProcessRecord::new("P2", 2, 2, 0)).unwrap();

    engine.schedule().unwrap();

    // P1 demoted after 3 units, joins level 2 behind P2.
    assert_eq!(
        engine.trace().execution_runs(),
        vec![(pid("P1"), 3), (pid("P2"), 2), (pid("P1"), 4), (pid("P1"), 1)]
    );
    let de_aged: Vec<_> = engine
        .trace()
        .iter()
        .filter(|e| matches!(e.kind, TraceEventKind::DeAged { .. }))
        .map(|e| e.time)
        .collect();
    assert_eq!(de_aged, vec![3]);
}

/// Aging lifts a starving low-priority process to the top level
#[test]
fn test_aging_prevents_starvation() {
    let config = EngineConfig::new(vec![2, 2]).with_aging(4);
    let mut engine = HeadlessEngine::new(config).unwrap();
    engine.add_process(ProcessRecord::new("HOG", 20, 1, 0)).unwrap();
    engine.add_process(ProcessRecord::new("LOW", 1, 2, 0)).unwrap();

    let summary = engine.schedule().unwrap();

    // LOW waits 4 units (two HOG slices), is promoted at t=4, then shares
    // level 1 round robin: it runs right after HOG's third slice.
    let low = summary.process(&pid("LOW")).unwrap();
    assert_eq!(low.promotions, 1);
    assert_eq!(low.final_priority, 1);
    assert_eq!(low.completion_time, Some(7));
}

/// Strict priority at the start of each turn
#[test]
fn test_higher_level_arrival_served_next_turn() {
    let mut engine = HeadlessEngine::new(EngineConfig::new(vec![2, 3])).unwrap();
    engine.add_process(ProcessRecord::new("LOW", 6, 2, 0)).unwrap();
    engine.add_process(ProcessRecord::new("HIGH", 2, 1, 1)).unwrap();

    engine.schedule().unwrap();

    assert_eq!(
        engine.trace().execution_runs(),
        vec![(pid("LOW"), 3), (pid("HIGH"), 2), (pid("LOW"), 3)]
    );
}
