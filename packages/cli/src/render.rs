//! Text rendering of live notifications and the final summary.

use std::fmt::Write;

use mlfq_twin::domain::process::{ProcessId, ProcessSnapshot};
use mlfq_twin::domain::scheduler::{EngineNotification, RunSummary};
use mlfq_twin::domain::trace::TraceEventKind;

/// Turns the notification stream into printable lines
///
/// Queue blocks and CPU lines are only printed when they change.
pub struct LiveView {
    quanta: Vec<u32>,
    last_levels: Option<Vec<Vec<ProcessSnapshot>>>,
    last_cpu: Option<Option<ProcessId>>,
}

impl LiveView {
    pub fn new(quanta: Vec<u32>) -> Self {
        Self {
            quanta,
            last_levels: None,
            last_cpu: None,
        }
    }

    /// Text to print for `notification`, if anything changed
    pub fn apply(&mut self, notification: &EngineNotification) -> Option<String> {
        match notification {
            EngineNotification::Trace(event) => {
                // Per-unit lines are not rendered.
                if matches!(event.kind, TraceEventKind::Ran { .. }) {
                    None
                } else {
                    Some(event.to_string())
                }
            }
            EngineNotification::CpuChanged(occupant) => {
                if self.last_cpu.as_ref() == Some(occupant) {
                    return None;
                }
                self.last_cpu = Some(occupant.clone());
                Some(match occupant {
                    Some(id) => format!("  CPU ▶ {id}"),
                    None => "  CPU ▶ idle".to_string(),
                })
            }
            EngineNotification::QueuesChanged(snapshot) => {
                if self.last_levels.as_ref() == Some(&snapshot.levels) {
                    return None;
                }
                let text = self.render_levels(&snapshot.levels);
                self.last_levels = Some(snapshot.levels.clone());
                Some(text)
            }
        }
    }

    fn render_levels(&self, levels: &[Vec<ProcessSnapshot>]) -> String {
        let mut out = String::new();
        for (index, level) in levels.iter().enumerate() {
            let quantum = self.quanta.get(index).copied().unwrap_or_default();
            let residents: Vec<String> = level
                .iter()
                .map(|p| format!("{}({})", p.id, p.remaining_time))
                .collect();
            let _ = write!(out, "  Q{} [q={quantum}] │ {}", index + 1, residents.join(" "));
            if index + 1 < levels.len() {
                out.push('\n');
            }
        }
        out
    }
}

fn or_dash(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Per-process statistics table plus averages
pub fn summary_table(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:>7} {:>6} {:>10} {:>10} {:>8} {:>6} {:>4} {:>4}",
        "ID", "Arrival", "Burst", "Completion", "Turnaround", "Waiting", "Level", "Up", "Down"
    );
    for p in &summary.processes {
        let _ = writeln!(
            out,
            "{:<8} {:>7} {:>6} {:>10} {:>10} {:>8} {:>6} {:>4} {:>4}",
            p.id.as_str(),
            p.arrival_time,
            p.burst_time,
            or_dash(p.completion_time),
            or_dash(p.turnaround_time),
            or_dash(p.waiting_time),
            p.final_priority,
            p.promotions,
            p.demotions,
        );
    }

    let average = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
    let _ = writeln!(
        out,
        "\nOutcome: {:?} | Elapsed: {} | Idle: {}",
        summary.outcome, summary.elapsed, summary.idle_units
    );
    let _ = write!(
        out,
        "Avg turnaround: {} | Avg waiting: {} | CPU utilization: {}",
        average(summary.average_turnaround()),
        average(summary.average_waiting()),
        summary
            .cpu_utilization()
            .map_or_else(|| "-".to_string(), |u| format!("{:.1}%", u * 100.0)),
    );
    out
}
