//! Row shapes written by output backends.

use fl_sim::StepStats;

/// An agent row that can be flattened into snapshot columns.
///
/// Snapshot files always start with `step` and `id`; `COLUMNS` names what
/// follows.
///
/// ```rust,ignore
/// impl SnapshotRecord for Boid {
///     const COLUMNS: &'static [&'static str] = &["x", "y", "z", "fx", "fy", "fz"];
///     fn write_fields(&self, out: &mut Vec<String>) {
///         out.extend([self.x, self.y, self.z, self.fx, self.fy, self.fz].map(|v| v.to_string()));
///     }
/// }
/// ```
pub trait SnapshotRecord {
    const COLUMNS: &'static [&'static str];

    /// Append one field per entry of `COLUMNS`, in the same order.
    fn write_fields(&self, out: &mut Vec<String>);
}

/// Counters for one completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSummaryRow {
    pub step:        u64,
    pub agents:      u64,
    pub invocations: u64,
    pub messages:    u64,
    pub deaths:      u64,
    pub births:      u64,
}

impl From<&StepStats> for StepSummaryRow {
    fn from(s: &StepStats) -> Self {
        Self {
            step:        s.step.0,
            agents:      s.agents as u64,
            invocations: s.invocations as u64,
            messages:    s.messages as u64,
            deaths:      s.deaths as u64,
            births:      s.births as u64,
        }
    }
}
