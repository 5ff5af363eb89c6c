//! The `OutputWriter` trait implemented by backend writers.

use fl_agent::AgentStore;
use fl_core::Step;

use crate::{OutputResult, StepSummaryRow};

/// A sink for snapshots and step summaries of agents with row type `A`.
///
/// Errors are returned here; [`SimOutputObserver`](crate::SimOutputObserver)
/// stores them for [`take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter<A> {
    /// Write every agent of one population as of `completed` steps.
    fn write_snapshot(
        &mut self,
        completed:  Step,
        population: &str,
        store:      &AgentStore<A>,
    ) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
