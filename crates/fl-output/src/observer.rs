//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use fl_agent::AgentState;
use fl_core::Step;
use fl_sim::{Populations, SimObserver, StepStats};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, StepSummaryRow};

/// A [`SimObserver`] that writes step summaries and population snapshots to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<A: AgentState, W: OutputWriter<A>> SimObserver<A> for SimOutputObserver<W> {
    fn on_step_end(&mut self, stats: &StepStats) {
        let result = self.writer.write_step_summary(&StepSummaryRow::from(stats));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, completed: Step, populations: &Populations<A>) {
        for (name, store) in populations.iter() {
            let result = self.writer.write_snapshot(completed, name, store);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _completed: Step) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
