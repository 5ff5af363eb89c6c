//! Simulation observer trait for progress reporting and data collection.

use fl_core::Step;

use crate::Populations;

/// Per-step counters reported to [`SimObserver::on_step_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// The step that just ran (0-based).
    pub step:          Step,
    /// Agent function invocations across all layers.
    pub invocations:   usize,
    /// Messages published across all layers.
    pub messages:      usize,
    /// Agents removed at the swap.
    pub deaths:        usize,
    /// Agents added at the swap.
    pub births:        usize,
    /// Agents across all populations after the swap.
    pub agents:        usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at step boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl<A> SimObserver<A> for ProgressPrinter {
///     fn on_step_end(&mut self, stats: &StepStats) {
///         if stats.step.0 % self.interval == 0 {
///             println!("step {}: {} agents", stats.step, stats.agents);
///         }
///     }
/// }
/// ```
pub trait SimObserver<A> {
    /// Called before any layer of `step` runs.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called after the swap and the host step functions.
    fn on_step_end(&mut self, _stats: &StepStats) {}

    /// Called every `config.output_interval_steps` completed steps.
    ///
    /// `completed` is the number of steps run so far; `populations` is the
    /// state after that many steps.
    fn on_snapshot(&mut self, _completed: Step, _populations: &Populations<A>) {}

    /// Called once when [`Sim::run`][crate::Sim::run] returns successfully.
    fn on_sim_end(&mut self, _completed: Step) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl<A> SimObserver<A> for NoopObserver {}
