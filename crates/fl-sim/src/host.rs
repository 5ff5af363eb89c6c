//! Host functions: model code that runs between steps on the driver thread.
//!
//! | Kind            | Runs                                            |
//! |-----------------|-------------------------------------------------|
//! | init            | once, before the first step                     |
//! | step            | after every step's swap                         |
//! | exit            | once, when [`Sim::run`](crate::Sim::run) ends   |
//! | exit condition  | after the step functions; `true` ends the run   |
//!
//! Host functions may change the environment and create agents.  Agents
//! created here join the current buffer at once because no step is staged.

use fl_agent::AgentState;
use fl_core::{Environment, SimRng, Step};

use crate::{Populations, SimResult};

/// Mutable view of the run handed to host functions.
pub struct HostContext<'a, A> {
    /// Steps completed so far.
    pub step:        Step,
    pub env:         &'a mut Environment,
    pub populations: &'a mut Populations<A>,
    /// Run-level RNG, seeded from the config seed.
    pub rng:         &'a mut SimRng,
}

pub type HostFn<A> = Box<dyn FnMut(&mut HostContext<'_, A>) -> SimResult<()> + Send>;

pub type ExitCondition<A> = Box<dyn FnMut(&HostContext<'_, A>) -> bool + Send>;

/// Host functions registered on a model, in registration order.
pub struct HostFunctions<A> {
    pub(crate) init:            Vec<HostFn<A>>,
    pub(crate) step:            Vec<HostFn<A>>,
    pub(crate) exit:            Vec<HostFn<A>>,
    pub(crate) exit_conditions: Vec<ExitCondition<A>>,
}

impl<A> Default for HostFunctions<A> {
    fn default() -> Self {
        Self {
            init:            Vec::new(),
            step:            Vec::new(),
            exit:            Vec::new(),
            exit_conditions: Vec::new(),
        }
    }
}

impl<A: AgentState> HostFunctions<A> {
    pub(crate) fn run_all(fns: &mut [HostFn<A>], ctx: &mut HostContext<'_, A>) -> SimResult<()> {
        for f in fns.iter_mut() {
            f(ctx)?;
        }
        Ok(())
    }

    /// `true` if any exit condition fires.  Every condition is evaluated.
    pub(crate) fn should_exit(&mut self, ctx: &HostContext<'_, A>) -> bool {
        self.exit_conditions.iter_mut().fold(false, |hit, cond| cond(ctx) | hit)
    }
}
