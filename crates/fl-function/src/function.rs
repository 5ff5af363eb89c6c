//! The `AgentFunction` trait — the extension point for model logic.

use fl_core::AgentRng;

use crate::{AgentContext, FunctionResult, Outcome};

/// Per-agent logic run once per live agent per step, in a layer.
///
/// `ctx` exposes start-of-step state only.  `next` is this agent's row in the
/// next-step buffer; it already holds any writes earlier layers made this
/// step, and is the only row the function may change.  `rng` is the agent's
/// own generator, so results do not depend on thread scheduling.
///
/// # Thread safety
///
/// The executor may call `execute` for many agents in parallel, so
/// implementations must be `Send + Sync`.  Per-agent state belongs in the
/// agent row, not in the function.
///
/// # Example
///
/// ```rust,ignore
/// struct Drift;
///
/// impl AgentFunction<Boid, Location> for Drift {
///     fn execute(&self, ctx: &AgentContext<'_, Boid, Location>, next: &mut Boid, _rng: &mut AgentRng)
///         -> FunctionResult<Outcome<Boid, Location>>
///     {
///         let dt = ctx.read_env(TIME_SCALE)?;
///         next.x += next.fx * dt;
///         Ok(Outcome::alive())
///     }
/// }
/// ```
pub trait AgentFunction<A, M>: Send + Sync + 'static {
    fn execute(
        &self,
        ctx:  &AgentContext<'_, A, M>,
        next: &mut A,
        rng:  &mut AgentRng,
    ) -> FunctionResult<Outcome<A, M>>;
}

impl<A, M, F> AgentFunction<A, M> for F
where
    F: Fn(&AgentContext<'_, A, M>, &mut A, &mut AgentRng) -> FunctionResult<Outcome<A, M>>
        + Send
        + Sync
        + 'static,
{
    #[inline]
    fn execute(
        &self,
        ctx:  &AgentContext<'_, A, M>,
        next: &mut A,
        rng:  &mut AgentRng,
    ) -> FunctionResult<Outcome<A, M>> {
        self(ctx, next, rng)
    }
}

/// Pin a closure to the `AgentFunction` signature so its argument types are
/// inferred.
#[inline]
pub fn agent_fn<A, M, F>(f: F) -> F
where
    F: Fn(&AgentContext<'_, A, M>, &mut A, &mut AgentRng) -> FunctionResult<Outcome<A, M>>
        + Send
        + Sync
        + 'static,
{
    f
}
