//! A function that changes nothing.

use fl_core::AgentRng;

use crate::{AgentContext, AgentFunction, FunctionResult, Outcome};

/// An [`AgentFunction`] that leaves the agent untouched and emits nothing.
///
/// Useful as a placeholder in tests, or for a passive population that only
/// occupies a layer slot.
pub struct NoopFunction;

impl<A: 'static, M: 'static> AgentFunction<A, M> for NoopFunction {
    fn execute(
        &self,
        _ctx:  &AgentContext<'_, A, M>,
        _next: &mut A,
        _rng:  &mut AgentRng,
    ) -> FunctionResult<Outcome<A, M>> {
        Ok(Outcome::alive())
    }
}
