//! Read-only view handed to every agent function invocation.

use fl_agent::AgentState;
use fl_core::{AgentId, EnvKey, EnvScalar, Environment, Step};
use fl_message::{Message, MessageList};

use crate::{FunctionError, FunctionResult};

/// Everything an agent may read while its function runs.
///
/// All borrows point at start-of-step state (current agent buffer, published
/// message snapshot, environment) and live for one layer.  The executor never
/// hands out mutable access to any of them while a context exists.
pub struct AgentContext<'a, A, M> {
    /// Stable id of the running agent.
    pub id: AgentId,

    /// Row of the agent in its store's buffers this step.
    pub row: usize,

    /// The agent's own start-of-step row.
    pub agent: &'a A,

    pub step: Step,

    pub env: &'a Environment,

    inbox: Option<&'a MessageList<M>>,
}

impl<'a, A: AgentState, M: Message> AgentContext<'a, A, M> {
    #[inline]
    pub fn new(
        id:    AgentId,
        row:   usize,
        agent: &'a A,
        step:  Step,
        env:   &'a Environment,
        inbox: Option<&'a MessageList<M>>,
    ) -> Self {
        Self { id, row, agent, step, env, inbox }
    }

    /// Candidate messages around this agent's own position, using the input
    /// list's radius.
    ///
    /// Candidates may lie outside the radius and include the agent's own
    /// message; filter both at the call site.
    pub fn messages(&self) -> FunctionResult<impl Iterator<Item = &'a M> + use<'a, A, M>> {
        let inbox = self.inbox.ok_or(FunctionError::NoMessageInput)?;
        Ok(inbox.neighbors(self.agent.position())?)
    }

    /// The whole published input list, for functions that need brute force.
    pub fn all_messages(&self) -> FunctionResult<&'a [M]> {
        self.inbox.map(MessageList::read).ok_or(FunctionError::NoMessageInput)
    }

    /// Radius of the input list.
    pub fn message_radius(&self) -> FunctionResult<f32> {
        self.inbox.map(MessageList::radius).ok_or(FunctionError::NoMessageInput)
    }

    /// Read an environment property through a typed key.
    #[inline]
    pub fn read_env<T: EnvScalar>(&self, key: EnvKey<T>) -> FunctionResult<T> {
        Ok(self.env.read(key)?)
    }
}
