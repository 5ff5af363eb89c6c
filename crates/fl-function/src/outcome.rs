//! What one agent function invocation produced besides its own next row.

/// Whether the agent survives the step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Fate {
    #[default]
    Alive,
    /// Removed at the end-of-step swap.  Skips the remaining layers of the
    /// step.  Requires the function to be declared with `allow_death`.
    Dead,
}

/// Side outputs of one invocation.
///
/// At most one message and one new agent per invocation; the executor
/// collects them into per-agent slots and compacts them in agent order.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome<A, M> {
    pub message: Option<M>,
    pub spawn:   Option<A>,
    pub fate:    Fate,
}

impl<A, M> Default for Outcome<A, M> {
    fn default() -> Self {
        Self { message: None, spawn: None, fate: Fate::Alive }
    }
}

impl<A, M> Outcome<A, M> {
    /// Nothing emitted, nothing spawned, still alive.
    #[inline]
    pub fn alive() -> Self {
        Self::default()
    }

    #[inline]
    pub fn emit(message: M) -> Self {
        Self { message: Some(message), ..Self::default() }
    }

    #[inline]
    pub fn dead() -> Self {
        Self { fate: Fate::Dead, ..Self::default() }
    }

    pub fn with_message(mut self, message: M) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_spawn(mut self, agent: A) -> Self {
        self.spawn = Some(agent);
        self
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.fate == Fate::Dead
    }
}
