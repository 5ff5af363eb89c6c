//! Declaration of one agent function: what it reads, writes and may do.

use fl_core::{EnvKey, EnvScalar, EnvType};

use crate::AgentFunction;

/// A named agent function bound to an agent type, with its message wiring
/// and permissions.
///
/// ```rust,ignore
/// let input = FunctionDesc::new("inputdata", "Boid", boids::InputData::default())
///     .input("location")
///     .requires(TIME_SCALE)
///     .requires(MIN_POSITION);
/// ```
pub struct FunctionDesc<A, M> {
    pub name:            String,
    pub agent_type:      String,
    pub message_input:   Option<String>,
    pub message_output:  Option<String>,
    /// Live agents may return no message on `message_output`.
    pub optional_output: bool,
    pub allow_death:     bool,
    pub allow_spawn:     bool,
    /// Environment properties that must exist, with these types, before the
    /// first step.
    pub required_env:    Vec<(String, EnvType)>,
    pub func:            Box<dyn AgentFunction<A, M>>,
}

impl<A, M> FunctionDesc<A, M> {
    pub fn new(
        name:       impl Into<String>,
        agent_type: impl Into<String>,
        func:       impl AgentFunction<A, M>,
    ) -> Self {
        Self {
            name:            name.into(),
            agent_type:      agent_type.into(),
            message_input:   None,
            message_output:  None,
            optional_output: false,
            allow_death:     false,
            allow_spawn:     false,
            required_env:    Vec::new(),
            func:            Box::new(func),
        }
    }

    /// Read neighbors from message list `list`.
    pub fn input(mut self, list: impl Into<String>) -> Self {
        self.message_input = Some(list.into());
        self
    }

    /// Emit one message per live agent into `list`.
    pub fn output(mut self, list: impl Into<String>) -> Self {
        self.message_output = Some(list.into());
        self
    }

    /// Let agents skip emitting on the output list.
    pub fn optional_output(mut self) -> Self {
        self.optional_output = true;
        self
    }

    pub fn allow_death(mut self) -> Self {
        self.allow_death = true;
        self
    }

    pub fn allow_spawn(mut self) -> Self {
        self.allow_spawn = true;
        self
    }

    /// Declare a required environment property.
    pub fn requires<T: EnvScalar>(mut self, key: EnvKey<T>) -> Self {
        self.required_env.push((key.name().to_string(), T::TYPE));
        self
    }
}

impl<A, M> std::fmt::Debug for FunctionDesc<A, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionDesc")
            .field("name", &self.name)
            .field("agent_type", &self.agent_type)
            .field("message_input", &self.message_input)
            .field("message_output", &self.message_output)
            .field("optional_output", &self.optional_output)
            .field("allow_death", &self.allow_death)
            .field("allow_spawn", &self.allow_spawn)
            .field("required_env", &self.required_env)
            .finish_non_exhaustive()
    }
}
