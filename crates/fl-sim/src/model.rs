//! Model description: agent types, message lists, functions, layers,
//! environment and host functions.
//!
//! A description is plain data; nothing is checked until
//! [`SimBuilder::build`](crate::SimBuilder::build) compiles it.

use fl_agent::AgentState;
use fl_core::Environment;
use fl_function::FunctionDesc;
use fl_message::MessageSpec;

use crate::host::{HostContext, HostFunctions};
use crate::SimResult;

/// One ordered step phase: the functions listed run with no mutual ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerDesc {
    pub name:      Option<String>,
    pub functions: Vec<String>,
}

/// Everything needed to build a [`Sim`](crate::Sim), minus populations.
///
/// ```rust,ignore
/// let model = ModelDescription::new("boids")
///     .agent_type("Boid")
///     .message_list(MessageSpec::new("location", 0.1, Bounds::cube(-0.5, 0.5)))
///     .function(FunctionDesc::new("outputdata", "Boid", OutputData).output("location"))
///     .function(FunctionDesc::new("inputdata", "Boid", InputData::default()).input("location"))
///     .layer(["outputdata"])
///     .layer(["inputdata"]);
/// ```
pub struct ModelDescription<A, M> {
    pub name:          String,
    pub agent_types:   Vec<String>,
    pub message_lists: Vec<MessageSpec>,
    pub functions:     Vec<FunctionDesc<A, M>>,
    pub layers:        Vec<LayerDesc>,
    pub environment:   Environment,
    pub(crate) host:   HostFunctions<A>,
}

impl<A: AgentState, M> ModelDescription<A, M> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:          name.into(),
            agent_types:   Vec::new(),
            message_lists: Vec::new(),
            functions:     Vec::new(),
            layers:        Vec::new(),
            environment:   Environment::new(),
            host:          HostFunctions::default(),
        }
    }

    pub fn agent_type(mut self, name: impl Into<String>) -> Self {
        self.agent_types.push(name.into());
        self
    }

    pub fn message_list(mut self, spec: MessageSpec) -> Self {
        self.message_lists.push(spec);
        self
    }

    pub fn function(mut self, desc: FunctionDesc<A, M>) -> Self {
        self.functions.push(desc);
        self
    }

    /// Append an unnamed layer.
    pub fn layer<I, S>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers.push(LayerDesc {
            name:      None,
            functions: functions.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Append a named layer.  Names must be unique across the model.
    pub fn named_layer<I, S>(mut self, name: impl Into<String>, functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers.push(LayerDesc {
            name:      Some(name.into()),
            functions: functions.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Replace the environment.
    pub fn environment(mut self, env: Environment) -> Self {
        self.environment = env;
        self
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    pub fn init_fn<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut HostContext<'_, A>) -> SimResult<()> + Send + 'static,
    {
        self.host.init.push(Box::new(f));
        self
    }

    pub fn step_fn<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut HostContext<'_, A>) -> SimResult<()> + Send + 'static,
    {
        self.host.step.push(Box::new(f));
        self
    }

    pub fn exit_fn<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut HostContext<'_, A>) -> SimResult<()> + Send + 'static,
    {
        self.host.exit.push(Box::new(f));
        self
    }

    pub fn exit_condition<F>(mut self, f: F) -> Self
    where
        F: FnMut(&HostContext<'_, A>) -> bool + Send + 'static,
    {
        self.host.exit_conditions.push(Box::new(f));
        self
    }
}
