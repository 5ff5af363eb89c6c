//! Setup-time (`SchemaError`) and run-time (`SimError`) errors.

use thiserror::Error;

use fl_core::{AgentId, FlError};
use fl_function::FunctionError;
use fl_spatial::SpatialError;

/// A model description that cannot be run.  Reported by
/// [`SimBuilder::build`](crate::SimBuilder::build).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaError {
    #[error("agent type `{0}` is declared twice")]
    DuplicateAgentType(String),

    #[error("message list `{0}` is declared twice")]
    DuplicateMessageList(String),

    #[error("agent function `{0}` is declared twice")]
    DuplicateFunction(String),

    #[error("layer name `{0}` is used twice")]
    DuplicateLayer(String),

    #[error("function `{function}` is bound to unknown agent type `{agent_type}`")]
    UnknownAgentType { function: String, agent_type: String },

    #[error("function `{function}` refers to unknown message list `{list}`")]
    UnknownMessageList { function: String, list: String },

    #[error("layer `{layer}` refers to unknown function `{function}`")]
    UnknownFunction { layer: String, function: String },

    #[error("function `{function}` reads and writes the same message list `{list}`")]
    InputEqualsOutput { function: String, list: String },

    #[error("function `{function}` appears twice in layer `{layer}`")]
    FunctionTwiceInLayer { layer: String, function: String },

    #[error("agent type `{agent_type}` has more than one function in layer `{layer}`")]
    AgentTypeTwiceInLayer { layer: String, agent_type: String },

    #[error("message list `{list}` is both written and read in layer `{layer}`")]
    ReadWriteSameLayer { layer: String, list: String },

    #[error("layer `{0}` has no functions")]
    EmptyLayer(String),

    #[error("message list `{list}`: {source}")]
    InvalidMessageList {
        list:   String,
        #[source]
        source: SpatialError,
    },

    #[error("function `{function}`: {source}")]
    MissingEnvironment {
        function: String,
        #[source]
        source:   FlError,
    },

    #[error("population supplied for undeclared agent type `{0}`")]
    UndeclaredPopulation(String),

    #[error("population for agent type `{0}` supplied twice")]
    DuplicatePopulation(String),
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid model: {0}")]
    Schema(#[from] SchemaError),

    #[error("function `{function}` failed for {agent}: {source}")]
    Function {
        function: String,
        agent:    AgentId,
        #[source]
        source:   FunctionError,
    },

    #[error("function `{function}` killed {agent} without allow_death")]
    UnexpectedDeath { function: String, agent: AgentId },

    #[error("function `{function}` spawned an agent from {agent} without allow_spawn")]
    UnexpectedSpawn { function: String, agent: AgentId },

    #[error("function `{function}` emitted a message from {agent} but has no message output")]
    UnexpectedMessage { function: String, agent: AgentId },

    #[error("function `{function}` did not emit on `{list}` for {agent}")]
    MissingMessage { function: String, list: String, agent: AgentId },

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Env(#[from] FlError),

    #[error("host function failed: {0}")]
    Host(String),
}

pub type SimResult<T> = Result<T, SimError>;
