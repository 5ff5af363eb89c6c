//! `fl-sim` — model description, layer scheduler and step driver for the
//! rust_flock engine.
//!
//! # Layered step
//!
//! ```text
//! for step in 0..config.total_steps:
//!   ① Begin  : every population copies current → next.
//!   ② Layers : in declared order; per layer:
//!                 clear the lists the layer writes,
//!                 run each function over its population
//!                 (parallel over agents with the `parallel` feature),
//!                 publish + spatially index the written lists.
//!   ③ Swap   : next becomes current; deaths drop out, births join.
//!   ④ Host   : step functions, then exit conditions.
//! ```
//!
//! Functions always read the start-of-step buffer, so results do not depend
//! on the order of functions inside a layer or of agents inside a function.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`model`]      | `ModelDescription`, `LayerDesc`                          |
//! | [`builder`]    | `SimBuilder` — validation and compilation                |
//! | [`sim`]        | `Sim` — the step loop                                    |
//! | [`population`] | `Populations` — named agent stores                       |
//! | [`host`]       | `HostContext`, host function and exit condition types    |
//! | [`observer`]   | `SimObserver`, `NoopObserver`, `StepStats`               |
//! | [`stop`]       | `StopHandle`                                             |
//! | [`error`]      | `SchemaError`, `SimError`, `SimResult<T>`                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Runs agent functions and the grid key pass on Rayon.       |
//! | `serde`    | Serialize/Deserialize on the core value types.             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fl_agent::AgentStoreBuilder;
//! use fl_sim::{ModelDescription, NoopObserver, SimBuilder};
//!
//! let model = ModelDescription::new("drift")
//!     .agent_type("Dot")
//!     .function(FunctionDesc::new("move", "Dot", Drift))
//!     .layer(["move"]);
//! let dots = AgentStoreBuilder::new(config.seed).extend(rows).build();
//! let mut sim = SimBuilder::new(config, model).population("Dot", dots).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod host;
pub(crate) mod layer;
pub mod model;
pub mod observer;
pub mod population;
pub mod sim;
pub mod stop;


pub use builder::SimBuilder;
pub use error::{SchemaError, SimError, SimResult};
pub use host::{ExitCondition, HostContext, HostFn};
pub use model::{LayerDesc, ModelDescription};
pub use observer::{NoopObserver, SimObserver, StepStats};
pub use population::Populations;
pub use sim::Sim;
pub use stop::StopHandle;
