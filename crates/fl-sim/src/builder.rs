//! Compiles a [`ModelDescription`] plus populations into a runnable [`Sim`].

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

use fl_agent::{AgentState, AgentStore};
use fl_core::{FunctionId, MessageListId, PopulationId, SimConfig, SimRng, Step};
use fl_message::{Message, MessageList};

use crate::layer::{CompiledFunction, CompiledLayer};
use crate::{ModelDescription, Populations, SchemaError, Sim, SimResult, StopHandle};

/// Fluent builder for [`Sim<A, M>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total steps, seed, snapshot interval, …
/// - [`ModelDescription`] — agent types, message lists, functions, layers,
///   environment, host functions
///
/// # Optional inputs
///
/// | Method                    | Default                                      |
/// |---------------------------|----------------------------------------------|
/// | `.population(name, s)`    | empty store seeded with `config.seed`        |
///
/// # Example
///
/// ```rust,ignore
/// let boids = AgentStoreBuilder::new(config.seed).extend(rows).build();
/// let mut sim = SimBuilder::new(config, model)
///     .population("Boid", boids)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<A, M> {
    config:      SimConfig,
    model:       ModelDescription<A, M>,
    populations: Vec<(String, AgentStore<A>)>,
}

impl<A: AgentState, M: Message> SimBuilder<A, M> {
    pub fn new(config: SimConfig, model: ModelDescription<A, M>) -> Self {
        Self { config, model, populations: Vec::new() }
    }

    /// Supply the initial population of agent type `name`.
    pub fn population(mut self, name: impl Into<String>, store: AgentStore<A>) -> Self {
        self.populations.push((name.into(), store));
        self
    }

    /// Validate the model and return a ready-to-run [`Sim`].
    ///
    /// Every rule violation is reported as [`SchemaError`] wrapped in
    /// `SimError::Schema`; the first one found wins.
    pub fn build(self) -> SimResult<Sim<A, M>> {
        let Self { config, model, populations } = self;
        let ModelDescription {
            name,
            agent_types,
            message_lists,
            functions,
            layers,
            environment,
            host,
        } = model;

        // ── Agent types ───────────────────────────────────────────────────
        let mut type_ids: FxHashMap<String, PopulationId> = FxHashMap::default();
        for (i, t) in agent_types.iter().enumerate() {
            if type_ids.insert(t.clone(), PopulationId(i as u16)).is_some() {
                return Err(SchemaError::DuplicateAgentType(t.clone()).into());
            }
        }

        // ── Message lists ─────────────────────────────────────────────────
        let mut list_index: FxHashMap<String, MessageListId> = FxHashMap::default();
        let mut lists = Vec::with_capacity(message_lists.len());
        for (i, spec) in message_lists.into_iter().enumerate() {
            if list_index.insert(spec.name.clone(), MessageListId(i as u16)).is_some() {
                return Err(SchemaError::DuplicateMessageList(spec.name).into());
            }
            let list_name = spec.name.clone();
            let list = MessageList::new(spec).map_err(|source| SchemaError::InvalidMessageList {
                list: list_name,
                source,
            })?;
            lists.push(list);
        }

        // ── Functions ─────────────────────────────────────────────────────
        let mut fn_ids: FxHashMap<String, FunctionId> = FxHashMap::default();
        let mut compiled: Vec<CompiledFunction<A, M>> = Vec::with_capacity(functions.len());
        for (i, desc) in functions.into_iter().enumerate() {
            if fn_ids.insert(desc.name.clone(), FunctionId(i as u16)).is_some() {
                return Err(SchemaError::DuplicateFunction(desc.name).into());
            }
            let population = *type_ids.get(&desc.agent_type).ok_or_else(|| {
                SchemaError::UnknownAgentType {
                    function:   desc.name.clone(),
                    agent_type: desc.agent_type.clone(),
                }
            })?;
            let resolve = |list: &Option<String>| -> Result<Option<MessageListId>, SchemaError> {
                match list {
                    None => Ok(None),
                    Some(l) => list_index.get(l).copied().map(Some).ok_or_else(|| {
                        SchemaError::UnknownMessageList { function: desc.name.clone(), list: l.clone() }
                    }),
                }
            };
            let input = resolve(&desc.message_input)?;
            let output = resolve(&desc.message_output)?;
            if let (Some(i), Some(o)) = (input, output) {
                if i == o {
                    return Err(SchemaError::InputEqualsOutput {
                        function: desc.name.clone(),
                        list:     lists[i.index()].name().to_string(),
                    }
                    .into());
                }
            }
            for (prop, ty) in &desc.required_env {
                environment.require(prop, *ty).map_err(|source| {
                    SchemaError::MissingEnvironment { function: desc.name.clone(), source }
                })?;
            }
            compiled.push(CompiledFunction { desc, population, input, output });
        }

        // ── Layers ────────────────────────────────────────────────────────
        let mut layer_names: FxHashSet<String> = FxHashSet::default();
        let mut compiled_layers = Vec::with_capacity(layers.len());
        for (i, layer) in layers.into_iter().enumerate() {
            let display = match layer.name {
                Some(n) => {
                    if !layer_names.insert(n.clone()) {
                        return Err(SchemaError::DuplicateLayer(n).into());
                    }
                    n
                }
                None => format!("layer {i}"),
            };
            if layer.functions.is_empty() {
                return Err(SchemaError::EmptyLayer(display).into());
            }

            let mut fids = Vec::with_capacity(layer.functions.len());
            let mut types_seen = FxHashSet::default();
            let mut outputs: Vec<MessageListId> = Vec::new();
            let mut inputs: Vec<MessageListId> = Vec::new();
            for fname in &layer.functions {
                let fid = *fn_ids.get(fname).ok_or_else(|| SchemaError::UnknownFunction {
                    layer:    display.clone(),
                    function: fname.clone(),
                })?;
                if fids.contains(&fid) {
                    return Err(SchemaError::FunctionTwiceInLayer {
                        layer:    display.clone(),
                        function: fname.clone(),
                    }
                    .into());
                }
                let func = &compiled[fid.index()];
                if !types_seen.insert(func.population) {
                    return Err(SchemaError::AgentTypeTwiceInLayer {
                        layer:      display.clone(),
                        agent_type: func.desc.agent_type.clone(),
                    }
                    .into());
                }
                fids.push(fid);
                if let Some(o) = func.output {
                    if !outputs.contains(&o) {
                        outputs.push(o);
                    }
                }
                inputs.extend(func.input);
            }
            if let Some(&clash) = outputs.iter().find(|o| inputs.contains(o)) {
                return Err(SchemaError::ReadWriteSameLayer {
                    layer: display,
                    list:  lists[clash.index()].name().to_string(),
                }
                .into());
            }
            compiled_layers.push(CompiledLayer { name: display, functions: fids, outputs });
        }

        // ── Populations ───────────────────────────────────────────────────
        let mut slots: Vec<Option<AgentStore<A>>> = agent_types.iter().map(|_| None).collect();
        for (pname, store) in populations {
            let id = type_ids
                .get(&pname)
                .ok_or_else(|| SchemaError::UndeclaredPopulation(pname.clone()))?;
            let slot = &mut slots[id.index()];
            if slot.is_some() {
                return Err(SchemaError::DuplicatePopulation(pname).into());
            }
            *slot = Some(store);
        }
        let populations = Populations::new(
            agent_types
                .into_iter()
                .zip(slots)
                .map(|(t, s)| (t, s.unwrap_or_else(|| AgentStore::new(config.seed))))
                .collect(),
        );

        info!(
            model      = %name,
            agents     = populations.total_agents(),
            functions  = compiled.len(),
            layers     = compiled_layers.len(),
            lists      = lists.len(),
            "model compiled"
        );

        Ok(Sim {
            rng:            SimRng::new(config.seed),
            name,
            config,
            env:            environment,
            populations,
            lists,
            list_index,
            functions:      compiled,
            layers:         compiled_layers,
            host,
            stop:           StopHandle::new(),
            step:           Step::ZERO,
            initialised:    false,
            exit_requested: false,
        })
    }
}
