//! The `Sim` struct and its step loop.

use rustc_hash::FxHashMap;
use tracing::{debug, info, trace, warn};

use fl_agent::{AgentState, AgentStore};
use fl_core::{Environment, MessageListId, SimConfig, SimRng, Step};
use fl_message::{Message, MessageList};

use crate::host::{HostContext, HostFunctions};
use crate::layer::{CompiledFunction, CompiledLayer, run_function};
use crate::{Populations, SimObserver, SimResult, StepStats, StopHandle};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation driver.
///
/// `Sim<A, M>` owns every population, message list and the environment, and
/// runs the layered step:
///
/// 1. **Begin**: every population copies its current buffer into its next
///    buffer.
/// 2. **Layers**, in order.  For each layer:
///    - clear the message lists the layer writes;
///    - run each function over its population (parallel over agents with
///      the `parallel` feature), reading start-of-step rows and published
///      messages, writing next rows;
///    - publish and re-index every list the layer wrote.
/// 3. **Swap**: next becomes current; dead agents leave, births join.
/// 4. **Host**: step functions, then exit conditions.
///
/// If any layer fails, the step is rolled back: message lists return to
/// their previous snapshots and every population to its state before step 1,
/// RNG streams and id counter included.  Host step functions run after the
/// swap, so their errors leave the step committed.
///
/// Only the driver calls `swap`, once per population per step.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<A, M> {
    pub(crate) name:           String,
    pub(crate) config:         SimConfig,
    pub(crate) env:            Environment,
    pub(crate) populations:    Populations<A>,
    pub(crate) lists:          Vec<MessageList<M>>,
    pub(crate) list_index:     FxHashMap<String, MessageListId>,
    pub(crate) functions:      Vec<CompiledFunction<A, M>>,
    pub(crate) layers:         Vec<CompiledLayer>,
    pub(crate) host:           HostFunctions<A>,
    pub(crate) rng:            SimRng,
    pub(crate) stop:           StopHandle,
    pub(crate) step:           Step,
    pub(crate) initialised:    bool,
    pub(crate) exit_requested: bool,
}

impl<A: AgentState, M: Message> Sim<A, M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current step to `config.end_step()`, then run the exit
    /// functions.
    ///
    /// Stops early, at a step boundary, when an exit condition fires or the
    /// [`StopHandle`] is triggered.  Use [`NoopObserver`][crate::NoopObserver]
    /// if you don't need callbacks.
    pub fn run<O: SimObserver<A>>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            model  = %self.name,
            agents = self.populations.total_agents(),
            steps  = self.config.total_steps,
            layers = self.layers.len(),
            "simulation starting"
        );
        let remaining = self.config.end_step().0.saturating_sub(self.step.0);
        self.run_steps(remaining, observer)?;
        self.finish(observer)
    }

    /// Run up to `n` steps from the current position (ignores `end_step`).
    ///
    /// Exit functions are not run; call [`run`](Self::run) for a complete
    /// run.  Returns the number of steps actually executed.
    pub fn run_steps<O: SimObserver<A>>(&mut self, n: u64, observer: &mut O) -> SimResult<u64> {
        let mut done = 0;
        while done < n {
            if self.stop.is_stop_requested() {
                info!(step = %self.step, "stop requested");
                break;
            }
            if self.exit_requested {
                break;
            }
            observer.on_step_start(self.step);
            let stats = self.step()?;
            observer.on_step_end(&stats);
            if self.config.snapshot_due(self.step) {
                observer.on_snapshot(self.step, &self.populations);
            }
            done += 1;
        }
        Ok(done)
    }

    /// Execute exactly one step.
    pub fn step(&mut self) -> SimResult<StepStats> {
        self.ensure_init()?;

        let step = self.step;
        let mut stats = StepStats { step, ..StepStats::default() };

        for store in self.populations.stores_mut() {
            store.begin_step();
        }

        for layer in 0..self.layers.len() {
            if let Err(e) = self.execute_layer(layer, &mut stats) {
                self.abort_step();
                warn!(step = %step, layer = %self.layers[layer].name, error = %e, "step rolled back");
                return Err(e);
            }
        }
        for list in &mut self.lists {
            list.commit();
        }

        for store in self.populations.stores_mut() {
            let swap = store.swap();
            stats.deaths += swap.removed;
            stats.births += swap.born;
        }
        self.step = step.next();

        let mut ctx = HostContext {
            step:        self.step,
            env:         &mut self.env,
            populations: &mut self.populations,
            rng:         &mut self.rng,
        };
        HostFunctions::run_all(&mut self.host.step, &mut ctx)?;
        if self.host.should_exit(&ctx) {
            info!(step = %self.step, "exit condition met");
            self.exit_requested = true;
        }

        stats.agents = self.populations.total_agents();
        debug!(
            step        = %step,
            agents      = stats.agents,
            invocations = stats.invocations,
            messages    = stats.messages,
            deaths      = stats.deaths,
            births      = stats.births,
            "step complete"
        );
        Ok(stats)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Steps completed so far.
    #[inline]
    pub fn current_step(&self) -> Step {
        self.step
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Mutable environment, for changes between steps.
    #[inline]
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn population(&self, name: &str) -> Option<&AgentStore<A>> {
        self.populations.get(name)
    }

    #[inline]
    pub fn populations(&self) -> &Populations<A> {
        &self.populations
    }

    /// The last published snapshot of a message list.
    pub fn message_list(&self, name: &str) -> Option<&MessageList<M>> {
        self.list_index.get(name).map(|id| &self.lists[id.index()])
    }

    /// A handle that stops [`run`](Self::run) at the next step boundary.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// `true` once an exit condition has fired.
    #[inline]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn ensure_init(&mut self) -> SimResult<()> {
        if self.initialised {
            return Ok(());
        }
        self.initialised = true;
        let mut ctx = HostContext {
            step:        self.step,
            env:         &mut self.env,
            populations: &mut self.populations,
            rng:         &mut self.rng,
        };
        HostFunctions::run_all(&mut self.host.init, &mut ctx)?;
        debug!(agents = self.populations.total_agents(), "init functions done");
        Ok(())
    }

    fn finish<O: SimObserver<A>>(&mut self, observer: &mut O) -> SimResult<()> {
        let mut ctx = HostContext {
            step:        self.step,
            env:         &mut self.env,
            populations: &mut self.populations,
            rng:         &mut self.rng,
        };
        HostFunctions::run_all(&mut self.host.exit, &mut ctx)?;
        observer.on_sim_end(self.step);
        info!(
            steps  = self.step.0,
            agents = self.populations.total_agents(),
            "simulation finished"
        );
        Ok(())
    }

    fn abort_step(&mut self) {
        for store in self.populations.stores_mut() {
            store.abort_step();
        }
        for list in &mut self.lists {
            list.rollback();
        }
    }

    fn execute_layer(&mut self, index: usize, stats: &mut StepStats) -> SimResult<()> {
        let layer = &self.layers[index];

        for &list in &layer.outputs {
            self.lists[list.index()].store_mut().clear_for_step();
        }

        for &fid in &layer.functions {
            let func = &self.functions[fid.index()];
            let inbox = func.input.map(|id| &self.lists[id.index()]);
            let store = self.populations.by_id_mut(func.population);
            let out = run_function(func, store, inbox, &self.env, self.step)?;

            trace!(
                layer    = %layer.name,
                function = %func.desc.name,
                ran      = out.ran,
                messages = out.messages.len(),
                deaths   = out.deaths,
                births   = out.births,
                "function done"
            );
            stats.invocations += out.ran;
            if let Some(list) = func.output {
                self.lists[list.index()].store_mut().extend(out.messages);
            }
        }

        for &list in &layer.outputs {
            let list = &mut self.lists[list.index()];
            list.publish_and_index();
            stats.messages += list.len();
            debug!(
                layer    = %layer.name,
                list     = list.name(),
                messages = list.len(),
                occupied = list.grid().occupied_cells(),
                "message list indexed"
            );
        }
        Ok(())
    }
}
