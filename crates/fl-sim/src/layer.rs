//! Compiled layers and the agent function executor.
//!
//! # One function over one population
//!
//! ```text
//!   execute  (parallel with `parallel`)   one slot per row:
//!              dead row      → None
//!              live row      → Some(execute(ctx, &mut next[i], &mut rng[i]))
//!   check    (sequential, row order)      first error / permission violation aborts
//!   commit   (sequential, row order)      fates → alive flags, spawns → births,
//!                                         messages → compacted Vec
//! ```
//!
//! Each task touches only its own next row, RNG and result slot, so no
//! locks are needed and results are independent of thread scheduling.

use fl_agent::{AgentState, AgentStore, StoreParts};
use fl_core::{Environment, FunctionId, MessageListId, PopulationId, Step};
use fl_function::{AgentContext, FunctionDesc};
use fl_message::{Message, MessageList};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{SimError, SimResult};

/// A function with its names resolved to ids.
pub(crate) struct CompiledFunction<A, M> {
    pub desc:       FunctionDesc<A, M>,
    pub population: PopulationId,
    pub input:      Option<MessageListId>,
    pub output:     Option<MessageListId>,
}

/// A layer with its names resolved to ids.
pub(crate) struct CompiledLayer {
    pub name:      String,
    pub functions: Vec<FunctionId>,
    /// Message lists written by any function of the layer, deduplicated.
    pub outputs:   Vec<MessageListId>,
}

/// What running one function produced, besides row writes.
pub(crate) struct FunctionYield<M> {
    pub messages: Vec<M>,
    pub ran:      usize,
    pub deaths:   usize,
    pub births:   usize,
}

/// Run `func` over every live agent of `store`.
///
/// Deaths are recorded in the store's liveness flags and births are staged;
/// both take effect at the next swap.  On error nothing is committed.
pub(crate) fn run_function<A: AgentState, M: Message>(
    func:  &CompiledFunction<A, M>,
    store: &mut AgentStore<A>,
    inbox: Option<&MessageList<M>>,
    env:   &Environment,
    step:  Step,
) -> SimResult<FunctionYield<M>> {
    let desc = &func.desc;
    let StoreParts { ids, current, next, alive, rngs } = store.parts_mut();

    // ── Execute ───────────────────────────────────────────────────────────
    let live: &[bool] = alive;
    let run_one = |i: usize, next: &mut A, rng: &mut fl_core::AgentRng| {
        if !live[i] {
            return None;
        }
        let ctx = AgentContext::new(ids[i], i, &current[i], step, env, inbox);
        Some(desc.func.execute(&ctx, next, rng))
    };

    #[cfg(feature = "parallel")]
    let results: Vec<_> = next
        .par_iter_mut()
        .zip(rngs.par_iter_mut())
        .enumerate()
        .map(|(i, (next, rng))| run_one(i, next, rng))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = next
        .iter_mut()
        .zip(rngs.iter_mut())
        .enumerate()
        .map(|(i, (next, rng))| run_one(i, next, rng))
        .collect();

    // ── Check ─────────────────────────────────────────────────────────────
    let mut outcomes = Vec::with_capacity(results.len());
    for (i, result) in results.into_iter().enumerate() {
        let Some(result) = result else { continue };
        let agent = ids[i];
        let out = result.map_err(|source| SimError::Function {
            function: desc.name.clone(),
            agent,
            source,
        })?;

        if out.is_dead() && !desc.allow_death {
            return Err(SimError::UnexpectedDeath { function: desc.name.clone(), agent });
        }
        if out.spawn.is_some() && !desc.allow_spawn {
            return Err(SimError::UnexpectedSpawn { function: desc.name.clone(), agent });
        }
        match (&desc.message_output, &out.message) {
            (None, Some(_)) => {
                return Err(SimError::UnexpectedMessage { function: desc.name.clone(), agent });
            }
            (Some(list), None) if !desc.optional_output => {
                return Err(SimError::MissingMessage {
                    function: desc.name.clone(),
                    list:     list.clone(),
                    agent,
                });
            }
            _ => {}
        }
        outcomes.push((i, out));
    }

    // ── Commit ────────────────────────────────────────────────────────────
    let ran = outcomes.len();
    let mut messages = Vec::with_capacity(ran);
    let mut births = Vec::new();
    let mut deaths = 0;
    for (i, out) in outcomes {
        if out.is_dead() {
            alive[i] = false;
            deaths += 1;
        }
        births.extend(out.spawn);
        messages.extend(out.message);
    }

    let born = births.len();
    store.stage_births(births);
    Ok(FunctionYield { messages, ran, deaths, births: born })
}
