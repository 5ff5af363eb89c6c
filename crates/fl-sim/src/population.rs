//! Named collection of agent stores, one per agent type.

use rustc_hash::FxHashMap;

use fl_agent::{AgentState, AgentStore};
use fl_core::PopulationId;

/// Every population of a run, indexed by [`PopulationId`] and by name.
///
/// Ids follow declaration order in the model description.
pub struct Populations<A> {
    names:  Vec<String>,
    stores: Vec<AgentStore<A>>,
    index:  FxHashMap<String, PopulationId>,
}

impl<A: AgentState> Populations<A> {
    pub(crate) fn new(entries: Vec<(String, AgentStore<A>)>) -> Self {
        let mut names = Vec::with_capacity(entries.len());
        let mut stores = Vec::with_capacity(entries.len());
        let mut index = FxHashMap::default();
        for (i, (name, store)) in entries.into_iter().enumerate() {
            index.insert(name.clone(), PopulationId(i as u16));
            names.push(name);
            stores.push(store);
        }
        Self { names, stores, index }
    }

    pub fn id(&self, name: &str) -> Option<PopulationId> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&AgentStore<A>> {
        self.id(name).map(|id| &self.stores[id.index()])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AgentStore<A>> {
        let id = self.id(name)?;
        Some(&mut self.stores[id.index()])
    }

    #[inline]
    pub fn by_id(&self, id: PopulationId) -> &AgentStore<A> {
        &self.stores[id.index()]
    }

    #[inline]
    pub(crate) fn by_id_mut(&mut self, id: PopulationId) -> &mut AgentStore<A> {
        &mut self.stores[id.index()]
    }

    #[inline]
    pub fn name(&self, id: PopulationId) -> &str {
        &self.names[id.index()]
    }

    /// Number of agent types.
    #[inline]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Agents across all populations.
    pub fn total_agents(&self) -> usize {
        self.stores.iter().map(AgentStore::len).sum()
    }

    /// `(name, store)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentStore<A>)> + '_ {
        self.names.iter().map(String::as_str).zip(self.stores.iter())
    }

    pub(crate) fn stores_mut(&mut self) -> &mut [AgentStore<A>] {
        &mut self.stores
    }
}
