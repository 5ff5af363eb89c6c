//! A message list: spec + double-buffered store + spatial index.

use fl_core::Vec3;
use fl_spatial::{SpatialGrid, SpatialResult};

use crate::{Message, MessageSpec, MessageStore};

/// One named, radius-bounded message list.
///
/// After [`publish_and_index`](Self::publish_and_index) the published
/// messages are stored in cell order, so each grid bucket is a contiguous run
/// of [`read`](Self::read) and a neighbor query walks memory linearly.
pub struct MessageList<M> {
    spec:  MessageSpec,
    store: MessageStore<M>,
    grid:  SpatialGrid,
}

impl<M: Message> MessageList<M> {
    pub fn new(spec: MessageSpec) -> SpatialResult<Self> {
        let grid = SpatialGrid::new(spec.grid_spec()?)?;
        Ok(Self { spec, store: MessageStore::new(), grid })
    }

    #[inline]
    pub fn spec(&self) -> &MessageSpec {
        &self.spec
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.spec.radius
    }

    #[inline]
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Write side, for the emitting layer.
    #[inline]
    pub fn store_mut(&mut self) -> &mut MessageStore<M> {
        &mut self.store
    }

    /// Index the pending messages and publish them in cell order.
    pub fn publish_and_index(&mut self) {
        self.grid.rebuild(self.store.pending());
        self.store.publish_permuted(self.grid.order());
    }

    /// Accept this step's publishes.
    pub fn commit(&mut self) {
        self.store.commit();
    }

    /// Restore the snapshot and index as of the last [`commit`](Self::commit).
    ///
    /// The saved snapshot is already in cell order and the rebuild is stable,
    /// so re-indexing it maps every slot to itself.
    pub fn rollback(&mut self) {
        if self.store.rollback() {
            self.grid.rebuild(self.store.read());
        }
    }

    /// The published snapshot, in cell order.
    #[inline]
    pub fn read(&self) -> &[M] {
        self.store.read()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Candidate messages near `point` using the list's own radius.
    ///
    /// A superset of the messages within the radius; apply the exact distance
    /// test (and skip your own message) at the call site.
    pub fn neighbors(&self, point: Vec3) -> SpatialResult<impl Iterator<Item = &M> + '_> {
        let read = self.store.read();
        Ok(self.grid.query(point, self.spec.radius)?.map(move |slot| &read[slot]))
    }
}
