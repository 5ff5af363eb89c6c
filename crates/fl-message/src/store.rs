//! Double-buffered message storage.
//!
//! Emission appends to the *write* side.  [`publish`](MessageStore::publish)
//! turns the write side into the read-only snapshot and empties the write side
//! for the next emitting layer.  Readers never observe a partially written
//! list.
//!
//! The snapshot replaced by the first publish after a
//! [`commit`](MessageStore::commit) is kept until the next commit, so a
//! failed step can [`rollback`](MessageStore::rollback) to it.

use fl_core::Located;

/// Message types storable in a [`MessageStore`].  Blanket-implemented.
pub trait Message: Clone + Send + Sync + Located + 'static {}

impl<T: Clone + Send + Sync + Located + 'static> Message for T {}

pub struct MessageStore<M> {
    write:     Vec<M>,
    read:      Vec<M>,
    committed: Option<Vec<M>>,
}

impl<M> Default for MessageStore<M> {
    fn default() -> Self {
        Self { write: Vec::new(), read: Vec::new(), committed: None }
    }
}

impl<M: Message> MessageStore<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop anything emitted but not yet published.
    pub fn clear_for_step(&mut self) {
        self.write.clear();
    }

    pub fn emit(&mut self, msg: M) {
        self.write.push(msg);
    }

    pub fn extend(&mut self, msgs: impl IntoIterator<Item = M>) {
        self.write.extend(msgs);
    }

    /// Emitted and not yet published.
    #[inline]
    pub fn pending(&self) -> &[M] {
        &self.write
    }

    /// Make the write side the new snapshot, in emission order.
    pub fn publish(&mut self) {
        self.save_committed();
        std::mem::swap(&mut self.read, &mut self.write);
        self.write.clear();
    }

    /// Publish with the snapshot reordered so `read()[k] == pending()[order[k]]`.
    ///
    /// # Panics
    /// Panics if `order` indexes past the pending messages.
    pub fn publish_permuted(&mut self, order: &[u32]) {
        self.save_committed();
        self.read.extend(order.iter().map(|&i| self.write[i as usize].clone()));
        self.write.clear();
    }

    /// Accept every publish since the last commit.
    pub fn commit(&mut self) {
        self.committed = None;
    }

    /// Drop pending messages and restore the snapshot as of the last commit.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn rollback(&mut self) -> bool {
        self.write.clear();
        match self.committed.take() {
            Some(snapshot) => {
                self.read = snapshot;
                true
            }
            None => false,
        }
    }

    /// Move the current snapshot aside (first publish since a commit) or
    /// drop it, leaving `read` empty.
    fn save_committed(&mut self) {
        let old = std::mem::take(&mut self.read);
        if self.committed.is_none() {
            self.committed = Some(old);
        }
    }

    /// The published snapshot.
    #[inline]
    pub fn read(&self) -> &[M] {
        &self.read
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.read.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read.is_empty()
    }
}
