//! Double-buffered agent storage: `AgentStore<A>` and `AgentRngs`.
//!
//! # Buffers
//!
//! Each population keeps two row buffers of the same length.  Agent functions
//! read the *current* buffer (the start-of-step snapshot) and write their own
//! row of the *next* buffer.  Nothing written during a step is visible to a
//! read of the current buffer until the driver calls [`AgentStore::swap`].
//!
//! ```text
//!   Idle ──begin_step()──▶ Staged ──swap()──▶ Idle
//!            next := current        current := next
//!            save RNG states        drop dead rows, append births
//!                                │
//!                                └──abort_step()──▶ Idle
//!                                     restore RNG states and id counter,
//!                                     drop deaths, births and next writes
//! ```
//!
//! # Why split borrows?
//!
//! The executor needs `&[A]` (current), `&mut [A]` (next), `&mut [AgentRng]`
//! and `&mut [bool]` (liveness) at the same time.  [`AgentStore::parts_mut`]
//! hands them out as disjoint field borrows in one struct, so the parallel
//! loop can zip them without any `unsafe`.

use fl_core::{AgentId, AgentRng, Located};

/// Row types storable in an [`AgentStore`].
///
/// Blanket-implemented; a model only has to derive `Clone` and implement
/// [`Located`].
pub trait AgentState: Clone + Send + Sync + Located + 'static {}

impl<T: Clone + Send + Sync + Located + 'static> AgentState for T {}

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, row-aligned with the store.
///
/// Seeds derive from the stable `AgentId`, so compaction after a death moves
/// the generator along with its agent rather than reseeding it.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(ids: &[AgentId], global_seed: u64) -> Self {
        let inner = ids.iter().map(|&id| AgentRng::new(global_seed, id)).collect();
        Self { inner }
    }

    /// Mutable reference to the RNG of the agent in `row`.
    #[inline]
    pub fn get_mut(&mut self, row: usize) -> &mut AgentRng {
        &mut self.inner[row]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── StoreParts ────────────────────────────────────────────────────────────────

/// Disjoint borrows of one store's buffers for a single layer.
pub struct StoreParts<'a, A> {
    pub ids:     &'a [AgentId],
    pub current: &'a [A],
    pub next:    &'a mut [A],
    pub alive:   &'a mut [bool],
    pub rngs:    &'a mut [AgentRng],
}

/// What a [`AgentStore::swap`] changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SwapStats {
    pub removed: usize,
    pub born:    usize,
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Double-buffered storage for one population.
///
/// Rows are addressed by position (`row`); identities by [`AgentId`].  `ids`
/// is strictly ascending because ids come from a monotonic counter and new
/// agents are only ever appended, so [`get`](Self::get) is a binary search.
pub struct AgentStore<A> {
    ids:     Vec<AgentId>,
    current: Vec<A>,
    next:    Vec<A>,
    alive:   Vec<bool>,
    births:  Vec<(AgentId, A)>,
    rngs:    AgentRngs,
    next_id: u32,
    seed:    u64,
    staged:  bool,
    /// RNG states and id counter as of `begin_step`, for `abort_step`.
    saved_rngs: Vec<AgentRng>,
    saved_id:   u32,
}

impl<A: AgentState> AgentStore<A> {
    /// An empty store whose agents will seed their RNGs from `seed`.
    pub fn new(seed: u64) -> Self {
        Self::from_rows(Vec::new(), seed)
    }

    pub(crate) fn from_rows(rows: Vec<A>, seed: u64) -> Self {
        let ids: Vec<AgentId> = (0..rows.len() as u32).map(AgentId).collect();
        let rngs = AgentRngs::new(&ids, seed);
        Self {
            next_id: ids.len() as u32,
            alive:   vec![true; rows.len()],
            next:    Vec::new(),
            births:  Vec::new(),
            current: rows,
            ids,
            rngs,
            seed,
            staged:  false,
            saved_rngs: Vec::new(),
            saved_id:   0,
        }
    }

    /// Add an agent and return its new id.
    ///
    /// Between steps the row joins the current buffer immediately.  While a
    /// step is staged it is queued as a birth and appears after the next
    /// [`swap`](Self::swap); its id is assigned now either way.
    pub fn create(&mut self, row: A) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        if self.staged {
            self.births.push((id, row));
        } else {
            self.ids.push(id);
            self.current.push(row);
            self.alive.push(true);
            self.rngs.inner.push(AgentRng::new(self.seed, id));
        }
        id
    }

    // ── Reads (current buffer) ────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Agent ids in row order (strictly ascending).
    #[inline]
    pub fn ids(&self) -> &[AgentId] {
        &self.ids
    }

    /// The start-of-step snapshot.
    #[inline]
    pub fn current(&self) -> &[A] {
        &self.current
    }

    #[inline]
    pub fn read_current(&self, row: usize) -> &A {
        &self.current[row]
    }

    /// Row position of `id`, if the agent is still present.
    pub fn row_of(&self, id: AgentId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    /// Current row of agent `id`.
    pub fn get(&self, id: AgentId) -> Option<&A> {
        self.row_of(id).map(|row| &self.current[row])
    }

    /// `(id, row)` pairs of the current buffer.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &A)> + '_ {
        self.ids.iter().copied().zip(self.current.iter())
    }

    /// The id the next created agent will receive.
    #[inline]
    pub fn next_id(&self) -> AgentId {
        AgentId(self.next_id)
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `true` between [`begin_step`](Self::begin_step) and [`swap`](Self::swap).
    #[inline]
    pub fn is_staged(&self) -> bool {
        self.staged
    }

    // ── Writes (next buffer) ──────────────────────────────────────────────

    /// Initialise the next buffer as a copy of the current one.
    ///
    /// Rows no function writes therefore carry over unchanged.  Calling this
    /// twice without a swap resets the staged writes.
    pub fn begin_step(&mut self) {
        if self.staged {
            self.abort_step();
        }
        self.next.clone_from(&self.current);
        self.alive.clear();
        self.alive.resize(self.current.len(), true);
        self.births.clear();
        self.saved_rngs.clone_from(&self.rngs.inner);
        self.saved_id = self.next_id;
        self.staged = true;
    }

    /// Undo everything since [`begin_step`](Self::begin_step).
    ///
    /// Deaths, births and next-buffer writes are discarded, ids handed out
    /// since `begin_step` become free again and every RNG is back at its
    /// `begin_step` state, so re-running the step draws the same numbers.
    /// A call outside a staged step changes nothing.
    pub fn abort_step(&mut self) {
        if !self.staged {
            return;
        }
        self.staged = false;
        std::mem::swap(&mut self.rngs.inner, &mut self.saved_rngs);
        self.next_id = self.saved_id;
        self.births.clear();
        self.alive.clear();
        self.alive.resize(self.current.len(), true);
    }

    /// Stage `row` as the next-step value of the agent in position `index`.
    ///
    /// # Panics
    /// Panics if no step is staged or `index` is out of range.
    pub fn write_next(&mut self, index: usize, row: A) {
        assert!(self.staged, "write_next outside a staged step");
        self.next[index] = row;
    }

    /// The staged next-step value of `index`.
    pub fn read_next(&self, index: usize) -> Option<&A> {
        if self.staged { self.next.get(index) } else { None }
    }

    #[inline]
    pub fn is_alive(&self, row: usize) -> bool {
        self.alive.get(row).copied().unwrap_or(false)
    }

    /// Mark the agent in `row` for removal at the next swap.
    pub fn mark_dead(&mut self, row: usize) {
        if let Some(flag) = self.alive.get_mut(row) {
            *flag = false;
        }
    }

    /// Number of rows not marked dead.
    pub fn live_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Disjoint borrows of every per-row buffer.  Only meaningful while a
    /// step is staged; `next` is empty otherwise.
    pub fn parts_mut(&mut self) -> StoreParts<'_, A> {
        let rows = if self.staged { self.next.len() } else { 0 };
        StoreParts {
            ids:     &self.ids,
            current: &self.current,
            next:    &mut self.next[..rows],
            alive:   &mut self.alive,
            rngs:    &mut self.rngs.inner,
        }
    }

    pub fn rngs_mut(&mut self) -> &mut AgentRngs {
        &mut self.rngs
    }

    /// Promote the next buffer.
    ///
    /// Survivors keep their relative order; births are appended in staging
    /// order.  A call without a preceding `begin_step` changes nothing.
    pub fn swap(&mut self) -> SwapStats {
        if !self.staged {
            return SwapStats::default();
        }
        self.staged = false;
        std::mem::swap(&mut self.current, &mut self.next);

        let before = self.current.len();
        if self.alive.iter().any(|&a| !a) {
            retain_mask(&mut self.current, &self.alive);
            retain_mask(&mut self.ids, &self.alive);
            retain_mask(&mut self.rngs.inner, &self.alive);
        }
        let removed = before - self.current.len();

        let born = self.births.len();
        for (id, row) in self.births.drain(..) {
            self.ids.push(id);
            self.current.push(row);
            self.rngs.inner.push(AgentRng::new(self.seed, id));
        }

        self.alive.clear();
        self.alive.resize(self.current.len(), true);
        SwapStats { removed, born }
    }

    /// Queue births collected by the executor.  Ids are assigned in iteration
    /// order.
    pub fn stage_births(&mut self, rows: impl IntoIterator<Item = A>) {
        for row in rows {
            let id = AgentId(self.next_id);
            self.next_id += 1;
            self.births.push((id, row));
        }
    }

    /// Births queued for the next swap.
    pub fn pending_births(&self) -> usize {
        self.births.len()
    }
}

/// Keep `v[i]` iff `mask[i]`; rows past the end of `mask` are dropped.
fn retain_mask<T>(v: &mut Vec<T>, mask: &[bool]) {
    let mut keep = mask.iter().copied();
    v.retain(|_| keep.next().unwrap_or(false));
}
