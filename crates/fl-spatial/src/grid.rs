//! Uniform 3D grid over a fixed box, rebuilt from scratch every step.
//!
//! # Layout
//!
//! The box `[min, max]` is cut into `nx × ny × nz` cubes of edge `cell_size`.
//! After [`SpatialGrid::rebuild`] the items are described in CSR form:
//!
//! ```text
//!   cell_start: [0, 0, 3, 3, 5, ...]     len = cells + 1
//!   order:      [7, 2, 9, 0, 4, ...]     len = items
//!                ^^^^^^^  ^^^^
//!                cell 1   cell 3
//! ```
//!
//! Slots `cell_start[c] .. cell_start[c + 1]` of the cell-sorted sequence belong
//! to cell `c`, and `order[slot]` is the item's index in the input slice.  The
//! union of all buckets is every item exactly once.
//!
//! # Rebuild
//!
//! Count, prefix-sum, scatter; O(items + cells).  The key pass can run in
//! parallel; the scatter is sequential and stable (items in a bucket keep
//! input order), so identical input always yields an identical index.
//!
//! # Queries
//!
//! With `radius <= cell_size` every item within `radius` of a point lies in
//! the 3×3×3 block of cells around the point's cell.  [`Neighbors`] walks that
//! block lazily.  Candidates are a superset of the true neighbors; callers
//! apply the exact distance test.

use std::iter::FusedIterator;
use std::ops::Range;

use fl_core::{Bounds, Located, Vec3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{SpatialError, SpatialResult};

/// Upper bound on `nx * ny * nz`.
pub const MAX_CELLS: u64 = 1 << 27;

/// Integer cell coordinates `(cx, cy, cz)`.
pub type CellKey = [u32; 3];

// ── GridSpec ──────────────────────────────────────────────────────────────────

/// Geometry of a grid: cell edge length plus the covered box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    pub cell_size: f32,
    pub bounds:    Bounds,
}

impl GridSpec {
    /// Build and validate a spec.
    pub fn new(cell_size: f32, bounds: Bounds) -> SpatialResult<Self> {
        let spec = Self { cell_size, bounds };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> SpatialResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(SpatialError::InvalidCellSize(self.cell_size));
        }
        if !self.bounds.is_valid() {
            return Err(SpatialError::InvalidBounds(self.bounds));
        }
        let cells = self.dims().iter().fold(1u64, |acc, &n| acc.saturating_mul(n as u64));
        if cells > MAX_CELLS {
            return Err(SpatialError::GridTooLarge { cells });
        }
        Ok(())
    }

    /// Cells per axis: `ceil(extent / cell_size)`, at least 1.
    pub fn dims(&self) -> [u32; 3] {
        self.bounds.extent().to_array().map(|e| {
            let n = (e / self.cell_size).ceil();
            if n >= 1.0 { n.min(u32::MAX as f32) as u32 } else { 1 }
        })
    }
}

// ── KeyMapper ─────────────────────────────────────────────────────────────────

/// Position → cell mapping, `Copy` so the parallel key pass can capture it by
/// value while the grid's buffers are borrowed mutably.
#[derive(Copy, Clone, Debug)]
struct KeyMapper {
    min:       Vec3,
    cell_size: f32,
    dims:      [u32; 3],
}

impl KeyMapper {
    #[inline]
    fn key(&self, p: Vec3) -> CellKey {
        let rel = (p - self.min).to_array();
        let mut key = [0u32; 3];
        for axis in 0..3 {
            // `as i64` saturates and maps NaN to 0; then clamp into the grid.
            let c = (rel[axis] / self.cell_size).floor() as i64;
            key[axis] = c.clamp(0, self.dims[axis] as i64 - 1) as u32;
        }
        key
    }

    #[inline]
    fn linear(&self, key: CellKey) -> usize {
        let [nx, ny, _] = self.dims.map(|n| n as usize);
        key[0] as usize + nx * (key[1] as usize + ny * key[2] as usize)
    }
}

// ── SpatialGrid ───────────────────────────────────────────────────────────────

/// Bucketed index over one snapshot of located items.
///
/// The grid stores only bucket metadata and a permutation; it does not own or
/// copy the items.  Item indices are `u32`.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    spec:       GridSpec,
    mapper:     KeyMapper,
    cell_start: Vec<u32>,
    order:      Vec<u32>,
    keys:       Vec<u32>,
    cursor:     Vec<u32>,
    occupied:   usize,
}

impl SpatialGrid {
    /// An empty grid for `spec`.  Allocates the offset table once.
    pub fn new(spec: GridSpec) -> SpatialResult<Self> {
        spec.validate()?;
        let dims = spec.dims();
        let cells = dims.iter().map(|&n| n as usize).product::<usize>();
        Ok(Self {
            mapper:     KeyMapper { min: spec.bounds.min, cell_size: spec.cell_size, dims },
            cell_start: vec![0; cells + 1],
            order:      Vec::new(),
            keys:       Vec::new(),
            cursor:     vec![0; cells],
            occupied:   0,
            spec,
        })
    }

    // ── Introspection ─────────────────────────────────────────────────────

    #[inline]
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.spec.cell_size
    }

    #[inline]
    pub fn dims(&self) -> [u32; 3] {
        self.mapper.dims
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_start.len() - 1
    }

    /// Items covered by the last rebuild.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of non-empty cells after the last rebuild.
    #[inline]
    pub fn occupied_cells(&self) -> usize {
        self.occupied
    }

    /// Clamped cell of point `p`.
    #[inline]
    pub fn cell_key(&self, p: Vec3) -> CellKey {
        self.mapper.key(p)
    }

    /// Row-major linear index `cx + nx * (cy + ny * cz)`.
    #[inline]
    pub fn linear_index(&self, key: CellKey) -> usize {
        self.mapper.linear(key)
    }

    /// Slots of the cell-sorted sequence belonging to `cell`.
    ///
    /// # Panics
    /// Panics if `cell >= cell_count()`.
    #[inline]
    pub fn bucket(&self, cell: usize) -> Range<usize> {
        self.cell_start[cell] as usize..self.cell_start[cell + 1] as usize
    }

    /// `order()[slot]` is the input index of the item in sorted `slot`.
    #[inline]
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Re-index `items` from scratch.  Any previous contents are discarded.
    ///
    /// Only the key pass runs in parallel.  Counting, prefix sum and scatter
    /// are sequential, so `order` depends on input order alone and sorted
    /// input maps every slot to itself.
    pub fn rebuild<T: Located + Sync>(&mut self, items: &[T]) {
        let mapper = self.mapper;

        // ── Pass 1: cell key per item ────────────────────────────────────────
        #[cfg(feature = "parallel")]
        items
            .par_iter()
            .map(|it| mapper.linear(mapper.key(it.position())) as u32)
            .collect_into_vec(&mut self.keys);

        #[cfg(not(feature = "parallel"))]
        {
            self.keys.clear();
            self.keys.extend(items.iter().map(|it| mapper.linear(mapper.key(it.position())) as u32));
        }

        // ── Pass 2: histogram + exclusive prefix sum ─────────────────────────
        self.cell_start.fill(0);
        for &k in &self.keys {
            self.cell_start[k as usize + 1] += 1;
        }
        self.occupied = self.cell_start[1..].iter().filter(|&&c| c > 0).count();
        for c in 0..self.cell_count() {
            self.cell_start[c + 1] += self.cell_start[c];
        }

        // ── Pass 3: stable scatter ───────────────────────────────────────────
        self.cursor.copy_from_slice(&self.cell_start[..self.cell_start.len() - 1]);
        self.order.clear();
        self.order.resize(items.len(), 0);
        for (i, &k) in self.keys.iter().enumerate() {
            let slot = &mut self.cursor[k as usize];
            self.order[*slot as usize] = i as u32;
            *slot += 1;
        }
    }

    // ── Query ─────────────────────────────────────────────────────────────

    /// Candidate slots for every item within `radius` of `point`.
    ///
    /// Yields positions in the cell-sorted sequence; map through
    /// [`order`](Self::order) (or use [`query_items`](Self::query_items)) to
    /// get input indices.
    pub fn query(&self, point: Vec3, radius: f32) -> SpatialResult<Neighbors<'_>> {
        if radius.is_nan() || radius > self.spec.cell_size {
            return Err(SpatialError::RadiusExceedsCellSize {
                radius,
                cell_size: self.spec.cell_size,
            });
        }
        Ok(Neighbors::new(self, self.mapper.key(point)))
    }

    /// Like [`query`](Self::query) but yields input indices.
    pub fn query_items(
        &self,
        point: Vec3,
        radius: f32,
    ) -> SpatialResult<impl Iterator<Item = usize> + '_> {
        Ok(self.query(point, radius)?.map(move |slot| self.order[slot] as usize))
    }
}

// ── Neighbors ─────────────────────────────────────────────────────────────────

/// Lazy walk over the 27-cell block around a query cell.
///
/// Cells outside the grid are skipped (no wraparound).  Finite and not
/// restartable; dropping it early is fine.
pub struct Neighbors<'g> {
    grid:   &'g SpatialGrid,
    center: [i64; 3],
    offset: u8,
    slots:  Range<usize>,
}

impl<'g> Neighbors<'g> {
    fn new(grid: &'g SpatialGrid, key: CellKey) -> Self {
        Self {
            grid,
            center: key.map(i64::from),
            offset: 0,
            slots:  0..0,
        }
    }

    /// Advance to the next in-grid cell of the block; `false` once all 27
    /// offsets are spent.
    fn next_cell(&mut self) -> bool {
        let dims = self.grid.mapper.dims;
        while self.offset < 27 {
            let o = self.offset as i64;
            self.offset += 1;
            let c = [
                self.center[0] + o % 3 - 1,
                self.center[1] + (o / 3) % 3 - 1,
                self.center[2] + o / 9 - 1,
            ];
            if (0..3).any(|a| c[a] < 0 || c[a] >= dims[a] as i64) {
                continue;
            }
            let cell = self.grid.mapper.linear(c.map(|v| v as u32));
            self.slots = self.grid.bucket(cell);
            return true;
        }
        false
    }
}

impl Iterator for Neighbors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some(slot) = self.slots.next() {
                return Some(slot);
            }
            if !self.next_cell() {
                return None;
            }
        }
    }
}

impl FusedIterator for Neighbors<'_> {}
