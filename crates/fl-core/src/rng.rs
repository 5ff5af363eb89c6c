//! Deterministic per-agent and run-level RNG wrappers.
//!
//! Each agent owns a `SmallRng` seeded from the run seed mixed with its
//! stable `AgentId` (multiplied by the 64-bit golden-ratio constant).  The
//! stream therefore belongs to the agent, not to its storage row or to the
//! worker thread that happens to run it, and survives compaction after
//! deaths unchanged.
//!
//! `SimRng` is the single generator used outside the step loop: population
//! generation and host functions.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Bounds, Vec3};

const GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent RNG handed to agent functions as `&mut`.
#[derive(Clone)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        Self(SmallRng::seed_from_u64(run_seed ^ u64::from(agent.0).wrapping_mul(GOLDEN)))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG.  Single-threaded use only.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }

    /// A point drawn uniformly from the closed box `bounds`.
    pub fn point_in(&mut self, bounds: &Bounds) -> Vec3 {
        Vec3::new(
            self.0.gen_range(bounds.min.x..=bounds.max.x),
            self.0.gen_range(bounds.min.y..=bounds.max.y),
            self.0.gen_range(bounds.min.z..=bounds.max.z),
        )
    }

    /// A unit-length direction.
    ///
    /// Components are drawn from `[-1, 1]` and normalised; a near-zero draw
    /// is retried so the result is never NaN.
    pub fn direction(&mut self) -> Vec3 {
        loop {
            let v = Vec3::new(
                self.0.gen_range(-1.0..=1.0),
                self.0.gen_range(-1.0..=1.0),
                self.0.gen_range(-1.0..=1.0),
            );
            let len = v.length();
            if len > f32::EPSILON {
                return v / len;
            }
        }
    }
}
