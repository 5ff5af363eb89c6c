//! Flock-level summaries computed with host reductions.

use fl_agent::AgentStore;
use fl_core::{Located, Vec3};

use crate::Boid;

/// Aggregate state of a population.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FlockStats {
    pub count:      usize,
    pub centroid:   Vec3,
    pub mean_speed: f32,
    pub max_speed:  f32,
}

impl FlockStats {
    pub fn of(store: &AgentStore<Boid>) -> Self {
        let count = store.len();
        if count == 0 {
            return Self::default();
        }
        let n = count as f32;
        let centroid = store.reduce(Vec3::ZERO, |b: &Boid| b.position(), |a, b| a + b) / n;
        let mean_speed = store.sum(|b: &Boid| b.speed()) / n;
        let max_speed = store.max(Boid::speed).unwrap_or(0.0);
        Self { count, centroid, mean_speed, max_speed }
    }

    /// Speed distribution over `[0, 1]` in `bins` equal bins.
    pub fn speed_histogram(store: &AgentStore<Boid>, bins: usize) -> Vec<u64> {
        // Speeds are capped at exactly 1; widen the top edge so they land in
        // the last bin.
        store.histogram_even(bins, 0.0, 1.0 + f64::from(f32::EPSILON), |b| b.speed() as f64)
    }
}
