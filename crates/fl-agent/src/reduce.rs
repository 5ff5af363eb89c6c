//! Host-side reductions over a population's current buffer.
//!
//! These run single-threaded between steps (init, step and exit host
//! functions, observers).  They never see staged writes.

use crate::{AgentState, AgentStore};

impl<A: AgentState> AgentStore<A> {
    /// Sum of `f` over every agent.
    pub fn sum<T, F>(&self, f: F) -> T
    where
        T: std::iter::Sum<T>,
        F: Fn(&A) -> T,
    {
        self.current().iter().map(f).sum()
    }

    /// Smallest value of `f`; `None` for an empty population.  NaN values
    /// never win.
    pub fn min<T, F>(&self, f: F) -> Option<T>
    where
        T: PartialOrd + Copy,
        F: Fn(&A) -> T,
    {
        self.current().iter().map(f).fold(None, |best, v| match best {
            Some(b) if v < b => Some(v),
            None if is_comparable(v) => Some(v),
            _ => best,
        })
    }

    /// Largest value of `f`; `None` for an empty population.  NaN values
    /// never win.
    pub fn max<T, F>(&self, f: F) -> Option<T>
    where
        T: PartialOrd + Copy,
        F: Fn(&A) -> T,
    {
        self.current().iter().map(f).fold(None, |best, v| match best {
            Some(b) if v > b => Some(v),
            None if is_comparable(v) => Some(v),
            _ => best,
        })
    }

    /// General fold: map each agent with `map`, combine with `fold` starting
    /// from `init`.
    pub fn reduce<T, M, R>(&self, init: T, map: M, fold: R) -> T
    where
        M: Fn(&A) -> T,
        R: Fn(T, T) -> T,
    {
        self.current().iter().map(map).fold(init, fold)
    }

    /// Number of agents satisfying `pred`.
    pub fn count<P>(&self, pred: P) -> usize
    where
        P: Fn(&A) -> bool,
    {
        self.current().iter().filter(|a| pred(a)).count()
    }

    /// Histogram of `f` over `bins` equal-width bins spanning
    /// `[lower, upper)`.  Values outside the range (and NaN) are not counted.
    /// Returns an empty vector when `bins == 0`.
    pub fn histogram_even<F>(&self, bins: usize, lower: f64, upper: f64, f: F) -> Vec<u64>
    where
        F: Fn(&A) -> f64,
    {
        let mut counts = vec![0u64; bins];
        if bins == 0 || lower.is_nan() || upper.is_nan() || upper <= lower {
            return counts;
        }
        let width = (upper - lower) / bins as f64;
        for v in self.current().iter().map(f) {
            if v >= lower && v < upper {
                let bin = (((v - lower) / width) as usize).min(bins - 1);
                counts[bin] += 1;
            }
        }
        counts
    }
}

// `false` only for values unordered with themselves (NaN).
#[inline]
fn is_comparable<T: PartialOrd>(v: T) -> bool {
    v.partial_cmp(&v).is_some()
}
