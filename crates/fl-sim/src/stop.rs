//! External stop signal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable flag that asks a running [`Sim`](crate::Sim) to stop.
///
/// The driver checks it only between steps, so a step in progress always
/// completes and state is never left half-swapped.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear a previous request so the sim can be resumed.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
