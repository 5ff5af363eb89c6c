//! `fl-output` — simulation output writers for the rust_flock engine.
//!
//! | Backend | Files created                                              |
//! |---------|------------------------------------------------------------|
//! | CSV     | `step_summaries.csv`, `<population>_snapshots.csv`         |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `fl_sim::SimObserver`.  Agent row
//! types opt in to snapshots by implementing [`SnapshotRecord`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use fl_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{SnapshotRecord, StepSummaryRow};
pub use writer::OutputWriter;
