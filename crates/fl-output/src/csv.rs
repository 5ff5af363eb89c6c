//! CSV output backend.
//!
//! Creates, in the configured output directory:
//! - `step_summaries.csv`, opened up front;
//! - `<population>_snapshots.csv`, opened on the first snapshot of that
//!   population.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::debug;

use fl_agent::{AgentState, AgentStore};
use fl_core::Step;

use crate::writer::OutputWriter;
use crate::{OutputResult, SnapshotRecord, StepSummaryRow};

const SUMMARY_HEADER: [&str; 6] = ["step", "agents", "invocations", "messages", "deaths", "births"];

/// Writes step summaries and per-population agent snapshots to CSV files.
pub struct CsvWriter {
    dir:       PathBuf,
    summaries: Writer<File>,
    snapshots: Vec<(String, Writer<File>)>,
    fields:    Vec<String>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open `step_summaries.csv` and write its header.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            dir:       dir.to_path_buf(),
            summaries,
            snapshots: Vec::new(),
            fields:    Vec::new(),
            finished:  false,
        })
    }

    /// Path of the snapshot file for `population`.
    pub fn snapshot_path(&self, population: &str) -> PathBuf {
        self.dir.join(format!("{}_snapshots.csv", population.to_lowercase()))
    }

    fn snapshot_writer(&mut self, population: &str, columns: &[&str]) -> OutputResult<usize> {
        if let Some(pos) = self.snapshots.iter().position(|(p, _)| p == population) {
            return Ok(pos);
        }
        let path = self.snapshot_path(population);
        let mut w = Writer::from_path(&path)?;
        w.write_record(["step", "id"].iter().chain(columns))?;
        debug!(path = %path.display(), "snapshot file opened");
        self.snapshots.push((population.to_string(), w));
        Ok(self.snapshots.len() - 1)
    }
}

impl<A: AgentState + SnapshotRecord> OutputWriter<A> for CsvWriter {
    fn write_snapshot(
        &mut self,
        completed:  Step,
        population: &str,
        store:      &AgentStore<A>,
    ) -> OutputResult<()> {
        let pos = self.snapshot_writer(population, A::COLUMNS)?;
        let step = completed.0.to_string();
        let (_, w) = &mut self.snapshots[pos];
        for (id, row) in store.iter() {
            self.fields.clear();
            self.fields.push(step.clone());
            self.fields.push(id.0.to_string());
            row.write_fields(&mut self.fields);
            w.write_record(&self.fields)?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.agents.to_string(),
            row.invocations.to_string(),
            row.messages.to_string(),
            row.deaths.to_string(),
            row.births.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        for (_, w) in &mut self.snapshots {
            w.flush()?;
        }
        Ok(())
    }
}
