use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use regiondata_core::DatasetKind;

/// Where the run seed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    Configured,
    Random,
}

/// Summary of one written dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
    pub dataset: DatasetKind,
    pub schema_version: u32,
    pub path: PathBuf,
    pub rows_requested: u64,
    pub rows_generated: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    /// Seed that replays this run.
    pub seed: u64,
    pub seed_source: SeedSource,
    pub datasets: Vec<DatasetReport>,
    pub rows_total: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64, seed_source: SeedSource) -> Self {
        Self {
            run_id,
            seed,
            seed_source,
            datasets: Vec::new(),
            rows_total: 0,
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record_dataset(&mut self, dataset: DatasetReport) {
        self.rows_total += dataset.rows_generated;
        self.bytes_written += dataset.bytes_written;
        self.datasets.push(dataset);
    }

    pub fn dataset(&self, kind: DatasetKind) -> Option<&DatasetReport> {
        self.datasets.iter().find(|dataset| dataset.dataset == kind)
    }
}
