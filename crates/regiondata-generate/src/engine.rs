use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use regiondata_core::{
    DatasetKind, GeneratorConfig, TextEncoding, validate_project_config, validate_water_config,
};

use crate::errors::GenerationError;
use crate::generators::project::generate_projects;
use crate::generators::water::generate_water_points;
use crate::generators::{Record, resolve_seed};
use crate::model::{DatasetReport, GenerationReport, SeedSource};
use crate::output::{CsvFormat, write_dataset};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub report: GenerationReport,
    pub report_path: Option<PathBuf>,
}

/// Entry point for generating datasets from a configuration.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    config: GeneratorConfig,
    report_path: Option<PathBuf>,
}

impl GenerationEngine {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            report_path: None,
        }
    }

    /// Also write the run report as JSON to `path` after a successful run.
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate and write the selected datasets.
    ///
    /// Every selected configuration is validated before the first file is
    /// opened.
    pub fn run(&self, datasets: &[DatasetKind]) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let datasets = dedup(datasets);
        if datasets.is_empty() {
            return Err(GenerationError::Configuration(
                "no dataset selected".to_string(),
            ));
        }
        for kind in &datasets {
            match kind {
                DatasetKind::Projects => validate_project_config(&self.config.projects)?,
                DatasetKind::Water => validate_water_config(&self.config.water)?,
            }
        }

        let (seed, seed_source) = match self.config.seed {
            Some(seed) => (seed, SeedSource::Configured),
            None => (resolve_seed(None), SeedSource::Random),
        };
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = GenerationReport::new(run_id.clone(), seed, seed_source);

        info!(
            run_id = %run_id,
            seed,
            datasets = datasets.len(),
            out_dir = %self.config.out_dir.display(),
            "generation started"
        );

        let outcome = std::fs::create_dir_all(&self.config.out_dir)
            .map_err(GenerationError::from)
            .and_then(|()| self.generate_all(&datasets, seed, &mut report))
            .and_then(|()| {
                report.duration_ms = elapsed_ms(start);
                match &self.report_path {
                    Some(path) => write_report(path, &report),
                    None => Ok(()),
                }
            });

        match outcome {
            Ok(()) => {
                info!(
                    run_id = %run_id,
                    datasets = report.datasets.len(),
                    rows = report.rows_total,
                    bytes_written = report.bytes_written,
                    duration_ms = report.duration_ms,
                    "generation completed"
                );
                Ok(GenerationResult {
                    report,
                    report_path: self.report_path.clone(),
                })
            }
            Err(err) => {
                warn!(run_id = %run_id, kind = %err.kind(), error = %err, "generation failed");
                Err(err)
            }
        }
    }

    fn generate_all(
        &self,
        datasets: &[DatasetKind],
        seed: u64,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        for kind in datasets {
            let dataset = match kind {
                DatasetKind::Projects => {
                    let config = &self.config.projects;
                    info!(dataset = %kind, rows = config.count, "generating dataset");
                    let started = Instant::now();
                    let records = generate_projects(config, seed)?;
                    self.write(
                        &records,
                        config.count,
                        &config.filename,
                        CsvFormat {
                            delimiter: config.delimiter,
                            encoding: config.encoding,
                        },
                        started,
                    )?
                }
                DatasetKind::Water => {
                    let config = &self.config.water;
                    info!(dataset = %kind, rows = config.count, "generating dataset");
                    let started = Instant::now();
                    let records = generate_water_points(config, seed)?;
                    self.write(
                        &records,
                        config.count,
                        &config.filename,
                        CsvFormat {
                            delimiter: config.delimiter,
                            encoding: config.encoding,
                        },
                        started,
                    )?
                }
            };
            report.record_dataset(dataset);
        }
        Ok(())
    }

    fn write<R: Record>(
        &self,
        records: &[R],
        rows_requested: u64,
        filename: &str,
        format: CsvFormat,
        started: Instant,
    ) -> Result<DatasetReport, GenerationError> {
        let schema = R::KIND.schema();
        let path = self.config.out_dir.join(filename);
        let bytes_written = write_dataset(&path, &schema, records, format)?;
        let duration_ms = elapsed_ms(started);

        info!(
            dataset = %R::KIND,
            path = %path.display(),
            rows = records.len(),
            bytes_written,
            bom = format.encoding == TextEncoding::Utf8Bom,
            duration_ms,
            "dataset written"
        );

        Ok(DatasetReport {
            dataset: R::KIND,
            schema_version: schema.version,
            path,
            rows_requested,
            rows_generated: records.len() as u64,
            bytes_written,
            duration_ms,
        })
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn dedup(datasets: &[DatasetKind]) -> Vec<DatasetKind> {
    let mut unique = Vec::with_capacity(datasets.len());
    for kind in datasets {
        if !unique.contains(kind) {
            unique.push(*kind);
        }
    }
    unique
}

fn write_report(path: &Path, report: &GenerationReport) -> Result<(), GenerationError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_vec_pretty(report)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn elapsed_ms_counts_whole_milliseconds() {
        let start = Instant::now() - Duration::from_millis(1_500);
        let elapsed = elapsed_ms(start);
        assert!((1_500..60_000).contains(&elapsed), "{elapsed}");
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let kinds = [DatasetKind::Water, DatasetKind::Projects, DatasetKind::Water];
        assert_eq!(dedup(&kinds), vec![DatasetKind::Water, DatasetKind::Projects]);
    }
}
