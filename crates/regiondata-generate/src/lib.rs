//! Synthetic record generation for regiondata.
//!
//! This crate turns a [`GeneratorConfig`](regiondata_core::GeneratorConfig)
//! into deterministic project and water point datasets and writes them as
//! delimited text files.

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;
pub mod sampling;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::{ErrorKind, GenerationError};
pub use generators::project::{ProjectRecord, ProjectSynthesizer, generate_projects};
pub use generators::water::{WaterPointRecord, WaterSynthesizer, generate_water_points};
pub use generators::{FieldValue, Record};
pub use model::{DatasetReport, GenerationReport, SeedSource};
