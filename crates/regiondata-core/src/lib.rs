//! Core contracts for regiondata.
//!
//! This crate holds the vocabulary tables, the immutable generator
//! configuration, the versioned dataset schemas, and the configuration
//! validation shared by the generator, the evaluator, and the CLI.

pub mod config;
pub mod error;
pub mod schema;
pub mod validation;
pub mod vocabulary;

pub use config::{
    BoundingBox, DamRule, GeneratorConfig, InfraKind, InfraType, IntRange, OtherRule,
    ProjectConfig, SectorTarget, TargetRule, TextEncoding, WaterConfig, WeightedLabel, WellRule,
};
pub use error::{Error, Result};
pub use schema::{ColumnKind, ColumnSpec, DatasetKind, DatasetSchema, project_schema, water_schema};
pub use validation::{validate_config, validate_project_config, validate_water_config};

/// Current contract version of the dataset file schemas.
pub const SCHEMA_VERSION: u32 = 1;
