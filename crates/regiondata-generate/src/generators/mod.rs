pub mod project;
pub mod water;

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use regiondata_core::{ColumnKind, DatasetKind};

/// A single field of a generated record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(u64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn kind(&self) -> ColumnKind {
        match self {
            FieldValue::Integer(_) => ColumnKind::Integer,
            FieldValue::Float(_) => ColumnKind::Float,
            FieldValue::Text(_) => ColumnKind::Text,
            FieldValue::Date(_) => ColumnKind::Date,
        }
    }

    pub fn to_csv(&self) -> String {
        match self {
            FieldValue::Integer(value) => value.to_string(),
            FieldValue::Float(value) => value.to_string(),
            FieldValue::Text(value) => value.clone(),
            FieldValue::Date(value) => value.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Textual format of every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A generated row of one dataset family.
pub trait Record {
    /// Dataset family the record belongs to.
    const KIND: DatasetKind;

    /// Field values in the family's schema column order.
    fn fields(&self) -> Vec<FieldValue>;
}

/// Pick a run seed, drawing one when none is configured.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random())
}

/// Seed of one dataset's stream, derived from the run seed.
pub fn dataset_seed(seed: u64, kind: DatasetKind) -> u64 {
    hash_seed(seed, kind.key())
}

/// Generator for the record at `index`.
///
/// Each record draws from its own stream, so record `i` does not depend on
/// how many records follow it.
pub fn record_rng(dataset_seed: u64, index: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_row_seed(dataset_seed, index))
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

fn hash_row_seed(dataset_seed: u64, row_index: u64) -> u64 {
    let hash = dataset_seed ^ row_index.wrapping_mul(0x9e3779b97f4a7c15);
    hash.wrapping_mul(0x100000001b3)
}
