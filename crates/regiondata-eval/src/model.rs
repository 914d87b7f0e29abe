use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use regiondata_core::DatasetKind;

/// Options for dataset evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateOptions {
    /// Fail when any violation is found.
    pub strict: bool,
    /// Limit the number of violations kept in the report.
    pub max_examples: usize,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_examples: 20,
        }
    }
}

/// Structured violation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Zero-based data row, not counting the header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u64>,
    pub message: String,
}

impl Violation {
    pub fn new(
        code: impl Into<String>,
        column: Option<&str>,
        row_index: Option<u64>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            column: column.map(str::to_string),
            row_index,
            message: message.into(),
        }
    }
}

/// Result of evaluating one dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub dataset: DatasetKind,
    pub schema_version: u32,
    pub path: PathBuf,
    pub rows_checked: u64,
    pub violations_total: u64,
    /// First violations, capped by [`EvaluateOptions::max_examples`].
    pub violations: Vec<Violation>,
}

impl EvaluationReport {
    pub fn is_ok(&self) -> bool {
        self.violations_total == 0
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.violations.iter().any(|violation| violation.code == code)
    }
}
