//! Dataset evaluation for regiondata.
//!
//! Reads written dataset files back through their versioned schema and
//! reports every record that breaks a generation invariant.

pub mod engine;
pub mod errors;
pub mod model;
pub mod report;
mod rules;

pub use engine::{EvaluationEngine, validate_dataset};
pub use errors::EvalError;
pub use model::{EvaluateOptions, EvaluationReport, Violation};
pub use report::render_report;
