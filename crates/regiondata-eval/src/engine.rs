use std::path::Path;

use chrono::NaiveDate;

use regiondata_core::{
    ColumnKind, ColumnSpec, DatasetKind, DatasetSchema, GeneratorConfig, TextEncoding,
    validate_project_config, validate_water_config,
};
use regiondata_generate::FieldValue;
use regiondata_generate::generators::DATE_FORMAT;

use crate::errors::EvalError;
use crate::model::{EvaluateOptions, EvaluationReport, Violation};
use crate::rules::{ProjectRules, WaterRules};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Evaluate written dataset files against their schema and the generation
/// rules of a configuration.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    config: GeneratorConfig,
    options: EvaluateOptions,
}

impl EvaluationEngine {
    pub fn new(config: GeneratorConfig, options: EvaluateOptions) -> Self {
        Self { config, options }
    }

    pub fn options(&self) -> &EvaluateOptions {
        &self.options
    }

    /// Path of the dataset file the configuration would write.
    pub fn default_path(&self, kind: DatasetKind) -> std::path::PathBuf {
        let filename = match kind {
            DatasetKind::Projects => &self.config.projects.filename,
            DatasetKind::Water => &self.config.water.filename,
        };
        self.config.out_dir.join(filename)
    }

    /// Check every row of the file at `path`.
    ///
    /// A header that does not match the schema is an error, not a violation.
    /// In strict mode any violation turns into [`EvalError::Violations`].
    pub fn run(&self, kind: DatasetKind, path: &Path) -> Result<EvaluationReport, EvalError> {
        let (delimiter, encoding) = match kind {
            DatasetKind::Projects => {
                validate_project_config(&self.config.projects)?;
                (self.config.projects.delimiter, self.config.projects.encoding)
            }
            DatasetKind::Water => {
                validate_water_config(&self.config.water)?;
                (self.config.water.delimiter, self.config.water.encoding)
            }
        };

        let schema = kind.schema();
        let bytes = std::fs::read(path)?;
        let mut sink = ViolationSink::new(self.options.max_examples);

        let has_bom = bytes.starts_with(UTF8_BOM);
        match (encoding, has_bom) {
            (TextEncoding::Utf8Bom, false) => sink.push(Violation::new(
                "missing_bom",
                None,
                None,
                "file does not start with a UTF-8 byte order mark",
            )),
            (TextEncoding::Utf8, true) => sink.push(Violation::new(
                "unexpected_bom",
                None,
                None,
                "file starts with a byte order mark",
            )),
            _ => {}
        }
        let body = if has_bom { &bytes[UTF8_BOM.len()..] } else { &bytes[..] };
        let text = std::str::from_utf8(body).map_err(|err| {
            EvalError::InvalidDataset(format!("{} is not valid UTF-8: {err}", path.display()))
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter as u8)
            .from_reader(text.as_bytes());
        let mut records = reader.records();

        let header = records
            .next()
            .transpose()?
            .ok_or_else(|| EvalError::InvalidDataset(format!("{} is empty", path.display())))?;
        check_header(&schema, &header, path)?;

        let mut rows_checked = 0u64;
        match kind {
            DatasetKind::Projects => {
                let mut rules = ProjectRules::new(&self.config.projects);
                for (index, result) in records.enumerate() {
                    let index = index as u64;
                    rows_checked += 1;
                    if let Some(fields) = parse_row(&schema, &result?, index, &mut sink) {
                        rules.check(index, &fields, &mut sink);
                    }
                }
                check_row_count(self.config.projects.count, rows_checked, &mut sink);
            }
            DatasetKind::Water => {
                let rules = WaterRules::new(&self.config.water);
                for (index, result) in records.enumerate() {
                    let index = index as u64;
                    rows_checked += 1;
                    if let Some(fields) = parse_row(&schema, &result?, index, &mut sink) {
                        rules.check(index, &fields, &mut sink);
                    }
                }
                check_row_count(self.config.water.count, rows_checked, &mut sink);
            }
        }

        let (violations_total, violations) = sink.finish();
        if self.options.strict && violations_total > 0 {
            return Err(EvalError::Violations(violations_total));
        }

        Ok(EvaluationReport {
            dataset: kind,
            schema_version: schema.version,
            path: path.to_path_buf(),
            rows_checked,
            violations_total,
            violations,
        })
    }
}

/// Evaluate one file with default options.
pub fn validate_dataset(
    kind: DatasetKind,
    path: &Path,
    config: &GeneratorConfig,
) -> Result<EvaluationReport, EvalError> {
    EvaluationEngine::new(config.clone(), EvaluateOptions::default()).run(kind, path)
}

/// Counts every violation, keeps the first `max` of them.
pub(crate) struct ViolationSink {
    max: usize,
    total: u64,
    kept: Vec<Violation>,
}

impl ViolationSink {
    fn new(max: usize) -> Self {
        Self {
            max,
            total: 0,
            kept: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.total += 1;
        if self.kept.len() < self.max {
            self.kept.push(violation);
        }
    }

    fn finish(self) -> (u64, Vec<Violation>) {
        (self.total, self.kept)
    }
}

fn check_header(
    schema: &DatasetSchema,
    header: &csv::StringRecord,
    path: &Path,
) -> Result<(), EvalError> {
    let found = header.iter().collect::<Vec<_>>();
    let expected = schema.column_names();
    if found != expected {
        return Err(EvalError::InvalidDataset(format!(
            "{} header [{}] does not match schema '{}' v{} [{}]",
            path.display(),
            found.join(", "),
            schema.name,
            schema.version,
            expected.join(", ")
        )));
    }
    Ok(())
}

fn check_row_count(expected: u64, found: u64, sink: &mut ViolationSink) {
    if expected != found {
        sink.push(Violation::new(
            "row_count",
            None,
            None,
            format!("expected {expected} rows, found {found}"),
        ));
    }
}

fn parse_row(
    schema: &DatasetSchema,
    record: &csv::StringRecord,
    index: u64,
    sink: &mut ViolationSink,
) -> Option<Vec<FieldValue>> {
    if record.len() != schema.len() {
        sink.push(Violation::new(
            "field_count",
            None,
            Some(index),
            format!("{} fields, expected {}", record.len(), schema.len()),
        ));
        return None;
    }

    let mut fields = Vec::with_capacity(schema.len());
    let mut valid = true;
    for (column, value) in schema.columns.iter().zip(record.iter()) {
        match parse_value(column, value) {
            Ok(parsed) => fields.push(parsed),
            Err(message) => {
                sink.push(Violation::new(
                    "invalid_value",
                    Some(&column.name),
                    Some(index),
                    message,
                ));
                valid = false;
            }
        }
    }
    valid.then_some(fields)
}

fn parse_value(column: &ColumnSpec, value: &str) -> Result<FieldValue, String> {
    match column.kind {
        ColumnKind::Text if value.is_empty() => Err("empty text".to_string()),
        ColumnKind::Text => Ok(FieldValue::Text(value.to_string())),
        ColumnKind::Integer => value
            .parse::<u64>()
            .map(FieldValue::Integer)
            .map_err(|_| format!("invalid integer '{value}'")),
        ColumnKind::Float => value
            .parse::<f64>()
            .ok()
            .filter(|parsed| parsed.is_finite())
            .map(FieldValue::Float)
            .ok_or_else(|| format!("invalid float '{value}'")),
        ColumnKind::Date => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(FieldValue::Date)
            .map_err(|_| format!("invalid date '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use regiondata_core::project_schema;

    use super::*;

    #[test]
    fn parses_values_by_column_kind() {
        let schema = project_schema();
        let budget = &schema.columns[4];
        let start = &schema.columns[7];

        assert_eq!(
            parse_value(budget, "2500000"),
            Ok(FieldValue::Integer(2_500_000))
        );
        assert!(parse_value(budget, "2.5e6").is_err());
        assert!(parse_value(budget, "-1").is_err());
        assert_eq!(
            parse_value(start, "2023-04-09"),
            Ok(FieldValue::Date(
                NaiveDate::from_ymd_opt(2023, 4, 9).unwrap()
            ))
        );
        assert!(parse_value(start, "09/04/2023").is_err());
    }

    #[test]
    fn sink_counts_past_the_cap() {
        let mut sink = ViolationSink::new(2);
        for index in 0..5 {
            sink.push(Violation::new("x", None, Some(index), "bad"));
        }
        let (total, kept) = sink.finish();
        assert_eq!(total, 5);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].row_index, Some(1));
    }
}
