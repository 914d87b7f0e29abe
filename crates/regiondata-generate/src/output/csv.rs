use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use regiondata_core::{DatasetSchema, TextEncoding};

use crate::errors::GenerationError;
use crate::generators::Record;

/// Delimiter and encoding of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    pub delimiter: char,
    pub encoding: TextEncoding,
}

/// Write records as a delimited file in the schema's column order.
///
/// Any existing file at `path` is replaced. Rows are written to a sibling
/// `.tmp` file that is renamed over `path` once flushed, so a failed write
/// never leaves a truncated dataset behind. Returns the bytes written.
pub fn write_dataset<R: Record>(
    path: &Path,
    schema: &DatasetSchema,
    records: &[R],
    format: CsvFormat,
) -> Result<u64, GenerationError> {
    check_schema::<R>(schema)?;
    if !format.delimiter.is_ascii() {
        return Err(GenerationError::Configuration(format!(
            "delimiter '{}' is not ASCII",
            format.delimiter
        )));
    }

    let tmp_path = temp_path(path)?;
    let outcome = write_rows(&tmp_path, schema, records, format).and_then(|bytes| {
        std::fs::rename(&tmp_path, path)?;
        Ok(bytes)
    });
    if outcome.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    outcome
}

fn write_rows<R: Record>(
    path: &Path,
    schema: &DatasetSchema,
    records: &[R],
    format: CsvFormat,
) -> Result<u64, GenerationError> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    let mut counting = CountingWriter::new(BufWriter::new(file));
    counting.write_all(format.encoding.byte_order_mark())?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(format.delimiter as u8)
        // validated labels never need quoting
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(counting);

    writer.write_record(schema.column_names())?;

    for (index, record) in records.iter().enumerate() {
        let fields = record.fields();
        if fields.len() != schema.len() {
            return Err(GenerationError::Schema(format!(
                "row {index} has {} fields, schema '{}' declares {}",
                fields.len(),
                schema.name,
                schema.len()
            )));
        }
        for (field, column) in fields.iter().zip(&schema.columns) {
            if field.kind() != column.kind {
                return Err(GenerationError::Schema(format!(
                    "row {index} column '{}' expected {:?}, got {:?}",
                    column.name,
                    column.kind,
                    field.kind()
                )));
            }
        }
        writer.write_record(fields.iter().map(|field| field.to_csv()))?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    let bytes = counting.bytes_written();
    let file: File = counting
        .into_inner()
        .into_inner()
        .map_err(|err| err.into_error())?;
    file.sync_all()?;
    Ok(bytes)
}

fn check_schema<R: Record>(schema: &DatasetSchema) -> Result<(), GenerationError> {
    let expected = R::KIND.schema();
    if schema.name != expected.name || schema.version != expected.version {
        return Err(GenerationError::Schema(format!(
            "{} records cannot be written with schema '{}' v{}",
            R::KIND,
            schema.name,
            schema.version
        )));
    }
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf, GenerationError> {
    let file_name = path.file_name().ok_or_else(|| {
        GenerationError::Configuration(format!("invalid dataset path '{}'", path.display()))
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }

    fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
