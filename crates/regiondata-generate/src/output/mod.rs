pub mod csv;

pub use self::csv::{CsvFormat, write_dataset};
