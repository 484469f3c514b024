//! CSV dataset loading.
//!
//! Reads a CSV file with a header row into an in-memory [`Dataset`]. Source
//! column names are preserved verbatim and every cell is parsed into a
//! loosely-typed [`FieldValue`], mirroring what a dataframe-style reader
//! would infer: integers, floats, strings, and nulls for empty cells.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PipelineError, Result};

/// A single parsed CSV cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Parse a raw CSV cell.
    ///
    /// Empty cells become [`FieldValue::Null`]; cells that parse as integers
    /// or floats keep their numeric type; everything else stays a string.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return FieldValue::Null;
        }
        if let Ok(i) = raw.parse::<i64>() {
            return FieldValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return FieldValue::Float(f);
        }
        FieldValue::String(raw.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// One data row, keyed by source column name in source column order.
#[derive(Debug, Clone, Default)]
pub struct Row {
    values: IndexMap<String, FieldValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cell by its source column name.
    ///
    /// Returns `None` when the column does not exist in the file.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.values.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: FieldValue) {
        self.values.insert(column.into(), value);
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }
}

/// An in-memory tabular dataset read from a CSV file.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Source column names, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows (the header is not a row).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load a CSV file into a [`Dataset`].
///
/// # Errors
///
/// * [`PipelineError::NotFound`] when the file does not exist
/// * [`PipelineError::EmptyData`] when the file holds no data rows
/// * [`PipelineError::Csv`] when a record cannot be parsed
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::NotFound(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Row::new();
        for (column, raw) in columns.iter().zip(record.iter()) {
            row.insert(column.clone(), FieldValue::infer(raw));
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(PipelineError::EmptyData(path.display().to_string()));
    }

    info!(
        file = %path.display(),
        rows = rows.len(),
        columns = columns.len(),
        "loaded dataset"
    );

    Ok(Dataset { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = load_csv("no/such/file.csv");

        assert!(matches!(result, Err(PipelineError::NotFound(_))));
    }

    #[test]
    fn test_header_only_file_is_empty_data() {
        let file = write_csv("Hospital Name,State\n");

        let result = load_csv(file.path());

        assert!(matches!(result, Err(PipelineError::EmptyData(_))));
    }

    #[test]
    fn test_loads_rows_with_inferred_types() {
        let file = write_csv(
            "Hospital Name,State,Number of Beds,Rating\n\
             Mercy General,CA,200,4.5\n\
             St. Jude,TN,,3\n",
        );

        let dataset = load_csv(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.columns(),
            &["Hospital Name", "State", "Number of Beds", "Rating"]
        );

        let first = &dataset.rows()[0];
        assert_eq!(
            first.get("Hospital Name"),
            Some(&FieldValue::String("Mercy General".to_string()))
        );
        assert_eq!(first.get("Number of Beds"), Some(&FieldValue::Int(200)));
        assert_eq!(first.get("Rating"), Some(&FieldValue::Float(4.5)));

        let second = &dataset.rows()[1];
        assert_eq!(second.get("Number of Beds"), Some(&FieldValue::Null));
        assert_eq!(second.get("Rating"), Some(&FieldValue::Int(3)));
        assert_eq!(second.get("Not A Column"), None);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::String("CA".to_string()).to_string(), "CA");
        assert_eq!(FieldValue::Int(42).to_string(), "42");
        assert_eq!(FieldValue::Null.to_string(), "null");
    }
}
