//! Data abstraction for Grammar of Graphics.
//!
//! Layers refer to datasets through [`DataRef`], a shared handle to anything
//! implementing [`Dataset`]. Resolution only ever looks columns
//! up by name; it never copies or mutates data.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A value in a data frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A missing value.
    Null,
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

/// Read-only tabular data: rows are observations, named columns are variables.
pub trait Dataset: fmt::Debug + Send + Sync {
    /// Look a column up by name.
    fn column(&self, name: &str) -> Option<&[DataValue]>;

    /// Column names.
    fn column_names(&self) -> Vec<&str>;

    /// Number of observations.
    fn nrow(&self) -> usize;

    /// Check if a column exists.
    fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

/// Shared reference to a dataset.
pub type DataRef = Arc<dyn Dataset>;

/// Supplies datasets by name, e.g. for YAML plot documents.
pub trait DatasetProvider {
    /// Look a dataset up by name.
    fn dataset(&self, name: &str) -> Option<DataRef>;
}

impl DatasetProvider for HashMap<String, DataRef> {
    fn dataset(&self, name: &str) -> Option<DataRef> {
        self.get(name).cloned()
    }
}

/// A simple columnar data frame.
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    /// Column data keyed by column name.
    columns: HashMap<String, Vec<DataValue>>,
    /// Number of rows.
    n_rows: usize,
}

impl DataFrame {
    /// Create a new empty data frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric column.
    #[must_use]
    pub fn with_f64(mut self, name: &str, data: &[f64]) -> Self {
        self.add_column(name, data.iter().map(|&v| DataValue::Number(v)).collect());
        self
    }

    /// Add a text column.
    #[must_use]
    pub fn with_str(mut self, name: &str, data: &[&str]) -> Self {
        self.add_column(name, data.iter().map(|&s| DataValue::from(s)).collect());
        self
    }

    /// Add or replace a column.
    pub fn add_column(&mut self, name: &str, values: Vec<DataValue>) {
        self.n_rows = self.n_rows.max(values.len());
        self.columns.insert(name.to_string(), values);
    }

    /// Wrap into a shared [`DataRef`].
    #[must_use]
    pub fn into_ref(self) -> DataRef {
        Arc::new(self)
    }
}

impl Dataset for DataFrame {
    fn column(&self, name: &str) -> Option<&[DataValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    fn column_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn nrow(&self) -> usize {
        self.n_rows
    }
}
