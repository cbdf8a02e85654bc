//! Column-oriented feature frame keyed by order identifier.
//!
//! Every extractor emits a [`FeatureFrame`]; the assembler combines them with
//! [`FeatureFrame::left_join`] and finishes with [`FeatureFrame::drop_missing`].

use std::collections::HashMap;
use std::io::Write;

use crate::error::{PipelineError, Result};

/// Name of the key column in every frame.
pub const KEY_COLUMN: &str = "order_id";

/// A typed column with per-cell missingness.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<Option<f64>>),
    Int(Vec<Option<i64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A float cell holding NaN counts as missing.
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Column::Float(v) => v[row].is_none_or(f64::is_nan),
            Column::Int(v) => v[row].is_none(),
            Column::Text(v) => v[row].is_none(),
        }
    }

    /// Gathers cells by position; `None` positions yield missing cells.
    fn take(&self, positions: &[Option<usize>]) -> Column {
        fn gather<T: Clone>(values: &[Option<T>], positions: &[Option<usize>]) -> Vec<Option<T>> {
            positions
                .iter()
                .map(|p| p.and_then(|i| values[i].clone()))
                .collect()
        }

        match self {
            Column::Float(v) => Column::Float(gather(v, positions)),
            Column::Int(v) => Column::Int(gather(v, positions)),
            Column::Text(v) => Column::Text(gather(v, positions)),
        }
    }

    /// Renders a cell for CSV output; missing cells are empty.
    fn render(&self, row: usize) -> String {
        match self {
            Column::Float(v) => v[row].map(|x| x.to_string()).unwrap_or_default(),
            Column::Int(v) => v[row].map(|x| x.to_string()).unwrap_or_default(),
            Column::Text(v) => v[row].clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureFrame {
    keys: Vec<String>,
    columns: Vec<(String, Column)>,
}

impl FeatureFrame {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            columns: Vec::new(),
        }
    }

    /// Appends a column, checking its length against the key column.
    pub fn with_column(mut self, name: &str, column: Column) -> Result<Self> {
        if column.len() != self.keys.len() {
            return Err(PipelineError::ColumnLength {
                name: name.to_string(),
                expected: self.keys.len(),
                actual: column.len(),
            });
        }
        if name == KEY_COLUMN || self.column(name).is_some() {
            return Err(PipelineError::DuplicateColumn(name.to_string()));
        }
        self.columns.push((name.to_string(), column));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Column names in layout order, key column first.
    pub fn column_names(&self) -> Vec<&str> {
        std::iter::once(KEY_COLUMN)
            .chain(self.columns.iter().map(|(name, _)| name.as_str()))
            .collect()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn floats(&self, name: &str) -> Option<&[Option<f64>]> {
        match self.column(name)? {
            Column::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn ints(&self, name: &str) -> Option<&[Option<i64>]> {
        match self.column(name)? {
            Column::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn texts(&self, name: &str) -> Option<&[Option<String>]> {
        match self.column(name)? {
            Column::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Positions of every row carrying `key`.
    pub fn rows_for(&self, key: &str) -> Vec<usize> {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.as_str() == key)
            .map(|(i, _)| i)
            .collect()
    }

    /// Keyed left join on the order identifier.
    ///
    /// Left row order is preserved. A left row matching several right rows is
    /// repeated once per match, in right-frame order; a left row with no match
    /// keeps a single row with missing cells for every right column.
    pub fn left_join(&self, right: &FeatureFrame) -> Result<FeatureFrame> {
        if let Some((name, _)) = right
            .columns
            .iter()
            .find(|(name, _)| self.column(name).is_some())
        {
            return Err(PipelineError::DuplicateColumn(name.clone()));
        }

        let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, key) in right.keys.iter().enumerate() {
            index.entry(key.as_str()).or_default().push(i);
        }

        let mut keys = Vec::with_capacity(self.len());
        let mut left_pos = Vec::with_capacity(self.len());
        let mut right_pos = Vec::with_capacity(self.len());

        for (i, key) in self.keys.iter().enumerate() {
            match index.get(key.as_str()) {
                Some(matches) => {
                    for &j in matches {
                        keys.push(key.clone());
                        left_pos.push(Some(i));
                        right_pos.push(Some(j));
                    }
                }
                None => {
                    keys.push(key.clone());
                    left_pos.push(Some(i));
                    right_pos.push(None);
                }
            }
        }

        let columns = self
            .columns
            .iter()
            .map(|(name, c)| (name.clone(), c.take(&left_pos)))
            .chain(
                right
                    .columns
                    .iter()
                    .map(|(name, c)| (name.clone(), c.take(&right_pos))),
            )
            .collect();

        Ok(FeatureFrame { keys, columns })
    }

    /// Drops every row with a missing cell in any column. The surviving rows
    /// keep their relative order and are re-indexed densely from zero.
    pub fn drop_missing(&self) -> FeatureFrame {
        let keep: Vec<Option<usize>> = (0..self.len())
            .filter(|&row| !self.columns.iter().any(|(_, c)| c.is_missing(row)))
            .map(Some)
            .collect();

        FeatureFrame {
            keys: keep
                .iter()
                .flatten()
                .map(|&i| self.keys[i].clone())
                .collect(),
            columns: self
                .columns
                .iter()
                .map(|(name, c)| (name.clone(), c.take(&keep)))
                .collect(),
        }
    }

    /// Number of rows holding at least one missing cell.
    pub fn incomplete_rows(&self) -> usize {
        (0..self.len())
            .filter(|&row| self.columns.iter().any(|(_, c)| c.is_missing(row)))
            .count()
    }

    /// Writes the frame as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(self.column_names())?;

        for (row, key) in self.keys.iter().enumerate() {
            let record = std::iter::once(key.clone())
                .chain(self.columns.iter().map(|(_, c)| c.render(row)));
            writer.write_record(record)?;
        }

        writer.flush()?;
        Ok(())
    }
}
