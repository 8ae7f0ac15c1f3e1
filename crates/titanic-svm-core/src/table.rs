use crate::error::{DataError, DataResult};
use crate::matrix::{FeatureMatrix, Matrix};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single typed value of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Cell::Missing
        } else {
            Cell::Number(v)
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Cell::Missing, Cell::from)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            // Integral values print without a trailing ".0" (ids, codes, labels).
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

// ─── Column ─────────────────────────────────────────────────────────────────

/// A named sequence of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Column {
            name: name.into(),
            cells,
        }
    }

    /// Build a numeric column; `NaN` entries become missing cells.
    pub fn from_numbers(name: impl Into<String>, values: &[f64]) -> Self {
        Column::new(name, values.iter().map(|&v| Cell::from(v)).collect())
    }

    pub fn from_texts(name: impl Into<String>, values: &[&str]) -> Self {
        Column::new(name, values.iter().map(|&s| Cell::from(s)).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// Non-missing values as numbers. Text cells are an error.
    pub fn present_numbers(&self) -> DataResult<Vec<f64>> {
        let mut out = Vec::with_capacity(self.cells.len());
        for (row, cell) in self.cells.iter().enumerate() {
            match cell {
                Cell::Number(v) => out.push(*v),
                Cell::Missing => {}
                Cell::Text(_) => {
                    return Err(DataError::NonNumericCell {
                        column: self.name.clone(),
                        row,
                    })
                }
            }
        }
        Ok(out)
    }

    /// Arithmetic mean of non-missing values, `None` when there are none.
    pub fn mean(&self) -> DataResult<Option<f64>> {
        let values = self.present_numbers()?;
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
    }

    /// Sample standard deviation (n - 1) of non-missing values, `None` below two values.
    pub fn sample_std(&self) -> DataResult<Option<f64>> {
        let values = self.present_numbers()?;
        let n = values.len();
        if n < 2 {
            return Ok(None);
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        Ok(Some((ss / (n - 1) as f64).sqrt()))
    }

    /// Every cell as a number; missing and text cells are an error.
    pub fn to_numbers(&self) -> DataResult<Vec<f64>> {
        self.cells
            .iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.as_number().ok_or_else(|| DataError::NonNumericCell {
                    column: self.name.clone(),
                    row,
                })
            })
            .collect()
    }

    /// Replace every missing cell with a clone of `value`, returning how many changed.
    pub fn fill_missing(&mut self, value: &Cell) -> usize {
        let mut filled = 0;
        for cell in self.cells.iter_mut().filter(|c| c.is_missing()) {
            *cell = value.clone();
            filled += 1;
        }
        filled
    }
}

// ─── Table ──────────────────────────────────────────────────────────────────

/// Ordered collection of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> DataResult<Self> {
        let n_rows = columns.first().map_or(0, Column::len);
        let mut table = Table {
            columns: Vec::with_capacity(columns.len()),
            n_rows,
        };
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> DataResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    pub fn column_mut(&mut self, name: &str) -> DataResult<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    /// Fail with `ColumnNotFound` on the first name absent from the table.
    pub fn require_columns(&self, names: &[&str]) -> DataResult<()> {
        match names.iter().find(|n| !self.has_column(n)) {
            Some(missing) => Err(DataError::ColumnNotFound(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Append a column at the end.
    pub fn push_column(&mut self, column: Column) -> DataResult<()> {
        if self.has_column(&column.name) {
            return Err(DataError::DuplicateColumn(column.name));
        }
        if self.columns.is_empty() {
            self.n_rows = column.len();
        }
        self.check_len(&column)?;
        self.columns.push(column);
        Ok(())
    }

    /// Replace the cells of an existing column, keeping its position.
    pub fn replace_column(&mut self, column: Column) -> DataResult<()> {
        self.check_len(&column)?;
        let idx = self
            .position(&column.name)
            .ok_or_else(|| DataError::ColumnNotFound(column.name.clone()))?;
        self.columns[idx] = column;
        Ok(())
    }

    /// Remove the named columns. Validates every name first so a failure leaves
    /// the table untouched.
    pub fn remove_columns(&mut self, names: &[&str]) -> DataResult<()> {
        self.require_columns(names)?;
        self.columns.retain(|c| !names.contains(&c.name.as_str()));
        Ok(())
    }

    /// Copy of the table without the named columns.
    pub fn without_columns(&self, names: &[&str]) -> DataResult<Table> {
        let mut copy = self.clone();
        copy.remove_columns(names)?;
        Ok(copy)
    }

    /// Null count per column, in column order.
    pub fn null_counts(&self) -> Vec<(&str, usize)> {
        self.columns
            .iter()
            .map(|c| (c.name(), c.null_count()))
            .collect()
    }

    /// Convert every column to a numeric feature matrix.
    pub fn to_feature_matrix(&self) -> DataResult<FeatureMatrix> {
        let n_cols = self.columns.len();
        let mut data = vec![0.0; self.n_rows * n_cols];
        for (j, column) in self.columns.iter().enumerate() {
            for (i, v) in column.to_numbers()?.into_iter().enumerate() {
                data[i * n_cols + j] = v;
            }
        }
        let values = Matrix::new(data, self.n_rows, n_cols)?;
        FeatureMatrix::new(
            self.columns.iter().map(|c| c.name.clone()).collect(),
            values,
        )
    }

    fn check_len(&self, column: &Column) -> DataResult<()> {
        if column.len() != self.n_rows {
            return Err(DataError::RaggedColumn {
                column: column.name.clone(),
                expected: self.n_rows,
                got: column.len(),
            });
        }
        Ok(())
    }
}
