use crate::error::{DataError, DataResult};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense 2-D matrix of `f64`: rows are samples, columns are features.
///
/// Stores data in a flat contiguous `Vec<f64>` with row-major layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

// ─── Construction ───────────────────────────────────────────────────────────

impl Matrix {
    /// Create a matrix from raw row-major data.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> DataResult<Self> {
        if data.len() != rows * cols {
            return Err(DataError::ShapeMismatch {
                expected: vec![rows, cols],
                got: vec![data.len()],
            });
        }
        Ok(Matrix { data, rows, cols })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a matrix from a nested slice of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> DataResult<Self> {
        if rows.is_empty() {
            return Ok(Matrix::zeros(0, 0));
        }
        let cols = rows[0].len();
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(DataError::ShapeMismatch {
                expected: vec![cols],
                got: vec![bad.len()],
            });
        }
        let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Matrix::new(flat, rows.len(), cols)
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, i: usize, j: usize) -> DataResult<f64> {
        self.check_index(i, j)?;
        Ok(self.data[i * self.cols + j])
    }

    /// Borrow row `i`. Panics when out of range, like slice indexing.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn col(&self, j: usize) -> DataResult<Vec<f64>> {
        if j >= self.cols {
            return Err(DataError::DimensionMismatch(format!(
                "column {} out of range for {} columns",
                j, self.cols
            )));
        }
        Ok((0..self.rows).map(|i| self.data[i * self.cols + j]).collect())
    }

    fn check_index(&self, i: usize, j: usize) -> DataResult<()> {
        if i >= self.rows || j >= self.cols {
            return Err(DataError::DimensionMismatch(format!(
                "index ({}, {}) out of range for shape ({}, {})",
                i, j, self.rows, self.cols
            )));
        }
        Ok(())
    }

    // ─── Reductions ─────────────────────────────────────────────────────────

    /// Mean of every column.
    pub fn mean_cols(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for i in 0..self.rows {
            for (s, v) in sums.iter_mut().zip(self.row(i)) {
                *s += v;
            }
        }
        let n = self.rows.max(1) as f64;
        sums.into_iter().map(|s| s / n).collect()
    }

    /// Population standard deviation of every column.
    pub fn std_cols(&self) -> Vec<f64> {
        let mean = self.mean_cols();
        let mut ss = vec![0.0; self.cols];
        for i in 0..self.rows {
            for ((acc, v), mu) in ss.iter_mut().zip(self.row(i)).zip(&mean) {
                *acc += (v - mu) * (v - mu);
            }
        }
        let n = self.rows.max(1) as f64;
        ss.into_iter().map(|s| (s / n).sqrt()).collect()
    }

    /// Population variance over every element.
    pub fn var_all(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let n = self.data.len() as f64;
        let mean = self.data.iter().sum::<f64>() / n;
        self.data.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
    }

    // ─── Element-wise ───────────────────────────────────────────────────────

    /// Apply `f(value, column)` to every element.
    pub fn map_cols<F: Fn(f64, usize) -> f64>(&self, f: F) -> Matrix {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(k, &v)| f(v, k % self.cols.max(1)))
            .collect();
        Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "matrix([")?;
        for i in 0..self.rows.min(8) {
            write!(f, "  [")?;
            for (j, v) in self.row(i).iter().take(8).enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}", v)?;
            }
            if self.cols > 8 {
                write!(f, ", ...")?;
            }
            writeln!(f, "],")?;
        }
        if self.rows > 8 {
            writeln!(f, "  ...")?;
        }
        write!(f, "], shape=({}, {}))", self.rows, self.cols)
    }
}

// ─── FeatureMatrix ──────────────────────────────────────────────────────────

/// A numeric matrix whose columns carry feature names.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    names: Vec<String>,
    values: Matrix,
}

impl FeatureMatrix {
    pub fn new(names: Vec<String>, values: Matrix) -> DataResult<Self> {
        if names.len() != values.cols() {
            return Err(DataError::DimensionMismatch(format!(
                "{} feature names for {} columns",
                names.len(),
                values.cols()
            )));
        }
        Ok(FeatureMatrix { names, values })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &Matrix {
        &self.values
    }

    pub fn into_values(self) -> Matrix {
        self.values
    }

    pub fn n_samples(&self) -> usize {
        self.values.rows()
    }

    pub fn n_features(&self) -> usize {
        self.values.cols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(1, 2).unwrap(), 6.0);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m.col(0).unwrap(), vec![1.0, 4.0]);
        assert!(m.get(2, 0).is_err());

        let ragged = Matrix::from_rows(&[vec![1.0], vec![1.0, 2.0]]);
        assert!(matches!(ragged, Err(DataError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_column_reductions() {
        let m = Matrix::from_rows(&[vec![1.0, 10.0], vec![3.0, 10.0]]).unwrap();
        assert_eq!(m.mean_cols(), vec![2.0, 10.0]);
        let std = m.std_cols();
        assert_abs_diff_eq!(std[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(std[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_var_all_and_map_cols() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_abs_diff_eq!(m.var_all(), 1.25, epsilon = 1e-12);
        let shifted = m.map_cols(|v, j| v - j as f64);
        assert_eq!(shifted.data(), &[1.0, 1.0, 3.0, 3.0]);
    }

    #[test]
    fn test_feature_matrix_name_count() {
        let m = Matrix::zeros(2, 2);
        assert!(FeatureMatrix::new(vec!["a".into()], m).is_err());
    }
}
