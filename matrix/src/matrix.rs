use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Errors raised when a matrix is built from inconsistent data.
#[derive(Debug, Error, PartialEq)]
pub enum MatrixError {
    #[error("Data length {actual} does not match {rows}x{cols}")]
    DataLength {
        rows: usize,
        cols: usize,
        actual: usize,
    },
    #[error("Matrix rows are ragged: row {row} has {actual} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Dense row-major matrix of `f64`.
///
/// Row `i`, column `j` lives at `data[i * cols + j]`. The shape is fixed once
/// the matrix is built; all mutation happens in place.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if data.len() != rows * cols {
            return Err(MatrixError::DataLength {
                rows,
                cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from a list of rows, all of which must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Fills a new matrix with independent uniform draws from `range`.
    pub fn random<R: Rng>(rows: usize, cols: usize, range: Range<f64>, rng: &mut R) -> Self {
        let data = (0..rows * cols)
            .map(|_| rng.random_range(range.clone()))
            .collect();

        Self { rows, cols, data }
    }

    #[inline(always)]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        self.data.get(row * self.cols..(row + 1) * self.cols)
    }

    /// Computes `vᵀ · M`: for every column `j`, `Σ_i v[i] * M[i][j]`.
    ///
    /// `v` must have one entry per row.
    #[must_use]
    pub fn left_multiply(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.rows, "Vector length must match matrix rows");

        let mut result = vec![0.0; self.cols];
        if self.cols == 0 {
            return result;
        }
        for (&scale, row) in v.iter().zip(self.data.chunks_exact(self.cols)) {
            for (acc, &w) in result.iter_mut().zip(row) {
                *acc += scale * w;
            }
        }
        result
    }

    /// Computes `M · v`: for every row `i`, `Σ_j M[i][j] * v[j]`.
    ///
    /// `v` must have one entry per column.
    #[must_use]
    pub fn multiply_vector(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.cols, "Vector length must match matrix columns");

        if self.cols == 0 {
            return vec![0.0; self.rows];
        }
        self.data
            .chunks_exact(self.cols)
            .map(|row| row.iter().zip(v).map(|(&w, &x)| w * x).sum())
            .collect()
    }

    /// Adds `scale * a[i] * b[j]` to every element `M[i][j]` in place.
    pub fn add_outer_product(&mut self, scale: f64, a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), self.rows, "Row vector length must match matrix rows");
        assert_eq!(b.len(), self.cols, "Column vector length must match matrix columns");

        if self.cols == 0 {
            return;
        }
        for (&ai, row) in a.iter().zip(self.data.chunks_exact_mut(self.cols)) {
            for (w, &bj) in row.iter_mut().zip(b) {
                *w += scale * ai * bj;
            }
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        for row in self.data.chunks_exact(self.cols) {
            for value in row {
                write!(f, "{:8.4}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
