use crate::error::{PipelineError, Result};
use crate::features::row::FeatureMatrix;

/// Row-major f64 matrix handed to a classifier. NaN marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    data: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
    columns: Vec<String>,
}

impl DenseMatrix {
    pub fn new(data: Vec<f64>, n_rows: usize, columns: Vec<String>) -> Result<Self> {
        let n_cols = columns.len();
        if data.len() != n_rows * n_cols {
            return Err(PipelineError::schema(format!(
                "dense data has {} values, expected {} x {}",
                data.len(),
                n_rows,
                n_cols
            )));
        }
        Ok(Self {
            data,
            n_rows,
            n_cols,
            columns,
        })
    }

    pub fn from_features(matrix: &FeatureMatrix) -> Self {
        let columns = matrix.schema.columns();
        let n_cols = columns.len();
        let mut data = Vec::with_capacity(matrix.len() * n_cols);
        for row in &matrix.rows {
            data.extend(row.values());
        }
        debug_assert_eq!(data.len(), matrix.len() * n_cols);
        Self {
            data,
            n_rows: matrix.len(),
            n_cols,
            columns,
        }
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[inline]
    pub fn row(&self, idx: usize) -> &[f64] {
        &self.data[idx * self.n_cols..(idx + 1) * self.n_cols]
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n_cols + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_rows).map(move |idx| self.row(idx))
    }

    /// Copy of the selected rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(indices.len() * self.n_cols);
        for &idx in indices {
            data.extend_from_slice(self.row(idx));
        }
        Self {
            data,
            n_rows: indices.len(),
            n_cols: self.n_cols,
            columns: self.columns.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_is_validated() {
        assert!(DenseMatrix::new(vec![1.0, 2.0, 3.0], 2, vec!["a".into(), "b".into()]).is_err());
        let m = DenseMatrix::new(vec![1.0, 2.0, 3.0, 4.0], 2, vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.rows().count(), 2);
    }

    #[test]
    fn select_rows_reorders() {
        let m = DenseMatrix::new(vec![1.0, 2.0, 3.0], 3, vec!["x".into()]).unwrap();
        let s = m.select_rows(&[2, 0]);
        assert_eq!(s.n_rows(), 2);
        assert_eq!(s.row(0), &[3.0]);
        assert_eq!(s.row(1), &[1.0]);
    }
}
