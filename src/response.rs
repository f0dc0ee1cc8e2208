//! ResponseMatrix - reshaping the flat response array for analysis.
//!
//! The engine emits responses as one flat sequence of length `N * M`,
//! logically a `(N, M)` matrix with node index outer and sample index
//! inner. This module reinterprets that sequence without copying the
//! underlying order: a whole-matrix view, per-node rows, and a square
//! `m x m` grid view of one node's response over a map whose sample count
//! is a perfect square.
//!
//! Pure transformation only; nothing here touches the filesystem.
//!
//! # Example
//!
//! ```
//! use relab::ResponseMatrix;
//!
//! let flat: Vec<f64> = (0..20).map(f64::from).collect();
//! let matrix = ResponseMatrix::from_flat(flat, 5).unwrap();
//! assert_eq!(matrix.num_samples(), 4);
//!
//! let grid = matrix.grid(2).unwrap(); // 4 samples -> 2 x 2
//! assert_eq!(grid, vec![vec![8.0, 9.0], vec![10.0, 11.0]]);
//! ```

use crate::utils::perfect_square_root;
use crate::{RelabError, Result};

/// A `(N, M)` view over the engine's flat response sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMatrix {
    data: Vec<f64>,
    num_nodes: usize,
    num_samples: usize,
}

impl ResponseMatrix {
    /// Reshape a flat sequence into `(num_nodes, M)`, inferring
    /// `M = len / num_nodes`.
    ///
    /// # Errors
    ///
    /// `Shape` if `num_nodes` is zero or does not divide the sequence
    /// length.
    pub fn from_flat(data: Vec<f64>, num_nodes: usize) -> Result<Self> {
        if num_nodes == 0 {
            return Err(RelabError::Shape(
                "cannot reshape responses for zero nodes".to_string(),
            ));
        }
        if data.len() % num_nodes != 0 {
            return Err(RelabError::Shape(format!(
                "response length {} is not divisible by {} nodes",
                data.len(),
                num_nodes
            )));
        }
        let num_samples = data.len() / num_nodes;
        Ok(Self {
            data,
            num_nodes,
            num_samples,
        })
    }

    /// Reshape a flat sequence into an explicit `(num_nodes, num_samples)`.
    ///
    /// # Errors
    ///
    /// `Shape` if `num_nodes * num_samples != data.len()`.
    pub fn with_samples(data: Vec<f64>, num_nodes: usize, num_samples: usize) -> Result<Self> {
        if num_nodes * num_samples != data.len() {
            return Err(RelabError::Shape(format!(
                "expected {} x {} = {} responses, got {}",
                num_nodes,
                num_samples,
                num_nodes * num_samples,
                data.len()
            )));
        }
        Ok(Self {
            data,
            num_nodes,
            num_samples,
        })
    }

    /// Number of nodes `N`.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of map samples `M`.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// One node's response vector over all map samples.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `node >= N`.
    pub fn row(&self, node: usize) -> Result<&[f64]> {
        if node >= self.num_nodes {
            return Err(RelabError::IndexOutOfBounds {
                index: node,
                length: self.num_nodes,
            });
        }
        let start = node * self.num_samples;
        Ok(&self.data[start..start + self.num_samples])
    }

    /// One node's response reshaped into an `m x m` grid, where
    /// `m = sqrt(M)`.
    ///
    /// # Errors
    ///
    /// `Shape` if `M` is not a perfect square, `IndexOutOfBounds` if
    /// `node >= N`.
    pub fn grid(&self, node: usize) -> Result<Vec<Vec<f64>>> {
        let m = perfect_square_root(self.num_samples).ok_or_else(|| {
            RelabError::Shape(format!(
                "sample count {} is not a perfect square",
                self.num_samples
            ))
        })?;
        let row = self.row(node)?;
        if m == 0 {
            return Ok(Vec::new());
        }
        Ok(row.chunks(m).map(|chunk| chunk.to_vec()).collect())
    }

    /// Consume the matrix, returning the flat sequence unchanged.
    pub fn into_flat(self) -> Vec<f64> {
        self.data
    }

    /// Borrow the flat sequence.
    pub fn as_flat(&self) -> &[f64] {
        &self.data
    }
}
