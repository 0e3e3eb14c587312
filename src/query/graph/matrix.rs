//! Boolean adjacency-matrix projection.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use crate::error::QueryGraphError;
use crate::types::Result;

use super::QueryGraph;

/// Boolean matrix backend the projection writes into.
///
/// The algebra layer supplies its own implementation; [`SparseBoolMatrix`] is
/// the in-crate one.
pub trait BoolMatrix: Sized {
    /// Error reported by the backend.
    type Error: fmt::Display;

    /// Allocates an all-false `nrows x ncols` matrix.
    fn new(nrows: usize, ncols: usize) -> std::result::Result<Self, Self::Error>;

    /// Sets the entry at (`row`, `col`) to true. Setting an entry twice is a no-op.
    fn set_entry(&mut self, row: usize, col: usize) -> std::result::Result<(), Self::Error>;
}

/// Errors raised by [`SparseBoolMatrix`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Entry lies outside the matrix.
    #[error("entry ({row}, {col}) outside {nrows}x{ncols} matrix")]
    OutOfBounds {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Row count.
        nrows: usize,
        /// Column count.
        ncols: usize,
    },
    /// Dimension cannot be addressed with 32-bit column indices.
    #[error("dimension {0} exceeds the supported maximum")]
    TooLarge(usize),
}

/// Row-major sparse boolean matrix; each row keeps its true columns sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SparseBoolMatrix {
    nrows: usize,
    ncols: usize,
    rows: Vec<SmallVec<[u32; 4]>>,
}

impl SparseBoolMatrix {
    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Value of the entry at (`row`, `col`); out-of-range entries read false.
    pub fn get(&self, row: usize, col: usize) -> bool {
        let Ok(col) = u32::try_from(col) else {
            return false;
        };
        self.rows
            .get(row)
            .is_some_and(|cols| cols.binary_search(&col).is_ok())
    }

    /// Number of true entries.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(|cols| cols.len()).sum()
    }

    /// True entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, cols)| cols.iter().map(move |col| (row, *col as usize)))
    }
}

impl BoolMatrix for SparseBoolMatrix {
    type Error = MatrixError;

    fn new(nrows: usize, ncols: usize) -> std::result::Result<Self, MatrixError> {
        if u32::try_from(ncols).is_err() {
            return Err(MatrixError::TooLarge(ncols));
        }
        Ok(Self {
            nrows,
            ncols,
            rows: vec![SmallVec::new(); nrows],
        })
    }

    fn set_entry(&mut self, row: usize, col: usize) -> std::result::Result<(), MatrixError> {
        let out_of_bounds = MatrixError::OutOfBounds {
            row,
            col,
            nrows: self.nrows,
            ncols: self.ncols,
        };
        if col >= self.ncols {
            return Err(out_of_bounds);
        }
        let Some(cols) = self.rows.get_mut(row) else {
            return Err(out_of_bounds);
        };
        // ncols fits in u32, checked at construction.
        let col = col as u32;
        if let Err(pos) = cols.binary_search(&col) {
            cols.insert(pos, col);
        }
        Ok(())
    }
}

impl QueryGraph {
    /// Dense ordinals `0..n` assigned to live nodes in iteration order.
    pub fn node_ordinals(&self) -> Vec<(&str, usize)> {
        self.nodes()
            .enumerate()
            .map(|(ordinal, (_, node))| (node.alias(), ordinal))
            .collect()
    }

    /// Projects the graph onto an `n x n` boolean adjacency matrix.
    ///
    /// Row and column indices are the ordinals of [`QueryGraph::node_ordinals`].
    /// Every edge sets the entry at (`src`, `dest`) as stored; the
    /// bidirectional flag is not mirrored. Parallel edges collapse onto one
    /// entry.
    pub fn to_boolean_matrix<M: BoolMatrix>(&self) -> Result<M> {
        // Compacted copy: slot index equals ordinal.
        let compact = self.clone();
        let n = compact.node_count();
        let mut matrix = M::new(n, n).map_err(|err| QueryGraphError::Matrix(err.to_string()))?;
        for (_, edge) in compact.edges() {
            matrix
                .set_entry(edge.src().index(), edge.dest().index())
                .map_err(|err| QueryGraphError::Matrix(err.to_string()))?;
        }
        Ok(matrix)
    }
}
