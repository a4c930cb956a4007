//! Nodal pressure system assembly.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// Nodal conductance system G·p = q for a hydraulic network.
///
/// One row per node with unknown pressure. The distal reference that outlet
/// resistances drain into is implicit (index `None`) and held at zero
/// pressure; distal pressure offsets enter through the source vector.
#[derive(Debug, Clone)]
pub struct NodalSystem {
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
    num_nodes: usize,
}

impl NodalSystem {
    /// Create a zeroed system for the given number of pressure unknowns.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            matrix: DMatrix::zeros(num_nodes, num_nodes),
            rhs: DVector::zeros(num_nodes),
            num_nodes,
        }
    }

    /// Number of pressure unknowns.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Stamp a hydraulic conductance between two nodes.
    ///
    /// For a conductance G between nodes i and j:
    /// - A[i,i] += G
    /// - A[j,j] += G
    /// - A[i,j] -= G
    /// - A[j,i] -= G
    ///
    /// `None` is the distal reference.
    pub fn stamp_conductance(&mut self, node_i: Option<usize>, node_j: Option<usize>, g: f64) {
        if let Some(i) = node_i {
            self.matrix[(i, i)] += g;
        }
        if let Some(j) = node_j {
            self.matrix[(j, j)] += g;
        }
        if let (Some(i), Some(j)) = (node_i, node_j) {
            self.matrix[(i, j)] -= g;
            self.matrix[(j, i)] -= g;
        }
    }

    /// Stamp a flow source from node i into node j.
    pub fn stamp_flow_source(&mut self, node_i: Option<usize>, node_j: Option<usize>, q: f64) {
        if let Some(i) = node_i {
            self.rhs[i] -= q;
        }
        if let Some(j) = node_j {
            self.rhs[j] += q;
        }
    }

    /// Get a reference to the conductance matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Get a reference to the source vector.
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    /// Solve for nodal pressures by dense LU decomposition.
    pub fn solve(&self) -> Result<DVector<f64>> {
        self.matrix
            .clone()
            .lu()
            .solve(&self.rhs)
            .ok_or(Error::SingularSystem)
    }
}
