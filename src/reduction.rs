//! Elimination of clamped degrees of freedom from the global system.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::assembly::GlobalSystem;
use crate::errors::{CalculationError, InputError};

/// System restricted to the free degrees of freedom.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedSystem {
    /// Original indices of the free nodes, in ascending order.
    pub free_nodes: Vec<usize>,
    /// `m × m` stiffness matrix over the free nodes.
    pub stiffness: DMatrix<f64>,
    /// Load vector over the free nodes.
    pub load: DVector<f64>,
    /// Size of the unreduced system.
    full_dof: usize,
}

impl ReducedSystem {
    /// Number of free degrees of freedom.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_nodes.len()
    }

    /// Whether every node was clamped, leaving nothing to solve.
    #[must_use]
    pub fn is_fully_constrained(&self) -> bool {
        self.free_nodes.is_empty()
    }

    /// Place a reduced solution back into a full-length vector with zeros at
    /// the clamped positions.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] when `solution` does not have
    /// one entry per free node.
    pub fn expand(&self, solution: &DVector<f64>) -> Result<DVector<f64>, CalculationError> {
        if solution.len() != self.free_count() {
            return Err(InputError::DimensionMismatch {
                expected: self.free_count(),
                actual: solution.len(),
            }
            .into());
        }
        let mut full = DVector::zeros(self.full_dof);
        for (value, &dof) in solution.iter().zip(&self.free_nodes) {
            full[dof] = *value;
        }
        Ok(full)
    }
}

/// Drop the rows and columns of every fixed node.
///
/// Supports prescribe zero displacement, so the columns of fixed nodes carry
/// no contribution and can be removed outright together with their rows.
/// Indices in `fixed` that are out of range are ignored.
///
/// # Examples
/// ```
/// use nalgebra::{DMatrix, DVector};
/// use rodx::{reduce_system, GlobalSystem};
///
/// let system = GlobalSystem {
///     stiffness: DMatrix::from_row_slice(2, 2, &[500.0, -500.0, -500.0, 500.0]),
///     load: DVector::from_vec(vec![0.0, 100.0]),
/// };
/// let reduced = reduce_system(&system, &[0]);
/// assert_eq!(reduced.free_nodes, vec![1]);
/// assert_eq!(reduced.stiffness[(0, 0)], 500.0);
/// assert_eq!(reduced.load[0], 100.0);
/// ```
#[must_use]
pub fn reduce_system(system: &GlobalSystem, fixed: &[usize]) -> ReducedSystem {
    let full_dof = system.dof();
    let mut clamped = vec![false; full_dof];
    for &dof in fixed {
        if let Some(flag) = clamped.get_mut(dof) {
            *flag = true;
        }
    }
    let free_nodes: Vec<usize> = (0..full_dof).filter(|&dof| !clamped[dof]).collect();

    let free_len = free_nodes.len();
    let mut stiffness = DMatrix::zeros(free_len, free_len);
    let mut load = DVector::zeros(free_len);
    for (row_idx, &row) in free_nodes.iter().enumerate() {
        load[row_idx] = system.load[row];
        for (col_idx, &col) in free_nodes.iter().enumerate() {
            stiffness[(row_idx, col_idx)] = system.stiffness[(row, col)];
        }
    }

    debug!("reduced {full_dof} dofs to {free_len} free dofs");
    ReducedSystem {
        free_nodes,
        stiffness,
        load,
        full_dof,
    }
}
