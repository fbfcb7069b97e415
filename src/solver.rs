//! Dense linear solvers for the reduced stiffness system.

use log::trace;
use nalgebra::{DMatrix, DVector};

use crate::errors::{CalculationError, InputError};

/// Pivots with a magnitude below this value are treated as zero.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-10;

/// Linear solver interface.
pub trait LinearSolver {
    /// Solve the square system `matrix · x = rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] when the operands do not
    /// describe a square system and [`CalculationError::SingularSystem`] when
    /// no unique solution exists.
    fn solve(
        &self,
        matrix: &DMatrix<f64>,
        rhs: &DVector<f64>,
    ) -> Result<DVector<f64>, CalculationError>;

    /// Solver name for diagnostics.
    fn name(&self) -> &str;
}

/// Gaussian elimination with partial pivoting followed by back substitution.
///
/// Pivot search keeps the lowest row index among equal magnitudes, so the
/// same input always produces bit-identical output.
///
/// # Examples
/// ```
/// use nalgebra::{DMatrix, DVector};
/// use rodx::{GaussianElimination, LinearSolver};
///
/// let matrix = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
/// let rhs = DVector::from_vec(vec![3.0, 5.0]);
/// let x = GaussianElimination::default().solve(&matrix, &rhs).expect("regular");
/// assert!((x[0] - 0.8).abs() < 1e-12);
/// assert!((x[1] - 1.4).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianElimination {
    /// Smallest accepted pivot magnitude.
    pivot_tolerance: f64,
}

impl Default for GaussianElimination {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl GaussianElimination {
    /// Create a solver with [`DEFAULT_PIVOT_TOLERANCE`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver that rejects pivots smaller than `pivot_tolerance`.
    #[must_use]
    pub const fn with_pivot_tolerance(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }

    /// Smallest accepted pivot magnitude.
    #[must_use]
    pub const fn pivot_tolerance(&self) -> f64 {
        self.pivot_tolerance
    }
}

/// Row at or below the diagonal with the largest magnitude in `column`.
/// Equal magnitudes keep the lowest row index.
fn select_pivot(a: &DMatrix<f64>, column: usize) -> usize {
    let mut pivot_row = column;
    for row in column + 1..a.nrows() {
        if a[(row, column)].abs() > a[(pivot_row, column)].abs() {
            pivot_row = row;
        }
    }
    pivot_row
}

impl LinearSolver for GaussianElimination {
    fn solve(
        &self,
        matrix: &DMatrix<f64>,
        rhs: &DVector<f64>,
    ) -> Result<DVector<f64>, CalculationError> {
        let n = matrix.nrows();
        if matrix.ncols() != n {
            return Err(InputError::DimensionMismatch {
                expected: n,
                actual: matrix.ncols(),
            }
            .into());
        }
        if rhs.len() != n {
            return Err(InputError::DimensionMismatch {
                expected: n,
                actual: rhs.len(),
            }
            .into());
        }

        let mut a = matrix.clone();
        let mut b = rhs.clone();

        // Forward elimination
        for pivot in 0..n {
            let pivot_row = select_pivot(&a, pivot);
            let magnitude = a[(pivot_row, pivot)].abs();
            if magnitude.is_nan() || magnitude < self.pivot_tolerance {
                trace!("column {pivot}: best pivot {magnitude:e} below tolerance");
                return Err(CalculationError::SingularSystem);
            }
            trace!("column {pivot}: pivot row {pivot_row}, magnitude {magnitude:e}");

            if pivot_row != pivot {
                a.swap_rows(pivot, pivot_row);
                b.swap_rows(pivot, pivot_row);
            }

            for row in pivot + 1..n {
                let factor = a[(row, pivot)] / a[(pivot, pivot)];
                a[(row, pivot)] = 0.0;
                for col in pivot + 1..n {
                    a[(row, col)] -= factor * a[(pivot, col)];
                }
                b[row] -= factor * b[pivot];
            }
        }

        // Back substitution
        let mut x = DVector::zeros(n);
        for row in (0..n).rev() {
            let mut sum = b[row];
            for col in row + 1..n {
                sum -= a[(row, col)] * x[col];
            }
            x[row] = sum / a[(row, row)];
        }
        Ok(x)
    }

    fn name(&self) -> &str {
        "gaussian-elimination"
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn single_equation() {
        let matrix = DMatrix::from_element(1, 1, 500.0);
        let rhs = DVector::from_element(1, 100.0);
        let x = GaussianElimination::default()
            .solve(&matrix, &rhs)
            .expect("regular system");
        assert_relative_eq!(x[0], 0.2, epsilon = 1.0e-15);
    }

    #[test]
    fn requires_row_exchange() {
        // Zero on the leading diagonal forces a swap.
        let matrix = DMatrix::from_row_slice(
            3,
            3,
            &[
                0.0, 2.0, 1.0, //
                4.0, 1.0, 0.0, //
                1.0, 0.0, 3.0,
            ],
        );
        let expected = DVector::from_vec(vec![1.0, -2.0, 3.0]);
        let rhs = &matrix * &expected;
        let x = GaussianElimination::default()
            .solve(&matrix, &rhs)
            .expect("regular system");
        assert_relative_eq!(x, expected, epsilon = 1.0e-12);
    }

    #[test]
    fn matches_nalgebra_lu_on_tridiagonal_stiffness() {
        let matrix = DMatrix::from_row_slice(
            4,
            4,
            &[
                2.0, -1.0, 0.0, 0.0, //
                -1.0, 2.0, -1.0, 0.0, //
                0.0, -1.0, 2.0, -1.0, //
                0.0, 0.0, -1.0, 1.0,
            ],
        );
        let rhs = DVector::from_vec(vec![1.0, 0.0, -2.0, 4.0]);
        let x = GaussianElimination::default()
            .solve(&matrix, &rhs)
            .expect("regular system");
        let reference = matrix.clone().lu().solve(&rhs).expect("regular system");
        assert_relative_eq!(x, reference, epsilon = 1.0e-12);
    }

    #[test]
    fn singular_matrix_is_reported() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        let rhs = DVector::from_vec(vec![0.0, 1.0]);
        let error = GaussianElimination::default()
            .solve(&matrix, &rhs)
            .expect_err("rigid body mode");
        assert_eq!(error, CalculationError::SingularSystem);
    }

    #[test]
    fn tolerance_is_configurable() {
        let matrix = DMatrix::from_element(1, 1, 1.0e-6);
        let rhs = DVector::from_element(1, 1.0);
        assert!(GaussianElimination::default().solve(&matrix, &rhs).is_ok());
        let error = GaussianElimination::with_pivot_tolerance(1.0e-3)
            .solve(&matrix, &rhs)
            .expect_err("pivot below tolerance");
        assert_eq!(error, CalculationError::SingularSystem);
    }

    #[test]
    fn nan_pivot_is_singular() {
        let matrix = DMatrix::from_element(1, 1, f64::NAN);
        let rhs = DVector::from_element(1, 1.0);
        let error = GaussianElimination::default()
            .solve(&matrix, &rhs)
            .expect_err("nan pivot");
        assert_eq!(error, CalculationError::SingularSystem);
    }

    #[test]
    fn rhs_length_must_match() {
        let matrix = DMatrix::identity(2, 2);
        let rhs = DVector::from_element(3, 1.0);
        let error = GaussianElimination::default()
            .solve(&matrix, &rhs)
            .expect_err("mismatched rhs");
        assert_eq!(
            error,
            CalculationError::InvalidInput(InputError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn repeated_solves_are_bit_identical() {
        let matrix = DMatrix::from_row_slice(
            3,
            3,
            &[
                3.0, -3.0, 0.0, //
                -3.0, 7.0, -4.0, //
                0.0, -4.0, 5.0,
            ],
        );
        let rhs = DVector::from_vec(vec![0.1, 0.7, -0.3]);
        let solver = GaussianElimination::default();
        let first = solver.solve(&matrix, &rhs).expect("regular system");
        let second = solver.solve(&matrix, &rhs).expect("regular system");
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn tied_pivots_keep_lowest_row() {
        let matrix = DMatrix::from_row_slice(
            3,
            3,
            &[
                2.0, 1.0, 0.0, //
                -2.0, 3.0, 5.0, //
                2.0, -5.0, 1.0,
            ],
        );
        // |2| appears in every row of the first column.
        assert_eq!(select_pivot(&matrix, 0), 0);
        assert_eq!(select_pivot(&matrix, 1), 2);
        assert_eq!(select_pivot(&matrix, 2), 2);

        let tied = DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 0.0, -4.0, 0.0, 0.0, 4.0, 1.0]);
        assert_eq!(select_pivot(&tied, 1), 1);
    }

    #[test]
    fn tied_pivot_solves_without_row_exchange() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 0.1, -1.0, 0.3]);
        let rhs = DVector::from_vec(vec![1.0, 2.0]);
        let x = GaussianElimination::default()
            .solve(&matrix, &rhs)
            .expect("regular system");

        // Elimination with row 0 kept as the first pivot.
        let factor: f64 = -1.0 / 1.0;
        let a11 = 0.3 - factor * 0.1;
        let b1 = 2.0 - factor * 1.0;
        let x1 = b1 / a11;
        let x0 = (1.0 - 0.1 * x1) / 1.0;
        assert_eq!(x[1].to_bits(), x1.to_bits());
        assert_eq!(x[0].to_bits(), x0.to_bits());
    }
}
