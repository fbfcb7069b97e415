//! Nodal displacement solve: assembly, support reduction and linear solve.

use log::debug;

use crate::assembly::assemble_system;
use crate::errors::CalculationError;
use crate::model::{DisplacementVector, StructureInput};
use crate::reduction::reduce_system;
use crate::solver::{GaussianElimination, LinearSolver};

/// Solve the nodal displacements of a rod chain.
///
/// The result has one entry per node, exactly zero at every fixed node.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidInput`] for an empty or inconsistent
/// chain and [`CalculationError::SingularSystem`] when the supports do not
/// restrain the structure.
///
/// # Examples
/// ```
/// use rodx::{calculate_displacements, fixed_node, free_node, Rod, StructureInput};
///
/// let structure = StructureInput::new(
///     vec![fixed_node(0), free_node(1, 100.0)],
///     vec![Rod::new(0, 2.0, 1.0, 1000.0, 10.0)],
/// );
/// let displacements = calculate_displacements(&structure).expect("supported chain");
/// assert_eq!(displacements.get(0), Some(0.0));
/// assert!((displacements.as_slice()[1] - 0.2).abs() < 1e-12);
/// ```
pub fn calculate_displacements(
    input: &StructureInput,
) -> Result<DisplacementVector, CalculationError> {
    calculate_displacements_with(input, &GaussianElimination::default())
}

/// Same as [`calculate_displacements`] with a caller-supplied solver.
///
/// # Errors
///
/// See [`calculate_displacements`]; solver failures are passed through unchanged.
pub fn calculate_displacements_with<S: LinearSolver + ?Sized>(
    input: &StructureInput,
    solver: &S,
) -> Result<DisplacementVector, CalculationError> {
    let system = assemble_system(input)?;
    let reduced = reduce_system(&system, &input.fixed_nodes());
    if reduced.is_fully_constrained() {
        debug!("every node is fixed, skipping solve");
        return Ok(DisplacementVector::zeros(system.dof()));
    }

    let solution = solver.solve(&reduced.stiffness, &reduced.load)?;
    debug!(
        "{} solved {} free dofs",
        solver.name(),
        reduced.free_count()
    );
    Ok(reduced.expand(&solution)?.into())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::errors::InputError;
    use crate::model::{fixed_node, free_node, Node, Rod};

    fn rod(id: usize) -> Rod {
        Rod::new(id, 1.0, 1.0, 100.0, 1.0)
    }

    #[test]
    fn single_rod_under_tip_load() {
        let structure = StructureInput::new(
            vec![fixed_node(0), free_node(1, 100.0)],
            vec![Rod::new(0, 2.0, 1.0, 1000.0, 10.0)],
        );
        let displacements = calculate_displacements(&structure).expect("supported chain");
        assert_eq!(displacements.len(), 2);
        assert_eq!(displacements.as_slice()[0], 0.0);
        assert_relative_eq!(displacements.as_slice()[1], 0.2, epsilon = 1.0e-12);
    }

    #[test]
    fn clamped_both_ends_with_loaded_first_rod() {
        let structure = StructureInput::new(
            vec![fixed_node(0), free_node(1, 0.0), fixed_node(2)],
            vec![rod(0).with_distributed_load(10.0), rod(1)],
        );
        let displacements = calculate_displacements(&structure).expect("supported chain");
        // 200·δ1 = q·L/2 = 5
        assert_eq!(displacements.as_slice()[0], 0.0);
        assert_relative_eq!(displacements.as_slice()[1], 0.025, epsilon = 1.0e-12);
        assert_eq!(displacements.as_slice()[2], 0.0);
    }

    #[test]
    fn unloaded_structure_does_not_move() {
        for fixed in [[true, false], [false, true], [true, true]] {
            let structure = StructureInput::new(
                vec![
                    Node::new(0, fixed[0], 0.0),
                    free_node(1, 0.0),
                    free_node(2, 0.0),
                    Node::new(3, fixed[1], 0.0),
                ],
                vec![rod(0), rod(1), rod(2)],
            );
            let displacements = calculate_displacements(&structure).expect("supported chain");
            assert!(displacements.as_slice().iter().all(|&d| d == 0.0));
        }
    }

    #[test]
    fn every_node_fixed_returns_zeros() {
        let structure = StructureInput::new(vec![fixed_node(0), fixed_node(1)], vec![rod(0)]);
        let displacements = calculate_displacements(&structure).expect("nothing to solve");
        assert_eq!(displacements, DisplacementVector::zeros(2));
    }

    #[test]
    fn floating_structure_is_singular() {
        let structure = StructureInput::new(
            vec![free_node(0, 0.0), free_node(1, 1.0)],
            vec![rod(0)],
        );
        let error = calculate_displacements(&structure).expect_err("no support");
        assert_eq!(error, CalculationError::SingularSystem);
    }

    #[test]
    fn empty_structure_is_invalid() {
        let error = calculate_displacements(&StructureInput::default()).expect_err("no nodes");
        assert_eq!(error, CalculationError::InvalidInput(InputError::EmptyStructure));
    }

    #[test]
    fn custom_solver_is_used() {
        let structure = StructureInput::new(
            vec![fixed_node(0), free_node(1, 1.0e-9)],
            vec![Rod::new(0, 1.0, 1.0e-6, 1.0e-6, 1.0)],
        );
        // k = 1e-12 falls below the default pivot tolerance.
        let error = calculate_displacements(&structure).expect_err("tiny stiffness");
        assert_eq!(error, CalculationError::SingularSystem);

        let solver = GaussianElimination::with_pivot_tolerance(1.0e-15);
        let displacements =
            calculate_displacements_with(&structure, &solver).expect("looser tolerance");
        assert_relative_eq!(displacements.as_slice()[1], 1.0e3, max_relative = 1.0e-9);
    }
}
