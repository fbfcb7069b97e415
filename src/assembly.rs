//! Global stiffness matrix and load vector assembly.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::errors::{CalculationError, InputError};
use crate::model::StructureInput;

/// Assembled equilibrium system `K·δ = F` before supports are applied.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalSystem {
    /// Symmetric `n × n` stiffness matrix.
    pub stiffness: DMatrix<f64>,
    /// Nodal load vector of length `n`.
    pub load: DVector<f64>,
}

impl GlobalSystem {
    /// Number of degrees of freedom.
    #[must_use]
    pub fn dof(&self) -> usize {
        self.load.len()
    }
}

/// Check that the structure has nodes and the chain relation `nodes = rods + 1`.
pub(crate) fn check_topology(input: &StructureInput) -> Result<(), InputError> {
    if input.nodes.is_empty() {
        return Err(InputError::EmptyStructure);
    }
    if input.node_count() != input.rod_count() + 1 {
        return Err(InputError::TopologyMismatch {
            nodes: input.node_count(),
            rods: input.rod_count(),
        });
    }
    Ok(())
}

/// Assemble the global stiffness matrix and load vector for a rod chain.
///
/// Rod `i` contributes `E·A/L` to the 2×2 block of nodes `i` and `i + 1`, and
/// its distributed load `q` is lumped as `q·L/2` onto each end. Nodal point
/// forces are added last.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidInput`] when the structure is empty or
/// the node count is not the rod count plus one.
///
/// # Examples
/// ```
/// use rodx::{assemble_system, fixed_node, free_node, Rod, StructureInput};
///
/// let structure = StructureInput::new(
///     vec![fixed_node(0), free_node(1, 100.0)],
///     vec![Rod::new(0, 2.0, 1.0, 1000.0, 10.0)],
/// );
/// let system = assemble_system(&structure).expect("valid chain");
/// assert_eq!(system.stiffness[(0, 0)], 500.0);
/// assert_eq!(system.stiffness[(0, 1)], -500.0);
/// assert_eq!(system.load[1], 100.0);
/// ```
pub fn assemble_system(input: &StructureInput) -> Result<GlobalSystem, CalculationError> {
    check_topology(input)?;
    let dof = input.node_count();
    let mut stiffness = DMatrix::zeros(dof, dof);
    let mut load = DVector::zeros(dof);

    for (idx, rod) in input.rods.iter().enumerate() {
        let k = rod.axial_stiffness();
        let (start, end) = (idx, idx + 1);

        stiffness[(start, start)] += k;
        stiffness[(start, end)] -= k;
        stiffness[(end, start)] -= k;
        stiffness[(end, end)] += k;

        let equivalent = rod.distributed_load * rod.length / 2.0;
        load[start] += equivalent;
        load[end] += equivalent;
    }

    for (idx, node) in input.nodes.iter().enumerate() {
        load[idx] += node.external_force;
    }

    debug!("assembled {dof}x{dof} stiffness system from {} rods", input.rod_count());
    Ok(GlobalSystem { stiffness, load })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::model::{fixed_node, free_node, Rod};

    fn three_node_chain() -> StructureInput {
        StructureInput::new(
            vec![fixed_node(0), free_node(1, 5.0), free_node(2, -2.0)],
            vec![
                Rod::new(0, 2.0, 1.0, 100.0, 1.0).with_distributed_load(4.0),
                Rod::new(1, 1.0, 2.0, 50.0, 1.0),
            ],
        )
    }

    #[test]
    fn stiffness_blocks_overlap_on_shared_node() {
        let system = assemble_system(&three_node_chain()).expect("valid chain");
        let expected = DMatrix::from_row_slice(
            3,
            3,
            &[
                50.0, -50.0, 0.0, //
                -50.0, 150.0, -100.0, //
                0.0, -100.0, 100.0,
            ],
        );
        assert_relative_eq!(system.stiffness, expected, epsilon = 1.0e-12);
        assert_eq!(system.stiffness, system.stiffness.transpose());
    }

    #[test]
    fn distributed_load_is_split_between_rod_ends() {
        let system = assemble_system(&three_node_chain()).expect("valid chain");
        // q·L/2 = 4 on nodes 0 and 1, plus the point forces.
        assert_relative_eq!(system.load[0], 4.0);
        assert_relative_eq!(system.load[1], 9.0);
        assert_relative_eq!(system.load[2], -2.0);
    }

    #[test]
    fn unsupported_stiffness_has_rigid_body_mode() {
        let system = assemble_system(&three_node_chain()).expect("valid chain");
        let translation = DVector::from_element(3, 1.0);
        let residual = &system.stiffness * translation;
        assert_relative_eq!(residual.norm(), 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn empty_structure_is_rejected() {
        let error = assemble_system(&StructureInput::default()).expect_err("no nodes");
        assert_eq!(error, CalculationError::InvalidInput(InputError::EmptyStructure));
    }

    #[test]
    fn node_count_must_match_rods() {
        let structure = StructureInput::new(
            vec![fixed_node(0)],
            vec![Rod::new(0, 1.0, 1.0, 1.0, 1.0)],
        );
        let error = assemble_system(&structure).expect_err("mismatched chain");
        assert_eq!(
            error,
            CalculationError::InvalidInput(InputError::TopologyMismatch { nodes: 1, rods: 1 })
        );
    }
}
