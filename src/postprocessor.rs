//! Per-rod force, displacement and stress diagrams derived from nodal displacements.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assembly::check_topology;
use crate::errors::{CalculationError, InputError};
use crate::model::{DisplacementVector, Node, Rod, StructureInput};
use crate::processor::calculate_displacements_with;
use crate::solver::{GaussianElimination, LinearSolver};

/// Quadratic `a0 + a1·x + a2·x²` over the local rod coordinate `x ∈ [0, L]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolynomialCoeffs {
    /// Constant term.
    pub a0: f64,
    /// Linear term.
    pub a1: f64,
    /// Quadratic term.
    pub a2: f64,
}

impl PolynomialCoeffs {
    /// Create a quadratic from its coefficients.
    #[must_use]
    pub const fn new(a0: f64, a1: f64, a2: f64) -> Self {
        Self { a0, a1, a2 }
    }

    /// Create an affine function, leaving `a2` at zero.
    #[must_use]
    pub const fn linear(a0: f64, a1: f64) -> Self {
        Self::new(a0, a1, 0.0)
    }

    /// Evaluate the polynomial at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a0 + self.a1 * x + self.a2 * x * x
    }
}

/// Diagrams and peak stress of a single rod.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RodResult {
    /// Identifier of the rod.
    pub rod_id: usize,
    /// Length in metres.
    pub length: f64,
    /// Cross-sectional area in square metres.
    pub area: f64,
    /// Elastic modulus in pascals.
    pub elastic_modulus: f64,
    /// Allowable stress in pascals.
    pub allowable_stress: f64,
    /// Uniform axial load in newtons per metre.
    pub distributed_load: f64,
    /// Start and end node of the rod.
    pub node_related_to: [Node; 2],
    /// Axial force `N(x)`.
    pub axial_force_coeffs: PolynomialCoeffs,
    /// Axial displacement `u(x)`.
    pub displacement_coeffs: PolynomialCoeffs,
    /// Axial stress `σ(x)`.
    pub stress_coeffs: PolynomialCoeffs,
    /// Largest `|σ(x)|` on the rod.
    pub max_stress_on_the_rod: f64,
}

impl RodResult {
    /// Derive the diagrams of `rod` from the displacements of its end nodes.
    ///
    /// For an end displacement pair `(δ0, δ1)`:
    /// - `N(x) = E·A/L·(δ1 − δ0) + q·L/2 − q·x`
    /// - `u(x) = δ0 + ((δ1 − δ0)/L + q·L/(2·E·A))·x − q/(2·E·A)·x²`
    /// - `σ(x) = N(x)/A`
    ///
    /// `σ` is affine, so its peak magnitude sits at one of the rod ends.
    #[must_use]
    pub fn from_end_displacements(rod: &Rod, nodes: [Node; 2], start: f64, end: f64) -> Self {
        let Rod {
            length,
            area,
            elastic_modulus,
            distributed_load: q,
            ..
        } = *rod;
        let ea = elastic_modulus * area;
        let elongation = end - start;

        // The load term q·L/2·(−2/L) reduces to −q for every L > 0.
        let axial_force = PolynomialCoeffs::linear(
            ea / length * elongation + q * length / 2.0,
            -q,
        );
        let displacement = PolynomialCoeffs::new(
            start,
            elongation / length + q * length / (2.0 * ea),
            -q / (2.0 * ea),
        );
        let stress = PolynomialCoeffs::linear(axial_force.a0 / area, axial_force.a1 / area);
        let max_stress = stress.evaluate(0.0).abs().max(stress.evaluate(length).abs());

        Self {
            rod_id: rod.id,
            length,
            area,
            elastic_modulus,
            allowable_stress: rod.allowable_stress,
            distributed_load: q,
            node_related_to: nodes,
            axial_force_coeffs: axial_force,
            displacement_coeffs: displacement,
            stress_coeffs: stress,
            max_stress_on_the_rod: max_stress,
        }
    }

    /// Whether the peak stress stays within the allowable stress.
    #[must_use]
    pub fn is_within_allowable(&self) -> bool {
        self.max_stress_on_the_rod <= self.allowable_stress
    }

    /// Ratio of allowable stress to peak stress, infinite for an unstressed rod.
    #[must_use]
    pub fn factor_of_safety(&self) -> f64 {
        if self.max_stress_on_the_rod == 0.0 {
            f64::INFINITY
        } else {
            self.allowable_stress / self.max_stress_on_the_rod
        }
    }
}

/// Nodal displacements together with the diagrams of every rod.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullResult {
    /// Displacement per node in metres.
    pub displacements: Vec<f64>,
    /// One result per rod, ordered by rod id.
    pub result_output: Vec<RodResult>,
}

impl FullResult {
    /// Identifiers of rods whose peak stress exceeds their allowable stress.
    #[must_use]
    pub fn overstressed_rods(&self) -> Vec<usize> {
        self.result_output
            .iter()
            .filter(|rod| !rod.is_within_allowable())
            .map(|rod| rod.rod_id)
            .collect()
    }

    /// Largest peak stress across the chain with the rod it occurs on.
    #[must_use]
    pub fn max_stress(&self) -> Option<(usize, f64)> {
        self.result_output
            .iter()
            .map(|rod| (rod.rod_id, rod.max_stress_on_the_rod))
            .fold(None, |best, candidate| match best {
                Some((_, stress)) if stress >= candidate.1 => best,
                _ => Some(candidate),
            })
    }
}

/// Derive the diagrams of every rod from solved nodal displacements.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidInput`] when the chain is inconsistent
/// or `displacements` does not hold one value per node.
pub fn calculate_rod_results(
    input: &StructureInput,
    displacements: &DisplacementVector,
) -> Result<FullResult, CalculationError> {
    check_topology(input)?;
    if displacements.len() != input.node_count() {
        return Err(InputError::DimensionMismatch {
            expected: input.node_count(),
            actual: displacements.len(),
        }
        .into());
    }

    let values = displacements.as_slice();
    let result_output = input
        .rods
        .iter()
        .enumerate()
        .map(|(idx, rod)| {
            RodResult::from_end_displacements(
                rod,
                [input.nodes[idx], input.nodes[idx + 1]],
                values[idx],
                values[idx + 1],
            )
        })
        .collect();

    debug!("derived diagrams for {} rods", input.rod_count());
    Ok(FullResult {
        displacements: values.to_vec(),
        result_output,
    })
}

/// Solve displacements and derive every rod's diagrams in one call.
///
/// # Errors
///
/// Propagates any failure of [`calculate_displacements`](crate::calculate_displacements)
/// or [`calculate_rod_results`].
///
/// # Examples
/// ```
/// use rodx::{calculate_full, fixed_node, free_node, Rod, StructureInput};
///
/// let structure = StructureInput::new(
///     vec![fixed_node(0), free_node(1, 100.0)],
///     vec![Rod::new(0, 2.0, 1.0, 1000.0, 10.0)],
/// );
/// let result = calculate_full(&structure).expect("supported chain");
/// let rod = &result.result_output[0];
/// assert!((rod.axial_force_coeffs.a0 - 100.0).abs() < 1e-9);
/// assert!((rod.max_stress_on_the_rod - 100.0).abs() < 1e-9);
/// assert!(!rod.is_within_allowable());
/// ```
pub fn calculate_full(input: &StructureInput) -> Result<FullResult, CalculationError> {
    calculate_full_with(input, &GaussianElimination::default())
}

/// Same as [`calculate_full`] with a caller-supplied solver.
///
/// # Errors
///
/// See [`calculate_full`].
pub fn calculate_full_with<S: LinearSolver + ?Sized>(
    input: &StructureInput,
    solver: &S,
) -> Result<FullResult, CalculationError> {
    let displacements = calculate_displacements_with(input, solver)?;
    calculate_rod_results(input, &displacements)
}
