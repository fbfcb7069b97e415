//! Plain-text rendering of calculation results.

use std::fmt::Write;

use crate::model::DisplacementVector;
use crate::postprocessor::{FullResult, PolynomialCoeffs};
use crate::sampling::SamplePoint;

/// Render the nodal displacements, one line per node.
#[must_use]
pub fn render_displacements(displacements: &DisplacementVector) -> String {
    let mut output = String::new();
    writeln!(&mut output, "Nodal displacements").expect("writing to string cannot fail");
    for (idx, value) in displacements.as_slice().iter().enumerate() {
        writeln!(&mut output, "  node {idx}: u = {value:+.6e} m")
            .expect("writing to string cannot fail");
    }
    output
}

/// Format a polynomial as `a0 + a1·x + a2·x²`, omitting a zero quadratic term.
fn polynomial(coeffs: &PolynomialCoeffs) -> String {
    if coeffs.a2 == 0.0 {
        format!("{:+.6e} {:+.6e}·x", coeffs.a0, coeffs.a1)
    } else {
        format!(
            "{:+.6e} {:+.6e}·x {:+.6e}·x²",
            coeffs.a0, coeffs.a1, coeffs.a2
        )
    }
}

/// Render the full result: displacements followed by each rod's diagrams and
/// a strength check against its allowable stress.
///
/// # Examples
/// ```
/// use rodx::{calculate_full, fixed_node, free_node, render_full_result, Rod, StructureInput};
///
/// let structure = StructureInput::new(
///     vec![fixed_node(0), free_node(1, 100.0)],
///     vec![Rod::new(0, 2.0, 1.0, 1000.0, 10.0)],
/// );
/// let report = render_full_result(&calculate_full(&structure).expect("supported chain"));
/// assert!(report.contains("rod 0"));
/// assert!(report.contains("OVERSTRESSED"));
/// ```
#[must_use]
pub fn render_full_result(result: &FullResult) -> String {
    let mut output = render_displacements(&DisplacementVector::new(result.displacements.clone()));

    for rod in &result.result_output {
        let [start, end] = rod.node_related_to;
        writeln!(
            &mut output,
            "\nrod {} (nodes {} -> {}, L = {} m, A = {} m², E = {:e} Pa, q = {} N/m)",
            rod.rod_id, start.id, end.id, rod.length, rod.area, rod.elastic_modulus,
            rod.distributed_load
        )
        .expect("writing to string cannot fail");
        writeln!(&mut output, "  N(x) = {}", polynomial(&rod.axial_force_coeffs))
            .expect("writing to string cannot fail");
        writeln!(&mut output, "  u(x) = {}", polynomial(&rod.displacement_coeffs))
            .expect("writing to string cannot fail");
        writeln!(&mut output, "  σ(x) = {}", polynomial(&rod.stress_coeffs))
            .expect("writing to string cannot fail");

        let verdict = if rod.is_within_allowable() {
            "OK"
        } else {
            "OVERSTRESSED"
        };
        writeln!(
            &mut output,
            "  max |σ| = {:.6e} Pa, allowable = {:.6e} Pa: {verdict}",
            rod.max_stress_on_the_rod, rod.allowable_stress
        )
        .expect("writing to string cannot fail");
    }

    let overstressed = result.overstressed_rods();
    if overstressed.is_empty() {
        output.push_str("\nAll rods within allowable stress.\n");
    } else {
        writeln!(&mut output, "\nOverstressed rods: {overstressed:?}")
            .expect("writing to string cannot fail");
    }
    output
}

/// Render a uniform-step table with one row per sample.
#[must_use]
pub fn render_samples(samples: &[SamplePoint]) -> String {
    let mut output = String::new();
    writeln!(
        &mut output,
        "{:>4} {:>12} {:>14} {:>14} {:>14}",
        "rod", "x [m]", "N [N]", "σ [Pa]", "u [m]"
    )
    .expect("writing to string cannot fail");
    for sample in samples {
        let marker = if sample.is_boundary { "*" } else { "" };
        writeln!(
            &mut output,
            "{:>4} {:>12.4} {:>14.6e} {:>14.6e} {:>14.6e}{marker}",
            sample.rod_id, sample.x, sample.axial_force, sample.stress, sample.displacement
        )
        .expect("writing to string cannot fail");
    }
    output
}

/// Render a uniform-step table as CSV, one row per sample.
///
/// Coordinates keep four decimals, force and stress four significant
/// decimals in scientific notation and displacements six.
///
/// # Examples
/// ```
/// use rodx::{calculate_full, fixed_node, free_node, render_samples_csv, Rod, StructureInput};
///
/// let structure = StructureInput::new(
///     vec![fixed_node(0), free_node(1, 100.0)],
///     vec![Rod::new(0, 2.0, 1.0, 1000.0, 10.0)],
/// );
/// let result = calculate_full(&structure).expect("supported chain");
/// let csv = render_samples_csv(&result.sample(1.0).expect("valid step"));
/// assert_eq!(csv.lines().next(), Some("rod,x,N(x),σ(x),u(x)"));
/// assert_eq!(csv.lines().count(), 4);
/// ```
#[must_use]
pub fn render_samples_csv(samples: &[SamplePoint]) -> String {
    let mut output = String::from("rod,x,N(x),σ(x),u(x)\n");
    for sample in samples {
        writeln!(
            &mut output,
            "{},{:.4},{:.4e},{:.4e},{:.6e}",
            sample.rod_id, sample.x, sample.axial_force, sample.stress, sample.displacement
        )
        .expect("writing to string cannot fail");
    }
    output
}
