#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod assembly;
pub mod errors;
pub mod model;
pub mod postprocessor;
pub mod processor;
pub mod reduction;
pub mod report;
pub mod sampling;
pub mod solver;
pub mod validation;

pub use assembly::{assemble_system, GlobalSystem};
pub use errors::{
    CalculationError, ErrorResponse, InputError, RodProperty, SamplingError, ValidationIssue,
};
pub use model::{fixed_node, free_node, DisplacementVector, Node, Rod, StructureInput};
pub use postprocessor::{
    calculate_full, calculate_full_with, calculate_rod_results, FullResult, PolynomialCoeffs,
    RodResult,
};
pub use processor::{calculate_displacements, calculate_displacements_with};
pub use reduction::{reduce_system, ReducedSystem};
pub use report::{render_displacements, render_full_result, render_samples, render_samples_csv};
pub use sampling::{SamplePoint, MAX_SAMPLES_PER_ROD};
pub use solver::{GaussianElimination, LinearSolver, DEFAULT_PIVOT_TOLERANCE};
pub use validation::validate_structure;
