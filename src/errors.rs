//! Error types produced while validating or calculating a rod chain.

use serde::Serialize;
use thiserror::Error;

/// Error returned when a calculation fails.
///
/// Calculations are all-or-nothing: when one of these is returned no partial
/// displacements or rod results exist.
///
/// # Examples
///
/// ```
/// use rodx::{calculate_displacements, free_node, CalculationError, Rod, StructureInput};
///
/// let floating = StructureInput::new(
///     vec![free_node(0, 0.0), free_node(1, 10.0)],
///     vec![Rod::new(0, 1.0, 1.0, 1.0, 1.0)],
/// );
/// let error = calculate_displacements(&floating).expect_err("no support");
/// assert_eq!(error, CalculationError::SingularSystem);
/// assert_eq!(error.to_string(), "structure has no support");
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalculationError {
    /// Returned when the input is structurally unusable.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    /// Returned when no pivot exceeds the numerical threshold, meaning the
    /// structure is not held against rigid-body translation.
    #[error("structure has no support")]
    SingularSystem,
}

impl CalculationError {
    /// Human-readable messages for a failure response.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

/// Reason an input was rejected before any arithmetic took place.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Returned when the structure carries no nodes.
    #[error("structure has no nodes")]
    EmptyStructure,
    /// Returned when the node count is not the rod count plus one.
    #[error("expected {expected} nodes for {rods} rods, found {nodes}", expected = .rods + 1)]
    TopologyMismatch {
        /// Number of nodes supplied.
        nodes: usize,
        /// Number of rods supplied.
        rods: usize,
    },
    /// Returned when a vector or matrix does not have the size the operation needs.
    #[error("dimension mismatch: expected {expected}, found {actual}")]
    DimensionMismatch {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
}

/// A single rule violated by a structure submitted for calculation.
///
/// Validation collects every violation rather than stopping at the first so a
/// user can fix the whole input in one pass.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationIssue {
    /// Returned when the node list is empty.
    #[error("node list must not be empty")]
    NoNodes,
    /// Returned when the rod list is empty.
    #[error("rod list must not be empty")]
    NoRods,
    /// Returned when the node count is not the rod count plus one.
    #[error("node count must exceed rod count by one (nodes: {nodes}, rods: {rods})")]
    NodeCount {
        /// Number of nodes supplied.
        nodes: usize,
        /// Number of rods supplied.
        rods: usize,
    },
    /// Returned when two rods share an id.
    #[error("duplicate id {0} in rod list")]
    DuplicateRodId(usize),
    /// Returned when two nodes share an id.
    #[error("duplicate id {0} in node list")]
    DuplicateNodeId(usize),
    /// Returned when a rod property is not strictly positive.
    #[error("rod {rod}: {property} must be > 0 (received {value})")]
    NonPositiveProperty {
        /// Identifier of the offending rod.
        rod: usize,
        /// Which property was rejected.
        property: RodProperty,
        /// Rejected value.
        value: f64,
    },
    /// Returned when node ids are not `0, 1, 2, …`.
    #[error("nodes must have sequential ids starting at 0: expected {expected}, found {found}")]
    NodeIdSequence {
        /// Id required at this position.
        expected: usize,
        /// Id supplied at this position.
        found: usize,
    },
    /// Returned when rod ids are not `0, 1, 2, …`.
    #[error("rods must have sequential ids starting at 0: expected {expected}, found {found}")]
    RodIdSequence {
        /// Id required at this position.
        expected: usize,
        /// Id supplied at this position.
        found: usize,
    },
    /// Returned when an interior node is fixed.
    #[error("support on node {0}: supports are only allowed on the end nodes")]
    InteriorSupport(usize),
}

/// Rod properties that must be strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RodProperty {
    /// Rod length.
    Length,
    /// Cross-sectional area.
    Area,
    /// Elastic modulus.
    ElasticModulus,
    /// Allowable stress.
    AllowableStress,
}

impl std::fmt::Display for RodProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RodProperty::Length => "length",
            RodProperty::Area => "area",
            RodProperty::ElasticModulus => "elastic modulus",
            RodProperty::AllowableStress => "allowable stress",
        };
        f.write_str(name)
    }
}

/// Reason a uniform-step table could not be produced.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SamplingError {
    /// Returned when the step is zero, negative or not finite.
    #[error("sampling step must be a positive finite number (received {0})")]
    InvalidStep(f64),
    /// Returned when a rod would need more rows than the table allows.
    #[error("sampling step {step} on rod {rod} would produce more than {limit} rows")]
    TooManySamples {
        /// Identifier of the rod that hit the limit.
        rod: usize,
        /// Rejected step.
        step: f64,
        /// Row limit per rod.
        limit: usize,
    },
}

/// Failure body shared by every error response: `{ "errors": [..] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error messages.
    pub errors: Vec<String>,
}

impl ErrorResponse {
    /// Response carrying a single message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

impl From<&CalculationError> for ErrorResponse {
    fn from(value: &CalculationError) -> Self {
        Self {
            errors: value.messages(),
        }
    }
}

impl From<&SamplingError> for ErrorResponse {
    fn from(value: &SamplingError) -> Self {
        Self::message(value.to_string())
    }
}

impl From<&[ValidationIssue]> for ErrorResponse {
    fn from(value: &[ValidationIssue]) -> Self {
        Self {
            errors: value.iter().map(ToString::to_string).collect(),
        }
    }
}
