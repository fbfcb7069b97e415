//! Field-level checks applied to a structure before it is calculated.

use std::collections::HashSet;

use crate::errors::{RodProperty, ValidationIssue};
use crate::model::StructureInput;

/// Collect every rule the structure violates.
///
/// An empty result means the structure satisfies the chain topology and
/// positivity requirements the calculation relies on.
///
/// # Examples
/// ```
/// use rodx::{fixed_node, free_node, validate_structure, Rod, StructureInput, ValidationIssue};
///
/// let structure = StructureInput::new(
///     vec![fixed_node(0), fixed_node(1), free_node(2, 0.0)],
///     vec![Rod::new(0, 1.0, 1.0, 1.0, 1.0), Rod::new(1, 1.0, 1.0, 1.0, 1.0)],
/// );
/// assert_eq!(validate_structure(&structure), vec![ValidationIssue::InteriorSupport(1)]);
/// ```
#[must_use]
pub fn validate_structure(input: &StructureInput) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if input.nodes.is_empty() {
        issues.push(ValidationIssue::NoNodes);
    }
    if input.rods.is_empty() {
        issues.push(ValidationIssue::NoRods);
    }
    if !issues.is_empty() {
        return issues;
    }

    if input.node_count() != input.rod_count() + 1 {
        issues.push(ValidationIssue::NodeCount {
            nodes: input.node_count(),
            rods: input.rod_count(),
        });
    }

    let mut seen = HashSet::new();
    for rod in &input.rods {
        if !seen.insert(rod.id) {
            issues.push(ValidationIssue::DuplicateRodId(rod.id));
        }
    }
    let mut seen = HashSet::new();
    for node in &input.nodes {
        if !seen.insert(node.id) {
            issues.push(ValidationIssue::DuplicateNodeId(node.id));
        }
    }

    for rod in &input.rods {
        let properties = [
            (RodProperty::Length, rod.length),
            (RodProperty::Area, rod.area),
            (RodProperty::ElasticModulus, rod.elastic_modulus),
            (RodProperty::AllowableStress, rod.allowable_stress),
        ];
        for (property, value) in properties {
            if !(value.is_finite() && value > 0.0) {
                issues.push(ValidationIssue::NonPositiveProperty {
                    rod: rod.id,
                    property,
                    value,
                });
            }
        }
    }

    for (expected, node) in input.nodes.iter().enumerate() {
        if node.id != expected {
            issues.push(ValidationIssue::NodeIdSequence {
                expected,
                found: node.id,
            });
        }
    }
    for (expected, rod) in input.rods.iter().enumerate() {
        if rod.id != expected {
            issues.push(ValidationIssue::RodIdSequence {
                expected,
                found: rod.id,
            });
        }
    }

    let last = input.node_count() - 1;
    for (idx, node) in input.nodes.iter().enumerate() {
        if node.fixed && idx > 0 && idx < last {
            issues.push(ValidationIssue::InteriorSupport(node.id));
        }
    }

    issues
}
