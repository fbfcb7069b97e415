//! Input records describing a rod chain and the displacement vector solved for it.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Connection point between rod ends carrying a single axial degree of freedom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Sequential identifier starting at zero.
    pub id: usize,
    /// Whether the node is clamped to zero displacement.
    #[serde(default)]
    pub fixed: bool,
    /// Concentrated axial force in newtons. Positive values pull in the
    /// direction of increasing node index.
    #[serde(default)]
    pub external_force: f64,
}

impl Node {
    /// Create a [`Node`] with explicit fields.
    #[must_use]
    pub const fn new(id: usize, fixed: bool, external_force: f64) -> Self {
        Self {
            id,
            fixed,
            external_force,
        }
    }
}

/// One-dimensional bar element between two consecutive nodes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rod {
    /// Sequential identifier starting at zero.
    pub id: usize,
    /// Length in metres.
    pub length: f64,
    /// Cross-sectional area in square metres.
    pub area: f64,
    /// Elastic modulus in pascals.
    pub elastic_modulus: f64,
    /// Allowable stress in pascals. Only used for reporting.
    pub allowable_stress: f64,
    /// Uniform axial load along the rod in newtons per metre.
    #[serde(default)]
    pub distributed_load: f64,
}

impl Rod {
    /// Create an unloaded [`Rod`].
    #[must_use]
    pub const fn new(
        id: usize,
        length: f64,
        area: f64,
        elastic_modulus: f64,
        allowable_stress: f64,
    ) -> Self {
        Self {
            id,
            length,
            area,
            elastic_modulus,
            allowable_stress,
            distributed_load: 0.0,
        }
    }

    /// Return a copy of the rod carrying the distributed load `q`.
    #[must_use]
    pub const fn with_distributed_load(mut self, q: f64) -> Self {
        self.distributed_load = q;
        self
    }

    /// Axial stiffness `E·A/L`.
    #[must_use]
    pub fn axial_stiffness(&self) -> f64 {
        self.elastic_modulus * self.area / self.length
    }
}

/// A chain of rods where rod `i` joins node `i` and node `i + 1`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureInput {
    /// Nodes ordered by id.
    pub nodes: Vec<Node>,
    /// Rods ordered by id.
    pub rods: Vec<Rod>,
}

impl StructureInput {
    /// Create a structure from explicit node and rod lists.
    #[must_use]
    pub fn new(nodes: Vec<Node>, rods: Vec<Rod>) -> Self {
        Self { nodes, rods }
    }

    /// Number of nodes, which is also the number of degrees of freedom.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of rods.
    #[must_use]
    pub fn rod_count(&self) -> usize {
        self.rods.len()
    }

    /// Indices of the nodes flagged as fixed, in ascending order.
    #[must_use]
    pub fn fixed_nodes(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| node.fixed.then_some(idx))
            .collect()
    }
}

/// Axial displacement of every node, index-aligned with the node ids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplacementVector {
    /// Displacement per node in metres.
    pub displacements: Vec<f64>,
}

impl DisplacementVector {
    /// Wrap a list of nodal displacements.
    #[must_use]
    pub fn new(displacements: Vec<f64>) -> Self {
        Self { displacements }
    }

    /// All-zero displacements for `len` nodes.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self::new(vec![0.0; len])
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.displacements.len()
    }

    /// Whether the vector holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.displacements.is_empty()
    }

    /// Displacement of the node at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.displacements.get(index).copied()
    }

    /// Borrow the raw values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.displacements
    }
}

impl From<DVector<f64>> for DisplacementVector {
    fn from(value: DVector<f64>) -> Self {
        Self::new(value.iter().copied().collect())
    }
}

impl From<DisplacementVector> for DVector<f64> {
    fn from(value: DisplacementVector) -> Self {
        DVector::from_vec(value.displacements)
    }
}

/// Convenience helper for a free node.
///
/// # Examples
/// ```
/// use rodx::free_node;
///
/// let node = free_node(1, 100.0);
/// assert!(!node.fixed);
/// assert_eq!(node.external_force, 100.0);
/// ```
#[must_use]
pub const fn free_node(id: usize, external_force: f64) -> Node {
    Node::new(id, false, external_force)
}

/// Convenience helper for a clamped node.
///
/// # Examples
/// ```
/// use rodx::fixed_node;
///
/// let node = fixed_node(0);
/// assert!(node.fixed);
/// ```
#[must_use]
pub const fn fixed_node(id: usize) -> Node {
    Node::new(id, true, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_fields_use_contract_names() {
        let json = serde_json::to_value(Node::new(2, true, -5.0)).expect("node serializes");
        assert_eq!(
            json,
            serde_json::json!({ "id": 2, "fixed": true, "externalForce": -5.0 })
        );
    }

    #[test]
    fn rod_parses_from_contract_json() {
        let rod: Rod = serde_json::from_str(
            r#"{"id":0,"length":2.0,"area":1.0,"elasticModulus":1000.0,
                "allowableStress":10.0,"distributedLoad":-3.5}"#,
        )
        .expect("rod parses");
        assert_eq!(rod, Rod::new(0, 2.0, 1.0, 1000.0, 10.0).with_distributed_load(-3.5));
        assert!((rod.axial_stiffness() - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_ids_are_rejected_when_parsing() {
        let parsed = serde_json::from_str::<Node>(r#"{"id":-1,"fixed":false,"externalForce":0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn fixed_nodes_are_listed_in_order() {
        let structure = StructureInput::new(
            vec![fixed_node(0), free_node(1, 0.0), fixed_node(2)],
            vec![Rod::new(0, 1.0, 1.0, 1.0, 1.0), Rod::new(1, 1.0, 1.0, 1.0, 1.0)],
        );
        assert_eq!(structure.fixed_nodes(), vec![0, 2]);
        assert_eq!(structure.node_count(), 3);
        assert_eq!(structure.rod_count(), 2);
    }

    #[test]
    fn displacement_vector_from_dvector() {
        let vector = DVector::from_vec(vec![0.0, 0.1, -0.2]);
        let displacements = DisplacementVector::from(vector.clone());
        assert_eq!(displacements.as_slice(), &[0.0, 0.1, -0.2]);
        assert_eq!(DVector::from(displacements), vector);
    }
}
