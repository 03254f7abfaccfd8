//! Whole-process definitions and their structural validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use choreo_core::ElementId;
use choreo_state::ElementState;

use crate::node::{Node, NodeKind};

/// Structural defects a definition can carry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    /// Two nodes share an identifier.
    #[error("duplicate node id {id}")]
    DuplicateNode {
        /// The repeated identifier.
        id: ElementId,
    },

    /// An edge points at an element the definition does not declare.
    #[error("edge from {node} targets undeclared element {target}")]
    DanglingEdge {
        /// The node carrying the edge.
        node: ElementId,
        /// The missing target.
        target: ElementId,
    },

    /// No node is seeded `Enabled`, so nothing could ever fire.
    #[error("definition seeds no element as ENABLED")]
    NoEntryPoint,

    /// More than one node is seeded `Enabled`.
    #[error("definition seeds {count} elements as ENABLED, expected exactly one")]
    MultipleEntryPoints {
        /// How many nodes were seeded enabled.
        count: usize,
    },

    /// A non-message node claims to write a process flag.
    #[error("node {id} sets a flag but is not a message")]
    FlagOnNonMessage {
        /// The offending node.
        id: ElementId,
    },

    /// A conditional guard appears outside an exclusive gateway.
    #[error("node {id} carries a conditional edge but is not an exclusive gateway")]
    MisplacedGuard {
        /// The offending node.
        id: ElementId,
    },
}

/// A complete collaboration topology.
///
/// Node order is meaningful: seeding walks it, and an exclusive
/// gateway's edges are tried in the order they are declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    /// Every element of the collaboration, in definition order.
    pub nodes: Vec<Node>,
}

impl ProcessDefinition {
    /// Build a definition from its nodes.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Look up a node by element id.
    pub fn node(&self, id: &ElementId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Iterate nodes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of declared nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the definition declares no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check the definition's structural invariants.
    ///
    /// Returns the first defect found, walking nodes in order:
    /// unique ids, resolvable edge targets, exactly one `Enabled` seed,
    /// flags written only by messages, conditional guards only on
    /// exclusive gateways.
    pub fn validate(&self) -> Result<(), TopologyError> {
        for (i, node) in self.nodes.iter().enumerate() {
            if self.nodes[..i].iter().any(|other| other.id == node.id) {
                return Err(TopologyError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }

        for node in &self.nodes {
            for edge in &node.edges {
                if self.node(&edge.target).is_none() {
                    return Err(TopologyError::DanglingEdge {
                        node: node.id.clone(),
                        target: edge.target.clone(),
                    });
                }
            }
            if node.sets_flag.is_some() && !node.kind.is_message() {
                return Err(TopologyError::FlagOnNonMessage {
                    id: node.id.clone(),
                });
            }
            if node.kind != NodeKind::ExclusiveGateway
                && node.edges.iter().any(|e| e.guard.is_conditional())
            {
                return Err(TopologyError::MisplacedGuard {
                    id: node.id.clone(),
                });
            }
        }

        let entry_points = self
            .nodes
            .iter()
            .filter(|n| n.initial_state == ElementState::Enabled)
            .count();
        match entry_points {
            0 => Err(TopologyError::NoEntryPoint),
            1 => Ok(()),
            count => Err(TopologyError::MultipleEntryPoints { count }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use choreo_state::Flag;

    fn two_node_definition() -> ProcessDefinition {
        ProcessDefinition::new(vec![
            Node::start_event("start").with_edges([Edge::enables("end")]),
            Node::end_event("end"),
        ])
    }

    #[test]
    fn test_minimal_definition_validates() {
        assert_eq!(two_node_definition().validate(), Ok(()));
    }

    #[test]
    fn test_lookup_by_id() {
        let def = two_node_definition();
        assert!(def.node(&ElementId::new("end")).is_some());
        assert!(def.node(&ElementId::new("missing")).is_none());
        assert_eq!(def.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let def = ProcessDefinition::new(vec![
            Node::start_event("start"),
            Node::end_event("start"),
        ]);
        assert_eq!(
            def.validate(),
            Err(TopologyError::DuplicateNode {
                id: ElementId::new("start")
            })
        );
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let def = ProcessDefinition::new(vec![
            Node::start_event("start").with_edges([Edge::enables("nowhere")])
        ]);
        assert_eq!(
            def.validate(),
            Err(TopologyError::DanglingEdge {
                node: ElementId::new("start"),
                target: ElementId::new("nowhere"),
            })
        );
    }

    #[test]
    fn test_no_entry_point_rejected() {
        let def = ProcessDefinition::new(vec![Node::end_event("end")]);
        assert_eq!(def.validate(), Err(TopologyError::NoEntryPoint));
    }

    #[test]
    fn test_multiple_entry_points_rejected() {
        let def = ProcessDefinition::new(vec![
            Node::start_event("a"),
            Node::start_event("b"),
        ]);
        assert_eq!(
            def.validate(),
            Err(TopologyError::MultipleEntryPoints { count: 2 })
        );
    }

    #[test]
    fn test_flag_on_gateway_rejected() {
        let mut gateway = Node::exclusive_gateway("g");
        gateway.sets_flag = Some(Flag::Confirm);
        let def = ProcessDefinition::new(vec![Node::start_event("start"), gateway]);
        assert_eq!(
            def.validate(),
            Err(TopologyError::FlagOnNonMessage {
                id: ElementId::new("g")
            })
        );
    }

    #[test]
    fn test_conditional_edge_outside_exclusive_gateway_rejected() {
        let def = ProcessDefinition::new(vec![
            Node::start_event("start")
                .with_edges([Edge::enables_when("end", Flag::Confirm, true)]),
            Node::end_event("end"),
        ]);
        assert_eq!(
            def.validate(),
            Err(TopologyError::MisplacedGuard {
                id: ElementId::new("start")
            })
        );
    }

    #[test]
    fn test_definition_roundtrips_through_yaml() {
        let def = two_node_definition();
        let yaml = serde_yaml::to_string(&def).unwrap();
        let parsed: ProcessDefinition = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, def);
    }
}
