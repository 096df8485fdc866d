//! # Node Affinity
//!
//! Compiles an ordered architecture preference list into node affinity.
//! Pods are required to land on one of the listed architectures and prefer
//! earlier entries: with `n` architectures the first gets weight `n`, the
//! last weight `1`. An empty list compiles to no affinity at all, since a
//! node selector requirement with no values matches nothing.

use crate::constants::scheduling;
use k8s_openapi::api::core::v1::{
    Affinity, NodeAffinity, NodeSelector, NodeSelectorRequirement, NodeSelectorTerm,
    PreferredSchedulingTerm,
};

/// Node affinity for an ordered list of architectures, `None` when the list is empty
pub fn compile_node_affinity(architectures: &[String]) -> Option<NodeAffinity> {
    if architectures.is_empty() {
        return None;
    }

    let required = NodeSelector {
        node_selector_terms: vec![arch_term(architectures.to_vec())],
    };

    let count = architectures.len();
    let preferred = architectures
        .iter()
        .enumerate()
        .map(|(i, arch)| PreferredSchedulingTerm {
            weight: (count - i) as i32,
            preference: arch_term(vec![arch.clone()]),
        })
        .collect();

    Some(NodeAffinity {
        required_during_scheduling_ignored_during_execution: Some(required),
        preferred_during_scheduling_ignored_during_execution: Some(preferred),
    })
}

/// Pod affinity holding only the compiled node affinity
pub fn compile_affinity(architectures: &[String]) -> Option<Affinity> {
    compile_node_affinity(architectures).map(|node_affinity| Affinity {
        node_affinity: Some(node_affinity),
        ..Default::default()
    })
}

fn arch_term(values: Vec<String>) -> NodeSelectorTerm {
    NodeSelectorTerm {
        match_expressions: Some(vec![NodeSelectorRequirement {
            key: scheduling::ARCH_LABEL.to_string(),
            operator: scheduling::OPERATOR_IN.to_string(),
            values: Some(values),
        }]),
        ..Default::default()
    }
}
