//! Ordering of generated definitions in the execution request.

use std::collections::{BTreeSet, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::metric::Definition;

/// Orders and deduplicates the definitions sent with an execution.
pub trait DefinitionSorter: Send + Sync {
    fn sort_definitions(&self, definitions: Vec<Definition>) -> Vec<Definition>;
}

/// Default sorter.
///
/// Drops repeated identifiers (identical content, first occurrence kept) and
/// places every definition after the definitions its expression references
/// as `{identifier}`. Otherwise the input order is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyOrder;

impl DefinitionSorter for DependencyOrder {
    fn sort_definitions(&self, definitions: Vec<Definition>) -> Vec<Definition> {
        let mut seen = HashSet::new();
        let unique: Vec<Definition> = definitions
            .into_iter()
            .filter(|d| seen.insert(d.identifier().to_string()))
            .collect();

        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..unique.len()).map(|i| graph.add_node(i)).collect();

        for (i, dependent) in unique.iter().enumerate() {
            for (j, dependency) in unique.iter().enumerate() {
                let reference = format!("{{{}}}", dependency.identifier());
                if i != j && dependent.expression().contains(&reference) {
                    graph.add_edge(nodes[j], nodes[i], ());
                }
            }
        }

        let mut in_degree: Vec<usize> = nodes
            .iter()
            .map(|&n| graph.neighbors_directed(n, Direction::Incoming).count())
            .collect();
        let mut ready: BTreeSet<usize> = (0..unique.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(unique.len());

        while let Some(i) = ready.pop_first() {
            order.push(i);
            for next in graph.neighbors_directed(nodes[i], Direction::Outgoing) {
                let j = graph[next];
                in_degree[j] -= 1;
                if in_degree[j] == 0 {
                    ready.insert(j);
                }
            }
        }

        // Cycles cannot be ordered; keep their members in input order at the end.
        let placed: HashSet<usize> = order.iter().copied().collect();
        order.extend((0..unique.len()).filter(|i| !placed.contains(i)));

        let mut slots: Vec<Option<Definition>> = unique.into_iter().map(Some).collect();
        order.into_iter().filter_map(|i| slots[i].take()).collect()
    }
}
