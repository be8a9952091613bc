//! Shortest-path planning over the transition graph

use super::types::{PathResult, TransitionPath};
use crate::graph::{TransitionGraph, TypeName};
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

/// Query for all minimum-hop paths between two types
#[derive(Debug, Clone)]
pub struct PathQuery {
    /// Source type (short or canonical)
    pub source: String,
    /// Target type (short or canonical)
    pub target: String,
    /// Maximum path length to search; unbounded when `None`
    pub max_length: Option<usize>,
}

impl PathQuery {
    /// Create a new path query between two types
    pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            max_length: None,
        }
    }

    /// Set maximum path length
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Execute the query (layered BFS keeping every shortest predecessor)
    pub fn execute(&self, graph: &TransitionGraph) -> PathResult {
        let (Some(source), Some(target)) = (
            graph.resolve_node(&self.source),
            graph.resolve_node(&self.target),
        ) else {
            return PathResult::not_found();
        };

        if source == target {
            return PathResult::found(vec![TransitionPath {
                nodes: vec![source.clone()],
                operations: Vec::new(),
            }]);
        }

        let Some(predecessors) = self.shortest_predecessors(graph, source, target) else {
            return PathResult::not_found();
        };

        let paths: Vec<TransitionPath> = enumerate_paths(source, target, &predecessors)
            .into_iter()
            .filter_map(|nodes| with_operations(graph, nodes))
            .collect();

        for path in &paths {
            debug!(path = ?path.nodes, "  path");
        }

        PathResult::found(paths)
    }

    /// BFS from `source`, recording every predecessor that lies on a
    /// shortest path. Returns `None` when `target` is unreachable.
    fn shortest_predecessors(
        &self,
        graph: &TransitionGraph,
        source: &TypeName,
        target: &TypeName,
    ) -> Option<BTreeMap<TypeName, Vec<TypeName>>> {
        let mut distance: BTreeMap<TypeName, usize> = BTreeMap::new();
        let mut predecessors: BTreeMap<TypeName, Vec<TypeName>> = BTreeMap::new();
        let mut queue: VecDeque<TypeName> = VecDeque::new();

        distance.insert(source.clone(), 0);
        queue.push_back(source.clone());

        while let Some(current) = queue.pop_front() {
            let depth = distance[&current];

            // Nothing beyond the target's layer can be on a shortest path
            if distance.get(target).is_some_and(|&d| depth >= d) {
                break;
            }
            if self.max_length.is_some_and(|max| depth >= max) {
                break;
            }

            for edge in graph.successors(&current) {
                let next = &edge.target;
                match distance.get(next) {
                    None => {
                        distance.insert(next.clone(), depth + 1);
                        predecessors.insert(next.clone(), vec![current.clone()]);
                        queue.push_back(next.clone());
                    }
                    Some(&d) if d == depth + 1 => {
                        predecessors.entry(next.clone()).or_default().push(current.clone());
                    }
                    Some(_) => {}
                }
            }
        }

        distance.contains_key(target).then_some(predecessors)
    }
}

/// Walk the predecessor lists back from `target`, yielding source→target paths.
fn enumerate_paths(
    source: &TypeName,
    target: &TypeName,
    predecessors: &BTreeMap<TypeName, Vec<TypeName>>,
) -> Vec<Vec<TypeName>> {
    let mut paths = Vec::new();
    let mut stack: Vec<Vec<TypeName>> = vec![vec![target.clone()]];

    while let Some(partial) = stack.pop() {
        let head = &partial[partial.len() - 1];
        if head == source {
            let mut path = partial;
            path.reverse();
            paths.push(path);
            continue;
        }
        if let Some(preds) = predecessors.get(head) {
            // Reverse so the first predecessor is explored first
            for pred in preds.iter().rev() {
                let mut extended = partial.clone();
                extended.push(pred.clone());
                stack.push(extended);
            }
        }
    }

    paths
}

fn with_operations(graph: &TransitionGraph, nodes: Vec<TypeName>) -> Option<TransitionPath> {
    let operations = nodes
        .windows(2)
        .map(|step| {
            graph
                .edge(step[0].as_str(), step[1].as_str())
                .map(|e| e.operation.clone())
        })
        .collect::<Option<Vec<_>>>()?;
    Some(TransitionPath { nodes, operations })
}
