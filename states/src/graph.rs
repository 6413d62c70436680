use std::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    fmt::{Debug, Formatter},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError<T>
where
    T: Debug,
{
    #[error("Cycle detected in dependency graph, from {:?}", .0)]
    CycleDetected(DepRoute<T>),
    #[error("Duplicate edge detected in dependency graph, from {:?} to {:?}", .0.route[0], .0.route[1])]
    DuplicateEdge(DepRoute<T>),
}

/// A walk through the graph, first node to last.
pub struct DepRoute<T> {
    route: Vec<T>,
}

impl<T> Debug for DepRoute<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut nodes = self.route.iter();
        let Some(first) = nodes.next() else {
            return write!(f, "[]");
        };
        write!(f, "{first:?}")?;
        for node in nodes {
            write!(f, " -> {node:?}")?;
        }
        Ok(())
    }
}

/// Directed dependency graph over copyable node keys.
///
/// Edges point from a dependency to the node that reads it, so walking
/// forward from a node yields everything that must be refreshed when the
/// node changes. Transitive reachability is cached per start node; the
/// cache is only populated after registration settles, so it never holds
/// stale routes.
#[derive(Debug)]
pub struct Graph<Node, Edge = ()>
where
    Node: Debug + PartialEq + Copy + Ord,
    Edge: Debug + PartialEq,
{
    edges: Vec<(Node, Edge, Node)>,

    reachable_cache: BTreeMap<Node, BTreeSet<Node>>,
}

impl<Node, Edge> Default for Graph<Node, Edge>
where
    Node: Debug + PartialEq + Copy + Ord,
    Edge: Debug + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Node, Edge> Graph<Node, Edge>
where
    Node: Debug + PartialEq + Copy + Ord,
    Edge: Debug + PartialEq,
{
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),

            reachable_cache: BTreeMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),

            reachable_cache: BTreeMap::new(),
        }
    }

    pub fn route_to(&mut self, from: Node, to: Node, via: Edge) {
        self.edges.push((from, via, to));
    }

    fn in_degrees(&self) -> BTreeMap<Node, usize> {
        let mut degrees = BTreeMap::new();

        for (from, _via, to) in &self.edges {
            degrees.entry(*from).or_insert(0);
            *degrees.entry(*to).or_insert(0) += 1;
        }

        degrees
    }

    /// Checks that the graph admits a topological order, i.e. contains no
    /// cycle and no duplicated edge.
    pub fn topology_sort(&mut self) -> Result<(), TopologyError<Node>> {
        let mut degrees = self.in_degrees();

        while !degrees.is_empty() {
            let Some(next) = degrees
                .iter()
                .find_map(|(&node, &in_degree)| (in_degree == 0).then_some(node))
            else {
                // Every remaining node has an incoming edge, so a cycle
                // must run through them.
                let remaining: Vec<Node> = degrees.keys().copied().collect();
                let route = self.find_cycle(&remaining).unwrap_or_default();
                return Err(TopologyError::CycleDetected(DepRoute { route }));
            };

            degrees.remove(&next);
            for successor in self.successors(next)? {
                if let Some(in_degree) = degrees.get_mut(&successor) {
                    *in_degree -= 1;
                }
            }
        }

        Ok(())
    }

    fn find_cycle(&self, nodes: &[Node]) -> Option<Vec<Node>> {
        let mut visited = BTreeSet::new();
        let mut on_path = BTreeSet::new();
        let mut path: Vec<Node> = Vec::new();
        let mut stack: Vec<(Node, std::vec::IntoIter<Node>)> = Vec::new();

        // Iterative DFS restricted to the given node set.
        let remaining_successors = |node: Node| {
            self.successors(node)
                .unwrap_or_default()
                .into_iter()
                .filter(|candidate| nodes.contains(candidate))
                .collect::<Vec<_>>()
                .into_iter()
        };

        for &start in nodes {
            if visited.contains(&start) {
                continue;
            }

            visited.insert(start);
            on_path.insert(start);
            path.push(start);
            stack.push((start, remaining_successors(start)));

            while let Some((current, successors)) = stack.last_mut() {
                match successors.next() {
                    Some(next) if on_path.contains(&next) => {
                        if let Some(loop_start) = path.iter().position(|&node| node == next) {
                            let mut cycle = path[loop_start..].to_vec();
                            cycle.push(next);
                            return Some(cycle);
                        }
                    }
                    Some(next) if !visited.contains(&next) => {
                        visited.insert(next);
                        on_path.insert(next);
                        path.push(next);
                        stack.push((next, remaining_successors(next)));
                    }
                    Some(_) => {}
                    None => {
                        let finished = *current;
                        stack.pop();
                        on_path.remove(&finished);
                        path.pop();
                    }
                }
            }
        }

        None
    }

    /// Every node reachable from `node`, i.e. everything that directly or
    /// transitively depends on it.
    pub fn connected(&mut self, node: Node) -> impl Iterator<Item = &Node> {
        if !self.reachable_cache.contains_key(&node) {
            let reachable = self.reachable_from(node);
            self.reachable_cache.insert(node, reachable);
        }
        self.reachable_cache[&node].iter()
    }

    fn successors(&self, node: Node) -> Result<BTreeSet<Node>, TopologyError<Node>> {
        let mut collected = BTreeSet::new();

        for (from, _via, to) in &self.edges {
            if from == &node {
                if collected.contains(to) {
                    return Err(TopologyError::DuplicateEdge(DepRoute {
                        route: vec![node, *to],
                    }));
                }
                collected.insert(*to);
            }
        }

        Ok(collected)
    }

    fn reachable_from(&self, node: Node) -> BTreeSet<Node> {
        let mut collected = BTreeSet::new();
        let mut queue = VecDeque::new();

        queue.push_back(node);

        while let Some(current) = queue.pop_front() {
            for (from, _via, to) in &self.edges {
                // Checking membership before queueing keeps a cyclic graph
                // from looping forever.
                if from == &current && !collected.contains(to) {
                    collected.insert(*to);
                    queue.push_back(*to);
                }
            }
        }

        collected
    }
}
