//! Immutable view of a simple undirected graph.
//!
//! [`Graph`] is the only input the evolutionary engine reads. It stores
//! nodes in first-insertion order and neighbors in edge-insertion order, so
//! every structure derived from it (gene mapping, neighbor lists) is stable
//! across runs.
//!
//! Self-loops and duplicate edges are dropped on insertion: the engine only
//! works on simple graphs.

use rustc_hash::{FxHashMap, FxHashSet};

/// Node identifier.
pub type NodeId = usize;

/// Simple undirected, unweighted graph.
///
/// # Examples
///
/// ```
/// use u_locus::Graph;
///
/// let g = Graph::from_edges([(0, 1), (1, 2), (2, 0), (2, 2)]);
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.edge_count(), 3); // self-loop dropped
/// assert_eq!(g.degree(2), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeId>,
    index: FxHashMap<NodeId, usize>,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
    edge_set: FxHashSet<(usize, usize)>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an edge list, dropping self-loops and duplicates.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut g = Self::new();
        for (a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    /// Adds a node if absent. Returns `true` when the node is new.
    pub fn add_node(&mut self, id: NodeId) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        self.intern(id);
        true
    }

    /// Adds an undirected edge, creating missing endpoints.
    ///
    /// Returns `false` (and records nothing but the endpoints) for a
    /// self-loop or an edge that already exists.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let ia = self.intern(a);
        let ib = self.intern(b);
        if ia == ib {
            return false;
        }
        let key = (ia.min(ib), ia.max(ib));
        if !self.edge_set.insert(key) {
            return false;
        }
        self.adjacency[ia].push(ib);
        self.adjacency[ib].push(ia);
        self.edges.push((ia, ib));
        true
    }

    fn intern(&mut self, id: NodeId) -> usize {
        if let Some(&i) = self.index.get(&id) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(id);
        self.index.insert(id, i);
        self.adjacency.push(Vec::new());
        i
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node identifiers in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns `true` if the node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Edges as node-id pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges
            .iter()
            .map(move |&(a, b)| (self.nodes[a], self.nodes[b]))
    }

    /// Degree of a node, or `None` if absent.
    pub fn degree(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).map(|&i| self.adjacency[i].len())
    }

    /// Neighbors of a node in edge-insertion order, or `None` if absent.
    pub fn neighbors(&self, id: NodeId) -> Option<impl Iterator<Item = NodeId> + '_> {
        self.index
            .get(&id)
            .map(move |&i| self.adjacency[i].iter().map(move |&j| self.nodes[j]))
    }

    /// Dense position of a node in [`nodes`](Self::nodes).
    pub(crate) fn position(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Degree by dense position.
    pub(crate) fn degree_at(&self, pos: usize) -> usize {
        self.adjacency[pos].len()
    }

    /// Edges as dense position pairs.
    pub(crate) fn edge_positions(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_drops_self_loops_and_duplicates() {
        let g = Graph::from_edges([(0, 1), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree(1), Some(2));
        assert_eq!(g.degree(0), Some(1));
    }

    #[test]
    fn test_node_order_is_first_insertion() {
        let g = Graph::from_edges([(5, 3), (3, 9), (9, 5)]);
        assert_eq!(g.nodes(), &[5, 3, 9]);
        let n: Vec<_> = g.neighbors(3).unwrap().collect();
        assert_eq!(n, vec![5, 9]);
    }

    #[test]
    fn test_isolated_node() {
        let mut g = Graph::from_edges([(0, 1)]);
        assert!(g.add_node(7));
        assert!(!g.add_node(7));
        assert_eq!(g.degree(7), Some(0));
        assert_eq!(g.neighbors(7).unwrap().count(), 0);
        assert!(g.degree(42).is_none());
    }

    #[test]
    fn test_edges_report_node_ids() {
        let g = Graph::from_edges([(10, 20), (20, 30)]);
        let e: Vec<_> = g.edges().collect();
        assert_eq!(e, vec![(10, 20), (20, 30)]);
    }

    #[test]
    fn test_degree_sum_is_twice_edges() {
        let g = Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let total: usize = g.nodes().iter().map(|&n| g.degree(n).unwrap()).sum();
        assert_eq!(total, 2 * g.edge_count());
    }
}
