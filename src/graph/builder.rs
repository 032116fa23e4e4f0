//! Graph store with deduplicated bidirectional adjacency
//!
//! Nodes live in a dense arena and refer to each other by arena index, so
//! in-links and out-links never form ownership cycles. An FxHashMap maps the
//! external page id to its arena slot for O(1) lookups during construction.

use crate::error::{Error, Result};
use crate::types::NodeId;
use rustc_hash::FxHashMap;

/// A node in the graph store
#[derive(Debug, Clone)]
pub struct GraphNode {
    id: NodeId,
    /// Arena indices of nodes linking here
    in_links: Vec<u32>,
    /// Arena indices of nodes this one links to
    out_links: Vec<u32>,
}

impl GraphNode {
    fn new(id: NodeId) -> Self {
        Self {
            id,
            in_links: Vec::new(),
            out_links: Vec::new(),
        }
    }

    /// External id of this node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Arena indices of predecessors
    pub fn in_links(&self) -> &[u32] {
        &self.in_links
    }

    /// Arena indices of successors
    pub fn out_links(&self) -> &[u32] {
        &self.out_links
    }

    pub fn out_degree(&self) -> usize {
        self.out_links.len()
    }

    /// A sink has no outgoing links
    pub fn is_sink(&self) -> bool {
        self.out_links.is_empty()
    }
}

/// Mutable link graph keyed by external node id
#[derive(Debug, Default, Clone)]
pub struct GraphStore {
    /// Maps node id -> arena index
    id_to_index: FxHashMap<NodeId, u32>,
    /// Node storage
    nodes: Vec<GraphNode>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph store with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            id_to_index: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Build a store from `(source, target)` pairs in any order.
    ///
    /// Duplicate pairs are absorbed.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut store = Self::new();
        for (source, target) in edges {
            store.add_edge(source, target);
        }
        store
    }

    /// Get or create the node for `id`, returning its arena index
    pub fn ensure_node(&mut self, id: NodeId) -> u32 {
        if let Some(&index) = self.id_to_index.get(&id) {
            return index;
        }

        let index = self.nodes.len() as u32;
        self.id_to_index.insert(id, index);
        self.nodes.push(GraphNode::new(id));
        index
    }

    /// Record that `source` links to `target`.
    ///
    /// Both endpoints are created if missing. The out-link and in-link halves
    /// are checked separately, so an edge that is only half present still gets
    /// completed. Self-loops are kept.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) {
        let from = self.ensure_node(source);
        let to = self.ensure_node(target);

        let out_links = &mut self.nodes[from as usize].out_links;
        if !out_links.contains(&to) {
            out_links.push(to);
        }
        let in_links = &mut self.nodes[to as usize].in_links;
        if !in_links.contains(&from) {
            in_links.push(from);
        }
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of directed edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.out_links.len()).sum()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Look up a node by external id
    pub fn node(&self, id: NodeId) -> Result<&GraphNode> {
        self.index_of(id).map(|index| &self.nodes[index as usize])
    }

    /// Arena index of a node id
    pub fn index_of(&self, id: NodeId) -> Result<u32> {
        self.id_to_index.get(&id).copied().ok_or(Error::NotFound(id))
    }

    /// Get a node by arena index
    pub fn node_at(&self, index: u32) -> Option<&GraphNode> {
        self.nodes.get(index as usize)
    }

    /// Iterate over all nodes in arena order
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &GraphNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Re-derive every directed `(source, target)` edge from the adjacency
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.iter().flat_map(move |node| {
            node.out_links
                .iter()
                .map(move |&to| (node.id, self.nodes[to as usize].id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_ensure_node_is_idempotent() {
        let mut store = GraphStore::new();

        let a = store.ensure_node(10);
        let b = store.ensure_node(-3);
        let c = store.ensure_node(10); // duplicate

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(store.node_count(), 2);
        assert!(store.node(10).unwrap().is_sink());
    }

    #[test]
    fn test_add_edge_is_bidirectional() {
        let mut store = GraphStore::new();
        store.add_edge(1, 2);

        let one = store.index_of(1).unwrap();
        let two = store.index_of(2).unwrap();

        assert_eq!(store.node(1).unwrap().out_links(), &[two]);
        assert_eq!(store.node(2).unwrap().in_links(), &[one]);
        assert!(store.node(1).unwrap().in_links().is_empty());
        assert!(store.node(2).unwrap().is_sink());
    }

    #[test]
    fn test_duplicate_edges_absorbed() {
        let mut store = GraphStore::new();
        store.add_edge(1, 2);
        store.add_edge(1, 2);
        store.add_edge(1, 2);

        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.node(2).unwrap().in_links().len(), 1);
        assert_eq!(store.node(1).unwrap().out_degree(), 1);
    }

    #[test]
    fn test_half_present_edge_is_completed() {
        let mut store = GraphStore::new();
        let from = store.ensure_node(5);
        let to = store.ensure_node(6);
        // Only the in-link half exists
        store.nodes[to as usize].in_links.push(from);

        store.add_edge(5, 6);

        assert_eq!(store.node(5).unwrap().out_links(), &[to]);
        assert_eq!(store.node(6).unwrap().in_links(), &[from]);
    }

    #[test]
    fn test_self_loop_kept() {
        let mut store = GraphStore::new();
        store.add_edge(4, 4);

        let node = store.node(4).unwrap();
        assert_eq!(node.out_degree(), 1);
        assert_eq!(node.in_links().len(), 1);
        assert!(!node.is_sink());
    }

    #[test]
    fn test_lookup_unknown_node() {
        let store = GraphStore::from_edges([(1, 2)]);
        assert!(matches!(store.node(99), Err(Error::NotFound(99))));
        assert!(!store.contains(99));
        assert!(store.contains(2));
    }

    #[test]
    fn test_edges_round_trip() {
        let input = vec![(1, 2), (2, 3), (3, 1), (1, 2), (2, 2), (7, 3)];
        let store = GraphStore::from_edges(input.iter().copied());

        let expected: BTreeSet<_> = input.into_iter().collect();
        let derived: BTreeSet<_> = store.edges().collect();

        assert_eq!(derived, expected);
        assert_eq!(store.edge_count(), expected.len());
    }

    #[test]
    fn test_empty_store() {
        let store = GraphStore::with_capacity(16);
        assert!(store.is_empty());
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.nodes().count(), 0);
    }
}
