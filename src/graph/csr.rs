//! Compressed Sparse Row (CSR) in-link representation
//!
//! The rank update pulls mass along in-links, so this layout stores each
//! node's predecessors contiguously. Built once from a [`GraphStore`] after
//! topology is final.

use super::builder::GraphStore;
use crate::types::NodeId;

/// A link graph in Compressed Sparse Row format over in-links
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's in-links are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (source nodes) for each in-link
    pub col_idx: Vec<u32>,
    /// Out-degree for each node
    pub out_degree: Vec<u32>,
    /// External id for each node
    pub ids: Vec<NodeId>,
}

impl CsrGraph {
    /// Convert a GraphStore into CSR format, keeping arena indices
    pub fn from_store(store: &GraphStore) -> Self {
        let num_nodes = store.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::with_capacity(store.edge_count());
        let mut out_degree = Vec::with_capacity(num_nodes);
        let mut ids = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for (_, node) in store.nodes() {
            ids.push(node.id());
            out_degree.push(node.out_degree() as u32);

            // Sorted for deterministic summation order
            let mut sources = node.in_links().to_vec();
            sources.sort_unstable();
            col_idx.extend(sources);

            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            out_degree,
            ids,
        }
    }

    /// Iterate over the predecessors of a node
    pub fn in_links(&self, node: u32) -> &[u32] {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        &self.col_idx[start..end]
    }

    /// Get the out-degree of a node
    pub fn degree(&self, node: u32) -> u32 {
        self.out_degree[node as usize]
    }

    /// Get the external id of a node
    pub fn node_id(&self, node: u32) -> NodeId {
        self.ids[node as usize]
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Find sink nodes (nodes with no outgoing links)
    pub fn sink_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.out_degree[n as usize] == 0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            out_degree: Vec::new(),
            ids: Vec::new(),
        }
    }
}
