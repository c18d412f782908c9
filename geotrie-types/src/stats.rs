use serde::{Deserialize, Serialize};

/// Store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Trie nodes currently allocated, root included
    pub node_count: usize,
    /// Nodes holding at least one entry
    pub populated_nodes: usize,
    /// Total key/value entries across all nodes
    pub entry_count: usize,
    /// Total number of operations performed
    pub operations_count: u64,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes that exist without holding data.
    pub fn empty_nodes(&self) -> usize {
        self.node_count - self.populated_nodes
    }
}
