//! 32-ary trie node addressed by geohash characters.

use crate::compute::geohash::Geohash;
use crate::compute::geohash::alphabet;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt;

/// One cell of the trie.
///
/// `children[i]` holds the node whose path is `path` followed by
/// `ALPHABET[i]`. The root owns every descendant; there are no back links.
pub(crate) struct Node {
    path: String,
    children: [Option<Box<Node>>; 32],
    data: FxHashMap<String, String>,
}

/// Node tallies gathered in one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct NodeCounts {
    pub nodes: usize,
    pub populated: usize,
    pub entries: usize,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self::with_path(String::new())
    }

    fn with_path(path: String) -> Self {
        Self {
            path,
            children: Default::default(),
            data: FxHashMap::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn data(&self) -> &FxHashMap<String, String> {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut FxHashMap<String, String> {
        &mut self.data
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flatten().map(|child| &**child)
    }

    /// Descends to the node for `geohash`, `None` if any step is missing.
    pub(crate) fn walk(&self, geohash: &Geohash) -> Option<&Node> {
        let mut node = self;
        for digit in geohash.digits() {
            node = node.children[digit as usize].as_deref()?;
        }
        Some(node)
    }

    pub(crate) fn walk_mut(&mut self, geohash: &Geohash) -> Option<&mut Node> {
        let mut node = self;
        for digit in geohash.digits() {
            node = node.children[digit as usize].as_deref_mut()?;
        }
        Some(node)
    }

    /// Descends to the node for `geohash`, allocating missing steps.
    pub(crate) fn walk_or_create(&mut self, geohash: &Geohash) -> &mut Node {
        let full = geohash.as_str();
        let mut node = self;
        for (depth, digit) in geohash.digits().enumerate() {
            node = &mut **node.children[digit as usize]
                .get_or_insert_with(|| Box::new(Node::with_path(full[..=depth].to_string())));
        }
        node
    }

    /// Pushes the path of this node and every populated descendant, pre-order
    /// by alphabet index.
    pub(crate) fn collect_populated(&self, out: &mut Vec<String>) {
        if !self.data.is_empty() {
            out.push(self.path.clone());
        }
        for child in self.children() {
            child.collect_populated(out);
        }
    }

    /// Like [`collect_populated`](Self::collect_populated), carrying the data.
    pub(crate) fn collect_entries(&self, out: &mut BTreeMap<String, BTreeMap<String, String>>) {
        if !self.data.is_empty() {
            let data = self
                .data
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            out.insert(self.path.clone(), data);
        }
        for child in self.children() {
            child.collect_entries(out);
        }
    }

    /// Visits every `(path, key, value)` triple below and including this node.
    pub(crate) fn for_each_entry<F: FnMut(&str, &str, &str)>(&self, f: &mut F) {
        for (key, value) in &self.data {
            f(&self.path, key, value);
        }
        for child in self.children() {
            child.for_each_entry(f);
        }
    }

    /// Removes descendants that hold no data and have no children, bottom-up,
    /// so chains of empty nodes disappear in one pass. Returns how many
    /// nodes were removed. The node itself is never removed.
    pub(crate) fn prune(&mut self) -> usize {
        let mut removed = 0;
        for slot in self.children.iter_mut() {
            let Some(child) = slot.as_mut() else {
                continue;
            };
            removed += child.prune();
            let empty = child.data.is_empty() && child.is_leaf();
            if empty {
                *slot = None;
                removed += 1;
            }
        }
        removed
    }

    pub(crate) fn counts(&self) -> NodeCounts {
        let mut counts = NodeCounts {
            nodes: 1,
            populated: usize::from(!self.data.is_empty()),
            entries: self.data.len(),
        };
        for child in self.children() {
            let c = child.counts();
            counts.nodes += c.nodes;
            counts.populated += c.populated;
            counts.entries += c.entries;
        }
        counts
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children: String = self
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_some())
            .map(|(i, _)| alphabet::char_at(i as u8) as char)
            .collect();
        f.debug_struct("Node")
            .field("path", &self.path)
            .field("children", &children)
            .field("data", &self.data)
            .finish()
    }
}
