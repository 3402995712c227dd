//! In-memory group/dataset tree.

use super::{HierarchicalStore, NodeKind, StoreError, StoreResult};
use crate::array::ArrayValues;
use crate::error::{Error, Result};
use crate::path::NodePath;

#[derive(Debug, Clone)]
enum MemoryNode {
    /// Children in insertion order.
    Group(Vec<(String, MemoryNode)>),
    Dataset(ArrayValues),
}

impl MemoryNode {
    fn child(&self, name: &str) -> Option<&MemoryNode> {
        match self {
            Self::Group(children) => children.iter().find(|(n, _)| n == name).map(|(_, c)| c),
            Self::Dataset(_) => None,
        }
    }
}

/// A store held entirely in memory.
///
/// Useful for tests, demos and for trees loaded from JSON documents.
/// Children are reported in insertion order.
///
/// # Example
///
/// ```
/// use h5tui::array::ArrayValues;
/// use h5tui::store::{HierarchicalStore, MemoryStore, NodeKind};
/// use h5tui::NodePath;
///
/// let mut store = MemoryStore::new();
/// store
///     .add_dataset("/a/x", ArrayValues::from_i64(vec![3], vec![1, 2, 3]).unwrap())
///     .unwrap();
/// let a = NodePath::parse("/a").unwrap();
/// assert_eq!(store.kind(&a).unwrap(), NodeKind::Group);
/// assert_eq!(store.children(&a).unwrap(), vec!["x".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    root: MemoryNode,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a store containing only an empty root group.
    pub fn new() -> Self {
        Self {
            root: MemoryNode::Group(Vec::new()),
        }
    }

    /// Adds a group, creating missing intermediate groups.
    ///
    /// Adding a group that already exists is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or a dataset sits on it.
    pub fn add_group(&mut self, path: &str) -> Result<()> {
        let path = NodePath::parse(path)?;
        self.group_mut(&path).map(|_| ())
    }

    /// Adds a dataset, creating missing parent groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or the root, or if a node
    /// with the same name already exists in the parent group.
    pub fn add_dataset(&mut self, path: &str, values: ArrayValues) -> Result<()> {
        let path = NodePath::parse(path)?;
        let parent = path
            .parent()
            .ok_or_else(|| Error::invalid_path(path.as_str(), "the root cannot be a dataset"))?;
        let name = path.basename().to_string();
        let children = self.group_mut(&parent)?;
        if children.iter().any(|(n, _)| *n == name) {
            return Err(Error::invalid_path(path.as_str(), "node already exists"));
        }
        children.push((name, MemoryNode::Dataset(values)));
        Ok(())
    }

    /// Removes a node and everything below it.
    ///
    /// Returns `true` if something was removed.
    pub fn remove(&mut self, path: &NodePath) -> bool {
        let (Some(parent), name) = (path.parent(), path.basename()) else {
            return false;
        };
        let mut current = &mut self.root;
        for segment in parent.segments() {
            let MemoryNode::Group(children) = current else {
                return false;
            };
            match children.iter_mut().find(|(n, _)| n == segment) {
                Some((_, child)) => current = child,
                None => return false,
            }
        }
        match current {
            MemoryNode::Group(children) => {
                let before = children.len();
                children.retain(|(n, _)| n != name);
                children.len() != before
            }
            MemoryNode::Dataset(_) => false,
        }
    }

    /// Number of nodes below the root.
    pub fn node_count(&self) -> usize {
        fn count(node: &MemoryNode) -> usize {
            match node {
                MemoryNode::Group(children) => {
                    children.iter().map(|(_, c)| 1 + count(c)).sum()
                }
                MemoryNode::Dataset(_) => 0,
            }
        }
        count(&self.root)
    }

    fn lookup(&self, path: &NodePath) -> StoreResult<&MemoryNode> {
        path.segments()
            .try_fold(&self.root, |node, segment| node.child(segment))
            .ok_or_else(|| StoreError::not_found(path))
    }

    fn group_mut(&mut self, path: &NodePath) -> Result<&mut Vec<(String, MemoryNode)>> {
        let mut current = &mut self.root;
        for segment in path.segments() {
            let MemoryNode::Group(children) = current else {
                return Err(Error::invalid_path(path.as_str(), "a dataset is in the way"));
            };
            let idx = match children.iter().position(|(n, _)| n == segment) {
                Some(idx) => idx,
                None => {
                    children.push((segment.to_string(), MemoryNode::Group(Vec::new())));
                    children.len() - 1
                }
            };
            current = &mut children[idx].1;
        }
        match current {
            MemoryNode::Group(children) => Ok(children),
            MemoryNode::Dataset(_) => {
                Err(Error::invalid_path(path.as_str(), "a dataset is in the way"))
            }
        }
    }
}

impl HierarchicalStore for MemoryStore {
    fn children(&self, path: &NodePath) -> StoreResult<Vec<String>> {
        match self.lookup(path)? {
            MemoryNode::Group(children) => Ok(children.iter().map(|(n, _)| n.clone()).collect()),
            MemoryNode::Dataset(_) => Err(StoreError::not_a_group(path)),
        }
    }

    fn kind(&self, path: &NodePath) -> StoreResult<NodeKind> {
        Ok(match self.lookup(path)? {
            MemoryNode::Group(_) => NodeKind::Group,
            MemoryNode::Dataset(_) => NodeKind::Dataset,
        })
    }

    fn read(&self, path: &NodePath) -> StoreResult<ArrayValues> {
        match self.lookup(path)? {
            MemoryNode::Dataset(values) => Ok(values.clone()),
            MemoryNode::Group(_) => Err(StoreError::not_a_dataset(path)),
        }
    }
}
