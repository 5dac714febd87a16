use std::collections::HashMap;

use crate::error::CollectionError;
use crate::node::GridNode;
use crate::types::Key;

pub(crate) type NodeId = usize;

/// Flat node storage. Nodes are addressed by index while a collection is
/// being built, and by key afterwards.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<GridNode>,
    ids: HashMap<Key, NodeId>,
}

impl NodeArena {
    pub fn insert(&mut self, node: GridNode) -> Result<NodeId, CollectionError> {
        if self.ids.contains_key(node.key.as_str()) {
            return Err(CollectionError::duplicate_key(node.key));
        }
        Ok(self.push(node))
    }

    /// Insert a synthesized node, suffixing `base` until the key is unused.
    pub fn insert_unique(&mut self, base: String, mut node: GridNode) -> NodeId {
        let mut key = base.clone();
        let mut suffix = 1;
        while self.ids.contains_key(key.as_str()) {
            key = format!("{base}-{suffix}");
            suffix += 1;
        }
        node.key = Key::from(key);
        self.push(node)
    }

    fn push(&mut self, node: GridNode) -> NodeId {
        let id = self.nodes.len();
        self.ids.insert(node.key.clone(), id);
        self.nodes.push(node);
        id
    }

    pub fn id_of(&self, key: &str) -> Option<NodeId> {
        self.ids.get(key).copied()
    }

    pub fn get(&self, key: &str) -> Option<&GridNode> {
        self.id_of(key).map(|id| &self.nodes[id])
    }

    pub fn node(&self, id: NodeId) -> &GridNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut GridNode {
        &mut self.nodes[id]
    }

    pub fn key(&self, id: NodeId) -> Key {
        self.nodes[id].key.clone()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
