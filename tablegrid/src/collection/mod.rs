//! Immutable collections of grid nodes.
//!
//! [`GridCollection`] links rows and cells into a navigable structure.
//! [`TableCollection`] builds on it with leaf columns, synthesized header
//! rows and a body.

mod arena;
mod grid;
mod headers;
mod table;

pub use grid::GridCollection;
pub use table::{TableCollection, TableOptions};

pub(crate) use arena::{NodeArena, NodeId};
pub(crate) use headers::build_header_rows;

use crate::node::GridNode;
use crate::types::Key;

/// Read-only, key-addressed view of a collection.
///
/// Every lookup returns `None` for keys that are not part of the collection.
pub trait Collection {
    /// Number of rows yielded when iterating the collection.
    fn size(&self) -> usize;

    /// All keys, in build order.
    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_>;

    fn get_item(&self, key: &str) -> Option<&GridNode>;

    fn key_before(&self, key: &str) -> Option<&Key> {
        self.get_item(key)?.prev_key.as_ref()
    }

    fn key_after(&self, key: &str) -> Option<&Key> {
        self.get_item(key)?.next_key.as_ref()
    }

    fn first_key(&self) -> Option<&Key>;

    fn last_key(&self) -> Option<&Key>;

    /// Direct children of a node, in order.
    fn children(&self, key: &str) -> Vec<&GridNode> {
        self.get_item(key)
            .map(|node| {
                node.child_keys
                    .iter()
                    .filter_map(|child| self.get_item(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Searchable text of a node.
    fn text_value(&self, key: &str) -> String {
        self.get_item(key)
            .map(|node| node.text_value.clone())
            .unwrap_or_default()
    }

    /// Node at a position of the key list. Linear in `index`.
    fn at(&self, index: usize) -> Option<&GridNode> {
        let key = self.keys().nth(index)?;
        self.get_item(key)
    }
}
