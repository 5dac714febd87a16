use crate::collection::{Collection, TableCollection};
use crate::node::{GridNode, NodeType};
use crate::types::Key;

use super::{DelegateOptions, GridKeyboardDelegate, KeyboardDelegate};

fn is_table_cell(node: &GridNode) -> bool {
    matches!(node.node_type(), NodeType::Cell | NodeType::Column)
}

fn is_column(node: &GridNode) -> bool {
    node.is(NodeType::Column)
}

/// Keyboard navigation over a [`TableCollection`], including its column
/// headers.
///
/// Column headers are cells of the header rows: moving down from a group
/// column enters its first child, moving down from a leaf column enters the
/// first data row. Horizontal moves between columns wrap within their header
/// row.
#[derive(Debug, Clone)]
pub struct TableKeyboardDelegate<'a> {
    grid: GridKeyboardDelegate<'a, TableCollection>,
    collection: &'a TableCollection,
}

impl<'a> TableKeyboardDelegate<'a> {
    pub fn new(collection: &'a TableCollection, options: DelegateOptions) -> Self {
        Self {
            grid: GridKeyboardDelegate::new(collection, options).with_cell_predicate(is_table_cell),
            collection,
        }
    }

    pub fn options(&self) -> &DelegateOptions {
        self.grid.options()
    }

    fn find_next_column_key(&self, column: &GridNode) -> Option<Key> {
        if let Some(key) = self.grid.find_next_key(Some(&column.key), is_column) {
            return Some(key);
        }
        let row = self.collection.header_row(column.level)?;
        self.collection
            .children(&row.key)
            .into_iter()
            .find(|node| is_column(node))
            .map(|node| node.key.clone())
    }

    fn find_previous_column_key(&self, column: &GridNode) -> Option<Key> {
        if let Some(key) = self.grid.find_previous_key(Some(&column.key), is_column) {
            return Some(key);
        }
        let row = self.collection.header_row(column.level)?;
        self.collection
            .children(&row.key)
            .into_iter()
            .rev()
            .find(|node| is_column(node))
            .map(|node| node.key.clone())
    }
}

impl KeyboardDelegate for TableKeyboardDelegate<'_> {
    fn key_below(&self, key: &str) -> Option<Key> {
        let start = self.collection.get_item(key)?;
        if !start.is(NodeType::Column) {
            return self.grid.key_below(key);
        }

        if let Some(child) = start.first_child_key() {
            return Some(child.clone());
        }
        let first_row = self.grid.first_key(None, false)?;
        let first_row = match self.collection.get_item(&first_row)? {
            cell if cell.is(NodeType::Cell) => cell.parent_key.clone()?,
            _ => first_row,
        };
        self.collection
            .cell_in_column(&first_row, start.index)
            .map(|cell| cell.key.clone())
    }

    fn key_above(&self, key: &str) -> Option<Key> {
        let start = self.collection.get_item(key)?;
        if start.is(NodeType::Column) {
            let parent = self.collection.get_item(start.parent_key.as_deref()?)?;
            return is_column(parent).then(|| parent.key.clone());
        }

        if let Some(above) = self.grid.key_above(key)
            && self
                .collection
                .get_item(&above)
                .is_some_and(|node| !node.is(NodeType::HeaderRow))
        {
            return Some(above);
        }

        // Leaving the body: a cell goes to its column header, anything else
        // to the first column, marker columns included.
        let column = if self.grid.is_cell(start) {
            self.collection.column_of(start)
        } else {
            self.collection.column(0)
        };
        column.map(|column| column.key.clone())
    }

    fn key_right_of(&self, key: &str) -> Option<Key> {
        let item = self.collection.get_item(key)?;
        if !item.is(NodeType::Column) {
            return self.grid.key_right_of(key);
        }
        if self.options().direction.is_rtl() {
            self.find_previous_column_key(item)
        } else {
            self.find_next_column_key(item)
        }
    }

    fn key_left_of(&self, key: &str) -> Option<Key> {
        let item = self.collection.get_item(key)?;
        if !item.is(NodeType::Column) {
            return self.grid.key_left_of(key);
        }
        if self.options().direction.is_rtl() {
            self.find_next_column_key(item)
        } else {
            self.find_previous_column_key(item)
        }
    }

    fn first_key(&self, from: Option<&str>, global: bool) -> Option<Key> {
        self.grid.first_key(from, global)
    }

    fn last_key(&self, from: Option<&str>, global: bool) -> Option<Key> {
        self.grid.last_key(from, global)
    }

    /// Matches a row's own text first, then the text of its row header
    /// cells. Starting from a cell returns the matching cell, otherwise the
    /// row.
    fn key_for_search(&self, search: &str, from: Option<&str>) -> Option<Key> {
        let matches = self.grid.prefix_matcher(search)?;
        let from_cell = from
            .and_then(|key| self.collection.get_item(key))
            .is_some_and(|node| node.is(NodeType::Cell));
        let row_headers = self.collection.row_header_column_keys();

        let found = self.grid.search_rows(from, |row| {
            if matches(&row.text_value) {
                return Some(row.key.clone());
            }
            self.collection
                .children(&row.key)
                .into_iter()
                .find(|cell| {
                    self.collection
                        .column_of(cell)
                        .is_some_and(|column| row_headers.contains(&column.key))
                        && matches(&cell.text_value)
                })
                .map(|cell| {
                    if from_cell {
                        cell.key.clone()
                    } else {
                        row.key.clone()
                    }
                })
        });
        log::trace!("[nav] table search '{search}' from {from:?} -> {found:?}");
        found
    }

    fn page_size(&self) -> usize {
        self.grid.options().page_size
    }
}
