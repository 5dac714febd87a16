//! Node types shared by the collection, layout and navigation modules.

mod spec;

pub use spec::{NodeSpec, SpecKind};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ColumnSizing, Key};

/// Discriminant of a [`GridNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Column,
    Item,
    Cell,
    Body,
    HeaderRow,
    Placeholder,
}

impl NodeType {
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeType::Column => "column",
            NodeType::Item => "item",
            NodeType::Cell => "cell",
            NodeType::Body => "body",
            NodeType::HeaderRow => "headerrow",
            NodeType::Placeholder => "placeholder",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column configuration carried by column nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnProps {
    /// Cells in this column name their row (typeahead, row labels).
    pub is_row_header: bool,
    pub allows_sorting: bool,
    /// Synthetic column holding selection checkboxes.
    pub is_selection_cell: bool,
    /// Synthetic column holding drag handles.
    pub is_drag_button_cell: bool,
    #[serde(flatten)]
    pub sizing: ColumnSizing,
}

impl ColumnProps {
    /// Selection and drag columns are markers, not data columns.
    pub const fn is_marker(&self) -> bool {
        self.is_selection_cell || self.is_drag_button_cell
    }
}

/// Variant-specific data of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A column header. Leaf columns span one column; group columns span
    /// the leaves beneath them. `col_index` is the first leaf covered.
    Column {
        props: ColumnProps,
        col_span: usize,
        col_index: Option<usize>,
    },
    /// A data row.
    Item,
    /// A data cell. Spans and indices are only set when a cell in the row
    /// declares a span.
    Cell {
        col_span: Option<usize>,
        col_index: Option<usize>,
    },
    /// Container of the data rows.
    Body,
    /// One level of the synthesized column header grid.
    HeaderRow,
    /// Filler in a header row where no column exists at that level.
    Placeholder { col_span: usize, col_index: usize },
}

/// A node of an immutable collection.
///
/// Nodes are linked by key: `parent_key` goes up the tree, `prev_key` and
/// `next_key` form the sibling chain, and `child_keys` lists children in
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridNode {
    pub key: Key,
    pub kind: NodeKind,
    /// Depth used for header stacking. Leaf columns sit at the deepest level.
    pub level: usize,
    /// Position among siblings. For leaf columns, the index across all leaves.
    pub index: usize,
    pub parent_key: Option<Key>,
    pub prev_key: Option<Key>,
    pub next_key: Option<Key>,
    pub child_keys: Vec<Key>,
    /// Plain-text projection used for search and row labels.
    pub text_value: String,
    pub rendered: Option<String>,
}

impl GridNode {
    pub(crate) fn new(key: impl Into<Key>, kind: NodeKind) -> Self {
        Self {
            key: key.into(),
            kind,
            level: 0,
            index: 0,
            parent_key: None,
            prev_key: None,
            next_key: None,
            child_keys: Vec::new(),
            text_value: String::new(),
            rendered: None,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Column { .. } => NodeType::Column,
            NodeKind::Item => NodeType::Item,
            NodeKind::Cell { .. } => NodeType::Cell,
            NodeKind::Body => NodeType::Body,
            NodeKind::HeaderRow => NodeType::HeaderRow,
            NodeKind::Placeholder { .. } => NodeType::Placeholder,
        }
    }

    pub fn is(&self, node_type: NodeType) -> bool {
        self.node_type() == node_type
    }

    pub fn has_child_nodes(&self) -> bool {
        !self.child_keys.is_empty()
    }

    pub fn first_child_key(&self) -> Option<&Key> {
        self.child_keys.first()
    }

    pub fn last_child_key(&self) -> Option<&Key> {
        self.child_keys.last()
    }

    /// Number of leaf columns this node covers.
    pub fn col_span(&self) -> usize {
        match &self.kind {
            NodeKind::Column { col_span, .. } | NodeKind::Placeholder { col_span, .. } => {
                *col_span
            }
            NodeKind::Cell { col_span, .. } => col_span.unwrap_or(1),
            _ => 1,
        }
    }

    /// Leaf column offset at which this node starts, when known.
    pub fn col_index(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::Column { col_index, .. } | NodeKind::Cell { col_index, .. } => *col_index,
            NodeKind::Placeholder { col_index, .. } => Some(*col_index),
            _ => None,
        }
    }

    pub fn column_props(&self) -> Option<&ColumnProps> {
        match &self.kind {
            NodeKind::Column { props, .. } => Some(props),
            _ => None,
        }
    }

    pub(crate) fn set_col_span(&mut self, span: usize) {
        match &mut self.kind {
            NodeKind::Column { col_span, .. } | NodeKind::Placeholder { col_span, .. } => {
                *col_span = span;
            }
            NodeKind::Cell { col_span, .. } => *col_span = Some(span),
            _ => {}
        }
    }

    pub(crate) fn set_col_index(&mut self, index: usize) {
        match &mut self.kind {
            NodeKind::Column { col_index, .. } | NodeKind::Cell { col_index, .. } => {
                *col_index = Some(index);
            }
            NodeKind::Placeholder { col_index, .. } => *col_index = index,
            _ => {}
        }
    }
}
