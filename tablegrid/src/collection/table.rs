use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CollectionError;
use crate::node::{ColumnProps, GridNode, NodeKind, NodeSpec, SpecKind};
use crate::types::Key;

use super::{Collection, GridCollection, NodeArena, NodeId, build_header_rows};

/// Keys of the synthetic selection and drag columns, shared by every table
/// in the process so they stay stable when a collection is rebuilt.
static MARKER_KEYS: LazyLock<MarkerKeys> = LazyLock::new(MarkerKeys::generate);

struct MarkerKeys {
    selection: Key,
    drag: Key,
}

impl MarkerKeys {
    fn generate() -> Self {
        let selection = marker_key();
        let mut drag = marker_key();
        while drag == selection {
            drag = marker_key();
        }
        Self { selection, drag }
    }
}

fn marker_key() -> Key {
    Key::from(format!("row-header-column-{}", Uuid::new_v4().simple()))
}

/// Options that add synthetic columns to a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    /// Prepend a column of selection checkboxes.
    pub show_selection_checkboxes: bool,
    /// Prepend a column of drag handles, before the selection column.
    pub show_drag_buttons: bool,
}

/// An immutable table: leaf columns, synthesized header rows and a body of
/// rows.
///
/// Header rows come first in the row chain, so moving up from the first
/// data row lands on the deepest header row.
#[derive(Debug, Clone)]
pub struct TableCollection {
    grid: GridCollection,
    columns: Vec<NodeId>,
    header_rows: Vec<NodeId>,
    body: NodeId,
    items: Vec<NodeId>,
    row_header_column_keys: Vec<Key>,
    source: Vec<NodeSpec>,
    options: TableOptions,
}

impl TableCollection {
    /// Build a table from top-level column specs and at most one body.
    pub fn new(
        nodes: impl IntoIterator<Item = NodeSpec>,
        options: TableOptions,
    ) -> Result<Self, CollectionError> {
        let source: Vec<NodeSpec> = nodes.into_iter().collect();
        let mut builder = TableBuilder::new(options)?;
        for spec in &source {
            builder.visit(spec)?;
        }
        builder.finish(source, options)
    }

    /// Key of the synthetic selection checkbox column.
    pub fn selection_column_key() -> &'static Key {
        &MARKER_KEYS.selection
    }

    /// Key of the synthetic drag handle column.
    pub fn drag_column_key() -> &'static Key {
        &MARKER_KEYS.drag
    }

    /// A new table with the same columns and options, keeping only the rows
    /// whose text value satisfies `predicate`.
    pub fn filter(&self, mut predicate: impl FnMut(&str) -> bool) -> Result<Self, CollectionError> {
        let kept: HashSet<Key> = self
            .rows()
            .filter(|row| predicate(&self.text_value(&row.key)))
            .map(|row| row.key.clone())
            .collect();

        let nodes = self.source.iter().cloned().map(|mut spec| {
            if spec.kind == SpecKind::Body {
                spec.children.retain(|row| kept.contains(&row.key));
            }
            spec
        });

        log::debug!("[table] filter kept {} of {} rows", kept.len(), self.size());
        Self::new(nodes, self.options)
    }

    pub fn options(&self) -> TableOptions {
        self.options
    }

    /// Number of leaf columns, synthetic columns included.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Leaf columns in display order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &GridNode> + '_ {
        self.columns.iter().map(|&id| self.grid.node(id))
    }

    pub fn column(&self, index: usize) -> Option<&GridNode> {
        self.columns.get(index).map(|&id| self.grid.node(id))
    }

    pub fn column_keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.columns().map(|column| &column.key)
    }

    /// Header rows from the top level down.
    pub fn header_rows(&self) -> impl ExactSizeIterator<Item = &GridNode> + '_ {
        self.header_rows.iter().map(|&id| self.grid.node(id))
    }

    pub fn header_row(&self, level: usize) -> Option<&GridNode> {
        self.header_rows.get(level).map(|&id| self.grid.node(id))
    }

    pub fn body(&self) -> &GridNode {
        self.grid.node(self.body)
    }

    /// Data rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &GridNode> + '_ {
        self.items.iter().map(|&id| self.grid.node(id))
    }

    /// Columns whose cells label their row, in column order.
    pub fn row_header_column_keys(&self) -> &[Key] {
        &self.row_header_column_keys
    }

    /// Cell of `row` covering the leaf column at `column_index`.
    pub fn cell_in_column(&self, row: &str, column_index: usize) -> Option<&GridNode> {
        self.children(row).into_iter().find(|cell| {
            let start = cell.col_index().unwrap_or(cell.index);
            (start..start.saturating_add(cell.col_span())).contains(&column_index)
        })
    }

    /// Leaf column a cell starts in.
    pub(crate) fn column_of(&self, cell: &GridNode) -> Option<&GridNode> {
        self.column(cell.col_index().unwrap_or(cell.index))
    }
}

impl Collection for TableCollection {
    fn size(&self) -> usize {
        self.items.len()
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_> {
        self.grid.keys()
    }

    fn get_item(&self, key: &str) -> Option<&GridNode> {
        self.grid.get_item(key)
    }

    fn first_key(&self) -> Option<&Key> {
        self.items.first().map(|&id| &self.grid.node(id).key)
    }

    fn last_key(&self) -> Option<&Key> {
        self.items.last().map(|&id| &self.grid.node(id).key)
    }

    /// A node's own text, or for rows without one, the text of their row
    /// header cells joined by spaces.
    fn text_value(&self, key: &str) -> String {
        let Some(row) = self.get_item(key) else {
            return String::new();
        };
        if !row.text_value.is_empty() {
            return row.text_value.clone();
        }

        let mut text = Vec::new();
        for cell in self.children(key) {
            let Some(column) = self.column_of(cell) else {
                continue;
            };
            if self.row_header_column_keys.contains(&column.key) && !cell.text_value.is_empty() {
                text.push(cell.text_value.as_str());
            }
            if text.len() == self.row_header_column_keys.len() {
                break;
            }
        }
        text.join(" ")
    }
}

/// Collects nodes from a table description into an arena.
struct TableBuilder {
    arena: NodeArena,
    columns: Vec<NodeId>,
    markers: Vec<Key>,
    row_header_column_keys: Vec<Key>,
    body: Option<NodeId>,
    items: Vec<NodeId>,
    top_level_columns: usize,
}

impl TableBuilder {
    fn new(options: TableOptions) -> Result<Self, CollectionError> {
        let mut builder = Self {
            arena: NodeArena::default(),
            columns: Vec::new(),
            markers: Vec::new(),
            row_header_column_keys: Vec::new(),
            body: None,
            items: Vec::new(),
            top_level_columns: 0,
        };

        if options.show_drag_buttons {
            builder.add_marker(TableCollection::drag_column_key(), ColumnProps {
                is_drag_button_cell: true,
                ..ColumnProps::default()
            })?;
        }
        if options.show_selection_checkboxes {
            builder.add_marker(TableCollection::selection_column_key(), ColumnProps {
                is_selection_cell: true,
                ..ColumnProps::default()
            })?;
        }
        Ok(builder)
    }

    fn add_marker(&mut self, key: &Key, props: ColumnProps) -> Result<(), CollectionError> {
        let mut column = GridNode::new(key.clone(), NodeKind::Column {
            props,
            col_span: 1,
            col_index: None,
        });
        column.index = self.columns.len();
        let id = self.arena.insert(column)?;
        self.columns.push(id);
        self.markers.push(key.clone());
        Ok(())
    }

    fn visit(&mut self, spec: &NodeSpec) -> Result<(), CollectionError> {
        match &spec.kind {
            SpecKind::Column(_) => {
                self.top_level_columns += 1;
                self.visit_column(spec, None, self.top_level_columns - 1)
            }
            SpecKind::Body => self.visit_body(spec),
            SpecKind::Item => Err(misplaced(spec, "outside the body")),
            SpecKind::Cell { .. } => Err(misplaced(spec, "outside a row")),
        }
    }

    fn visit_column(
        &mut self,
        spec: &NodeSpec,
        parent: Option<&Key>,
        index: usize,
    ) -> Result<(), CollectionError> {
        let SpecKind::Column(props) = &spec.kind else {
            return Err(misplaced(spec, "inside a column"));
        };

        let mut column = node_from(spec, NodeKind::Column {
            props: props.clone(),
            col_span: 1,
            col_index: None,
        });
        column.index = index;
        column.parent_key = parent.cloned();
        let id = self.arena.insert(column)?;

        if spec.children.is_empty() {
            self.columns.push(id);
            if props.is_row_header {
                self.row_header_column_keys.push(spec.key.clone());
            }
            return Ok(());
        }
        for (index, child) in spec.children.iter().enumerate() {
            self.visit_column(child, Some(&spec.key), index)?;
        }
        Ok(())
    }

    fn visit_body(&mut self, spec: &NodeSpec) -> Result<(), CollectionError> {
        if let Some(first) = self.body {
            return Err(CollectionError::MultipleBodies {
                first: self.arena.key(first),
                second: spec.key.clone(),
            });
        }

        let body = node_from(spec, NodeKind::Body);
        let id = self.arena.insert(body)?;
        self.body = Some(id);

        for (index, row) in spec.children.iter().enumerate() {
            if row.kind != SpecKind::Item {
                return Err(misplaced(row, "inside the body"));
            }
            self.visit_item(row, &spec.key, index)?;
        }
        Ok(())
    }

    fn visit_item(&mut self, spec: &NodeSpec, body: &Key, index: usize) -> Result<(), CollectionError> {
        let mut row = node_from(spec, NodeKind::Item);
        row.index = index;
        row.parent_key = Some(body.clone());

        let mut cells = Vec::with_capacity(self.markers.len() + spec.children.len());
        for marker in &self.markers {
            let mut cell = GridNode::new(format!("{}-{}", spec.key, marker), NodeKind::Cell {
                col_span: None,
                col_index: None,
            });
            cell.index = cells.len();
            cell.parent_key = Some(spec.key.clone());
            cells.push(cell);
        }
        for child in &spec.children {
            let SpecKind::Cell { col_span } = child.kind else {
                return Err(misplaced(child, "inside a row"));
            };
            let mut cell = node_from(child, NodeKind::Cell {
                col_span,
                col_index: None,
            });
            cell.index = cells.len();
            cell.parent_key = Some(spec.key.clone());
            cells.push(cell);
        }

        row.child_keys = cells.iter().map(|cell| cell.key.clone()).collect();
        let id = self.arena.insert(row)?;
        for cell in cells {
            self.arena.insert(cell)?;
        }
        self.items.push(id);
        Ok(())
    }

    fn finish(
        mut self,
        source: Vec<NodeSpec>,
        options: TableOptions,
    ) -> Result<TableCollection, CollectionError> {
        let column_count = self.columns.len();
        for &item in &self.items {
            let row = self.arena.node(item);
            let cells: usize = row
                .child_keys
                .iter()
                .filter_map(|key| self.arena.get(key))
                .map(GridNode::col_span)
                .fold(0, usize::saturating_add);
            if cells != column_count {
                return Err(CollectionError::CellCountMismatch {
                    row: row.key.clone(),
                    cells,
                    columns: column_count,
                });
            }
        }

        let body = match self.body {
            Some(body) => body,
            None => self.arena.insert_unique("__body".to_string(), GridNode::new(
                String::new(),
                NodeKind::Body,
            )),
        };
        let body_key = self.arena.key(body);
        let item_keys: Vec<Key> = self.items.iter().map(|&id| self.arena.key(id)).collect();
        self.arena.node_mut(body).child_keys = item_keys;

        let header_rows = build_header_rows(&mut self.arena, &self.columns);

        if self.row_header_column_keys.is_empty() {
            let fallback = self.columns.iter().map(|&id| self.arena.node(id)).find(|column| {
                column
                    .column_props()
                    .is_some_and(|props| !props.is_marker())
            });
            if let Some(column) = fallback {
                self.row_header_column_keys.push(column.key.clone());
            }
        }

        let rows: Vec<NodeId> = header_rows.iter().chain(&self.items).copied().collect();
        let grid = GridCollection::from_arena(self.arena, rows, column_count);

        log::debug!(
            "[table] built '{}' with {} columns, {} header rows, {} rows",
            body_key,
            column_count,
            header_rows.len(),
            self.items.len()
        );

        Ok(TableCollection {
            grid,
            columns: self.columns,
            header_rows,
            body,
            items: self.items,
            row_header_column_keys: self.row_header_column_keys,
            source,
            options,
        })
    }
}

fn node_from(spec: &NodeSpec, kind: NodeKind) -> GridNode {
    let mut node = GridNode::new(spec.key.clone(), kind);
    node.text_value = spec.text_value.clone();
    node.rendered = spec
        .rendered
        .clone()
        .or_else(|| Some(spec.text_value.clone()));
    node.child_keys = spec.children.iter().map(|child| child.key.clone()).collect();
    node
}

fn misplaced(spec: &NodeSpec, placement: &'static str) -> CollectionError {
    CollectionError::misplaced(spec.key.clone(), spec.node_type().as_str(), placement)
}
