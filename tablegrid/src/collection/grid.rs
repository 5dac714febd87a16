use crate::error::CollectionError;
use crate::node::{GridNode, NodeKind, NodeSpec, NodeType, SpecKind};
use crate::types::Key;

use super::{Collection, NodeArena, NodeId};

/// A collection of rows and cells.
///
/// Rows form one sibling chain, the cells of each row another. When any
/// cell of a row declares a span, every cell of that row gets a
/// `col_index` computed from the spans before it.
#[derive(Debug, Clone)]
pub struct GridCollection {
    arena: NodeArena,
    /// Keys in the order nodes were visited while linking.
    order: Vec<NodeId>,
    rows: Vec<NodeId>,
    column_count: usize,
}

impl GridCollection {
    /// Build a grid from row descriptions. Each row must be an item whose
    /// children are cells.
    pub fn new(
        rows: impl IntoIterator<Item = NodeSpec>,
        column_count: usize,
    ) -> Result<Self, CollectionError> {
        let mut arena = NodeArena::default();
        let mut row_ids = Vec::new();

        for (index, spec) in rows.into_iter().enumerate() {
            if spec.kind != SpecKind::Item {
                return Err(CollectionError::misplaced(
                    spec.key,
                    spec.kind.node_type().as_str(),
                    "as a grid row",
                ));
            }
            let mut row = GridNode::new(spec.key.clone(), NodeKind::Item);
            row.index = index;
            row.text_value = spec.text_value.clone();
            row.rendered = spec.rendered.clone().or_else(|| Some(spec.text_value.clone()));
            row.child_keys = spec.children.iter().map(|c| c.key.clone()).collect();
            let row_id = arena.insert(row)?;

            for (cell_index, cell) in spec.children.into_iter().enumerate() {
                let SpecKind::Cell { col_span } = cell.kind else {
                    return Err(CollectionError::misplaced(
                        cell.key,
                        cell.kind.node_type().as_str(),
                        "inside a row",
                    ));
                };
                let mut node = GridNode::new(cell.key, NodeKind::Cell {
                    col_span,
                    col_index: None,
                });
                node.index = cell_index;
                node.rendered = cell.rendered.or_else(|| Some(cell.text_value.clone()));
                node.text_value = cell.text_value;
                arena.insert(node)?;
            }
            row_ids.push(row_id);
        }

        Ok(Self::from_arena(arena, row_ids, column_count))
    }

    /// Link `rows` and everything beneath them. Rows are chained in the
    /// order given.
    pub(crate) fn from_arena(arena: NodeArena, rows: Vec<NodeId>, column_count: usize) -> Self {
        let mut grid = Self {
            arena,
            order: Vec::new(),
            rows,
            column_count,
        };

        let rows = grid.rows.clone();
        let mut last: Option<NodeId> = None;
        for &row in &rows {
            grid.link_after(last, row);
            grid.visit(row);
            last = Some(row);
        }
        if let Some(last) = last {
            grid.arena.node_mut(last).next_key = None;
        }

        log::debug!(
            "[grid] linked {} rows, {} nodes, {} columns",
            grid.rows.len(),
            grid.arena.len(),
            grid.column_count
        );
        grid
    }

    fn link_after(&mut self, prev: Option<NodeId>, id: NodeId) {
        match prev {
            Some(prev) => {
                let key = self.arena.key(id);
                self.arena.node_mut(prev).next_key = Some(key);
                let prev_key = self.arena.key(prev);
                self.arena.node_mut(id).prev_key = Some(prev_key);
            }
            None => self.arena.node_mut(id).prev_key = None,
        }
    }

    fn visit(&mut self, id: NodeId) {
        self.order.push(id);

        let node = self.arena.node(id);
        // Columns are linked by the header row that holds them, not by
        // their parent column.
        if node.is(NodeType::Column) {
            return;
        }

        let parent_key = node.key.clone();
        let children: Vec<NodeId> = node
            .child_keys
            .iter()
            .filter_map(|key| self.arena.id_of(key))
            .collect();
        let row_has_spans = node.is(NodeType::Item)
            && children.iter().any(|&child| {
                matches!(
                    self.arena.node(child).kind,
                    NodeKind::Cell {
                        col_span: Some(_),
                        ..
                    }
                )
            });

        let mut last: Option<NodeId> = None;
        for child in children {
            if self.arena.node(child).is(NodeType::Cell) {
                if row_has_spans {
                    let col_index = match last {
                        Some(prev) => {
                            let prev = self.arena.node(prev);
                            prev.col_index().unwrap_or(prev.index).saturating_add(prev.col_span())
                        }
                        None => self.arena.node(child).index,
                    };
                    self.arena.node_mut(child).set_col_index(col_index);
                }
                let cell = self.arena.node_mut(child);
                if cell.parent_key.is_none() {
                    cell.parent_key = Some(parent_key.clone());
                }
            }
            self.link_after(last, child);
            self.visit(child);
            last = Some(child);
        }
        if let Some(last) = last {
            self.arena.node_mut(last).next_key = None;
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Rows in chain order.
    pub fn rows(&self) -> impl Iterator<Item = &GridNode> {
        self.rows.iter().map(|&id| self.arena.node(id))
    }

    pub(crate) fn node(&self, id: NodeId) -> &GridNode {
        self.arena.node(id)
    }
}

impl Collection for GridCollection {
    fn size(&self) -> usize {
        self.rows.len()
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_> {
        Box::new(self.order.iter().map(|&id| &self.arena.node(id).key))
    }

    fn get_item(&self, key: &str) -> Option<&GridNode> {
        self.arena.get(key)
    }

    fn first_key(&self) -> Option<&Key> {
        self.rows.first().map(|&id| &self.arena.node(id).key)
    }

    fn last_key(&self) -> Option<&Key> {
        self.rows.last().map(|&id| &self.arena.node(id).key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, cells: &[(&str, Option<usize>)]) -> NodeSpec {
        NodeSpec::item(key).children(cells.iter().map(|&(cell, span)| {
            let spec = NodeSpec::cell(cell).text(cell);
            match span {
                Some(span) => spec.col_span(span),
                None => spec,
            }
        }))
    }

    #[test]
    fn test_rows_are_chained() {
        let grid = GridCollection::new(
            vec![row("a", &[("a1", None)]), row("b", &[("b1", None)])],
            1,
        )
        .unwrap();

        assert_eq!(grid.first_key().map(Key::as_str), Some("a"));
        assert_eq!(grid.last_key().map(Key::as_str), Some("b"));
        assert_eq!(grid.key_after("a").map(Key::as_str), Some("b"));
        assert_eq!(grid.key_before("b").map(Key::as_str), Some("a"));
        assert_eq!(grid.key_before("a"), None);
        assert_eq!(grid.get_item("b1").unwrap().parent_key.as_deref(), Some("b"));
    }

    #[test]
    fn test_cell_spans_compute_col_index() {
        let grid = GridCollection::new(
            vec![row("r", &[("c0", Some(2)), ("c1", None), ("c2", Some(3))])],
            6,
        )
        .unwrap();

        assert_eq!(grid.get_item("c0").unwrap().col_index(), Some(0));
        assert_eq!(grid.get_item("c1").unwrap().col_index(), Some(2));
        assert_eq!(grid.get_item("c2").unwrap().col_index(), Some(3));
        assert_eq!(grid.get_item("c2").unwrap().col_span(), 3);
    }

    #[test]
    fn test_rows_without_spans_leave_col_index_unset() {
        let grid = GridCollection::new(vec![row("r", &[("c0", None), ("c1", None)])], 2).unwrap();
        assert_eq!(grid.get_item("c1").unwrap().col_index(), None);
        assert_eq!(grid.at(2).map(|n| n.key.as_str()), Some("c1"));
    }

    #[test]
    fn test_rejects_non_item_rows() {
        let err = GridCollection::new(vec![NodeSpec::cell("loose")], 1).unwrap_err();
        assert!(matches!(err, CollectionError::Misplaced { .. }));
    }
}
