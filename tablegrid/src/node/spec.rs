use crate::types::{ColumnSize, Key};

use super::{ColumnProps, NodeType};

/// Variant of a node in a table description.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecKind {
    Column(ColumnProps),
    Body,
    Item,
    Cell { col_span: Option<usize> },
}

impl SpecKind {
    pub const fn node_type(&self) -> NodeType {
        match self {
            SpecKind::Column(_) => NodeType::Column,
            SpecKind::Body => NodeType::Body,
            SpecKind::Item => NodeType::Item,
            SpecKind::Cell { .. } => NodeType::Cell,
        }
    }
}

/// Description of a table node, the input of [`TableCollection`](crate::TableCollection).
///
/// Columns nest to form column groups. The body holds items, and items
/// hold one cell per leaf column in column order.
///
/// # Example
///
/// ```
/// use tablegrid::NodeSpec;
///
/// let nodes = vec![
///     NodeSpec::column("name").text("Name").row_header(),
///     NodeSpec::column("type").text("Type"),
///     NodeSpec::body("body").child(
///         NodeSpec::item("row-1")
///             .child(NodeSpec::cell("row-1-name").text("Charizard"))
///             .child(NodeSpec::cell("row-1-type").text("Fire, Flying")),
///     ),
/// ];
/// # assert_eq!(nodes.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub key: Key,
    pub kind: SpecKind,
    pub text_value: String,
    pub rendered: Option<String>,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    fn new(key: impl Into<Key>, kind: SpecKind) -> Self {
        Self {
            key: key.into(),
            kind,
            text_value: String::new(),
            rendered: None,
            children: Vec::new(),
        }
    }

    pub fn column(key: impl Into<Key>) -> Self {
        Self::new(key, SpecKind::Column(ColumnProps::default()))
    }

    pub fn body(key: impl Into<Key>) -> Self {
        Self::new(key, SpecKind::Body)
    }

    pub fn item(key: impl Into<Key>) -> Self {
        Self::new(key, SpecKind::Item)
    }

    pub fn cell(key: impl Into<Key>) -> Self {
        Self::new(key, SpecKind::Cell { col_span: None })
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Set the plain-text value. Also used as the rendered value unless one
    /// is set explicitly.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text_value = text.into();
        self
    }

    pub fn rendered(mut self, rendered: impl Into<String>) -> Self {
        self.rendered = Some(rendered.into());
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }

    // -------------------------------------------------------------------------
    // Column configuration
    // -------------------------------------------------------------------------

    pub fn props(self, props: ColumnProps) -> Self {
        self.with_column(|p| *p = props)
    }

    pub fn row_header(self) -> Self {
        self.with_column(|p| p.is_row_header = true)
    }

    pub fn sortable(self) -> Self {
        self.with_column(|p| p.allows_sorting = true)
    }

    /// Controlled width. The column keeps this width through resizes.
    pub fn width(self, width: impl Into<ColumnSize>) -> Self {
        let width = width.into();
        self.with_column(|p| p.sizing.width = Some(width))
    }

    pub fn default_width(self, width: impl Into<ColumnSize>) -> Self {
        let width = width.into();
        self.with_column(|p| p.sizing.default_width = Some(width))
    }

    pub fn min_width(self, width: impl Into<ColumnSize>) -> Self {
        let width = width.into();
        self.with_column(|p| p.sizing.min_width = Some(width))
    }

    pub fn max_width(self, width: impl Into<ColumnSize>) -> Self {
        let width = width.into();
        self.with_column(|p| p.sizing.max_width = Some(width))
    }

    fn with_column(mut self, apply: impl FnOnce(&mut ColumnProps)) -> Self {
        match &mut self.kind {
            SpecKind::Column(props) => apply(props),
            other => log::warn!(
                "[node] column option ignored on {} node '{}'",
                other.node_type(),
                self.key
            ),
        }
        self
    }

    // -------------------------------------------------------------------------
    // Cell configuration
    // -------------------------------------------------------------------------

    /// Number of leaf columns a cell covers.
    pub fn col_span(mut self, span: usize) -> Self {
        match &mut self.kind {
            SpecKind::Cell { col_span } => *col_span = Some(span),
            other => log::warn!(
                "[node] col_span ignored on {} node '{}'",
                other.node_type(),
                self.key
            ),
        }
        self
    }
}
