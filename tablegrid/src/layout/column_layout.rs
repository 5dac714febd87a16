use std::collections::HashMap;
use std::fmt;

use crate::collection::TableCollection;
use crate::node::GridNode;
use crate::types::{ColumnSize, Key, UNBOUNDED_WIDTH};

use super::flex::{self, SizedColumn};
use super::LayoutConfig;

type WidthFn = Box<dyn Fn(&GridNode) -> Option<ColumnSize>>;

/// Resolves and caches column widths for a table, and turns a resize of a
/// single column into a new width for every column.
///
/// Columns with an explicit `width` are controlled: their width is owned by
/// the caller and is never changed by a resize. All other columns are
/// uncontrolled and keep their last width in a map owned by the caller (see
/// [`TableColumnResizeState`](crate::TableColumnResizeState)).
pub struct TableColumnLayout {
    config: LayoutConfig,
    default_width: Option<WidthFn>,
    default_min_width: Option<WidthFn>,
    column_widths: HashMap<Key, f64>,
    column_min_widths: HashMap<Key, f64>,
    column_max_widths: HashMap<Key, f64>,
}

impl fmt::Debug for TableColumnLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableColumnLayout")
            .field("config", &self.config)
            .field("column_widths", &self.column_widths)
            .finish_non_exhaustive()
    }
}

impl Default for TableColumnLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl TableColumnLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            default_width: None,
            default_min_width: None,
            column_widths: HashMap::new(),
            column_min_widths: HashMap::new(),
            column_max_widths: HashMap::new(),
        }
    }

    /// Per-column default width. Columns the closure returns `None` for use
    /// the configured default.
    pub fn with_default_width(
        mut self,
        default_width: impl Fn(&GridNode) -> Option<ColumnSize> + 'static,
    ) -> Self {
        self.default_width = Some(Box::new(default_width));
        self
    }

    /// Per-column default minimum width. Columns the closure returns `None`
    /// for use the configured default.
    pub fn with_default_min_width(
        mut self,
        default_min_width: impl Fn(&GridNode) -> Option<ColumnSize> + 'static,
    ) -> Self {
        self.default_min_width = Some(Box::new(default_min_width));
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    fn default_width_of(&self, column: &GridNode) -> ColumnSize {
        self.default_width
            .as_ref()
            .and_then(|f| f(column))
            .unwrap_or(self.config.default_width)
    }

    fn default_min_width_of(&self, column: &GridNode) -> ColumnSize {
        self.default_min_width
            .as_ref()
            .and_then(|f| f(column))
            .unwrap_or(self.config.default_min_width)
    }

    /// Partition columns into `(controlled, uncontrolled)` by whether they
    /// declare a `width`. Order is preserved within each side.
    pub fn split_columns_into_controlled_and_uncontrolled<'c>(
        &self,
        columns: impl IntoIterator<Item = &'c GridNode>,
    ) -> (Vec<&'c GridNode>, Vec<&'c GridNode>) {
        columns
            .into_iter()
            .partition(|column| column.sizing().width.is_some())
    }

    /// Starting widths of uncontrolled columns: `default_width`, then the
    /// per-column default, then the configured default.
    pub fn initial_uncontrolled_widths<'c>(
        &self,
        uncontrolled: impl IntoIterator<Item = &'c GridNode>,
    ) -> HashMap<Key, ColumnSize> {
        uncontrolled
            .into_iter()
            .map(|column| {
                let width = column
                    .sizing()
                    .default_width
                    .unwrap_or_else(|| self.default_width_of(column));
                (column.key.clone(), width)
            })
            .collect()
    }

    /// One width per column: controlled columns use their `width`,
    /// uncontrolled columns their entry in `uncontrolled_widths`.
    pub fn recombine_columns(
        &self,
        collection: &TableCollection,
        uncontrolled_widths: &HashMap<Key, ColumnSize>,
    ) -> HashMap<Key, ColumnSize> {
        collection
            .columns()
            .filter_map(|column| {
                let width = match column.sizing().width {
                    Some(width) => width,
                    None => *uncontrolled_widths.get(&column.key)?,
                };
                Some((column.key.clone(), width))
            })
            .collect()
    }

    /// Widths for every column after resizing `key` to `width`.
    ///
    /// The width is floored and clamped to the column's bounds. Columns
    /// before the resized one keep their current pixel width; columns after
    /// it go back to their declared width so they absorb the change.
    pub fn resize_column_width(
        &self,
        collection: &TableCollection,
        uncontrolled_widths: &HashMap<Key, ColumnSize>,
        key: &str,
        width: f64,
    ) -> HashMap<Key, ColumnSize> {
        let width = self
            .column_min_width(key)
            .max(self.column_max_width(key).min(width.floor()));

        let mut freeze = true;
        let mut new_widths = HashMap::with_capacity(collection.column_count());
        for column in collection.columns() {
            let size = if column.key == key {
                freeze = false;
                Some(ColumnSize::Px(width))
            } else if freeze {
                Some(ColumnSize::Px(
                    self.column_widths.get(&column.key).copied().unwrap_or(0.0),
                ))
            } else {
                column
                    .sizing()
                    .width
                    .or_else(|| uncontrolled_widths.get(&column.key).copied())
            };
            if let Some(size) = size {
                new_widths.insert(column.key.clone(), size);
            }
        }

        log::debug!("[layout] resize '{key}' to {width}px");
        new_widths
    }

    /// Resolve pixel widths for every column of `collection` and cache them
    /// with each column's bounds.
    pub fn build_column_widths(
        &mut self,
        table_width: f64,
        collection: &TableCollection,
        widths: &HashMap<Key, ColumnSize>,
    ) -> &HashMap<Key, f64> {
        let columns: Vec<&GridNode> = collection.columns().collect();
        let resolved = flex::calculate_column_sizes(
            table_width,
            &columns,
            widths,
            |index| Some(self.default_width_of(columns[index])),
            |index| Some(self.default_min_width_of(columns[index])),
        );

        let mut column_widths = HashMap::with_capacity(columns.len());
        let mut column_min_widths = HashMap::with_capacity(columns.len());
        let mut column_max_widths = HashMap::with_capacity(columns.len());
        for (column, width) in columns.iter().zip(resolved) {
            let sizing = column.sizing();
            let min = sizing
                .min_width
                .unwrap_or_else(|| self.default_min_width_of(column));
            column_widths.insert(column.key.clone(), width);
            column_min_widths.insert(column.key.clone(), flex::min_width(Some(min), table_width));
            column_max_widths.insert(
                column.key.clone(),
                flex::max_width(sizing.max_width, table_width),
            );
        }

        self.column_widths = column_widths;
        self.column_min_widths = column_min_widths;
        self.column_max_widths = column_max_widths;

        log::debug!(
            "[layout] resolved {} columns in {table_width}px",
            self.column_widths.len()
        );
        &self.column_widths
    }

    /// Last resolved width of a column, `0` before widths are built.
    pub fn column_width(&self, key: &str) -> f64 {
        self.column_widths.get(key).copied().unwrap_or(0.0)
    }

    pub fn column_min_width(&self, key: &str) -> f64 {
        self.column_min_widths.get(key).copied().unwrap_or(0.0)
    }

    pub fn column_max_width(&self, key: &str) -> f64 {
        self.column_max_widths
            .get(key)
            .copied()
            .unwrap_or(UNBOUNDED_WIDTH)
    }

    pub fn column_widths(&self) -> &HashMap<Key, f64> {
        &self.column_widths
    }
}
