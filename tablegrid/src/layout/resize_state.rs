use std::collections::HashMap;

use crate::collection::TableCollection;
use crate::types::{ColumnSize, Key};

use super::TableColumnLayout;

/// Column widths of one table across rebuilds and resize gestures.
///
/// Holds the widths of uncontrolled columns. They are reset only when the
/// ordered set of column keys changes, so a rebuilt collection with the same
/// columns keeps any manual resizes. Pixel widths are resolved lazily.
#[derive(Debug)]
pub struct TableColumnResizeState<'a> {
    collection: &'a TableCollection,
    layout: TableColumnLayout,
    table_width: f64,
    last_columns: Vec<Key>,
    uncontrolled_widths: HashMap<Key, ColumnSize>,
    resizing_column: Option<Key>,
    dirty: bool,
}

impl<'a> TableColumnResizeState<'a> {
    pub fn new(collection: &'a TableCollection, table_width: f64, layout: TableColumnLayout) -> Self {
        let (_, uncontrolled) = layout.split_columns_into_controlled_and_uncontrolled(collection.columns());
        let uncontrolled_widths = layout.initial_uncontrolled_widths(uncontrolled);
        Self {
            collection,
            layout,
            table_width,
            last_columns: collection.column_keys().cloned().collect(),
            uncontrolled_widths,
            resizing_column: None,
            dirty: true,
        }
    }

    /// Switch to a rebuilt collection.
    pub fn set_collection(&mut self, collection: &'a TableCollection) {
        let same_columns = collection.column_count() == self.last_columns.len()
            && collection.column_keys().zip(&self.last_columns).all(|(a, b)| a == b);
        if !same_columns {
            let (_, uncontrolled) = self
                .layout
                .split_columns_into_controlled_and_uncontrolled(collection.columns());
            self.uncontrolled_widths = self.layout.initial_uncontrolled_widths(uncontrolled);
            self.last_columns = collection.column_keys().cloned().collect();
            log::debug!(
                "[layout] columns changed, reset widths of {} columns",
                self.uncontrolled_widths.len()
            );
        }
        self.collection = collection;
        self.dirty = true;
    }

    pub fn set_table_width(&mut self, table_width: f64) {
        if table_width != self.table_width {
            self.table_width = table_width;
            self.dirty = true;
        }
    }

    pub fn table_width(&self) -> f64 {
        self.table_width
    }

    pub fn collection(&self) -> &'a TableCollection {
        self.collection
    }

    /// Declared widths of all columns, controlled and uncontrolled.
    pub fn declared_widths(&self) -> HashMap<Key, ColumnSize> {
        self.layout
            .recombine_columns(self.collection, &self.uncontrolled_widths)
    }

    /// Resolved pixel width of every column.
    pub fn column_widths(&mut self) -> &HashMap<Key, f64> {
        if self.dirty {
            let widths = self.declared_widths();
            self.layout
                .build_column_widths(self.table_width, self.collection, &widths);
            self.dirty = false;
        }
        self.layout.column_widths()
    }

    pub fn column_width(&mut self, key: &str) -> f64 {
        self.column_widths();
        self.layout.column_width(key)
    }

    pub fn column_min_width(&mut self, key: &str) -> f64 {
        self.column_widths();
        self.layout.column_min_width(key)
    }

    pub fn column_max_width(&mut self, key: &str) -> f64 {
        self.column_widths();
        self.layout.column_max_width(key)
    }

    pub fn start_resize(&mut self, key: impl Into<Key>) {
        let key = key.into();
        log::debug!("[layout] start resize '{key}'");
        self.resizing_column = Some(key);
    }

    pub fn end_resize(&mut self) {
        if let Some(key) = self.resizing_column.take() {
            log::debug!("[layout] end resize '{key}'");
        }
    }

    /// Column currently being resized, if any.
    pub fn resizing_column(&self) -> Option<&Key> {
        self.resizing_column.as_ref()
    }

    /// Resize `key` to `width` and return the new declared width of every
    /// column. Uncontrolled columns remember their new widths.
    pub fn update_resized_columns(&mut self, key: &str, width: f64) -> HashMap<Key, ColumnSize> {
        self.column_widths();
        let new_sizes =
            self.layout
                .resize_column_width(self.collection, &self.uncontrolled_widths, key, width);

        // Only uncontrolled columns are remembered, the resized one included.
        self.uncontrolled_widths = self
            .uncontrolled_widths
            .keys()
            .filter_map(|key| Some((key.clone(), *new_sizes.get(key)?)))
            .collect();
        self.dirty = true;
        new_sizes
    }
}
