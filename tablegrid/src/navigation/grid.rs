use crate::collection::Collection;
use crate::node::{GridNode, NodeType};
use crate::types::Key;

use super::{DelegateOptions, FocusMode, KeyboardDelegate};

/// Keyboard navigation over rows and the cells inside them.
///
/// Vertical moves go to the next or previous row, keeping the column when
/// starting from a cell. Horizontal moves walk a row's cells and are
/// mirrored in right-to-left layouts.
#[derive(Debug, Clone)]
pub struct GridKeyboardDelegate<'a, C> {
    collection: &'a C,
    options: DelegateOptions,
    is_cell: fn(&GridNode) -> bool,
}

fn is_cell(node: &GridNode) -> bool {
    node.is(NodeType::Cell)
}

fn is_row(node: &GridNode) -> bool {
    node.is(NodeType::Item)
}

impl<'a, C: Collection> GridKeyboardDelegate<'a, C> {
    pub fn new(collection: &'a C, options: DelegateOptions) -> Self {
        Self {
            collection,
            options,
            is_cell,
        }
    }

    /// Treat nodes matching `is_cell` as cells, for collections with more
    /// than one kind of focusable cell.
    pub(crate) fn with_cell_predicate(mut self, is_cell: fn(&GridNode) -> bool) -> Self {
        self.is_cell = is_cell;
        self
    }

    pub fn collection(&self) -> &'a C {
        self.collection
    }

    pub fn options(&self) -> &DelegateOptions {
        &self.options
    }

    pub(crate) fn is_cell(&self, node: &GridNode) -> bool {
        (self.is_cell)(node)
    }

    fn item(&self, key: &str) -> Option<&'a GridNode> {
        self.collection.get_item(key)
    }

    /// First key after `from` (or from the start) matching `predicate`,
    /// skipping disabled keys.
    pub(crate) fn find_next_key(
        &self,
        from: Option<&str>,
        predicate: impl Fn(&GridNode) -> bool,
    ) -> Option<Key> {
        let mut key = match from {
            Some(from) => self.collection.key_after(from),
            None => self.collection.first_key(),
        };
        while let Some(current) = key {
            let item = self.item(current)?;
            if !self.options.is_disabled(current) && predicate(item) {
                return Some(current.clone());
            }
            key = self.collection.key_after(current);
        }
        None
    }

    /// First key before `from` (or from the end) matching `predicate`,
    /// skipping disabled keys.
    pub(crate) fn find_previous_key(
        &self,
        from: Option<&str>,
        predicate: impl Fn(&GridNode) -> bool,
    ) -> Option<Key> {
        let mut key = match from {
            Some(from) => self.collection.key_before(from),
            None => self.collection.last_key(),
        };
        while let Some(current) = key {
            let item = self.item(current)?;
            if !self.options.is_disabled(current) && predicate(item) {
                return Some(current.clone());
            }
            key = self.collection.key_before(current);
        }
        None
    }

    /// Child of `row` covering the leaf column `index`.
    fn key_for_item_in_row_by_index(&self, row: &str, index: usize) -> Option<Key> {
        let mut offset = 0;
        for child in self.collection.children(row) {
            let span = child.col_span();
            offset = usize::saturating_add(offset, span);
            if offset > index {
                return Some(child.key.clone());
            }
        }
        None
    }

    fn vertical(&self, key: &str, step: impl Fn(&str) -> Option<Key>) -> Option<Key> {
        let start = self.item(key)?;
        let row = if self.is_cell(start) {
            start.parent_key.as_deref()?
        } else {
            key
        };

        let next = step(row)?;
        if self.is_cell(start) {
            let index = start.col_index().unwrap_or(start.index);
            return self.key_for_item_in_row_by_index(&next, index);
        }
        match self.options.focus_mode {
            FocusMode::Row => Some(next),
            FocusMode::Cell => None,
        }
    }

    fn sibling_cell(&self, cell: &GridNode, forward: bool) -> Option<Key> {
        let parent = cell.parent_key.as_deref()?;
        let index = if forward {
            cell.index.checked_add(1)?
        } else {
            cell.index.checked_sub(1)?
        };
        self.collection
            .children(parent)
            .get(index)
            .map(|sibling| sibling.key.clone())
    }

    /// Visit rows starting at `from` until `matches` yields a key. A cell
    /// starts at its row; any other non-row node starts at the first row.
    /// Wraps to the first row once.
    pub(crate) fn search_rows(
        &self,
        from: Option<&str>,
        mut matches: impl FnMut(&'a GridNode) -> Option<Key>,
    ) -> Option<Key> {
        let mut key = match from.map(|from| self.item(from)) {
            Some(None) => return None,
            Some(Some(item)) if item.is(NodeType::Cell) => item.parent_key.clone(),
            Some(Some(item)) if is_row(item) => Some(item.key.clone()),
            _ => self.find_next_key(None, is_row),
        };

        let mut wrapped = false;
        while let Some(current) = key {
            let item = self.item(&current)?;
            if let Some(found) = matches(item) {
                return Some(found);
            }
            key = self.find_next_key(Some(&current), is_row);
            if key.is_none() && !wrapped {
                key = self.find_next_key(None, is_row);
                wrapped = true;
            }
        }
        None
    }

    /// Matcher comparing the leading characters of a text with `search`.
    /// `None` without a collator.
    pub(crate) fn prefix_matcher<'s>(&'s self, search: &'s str) -> Option<impl Fn(&str) -> bool + 's> {
        let collator = self.options.collator.as_deref()?;
        let length = search.chars().count();
        Some(move |text: &str| {
            if text.is_empty() {
                return false;
            }
            let prefix: String = text.chars().take(length).collect();
            collator.equals(&prefix, search)
        })
    }
}

impl<C: Collection> KeyboardDelegate for GridKeyboardDelegate<'_, C> {
    fn key_below(&self, key: &str) -> Option<Key> {
        self.vertical(key, |row| self.find_next_key(Some(row), is_row))
    }

    fn key_above(&self, key: &str) -> Option<Key> {
        self.vertical(key, |row| self.find_previous_key(Some(row), is_row))
    }

    fn key_right_of(&self, key: &str) -> Option<Key> {
        let item = self.item(key)?;
        let rtl = self.options.direction.is_rtl();

        if is_row(item) {
            let children = &item.child_keys;
            let child = if rtl { children.last() } else { children.first() };
            return child.cloned();
        }

        if self.is_cell(item) && item.parent_key.is_some() {
            if let Some(next) = self.sibling_cell(item, !rtl) {
                return Some(next);
            }
            if self.options.focus_mode == FocusMode::Row {
                return item.parent_key.clone();
            }
            return if rtl {
                self.first_key(Some(key), false)
            } else {
                self.last_key(Some(key), false)
            };
        }
        None
    }

    fn key_left_of(&self, key: &str) -> Option<Key> {
        let item = self.item(key)?;
        let rtl = self.options.direction.is_rtl();

        if is_row(item) {
            let children = &item.child_keys;
            let child = if rtl { children.first() } else { children.last() };
            return child.cloned();
        }

        if self.is_cell(item) && item.parent_key.is_some() {
            if let Some(prev) = self.sibling_cell(item, rtl) {
                return Some(prev);
            }
            if self.options.focus_mode == FocusMode::Row {
                return item.parent_key.clone();
            }
            return if rtl {
                self.last_key(Some(key), false)
            } else {
                self.first_key(Some(key), false)
            };
        }
        None
    }

    fn first_key(&self, from: Option<&str>, global: bool) -> Option<Key> {
        let mut from_cell = false;
        if let Some(from) = from {
            let item = self.item(from)?;
            from_cell = self.is_cell(item);
            if from_cell
                && !global
                && let Some(parent) = item.parent_key.as_deref()
            {
                return self.item(parent)?.first_child_key().cloned();
            }
        }

        let key = self.find_next_key(None, is_row)?;
        if (from_cell && global) || self.options.focus_mode == FocusMode::Cell {
            return self.item(&key)?.first_child_key().cloned();
        }
        Some(key)
    }

    fn last_key(&self, from: Option<&str>, global: bool) -> Option<Key> {
        let mut from_cell = false;
        if let Some(from) = from {
            let item = self.item(from)?;
            from_cell = self.is_cell(item);
            if from_cell
                && !global
                && let Some(parent) = item.parent_key.as_deref()
            {
                return self.item(parent)?.last_child_key().cloned();
            }
        }

        let key = self.find_previous_key(None, is_row)?;
        if (from_cell && global) || self.options.focus_mode == FocusMode::Cell {
            return self.item(&key)?.last_child_key().cloned();
        }
        Some(key)
    }

    fn key_for_search(&self, search: &str, from: Option<&str>) -> Option<Key> {
        let matches = self.prefix_matcher(search)?;
        let found = self.search_rows(from, |row| {
            if !matches(&row.text_value) {
                return None;
            }
            if is_row(row) && self.options.focus_mode == FocusMode::Cell {
                return row.first_child_key().cloned();
            }
            Some(row.key.clone())
        });
        log::trace!("[nav] search '{search}' from {from:?} -> {found:?}");
        found
    }

    fn page_size(&self) -> usize {
        self.options.page_size
    }
}
