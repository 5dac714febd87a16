//! Keyboard navigation over grid and table collections.
//!
//! A delegate answers "which key is next to this one" for a direction. It
//! never mutates the collection and returns `None` for unknown keys or when
//! there is nowhere to go.

mod collator;
mod grid;
mod table;

pub use collator::{BaseCollator, Collator};
pub use grid::GridKeyboardDelegate;
pub use table::TableKeyboardDelegate;

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::{Direction, Key, NavDirection};

/// Rows per page when paging without an explicit size.
const DEFAULT_PAGE_SIZE: usize = 10;

/// Spatial navigation over a collection.
pub trait KeyboardDelegate {
    fn key_below(&self, key: &str) -> Option<Key>;

    fn key_above(&self, key: &str) -> Option<Key>;

    fn key_right_of(&self, key: &str) -> Option<Key>;

    fn key_left_of(&self, key: &str) -> Option<Key>;

    /// First focusable key. From a cell, stays in the cell's row unless
    /// `global` is set.
    fn first_key(&self, from: Option<&str>, global: bool) -> Option<Key>;

    /// Last focusable key. From a cell, stays in the cell's row unless
    /// `global` is set.
    fn last_key(&self, from: Option<&str>, global: bool) -> Option<Key>;

    /// Typeahead: the next row (or cell) whose text starts with `search`.
    fn key_for_search(&self, search: &str, from: Option<&str>) -> Option<Key>;

    fn page_size(&self) -> usize {
        DEFAULT_PAGE_SIZE
    }

    /// Up to `page_size` steps down. `None` if no step is possible.
    fn key_page_below(&self, key: &str) -> Option<Key> {
        page(key, self.page_size(), |key| self.key_below(key))
    }

    /// Up to `page_size` steps up. `None` if no step is possible.
    fn key_page_above(&self, key: &str) -> Option<Key> {
        page(key, self.page_size(), |key| self.key_above(key))
    }

    fn key_in_direction(&self, direction: NavDirection, key: &str) -> Option<Key> {
        let next = match direction {
            NavDirection::Up => self.key_above(key),
            NavDirection::Down => self.key_below(key),
            NavDirection::Left => self.key_left_of(key),
            NavDirection::Right => self.key_right_of(key),
        };
        log::trace!("[nav] {direction:?} from '{key}' -> {next:?}");
        next
    }
}

fn page(key: &str, size: usize, step: impl Fn(&str) -> Option<Key>) -> Option<Key> {
    let mut current: Option<Key> = None;
    for _ in 0..size.max(1) {
        let from = current.as_deref().unwrap_or(key);
        match step(from) {
            Some(next) => current = Some(next),
            None => break,
        }
    }
    current
}

/// Whether rows or cells take focus when moving vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusMode {
    #[default]
    Row,
    Cell,
}

/// What a disabled key prevents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisabledBehavior {
    /// Disabled keys cannot be selected but can still be focused.
    Selection,
    /// Disabled keys are skipped by navigation.
    #[default]
    All,
}

/// Options shared by the keyboard delegates.
#[derive(Debug, Clone)]
pub struct DelegateOptions {
    pub direction: Direction,
    pub focus_mode: FocusMode,
    pub disabled_keys: HashSet<Key>,
    pub disabled_behavior: DisabledBehavior,
    /// Comparison used by typeahead. Search is disabled without one.
    pub collator: Option<Arc<dyn Collator>>,
    pub page_size: usize,
}

impl Default for DelegateOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Ltr,
            focus_mode: FocusMode::Row,
            disabled_keys: HashSet::new(),
            disabled_behavior: DisabledBehavior::All,
            collator: Some(Arc::new(BaseCollator)),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DelegateOptions {
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn focus_mode(mut self, focus_mode: FocusMode) -> Self {
        self.focus_mode = focus_mode;
        self
    }

    pub fn disabled_keys(mut self, keys: impl IntoIterator<Item = impl Into<Key>>) -> Self {
        self.disabled_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn disabled_behavior(mut self, behavior: DisabledBehavior) -> Self {
        self.disabled_behavior = behavior;
        self
    }

    pub fn collator(mut self, collator: impl Collator + 'static) -> Self {
        self.collator = Some(Arc::new(collator));
        self
    }

    pub fn without_collator(mut self) -> Self {
        self.collator = None;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub(crate) fn is_disabled(&self, key: &str) -> bool {
        self.disabled_behavior == DisabledBehavior::All && self.disabled_keys.contains(key)
    }
}

/// Serializable navigation settings. Converts into [`DelegateOptions`] with
/// the base collator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationConfig {
    pub direction: Direction,
    pub focus_mode: FocusMode,
    pub disabled_keys: Vec<Key>,
    pub disabled_behavior: DisabledBehavior,
    pub page_size: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Ltr,
            focus_mode: FocusMode::Row,
            disabled_keys: Vec::new(),
            disabled_behavior: DisabledBehavior::All,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<NavigationConfig> for DelegateOptions {
    fn from(config: NavigationConfig) -> Self {
        DelegateOptions {
            direction: config.direction,
            focus_mode: config.focus_mode,
            disabled_keys: config.disabled_keys.into_iter().collect(),
            disabled_behavior: config.disabled_behavior,
            collator: Some(Arc::new(BaseCollator)),
            page_size: config.page_size,
        }
    }
}
