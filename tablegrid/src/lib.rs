//! Table collection model, column layout and grid keyboard navigation.
//!
//! Three pieces share one data model:
//! - [`TableCollection`] turns a description of columns and rows into an
//!   immutable, linked node graph with synthesized multi-level header rows.
//! - [`TableColumnLayout`] resolves column pixel widths from fixed, percent
//!   and `fr` constraints, and recomputes the row when a single column is resized.
//! - [`TableKeyboardDelegate`] answers "which key is next to this one" queries
//!   over the collection, including typeahead search.

pub mod collection;
pub mod error;
pub mod layout;
pub mod navigation;
pub mod node;
pub mod registry;
pub mod types;

pub use collection::{Collection, GridCollection, TableCollection, TableOptions};
pub use error::{CollectionError, RegistryError, WidthError};
pub use layout::{
    LayoutConfig, SizedColumn, TableColumnLayout, TableColumnResizeState, calculate_column_sizes,
};
pub use navigation::{
    BaseCollator, Collator, DelegateOptions, DisabledBehavior, FocusMode, GridKeyboardDelegate,
    KeyboardDelegate, NavigationConfig, TableKeyboardDelegate,
};
pub use node::{ColumnProps, GridNode, NodeKind, NodeSpec, NodeType, SpecKind};
pub use registry::{GridHandle, GridMeta, GridRegistry};
pub use types::*;
