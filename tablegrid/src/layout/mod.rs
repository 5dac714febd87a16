//! Column width layout.

mod column_layout;
mod flex;
mod resize_state;

pub use column_layout::TableColumnLayout;
pub use flex::{SizedColumn, calculate_column_sizes, max_width, min_width};
pub use resize_state::TableColumnResizeState;

use serde::{Deserialize, Serialize};

use crate::types::ColumnSize;

/// Defaults applied to columns that do not declare their own sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub default_width: ColumnSize,
    pub default_min_width: ColumnSize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_width: ColumnSize::Fr(1.0),
            default_min_width: ColumnSize::Px(75.0),
        }
    }
}
