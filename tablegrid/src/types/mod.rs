mod enums;
mod key;
mod size;

pub use enums::{Direction, NavDirection};
pub use key::Key;
pub use size::{ColumnSize, ColumnSizing, UNBOUNDED_WIDTH};
