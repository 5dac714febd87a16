use serde::{Deserialize, Serialize};

/// Text direction of the surrounding layout. Horizontal navigation is
/// mirrored in right-to-left layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub const fn is_rtl(self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

/// Arrow-key direction for grid navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}
