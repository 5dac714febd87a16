use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::WidthError;

/// Upper bound used when a column declares no maximum width.
pub const UNBOUNDED_WIDTH: f64 = 9_007_199_254_740_991.0;

static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)%$").expect("valid percent pattern"));
static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)fr$").expect("valid fraction pattern"));

/// Declared width of a column.
///
/// Pixel widths are plain numbers. Text only parses as `"25%"` or `"2fr"`,
/// and percentages only accept whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSize", into = "RawSize")]
pub enum ColumnSize {
    /// Static width in pixels.
    Px(f64),
    /// Percentage of the available table width.
    Percent(f64),
    /// Share of the free space left after static columns are placed.
    Fr(f64),
}

impl Default for ColumnSize {
    fn default() -> Self {
        ColumnSize::Fr(1.0)
    }
}

impl ColumnSize {
    /// Pixels and percentages are static; `fr` widths flex.
    pub const fn is_static(&self) -> bool {
        matches!(self, ColumnSize::Px(_) | ColumnSize::Percent(_))
    }

    /// Resolve a static width against the table width.
    pub fn static_width(&self, table_width: f64) -> Result<f64, WidthError> {
        match *self {
            ColumnSize::Px(px) => Ok(px),
            ColumnSize::Percent(pct) => Ok(table_width * (pct / 100.0)),
            ColumnSize::Fr(_) => Err(WidthError::not_static(self.to_string())),
        }
    }

    /// Flex factor of the column. Static widths report `1`, matching the
    /// factor an unparsable width falls back to.
    pub const fn flex_factor(&self) -> f64 {
        match *self {
            ColumnSize::Fr(fr) => fr,
            ColumnSize::Px(_) | ColumnSize::Percent(_) => 1.0,
        }
    }

    /// Parse a width, coercing anything unsupported to `1fr` with a warning.
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            log::warn!(
                "[width] {value} is not a supported format, width should be a number (ex. 150), \
                 percentage (ex. '50%') or fr unit (ex. '2fr'), defaulting to '1fr'"
            );
            ColumnSize::default()
        })
    }
}

impl FromStr for ColumnSize {
    type Err = WidthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Some(caps) = PERCENT.captures(trimmed) {
            return caps[1]
                .parse::<f64>()
                .map(ColumnSize::Percent)
                .map_err(|_| WidthError::malformed(value));
        }
        if let Some(caps) = FRACTION.captures(trimmed) {
            return caps[1]
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|fr| fr.is_finite())
                .map(ColumnSize::Fr)
                .ok_or_else(|| WidthError::malformed(value));
        }
        Err(WidthError::malformed(value))
    }
}

impl fmt::Display for ColumnSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSize::Px(px) => write!(f, "{px}"),
            ColumnSize::Percent(pct) => write!(f, "{pct}%"),
            ColumnSize::Fr(fr) => write!(f, "{fr}fr"),
        }
    }
}

impl From<f64> for ColumnSize {
    fn from(px: f64) -> Self {
        ColumnSize::Px(px)
    }
}

impl From<i32> for ColumnSize {
    fn from(px: i32) -> Self {
        ColumnSize::Px(f64::from(px))
    }
}

impl From<&str> for ColumnSize {
    fn from(value: &str) -> Self {
        ColumnSize::parse_lossy(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSize {
    Number(f64),
    Text(String),
}

impl TryFrom<RawSize> for ColumnSize {
    type Error = WidthError;

    fn try_from(raw: RawSize) -> Result<Self, Self::Error> {
        match raw {
            RawSize::Number(px) => Ok(ColumnSize::Px(px)),
            RawSize::Text(text) => text.parse(),
        }
    }
}

impl From<ColumnSize> for RawSize {
    fn from(size: ColumnSize) -> Self {
        match size {
            ColumnSize::Px(px) => RawSize::Number(px),
            other => RawSize::Text(other.to_string()),
        }
    }
}

/// Width constraints declared on a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnSizing {
    /// Controlled width. Columns with a width are never adjusted by resizing.
    pub width: Option<ColumnSize>,
    /// Initial width of an uncontrolled column.
    pub default_width: Option<ColumnSize>,
    pub min_width: Option<ColumnSize>,
    pub max_width: Option<ColumnSize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("25%".parse::<ColumnSize>().ok(), Some(ColumnSize::Percent(25.0)));
        assert_eq!("2fr".parse::<ColumnSize>().ok(), Some(ColumnSize::Fr(2.0)));
        assert_eq!("0.5fr".parse::<ColumnSize>().ok(), Some(ColumnSize::Fr(0.5)));
    }

    #[test]
    fn test_fractional_percent_is_rejected() {
        assert!("12.5%".parse::<ColumnSize>().is_err());
        assert!("wide".parse::<ColumnSize>().is_err());
        assert!("fr".parse::<ColumnSize>().is_err());
        assert!("150".parse::<ColumnSize>().is_err());
    }

    #[test]
    fn test_lossy_falls_back_to_one_fr() {
        assert_eq!(ColumnSize::from("12em"), ColumnSize::Fr(1.0));
        assert_eq!(ColumnSize::from("150"), ColumnSize::Fr(1.0));
        assert_eq!(ColumnSize::from("3fr"), ColumnSize::Fr(3.0));
    }

    #[test]
    fn test_static_width() {
        assert_eq!(ColumnSize::Percent(25.0).static_width(800.0).ok(), Some(200.0));
        assert_eq!(ColumnSize::Px(90.0).static_width(800.0).ok(), Some(90.0));
        assert!(ColumnSize::Fr(1.0).static_width(800.0).is_err());
    }
}
