//! Column width resolution following the CSS flexible box algorithm
//! (css-flexbox-1, section 9.7 "Resolving Flexible Lengths").

use std::collections::HashMap;

use crate::node::GridNode;
use crate::types::{ColumnSize, ColumnSizing, Key, UNBOUNDED_WIDTH};

static NO_SIZING: ColumnSizing = ColumnSizing {
    width: None,
    default_width: None,
    min_width: None,
    max_width: None,
};

/// A column that can be laid out: a key plus its declared sizing.
pub trait SizedColumn {
    fn key(&self) -> &Key;
    fn sizing(&self) -> &ColumnSizing;
}

impl SizedColumn for GridNode {
    fn key(&self) -> &Key {
        &self.key
    }

    fn sizing(&self) -> &ColumnSizing {
        self.column_props()
            .map(|props| &props.sizing)
            .unwrap_or(&NO_SIZING)
    }
}

impl SizedColumn for (Key, ColumnSizing) {
    fn key(&self) -> &Key {
        &self.0
    }

    fn sizing(&self) -> &ColumnSizing {
        &self.1
    }
}

impl<T: SizedColumn + ?Sized> SizedColumn for &T {
    fn key(&self) -> &Key {
        (**self).key()
    }

    fn sizing(&self) -> &ColumnSizing {
        (**self).sizing()
    }
}

/// Resolve a minimum width in pixels. Missing minimums are `0`.
pub fn min_width(min: Option<ColumnSize>, table_width: f64) -> f64 {
    static_bound(min, table_width).unwrap_or(0.0)
}

/// Resolve a maximum width in pixels. Missing maximums are unbounded.
pub fn max_width(max: Option<ColumnSize>, table_width: f64) -> f64 {
    static_bound(max, table_width).unwrap_or(UNBOUNDED_WIDTH)
}

fn static_bound(bound: Option<ColumnSize>, table_width: f64) -> Option<f64> {
    let bound = bound?;
    match bound.static_width(table_width) {
        Ok(px) => Some(px),
        Err(err) => {
            log::warn!("[layout] ignoring width bound: {err}");
            None
        }
    }
}

#[derive(Debug, Clone)]
struct FlexItem {
    frozen: bool,
    base_size: f64,
    min: f64,
    max: f64,
    flex: f64,
    target: f64,
    violation: f64,
}

impl FlexItem {
    fn clamp(&self, size: f64) -> f64 {
        self.min.max(size.min(self.max))
    }
}

/// Resolve pixel widths for `columns` in `available_width`.
///
/// The width of each column is taken from `changed` if present, then the
/// column's own `width` and `default_width`, then `default_width(index)`,
/// and finally `1fr`. Minimums come from the column or
/// `default_min_width(index)`.
///
/// Widths are whole pixels. Rounding carries the remainder forward so the
/// widths add up to the rounded total of the unrounded sizes.
pub fn calculate_column_sizes<C: SizedColumn>(
    available_width: f64,
    columns: &[C],
    changed: &HashMap<Key, ColumnSize>,
    default_width: impl Fn(usize) -> Option<ColumnSize>,
    default_min_width: impl Fn(usize) -> Option<ColumnSize>,
) -> Vec<f64> {
    let mut has_non_frozen = false;
    let mut items: Vec<FlexItem> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let sizing = column.sizing();
            let width = changed
                .get(column.key())
                .copied()
                .or(sizing.width)
                .or(sizing.default_width)
                .or_else(|| default_width(index))
                .unwrap_or_default();

            let mut frozen = false;
            let mut base_size = 0.0;
            let mut flex = 0.0;
            match width.static_width(available_width) {
                Ok(px) => {
                    base_size = px;
                    frozen = true;
                }
                Err(_) => {
                    flex = width.flex_factor();
                    if flex <= 0.0 {
                        frozen = true;
                    }
                }
            }

            let min = min_width(
                sizing.min_width.or_else(|| default_min_width(index)),
                available_width,
            );
            let max = max_width(sizing.max_width, available_width);
            let hypothetical = min.max(base_size.min(max));

            if !frozen {
                has_non_frozen = true;
            }
            FlexItem {
                frozen,
                base_size,
                min,
                max,
                flex,
                target: if frozen { hypothetical } else { 0.0 },
                violation: 0.0,
            }
        })
        .collect();

    let mut pass = 0;
    while has_non_frozen {
        pass += 1;

        let mut used_space = 0.0;
        let mut flex_factors = 0.0;
        for item in &items {
            if item.frozen {
                used_space += item.target;
            } else {
                used_space += item.base_size;
                flex_factors += item.flex;
            }
        }

        let remaining = available_width - used_space;
        if remaining > 0.0 {
            for item in items.iter_mut().filter(|item| !item.frozen) {
                item.target = item.base_size + (item.flex / flex_factors) * remaining;
            }
        }

        let mut total_violation = 0.0;
        for item in &mut items {
            item.violation = 0.0;
            if !item.frozen {
                let clamped = item.clamp(item.target);
                item.violation = clamped - item.target;
                item.target = clamped;
                total_violation += item.violation;
            }
        }

        has_non_frozen = false;
        for item in &mut items {
            if total_violation == 0.0 || sign(total_violation) == sign(item.violation) {
                item.frozen = true;
            } else if !item.frozen {
                has_non_frozen = true;
            }
        }

        log::trace!(
            "[layout] flex pass {pass}: remaining {remaining}, violation {total_violation}"
        );
    }

    cascade_rounding(&items)
}

/// Sign as `-1`, `0` or `1`. Unlike `f64::signum`, zero maps to zero.
fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Half-up rounding, so `x.5` always rounds towards positive infinity.
fn round(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn cascade_rounding(items: &[FlexItem]) -> Vec<f64> {
    let mut float_total = 0.0;
    let mut int_total = 0.0;
    items
        .iter()
        .map(|item| {
            let rounded = round(item.target + float_total) - int_total;
            float_total += item.target;
            int_total += rounded;
            rounded
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0);
        assert_eq!(sign(-0.0), 0);
        assert_eq!(sign(2.5), 1);
        assert_eq!(sign(-0.1), -1);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round(2.5), 3.0);
        assert_eq!(round(-2.5), -2.0);
        assert_eq!(round(133.333), 133.0);
    }

    #[test]
    fn test_cascade_rounding_keeps_total() {
        let item = |target| FlexItem {
            frozen: true,
            base_size: 0.0,
            min: 0.0,
            max: UNBOUNDED_WIDTH,
            flex: 0.0,
            target,
            violation: 0.0,
        };
        let third = 100.0 / 3.0;
        let rounded = cascade_rounding(&[item(third), item(third), item(third)]);
        assert_eq!(rounded, vec![33.0, 34.0, 33.0]);
    }

    #[test]
    fn test_fractional_bounds_are_ignored() {
        assert_eq!(min_width(Some(ColumnSize::Fr(1.0)), 500.0), 0.0);
        assert_eq!(max_width(Some(ColumnSize::Fr(1.0)), 500.0), UNBOUNDED_WIDTH);
        assert_eq!(max_width(Some(ColumnSize::Percent(10.0)), 500.0), 50.0);
    }
}
