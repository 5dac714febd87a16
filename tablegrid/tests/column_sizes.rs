use std::collections::HashMap;

use tablegrid::{ColumnSize, ColumnSizing, Key, calculate_column_sizes};

fn columns(widths: &[Option<ColumnSize>]) -> Vec<(Key, ColumnSizing)> {
    widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let sizing = ColumnSizing {
                width: *width,
                ..ColumnSizing::default()
            };
            (Key::from(format!("col-{index}")), sizing)
        })
        .collect()
}

fn resolve(available: f64, columns: &[(Key, ColumnSizing)], min: Option<f64>) -> Vec<f64> {
    calculate_column_sizes(
        available,
        columns,
        &HashMap::new(),
        |_| Some(ColumnSize::Fr(1.0)),
        |_| min.map(ColumnSize::Px),
    )
}

// ============================================================================
// Fractional Widths
// ============================================================================

#[test]
fn test_fractions_are_cascade_rounded() {
    let cols = columns(&[None, None, Some(ColumnSize::Fr(4.0))]);
    assert_eq!(resolve(800.0, &cols, Some(50.0)), vec![133.0, 134.0, 533.0]);
}

#[test]
fn test_fractions_share_space_left_by_static_column() {
    let cols = columns(&[
        Some(ColumnSize::Px(200.0)),
        None,
        None,
        Some(ColumnSize::Fr(4.0)),
    ]);
    assert_eq!(
        resolve(1000.0, &cols, Some(50.0)),
        vec![200.0, 133.0, 134.0, 533.0]
    );
}

#[test]
fn test_changed_widths_override_declared_widths() {
    let cols = columns(&[Some(ColumnSize::Px(300.0)), None]);
    let changed = HashMap::from([
        (Key::from("col-0"), ColumnSize::Px(100.0)),
        (Key::from("col-1"), ColumnSize::Fr(1.0)),
    ]);

    let widths = calculate_column_sizes(500.0, &cols, &changed, |_| None, |_| None);

    assert_eq!(widths, vec![100.0, 400.0]);
}

#[test]
fn test_default_width_callback_is_used_for_undeclared_columns() {
    let cols = columns(&[None, None]);

    let widths = calculate_column_sizes(
        600.0,
        &cols,
        &HashMap::new(),
        |index| (index == 0).then_some(ColumnSize::Px(100.0)),
        |_| None,
    );

    assert_eq!(widths, vec![100.0, 500.0]);
}

#[test]
fn test_zero_fraction_is_frozen_at_min() {
    let cols = columns(&[Some(ColumnSize::Fr(0.0)), None, None]);
    assert_eq!(resolve(400.0, &cols, None), vec![0.0, 200.0, 200.0]);
}

// ============================================================================
// Static Widths
// ============================================================================

#[test]
fn test_percentage_of_available_width() {
    let cols = columns(&[Some(ColumnSize::Percent(25.0)), None]);
    assert_eq!(resolve(800.0, &cols, None), vec![200.0, 600.0]);
}

#[test]
fn test_overflowing_static_columns_leave_flex_at_min() {
    let cols = columns(&[Some(ColumnSize::Px(500.0)), None]);
    assert_eq!(resolve(400.0, &cols, Some(50.0)), vec![500.0, 50.0]);
}

// ============================================================================
// Clamping
// ============================================================================

#[test]
fn test_max_width_redistributes_to_other_columns() {
    let mut cols = columns(&[None, None, None]);
    cols[0].1.max_width = Some(ColumnSize::Px(100.0));

    let widths = resolve(600.0, &cols, None);

    assert_eq!(widths, vec![100.0, 250.0, 250.0]);
}

#[test]
fn test_min_width_takes_space_from_other_columns() {
    let mut cols = columns(&[None, None, None]);
    cols[2].1.min_width = Some(ColumnSize::Px(150.0));

    let widths = resolve(300.0, &cols, None);

    assert_eq!(widths, vec![75.0, 75.0, 150.0]);
}

#[test]
fn test_no_width_is_outside_its_bounds() {
    let mut cols = columns(&[
        None,
        Some(ColumnSize::Fr(3.0)),
        Some(ColumnSize::Percent(10.0)),
        None,
    ]);
    cols[0].1.min_width = Some(ColumnSize::Px(180.0));
    cols[1].1.max_width = Some(ColumnSize::Px(220.0));
    cols[3].1.max_width = Some(ColumnSize::Percent(15.0));

    let widths = resolve(1000.0, &cols, Some(40.0));

    assert!(widths[0] >= 180.0);
    assert!(widths[1] <= 220.0);
    assert_eq!(widths[2], 100.0);
    assert!(widths[3] <= 150.0 && widths[3] >= 40.0);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_total_is_conserved_without_binding_clamps() {
    for available in [999.0, 1000.0, 1001.0, 333.3, 640.25] {
        for count in 1..=7 {
            let cols = columns(&vec![None; count]);
            let widths = resolve(available, &cols, None);
            let total: f64 = widths.iter().sum();
            assert_eq!(total, (available + 0.5_f64).floor(), "{count} columns in {available}");
        }
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let cols = columns(&[
        Some(ColumnSize::Px(120.0)),
        Some(ColumnSize::Fr(2.0)),
        None,
        Some(ColumnSize::Percent(20.0)),
    ]);
    let first = resolve(917.0, &cols, Some(60.0));
    let second = resolve(917.0, &cols, Some(60.0));
    assert_eq!(first, second);
}

#[test]
fn test_empty_columns_resolve_to_nothing() {
    let cols = columns(&[]);
    assert!(resolve(500.0, &cols, None).is_empty());
}
